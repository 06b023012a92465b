use bevy::prelude::*;
use bevy_meadow::{MeshVertex, ModelChunk, ObjectModel, ScatteredObject};

fn vertex(x: f32, y: f32, z: f32) -> MeshVertex {
    MeshVertex {
        position: Vec3::new(x, y, z),
        normal: Vec3::Y,
        uv: Vec2::new(x, z),
    }
}

/// Two triangles sharing an edge, written out un-indexed.
fn quad_soup() -> Vec<MeshVertex> {
    let a = vertex(0.0, 0.0, 0.0);
    let b = vertex(0.0, 0.0, 1.0);
    let c = vertex(1.0, 0.0, 0.0);
    let d = vertex(1.0, 0.0, 1.0);
    vec![a, b, c, c, b, d]
}

#[test]
fn shared_vertices_are_merged() {
    let chunk = ModelChunk::from_triangle_soup("bark", &quad_soup());
    assert_eq!(chunk.material, "bark");
    assert_eq!(chunk.vertices.len(), 4);
    assert_eq!(chunk.indices, vec![0, 1, 2, 2, 1, 3]);
}

#[test]
fn differing_attributes_stay_separate() {
    let mut soup = quad_soup();
    soup[3].normal = Vec3::X;
    let chunk = ModelChunk::from_triangle_soup("leaves", &soup);
    assert_eq!(chunk.vertices.len(), 5);
    assert_eq!(chunk.indices.len(), 6);
}

#[test]
fn indices_reproduce_the_soup() {
    let soup = quad_soup();
    let chunk = ModelChunk::from_triangle_soup("bark", &soup);
    for (i, &index) in chunk.indices.iter().enumerate() {
        assert_eq!(chunk.vertices[index as usize], soup[i]);
    }
}

#[test]
fn chunk_mesh_is_a_triangle_list() {
    let chunk = ModelChunk::from_triangle_soup("bark", &quad_soup());
    let mesh = chunk.to_mesh();
    assert_eq!(mesh.primitive_topology(), bevy::mesh::PrimitiveTopology::TriangleList);
    assert_eq!(mesh.count_vertices(), 4);
    assert_eq!(mesh.indices().unwrap().len(), 6);
}

#[test]
fn placements_cover_every_object_and_chunk() {
    let model = ObjectModel::new(vec![
        ModelChunk::from_triangle_soup("bark", &quad_soup()),
        ModelChunk::from_triangle_soup("leaves", &quad_soup()),
    ]);
    let objects = [
        ScatteredObject {
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: 0.5,
        },
        ScatteredObject {
            position: Vec3::new(-4.0, 0.0, 6.0),
            scale: 1.5,
        },
    ];

    let placements: Vec<_> = model.placements(&objects).collect();
    assert_eq!(placements.len(), 4);
    assert_eq!(placements[0].1.material, "bark");
    assert_eq!(placements[1].1.material, "leaves");
    assert_eq!(placements[0].0.translation, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(placements[1].0.scale, Vec3::splat(0.5));
    assert_eq!(placements[3].0.translation, Vec3::new(-4.0, 0.0, 6.0));
    assert_eq!(placements[3].0.scale, Vec3::splat(1.5));
}
