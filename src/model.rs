//! Pre-built meshes for scattered objects.
//!
//! A tree model arrives from an external loader as a list of per-material
//! chunks. This module only folds raw triangle lists into indexed chunks and
//! positions a model at each [`ScatteredObject`]. It does not parse any
//! model format.

use std::collections::HashMap;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::grid::MeshVertex;
use crate::scatter::ScatteredObject;

/// Indexed geometry drawn with a single material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelChunk {
    pub material: String,
    pub vertices: Vec<MeshVertex>,
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl ModelChunk {
    /// Builds a chunk from an un-indexed triangle list, emitting each
    /// bit-identical vertex once.
    pub fn from_triangle_soup(material: impl Into<String>, soup: &[MeshVertex]) -> Self {
        let mut seen: HashMap<[u32; 8], u32> = HashMap::new();
        let mut vertices = Vec::new();
        let mut indices = Vec::with_capacity(soup.len());

        for vertex in soup {
            let index = *seen.entry(vertex_key(vertex)).or_insert_with(|| {
                vertices.push(*vertex);
                (vertices.len() - 1) as u32
            });
            indices.push(index);
        }

        Self {
            material: material.into(),
            vertices,
            indices,
        }
    }

    /// Builds a `TriangleList` mesh. Normals are taken as given.
    pub fn to_mesh(&self) -> Mesh {
        let positions: Vec<[f32; 3]> = self.vertices.iter().map(|v| v.position.into()).collect();
        let normals: Vec<[f32; 3]> = self.vertices.iter().map(|v| v.normal.into()).collect();
        let uvs: Vec<[f32; 2]> = self.vertices.iter().map(|v| v.uv.into()).collect();

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh
    }
}

fn vertex_key(v: &MeshVertex) -> [u32; 8] {
    [
        v.position.x.to_bits(),
        v.position.y.to_bits(),
        v.position.z.to_bits(),
        v.normal.x.to_bits(),
        v.normal.y.to_bits(),
        v.normal.z.to_bits(),
        v.uv.x.to_bits(),
        v.uv.y.to_bits(),
    ]
}

/// A model made of material chunks, shared by every placed instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectModel {
    pub chunks: Vec<ModelChunk>,
}

impl ObjectModel {
    pub fn new(chunks: Vec<ModelChunk>) -> Self {
        Self { chunks }
    }

    /// Moves the model origin to the object's base and scales it uniformly.
    pub fn instance_transform(object: &ScatteredObject) -> Transform {
        Transform::from_translation(object.position).with_scale(Vec3::splat(object.scale))
    }

    /// Every chunk of the model at every object, objects outermost.
    pub fn placements<'a>(
        &'a self,
        objects: &'a [ScatteredObject],
    ) -> impl Iterator<Item = (Transform, &'a ModelChunk)> + 'a {
        objects.iter().flat_map(move |object| {
            let transform = Self::instance_transform(object);
            self.chunks.iter().map(move |chunk| (transform, chunk))
        })
    }
}
