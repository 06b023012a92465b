//! Mesh generation from a [`HeightGrid`].
//!
//! The land is drawn as one indexed triangle strip:
//! - one vertex per grid cell, row-major, with tiling UVs
//! - per-vertex normals from the cross products of the four edges to the
//!   axis neighbors
//! - `D - 1` row strips stitched together with degenerate triangles, so the
//!   whole grid renders in a single draw call

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::grid::{HeightGrid, MeshVertex};

/// Largest vertex count a 16-bit index buffer can address.
const U16_VERTEX_LIMIT: usize = u16::MAX as usize + 1;

/// Index buffer for a stitched triangle strip, in the narrowest width that
/// can address every vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StripIndices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl StripIndices {
    pub fn len(&self) -> usize {
        match self {
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widens every index to `u32`.
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            Self::U16(v) => v.iter().map(|&i| i as u32).collect(),
            Self::U32(v) => v.clone(),
        }
    }
}

impl From<StripIndices> for Indices {
    fn from(indices: StripIndices) -> Self {
        match indices {
            StripIndices::U16(v) => Indices::U16(v),
            StripIndices::U32(v) => Indices::U32(v),
        }
    }
}

/// Vertex and index buffers for the land, ready for upload.
#[derive(Clone, Debug)]
pub struct MeshBuffers {
    pub vertices: Vec<MeshVertex>,
    pub indices: StripIndices,
}

/// Fills every cell's normal from its finalized neighbor elevations.
///
/// For each cell the edges to the north `(x, z-1)`, east `(x+1, z)`, south
/// `(x, z+1)` and west `(x-1, z)` neighbors are formed, missing neighbors
/// giving a zero edge. The normal is `N×W + E×N + S×E + W×S`, left
/// unnormalized. Border cells lose the terms that involve a missing edge but
/// always keep at least one.
pub fn compute_normals(grid: &mut HeightGrid) {
    let dim = grid.dim();
    let mut normals = Vec::with_capacity(dim * dim);

    for z in 0..dim {
        for x in 0..dim {
            let here = grid.cell(x, z).position;
            let edge = |nx: Option<usize>, nz: Option<usize>| match (nx, nz) {
                (Some(nx), Some(nz)) if nx < dim && nz < dim => grid.cell(nx, nz).position - here,
                _ => Vec3::ZERO,
            };
            let north = edge(Some(x), z.checked_sub(1));
            let east = edge(Some(x + 1), Some(z));
            let south = edge(Some(x), Some(z + 1));
            let west = edge(x.checked_sub(1), Some(z));

            normals.push(
                north.cross(west) + east.cross(north) + south.cross(east) + west.cross(south),
            );
        }
    }

    for (cell, normal) in grid.cells_mut().iter_mut().zip(normals) {
        cell.normal = normal;
    }
}

/// Copies the grid into a vertex sequence, scaling each cell's fractional
/// grid position by `texture_repeats` to get its UV.
pub fn build_vertices(grid: &HeightGrid, texture_repeats: f32) -> Vec<MeshVertex> {
    grid.cells()
        .iter()
        .map(|cell| MeshVertex {
            uv: cell.uv * texture_repeats,
            ..*cell
        })
        .collect()
}

/// Builds the stitched strip indices for a `dim × dim` grid.
///
/// Row `zi` alternates `xi + zi*dim` and `xi + (zi+1)*dim` across all columns.
/// Between rows the last index of the finished row and the first index of
/// the next row are each emitted twice, which makes four degenerate
/// triangles and restarts the strip. The result has `2*dim*dim - 4`
/// entries.
pub fn build_indices(dim: usize) -> StripIndices {
    let indices = strip_indices(dim);
    if dim * dim <= U16_VERTEX_LIMIT {
        StripIndices::U16(indices.into_iter().map(|i| i as u16).collect())
    } else {
        StripIndices::U32(indices)
    }
}

fn strip_indices(dim: usize) -> Vec<u32> {
    if dim < 2 {
        return Vec::new();
    }
    let rows = dim - 1;
    let mut indices: Vec<u32> = Vec::with_capacity(2 * dim * dim - 4);

    for zi in 0..rows {
        for xi in 0..dim {
            let top = (xi + zi * dim) as u32;
            if zi > 0 && xi == 0 {
                indices.push(top);
            }
            indices.push(top);
            indices.push((xi + (zi + 1) * dim) as u32);
        }
        if zi + 1 < rows
            && let Some(&last) = indices.last()
        {
            indices.push(last);
        }
    }
    indices
}

/// Runs the whole land pipeline on a synthesized grid: normals, then
/// vertices and strip indices.
pub fn build_buffers(grid: &mut HeightGrid, texture_repeats: f32) -> MeshBuffers {
    compute_normals(grid);
    MeshBuffers {
        vertices: build_vertices(grid, texture_repeats),
        indices: build_indices(grid.dim()),
    }
}

/// Converts a [`HeightGrid`] into a Bevy [`Mesh`].
///
/// The mesh covers `[-half, half]` on X and Z, matching the grid's world
/// coordinates, so it needs no offset transform. It uses the normals
/// already stored in the grid, normalized, so run [`compute_normals`]
/// first.
///
/// # Example
///
/// ```ignore
/// use bevy_meadow::{HeightGrid, TerrainMeshBuilder, compute_normals};
///
/// let mut grid = HeightGrid::new(65, 16.0)?;
/// compute_normals(&mut grid);
/// let mesh = TerrainMeshBuilder::new()
///     .with_texture_repeats(8.0)
///     .build(&grid);
/// ```
pub struct TerrainMeshBuilder {
    texture_repeats: f32,
}

impl Default for TerrainMeshBuilder {
    fn default() -> Self {
        Self {
            texture_repeats: 1.0,
        }
    }
}

impl TerrainMeshBuilder {
    /// Creates a builder that stretches the texture once over the terrain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many times the texture repeats across the full width.
    /// Clamped to a positive minimum.
    pub fn with_texture_repeats(mut self, repeats: f32) -> Self {
        self.texture_repeats = repeats.max(f32::EPSILON);
        self
    }

    /// Builds a `TriangleStrip` mesh with POSITION, NORMAL and UV_0.
    ///
    /// # Panics
    ///
    /// Panics if the grid is smaller than 2×2. A grid built through
    /// [`HeightGrid::new`] is always at least 3×3.
    pub fn build(&self, grid: &HeightGrid) -> Mesh {
        assert!(
            grid.dim() >= 2,
            "HeightGrid must be at least 2×2 to generate a mesh (got {0}×{0})",
            grid.dim()
        );
        let vertices = build_vertices(grid, self.texture_repeats);
        vertices_to_mesh(
            PrimitiveTopology::TriangleStrip,
            &vertices,
            build_indices(grid.dim()).into(),
        )
    }
}

/// Packs vertices into a Bevy mesh, normalizing normals on the way.
pub(crate) fn vertices_to_mesh(
    topology: PrimitiveTopology,
    vertices: &[MeshVertex],
    indices: Indices,
) -> Mesh {
    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| v.position.into()).collect();
    // Degenerate normal (no usable edges): default to +Y.
    let normals: Vec<[f32; 3]> = vertices
        .iter()
        .map(|v| v.normal.normalize_or(Vec3::Y).into())
        .collect();
    let uvs: Vec<[f32; 2]> = vertices.iter().map(|v| v.uv.into()).collect();

    let mut mesh = Mesh::new(topology, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(indices);
    mesh
}
