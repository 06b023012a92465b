//! Flat water surface at a level derived from the terrain.

use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::config::WaterSettings;
use crate::grid::{HeightGrid, MeshVertex};
use crate::mesher::vertices_to_mesh;

/// Mean elevation over every cell plus `offset`.
pub fn compute_level(grid: &HeightGrid, offset: f32) -> f32 {
    grid.mean_elevation() + offset
}

/// The water plane: one quad spanning the whole world at `level`.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterPlane {
    pub level: f32,
    pub half_extent: f32,
    pub texture_repeats: f32,
}

impl WaterPlane {
    /// Derives the plane from a synthesized grid.
    pub fn from_grid(grid: &HeightGrid, settings: &WaterSettings) -> Self {
        Self {
            level: compute_level(grid, settings.offset),
            half_extent: grid.half_extent(),
            texture_repeats: settings.texture_repeats,
        }
    }

    /// Four corner vertices and the strip `[0, 1, 2, 3]` that covers them.
    ///
    /// Winding is counter-clockwise seen from above.
    pub fn quad(&self) -> ([MeshVertex; 4], [u16; 4]) {
        let h = self.half_extent;
        let r = self.texture_repeats;
        let corner = |x: f32, z: f32, u: f32, v: f32| MeshVertex {
            position: Vec3::new(x, self.level, z),
            normal: Vec3::Y,
            uv: Vec2::new(u, v),
        };
        (
            [
                corner(-h, -h, 0.0, 0.0),
                corner(-h, h, 0.0, r),
                corner(h, -h, r, 0.0),
                corner(h, h, r, r),
            ],
            [0, 1, 2, 3],
        )
    }

    pub fn to_mesh(&self) -> Mesh {
        let (vertices, indices) = self.quad();
        vertices_to_mesh(
            PrimitiveTopology::TriangleStrip,
            &vertices,
            Indices::U16(indices.to_vec()),
        )
    }
}
