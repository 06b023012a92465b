//! Square height grid shared by every other part of the engine.
//!
//! A [`HeightGrid`] holds `D × D` cells, `D = 2^k + 1`, laid out row-major
//! (`index = z * D + x`). Cell `(x, z)` sits at world position
//! `-half + x / (D-1) * width` on each horizontal axis, so the grid spans
//! `[-half, half]` and is centered at the origin.

use bevy::math::{Vec2, Vec3};

use crate::error::{MeadowError, MeadowResult};

/// One grid cell, and the vertex layout every mesh in this crate uses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    /// Not necessarily unit length.
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Returns `true` when `dim` is `2^k + 1` for some `k >= 1`.
pub fn is_valid_dim(dim: usize) -> bool {
    dim >= 3 && (dim - 1).is_power_of_two()
}

/// Min, max and mean elevation over all cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

#[derive(Clone, Debug)]
pub struct HeightGrid {
    dim: usize,
    half_extent: f32,
    cells: Vec<MeshVertex>,
}

impl HeightGrid {
    /// Allocates a flat grid at elevation zero.
    ///
    /// Each cell's uv is its fractional grid position in `[0, 1]`. Normals
    /// start at zero and are filled by [`compute_normals`](crate::mesher::compute_normals).
    pub fn new(dim: usize, half_extent: f32) -> MeadowResult<Self> {
        if !is_valid_dim(dim) {
            return Err(MeadowError::InvalidDimension(dim));
        }
        if !(half_extent > 0.0 && half_extent.is_finite()) {
            return Err(MeadowError::InvalidExtent(half_extent));
        }
        let last = (dim - 1) as f32;
        let width = 2.0 * half_extent;
        let mut cells = Vec::with_capacity(dim * dim);
        for z in 0..dim {
            for x in 0..dim {
                let u = x as f32 / last;
                let v = z as f32 / last;
                cells.push(MeshVertex {
                    position: Vec3::new(-half_extent + u * width, 0.0, -half_extent + v * width),
                    normal: Vec3::ZERO,
                    uv: Vec2::new(u, v),
                });
            }
        }
        Ok(Self {
            dim,
            half_extent,
            cells,
        })
    }

    /// Builds a grid and sets every elevation from `f(x, z)` in grid indices.
    pub fn from_fn(
        dim: usize,
        half_extent: f32,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> MeadowResult<Self> {
        let mut grid = Self::new(dim, half_extent)?;
        for z in 0..dim {
            for x in 0..dim {
                grid.set(x, z, f(x, z));
            }
        }
        Ok(grid)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    pub fn world_width(&self) -> f32 {
        2.0 * self.half_extent
    }

    /// World distance between neighboring cells.
    pub fn cell_size(&self) -> f32 {
        self.world_width() / (self.dim - 1) as f32
    }

    #[inline]
    pub fn index(&self, x: usize, z: usize) -> usize {
        z * self.dim + x
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.cells[self.index(x, z)].position.y
    }

    #[inline]
    pub fn set(&mut self, x: usize, z: usize, elevation: f32) {
        let i = self.index(x, z);
        self.cells[i].position.y = elevation;
    }

    pub fn cell(&self, x: usize, z: usize) -> &MeshVertex {
        &self.cells[self.index(x, z)]
    }

    pub fn cells(&self) -> &[MeshVertex] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [MeshVertex] {
        &mut self.cells
    }

    /// World coordinate of grid column/row `i`.
    pub fn world_coord(&self, i: usize) -> f32 {
        -self.half_extent + i as f32 / (self.dim - 1) as f32 * self.world_width()
    }

    /// Nearest grid column/row for a world coordinate, clamped into the grid.
    pub fn nearest_index(&self, world: f32) -> usize {
        let last = (self.dim - 1) as f32;
        let t = (world + self.half_extent) / self.world_width() * last;
        t.round().clamp(0.0, last) as usize
    }

    /// Elevation of the cell nearest to `(x, z)`. No interpolation.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.get(self.nearest_index(x), self.nearest_index(z))
    }

    /// Whether `(x, z)` lies inside the world square, edges included.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x.abs() <= self.half_extent && z.abs() <= self.half_extent
    }

    pub fn stats(&self) -> HeightStats {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0_f64;
        for cell in &self.cells {
            let y = cell.position.y;
            min = min.min(y);
            max = max.max(y);
            sum += y as f64;
        }
        HeightStats {
            min,
            max,
            mean: (sum / self.cells.len() as f64) as f32,
        }
    }

    pub fn mean_elevation(&self) -> f32 {
        self.stats().mean
    }
}
