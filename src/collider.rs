//! Avian3D physics collider generation from a [`HeightGrid`].
//!
//! Provides [`build_heightfield_collider`] which converts the terrain grid
//! into an Avian3D `Collider::heightfield`, so physics objects in the app
//! can rest on the same ground the viewer walks on.

use avian3d::prelude::Collider;
use bevy::prelude::*;

use crate::grid::HeightGrid;

/// Builds an Avian3D `Collider::heightfield` from a [`HeightGrid`].
///
/// The collider is centered at the origin of its local space, spanning
/// `[-half_extent, half_extent]` on X and Z, the same span as the grid and
/// the land mesh. The terrain entity needs no offset transform.
///
/// # Example
///
/// ```ignore
/// use bevy_meadow::{HeightGrid, build_heightfield_collider};
///
/// let grid = HeightGrid::new(65, 16.0)?;
/// let collider = build_heightfield_collider(&grid);
/// // commands.spawn((collider, ...));
/// ```
pub fn build_heightfield_collider(grid: &HeightGrid) -> Collider {
    let dim = grid.dim();

    // Avian's heightfield is `heights[row][col]` with rows along X and
    // columns along Z; the grid is stored z-major, so transpose.
    let heights: Vec<Vec<f32>> = (0..dim)
        .map(|x| (0..dim).map(|z| grid.get(x, z)).collect())
        .collect();

    let width = grid.world_width();
    Collider::heightfield(heights, Vec3::new(width, 1.0, width))
}
