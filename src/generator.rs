//! Diamond-square (plasma fractal) terrain synthesis.
//!
//! Works in place on a [`HeightGrid`]. Starting from the four corners, each
//! level halves the step size and fills in the midpoints:
//!
//! - **square step**: the center of every `size × size` square gets the
//!   average of its diagonal corners plus noise;
//! - **diamond step**: the remaining midpoints get the average of their
//!   axis-aligned neighbors plus noise.
//!
//! Neighbors outside the grid are left out of the average rather than
//! wrapped, so edge cells average over 2 or 3 samples.

use rand::Rng;

use crate::config::TerrainSettings;
use crate::grid::HeightGrid;

const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const AXES: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Midpoint-displacement terrain generator.
///
/// A field that would give an empty or unbounded noise range (negative
/// `corner_range`, zero `smoothness`) turns that noise off instead.
#[derive(Clone, Debug, PartialEq)]
pub struct DiamondSquare {
    pub corner_range: f32,
    pub smoothness: f32,
    pub center_elevation: Option<f32>,
}

impl Default for DiamondSquare {
    fn default() -> Self {
        Self::from_settings(&TerrainSettings::default())
    }
}

impl DiamondSquare {
    pub fn from_settings(settings: &TerrainSettings) -> Self {
        Self {
            corner_range: settings.corner_range,
            smoothness: settings.smoothness,
            center_elevation: settings.center_elevation,
        }
    }

    /// Overwrites every elevation in `grid`.
    ///
    /// The result depends only on the state of `rng`, so a seeded generator
    /// gives reproducible terrain.
    pub fn generate<R: Rng + ?Sized>(&self, grid: &mut HeightGrid, rng: &mut R) {
        let dim = grid.dim();
        let last = dim - 1;
        let half_range = self.corner_range * 0.5;

        for (x, z) in [(0, 0), (last, 0), (0, last), (last, last)] {
            grid.set(x, z, noise(rng, half_range));
        }
        if let Some(center) = self.center_elevation {
            grid.set(last / 2, last / 2, center);
        }

        let mut size = last;
        let mut first = true;
        while size >= 2 {
            let reach = size / 2;
            let amplitude = reach as f32 * grid.cell_size() / self.smoothness;

            if !(first && self.center_elevation.is_some()) {
                for z in (reach..dim).step_by(size) {
                    for x in (reach..dim).step_by(size) {
                        let offset = noise(rng, amplitude);
                        displace(grid, x, z, reach, &DIAGONALS, offset);
                    }
                }
            }

            for z in (0..dim).step_by(reach) {
                let start = if (z / reach) % 2 == 0 { reach } else { 0 };
                for x in (start..dim).step_by(size) {
                    let offset = noise(rng, amplitude);
                    displace(grid, x, z, reach, &AXES, offset);
                }
            }

            size = reach;
            first = false;
        }
    }
}

/// Uniform in `[-amplitude, amplitude]`, or zero when that range is empty
/// or unbounded.
fn noise<R: Rng + ?Sized>(rng: &mut R, amplitude: f32) -> f32 {
    if amplitude > 0.0 && amplitude.is_finite() {
        rng.gen_range(-amplitude..=amplitude)
    } else {
        0.0
    }
}

/// Sets `(x, z)` to the mean of its in-bounds neighbors at distance `reach`
/// along `dirs`, plus `offset`.
fn displace(
    grid: &mut HeightGrid,
    x: usize,
    z: usize,
    reach: usize,
    dirs: &[(isize, isize); 4],
    offset: f32,
) {
    let dim = grid.dim() as isize;
    let reach = reach as isize;
    let mut sum = 0.0;
    let mut count = 0;
    for &(dx, dz) in dirs {
        let nx = x as isize + dx * reach;
        let nz = z as isize + dz * reach;
        if (0..dim).contains(&nx) && (0..dim).contains(&nz) {
            sum += grid.get(nx as usize, nz as usize);
            count += 1;
        }
    }
    if count > 0 {
        grid.set(x, z, sum / count as f32 + offset);
    }
}
