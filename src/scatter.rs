//! Rejection-sampled placement of trees.
//!
//! Each object is drawn uniformly over the world and kept only when the
//! ground under it is above water and it is at least `min_spacing` from
//! every object already placed. Checking against all earlier objects makes
//! the whole pass `O(count²)`, which is fine for a few thousand objects.
//!
//! Without an attempt cap the loop for one object never gives up. A world
//! with too little dry land for `count` objects at `min_spacing` will spin
//! forever; [`WorldConfig::validate`](crate::WorldConfig::validate) rejects
//! configs that cannot fit even on an all-land world, and
//! [`ScatterSettings::max_attempts`] turns the rest into an error.

use bevy::log::debug;
use bevy::math::{Vec2, Vec3};
use rand::Rng;

use crate::config::ScatterSettings;
use crate::error::{MeadowError, MeadowResult};
use crate::grid::HeightGrid;

/// A placed object: where its base sits and how large it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatteredObject {
    pub position: Vec3,
    pub scale: f32,
}

impl ScatteredObject {
    /// Distance to `(x, z)` in the horizontal plane.
    pub fn distance_xz(&self, x: f32, z: f32) -> f32 {
        Vec2::new(self.position.x - x, self.position.z - z).length()
    }
}

/// Places `settings.count` objects on dry ground.
///
/// Heights come from the raw grid, without clamping to the water. Each
/// object's base is lowered by `sink_depth * scale` so it sits into the
/// slope instead of floating above it. An empty or inverted scale range
/// gives every object `scale_min`.
pub fn place<R: Rng + ?Sized>(
    grid: &HeightGrid,
    water_level: f32,
    settings: &ScatterSettings,
    rng: &mut R,
) -> MeadowResult<Vec<ScatteredObject>> {
    let half = grid.half_extent();
    let mut placed: Vec<ScatteredObject> = Vec::with_capacity(settings.count);
    let mut total_attempts = 0u64;

    while placed.len() < settings.count {
        let mut attempts = 0u32;
        let (x, z, ground) = loop {
            if settings.max_attempts.is_some_and(|cap| attempts >= cap) {
                return Err(MeadowError::PlacementExhausted {
                    placed: placed.len(),
                    requested: settings.count,
                    attempts,
                });
            }
            attempts = attempts.saturating_add(1);

            let x = rng.gen_range(-half..half);
            let z = rng.gen_range(-half..half);
            let ground = grid.height_at(x, z);
            if ground <= water_level {
                continue;
            }
            if placed
                .iter()
                .any(|other| other.distance_xz(x, z) < settings.min_spacing)
            {
                continue;
            }
            break (x, z, ground);
        };
        total_attempts += attempts as u64;

        let scale = if settings.scale_max > settings.scale_min {
            rng.gen_range(settings.scale_min..=settings.scale_max)
        } else {
            settings.scale_min
        };
        placed.push(ScatteredObject {
            position: Vec3::new(x, ground - settings.sink_depth * scale, z),
            scale,
        });
    }

    debug!(
        "placed {} objects in {} samples",
        placed.len(),
        total_attempts
    );
    Ok(placed)
}
