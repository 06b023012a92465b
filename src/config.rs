//! World configuration.
//!
//! Every tunable constant of the engine lives in [`WorldConfig`]. The config
//! is fixed once a [`MeadowWorld`](crate::MeadowWorld) is built; there is no
//! live reconfiguration. Configs can be written in RON:
//!
//! ```ignore
//! use bevy_meadow::WorldConfig;
//!
//! let config = WorldConfig::from_ron("(terrain: (grid_dim: 129), scatter: (count: 50))")?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MeadowError, MeadowResult};
use crate::grid::is_valid_dim;

/// Terrain synthesis and grid layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Cells per side. Must be `2^k + 1`.
    pub grid_dim: usize,
    /// Half the width and depth of the world.
    pub half_extent: f32,
    /// Corner elevations are drawn from `[-corner_range/2, corner_range/2]`.
    pub corner_range: f32,
    /// Divisor on the displacement at every level. Larger is smoother.
    pub smoothness: f32,
    /// Elevation forced onto the center cell before synthesis. `None`
    /// disables the bowl bias and lets the first square step fill it.
    pub center_elevation: Option<f32>,
    /// Times the land texture repeats across the world.
    pub texture_repeats: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            grid_dim: 513,
            half_extent: 40.0,
            corner_range: 3.0,
            smoothness: 4.0,
            center_elevation: Some(-3.0),
            texture_repeats: 25.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    /// Added to the mean terrain elevation. Negative values sink the water
    /// below the average ground.
    pub offset: f32,
    pub texture_repeats: f32,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            offset: -1.5,
            texture_repeats: 25.0,
        }
    }
}

/// Tree placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSettings {
    pub count: usize,
    /// Minimum x-z distance between any two objects.
    pub min_spacing: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// How far an object's base is pushed into the ground.
    pub sink_depth: f32,
    /// Cap on consecutive rejected samples for one object. `None` retries
    /// forever.
    pub max_attempts: Option<u32>,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            count: 400,
            min_spacing: 1.0,
            scale_min: 0.6,
            scale_max: 1.2,
            sink_depth: 0.05,
            max_attempts: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Height of the eye above the ground.
    pub eye_height: f32,
    /// World units covered by one walk step.
    pub move_speed: f32,
    /// Distance from the world edge the viewer may not enter.
    pub edge_margin: f32,
    /// The viewer cannot get closer than this to a tree.
    pub min_standing_distance: f32,
    /// How far back from the water a shoreline search leaves the viewer.
    pub shoreline_proximity: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            eye_height: 0.5,
            move_speed: 0.1,
            edge_margin: 2.0,
            min_standing_distance: 0.3,
            shoreline_proximity: 2.0,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub terrain: TerrainSettings,
    pub water: WaterSettings,
    pub scatter: ScatterSettings,
    pub viewer: ViewerSettings,
}

impl WorldConfig {
    /// Parses a config from RON. Missing fields take their defaults.
    pub fn from_ron(text: &str) -> MeadowResult<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Largest object count that can keep `min_spacing` apart inside the
    /// world, from the hexagonal packing density. `None` when spacing is
    /// zero and any count fits.
    pub fn packing_limit(&self) -> Option<usize> {
        let s = self.scatter.min_spacing;
        if s <= 0.0 {
            return None;
        }
        let side = 2.0 * self.terrain.half_extent + s;
        let per_object = 3.0_f32.sqrt() * 0.5 * s * s;
        Some((side * side / per_object).floor() as usize)
    }

    /// Checks every invariant the engine relies on.
    pub fn validate(&self) -> MeadowResult<()> {
        let t = &self.terrain;
        if !is_valid_dim(t.grid_dim) {
            return Err(MeadowError::InvalidDimension(t.grid_dim));
        }
        if !(t.half_extent > 0.0) {
            return invalid(format!("half_extent must be positive, got {}", t.half_extent));
        }
        if !(t.smoothness > 0.0) {
            return invalid(format!("smoothness must be positive, got {}", t.smoothness));
        }
        if !(t.corner_range >= 0.0) {
            return invalid(format!("corner_range must not be negative, got {}", t.corner_range));
        }
        if !(t.texture_repeats > 0.0) || !(self.water.texture_repeats > 0.0) {
            return invalid("texture repeats must be positive".to_string());
        }

        let s = &self.scatter;
        if !(s.scale_min > 0.0) || !(s.scale_max >= s.scale_min) {
            return invalid(format!(
                "scale range {}..={} must be positive and ordered",
                s.scale_min, s.scale_max
            ));
        }
        if !(s.min_spacing >= 0.0) {
            return invalid(format!("min_spacing must not be negative, got {}", s.min_spacing));
        }
        if let Some(limit) = self.packing_limit() {
            if s.count > limit {
                return Err(MeadowError::OverPacked {
                    count: s.count,
                    limit,
                });
            }
        }

        let v = &self.viewer;
        if !(v.edge_margin >= 0.0 && v.edge_margin < t.half_extent) {
            return invalid(format!(
                "edge_margin {} must lie in [0, half_extent)",
                v.edge_margin
            ));
        }
        if !(v.move_speed > 0.0) {
            return invalid(format!("move_speed must be positive, got {}", v.move_speed));
        }
        for (name, value) in [
            ("eye_height", v.eye_height),
            ("min_standing_distance", v.min_standing_distance),
            ("shoreline_proximity", v.shoreline_proximity),
        ] {
            if !(value >= 0.0) {
                return invalid(format!("{name} must not be negative, got {value}"));
            }
        }
        Ok(())
    }
}

fn invalid(reason: String) -> MeadowResult<()> {
    Err(MeadowError::InvalidConfig(reason))
}
