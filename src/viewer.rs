//! First-person viewer that walks on the height field.
//!
//! Movement is a single synchronous step: a candidate position is either
//! valid and committed, or silently dropped. The viewer always stands
//! `eye_height` above the ground under it; there is no falling or jumping.

use bevy::math::{Vec2, Vec3};

use crate::config::ViewerSettings;
use crate::world::MeadowWorld;

/// Observer pose. Angles are in degrees, both kept in `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerState {
    pub position: Vec3,
    /// Unit vector derived from `yaw` and `pitch`.
    pub look_dir: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            look_dir: look_direction(0.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Spherical to Cartesian. Yaw 0 looks down -Z, positive pitch looks up.
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.to_radians().sin_cos();
    let (sin_pitch, cos_pitch) = pitch.to_radians().sin_cos();
    Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
}

#[derive(Clone, Debug)]
pub struct ViewerController {
    state: ViewerState,
    settings: ViewerSettings,
}

impl ViewerController {
    /// A viewer at the origin looking down -Z. Call [`stand_at`](Self::stand_at)
    /// to put it on the ground.
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            state: ViewerState::default(),
            settings,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn look_dir(&self) -> Vec3 {
        self.state.look_dir
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Puts the viewer at `(x, z)` without any checks, eye height above the
    /// ground or the water, whichever is higher.
    pub fn stand_at(&mut self, world: &MeadowWorld, x: f32, z: f32) {
        let ground = world.height_at(x, z, true);
        self.state.position = Vec3::new(x, ground + self.settings.eye_height, z);
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.set_angles(self.state.yaw + delta_yaw, self.state.pitch + delta_pitch);
    }

    fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.state.yaw = yaw.rem_euclid(360.0);
        self.state.pitch = pitch.rem_euclid(360.0);
        self.state.look_dir = look_direction(self.state.yaw, self.state.pitch);
    }

    /// Whether the viewer may stand at `(x, z)`: inside the edge margin,
    /// on dry ground and clear of every tree.
    pub fn can_stand_at(&self, world: &MeadowWorld, x: f32, z: f32) -> bool {
        let limit = world.half_extent() - self.settings.edge_margin;
        if x.abs() >= limit || z.abs() >= limit {
            return false;
        }
        if world.height_at(x, z, false) <= world.water_level() {
            return false;
        }
        world
            .scattered_objects()
            .iter()
            .all(|object| object.distance_xz(x, z) > self.settings.min_standing_distance)
    }

    /// Moves by `delta` in the x-z plane if the destination is valid.
    ///
    /// Returns whether the move happened. A rejected move leaves the viewer
    /// exactly where it was.
    pub fn move_by(&mut self, world: &MeadowWorld, delta: Vec2) -> bool {
        let x = self.state.position.x + delta.x;
        let z = self.state.position.z + delta.y;
        if !self.can_stand_at(world, x, z) {
            return false;
        }
        let ground = world.height_at(x, z, false);
        self.state.position = Vec3::new(x, ground + self.settings.eye_height, z);
        true
    }

    /// Takes `forward` steps along the facing direction and `strafe` steps
    /// to the right, each `move_speed` long. Pitch is ignored.
    pub fn walk(&mut self, world: &MeadowWorld, forward: f32, strafe: f32) -> bool {
        let (sin_yaw, cos_yaw) = self.state.yaw.to_radians().sin_cos();
        let ahead = Vec2::new(sin_yaw, -cos_yaw);
        let right = Vec2::new(cos_yaw, sin_yaw);
        self.move_by(world, (ahead * forward + right * strafe) * self.settings.move_speed)
    }

    /// Walks from the current position in unit steps until the ground
    /// changes between wet and dry.
    ///
    /// Starting on land the walk goes along `direction`; starting in water it
    /// goes the opposite way. Either way the result is on the land side,
    /// `shoreline_proximity` back from the crossing along `direction`, so a
    /// viewer there facing `direction` looks at the water. Returns `None` if
    /// the walk leaves the world first or `direction` is zero.
    ///
    /// The spot is not checked against the edge margin or trees, and when
    /// the crossing lies near the rim it can fall outside the world.
    pub fn find_shoreline(&self, world: &MeadowWorld, direction: Vec2) -> Option<Vec3> {
        let unit = direction.normalize_or_zero();
        if unit == Vec2::ZERO {
            return None;
        }
        let level = world.water_level();
        let is_wet = |p: Vec2| world.height_at(p.x, p.y, false) <= level;

        let start = Vec2::new(self.state.position.x, self.state.position.z);
        let start_wet = is_wet(start);
        let step = if start_wet { -unit } else { unit };

        let mut p = start;
        loop {
            p += step;
            if !world.contains(p.x, p.y) {
                return None;
            }
            if is_wet(p) != start_wet {
                break;
            }
        }

        let spot = p - unit * self.settings.shoreline_proximity;
        Some(Vec3::new(
            spot.x,
            world.height_at(spot.x, spot.y, true) + self.settings.eye_height,
            spot.y,
        ))
    }

    /// Runs [`find_shoreline`](Self::find_shoreline) and, if the viewer
    /// [can stand](Self::can_stand_at) at the result, moves there and turns
    /// level towards `direction`. Otherwise nothing changes.
    pub fn place_at_shoreline(&mut self, world: &MeadowWorld, direction: Vec2) -> bool {
        let Some(spot) = self.find_shoreline(world, direction) else {
            return false;
        };
        if !self.can_stand_at(world, spot.x, spot.z) {
            return false;
        }
        self.state.position = spot;
        self.set_angles(direction.x.atan2(-direction.y).to_degrees(), 0.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_zero_looks_down_negative_z() {
        let dir = look_direction(0.0, 0.0);
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn yaw_ninety_looks_down_positive_x() {
        let dir = look_direction(90.0, 0.0);
        assert!((dir - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn rotation_wraps_angles() {
        let mut viewer = ViewerController::new(ViewerSettings::default());
        viewer.rotate(-30.0, 370.0);
        assert!((viewer.state().yaw - 330.0).abs() < 1e-4);
        assert!((viewer.state().pitch - 10.0).abs() < 1e-4);
        assert!((viewer.look_dir().length() - 1.0).abs() < 1e-6);
    }
}
