//! Bevy resources and systems that expose a [`MeadowWorld`] to an app.
//!
//! The world itself lives in the [`MeadowTerrain`] resource. The viewer lives
//! in [`ViewerRig`], and [`sync_viewer_camera`] copies its pose onto every
//! entity tagged [`ViewerCamera`] whenever it changed. Input handling is
//! left to the app: read keys or mouse motion, then drive the rig through
//! [`ViewerRig::controller_mut`].

use bevy::prelude::*;

use crate::config::WorldConfig;
use crate::viewer::{ViewerController, ViewerState};
use crate::world::MeadowWorld;

/// The generated world, shared read-only by every system.
#[derive(Resource)]
pub struct MeadowTerrain(pub MeadowWorld);

/// Resource holding the viewer and whether its pose changed since the
/// last camera sync.
#[derive(Resource)]
pub struct ViewerRig {
    controller: ViewerController,
    dirty: bool,
}

impl ViewerRig {
    /// The camera is synced on the next [`sync_viewer_camera`] run.
    pub fn new(controller: ViewerController) -> Self {
        Self {
            controller,
            dirty: true,
        }
    }

    pub fn controller(&self) -> &ViewerController {
        &self.controller
    }

    /// Mutable access to the viewer. Marks the rig dirty.
    pub fn controller_mut(&mut self) -> &mut ViewerController {
        self.dirty = true;
        &mut self.controller
    }
}

/// Marker for cameras that follow the viewer.
#[derive(Component, Default)]
pub struct ViewerCamera;

/// Eye transform for a viewer pose.
pub fn viewer_transform(state: &ViewerState) -> Transform {
    Transform::from_translation(state.position).looking_to(state.look_dir, Vec3::Y)
}

/// Bevy system that moves every [`ViewerCamera`] to the viewer's eye when
/// [`ViewerRig`] is dirty.
///
/// Add to your `Update` schedule after your input systems.
pub fn sync_viewer_camera(
    mut rig: ResMut<ViewerRig>,
    mut cameras: Query<&mut Transform, With<ViewerCamera>>,
) {
    if !rig.dirty {
        return;
    }
    rig.dirty = false;

    let transform = viewer_transform(rig.controller.state());
    for mut camera in &mut cameras {
        *camera = transform;
    }
}

/// Generates the world when the app is built and starts the viewer at the
/// shore of a lake, regenerating up to `max_attempts` times to find one.
///
/// ```ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(MeadowPlugin::new(WorldConfig::default(), 7))
///     .run();
/// ```
pub struct MeadowPlugin {
    pub config: WorldConfig,
    pub seed: u64,
    pub shore_direction: Vec2,
    pub max_attempts: u32,
}

impl MeadowPlugin {
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            shore_direction: Vec2::NEG_Y,
            max_attempts: 16,
        }
    }
}

impl Plugin for MeadowPlugin {
    fn build(&self, app: &mut App) {
        match MeadowWorld::generate_with_shoreline(
            self.config.clone(),
            self.seed,
            self.shore_direction,
            self.max_attempts,
        ) {
            Ok((world, viewer)) => {
                app.insert_resource(MeadowTerrain(world))
                    .insert_resource(ViewerRig::new(viewer))
                    .add_systems(Update, sync_viewer_camera);
            }
            Err(err) => {
                bevy::log::error!("MeadowPlugin: world generation failed: {}", err);
            }
        }
    }
}
