//! Procedural mountain-meadow worlds for Bevy.
//!
//! Generates a bounded terrain with diamond-square synthesis, floods it to a
//! level derived from its mean height, scatters trees on the dry land, and
//! lets a first-person viewer walk the result.
//!
//! # Features
//!
//! - **Terrain**: [`DiamondSquare`] fills a [`HeightGrid`] of `2^k + 1`
//!   cells per side, optionally biased into a bowl.
//! - **Meshes**: [`MeshBuffers`] holds the land as one stitched triangle
//!   strip with 16- or 32-bit indices; [`TerrainMeshBuilder`] and
//!   [`WaterPlane::to_mesh`] produce Bevy [`Mesh`](bevy::prelude::Mesh)es.
//! - **Trees**: [`scatter::place`] rejection-samples spaced positions above
//!   water; [`ObjectModel`] positions externally loaded model chunks on them.
//! - **Viewer**: [`ViewerController`] rotates, walks with edge, water and
//!   tree collision, and searches for a shoreline.
//! - **App glue**: [`MeadowPlugin`] generates the world and keeps any
//!   [`ViewerCamera`] in sync with the viewer.
//!
//! # Feature Flags
//!
//! - `physics`: Enables [`collider`] and [`collider::build_heightfield_collider`]
//!   for Avian3D integration.
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_meadow::{MeadowWorld, TerrainMeshBuilder, WorldConfig};
//!
//! fn setup(
//!     mut commands: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//! ) {
//!     let world = MeadowWorld::generate(WorldConfig::default(), 7).unwrap();
//!
//!     let land = TerrainMeshBuilder::new()
//!         .with_texture_repeats(world.config().terrain.texture_repeats)
//!         .build(world.grid());
//!
//!     commands.spawn((
//!         Mesh3d(meshes.add(land)),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//!     commands.spawn((
//!         Mesh3d(meshes.add(world.water_plane().to_mesh())),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//! }
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod mesher;
pub mod model;
pub mod scatter;
pub mod viewer;
pub mod water;
pub mod world;

#[cfg(feature = "physics")]
pub mod collider;

pub use camera::{
    MeadowPlugin, MeadowTerrain, ViewerCamera, ViewerRig, sync_viewer_camera, viewer_transform,
};
pub use config::{ScatterSettings, TerrainSettings, ViewerSettings, WaterSettings, WorldConfig};
pub use error::{MeadowError, MeadowResult};
pub use generator::DiamondSquare;
pub use grid::{HeightGrid, HeightStats, MeshVertex};
pub use mesher::{
    MeshBuffers, StripIndices, TerrainMeshBuilder, build_indices, build_vertices, compute_normals,
};
pub use model::{ModelChunk, ObjectModel};
pub use scatter::ScatteredObject;
pub use viewer::{ViewerController, ViewerState, look_direction};
pub use water::{WaterPlane, compute_level};
pub use world::MeadowWorld;

#[cfg(feature = "physics")]
pub use collider::build_heightfield_collider;
