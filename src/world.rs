//! The engine: one generated world and the queries it answers.

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::WorldConfig;
use crate::error::{MeadowError, MeadowResult};
use crate::generator::DiamondSquare;
use crate::grid::HeightGrid;
use crate::mesher::{MeshBuffers, build_buffers};
use crate::scatter::{ScatteredObject, place};
use crate::viewer::ViewerController;
use crate::water::WaterPlane;

/// A fully generated world.
///
/// Built once, in order: terrain, normals and mesh buffers, water level,
/// then trees. Nothing is mutated afterwards; to get a different world,
/// build a new one.
#[derive(Clone, Debug)]
pub struct MeadowWorld {
    config: WorldConfig,
    grid: HeightGrid,
    land: MeshBuffers,
    water: WaterPlane,
    objects: Vec<ScatteredObject>,
}

impl MeadowWorld {
    /// Generates a world from a seed. The same config and seed always give
    /// the same world.
    pub fn generate(config: WorldConfig, seed: u64) -> MeadowResult<Self> {
        Self::generate_with_rng(config, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generates a world drawing all randomness from `rng`, terrain first.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        config: WorldConfig,
        rng: &mut R,
    ) -> MeadowResult<Self> {
        config.validate()?;
        let terrain = &config.terrain;

        let mut grid = HeightGrid::new(terrain.grid_dim, terrain.half_extent)?;
        DiamondSquare::from_settings(terrain).generate(&mut grid, rng);
        debug!("synthesized {0}x{0} terrain", terrain.grid_dim);

        let mut world = Self::assemble(config, grid);
        world.objects = place(&world.grid, world.water.level, &world.config.scatter, rng)?;

        let stats = world.grid.stats();
        info!(
            "generated {0}x{0} world: elevation {1:.2}..{2:.2}, water at {3:.2}, {4} trees",
            world.grid.dim(),
            stats.min,
            stats.max,
            world.water.level,
            world.objects.len()
        );
        Ok(world)
    }

    /// Builds a world around an already synthesized grid and a given set of
    /// objects. The grid's dimension and extent replace the ones in
    /// `config`.
    pub fn from_grid(
        mut config: WorldConfig,
        grid: HeightGrid,
        objects: Vec<ScatteredObject>,
    ) -> Self {
        config.terrain.grid_dim = grid.dim();
        config.terrain.half_extent = grid.half_extent();
        let mut world = Self::assemble(config, grid);
        world.objects = objects;
        world
    }

    fn assemble(config: WorldConfig, mut grid: HeightGrid) -> Self {
        let land = build_buffers(&mut grid, config.terrain.texture_repeats);
        let water = WaterPlane::from_grid(&grid, &config.water);
        debug!(
            "built land mesh: {} vertices, {} indices",
            land.vertices.len(),
            land.indices.len()
        );
        Self {
            config,
            grid,
            land,
            water,
            objects: Vec::new(),
        }
    }

    /// Generates worlds from `seed`, `seed + 1`, ... until a viewer starting
    /// at the origin finds a shoreline along `direction` that it can stand
    /// on.
    ///
    /// Returns the world together with a viewer standing at the shore and
    /// facing the water.
    pub fn generate_with_shoreline(
        config: WorldConfig,
        seed: u64,
        direction: Vec2,
        max_attempts: u32,
    ) -> MeadowResult<(Self, ViewerController)> {
        for attempt in 0..max_attempts {
            let world = Self::generate(config.clone(), seed.wrapping_add(attempt as u64))?;
            let mut viewer = ViewerController::new(config.viewer.clone());
            viewer.stand_at(&world, 0.0, 0.0);
            if viewer.place_at_shoreline(&world, direction) {
                return Ok((world, viewer));
            }
            warn!("world {} has no shoreline from the origin, regenerating", attempt + 1);
        }
        Err(MeadowError::NoShoreline {
            attempts: max_attempts,
        })
    }

    /// Elevation of the nearest grid cell to `(x, z)`, raised to the water
    /// surface when `clamp_to_water` is set.
    pub fn height_at(&self, x: f32, z: f32, clamp_to_water: bool) -> f32 {
        let ground = self.grid.height_at(x, z);
        if clamp_to_water {
            ground.max(self.water.level)
        } else {
            ground
        }
    }

    pub fn water_level(&self) -> f32 {
        self.water.level
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        self.grid.contains(x, z)
    }

    pub fn half_extent(&self) -> f32 {
        self.grid.half_extent()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    pub fn land_buffers(&self) -> &MeshBuffers {
        &self.land
    }

    pub fn water_plane(&self) -> &WaterPlane {
        &self.water
    }

    pub fn scattered_objects(&self) -> &[ScatteredObject] {
        &self.objects
    }
}
