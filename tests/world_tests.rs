use bevy::math::Vec2;
use bevy_meadow::{MeadowError, MeadowWorld, StripIndices, WorldConfig};

fn small_config() -> WorldConfig {
    let mut config = WorldConfig::default();
    config.terrain.grid_dim = 65;
    config.scatter.count = 40;
    config
}

fn lake_config() -> WorldConfig {
    let mut config = small_config();
    config.terrain.center_elevation = Some(-20.0);
    config.water.offset = 0.0;
    config
}

#[test]
fn generation_is_bit_identical_for_a_seed() {
    let a = MeadowWorld::generate(small_config(), 77).unwrap();
    let b = MeadowWorld::generate(small_config(), 77).unwrap();

    let heights = |w: &MeadowWorld| {
        w.grid()
            .cells()
            .iter()
            .map(|c| c.position.y.to_bits())
            .collect::<Vec<_>>()
    };
    let objects = |w: &MeadowWorld| {
        w.scattered_objects()
            .iter()
            .map(|o| {
                let p = o.position;
                [p.x.to_bits(), p.y.to_bits(), p.z.to_bits(), o.scale.to_bits()]
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(heights(&a), heights(&b));
    assert_eq!(objects(&a), objects(&b));
    assert_eq!(a.water_level().to_bits(), b.water_level().to_bits());
}

#[test]
fn buffers_match_grid() {
    let world = MeadowWorld::generate(small_config(), 1).unwrap();
    let land = world.land_buffers();
    assert_eq!(land.vertices.len(), 65 * 65);
    assert_eq!(land.indices.len(), 2 * 65 * 65 - 4);
    assert!(matches!(land.indices, StripIndices::U16(_)));
    assert!(land.vertices.iter().all(|v| v.normal.y > 0.0));
}

#[test]
fn full_size_world_uses_wide_indices() {
    let mut config = WorldConfig::default();
    config.scatter.count = 10;
    let world = MeadowWorld::generate(config, 3).unwrap();
    assert_eq!(world.grid().dim(), 513);
    assert!(matches!(world.land_buffers().indices, StripIndices::U32(_)));
}

#[test]
fn clamped_height_never_below_water() {
    let world = MeadowWorld::generate(small_config(), 5).unwrap();
    let level = world.water_level();
    for i in -40..=40 {
        for j in -40..=40 {
            let (x, z) = (i as f32, j as f32);
            assert!(world.height_at(x, z, true) >= level);
            assert!(world.height_at(x, z, true) >= world.height_at(x, z, false));
        }
    }
}

#[test]
fn trees_stand_on_dry_ground() {
    let world = MeadowWorld::generate(small_config(), 6).unwrap();
    assert_eq!(world.scattered_objects().len(), 40);
    for o in world.scattered_objects() {
        assert!(world.height_at(o.position.x, o.position.z, false) > world.water_level());
    }
}

#[test]
fn water_plane_matches_level() {
    let world = MeadowWorld::generate(small_config(), 8).unwrap();
    let expected = world.grid().mean_elevation() + world.config().water.offset;
    assert!((world.water_level() - expected).abs() < 1e-5);
    assert_eq!(world.water_plane().level, world.water_level());
    assert_eq!(world.water_plane().half_extent, 40.0);
}

#[test]
fn invalid_configs_are_rejected() {
    let mut config = small_config();
    config.terrain.grid_dim = 100;
    assert!(matches!(
        MeadowWorld::generate(config, 0),
        Err(MeadowError::InvalidDimension(100))
    ));

    let mut config = small_config();
    config.scatter.count = 100_000;
    config.scatter.min_spacing = 1.0;
    assert!(matches!(
        MeadowWorld::generate(config, 0),
        Err(MeadowError::OverPacked { count: 100_000, .. })
    ));
}

#[test]
fn shoreline_start_lands_by_the_lake() {
    let direction = Vec2::new(0.0, -1.0);
    let (world, viewer) = MeadowWorld::generate_with_shoreline(lake_config(), 21, direction, 32)
        .expect("a lake should turn up within 32 worlds");
    // The origin is the flooded bowl center, so the search walked +z to
    // the first dry cell and then stepped 2 units further inland.
    let p = viewer.position();
    let level = world.water_level();
    assert_eq!(p.x, 0.0);
    assert!(world.height_at(0.0, p.z - 2.0, false) > level);
    assert!(world.height_at(0.0, p.z - 3.0, false) <= level);
    assert!((viewer.look_dir() - bevy::math::Vec3::NEG_Z).length() < 1e-5);
    assert!(viewer.can_stand_at(&world, p.x, p.z));
}

#[test]
fn shoreline_search_gives_up() {
    let mut config = small_config();
    config.water.offset = -1000.0;
    let result = MeadowWorld::generate_with_shoreline(config, 0, Vec2::X, 2);
    assert!(matches!(result, Err(MeadowError::NoShoreline { attempts: 2 })));
}
