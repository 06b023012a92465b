use bevy_meadow::scatter::place;
use bevy_meadow::{HeightGrid, MeadowError, ScatterSettings};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// West half dry at +1, east half flooded at -1.
fn half_flooded_grid() -> HeightGrid {
    HeightGrid::from_fn(33, 20.0, |x, _| if x < 16 { 1.0 } else { -1.0 }).unwrap()
}

fn settings(count: usize, min_spacing: f32) -> ScatterSettings {
    ScatterSettings {
        count,
        min_spacing,
        ..ScatterSettings::default()
    }
}

#[test]
fn places_requested_count() {
    let grid = half_flooded_grid();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let objects = place(&grid, 0.0, &settings(60, 1.5), &mut rng).unwrap();
    assert_eq!(objects.len(), 60);
}

#[test]
fn objects_respect_spacing() {
    let grid = half_flooded_grid();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let objects = place(&grid, 0.0, &settings(80, 2.0), &mut rng).unwrap();
    for (i, a) in objects.iter().enumerate() {
        for b in &objects[i + 1..] {
            let d = a.distance_xz(b.position.x, b.position.z);
            assert!(d >= 2.0, "objects {a:?} and {b:?} are {d} apart");
        }
    }
}

#[test]
fn objects_stand_above_water() {
    let grid = half_flooded_grid();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let objects = place(&grid, 0.0, &settings(100, 0.5), &mut rng).unwrap();
    for o in &objects {
        assert!(grid.height_at(o.position.x, o.position.z) > 0.0, "{o:?} is in the water");
        assert!(grid.contains(o.position.x, o.position.z));
    }
}

#[test]
fn scale_and_sink_follow_settings() {
    let grid = half_flooded_grid();
    let settings = ScatterSettings {
        count: 40,
        min_spacing: 0.5,
        scale_min: 0.8,
        scale_max: 1.1,
        sink_depth: 0.2,
        max_attempts: None,
    };
    let objects = place(&grid, 0.0, &settings, &mut ChaCha8Rng::seed_from_u64(4)).unwrap();
    for o in &objects {
        assert!((0.8..=1.1).contains(&o.scale));
        let ground = grid.height_at(o.position.x, o.position.z);
        assert!((o.position.y - (ground - 0.2 * o.scale)).abs() < 1e-6);
    }
}

#[test]
fn placement_is_deterministic() {
    let grid = half_flooded_grid();
    let run = |seed| {
        place(&grid, 0.0, &settings(50, 1.0), &mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap()
            .iter()
            .map(|o| (o.position.x.to_bits(), o.position.z.to_bits(), o.scale.to_bits()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(9), run(9));
    assert_ne!(run(9), run(10));
}

#[test]
fn attempt_cap_reports_exhaustion() {
    // Everything is under water, so no sample is ever accepted.
    let grid = HeightGrid::new(9, 10.0).unwrap();
    let settings = ScatterSettings {
        count: 3,
        max_attempts: Some(500),
        ..ScatterSettings::default()
    };
    let result = place(&grid, 1.0, &settings, &mut ChaCha8Rng::seed_from_u64(5));
    assert!(matches!(
        result,
        Err(MeadowError::PlacementExhausted { placed: 0, requested: 3, attempts: 500 })
    ));
}

#[test]
fn zero_count_places_nothing() {
    let grid = half_flooded_grid();
    let objects = place(&grid, 0.0, &settings(0, 1.0), &mut ChaCha8Rng::seed_from_u64(6)).unwrap();
    assert!(objects.is_empty());
}

#[test]
fn fixed_scale_when_range_is_empty() {
    let grid = half_flooded_grid();
    let settings = ScatterSettings {
        count: 10,
        scale_min: 0.8,
        scale_max: 0.5,
        ..ScatterSettings::default()
    };
    let objects = place(&grid, 0.0, &settings, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
    assert!(objects.iter().all(|o| o.scale == 0.8));
}
