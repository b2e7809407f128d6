// Host-side tests for bubble spawning, motion and culling.

use liquid_core::bubbles::{BubbleField, SpawnArea};
use liquid_core::color::shade;
use liquid_core::config::{BubbleColor, BubbleConfig};
use liquid_core::constants::MAX_SPAWN_PER_STEP;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn enabled(rate: f64) -> BubbleConfig {
    BubbleConfig {
        enabled: true,
        rate,
        ..BubbleConfig::default()
    }
}

fn area(baseline: f64, height: f64) -> SpawnArea<'static> {
    SpawnArea {
        width: 300.0,
        height,
        dpr: 1.0,
        baseline,
        gradient_from: "#7a0a10",
    }
}

fn run(rate: f64, dt: f64, secs: f64) -> u64 {
    let mut rng = StdRng::seed_from_u64(77);
    let mut field = BubbleField::new();
    let cfg = enabled(rate);
    let steps = (secs / dt).round() as usize;
    for _ in 0..steps {
        field.advance(dt, &cfg, &area(50.0, 400.0), &mut rng);
    }
    field.spawned()
}

#[test]
fn spawn_count_tracks_rate_for_any_frame_rate() {
    // Property: spawned ~= rate * T within one bubble, whatever dt.
    for &dt in &[0.004, 0.016, 1.0 / 60.0, 0.033, 0.05] {
        let spawned = run(10.0, dt, 20.0) as f64;
        assert!((spawned - 200.0).abs() <= 1.0, "dt {dt} spawned {spawned}");
    }
    let fractional = run(0.5, 0.016, 30.0) as f64;
    assert!((fractional - 15.0).abs() <= 1.0, "spawned {fractional}");
}

#[test]
fn disabled_field_does_nothing() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = BubbleField::new();
    let cfg = BubbleConfig {
        rate: 100.0,
        ..BubbleConfig::default()
    };
    for _ in 0..100 {
        field.advance(0.016, &cfg, &area(50.0, 400.0), &mut rng);
    }
    assert!(field.is_empty());
    assert_eq!(field.spawned(), 0);
}

#[test]
fn negative_rate_spawns_nothing() {
    assert_eq!(run(-5.0, 0.016, 5.0), 0);
}

#[test]
fn bubbles_spawn_inside_the_liquid() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut field = BubbleField::new();
    let cfg = BubbleConfig {
        min_rise_speed: 0.0,
        max_rise_speed: 0.0,
        drift: 0.0,
        ..enabled(1000.0)
    };
    field.advance(0.05, &cfg, &area(150.0, 400.0), &mut rng);
    assert!(field.len() >= 49);
    for b in field.bubbles() {
        assert!(b.pos.x >= 0.0 && b.pos.x <= 300.0);
        assert!(b.pos.y >= 150.0 + b.radius - 1e-9, "spawned above baseline: {}", b.pos.y);
        assert!(b.pos.y <= 400.0 - b.radius + 1e-9);
        assert!(b.radius >= 1.5 && b.radius <= 4.0);
        assert!(b.vertical_velocity <= 0.0);
        assert!((0.0..=1.0).contains(&b.alpha));
    }
}

#[test]
fn bubble_rises_every_step_without_drift() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut field = BubbleField::new();
    let mut cfg = BubbleConfig {
        drift: 0.0,
        ..enabled(100.0)
    };
    let tall = area(0.0, 10_000.0);
    field.advance(0.01, &cfg, &tall, &mut rng);
    assert_eq!(field.len(), 1);
    cfg.rate = 0.0;

    let mut last_y = field.bubbles()[0].pos.y;
    let x = field.bubbles()[0].pos.x;
    for _ in 0..200 {
        field.advance(0.016, &cfg, &tall, &mut rng);
        let Some(b) = field.bubbles().first() else {
            break;
        };
        assert!(b.pos.y < last_y, "bubble did not rise: {} -> {}", last_y, b.pos.y);
        assert_eq!(b.pos.x, x);
        last_y = b.pos.y;
    }
}

#[test]
fn bubbles_are_culled_above_the_surface() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut field = BubbleField::new();
    let cfg = enabled(200.0);
    for _ in 0..20 {
        field.advance(0.016, &cfg, &area(200.0, 400.0), &mut rng);
    }
    assert!(!field.is_empty());
    // the surface drops below every bubble; all of them have now left
    let stop = BubbleConfig {
        rate: 0.0,
        ..cfg.clone()
    };
    field.advance(0.016, &stop, &area(1000.0, 400.0), &mut rng);
    assert!(field.is_empty());
}

#[test]
fn bubbles_leaving_the_top_edge_are_culled() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut field = BubbleField::new();
    let cfg = BubbleConfig {
        min_rise_speed: 500.0,
        max_rise_speed: 500.0,
        ..enabled(50.0)
    };
    // baseline far above the top: only the top edge can cull
    let high = area(-1e6, 100.0);
    for _ in 0..10 {
        field.advance(0.05, &cfg, &high, &mut rng);
    }
    let stop = BubbleConfig { rate: 0.0, ..cfg };
    for _ in 0..40 {
        field.advance(0.05, &stop, &high, &mut rng);
    }
    assert!(field.is_empty());
}

#[test]
fn auto_color_lightens_gradient_start() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut field = BubbleField::new();
    field.advance(0.2, &enabled(10.0), &area(50.0, 400.0), &mut rng);
    let expected = shade("#7a0a10", 0.4);
    assert!(field.bubbles().iter().all(|b| b.color == expected));

    let mut fixed = BubbleField::new();
    let cfg = BubbleConfig {
        color: BubbleColor::Fixed("#ffffff".to_string()),
        ..enabled(10.0)
    };
    fixed.advance(0.2, &cfg, &area(50.0, 400.0), &mut rng);
    assert!(fixed.bubbles().iter().all(|b| b.color == "#ffffff"));
}

#[test]
fn dpr_scales_size_speed_and_drift() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = BubbleField::new();
    let cfg = BubbleConfig {
        min_radius: 2.0,
        max_radius: 2.0,
        min_rise_speed: 30.0,
        max_rise_speed: 30.0,
        ..enabled(100.0)
    };
    let a = SpawnArea {
        dpr: 2.0,
        ..area(0.0, 10_000.0)
    };
    field.advance(0.01, &cfg, &a, &mut rng);
    let b = &field.bubbles()[0];
    assert_eq!(b.radius, 4.0);
    assert_eq!(b.vertical_velocity, -60.0);
    assert_eq!(b.drift, 30.0);
}

#[test]
fn clear_drops_bubbles_and_pending_spawns() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut field = BubbleField::new();
    field.advance(0.05, &enabled(100.0), &area(50.0, 400.0), &mut rng);
    assert!(!field.is_empty());
    field.clear();
    assert!(field.is_empty());
}

#[test]
fn non_finite_rate_spawns_nothing() {
    for rate in [f64::INFINITY, f64::NAN, f64::NEG_INFINITY] {
        assert_eq!(run(rate, 0.016, 1.0), 0, "rate {rate}");
    }
}

#[test]
fn huge_rate_is_capped_per_step_without_backlog() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut field = BubbleField::new();
    let cfg = enabled(1e12);
    field.advance(0.016, &cfg, &area(50.0, 400.0), &mut rng);
    assert_eq!(field.spawned(), MAX_SPAWN_PER_STEP as u64);

    // the excess was dropped, so stopping the rate stops spawning
    let stop = BubbleConfig { rate: 0.0, ..cfg };
    field.advance(0.016, &stop, &area(50.0, 400.0), &mut rng);
    assert_eq!(field.spawned(), MAX_SPAWN_PER_STEP as u64);
}
