// Host-side tests for the level spring and its derived quantities.

use liquid_core::dynamics::{
    baseline_y, displayed_percent, fill_fraction, velocity_norm, LevelDynamics,
};
use liquid_core::engine::clamp_dt;
use liquid_core::state::Transition;

fn settle(d: &LevelDynamics, mut level: f64, mut vel: f64, target: f64, secs: f64, dt: f64) -> (f64, f64) {
    let steps = (secs / dt).round() as usize;
    for _ in 0..steps {
        d.step(&mut level, &mut vel, target, dt);
    }
    (level, vel)
}

#[test]
fn converges_from_any_start() {
    // Property: with the default k/c the spring settles for any start.
    let d = LevelDynamics::new(12.0, 9.0);
    for &(start, v0) in &[(0.0, 0.0), (500.0, 0.0), (-50.0, 30.0), (100.0, -400.0), (40.0, 1000.0)] {
        let (level, vel) = settle(&d, start, v0, 100.0, 10.0, 0.016);
        assert!((level - 100.0).abs() < 0.05, "start {start}/{v0} ended at {level}");
        assert!(vel.abs() < 0.05, "start {start}/{v0} left velocity {vel}");
    }
}

#[test]
fn clamped_steps_never_blow_up() {
    let d = LevelDynamics::new(12.0, 9.0);
    let dt = clamp_dt(3.0);
    assert_eq!(dt, 0.05);
    let (mut level, mut vel) = (0.0, 0.0);
    for _ in 0..10_000 {
        d.step(&mut level, &mut vel, 100.0, dt);
        assert!(level.abs() <= 200.0, "level ran away: {level}");
        assert!(vel.abs() <= 12.0 * 100.0, "velocity ran away: {vel}");
    }
}

#[test]
fn underdamped_spring_overshoots() {
    let d = LevelDynamics::new(12.0, 2.0);
    assert!(d.damping_ratio() < 1.0);
    let (mut level, mut vel) = (0.0, 0.0);
    let mut peak: f64 = 0.0;
    for _ in 0..400 {
        d.step(&mut level, &mut vel, 100.0, 0.016);
        peak = peak.max(level);
    }
    assert!(peak > 100.0, "expected overshoot, peak {peak}");
}

#[test]
fn default_spring_is_overdamped() {
    let d = LevelDynamics::new(12.0, 9.0);
    assert!(d.damping_ratio() > 1.0);
}

#[test]
fn acceleration_matches_formula() {
    let d = LevelDynamics::new(12.0, 9.0);
    assert_eq!(d.acceleration(40.0, 2.0, 100.0), 12.0 * 60.0 - 9.0 * 2.0);
}

#[test]
fn clamp_dt_rejects_negative_and_non_finite() {
    assert_eq!(clamp_dt(-0.2), 0.0);
    assert_eq!(clamp_dt(f64::NAN), 0.0);
    assert_eq!(clamp_dt(f64::INFINITY), 0.0);
    assert_eq!(clamp_dt(0.016), 0.016);
}

#[test]
fn percent_uses_normalization_and_is_not_clamped() {
    assert_eq!(displayed_percent(60.0, 100.0, 1.2), 50);
    assert_eq!(displayed_percent(120.0, 100.0, 1.2), 100);
    assert_eq!(displayed_percent(132.0, 100.0, 1.2), 110);
}

#[test]
fn percent_with_zero_goal_is_zero() {
    for level in [0.0, 5.0, 1e9, -3.0, f64::NAN] {
        assert_eq!(displayed_percent(level, 0.0, 1.2), 0);
        assert_eq!(fill_fraction(level, 0.0, 1.2), 0.0);
    }
}

#[test]
fn negative_level_reads_as_empty() {
    assert_eq!(displayed_percent(-20.0, 100.0, 1.2), 0);
    assert!((baseline_y(100.0, -20.0, 100.0, 1.2) - 96.0).abs() < 1e-9);
}

#[test]
fn baseline_runs_from_bottom_to_headroom() {
    let h = 500.0;
    assert!((baseline_y(h, 0.0, 100.0, 1.2) - h * 0.96).abs() < 1e-9);
    assert!((baseline_y(h, 120.0, 100.0, 1.2) - h * 0.06).abs() < 1e-9);
    let mid = baseline_y(h, 60.0, 100.0, 1.2);
    assert!(mid < h * 0.96 && mid > h * 0.06);
}

#[test]
fn velocity_norm_is_relative_to_goal_and_capped() {
    assert_eq!(velocity_norm(-50.0, 100.0), 0.5);
    assert_eq!(velocity_norm(500.0, 100.0), 1.0);
    // zero goal falls back to a divisor of one
    assert_eq!(velocity_norm(0.25, 0.0), 0.25);
}

#[test]
fn transition_interpolates_then_finishes() {
    let mut t = Transition {
        from: 10.0,
        to: 20.0,
        duration: 1.0,
        elapsed: 0.0,
    };
    let (v, done) = t.advance(0.25);
    assert!((v - 12.5).abs() < 1e-12);
    assert!(!done);
    let (v, done) = t.advance(1.0);
    assert_eq!(v, 20.0);
    assert!(done);
}
