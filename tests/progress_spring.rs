//! Progress bar smoothing properties

use folio::progress::ProgressIndicator;
use folio::spring::{step, Spring, SpringConfig, SpringPhase};
use folio::PageConfig;

const FRAME: f64 = 1.0 / 60.0;

fn settle(p: &mut ProgressIndicator) -> usize {
    let mut frames = 0;
    while !p.is_settled() {
        p.tick(FRAME);
        frames += 1;
        assert!(frames < 5_000, "did not settle");
    }
    frames
}

#[test]
fn rest_values_equal_boundary_inputs() {
    let mut p = ProgressIndicator::default();
    p.set_raw(0.0);
    settle(&mut p);
    assert_eq!(p.value(), 0.0);

    p.set_raw(1.0);
    settle(&mut p);
    assert_eq!(p.value(), 1.0);
}

#[test]
fn instant_jump_is_smoothed_over_many_frames() {
    let mut p = ProgressIndicator::default();
    p.set_raw(1.0);
    let first = p.tick(FRAME);
    assert!(first < 1.0, "first tick reached the target");
    assert!(first > 0.0);
    let frames = 1 + settle(&mut p);
    assert!(frames > 10, "settled in {} frames", frames);
}

#[test]
fn output_approaches_target_without_oscillating() {
    for (from, to) in [(0.0, 1.0), (1.0, 0.0), (0.25, 0.8)] {
        let mut p = ProgressIndicator::new(from, SpringConfig::default());
        p.set_raw(to);
        let toward = (to - from).signum();
        let mut prev = p.value();
        while !p.is_settled() {
            let v = p.tick(FRAME);
            assert!((v - prev) * toward >= 0.0, "moved away from target: {} -> {}", prev, v);
            assert!((v - to) * toward <= 1e-12, "overshot: {}", v);
            prev = v;
        }
        assert_eq!(p.value(), to);
    }
}

#[test]
fn new_input_reenters_tracking() {
    let mut s = Spring::new(0.0, SpringConfig::default());
    assert_eq!(s.phase(), SpringPhase::Rest);
    s.set_target(0.6);
    assert_eq!(s.phase(), SpringPhase::Tracking);
    while s.tick(FRAME) {}
    assert_eq!(s.phase(), SpringPhase::Rest);
    s.set_target(0.2);
    assert_eq!(s.phase(), SpringPhase::Tracking);
}

#[test]
fn pure_step_is_deterministic() {
    let c = SpringConfig::default();
    let a = step(0.1, 0.5, 0.9, FRAME, &c);
    let b = step(0.1, 0.5, 0.9, FRAME, &c);
    assert_eq!(a, b);
    // two half steps equal one full step: both integrate at the same substep size
    let (x, v) = step(0.1, 0.5, 0.9, FRAME / 2.0, &c);
    let half = step(x, v, 0.9, FRAME / 2.0, &c);
    assert!((half.0 - a.0).abs() < 1e-12);
}

#[test]
fn accepted_configs_from_json_converge() {
    for json in [
        r#"{"spring":{"damping":300}}"#,
        r#"{"spring":{"stiffness":1000000}}"#,
        r#"{"spring":{"stiffness":50000,"damping":2,"mass":0.5}}"#,
    ] {
        let config = PageConfig::from_json(json).expect("valid config");
        let mut p = ProgressIndicator::new(0.0, config.spring);
        p.set_raw(1.0);
        let mut frames = 0;
        while !p.is_settled() {
            let v = p.tick(FRAME);
            assert!(v.is_finite(), "{} produced {}", json, v);
            assert!((0.0..=1.0).contains(&p.scale_x()));
            frames += 1;
            assert!(frames < 20_000, "{} did not settle", json);
        }
        assert_eq!(p.value(), 1.0);
    }
}

#[test]
fn unintegrable_spring_is_a_config_error() {
    assert!(PageConfig::from_json(r#"{"spring":{"stiffness":1e12}}"#).is_err());
    assert!(PageConfig::from_json(r#"{"spring":{"damping":1e6}}"#).is_err());
}
