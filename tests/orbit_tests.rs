// Host-side tests for orbital motion and the animation clock.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod bodies {
        include!("../src/core/bodies.rs");
    }
    pub mod orbit {
        include!("../src/core/orbit.rs");
    }
}

use crate::core::bodies::*;
use crate::core::constants::SPIN_STEP_RAD;
use crate::core::orbit::*;
use glam::Vec3;

fn body(distance: f32, speed: f32) -> OrbitalBody {
    OrbitalBody {
        name: "Test",
        size: 1.0,
        distance,
        speed,
        color: "#FFFFFF",
        ring: None,
        texture_url: None,
    }
}

fn assert_close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-3, "{:?} != {:?}", a, b);
}

#[test]
fn position_stays_on_orbit_circle() {
    for b in SOLAR_SYSTEM.iter() {
        for step in 0..200 {
            let t = step as f64 * 0.37;
            let p = update_position(b, t);
            assert_eq!(p.y, 0.0);
            assert!(
                (p.length() - b.distance).abs() < 1e-3 * b.distance,
                "{} at t={} has radius {}",
                b.name,
                t,
                p.length()
            );
        }
    }
}

#[test]
fn position_is_idempotent() {
    let b = body(12.0, 0.6);
    for t in [0.0, 0.5, 3.0, 100.0] {
        assert_eq!(update_position(&b, t), update_position(&b, t));
    }
}

#[test]
fn zero_speed_is_stationary() {
    let b = body(7.0, 0.0);
    for t in [0.0, 1.0, 1000.0] {
        assert_eq!(update_position(&b, t), Vec3::new(0.0, 0.0, 7.0));
    }
}

#[test]
fn half_orbit_reaches_far_side() {
    let b = body(12.0, 0.6);
    assert_close(update_position(&b, 0.0), Vec3::new(0.0, 0.0, 12.0));
    let half = std::f64::consts::PI / 0.6;
    assert_close(update_position(&b, half), Vec3::new(0.0, 0.0, -12.0));
}

#[test]
fn spin_step_ignores_elapsed_time() {
    let b = body(5.0, 1.0);
    let prev = BodyPose::default();
    let a = next_pose(&b, &prev, 0.0);
    let c = next_pose(&b, &prev, 50.0);
    assert_eq!(a.spin, SPIN_STEP_RAD);
    assert_eq!(c.spin, SPIN_STEP_RAD);
    assert_eq!(advance_spin_rotation(&b), SPIN_STEP_RAD);
}

#[test]
fn animator_steps_every_body_in_place() {
    let mut anim = OrbitAnimator::new(&SOLAR_SYSTEM);
    assert_eq!(anim.poses().len(), SOLAR_SYSTEM.len());
    for (b, p) in anim.bodies().iter().zip(anim.poses()) {
        assert_close(p.position, Vec3::new(0.0, 0.0, b.distance));
        assert_eq!(p.spin, 0.0);
    }
    for frame in 1..=10 {
        anim.step(frame as f64 * 0.016, 0.016);
    }
    for (b, p) in anim.bodies().iter().zip(anim.poses()) {
        assert_close(p.position, update_position(b, 0.16));
        assert!((p.spin - 10.0 * SPIN_STEP_RAD).abs() < 1e-5);
    }
    assert!(anim.sun_spin() > 0.0);
}

#[test]
fn sun_spin_ignores_bad_deltas() {
    let mut anim = OrbitAnimator::new(&SOLAR_SYSTEM);
    anim.step(0.0, f32::NAN);
    anim.step(0.0, -1.0);
    assert_eq!(anim.sun_spin(), 0.0);
}

#[test]
fn clock_accumulates_and_pauses() {
    let mut clock = AnimationClock::default();
    assert_eq!(clock.advance(0.5), 0.5);
    assert_eq!(clock.advance(0.25), 0.75);
    assert!(clock.toggle_pause());
    assert!(clock.is_paused());
    assert_eq!(clock.advance(10.0), 0.75);
    assert!(!clock.toggle_pause());
    assert_eq!(clock.advance(0.25), 1.0);
}

#[test]
fn clock_never_goes_backwards() {
    let mut clock = AnimationClock::default();
    clock.advance(1.0);
    for dt in [-0.5, f32::NAN, f32::INFINITY, 0.0] {
        assert_eq!(clock.advance(dt), 1.0);
    }
    assert_eq!(clock.elapsed(), 1.0);
}

#[test]
fn clock_keeps_frame_rate_after_days_of_uptime() {
    for days in [2.0_f32, 6.0, 30.0] {
        let mut clock = AnimationClock::default();
        let start = clock.advance(days * 86_400.0);
        for _ in 0..600 {
            clock.advance(1.0 / 60.0);
        }
        let moved = clock.elapsed() - start;
        assert!((moved - 10.0).abs() < 1e-3, "{} days: moved {}", days, moved);
    }
}

#[test]
fn orbits_keep_moving_after_days_of_uptime() {
    let b = body(12.0, 0.6);
    let t = 6.0 * 86_400.0;
    let a = update_position(&b, t);
    let c = update_position(&b, t + 1.0 / 60.0);
    assert!((a.length() - 12.0).abs() < 1e-3);
    let expected = 12.0 * 0.6 / 60.0;
    assert!(((a - c).length() - expected).abs() < 1e-3, "step {}", (a - c).length());
}

#[test]
fn ring_and_guide_radii() {
    let saturn = SOLAR_SYSTEM
        .iter()
        .find(|b| b.name == "Saturn")
        .expect("saturn in table");
    let (inner, outer) = saturn.ring_radii().expect("saturn has a ring");
    assert!((inner - (saturn.size + 0.5)).abs() < 1e-6);
    assert!((outer - (saturn.size + 2.0)).abs() < 1e-6);
    let (gi, go) = saturn.orbit_guide_radii();
    assert!((gi - (saturn.distance - 0.05)).abs() < 1e-5);
    assert!((go - (saturn.distance + 0.05)).abs() < 1e-5);
    assert!(body(3.0, 1.0).ring_radii().is_none());
}

#[test]
fn hex_colors_parse_to_linear() {
    assert_eq!(Rgb::from_hex("#FFFFFF"), Ok(Rgb::WHITE));
    assert_eq!(Rgb::from_hex("#000000"), Ok(Rgb([0.0; 3])));
    let sun = Rgb::from_hex(SUN.color).expect("sun color parses");
    assert!(sun.0[0] > sun.0[1] && sun.0[1] > sun.0[2]);
    for bad in ["FFFFFF", "#FFF", "#GGGGGG", ""] {
        assert!(matches!(Rgb::from_hex(bad), Err(ColorError::Malformed(_))));
    }
    assert_eq!(Rgb::from_hex_or_white("nope"), Rgb::WHITE);
}

#[test]
fn body_table_is_well_formed() {
    assert_eq!(SOLAR_SYSTEM.len(), 8);
    for b in SOLAR_SYSTEM.iter() {
        assert!(b.size > 0.0 && b.distance > 0.0 && b.speed >= 0.0, "{}", b.name);
        assert!(Rgb::from_hex(b.color).is_ok(), "{}", b.name);
        if let Some(ring) = b.ring {
            assert!(Rgb::from_hex(ring.color).is_ok(), "{} ring", b.name);
        }
    }
    assert!(SUN.radius > 0.0);
}
