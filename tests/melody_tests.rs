// Host-side tests for the stochastic note scheduler and note envelope.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod melody {
        include!("../src/core/melody.rs");
    }
}

use crate::core::constants::PENTATONIC_HZ;
use crate::core::melody::*;

fn is_scale_pitch(f: f32) -> bool {
    PENTATONIC_HZ
        .iter()
        .any(|&base| (f - base).abs() < 1e-3 || (f - base * 2.0).abs() < 1e-3)
}

#[test]
fn emission_rate_is_about_forty_percent() {
    let mut s = NoteScheduler::new(MelodyParams::default(), 42);
    let ticks = 10_000;
    let emitted = (0..ticks).filter_map(|_| s.roll()).count();
    let rate = emitted as f64 / ticks as f64;
    assert!((rate - 0.4).abs() < 0.03, "rate {}", rate);
}

#[test]
fn notes_stay_in_range() {
    let mut s = NoteScheduler::new(MelodyParams::default(), 3);
    let mut octave_up = 0;
    let mut triangles = 0;
    let mut total = 0;
    for _ in 0..5_000 {
        let Some(n) = s.roll() else { continue };
        total += 1;
        assert!(
            n.duration_sec >= 1.0 && n.duration_sec < 4.0,
            "duration {}",
            n.duration_sec
        );
        assert!(is_scale_pitch(n.frequency_hz), "freq {}", n.frequency_hz);
        if !PENTATONIC_HZ.contains(&n.frequency_hz) {
            octave_up += 1;
        }
        if n.waveform == Waveform::Triangle {
            triangles += 1;
        }
    }
    assert!(total > 1_500);
    let up = octave_up as f64 / total as f64;
    let tri = triangles as f64 / total as f64;
    // 220 doubled is 440, which is also in the base set
    assert!(up > 0.15 && up < 0.35, "octave-up share {}", up);
    assert!((tri - 0.6).abs() < 0.05, "triangle share {}", tri);
}

#[test]
fn same_seed_same_melody() {
    let mut a = NoteScheduler::new(MelodyParams::default(), 99);
    let mut b = NoteScheduler::new(MelodyParams::default(), 99);
    for _ in 0..100 {
        assert_eq!(a.roll(), b.roll());
    }
}

#[test]
fn never_emits_with_zero_probability() {
    let params = MelodyParams {
        emit_probability: 0.0,
        ..MelodyParams::default()
    };
    let mut s = NoteScheduler::new(params, 1);
    assert!((0..500).all(|_| s.roll().is_none()));
    assert_eq!(s.params().emit_probability, 0.0);
}

#[test]
fn out_of_range_params_are_clamped() {
    let params = MelodyParams {
        emit_probability: 1.5,
        octave_up_probability: -0.2,
        triangle_probability: f64::NAN,
        min_duration_sec: 3.0,
        max_duration_sec: 3.0,
        ..MelodyParams::default()
    };
    let mut s = NoteScheduler::new(params, 5);
    let p = s.params().clone();
    assert_eq!(p.emit_probability, 1.0);
    assert_eq!(p.octave_up_probability, 0.0);
    assert_eq!(p.triangle_probability, MelodyParams::default().triangle_probability);
    assert_eq!(p.min_duration_sec, MelodyParams::default().min_duration_sec);
    assert_eq!(p.max_duration_sec, MelodyParams::default().max_duration_sec);
    for _ in 0..200 {
        let note = s.roll().expect("emit probability is one");
        assert!(is_scale_pitch(note.frequency_hz));
        assert!(note.duration_sec >= p.min_duration_sec && note.duration_sec < p.max_duration_sec);
    }
}

#[test]
fn envelope_rises_then_decays_to_floor() {
    let note = NoteSpec {
        frequency_hz: 440.0,
        waveform: Waveform::Sine,
        duration_sec: 2.0,
    };
    let env = note.envelope();
    assert!((env.attack_sec - 0.2).abs() < 1e-9);
    assert_eq!(env.gain_at(0.0), 0.0);
    assert!((env.gain_at(0.1) - 0.025).abs() < 1e-6);
    assert!((env.gain_at(0.2) - 0.05).abs() < 1e-6);
    assert!(env.gain_at(1.0) < 0.05 && env.gain_at(1.0) > 0.001);
    assert!(env.gain_at(1.5) < env.gain_at(1.0));
    assert!((env.gain_at(2.0) - 0.001).abs() < 1e-6);
    assert!((env.gain_at(5.0) - 0.001).abs() < 1e-6);
}

#[test]
fn noise_is_bounded_and_deterministic() {
    let mut a = vec![0.0_f32; 4096];
    let mut b = vec![0.0_f32; 4096];
    fill_noise(&mut a, 5);
    fill_noise(&mut b, 5);
    assert_eq!(a, b);
    assert!(a.iter().all(|s| (-1.0..1.0).contains(s)));
    let mean = a.iter().sum::<f32>() / a.len() as f32;
    assert!(mean.abs() < 0.1);
}
