// Host-side tests for the ambient engine state machine.
// A recording host stands in for WebAudio.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod melody {
        include!("../src/core/melody.rs");
    }
    pub mod ambient {
        include!("../src/core/ambient.rs");
    }
}

use crate::core::ambient::*;
use crate::core::melody::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Build,
    Resume,
    Ramp { target: f32, at: f64, tau: f64 },
    Note(NoteSpec),
    StartTicks(f64),
    StopTicks,
    Close,
}

struct RecordingHost {
    calls: Vec<Call>,
    clock: ClockState,
    now: f64,
    fail_build: bool,
}

impl RecordingHost {
    fn new(clock: ClockState) -> Self {
        Self {
            calls: Vec::new(),
            clock,
            now: 0.0,
            fail_build: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_build: true,
            ..Self::new(ClockState::Running)
        }
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn ramps(&self) -> Vec<(f32, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Ramp { target, tau, .. } => Some((*target, *tau)),
                _ => None,
            })
            .collect()
    }
}

impl AudioHost for RecordingHost {
    fn build_graph(&mut self) -> Result<(), AudioError> {
        self.calls.push(Call::Build);
        if self.fail_build {
            Err(AudioError::Unavailable("no audio device".into()))
        } else {
            Ok(())
        }
    }

    fn clock_state(&self) -> ClockState {
        self.clock
    }

    fn resume_clock(&mut self) {
        self.calls.push(Call::Resume);
        self.clock = ClockState::Running;
    }

    fn current_time(&self) -> f64 {
        self.now
    }

    fn ramp_master(&mut self, target: f32, at: f64, time_constant: f64) {
        self.calls.push(Call::Ramp {
            target,
            at,
            tau: time_constant,
        });
    }

    fn play_note(&mut self, note: &NoteSpec, _at: f64) {
        self.calls.push(Call::Note(*note));
    }

    fn start_ticks(&mut self, period_sec: f64) {
        self.calls.push(Call::StartTicks(period_sec));
    }

    fn stop_ticks(&mut self) {
        self.calls.push(Call::StopTicks);
    }

    fn close(&mut self) {
        self.calls.push(Call::Close);
    }
}

fn engine(host: RecordingHost) -> AmbientEngine<RecordingHost> {
    AmbientEngine::new(host, AmbientParams::default(), 7)
}

#[test]
fn starts_uninitialized_and_muted() {
    let e = engine(RecordingHost::new(ClockState::Running));
    assert_eq!(e.state(), AmbientState::Uninitialized);
    assert!(e.is_muted());
    assert!(e.host().calls.is_empty());
}

#[test]
fn toggle_sequence_builds_once_and_ramps() {
    let mut e = engine(RecordingHost::new(ClockState::Running));

    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Audible);
    assert!(!e.is_muted());
    assert_eq!(e.master_target(), 0.4);

    e.host_mut().now = 5.0;
    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Muted);
    assert!(e.is_muted());
    assert_eq!(e.master_target(), 0.0);

    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Audible);

    let host = e.host();
    assert_eq!(host.count(|c| *c == Call::Build), 1);
    assert_eq!(host.count(|c| matches!(c, Call::StartTicks(_))), 1);
    assert_eq!(host.ramps(), vec![(0.4, 2.0), (0.0, 0.5), (0.4, 2.0)]);
    assert!(host.calls.contains(&Call::StartTicks(2.0)));
}

#[test]
fn never_returns_to_uninitialized() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    for _ in 0..9 {
        e.toggle_mute();
        assert_ne!(e.state(), AmbientState::Uninitialized);
    }
    assert_eq!(e.state(), AmbientState::Audible);
}

#[test]
fn resumes_suspended_clock_before_first_ramp() {
    let mut e = engine(RecordingHost::new(ClockState::Suspended));
    e.toggle_mute();
    let calls = &e.host().calls;
    let resume = calls.iter().position(|c| *c == Call::Resume);
    let ramp = calls.iter().position(|c| matches!(c, Call::Ramp { .. }));
    assert!(resume.is_some());
    assert!(resume < ramp);
    assert_eq!(e.host().clock_state(), ClockState::Running);
}

#[test]
fn running_clock_is_not_resumed() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    e.toggle_mute();
    assert_eq!(e.host().count(|c| *c == Call::Resume), 0);
}

#[test]
fn build_failure_stays_uninitialized_without_retry() {
    let mut e = engine(RecordingHost::failing());
    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Uninitialized);
    e.toggle_mute();
    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Uninitialized);
    assert_eq!(e.host().count(|c| *c == Call::Build), 1);
    assert!(e.host().ramps().is_empty());
    assert!(e.on_tick().is_none());
}

#[test]
fn dispose_is_idempotent() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    e.toggle_mute();
    assert!(e.dispose());
    assert!(!e.dispose());
    assert!(!e.dispose());
    assert_eq!(e.state(), AmbientState::Disposed);
    assert_eq!(e.host().count(|c| *c == Call::Close), 1);
    assert_eq!(e.host().count(|c| *c == Call::StopTicks), 1);
}

#[test]
fn dispose_before_init_touches_nothing() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    assert!(e.dispose());
    assert!(e.host().calls.is_empty());
    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Disposed);
    assert!(e.host().calls.is_empty());
}

#[test]
fn toggle_after_dispose_is_ignored() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    e.toggle_mute();
    e.dispose();
    let before = e.host().calls.len();
    let muted = e.is_muted();
    e.toggle_mute();
    assert_eq!(e.host().calls.len(), before);
    assert_eq!(e.is_muted(), muted);
    assert!(e.on_tick().is_none());
}

#[test]
fn cached_page_hide_keeps_engine_alive() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Audible);
    assert!(!e.page_hidden(true));
    assert_eq!(e.state(), AmbientState::Audible);
    assert_eq!(e.host().count(|c| *c == Call::Close), 0);

    // Restored from the back/forward cache: the button still works.
    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Muted);
    assert!(e.is_muted());

    assert!(e.page_hidden(false));
    assert_eq!(e.state(), AmbientState::Disposed);
    assert!(!e.page_hidden(false));
    assert_eq!(e.host().count(|c| *c == Call::Close), 1);
}

#[test]
fn ticks_before_init_are_ignored() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    for _ in 0..20 {
        assert!(e.on_tick().is_none());
    }
    assert!(e.host().calls.is_empty());
}

#[test]
fn ticks_skip_while_clock_suspended() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    e.toggle_mute();
    e.host_mut().clock = ClockState::Suspended;
    for _ in 0..50 {
        assert!(e.on_tick().is_none());
    }
    assert_eq!(e.host().count(|c| matches!(c, Call::Note(_))), 0);
}

#[test]
fn ticks_play_notes_while_muted_or_audible() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    e.toggle_mute();
    e.toggle_mute();
    assert_eq!(e.state(), AmbientState::Muted);
    let played = (0..200).filter_map(|_| e.on_tick()).count();
    assert!(played > 0);
    assert_eq!(e.host().count(|c| matches!(c, Call::Note(_))), played);
}

#[test]
fn gain_ramp_follows_exponential_approach() {
    let r = GainRamp::silent().retarget(0.4, 1.0, 2.0);
    assert_eq!(r.value_at(0.5), 0.0);
    assert_eq!(r.value_at(1.0), 0.0);
    let one_tau = r.value_at(3.0);
    let expected = 0.4 * (1.0 - (-1.0_f32).exp());
    assert!((one_tau - expected).abs() < 1e-5);
    assert!((r.value_at(1000.0) - 0.4).abs() < 1e-5);
}

#[test]
fn gain_ramp_retarget_starts_from_current_value() {
    let up = GainRamp::silent().retarget(0.4, 0.0, 2.0);
    let mid = up.value_at(1.0);
    let down = up.retarget(0.0, 1.0, 0.5);
    assert!((down.start_value - mid).abs() < 1e-6);
    assert!((down.value_at(1.0) - mid).abs() < 1e-6);
    assert!(down.value_at(1.5) < mid);
    assert!(down.value_at(10.0) < 1e-3);
}

#[test]
fn engine_ramp_model_tracks_host_clock() {
    let mut e = engine(RecordingHost::new(ClockState::Running));
    e.host_mut().now = 10.0;
    e.toggle_mute();
    let ramp = *e.master_ramp();
    assert_eq!(ramp.start_time, 10.0);
    assert_eq!(ramp.time_constant, 2.0);
    assert_eq!(ramp.target, 0.4);
}
