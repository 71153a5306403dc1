use super::constants::{AUDIBLE_GAIN, MUTE_TIME_CONSTANT, NOTE_TICK_SEC, UNMUTE_TIME_CONSTANT};
use super::melody::{MelodyParams, NoteScheduler, NoteSpec};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to build audio graph: {0}")]
    Graph(String),
}

/// Run state of the host's real-time audio clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Suspended,
    Closed,
}

/// Lifecycle of the ambient engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbientState {
    Uninitialized,
    Muted,
    Audible,
    Disposed,
}

/// The audio backend the engine drives.
///
/// Implemented over WebAudio in the web front-end and by a recorder in tests.
/// `build_graph` creates the context and every persistent source with the
/// master gain at zero; it is called at most once per engine.
pub trait AudioHost {
    fn build_graph(&mut self) -> Result<(), AudioError>;
    fn clock_state(&self) -> ClockState;
    fn resume_clock(&mut self);
    /// Current time of the audio clock, seconds.
    fn current_time(&self) -> f64;
    /// Exponentially approach `target` from `at` with time constant `time_constant`.
    fn ramp_master(&mut self, target: f32, at: f64, time_constant: f64);
    /// Start a one-shot note at `at`; the host schedules its own stop.
    fn play_note(&mut self, note: &NoteSpec, at: f64);
    /// Arm the recurring scheduler tick. The host calls back `AmbientEngine::on_tick`.
    fn start_ticks(&mut self, period_sec: f64);
    fn stop_ticks(&mut self);
    /// Stop every source and release the context.
    fn close(&mut self);
}

/// Model of an exponential approach (`setTargetAtTime`) of the master gain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainRamp {
    pub start_value: f32,
    pub target: f32,
    pub start_time: f64,
    pub time_constant: f64,
}

impl GainRamp {
    pub fn silent() -> Self {
        Self {
            start_value: 0.0,
            target: 0.0,
            start_time: 0.0,
            time_constant: MUTE_TIME_CONSTANT,
        }
    }

    pub fn value_at(&self, t: f64) -> f32 {
        if t < self.start_time {
            return self.start_value;
        }
        if self.time_constant <= 0.0 {
            return self.target;
        }
        let k = (-(t - self.start_time) / self.time_constant).exp() as f32;
        self.target + (self.start_value - self.target) * k
    }

    /// New ramp toward `target` starting from wherever this one is at `now`.
    pub fn retarget(&self, target: f32, now: f64, time_constant: f64) -> Self {
        Self {
            start_value: self.value_at(now),
            target,
            start_time: now,
            time_constant,
        }
    }
}

/// Tuning for the ambient engine.
#[derive(Clone, Debug)]
pub struct AmbientParams {
    pub audible_gain: f32,
    pub unmute_time_constant: f64,
    pub mute_time_constant: f64,
    pub tick_period_sec: f64,
    pub melody: MelodyParams,
}

impl Default for AmbientParams {
    fn default() -> Self {
        Self {
            audible_gain: AUDIBLE_GAIN,
            unmute_time_constant: UNMUTE_TIME_CONSTANT,
            mute_time_constant: MUTE_TIME_CONSTANT,
            tick_period_sec: NOTE_TICK_SEC,
            melody: MelodyParams::default(),
        }
    }
}

/// Drone, wind and sparse melody behind a single mute toggle.
///
/// The engine is owned by whoever shows it and must be disposed by that owner.
/// The audio graph is built lazily on the first unmute and closed exactly once
/// in `dispose`. Muting only gates the master gain; sources keep running.
pub struct AmbientEngine<H: AudioHost> {
    host: H,
    params: AmbientParams,
    state: AmbientState,
    muted: bool,
    graph_failed: bool,
    master: GainRamp,
    scheduler: NoteScheduler,
}

impl<H: AudioHost> AmbientEngine<H> {
    pub fn new(host: H, params: AmbientParams, seed: u64) -> Self {
        let scheduler = NoteScheduler::new(params.melody.clone(), seed);
        Self {
            host,
            params,
            state: AmbientState::Uninitialized,
            muted: true,
            graph_failed: false,
            master: GainRamp::silent(),
            scheduler,
        }
    }

    pub fn state(&self) -> AmbientState {
        self.state
    }

    /// UI-facing mute flag. Starts muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn master_ramp(&self) -> &GainRamp {
        &self.master
    }

    pub fn master_target(&self) -> f32 {
        self.master.target
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn toggle_mute(&mut self) {
        match self.state {
            AmbientState::Disposed => return,
            AmbientState::Uninitialized => {
                if self.muted {
                    self.initialize();
                }
            }
            _ => {}
        }
        match self.state {
            AmbientState::Muted => self.unmute(),
            AmbientState::Audible => self.mute(),
            AmbientState::Uninitialized | AmbientState::Disposed => {}
        }
        self.muted = !self.muted;
    }

    fn initialize(&mut self) {
        if self.graph_failed {
            return;
        }
        match self.host.build_graph() {
            Ok(()) => {
                self.host.start_ticks(self.params.tick_period_sec);
                self.master = GainRamp::silent();
                self.state = AmbientState::Muted;
                log::info!("[audio] ambient graph ready");
            }
            Err(e) => {
                self.graph_failed = true;
                log::warn!("[audio] {}; ambient sound disabled", e);
            }
        }
    }

    fn unmute(&mut self) {
        if self.host.clock_state() == ClockState::Suspended {
            self.host.resume_clock();
        }
        let now = self.host.current_time();
        self.master = self.master.retarget(
            self.params.audible_gain,
            now,
            self.params.unmute_time_constant,
        );
        self.host
            .ramp_master(self.params.audible_gain, now, self.params.unmute_time_constant);
        self.state = AmbientState::Audible;
    }

    fn mute(&mut self) {
        let now = self.host.current_time();
        self.master = self
            .master
            .retarget(0.0, now, self.params.mute_time_constant);
        self.host
            .ramp_master(0.0, now, self.params.mute_time_constant);
        self.state = AmbientState::Muted;
    }

    /// Recurring scheduler tick. Returns the note that was started, if any.
    pub fn on_tick(&mut self) -> Option<NoteSpec> {
        if !matches!(self.state, AmbientState::Muted | AmbientState::Audible) {
            return None;
        }
        if self.host.clock_state() != ClockState::Running {
            log::debug!("[audio] clock not running; skipping note tick");
            return None;
        }
        let note = self.scheduler.roll()?;
        let now = self.host.current_time();
        self.host.play_note(&note, now);
        Some(note)
    }

    /// Page lifecycle hook for `pagehide`. A page kept in the back/forward
    /// cache (`persisted`) comes back later, so only a real unload disposes.
    pub fn page_hidden(&mut self, persisted: bool) -> bool {
        if persisted {
            log::debug!("[audio] page cached; keeping ambient engine");
            return false;
        }
        self.dispose()
    }

    /// Tear down the graph. Returns `false` if the engine was already disposed.
    pub fn dispose(&mut self) -> bool {
        match self.state {
            AmbientState::Disposed => false,
            AmbientState::Uninitialized => {
                self.state = AmbientState::Disposed;
                true
            }
            AmbientState::Muted | AmbientState::Audible => {
                self.host.stop_ticks();
                self.host.close();
                self.state = AmbientState::Disposed;
                log::info!("[audio] ambient graph closed");
                true
            }
        }
    }
}
