use super::constants::*;
use rand::prelude::*;

/// Oscillator shape of a one-shot note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Tuning for the stochastic note scheduler.
///
/// - `emit_probability`: chance that a tick produces a note
/// - `octave_up_probability`: chance the chosen pitch is doubled
/// - `triangle_probability`: chance of a triangle timbre (sine otherwise)
/// - `min_duration_sec`..`max_duration_sec`: half-open duration range
/// - `frequencies_hz`: the pitch set notes are drawn from
#[derive(Clone, Debug)]
pub struct MelodyParams {
    pub emit_probability: f64,
    pub octave_up_probability: f64,
    pub triangle_probability: f64,
    pub min_duration_sec: f64,
    pub max_duration_sec: f64,
    pub frequencies_hz: &'static [f32],
}

impl Default for MelodyParams {
    fn default() -> Self {
        Self {
            emit_probability: NOTE_EMIT_PROBABILITY,
            octave_up_probability: NOTE_OCTAVE_UP_PROBABILITY,
            triangle_probability: NOTE_TRIANGLE_PROBABILITY,
            min_duration_sec: NOTE_MIN_DURATION_SEC,
            max_duration_sec: NOTE_MAX_DURATION_SEC,
            frequencies_hz: &PENTATONIC_HZ,
        }
    }
}

impl MelodyParams {
    /// Clamp probabilities into [0, 1] and restore the default duration range
    /// when the configured one is empty or not finite.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let unit = |p: f64, fallback: f64| {
            if p.is_nan() {
                fallback
            } else {
                p.clamp(0.0, 1.0)
            }
        };
        let durations_ok = self.min_duration_sec.is_finite()
            && self.max_duration_sec.is_finite()
            && self.min_duration_sec >= 0.0
            && self.min_duration_sec < self.max_duration_sec;
        if !durations_ok {
            log::warn!(
                "[audio] note duration range {}..{} unusable; using defaults",
                self.min_duration_sec,
                self.max_duration_sec
            );
        }
        let (min_duration_sec, max_duration_sec) = if durations_ok {
            (self.min_duration_sec, self.max_duration_sec)
        } else {
            (defaults.min_duration_sec, defaults.max_duration_sec)
        };
        Self {
            emit_probability: unit(self.emit_probability, defaults.emit_probability),
            octave_up_probability: unit(
                self.octave_up_probability,
                defaults.octave_up_probability,
            ),
            triangle_probability: unit(self.triangle_probability, defaults.triangle_probability),
            min_duration_sec,
            max_duration_sec,
            frequencies_hz: self.frequencies_hz,
        }
    }
}

/// A single melodic note, decided by the scheduler and played by the audio host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteSpec {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub duration_sec: f64,
}

impl NoteSpec {
    pub fn envelope(&self) -> NoteEnvelope {
        NoteEnvelope {
            peak_gain: NOTE_PEAK_GAIN,
            floor_gain: NOTE_FLOOR_GAIN,
            attack_sec: self.duration_sec * NOTE_ATTACK_FRACTION,
            duration_sec: self.duration_sec,
        }
    }
}

/// Attack/decay gain curve of a note, relative to its start time.
///
/// Gain is 0 at the start, rises linearly to `peak_gain` at `attack_sec`, then
/// decays exponentially to `floor_gain` at `duration_sec`, where the oscillator stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteEnvelope {
    pub peak_gain: f32,
    pub floor_gain: f32,
    pub attack_sec: f64,
    pub duration_sec: f64,
}

impl NoteEnvelope {
    /// Gain at `t` seconds after note start, matching WebAudio's linear and exponential ramps.
    pub fn gain_at(&self, t: f64) -> f32 {
        if t <= 0.0 {
            0.0
        } else if t < self.attack_sec {
            self.peak_gain * (t / self.attack_sec) as f32
        } else if t < self.duration_sec {
            let span = self.duration_sec - self.attack_sec;
            let frac = ((t - self.attack_sec) / span) as f32;
            self.peak_gain * (self.floor_gain / self.peak_gain).powf(frac)
        } else {
            self.floor_gain
        }
    }
}

/// Decides once per tick whether to emit a note and what it sounds like.
pub struct NoteScheduler {
    params: MelodyParams,
    rng: StdRng,
}

impl NoteScheduler {
    pub fn new(params: MelodyParams, seed: u64) -> Self {
        Self {
            params: params.sanitized(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn params(&self) -> &MelodyParams {
        &self.params
    }

    /// Roll for this tick. `None` means the tick stays silent.
    pub fn roll(&mut self) -> Option<NoteSpec> {
        if !self.rng.gen_bool(self.params.emit_probability) {
            return None;
        }
        let base = *self.params.frequencies_hz.choose(&mut self.rng)?;
        let frequency_hz = if self.rng.gen_bool(self.params.octave_up_probability) {
            base * 2.0
        } else {
            base
        };
        let waveform = if self.rng.gen_bool(self.params.triangle_probability) {
            Waveform::Triangle
        } else {
            Waveform::Sine
        };
        let duration_sec = self
            .rng
            .gen_range(self.params.min_duration_sec..self.params.max_duration_sec);
        Some(NoteSpec {
            frequency_hz,
            waveform,
            duration_sec,
        })
    }
}

/// Fill `buf` with uniform white noise in [-1, 1).
pub fn fill_noise(buf: &mut [f32], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for s in buf.iter_mut() {
        *s = rng.gen_range(-1.0_f32..1.0);
    }
}
