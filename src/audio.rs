use crate::core::constants::*;
use crate::core::{
    fill_noise, AmbientEngine, AmbientParams, AudioError, AudioHost, ClockState, NoteSpec,
    Waveform,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedAmbient = Rc<RefCell<AmbientEngine<WebAudioHost>>>;

/// Build the ambient engine over WebAudio. The interval ticker holds only a
/// weak reference back to the engine, so dropping the last `Rc` ends it.
pub fn new_ambient(seed: u64) -> SharedAmbient {
    Rc::new_cyclic(|weak| {
        RefCell::new(AmbientEngine::new(
            WebAudioHost::new(weak.clone(), seed),
            AmbientParams::default(),
            seed,
        ))
    })
}

// Persistent nodes kept alive for the lifetime of the context
struct Graph {
    ctx: web::AudioContext,
    master_gain: web::GainNode,
    echo_in: web::DelayNode,
    drone: web::OscillatorNode,
    wind_lfo: web::OscillatorNode,
    noise: web::AudioBufferSourceNode,
}

struct Ticker {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

pub struct WebAudioHost {
    graph: Option<Graph>,
    ticker: Option<Ticker>,
    engine: Weak<RefCell<AmbientEngine<WebAudioHost>>>,
    noise_seed: u64,
}

impl WebAudioHost {
    fn new(engine: Weak<RefCell<AmbientEngine<WebAudioHost>>>, noise_seed: u64) -> Self {
        Self {
            graph: None,
            ticker: None,
            engine,
            noise_seed,
        }
    }
}

fn js_err(label: &str, e: wasm_bindgen::JsValue) -> AudioError {
    AudioError::Graph(format!("{}: {:?}", label, e))
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, AudioError> {
    let g = web::GainNode::new(ctx).map_err(|e| js_err(label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn create_filter(
    ctx: &web::AudioContext,
    kind: web::BiquadFilterType,
    frequency_hz: f32,
    label: &str,
) -> Result<web::BiquadFilterNode, AudioError> {
    let f = web::BiquadFilterNode::new(ctx).map_err(|e| js_err(label, e))?;
    f.set_type(kind);
    f.frequency().set_value(frequency_hz);
    Ok(f)
}

fn create_oscillator(
    ctx: &web::AudioContext,
    kind: web::OscillatorType,
    frequency_hz: f32,
    label: &str,
) -> Result<web::OscillatorNode, AudioError> {
    let o = web::OscillatorNode::new(ctx).map_err(|e| js_err(label, e))?;
    o.set_type(kind);
    o.frequency().set_value(frequency_hz);
    Ok(o)
}

fn build_graph(ctx: web::AudioContext, noise_seed: u64) -> Result<Graph, AudioError> {
    let now = ctx.current_time();

    // Master gain starts silent; the engine ramps it on unmute
    let master_gain = create_gain(&ctx, 0.0, "master")?;
    _ = master_gain.gain().set_value_at_time(0.0, now);
    _ = master_gain.connect_with_audio_node(&ctx.destination());

    // Echo line: delay <-> feedback, both heard through master
    let echo_in = ctx
        .create_delay_with_max_delay_time(ECHO_MAX_DELAY_SEC)
        .map_err(|e| js_err("delay", e))?;
    echo_in.delay_time().set_value(ECHO_DELAY_SEC as f32);
    let feedback = create_gain(&ctx, ECHO_FEEDBACK, "echo feedback")?;
    _ = echo_in.connect_with_audio_node(&feedback);
    _ = feedback.connect_with_audio_node(&echo_in);
    _ = echo_in.connect_with_audio_node(&master_gain);
    _ = feedback.connect_with_audio_node(&master_gain);

    // Drone: sawtooth -> lowpass -> gain
    let drone = create_oscillator(&ctx, web::OscillatorType::Sawtooth, DRONE_FREQ_HZ, "drone")?;
    let drone_filter = create_filter(&ctx, web::BiquadFilterType::Lowpass, DRONE_CUTOFF_HZ, "drone filter")?;
    let drone_gain = create_gain(&ctx, DRONE_GAIN, "drone gain")?;
    _ = drone.connect_with_audio_node(&drone_filter);
    _ = drone_filter.connect_with_audio_node(&drone_gain);
    _ = drone_gain.connect_with_audio_node(&master_gain);

    // Wind: looping white noise through a band-pass swept by a slow LFO
    let sr = ctx.sample_rate();
    let len = (sr * NOISE_BUFFER_SEC) as u32;
    let buffer = ctx
        .create_buffer(1, len.max(1), sr)
        .map_err(|e| js_err("noise buffer", e))?;
    let mut samples = vec![0.0_f32; len.max(1) as usize];
    fill_noise(&mut samples, noise_seed);
    _ = buffer.copy_to_channel(&mut samples, 0);
    let noise = web::AudioBufferSourceNode::new(&ctx).map_err(|e| js_err("noise source", e))?;
    noise.set_buffer(Some(&buffer));
    noise.set_loop(true);
    let wind_filter = create_filter(&ctx, web::BiquadFilterType::Bandpass, NOISE_CENTER_HZ, "wind filter")?;
    let wind_gain = create_gain(&ctx, NOISE_GAIN, "wind gain")?;
    let wind_lfo = create_oscillator(&ctx, web::OscillatorType::Sine, WIND_LFO_HZ, "wind lfo")?;
    let lfo_depth = create_gain(&ctx, WIND_LFO_DEPTH_HZ, "wind lfo depth")?;
    _ = wind_lfo.connect_with_audio_node(&lfo_depth);
    _ = lfo_depth.connect_with_audio_param(&wind_filter.frequency());
    _ = noise.connect_with_audio_node(&wind_filter);
    _ = wind_filter.connect_with_audio_node(&wind_gain);
    _ = wind_gain.connect_with_audio_node(&master_gain);

    drone.start().map_err(|e| js_err("drone start", e))?;
    wind_lfo.start().map_err(|e| js_err("lfo start", e))?;
    noise.start().map_err(|e| js_err("noise start", e))?;

    Ok(Graph {
        ctx,
        master_gain,
        echo_in,
        drone,
        wind_lfo,
        noise,
    })
}

impl AudioHost for WebAudioHost {
    fn build_graph(&mut self) -> Result<(), AudioError> {
        if self.graph.is_some() {
            return Ok(());
        }
        let ctx = web::AudioContext::new()
            .map_err(|e| AudioError::Unavailable(format!("{:?}", e)))?;
        match build_graph(ctx.clone(), self.noise_seed) {
            Ok(graph) => {
                self.graph = Some(graph);
                Ok(())
            }
            Err(e) => {
                _ = ctx.close();
                Err(e)
            }
        }
    }

    fn clock_state(&self) -> ClockState {
        match self.graph.as_ref().map(|g| g.ctx.state()) {
            Some(web::AudioContextState::Running) => ClockState::Running,
            Some(web::AudioContextState::Suspended) => ClockState::Suspended,
            _ => ClockState::Closed,
        }
    }

    fn resume_clock(&mut self) {
        if let Some(g) = &self.graph {
            if let Err(e) = g.ctx.resume() {
                log::warn!("[audio] resume failed: {:?}", e);
            }
        }
    }

    fn current_time(&self) -> f64 {
        self.graph.as_ref().map_or(0.0, |g| g.ctx.current_time())
    }

    fn ramp_master(&mut self, target: f32, at: f64, time_constant: f64) {
        if let Some(g) = &self.graph {
            _ = g.master_gain.gain().set_target_at_time(target, at, time_constant);
        }
    }

    fn play_note(&mut self, note: &NoteSpec, at: f64) {
        let Some(g) = &self.graph else {
            return;
        };
        let kind = match note.waveform {
            Waveform::Sine => web::OscillatorType::Sine,
            Waveform::Triangle => web::OscillatorType::Triangle,
        };
        let (osc, note_gain) = match (
            create_oscillator(&g.ctx, kind, note.frequency_hz, "note"),
            create_gain(&g.ctx, 0.0, "note gain"),
        ) {
            (Ok(o), Ok(n)) => (o, n),
            (Err(e), _) | (_, Err(e)) => {
                log::error!("[audio] {}", e);
                return;
            }
        };
        let env = note.envelope();
        let gain = note_gain.gain();
        _ = gain.set_value_at_time(0.0, at);
        _ = gain.linear_ramp_to_value_at_time(env.peak_gain, at + env.attack_sec);
        _ = gain.exponential_ramp_to_value_at_time(env.floor_gain, at + env.duration_sec);
        _ = osc.connect_with_audio_node(&note_gain);
        _ = note_gain.connect_with_audio_node(&g.echo_in);
        _ = note_gain.connect_with_audio_node(&g.master_gain);
        _ = osc.start_with_when(at);
        _ = osc.stop_with_when(at + env.duration_sec);
    }

    fn start_ticks(&mut self, period_sec: f64) {
        if self.ticker.is_some() {
            return;
        }
        let Some(window) = web::window() else {
            log::warn!("[audio] no window; melody ticker disabled");
            return;
        };
        let engine = self.engine.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(engine) = engine.upgrade() {
                if let Ok(mut e) = engine.try_borrow_mut() {
                    e.on_tick();
                }
            }
        }) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            (period_sec * 1000.0) as i32,
        ) {
            Ok(handle) => {
                self.ticker = Some(Ticker {
                    handle,
                    _closure: closure,
                })
            }
            Err(e) => log::error!("[audio] setInterval failed: {:?}", e),
        }
    }

    fn stop_ticks(&mut self) {
        if let Some(t) = self.ticker.take() {
            if let Some(window) = web::window() {
                window.clear_interval_with_handle(t.handle);
            }
        }
    }

    fn close(&mut self) {
        if let Some(g) = self.graph.take() {
            _ = g.drone.stop();
            _ = g.wind_lfo.stop();
            _ = g.noise.stop();
            _ = g.master_gain.disconnect();
            if let Err(e) = g.ctx.close() {
                log::warn!("[audio] close failed: {:?}", e);
            }
        }
    }
}

impl Drop for WebAudioHost {
    fn drop(&mut self) {
        // The interval must not outlive its closure
        self.stop_ticks();
    }
}
