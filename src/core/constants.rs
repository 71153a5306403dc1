// Shared tuning constants for the orbit animator, camera and ambient audio.

// Orbit animation
pub const SPIN_STEP_RAD: f32 = 0.01; // per-frame planet self-rotation, frame-rate coupled
pub const SUN_SPIN_RATE: f32 = 0.05; // radians per second, delta-time based

// Orbit camera
pub const CAMERA_START_EYE: [f32; 3] = [0.0, 20.0, 40.0];
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_MIN_DISTANCE: f32 = 5.0;
pub const CAMERA_MAX_DISTANCE: f32 = 100.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_ROTATE_SPEED: f32 = 0.005; // radians per pixel dragged
pub const CAMERA_ZOOM_SPEED: f32 = 0.001; // fraction of distance per wheel delta unit
pub const CAMERA_PITCH_LIMIT: f32 = 1.5; // just under PI/2 to keep `up` well defined

// Ambient audio: master bus
pub const AUDIBLE_GAIN: f32 = 0.4;
pub const UNMUTE_TIME_CONSTANT: f64 = 2.0; // seconds, setTargetAtTime tau
pub const MUTE_TIME_CONSTANT: f64 = 0.5;

// Echo line
pub const ECHO_DELAY_SEC: f64 = 0.7;
pub const ECHO_MAX_DELAY_SEC: f64 = 1.0;
pub const ECHO_FEEDBACK: f32 = 0.4;

// Drone
pub const DRONE_FREQ_HZ: f32 = 55.0; // low A
pub const DRONE_CUTOFF_HZ: f32 = 120.0;
pub const DRONE_GAIN: f32 = 0.15;

// Wind (filtered noise bed)
pub const NOISE_BUFFER_SEC: f32 = 2.0;
pub const NOISE_CENTER_HZ: f32 = 300.0;
pub const NOISE_GAIN: f32 = 0.05;
pub const WIND_LFO_HZ: f32 = 0.1;
pub const WIND_LFO_DEPTH_HZ: f32 = 100.0;

// Melodic notes
pub const NOTE_TICK_SEC: f64 = 2.0;
pub const NOTE_EMIT_PROBABILITY: f64 = 0.4;
pub const NOTE_OCTAVE_UP_PROBABILITY: f64 = 0.3;
pub const NOTE_TRIANGLE_PROBABILITY: f64 = 0.6;
pub const NOTE_MIN_DURATION_SEC: f64 = 1.0;
pub const NOTE_MAX_DURATION_SEC: f64 = 4.0; // exclusive
pub const NOTE_ATTACK_FRACTION: f64 = 0.1;
pub const NOTE_PEAK_GAIN: f32 = 0.05;
pub const NOTE_FLOOR_GAIN: f32 = 0.001; // exponential ramps cannot reach zero

// Pentatonic frequencies (approximate equal-tempered, A3..E5)
pub const PENTATONIC_HZ: [f32; 7] = [220.0, 261.63, 329.63, 392.0, 440.0, 523.25, 659.25];
