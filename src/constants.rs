// Render and input tuning for the web front-end.

// Geometry resolution
pub const SPHERE_SEGMENTS: u32 = 32;
pub const SPHERE_STACKS: u32 = 32;
pub const RING_SEGMENTS: u32 = 64;

// Lighting
pub const AMBIENT_LIGHT: f32 = 0.4;
pub const SUN_LIGHT_INTENSITY: f32 = 1.6;
pub const SUN_LIGHT_RANGE: f32 = 100.0; // light fades to zero at this distance

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.5;
pub const BLOOM_STRENGTH: f32 = 0.9;

// Background
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];
pub const STAR_DENSITY: f32 = 0.0025; // fraction of sky cells holding a star

// Orbit guides are drawn white
pub const ORBIT_GUIDE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Uniform buffer slots (one per draw); must cover sun + planets + rings + guides
pub const MAX_DRAWS: usize = 32;

// Input
pub const KEY_ZOOM_DELTA: f32 = 100.0; // one key press zooms like one wheel notch
pub const PICK_MIN_RADIUS: f32 = 0.6; // small planets stay hoverable
