// --- File: constants.rs ---
// --- Global Simulation Constants ---

// Trig lookup resolution. Must stay a power of two.
pub const DEFAULT_TRIG_TABLE_SIZE: usize = 65_536;

// Defaults for a full-size run
pub const DEFAULT_WIDTH: usize = 4096;
pub const DEFAULT_HEIGHT: usize = 2048;
pub const DEFAULT_PARTICLES: usize = 1 << 23;
pub const DEFAULT_BLUR_RADIUS: usize = 1;
pub const DEFAULT_BLUR_PASSES: usize = 2;
pub const DEFAULT_ZOOM_FACTOR: f32 = 1.0;

// Circle init patterns place particles inside a disc of this fraction of min(W, H)
pub const CIRCLE_RADIUS_FRACTION: f32 = 0.25;

// --- Random species generation ranges (angles in degrees) ---
pub const RANDOM_SENSOR_ANGLE_DEG: (f32, f32) = (0.0, 120.0);
pub const RANDOM_SENSOR_DISTANCE: (f32, f32) = (0.0, 64.0);
pub const RANDOM_ROTATION_ANGLE_DEG: (f32, f32) = (0.0, 120.0);
pub const RANDOM_STEP_DISTANCE: (f32, f32) = (0.2, 2.0);
pub const RANDOM_DEPOSITION_AMOUNT: (f32, f32) = (4.0, 6.0);
pub const RANDOM_DECAY_FACTOR: (f32, f32) = (0.1, 0.5);
// Species count drawn by SimulationConfig::random, upper bound exclusive
pub const RANDOM_SPECIES_COUNT: (usize, usize) = (2, 6);

// --- Headless driver ---
pub const DEMO_WIDTH: usize = 512;
pub const DEMO_HEIGHT: usize = 256;
pub const DEMO_PARTICLES: usize = 1 << 16;
pub const DEMO_STEPS: usize = 200;
pub const DEMO_REPORT_INTERVAL: usize = 50;

// --- End of File: constants.rs ---
