// --- Display Config ---
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;
pub const FRAME_DELAY_MS: u64 = 16;

// --- Spectrum Config ---
pub const NUM_FFT_BINS: usize = 512; // Magnitude bins per synthetic frame
pub const NUM_BANDS: usize = 32; // Number of visualizer bands
pub const BAND_SPREAD_FACTOR: f32 = 7.0;

// --- Bar Preset ---
pub const RECT_WIDTH: u32 = 4;
pub const RECT_SPACING: u32 = 4;
pub const RECT_MAX_HEIGHT: u32 = 75;
pub const BAND_INTENSITY: f32 = 3.0;
pub const SMOOTHING_FACTOR: f32 = 0.3;

// --- Logging ---
pub const STATS_INTERVAL_FRAMES: u32 = 300;
