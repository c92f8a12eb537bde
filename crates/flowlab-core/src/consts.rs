/// Minimum pixel count (h*w) to use Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default spacing between sampled output points, in pixels.
pub const DEFAULT_GRID_STEP: usize = 8;

/// Default side length of the Lucas-Kanade aggregation window.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Normal-equation determinants at or below this magnitude are treated as
/// ill-conditioned and produce a zero vector. Calibrated for intensities on
/// the 0-255 scale.
pub const DEFAULT_DET_THRESHOLD: f64 = 1e-2;

/// Default Horn-Schunck smoothness weight.
pub const DEFAULT_ALPHA: f32 = 10.0;

/// Default number of Horn-Schunck relaxation sweeps.
pub const DEFAULT_ITERATIONS: usize = 50;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;
