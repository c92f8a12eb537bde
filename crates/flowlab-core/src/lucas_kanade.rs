use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    DEFAULT_DET_THRESHOLD, DEFAULT_GRID_STEP, DEFAULT_WINDOW_SIZE, PARALLEL_PIXEL_THRESHOLD,
};
use crate::error::{FlowError, Result};
use crate::flow::{grid_positions, FlowField, FlowVector};
use crate::frame::GrayFrame;
use crate::gradient::{compute_gradients, GradientField};

/// Parameters for sparse Lucas-Kanade flow.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LucasKanadeParams {
    /// Spacing between grid samples (default: 8).
    pub grid_step: usize,
    /// Odd side length of the square aggregation window (default: 5).
    pub window_size: usize,
    /// Determinants with |det| at or below this give a zero vector (default: 1e-2).
    pub det_threshold: f64,
}

impl Default for LucasKanadeParams {
    fn default() -> Self {
        Self {
            grid_step: DEFAULT_GRID_STEP,
            window_size: DEFAULT_WINDOW_SIZE,
            det_threshold: DEFAULT_DET_THRESHOLD,
        }
    }
}

impl LucasKanadeParams {
    /// Build validated parameters with the default determinant threshold.
    pub fn new(grid_step: usize, window_size: usize) -> Result<Self> {
        let params = Self {
            grid_step,
            window_size,
            ..Default::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_step == 0 {
            return Err(FlowError::InvalidParameter(
                "grid_step must be at least 1".into(),
            ));
        }
        if self.window_size == 0 || self.window_size % 2 == 0 {
            return Err(FlowError::InvalidParameter(format!(
                "window_size must be a positive odd number, got {}",
                self.window_size
            )));
        }
        if !self.det_threshold.is_finite() || self.det_threshold < 0.0 {
            return Err(FlowError::InvalidParameter(format!(
                "det_threshold must be finite and non-negative, got {}",
                self.det_threshold
            )));
        }
        Ok(())
    }

    pub fn half_window(&self) -> usize {
        self.window_size / 2
    }
}

/// Solve the 2x2 normal equations over the window centred at (x, y).
///
/// Minimises sum (Ix*u + Iy*v + It)^2 over the window:
///
///   [Sxx Sxy] [u]     [Sxt]
///   [Sxy Syy] [v] = - [Syt]
///
/// Returns (0, 0) when |det| <= `det_threshold` (flat or single-direction
/// texture), and `None` when the window does not fit inside the field.
pub fn solve_window(
    grad: &GradientField,
    x: usize,
    y: usize,
    half_win: usize,
    det_threshold: f64,
) -> Option<(f32, f32)> {
    let top = y.checked_sub(half_win)?;
    let left = x.checked_sub(half_win)?;
    if y + half_win >= grad.height() || x + half_win >= grad.width() {
        return None;
    }

    let mut sxx = 0.0f64;
    let mut syy = 0.0f64;
    let mut sxy = 0.0f64;
    let mut sxt = 0.0f64;
    let mut syt = 0.0f64;

    for row in top..=y + half_win {
        for col in left..=x + half_win {
            let ix = grad.ix[[row, col]] as f64;
            let iy = grad.iy[[row, col]] as f64;
            let it = grad.it[[row, col]] as f64;
            sxx += ix * ix;
            syy += iy * iy;
            sxy += ix * iy;
            sxt += ix * it;
            syt += iy * it;
        }
    }

    let det = sxx * syy - sxy * sxy;
    if det.abs() <= det_threshold {
        return Some((0.0, 0.0));
    }

    // Cramer's rule
    let u = (-syy * sxt + sxy * syt) / det;
    let v = (sxy * sxt - sxx * syt) / det;
    Some((u as f32, v as f32))
}

/// Sparse Lucas-Kanade flow sampled every `grid_step` pixels.
///
/// Grid points run from `half_win` up to (excluding) `size - half_win` on
/// both axes, so every window stays inside the frame. Frames too small for
/// a single window give an empty field.
pub fn estimate_lucas_kanade(
    prev: &GrayFrame,
    curr: &GrayFrame,
    params: &LucasKanadeParams,
) -> Result<FlowField> {
    params.validate()?;
    let grad = compute_gradients(prev, curr)?;

    let (h, w) = grad.ix.dim();
    let half_win = params.half_window();
    let ys: Vec<usize> = grid_positions(half_win, h.saturating_sub(half_win), params.grid_step)
        .collect();
    let xs: Vec<usize> = grid_positions(half_win, w.saturating_sub(half_win), params.grid_step)
        .collect();

    let grad = &grad;
    let xs = &xs;
    let solve_row = |y: usize| {
        xs.iter().map(move |&x| {
            // Grid bounds keep every window inside the field.
            let (u, v) =
                solve_window(grad, x, y, half_win, params.det_threshold).unwrap_or((0.0, 0.0));
            FlowVector { x, y, u, v }
        })
    };

    let vectors: Vec<FlowVector> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        ys.par_iter().flat_map_iter(|&y| solve_row(y)).collect()
    } else {
        ys.iter().flat_map(|&y| solve_row(y)).collect()
    };

    debug!(
        width = w,
        height = h,
        window = params.window_size,
        vectors = vectors.len(),
        "Lucas-Kanade flow computed"
    );

    Ok(FlowField::new(vectors))
}
