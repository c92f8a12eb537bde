use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_ALPHA, DEFAULT_GRID_STEP, DEFAULT_ITERATIONS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{FlowError, Result};
use crate::flow::{grid_positions, FlowField, FlowVector};
use crate::frame::GrayFrame;
use crate::gradient::{compute_gradients, GradientField};

/// Parameters for dense Horn-Schunck flow.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HornSchunckParams {
    /// Spacing between reported grid samples (default: 8).
    pub grid_step: usize,
    /// Smoothness weight; larger values give smoother fields (default: 10.0).
    pub alpha: f32,
    /// Fixed number of relaxation sweeps (default: 50).
    pub iterations: usize,
}

impl Default for HornSchunckParams {
    fn default() -> Self {
        Self {
            grid_step: DEFAULT_GRID_STEP,
            alpha: DEFAULT_ALPHA,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl HornSchunckParams {
    pub fn new(grid_step: usize, alpha: f32, iterations: usize) -> Result<Self> {
        let params = Self {
            grid_step,
            alpha,
            iterations,
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
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(FlowError::InvalidParameter(format!(
                "alpha must be finite and positive, got {}",
                self.alpha
            )));
        }
        if self.iterations == 0 {
            return Err(FlowError::InvalidParameter(
                "iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Per-pixel flow, shape = (height, width). Border pixels stay zero.
#[derive(Clone, Debug)]
pub struct DenseFlow {
    pub u: Array2<f32>,
    pub v: Array2<f32>,
}

impl DenseFlow {
    /// Sample the field every `grid_step` pixels, from `grid_step` up to
    /// (excluding) `size - grid_step` on both axes.
    pub fn sample(&self, grid_step: usize) -> FlowField {
        let (h, w) = self.u.dim();
        let mut vectors = Vec::new();
        for y in grid_positions(grid_step, h.saturating_sub(grid_step), grid_step) {
            for x in grid_positions(grid_step, w.saturating_sub(grid_step), grid_step) {
                vectors.push(FlowVector {
                    x,
                    y,
                    u: self.u[[y, x]],
                    v: self.v[[y, x]],
                });
            }
        }
        FlowField::new(vectors)
    }
}

/// 4-neighbour (left, right, up, down) mean of every interior pixel.
fn neighbour_average(field: &Array2<f32>, parallel: bool) -> Array2<f32> {
    let (h, w) = field.dim();
    let mut avg = Array2::<f32>::zeros((h, w));

    let average = |(row, col): (usize, usize), out: &mut f32| {
        if row == 0 || col == 0 || row == h - 1 || col == w - 1 {
            return;
        }
        *out = (field[[row, col - 1]]
            + field[[row, col + 1]]
            + field[[row - 1, col]]
            + field[[row + 1, col]])
            / 4.0;
    };

    let zip = Zip::indexed(&mut avg);
    if parallel {
        zip.par_for_each(average);
    } else {
        zip.for_each(average);
    }
    avg
}

/// One Jacobi update. Reads only the averages of the previous iterate, so
/// writing `u` and `v` in place is safe.
fn relax(
    u: &mut Array2<f32>,
    v: &mut Array2<f32>,
    u_avg: &Array2<f32>,
    v_avg: &Array2<f32>,
    grad: &GradientField,
    alpha_sq: f64,
    parallel: bool,
) {
    let (h, w) = u.dim();

    // f64 keeps alpha^2 > 0 for any positive f32 alpha.
    let update = |(row, col): (usize, usize), u: &mut f32, v: &mut f32| {
        if row == 0 || col == 0 || row == h - 1 || col == w - 1 {
            return;
        }
        let ix = grad.ix[[row, col]] as f64;
        let iy = grad.iy[[row, col]] as f64;
        let it = grad.it[[row, col]] as f64;
        let ua = u_avg[[row, col]] as f64;
        let va = v_avg[[row, col]] as f64;

        let numerator = ix * ua + iy * va + it;
        let denominator = alpha_sq + ix * ix + iy * iy;
        *u = (ua - ix * numerator / denominator) as f32;
        *v = (va - iy * numerator / denominator) as f32;
    };

    let zip = Zip::indexed(u).and(v);
    if parallel {
        zip.par_for_each(update);
    } else {
        zip.for_each(update);
    }
}

/// Dense Horn-Schunck flow after exactly `params.iterations` sweeps.
///
/// Minimises sum (Ix*u + Iy*v + It)^2 + alpha^2 * sum(|grad u|^2 + |grad v|^2)
/// by fixed-point iteration around the 4-neighbour averages. There is no
/// convergence test.
pub fn horn_schunck_dense(
    prev: &GrayFrame,
    curr: &GrayFrame,
    params: &HornSchunckParams,
) -> Result<DenseFlow> {
    params.validate()?;
    let grad = compute_gradients(prev, curr)?;

    let (h, w) = grad.ix.dim();
    let mut u = Array2::<f32>::zeros((h, w));
    let mut v = Array2::<f32>::zeros((h, w));

    if h < 3 || w < 3 {
        return Ok(DenseFlow { u, v });
    }

    let alpha_sq = params.alpha as f64 * params.alpha as f64;
    let parallel = h * w >= PARALLEL_PIXEL_THRESHOLD;

    for _ in 0..params.iterations {
        let u_avg = neighbour_average(&u, parallel);
        let v_avg = neighbour_average(&v, parallel);
        relax(&mut u, &mut v, &u_avg, &v_avg, &grad, alpha_sq, parallel);
    }

    Ok(DenseFlow { u, v })
}

/// Horn-Schunck flow sampled every `grid_step` pixels.
pub fn estimate_horn_schunck(
    prev: &GrayFrame,
    curr: &GrayFrame,
    params: &HornSchunckParams,
) -> Result<FlowField> {
    let dense = horn_schunck_dense(prev, curr, params)?;
    let field = dense.sample(params.grid_step);

    debug!(
        width = prev.width(),
        height = prev.height(),
        alpha = params.alpha,
        iterations = params.iterations,
        vectors = field.len(),
        "Horn-Schunck flow computed"
    );

    Ok(field)
}
