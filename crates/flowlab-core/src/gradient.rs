use ndarray::Array2;

use crate::error::Result;
use crate::frame::{ensure_same_dims, GrayFrame};

/// Spatial and temporal intensity derivatives of a frame pair.
///
/// All three arrays have the frame's shape. Only interior pixels are
/// populated; the 1-pixel border is zero.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// Horizontal derivative of the current frame.
    pub ix: Array2<f32>,
    /// Vertical derivative of the current frame.
    pub iy: Array2<f32>,
    /// Current minus previous frame.
    pub it: Array2<f32>,
}

impl GradientField {
    pub fn width(&self) -> usize {
        self.ix.ncols()
    }

    pub fn height(&self) -> usize {
        self.ix.nrows()
    }
}

/// Compute central-difference spatial gradients of `curr` and the frame
/// difference `curr - prev`.
///
///   Ix = (curr[y, x+1] - curr[y, x-1]) / 2
///   Iy = (curr[y+1, x] - curr[y-1, x]) / 2
///   It = curr[y, x] - prev[y, x]
///
/// Frames narrower or shorter than 3 pixels have no interior and produce an
/// all-zero field.
pub fn compute_gradients(prev: &GrayFrame, curr: &GrayFrame) -> Result<GradientField> {
    ensure_same_dims(prev, curr)?;

    let p = &prev.data;
    let c = &curr.data;
    let (h, w) = c.dim();
    let mut ix = Array2::<f32>::zeros((h, w));
    let mut iy = Array2::<f32>::zeros((h, w));
    let mut it = Array2::<f32>::zeros((h, w));

    if h < 3 || w < 3 {
        return Ok(GradientField { ix, iy, it });
    }

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            ix[[row, col]] = (c[[row, col + 1]] - c[[row, col - 1]]) / 2.0;
            iy[[row, col]] = (c[[row + 1, col]] - c[[row - 1, col]]) / 2.0;
            it[[row, col]] = c[[row, col]] - p[[row, col]];
        }
    }

    Ok(GradientField { ix, iy, it })
}
