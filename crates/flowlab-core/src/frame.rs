use ndarray::Array2;

use crate::error::{FlowError, Result};

/// A single grayscale image frame.
/// Pixel values are f32 on the 0-255 intensity scale.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayFrame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl GrayFrame {
    /// Wrap an existing array. Rejects empty arrays.
    pub fn new(data: Array2<f32>) -> Result<Self> {
        let (h, w) = data.dim();
        if h == 0 || w == 0 {
            return Err(FlowError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self { data })
    }

    /// Build a frame from row-major f32 samples.
    pub fn from_samples(width: usize, height: usize, samples: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions { width, height });
        }
        let expected = width * height;
        if samples.len() != expected {
            return Err(FlowError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        let data = Array2::from_shape_vec((height, width), samples)
            .map_err(|_| FlowError::InvalidDimensions { width, height })?;
        Ok(Self { data })
    }

    /// Build a frame from row-major 8-bit samples.
    pub fn from_u8(width: usize, height: usize, samples: &[u8]) -> Result<Self> {
        Self::from_samples(width, height, samples.iter().map(|&v| v as f32).collect())
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// (width, height)
    pub fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

/// Check that two frames can be compared pixel for pixel.
pub fn ensure_same_dims(prev: &GrayFrame, curr: &GrayFrame) -> Result<()> {
    if prev.dims() != curr.dims() {
        return Err(FlowError::DimensionMismatch {
            prev: prev.dims(),
            curr: curr.dims(),
        });
    }
    Ok(())
}
