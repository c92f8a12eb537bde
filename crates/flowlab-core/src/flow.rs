use serde::{Deserialize, Serialize};

/// Estimated displacement at one grid sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowVector {
    /// Column of the grid sample.
    pub x: usize,
    /// Row of the grid sample.
    pub y: usize,
    /// Horizontal displacement in pixels per frame.
    pub u: f32,
    /// Vertical displacement in pixels per frame.
    pub v: f32,
}

impl FlowVector {
    pub fn magnitude(&self) -> f32 {
        (self.u * self.u + self.v * self.v).sqrt()
    }
}

/// Summary statistics over a flow field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowStats {
    pub count: usize,
    pub mean_u: f64,
    pub mean_v: f64,
    pub mean_magnitude: f64,
    pub max_magnitude: f64,
}

/// Flow vectors in row-major grid order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowField {
    pub vectors: Vec<FlowVector>,
}

impl FlowField {
    pub fn new(vectors: Vec<FlowVector>) -> Self {
        Self { vectors }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlowVector> {
        self.vectors.iter()
    }

    pub fn into_vec(self) -> Vec<FlowVector> {
        self.vectors
    }

    /// Mean components and magnitude statistics. All zero for an empty field.
    pub fn stats(&self) -> FlowStats {
        if self.vectors.is_empty() {
            return FlowStats::default();
        }

        let mut sum_u = 0.0f64;
        let mut sum_v = 0.0f64;
        let mut sum_mag = 0.0f64;
        let mut max_mag = 0.0f64;
        for fv in &self.vectors {
            let mag = fv.magnitude() as f64;
            sum_u += fv.u as f64;
            sum_v += fv.v as f64;
            sum_mag += mag;
            max_mag = max_mag.max(mag);
        }

        let n = self.vectors.len() as f64;
        FlowStats {
            count: self.vectors.len(),
            mean_u: sum_u / n,
            mean_v: sum_v / n,
            mean_magnitude: sum_mag / n,
            max_magnitude: max_mag,
        }
    }
}

impl From<Vec<FlowVector>> for FlowField {
    fn from(vectors: Vec<FlowVector>) -> Self {
        Self { vectors }
    }
}

impl<'a> IntoIterator for &'a FlowField {
    type Item = &'a FlowVector;
    type IntoIter = std::slice::Iter<'a, FlowVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}

/// Sample coordinates `start, start + step, ...` strictly below `end`.
///
/// Empty when `end <= start`.
pub(crate) fn grid_positions(start: usize, end: usize, step: usize) -> impl Iterator<Item = usize> {
    (start..end).step_by(step)
}
