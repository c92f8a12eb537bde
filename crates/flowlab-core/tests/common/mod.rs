use ndarray::{Array2, ArrayView2};

use flowlab_core::frame::GrayFrame;

/// Smooth two-directional texture on the 0-255 scale.
pub fn texture(x: f32, y: f32) -> f32 {
    128.0 + 50.0 * (0.2 * x).sin() + 50.0 * (0.15 * y).cos() + 25.0 * (0.11 * (x + y)).sin()
}

/// Frame whose pixel (x, y) is `f(x, y)`.
pub fn frame_from_fn(width: usize, height: usize, f: impl Fn(f32, f32) -> f32) -> GrayFrame {
    let data = Array2::from_shape_fn((height, width), |(row, col)| f(col as f32, row as f32));
    GrayFrame::new(data).expect("non-empty frame")
}

pub fn uniform_frame(width: usize, height: usize, value: f32) -> GrayFrame {
    GrayFrame::new(Array2::from_elem((height, width), value)).expect("non-empty frame")
}

/// Textured frame pair whose content moves by (dx, dy) pixels.
pub fn translated_pair(width: usize, height: usize, dx: f32, dy: f32) -> (GrayFrame, GrayFrame) {
    let prev = frame_from_fn(width, height, texture);
    let curr = frame_from_fn(width, height, |x, y| texture(x - dx, y - dy));
    (prev, curr)
}

/// Bright 10x10 block on a flat background, shifted `dx` pixels right in
/// the second frame.
pub fn moving_block_pair(width: usize, height: usize, dx: usize) -> (GrayFrame, GrayFrame) {
    let block = |ox: usize| {
        move |x: f32, y: f32| {
            let (x, y) = (x as usize, y as usize);
            if (20 + ox..30 + ox).contains(&x) && (20..30).contains(&y) {
                200.0
            } else {
                60.0
            }
        }
    };
    (
        frame_from_fn(width, height, block(0)),
        frame_from_fn(width, height, block(dx)),
    )
}

/// Population variance of an array.
pub fn variance(data: ArrayView2<f32>) -> f64 {
    let n = data.len() as f64;
    let mean = data.iter().map(|&v| v as f64).sum::<f64>() / n;
    data.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n
}
