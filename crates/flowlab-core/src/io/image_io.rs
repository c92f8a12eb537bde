use std::path::Path;

use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::Result;
use crate::frame::GrayFrame;

/// Load an image file into a grayscale frame on the 0-255 scale.
///
/// Color images are reduced with BT.601 luminance weights, then rounded to
/// whole 8-bit levels.
pub fn load_gray_frame(path: &Path) -> Result<GrayFrame> {
    let img = image::open(path)?;
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let [r, g, b] = rgb.get_pixel(col as u32, row as u32).0;
            let luma = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
            data[[row, col]] = luma.round().clamp(0.0, 255.0);
        }
    }

    GrayFrame::new(data)
}

/// Load every path in order.
pub fn load_gray_frames(paths: &[impl AsRef<Path>]) -> Result<Vec<GrayFrame>> {
    paths.iter().map(|p| load_gray_frame(p.as_ref())).collect()
}
