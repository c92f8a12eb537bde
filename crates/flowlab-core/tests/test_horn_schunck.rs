#[allow(dead_code)]
mod common;

use ndarray::s;

use flowlab_core::error::FlowError;
use flowlab_core::horn_schunck::{estimate_horn_schunck, horn_schunck_dense, HornSchunckParams};

use common::{moving_block_pair, translated_pair, uniform_frame, variance};

fn params(grid_step: usize, alpha: f32, iterations: usize) -> HornSchunckParams {
    HornSchunckParams::new(grid_step, alpha, iterations).unwrap()
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn test_identical_frames_give_zero_flow() {
    let (frame, _) = translated_pair(48, 48, 0.0, 0.0);
    let field = estimate_horn_schunck(&frame, &frame, &HornSchunckParams::default()).unwrap();

    assert!(!field.is_empty());
    for fv in &field {
        assert!(fv.u.abs() < 1e-3 && fv.v.abs() < 1e-3, "got {fv:?}");
    }
}

// ---------------------------------------------------------------------------
// Regularization
// ---------------------------------------------------------------------------

#[test]
fn test_motion_spreads_into_background() {
    let (prev, curr) = moving_block_pair(48, 48, 1);
    let dense = horn_schunck_dense(&prev, &curr, &params(8, 10.0, 100)).unwrap();

    // The block's right edge carries most of the motion.
    let edge_u = dense.u[[25, 30]];
    assert!(edge_u > 1.0, "edge u = {edge_u}");

    // To the right of the block the background picks up a small, smoothly
    // decaying flow.
    let row: Vec<f32> = (36..=46).map(|x| dense.u[[25, x]]).collect();
    for pair in row.windows(2) {
        assert!(pair[1] < pair[0], "background flow should decay: {row:?}");
        assert!((pair[0] - pair[1]).abs() < 0.01, "not smooth: {row:?}");
    }
    for &u in &row {
        assert!(u > 0.0 && u < 0.1, "background u = {u}");
    }
}

#[test]
fn test_larger_alpha_reduces_variance() {
    let (prev, curr) = moving_block_pair(48, 48, 1);

    let variances: Vec<f64> = [5.0f32, 20.0, 80.0]
        .iter()
        .map(|&alpha| {
            let dense = horn_schunck_dense(&prev, &curr, &params(8, alpha, 100)).unwrap();
            variance(dense.u.slice(s![1..47, 1..47])) + variance(dense.v.slice(s![1..47, 1..47]))
        })
        .collect();

    assert!(
        variances[0] > variances[1] && variances[1] > variances[2],
        "variance should fall as alpha grows: {variances:?}"
    );
}

#[test]
fn test_border_stays_zero() {
    let (prev, curr) = translated_pair(24, 20, 1.0, 0.0);
    let dense = horn_schunck_dense(&prev, &curr, &params(4, 10.0, 30)).unwrap();

    for col in 0..24 {
        assert_eq!(dense.u[[0, col]], 0.0);
        assert_eq!(dense.v[[19, col]], 0.0);
    }
    for row in 0..20 {
        assert_eq!(dense.u[[row, 23]], 0.0);
        assert_eq!(dense.v[[row, 0]], 0.0);
    }
}

#[test]
fn test_single_iteration_matches_closed_form() {
    // With zero initial flow the first sweep reduces to
    // u = -Ix * It / (alpha^2 + Ix^2 + Iy^2).
    let (prev, curr) = translated_pair(16, 16, 1.0, 0.0);
    let grad = flowlab_core::gradient::compute_gradients(&prev, &curr).unwrap();
    let dense = horn_schunck_dense(&prev, &curr, &params(4, 3.0, 1)).unwrap();

    for (row, col) in [(5, 5), (8, 11), (12, 3)] {
        let ix = grad.ix[[row, col]];
        let iy = grad.iy[[row, col]];
        let it = grad.it[[row, col]];
        let den = 9.0 + ix * ix + iy * iy;
        approx::assert_relative_eq!(dense.u[[row, col]], -ix * it / den, epsilon = 1e-5);
        approx::assert_relative_eq!(dense.v[[row, col]], -iy * it / den, epsilon = 1e-5);
    }
}

#[test]
fn test_tiny_alpha_stays_finite() {
    // alpha^2 underflows in f32; flat pixels must still divide by a positive
    // denominator.
    let prev = uniform_frame(12, 12, 10.0);
    let curr = uniform_frame(12, 12, 20.0);
    let p = params(4, 1e-23, 3);

    let dense = horn_schunck_dense(&prev, &curr, &p).unwrap();
    assert!(dense.u.iter().all(|x| x.is_finite()));
    assert!(dense.v.iter().all(|x| x.is_finite()));

    let field = estimate_horn_schunck(&prev, &curr, &p).unwrap();
    assert_eq!(field.len(), 4);
    for fv in &field {
        assert!(fv.u.is_finite() && fv.v.is_finite(), "got {fv:?}");
    }

    let (prev, curr) = moving_block_pair(48, 48, 1);
    let dense = horn_schunck_dense(&prev, &curr, &params(8, 1e-23, 10)).unwrap();
    assert!(dense.u.iter().chain(dense.v.iter()).all(|x| x.is_finite()));
}

// ---------------------------------------------------------------------------
// Determinism and stabilization
// ---------------------------------------------------------------------------

#[test]
fn test_repeated_calls_are_identical() {
    let (prev, curr) = moving_block_pair(48, 48, 1);
    let p = params(4, 10.0, 40);
    let a = estimate_horn_schunck(&prev, &curr, &p).unwrap();
    let b = estimate_horn_schunck(&prev, &curr, &p).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_large_frame_is_deterministic() {
    // 256x256 crosses the parallel threshold.
    let (prev, curr) = translated_pair(256, 256, 1.0, 0.0);
    let p = params(32, 10.0, 5);
    let a = horn_schunck_dense(&prev, &curr, &p).unwrap();
    let b = horn_schunck_dense(&prev, &curr, &p).unwrap();
    assert_eq!(a.u, b.u);
    assert_eq!(a.v, b.v);
}

#[test]
fn test_doubling_iterations_after_convergence() {
    let (prev, curr) = translated_pair(16, 16, 1.0, 0.0);
    let a = horn_schunck_dense(&prev, &curr, &params(4, 10.0, 400)).unwrap();
    let b = horn_schunck_dense(&prev, &curr, &params(4, 10.0, 800)).unwrap();

    for (x, y) in a.u.iter().zip(b.u.iter()) {
        assert!((x - y).abs() < 1e-3, "{x} vs {y}");
    }
    for (x, y) in a.v.iter().zip(b.v.iter()) {
        assert!((x - y).abs() < 1e-3, "{x} vs {y}");
    }
}

// ---------------------------------------------------------------------------
// Grid coverage
// ---------------------------------------------------------------------------

#[test]
fn test_grid_count_64x64_step8() {
    let frame = uniform_frame(64, 64, 10.0);
    // x, y in 8, 16, ..., 48
    let field = estimate_horn_schunck(&frame, &frame, &params(8, 10.0, 1)).unwrap();
    assert_eq!(field.len(), 36);
    assert_eq!((field.vectors[0].x, field.vectors[0].y), (8, 8));
    assert_eq!((field.vectors[35].x, field.vectors[35].y), (48, 48));
}

#[test]
fn test_grid_count_40x30_step5() {
    let frame = uniform_frame(40, 30, 10.0);
    // x in 5..=30 (6), y in 5..=20 (4)
    let field = estimate_horn_schunck(&frame, &frame, &params(5, 10.0, 1)).unwrap();
    assert_eq!(field.len(), 24);
}

#[test]
fn test_sampled_field_matches_dense() {
    let (prev, curr) = moving_block_pair(48, 48, 1);
    let p = params(6, 10.0, 20);
    let dense = horn_schunck_dense(&prev, &curr, &p).unwrap();
    let field = estimate_horn_schunck(&prev, &curr, &p).unwrap();

    assert_eq!(field, dense.sample(6));
    for fv in &field {
        assert_eq!(fv.u, dense.u[[fv.y, fv.x]]);
        assert_eq!(fv.v, dense.v[[fv.y, fv.x]]);
    }
}

#[test]
fn test_frame_smaller_than_grid_is_empty() {
    let frame = uniform_frame(8, 8, 10.0);
    let field = estimate_horn_schunck(&frame, &frame, &params(8, 10.0, 3)).unwrap();
    assert!(field.is_empty());

    let tiny = uniform_frame(2, 2, 10.0);
    let field = estimate_horn_schunck(&tiny, &tiny, &params(1, 10.0, 3)).unwrap();
    assert!(field.is_empty());
}

// ---------------------------------------------------------------------------
// Parameter validation
// ---------------------------------------------------------------------------

#[test]
fn test_rejects_invalid_parameters() {
    assert!(matches!(
        HornSchunckParams::new(0, 10.0, 10),
        Err(FlowError::InvalidParameter(_))
    ));
    assert!(HornSchunckParams::new(8, 0.0, 10).is_err());
    assert!(HornSchunckParams::new(8, -1.0, 10).is_err());
    assert!(HornSchunckParams::new(8, f32::NAN, 10).is_err());
    assert!(HornSchunckParams::new(8, 10.0, 0).is_err());
}

#[test]
fn test_defaults() {
    let p = HornSchunckParams::default();
    assert_eq!(p.grid_step, 8);
    assert_eq!(p.alpha, 10.0);
    assert_eq!(p.iterations, 50);
}
