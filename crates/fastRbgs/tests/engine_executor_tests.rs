#![cfg(all(feature = "dev", feature = "cpu"))]
//! Tests for the parallel relaxation passes.
//!
//! These tests verify that the `rayon` passes are drop-in replacements for
//! the sequential kernels:
//! - Half-sweeps are bit-identical for every rank and colour
//! - The residual norm and Laplacian match exactly
//! - Small and degenerate grids fall back without effect
//!
//! ## Test Organization
//!
//! 1. **Sweep Equivalence** - Parallel vs sequential half-sweeps
//! 2. **Residual Equivalence** - Parallel vs sequential residual
//! 3. **Fallback** - Small and degenerate grids

use fastRbgs::internals::engine::executor::{
    apply_poisson_parallel, residual_pass_parallel, sweep_pass_parallel, PARALLEL_THRESHOLD,
};
use rbgs::internals::algorithms::checkerboard::Color;
use rbgs::internals::algorithms::sweep::sweep_pass;
use rbgs::internals::math::poisson::{apply_poisson, residual_norm};

// ============================================================================
// Helper Functions
// ============================================================================

/// Deterministic pseudo-random values in [-1, 1).
fn noise(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
        })
        .collect()
}

fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Shapes large enough to take the parallel path.
const LARGE_SHAPES: [&[usize]; 4] = [&[10_001], &[70, 65], &[64, 64], &[17, 19, 23]];

// ============================================================================
// Sweep Equivalence Tests
// ============================================================================

/// Test that one parallel half-sweep equals the sequential one bit for bit.
#[test]
fn test_sweep_matches_sequential() {
    for shape in LARGE_SHAPES {
        let len = element_count(shape);
        assert!(len >= PARALLEL_THRESHOLD);
        let f = noise(len, 7);
        let u0 = noise(len, 11);

        for color in Color::SWEEP_ORDER {
            let mut seq = u0.clone();
            let mut par = u0.clone();
            sweep_pass(color, &f, &mut seq, shape, 0.01);
            sweep_pass_parallel(color, &f, &mut par, shape, 0.01);
            assert_eq!(seq, par, "shape {shape:?}, color {color}");
        }
    }
}

/// Test that many alternating half-sweeps stay identical.
#[test]
fn test_repeated_sweeps_match_sequential() {
    let shape = [33, 34, 35];
    let len = element_count(&shape);
    let f = noise(len, 3);
    let mut seq = noise(len, 5);
    let mut par = seq.clone();

    for _ in 0..10 {
        for color in Color::SWEEP_ORDER {
            sweep_pass(color, &f, &mut seq, &shape, 1e-3);
            sweep_pass_parallel(color, &f, &mut par, &shape, 1e-3);
        }
    }
    assert_eq!(seq, par);
}

/// Test that only points of the swept colour change.
#[test]
fn test_sweep_touches_one_colour() {
    let shape = [80, 81];
    let len = element_count(&shape);
    let f = noise(len, 1);
    let u0 = noise(len, 2);
    let mut u = u0.clone();

    sweep_pass_parallel(Color::Red, &f, &mut u, &shape, 0.5);

    for i in 0..shape[0] {
        for j in 0..shape[1] {
            let k = i * shape[1] + j;
            let interior = i > 0 && j > 0 && i + 1 < shape[0] && j + 1 < shape[1];
            if !interior || Color::of(&[i, j]) != Color::Red {
                assert_eq!(u[k], u0[k], "point ({i}, {j}) changed");
            }
        }
    }
}

// ============================================================================
// Residual Equivalence Tests
// ============================================================================

/// Test that the parallel Laplacian equals the sequential operator.
#[test]
fn test_apply_poisson_matches_sequential() {
    for shape in LARGE_SHAPES {
        let u = noise(element_count(shape), 13);
        assert_eq!(
            apply_poisson_parallel(&u, shape, 0.125),
            apply_poisson(&u, shape, 0.125),
            "shape {shape:?}"
        );
    }
}

/// Test that the parallel residual norm is bit-identical.
#[test]
fn test_residual_matches_sequential() {
    for shape in LARGE_SHAPES {
        let len = element_count(shape);
        let f = noise(len, 17);
        let u = noise(len, 19);
        let h = 1.0 / shape[0] as f64;
        assert_eq!(
            residual_pass_parallel(&f, &u, shape, h),
            residual_norm(&f, &u, shape, h)
        );
    }
}

// ============================================================================
// Fallback Tests
// ============================================================================

/// Test that small grids take the sequential path with the same result.
#[test]
fn test_small_grid_fallback() {
    let shape = [9, 9];
    let f = noise(81, 23);
    let mut seq = noise(81, 29);
    let mut par = seq.clone();

    sweep_pass(Color::Black, &f, &mut seq, &shape, 0.1);
    sweep_pass_parallel(Color::Black, &f, &mut par, &shape, 0.1);

    assert_eq!(seq, par);
    assert_eq!(
        residual_pass_parallel(&f, &par, &shape, 0.1),
        residual_norm(&f, &par, &shape, 0.1)
    );
}

/// Test that grids without interior points are left unchanged.
#[test]
fn test_degenerate_grid_is_noop() {
    let shape = [5000, 2];
    let f = noise(10_000, 31);
    let u0 = noise(10_000, 37);
    let mut u = u0.clone();

    sweep_pass_parallel(Color::Red, &f, &mut u, &shape, 1.0);
    assert_eq!(u, u0);
    assert!(apply_poisson_parallel(&u, &shape, 1.0)
        .iter()
        .all(|&v| v == 0.0));
}

/// Test that single precision sweeps also match.
#[test]
fn test_f32_sweep_matches_sequential() {
    let shape = [100, 50];
    let f: Vec<f32> = noise(5000, 41).into_iter().map(|v| v as f32).collect();
    let mut seq: Vec<f32> = noise(5000, 43).into_iter().map(|v| v as f32).collect();
    let mut par = seq.clone();

    sweep_pass(Color::Red, &f, &mut seq, &shape, 0.02);
    sweep_pass_parallel(Color::Red, &f, &mut par, &shape, 0.02);
    assert_eq!(seq, par);
}
