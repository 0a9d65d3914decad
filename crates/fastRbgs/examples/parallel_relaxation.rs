//! fastRbgs Parallel Relaxation Examples
//!
//! This example demonstrates features specific to `fastRbgs`:
//! - Parallel half-sweeps using `rayon`
//! - Sequential fallback producing the same answer
//! - `ndarray` integration for 2D and 3D grids
//! - Smoothing one level of a multigrid hierarchy

use fastRbgs::prelude::*;
use ndarray::{Array2, Array3, ArrayD, Dimension};
use std::f64::consts::PI;
use std::time::Instant;

fn main() -> Result<(), RelaxationError> {
    println!("{}", "=".repeat(80));
    println!("fastRbgs Parallel Relaxation Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_parallel_solve()?;
    example_2_sequential_fallback()?;
    example_3_volume_smoothing()?;

    Ok(())
}

/// Source term `-2π² sin(πx) sin(πy)` with exact solution `sin(πx) sin(πy)`.
fn sine_problem(n: usize) -> (Array2<f64>, f64) {
    let h = 1.0 / (n - 1) as f64;
    let f = Array2::from_shape_fn((n, n), |(i, j)| {
        let (x, y) = (i as f64 * h, j as f64 * h);
        -2.0 * PI * PI * (PI * x).sin() * (PI * y).sin()
    });
    (f, h)
}

/// Example 1: Parallel Solve
/// Solves a 2D Poisson problem with a known solution
fn example_1_parallel_solve() -> Result<(), RelaxationError> {
    println!("Example 1: Parallel Solve");
    println!("{}", "-".repeat(80));

    let n = 65;
    let (f, h) = sine_problem(n);
    let mut u = Array2::<f64>::zeros((n, n));

    let start = Instant::now();
    let solver = Relaxation::new()
        .spacing(h) // Grid points sit on [0, 1] including both ends
        .tolerance(1e-2)
        .norm_interval(200)
        .return_history()
        .adapter(Solve) // Parallel by default
        .build()?;

    let status = solver.fit_in_place(&f, &mut u)?;
    let duration = start.elapsed();

    let max_error = u
        .indexed_iter()
        .map(|((i, j), &v)| (v - (PI * i as f64 * h).sin() * (PI * j as f64 * h).sin()).abs())
        .fold(0.0, f64::max);

    println!("Relaxed {}x{} grid in {:?}", n, n, duration);
    println!("Max error vs exact solution: {:.3e}", max_error);
    println!("{}", status);

    println!();
    Ok(())
}

/// Example 2: Sequential Fallback
/// Demonstrates that disabling parallelism does not change the result
fn example_2_sequential_fallback() -> Result<(), RelaxationError> {
    println!("Example 2: Sequential Fallback");
    println!("{}", "-".repeat(80));

    let n = 129;
    let (f, h) = sine_problem(n);

    let mut results = Vec::new();
    for parallel in [true, false] {
        let mut u = Array2::<f64>::zeros((n, n));
        let start = Instant::now();
        let status = Relaxation::new()
            .spacing(h)
            .max_iterations(500)
            .norm_interval(100)
            .parallel(parallel)
            .adapter(Solve)
            .build()?
            .fit_in_place(&f, &mut u)?;
        println!(
            "parallel = {:<5} -> {} iterations in {:?}",
            parallel,
            status.iterations,
            start.elapsed()
        );
        results.push(u);
    }

    println!("Identical solutions: {}", results[0] == results[1]);
    println!();
    Ok(())
}

/// Example 3: Volume Smoothing
/// Applies a few sweeps to damp high-frequency error on a 3D level
fn example_3_volume_smoothing() -> Result<(), RelaxationError> {
    println!("Example 3: Volume Smoothing");
    println!("{}", "-".repeat(80));

    let n = 65;
    let f = Array3::<f64>::zeros((n, n, n));
    let rough = ArrayD::from_shape_fn(vec![n, n, n], |idx| {
        if idx.slice().iter().any(|&c| c == 0 || c == n - 1) {
            0.0
        } else if idx.slice().iter().sum::<usize>() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    });

    for sweeps in [1, 2, 4] {
        let smoother = Relaxation::new()
            .sweeps(sweeps)
            .return_residual_norm()
            .adapter(Smooth)
            .build()?;
        let result = smoother.fit(&f, rough.clone())?;
        println!(
            "{} sweep(s): residual norm {:.6e}",
            sweeps,
            result.residual_norm().unwrap_or(f64::NAN)
        );
    }

    println!();
    Ok(())
}
