#![cfg(feature = "dev")]
//! Tests for the high-level builder API and result output.
//!
//! These tests verify the user-facing surface:
//! - Builder defaults and adapter conversion
//! - Duplicate parameter detection
//! - Result accessors and Display output
//! - Precision genericity (f32)
//!
//! ## Test Organization
//!
//! 1. **Builder** - Defaults, conversion, duplicates
//! 2. **Output** - Accessors, Display
//! 3. **Precision** - f32 runs

use rbgs::internals::api::{RelaxationAdapter, RelaxationBuilder};
use rbgs::internals::engine::output::RelaxationStatus;
use rbgs::prelude::*;

// ============================================================================
// Builder Tests
// ============================================================================

/// Test that the solve adapter receives the documented defaults.
#[test]
fn test_solve_defaults() {
    let builder = <Solve as RelaxationAdapter<f64>>::convert(RelaxationBuilder::new());

    assert_eq!(builder.max_iterations, 10_000_000);
    assert_eq!(builder.tolerance, 1e-8);
    assert_eq!(builder.norm_interval, 1000);
    assert_eq!(builder.spacing, None);
    assert!(!builder.return_history);
    assert!(!builder.require_convergence);
    assert!(builder.deferred_error.is_none());
}

/// Test that configured values reach the adapter builder.
#[test]
fn test_builder_conversion() {
    let builder = Relaxation::<f64>::new()
        .spacing(0.5)
        .max_iterations(42)
        .tolerance(1e-4)
        .norm_interval(7)
        .return_history()
        .adapter(Solve);

    assert_eq!(builder.spacing, Some(0.5));
    assert_eq!(builder.max_iterations, 42);
    assert_eq!(builder.tolerance, 1e-4);
    assert_eq!(builder.norm_interval, 7);
    assert!(builder.return_history);

    let smooth = Relaxation::<f64>::new().sweeps(5).adapter(Smooth);
    assert_eq!(smooth.sweeps, 5);
    assert!(!smooth.return_residual_norm);
}

/// Test that setting a parameter twice is reported on build.
#[test]
fn test_duplicate_parameter() {
    let res = Relaxation::<f64>::new()
        .tolerance(1e-6)
        .tolerance(1e-7)
        .adapter(Solve)
        .build();
    assert_eq!(
        res.err(),
        Some(RelaxationError::DuplicateParameter {
            parameter: "tolerance"
        })
    );

    let res = Relaxation::<f64>::new()
        .sweeps(1)
        .sweeps(2)
        .adapter(Smooth)
        .build();
    assert!(matches!(
        res,
        Err(RelaxationError::DuplicateParameter { parameter: "sweeps" })
    ));
}

/// Test the parallel hint defaults to off in the sequential crate.
#[test]
fn test_parallel_hint() {
    let solver = Relaxation::<f64>::new().adapter(Solve).build().unwrap();
    assert!(!solver.is_parallel());

    let solver = Relaxation::<f64>::new()
        .parallel(true)
        .adapter(Solve)
        .build()
        .unwrap();
    assert!(solver.is_parallel());
}

// ============================================================================
// Output Tests
// ============================================================================

/// Test Display output of a converged run.
#[test]
fn test_result_display() {
    let f = GridField::<f64>::zeros(&[5]);
    let u = GridField::from_vec(&[5], vec![0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
    let solver = Relaxation::new()
        .tolerance(1e-6)
        .norm_interval(10)
        .return_history()
        .adapter(Solve)
        .build()
        .unwrap();
    let result = solver.fit(&f, Some(u)).unwrap();

    let text = result.to_string();
    assert!(text.contains("Summary:"));
    assert!(text.contains("Converged:     yes"));
    assert!(text.contains("Residual History:"));
    assert!(text.contains(&format!("Iterations:    {}", result.iterations())));
}

/// Test Display output when the residual was never measured.
#[test]
fn test_status_display_without_residual() {
    let status = RelaxationStatus {
        iterations: 3,
        residual_norm: None,
        converged: false,
        residual_history: None,
        spacing: 0.25,
    };
    let text = status.to_string();
    assert!(text.contains("not evaluated"));
    assert!(text.contains("Converged:     no"));
    assert_eq!(status.checks(), 0);
}

/// Test long histories are elided in the Display output.
#[test]
fn test_status_display_elides_long_history() {
    let status = RelaxationStatus {
        iterations: 30,
        residual_norm: Some(1.0),
        converged: false,
        residual_history: Some((0..30).map(|i| 30.0 - i as f64).collect()),
        spacing: 0.1,
    };
    let text = status.to_string();
    assert!(text.contains("..."));
    assert!(!text.contains("\n      15 "));
    assert!(text.contains("\n      30 "));
}

/// Test converting the solution container while keeping the status.
#[test]
fn test_map_solution() {
    let f = GridField::<f64>::zeros(&[4, 4]);
    let smoother = Relaxation::new().adapter(Smooth).build().unwrap();
    let result = smoother.fit(&f, GridField::zeros(&[4, 4])).unwrap();

    let iterations = result.iterations();
    let flat = result.map_solution(Vec::<f64>::from);
    assert_eq!(flat.solution.len(), 16);
    assert_eq!(flat.status.iterations, iterations);
}

// ============================================================================
// Precision Tests
// ============================================================================

/// Test that single precision fields relax and converge.
#[test]
fn test_f32_solve() {
    let f = GridField::<f32>::zeros(&[5]);
    let u = GridField::from_vec(&[5], vec![0.0f32, 0.0, 0.0, 0.0, 1.0]).unwrap();
    let solver = Relaxation::new()
        .tolerance(1e-4f32)
        .norm_interval(5)
        .adapter(Solve)
        .build()
        .unwrap();
    let result = solver.fit(&f, Some(u)).unwrap();

    assert!(result.converged());
    assert!((result.solution.as_slice()[2] - 0.5).abs() < 1e-4);
}
