#![cfg(feature = "dev")]
//! Tests for the solve adapter.
//!
//! These tests verify the convergence-driven processor:
//! - Defaults (spacing, zero initial guess)
//! - Validation before mutation (rank, shape, spacing, tolerance)
//! - Strict convergence mode
//! - In-place and slice entry points
//!
//! ## Test Organization
//!
//! 1. **Basic Solving** - Closed-form problems, defaults
//! 2. **Validation** - Errors raised before U is touched
//! 3. **Strict Mode** - `require_convergence`
//! 4. **Entry Points** - `fit_in_place`, `fit_slices`

use approx::assert_abs_diff_eq;

use rbgs::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn linear_boundary(n: usize) -> (GridField<f64>, GridField<f64>) {
    let f = GridField::zeros(&[n]);
    let u = GridField::from_fn(&[n], |idx| if idx[0] == n - 1 { 1.0 } else { 0.0 });
    (f, u)
}

// ============================================================================
// Basic Solving Tests
// ============================================================================

/// Test the 1D closed form with the documented defaults.
///
/// Verifies default spacing `1/5`, `norm_interval = 1000` and the straight-line result.
#[test]
fn test_solve_1d_closed_form() {
    let (f, u) = linear_boundary(5);
    let solver = Relaxation::new().tolerance(1e-6).adapter(Solve).build().unwrap();
    let result = solver.fit(&f, Some(u)).unwrap();

    assert!(result.converged());
    assert_eq!(result.iterations(), 1000);
    assert_eq!(result.status.spacing, 0.2);
    for (got, want) in result.solution.as_slice().iter().zip([0.0, 0.25, 0.5, 0.75, 1.0]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
    }
}

/// Test that a missing U starts from zeros.
///
/// With zero boundary values and zero source the solution stays zero.
#[test]
fn test_solve_without_initial_guess() {
    let f = GridField::<f64>::zeros(&[6, 6]);
    let solver = Relaxation::new().adapter(Solve).build().unwrap();
    let result = solver.fit(&f, None).unwrap();

    assert_eq!(result.solution.shape(), &[6, 6]);
    assert!(result.solution.as_slice().iter().all(|&v| v == 0.0));
    assert!(result.converged());
    assert_eq!(result.iterations(), 1000);
}

/// Test a 2D Poisson problem with a constant source.
///
/// Verifies convergence and that the solution is symmetric in both axes.
#[test]
fn test_solve_2d_constant_source() {
    let n = 9;
    let f = GridField::from_fn(&[n, n], |idx| {
        if idx.iter().any(|&c| c == 0 || c == n - 1) {
            0.0
        } else {
            1.0
        }
    });
    let solver = Relaxation::new()
        .tolerance(1e-10)
        .norm_interval(10)
        .adapter(Solve)
        .build()
        .unwrap();
    let result = solver.fit(&f, None).unwrap();

    assert!(result.converged());
    let u = &result.solution;
    for i in 0..n {
        for j in 0..n {
            let v = u.get(&[i, j]).unwrap();
            assert_abs_diff_eq!(v, u.get(&[n - 1 - i, j]).unwrap(), epsilon = 1e-9);
            assert_abs_diff_eq!(v, u.get(&[j, i]).unwrap(), epsilon = 1e-9);
        }
    }
    // Laplacian of U is positive, so U dips below the zero boundary
    assert!(u.get(&[4, 4]).unwrap() < 0.0);
}

/// Test that history collection reports every check.
#[test]
fn test_solve_with_history() {
    let (f, u) = linear_boundary(9);
    let solver = Relaxation::new()
        .norm_interval(3)
        .return_history()
        .adapter(Solve)
        .build()
        .unwrap();
    let result = solver.fit(&f, Some(u)).unwrap();

    assert_eq!(result.status.checks(), result.iterations() / 3);
    let history = result.status.residual_history.as_ref().unwrap();
    assert_eq!(history.last().copied(), result.residual_norm());
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Test that rank 0 and rank 4 fields are rejected without touching U.
#[test]
fn test_solve_rejects_unsupported_rank() {
    let solver = Relaxation::new().adapter(Solve).build().unwrap();

    let f0 = GridField::<f64>::zeros(&[]);
    let mut u0 = GridField::from_vec(&[], vec![3.0]).unwrap();
    assert_eq!(
        solver.fit_in_place(&f0, &mut u0),
        Err(RelaxationError::UnsupportedRank { rank: 0 })
    );
    assert_eq!(u0.as_slice(), &[3.0]);

    let f4 = GridField::<f64>::zeros(&[3, 3, 3, 3]);
    let mut u4 = GridField::from_fn(&[3, 3, 3, 3], |_| 1.0);
    assert_eq!(
        solver.fit_in_place(&f4, &mut u4),
        Err(RelaxationError::UnsupportedRank { rank: 4 })
    );
    assert!(u4.as_slice().iter().all(|&v| v == 1.0));

    assert!(matches!(
        solver.fit(&f4, None),
        Err(RelaxationError::UnsupportedRank { rank: 4 })
    ));
}

/// Test that a solution of a different shape is rejected.
#[test]
fn test_solve_rejects_shape_mismatch() {
    let solver = Relaxation::new().adapter(Solve).build().unwrap();
    let f = GridField::<f64>::zeros(&[5]);
    let u = GridField::from_fn(&[4], |_| 2.0);

    let res = solver.fit(&f, Some(u));
    assert_eq!(
        res,
        Err(RelaxationError::ShapeMismatch {
            expected: vec![5],
            got: vec![4],
        })
    );
}

/// Test that empty extents are rejected.
#[test]
fn test_solve_rejects_empty_grid() {
    let solver = Relaxation::new().adapter(Solve).build().unwrap();
    let f = GridField::<f64>::zeros(&[4, 0]);
    assert_eq!(solver.fit(&f, None), Err(RelaxationError::EmptyGrid));
}

/// Test that raw slices with an overflowing shape are rejected.
#[test]
fn test_solve_rejects_overflowing_shape() {
    let solver = Relaxation::<f64>::new().adapter(Solve).build().unwrap();
    let res = solver.fit_slices(&[], &mut [], &[usize::MAX / 2 + 1, 2, 1]);
    assert!(matches!(res, Err(RelaxationError::InvalidInput(_))));
}

/// Test that invalid parameters are rejected at build time.
#[test]
fn test_solve_rejects_invalid_parameters() {
    assert!(matches!(
        Relaxation::<f64>::new().spacing(0.0).adapter(Solve).build(),
        Err(RelaxationError::InvalidSpacing(_))
    ));
    assert!(matches!(
        Relaxation::<f64>::new().tolerance(-1.0).adapter(Solve).build(),
        Err(RelaxationError::InvalidTolerance(_))
    ));
    assert!(matches!(
        Relaxation::<f64>::new().norm_interval(0).adapter(Solve).build(),
        Err(RelaxationError::InvalidNormInterval(0))
    ));
}

/// Test that a zero iteration cap returns U unchanged.
#[test]
fn test_solve_zero_iterations() {
    let (f, u) = linear_boundary(7);
    let before = u.clone();
    let solver = Relaxation::new().max_iterations(0).adapter(Solve).build().unwrap();
    let result = solver.fit(&f, Some(u)).unwrap();

    assert_eq!(result.solution, before);
    assert_eq!(result.iterations(), 0);
    assert_eq!(result.residual_norm(), None);
    assert!(!result.converged());
}

// ============================================================================
// Strict Mode Tests
// ============================================================================

/// Test that strict mode reports exhaustion of the cap.
#[test]
fn test_require_convergence_error() {
    let (f, u) = linear_boundary(9);
    let solver = Relaxation::new()
        .max_iterations(6)
        .norm_interval(2)
        .require_convergence()
        .adapter(Solve)
        .build()
        .unwrap();

    match solver.fit(&f, Some(u)) {
        Err(RelaxationError::NotConverged {
            iterations,
            residual_norm,
        }) => {
            assert_eq!(iterations, 6);
            assert!(residual_norm > 0.0);
        }
        other => panic!("Expected NotConverged, got {other:?}"),
    }
}

/// Test that strict mode succeeds when the tolerance is reached.
#[test]
fn test_require_convergence_success() {
    let (f, u) = linear_boundary(5);
    let solver = Relaxation::new()
        .tolerance(1e-6)
        .norm_interval(1)
        .require_convergence()
        .adapter(Solve)
        .build()
        .unwrap();

    let result = solver.fit(&f, Some(u)).unwrap();
    assert!(result.converged());
}

// ============================================================================
// Entry Point Tests
// ============================================================================

/// Test in-place and slice entry points agree with `fit`.
#[test]
fn test_entry_points_agree() {
    let (f, u) = linear_boundary(11);
    let solver = Relaxation::new()
        .spacing(0.1)
        .norm_interval(7)
        .adapter(Solve)
        .build()
        .unwrap();

    let by_value = solver.fit(&f, Some(u.clone())).unwrap();

    let mut in_place = u.clone();
    let status = solver.fit_in_place(&f, &mut in_place).unwrap();

    let mut raw = u.as_slice().to_vec();
    let raw_status = solver.fit_slices(f.as_slice(), &mut raw, &[11]).unwrap();

    assert_eq!(by_value.solution, in_place);
    assert_eq!(in_place.as_slice(), raw.as_slice());
    assert_eq!(by_value.status, status);
    assert_eq!(status, raw_status);
    assert_eq!(status.spacing, 0.1);
}
