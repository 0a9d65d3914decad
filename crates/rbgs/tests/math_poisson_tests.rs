#![cfg(feature = "dev")]
//! Tests for the Poisson operator, norms, spacing and grid helpers.
//!
//! These tests verify the numerical building blocks of the residual check:
//! - Discrete Laplacian on polynomials with known second differences
//! - Boundary handling of the operator
//! - L2 norms and the residual norm
//! - Default grid spacing
//! - Row-major shape helpers
//!
//! ## Test Organization
//!
//! 1. **Poisson Operator** - Interior values, boundary zeros
//! 2. **Norms** - L2 norm, residual norm
//! 3. **Spacing** - Defaults and overrides
//! 4. **Grid Helpers** - Strides, unravel, interior traversal, GridField

use approx::{assert_abs_diff_eq, assert_relative_eq};

use rbgs::internals::math::norm::{l2_norm, l2_norm_of_difference};
use rbgs::internals::math::poisson::{apply_poisson, residual_norm, stencil_diagonal};
use rbgs::internals::math::spacing::{default_spacing, resolve_spacing};
use rbgs::internals::primitives::errors::RelaxationError;
use rbgs::internals::primitives::grid::{
    for_each_interior, is_boundary, strides, unravel, GridField,
};

// ============================================================================
// Poisson Operator Tests
// ============================================================================

/// Test the 1D Laplacian of a parabola.
///
/// Verifies that the second difference of x^2 equals 2 at interior points.
#[test]
fn test_apply_poisson_1d_parabola() {
    let h = 0.25;
    let u: Vec<f64> = (0..9).map(|i| (i as f64 * h).powi(2)).collect();
    let au = apply_poisson(&u, &[9], h);

    assert_eq!(au[0], 0.0);
    assert_eq!(au[8], 0.0);
    for &v in &au[1..8] {
        assert_relative_eq!(v, 2.0, epsilon = 1e-12);
    }
}

/// Test the 2D Laplacian of a harmonic function.
///
/// Verifies that x*y has zero discrete Laplacian everywhere.
#[test]
fn test_apply_poisson_2d_harmonic() {
    let u = GridField::<f64>::from_fn(&[6, 7], |idx| (idx[0] * idx[1]) as f64);
    let au = apply_poisson(u.as_slice(), u.shape(), 1.0);
    assert!(au.iter().all(|&v| v == 0.0));
}

/// Test the 3D Laplacian of a sum of squares.
///
/// Verifies that x^2 + y^2 + z^2 has Laplacian 6 inside and 0 on the boundary.
#[test]
fn test_apply_poisson_3d_quadratic() {
    let shape = [5, 6, 4];
    let h = 0.5;
    let u = GridField::<f64>::from_fn(&shape, |idx| {
        idx.iter().map(|&c| (c as f64 * h).powi(2)).sum()
    });
    let au = apply_poisson(u.as_slice(), &shape, h);

    let mut coords = [0; 3];
    for (k, &v) in au.iter().enumerate() {
        unravel(k, &shape, &mut coords);
        if is_boundary(&coords, &shape) {
            assert_eq!(v, 0.0, "boundary {coords:?}");
        } else {
            assert_relative_eq!(v, 6.0, epsilon = 1e-12);
        }
    }
}

/// Test the stencil diagonal weight per rank.
#[test]
fn test_stencil_diagonal() {
    assert_eq!(stencil_diagonal::<f64>(1), 2.0);
    assert_eq!(stencil_diagonal::<f64>(2), 4.0);
    assert_eq!(stencil_diagonal::<f32>(3), 6.0);
}

// ============================================================================
// Norm Tests
// ============================================================================

/// Test the Euclidean norm.
#[test]
fn test_l2_norm() {
    assert_eq!(l2_norm(&[3.0, 4.0]), 5.0);
    assert_eq!(l2_norm::<f64>(&[]), 0.0);
    assert_eq!(l2_norm_of_difference(&[4.0, 6.0], &[1.0, 2.0]), 5.0);
}

/// Test the residual norm of an exact discrete solution.
///
/// Verifies that F = A·U gives a zero residual and that boundary values of F
/// contribute to the norm unchanged.
#[test]
fn test_residual_norm() {
    let shape = [5, 5];
    let u = GridField::<f64>::from_fn(&shape, |idx| (idx[0] * idx[0] + idx[1]) as f64);
    let h = 0.2;
    let f = apply_poisson(u.as_slice(), &shape, h);
    assert_eq!(residual_norm(&f, u.as_slice(), &shape, h), 0.0);

    // A source value on the corner is not matched by A·U
    let mut f_corner = f.clone();
    f_corner[0] = 3.0;
    assert_abs_diff_eq!(
        residual_norm(&f_corner, u.as_slice(), &shape, h),
        3.0,
        epsilon = 1e-12
    );
}

// ============================================================================
// Spacing Tests
// ============================================================================

/// Test default spacing uses the extent of axis 0.
#[test]
fn test_default_spacing() {
    assert_eq!(default_spacing::<f64>(&[5]), Some(0.2));
    assert_eq!(default_spacing::<f64>(&[4, 100]), Some(0.25));
    assert_eq!(default_spacing::<f64>(&[]), None);
    assert_eq!(default_spacing::<f64>(&[0, 3]), None);
}

/// Test that explicit spacing overrides the default.
#[test]
fn test_resolve_spacing() {
    assert_eq!(resolve_spacing(Some(0.1), &[5]), Some(0.1));
    assert_eq!(resolve_spacing::<f64>(None, &[8]), Some(0.125));
}

// ============================================================================
// Grid Helper Tests
// ============================================================================

/// Test row-major strides and coordinate decomposition.
#[test]
fn test_strides_and_unravel() {
    assert_eq!(strides(&[2, 3, 4]), vec![12, 4, 1]);
    assert_eq!(strides(&[7]), vec![1]);

    let mut coords = [0; 3];
    unravel(17, &[2, 3, 4], &mut coords);
    assert_eq!(coords, [1, 1, 1]);
}

/// Test interior traversal order and extent.
///
/// Verifies that only interior offsets are visited, in increasing order.
#[test]
fn test_for_each_interior() {
    let mut visited = Vec::new();
    for_each_interior(&[4, 5], |k| visited.push(k));
    assert_eq!(visited, vec![6, 7, 8, 11, 12, 13]);

    let mut count = 0;
    for_each_interior(&[5, 2, 5], |_| count += 1);
    assert_eq!(count, 0);

    for_each_interior(&[], |_| count += 1);
    assert_eq!(count, 0);

    for_each_interior(&[4, 4, 4], |_| count += 1);
    assert_eq!(count, 8);
}

/// Test GridField construction and access.
#[test]
fn test_grid_field_access() {
    let mut g = GridField::<f64>::zeros(&[2, 3]);
    assert_eq!(g.rank(), 2);
    assert_eq!(g.len(), 6);
    assert_eq!(g.offset(&[1, 2]), Some(5));
    assert_eq!(g.offset(&[2, 0]), None);
    assert_eq!(g.offset(&[1]), None);

    *g.get_mut(&[1, 0]).unwrap() = 4.0;
    assert_eq!(g.get(&[1, 0]), Some(4.0));
    assert_eq!(g.as_slice()[3], 4.0);

    // Rank 0 holds a single element
    let scalar = GridField::<f64>::zeros(&[]);
    assert_eq!(scalar.len(), 1);
    assert_eq!(scalar.rank(), 0);
}

/// Test GridField rejects data of the wrong length.
#[test]
fn test_grid_field_from_vec_length() {
    let res = GridField::from_vec(&[2, 2], vec![1.0, 2.0, 3.0]);
    assert!(matches!(res, Err(RelaxationError::InvalidInput(_))));

    let g = GridField::from_vec(&[3], vec![1.0, 2.0, 3.0]).unwrap();
    let (shape, data) = g.into_parts();
    assert_eq!(shape, vec![3]);
    assert_eq!(data, vec![1.0, 2.0, 3.0]);
}
