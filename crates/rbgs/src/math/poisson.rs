//! Discrete Poisson operator and residual evaluation.
//!
//! ## Purpose
//!
//! This module provides the second-order finite-difference Laplacian `A·U`
//! on a uniform grid of any rank, and the residual norm `‖F − A·U‖₂` the
//! relaxation driver uses as its convergence metric.
//!
//! ## Design notes
//!
//! * **Stencil**: `(Σ 2·rank orthogonal neighbours − 2·rank·U) / h²`.
//! * **Boundary**: The outermost layer holds fixed Dirichlet values, so `A·U`
//!   is zero there and `F` passes through to the residual unchanged.
//! * **Summation order**: Neighbours are accumulated axis by axis, minus side
//!   before plus side, matching the sweep kernels.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * The output has the same length and layout as the input field.
//! * Inputs are never mutated.
//!
//! ## Non-goals
//!
//! * This module does not impose boundary conditions.
//! * This module does not support anisotropic spacing.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::norm::l2_norm_of_difference;
use crate::primitives::grid::{for_each_interior, strides};

// ============================================================================
// Stencil Helpers
// ============================================================================

/// Diagonal weight of the centre point, `2·rank`, built exactly in `T`.
#[inline]
pub fn stencil_diagonal<T: Float>(rank: usize) -> T {
    (0..2 * rank).fold(T::zero(), |acc, _| acc + T::one())
}

// ============================================================================
// Poisson Operator
// ============================================================================

/// Apply the discrete Laplacian with spacing `h` to `u`.
///
/// Interior entries hold `(Σ neighbours − 2·rank·u) / h²`; boundary entries are zero.
pub fn apply_poisson<T: Float>(u: &[T], shape: &[usize], h: T) -> Vec<T> {
    let mut out = vec![T::zero(); u.len()];
    let h2 = h * h;
    let diag = stencil_diagonal::<T>(shape.len());
    let st = strides(shape);

    for_each_interior(shape, |k| {
        let mut sum = T::zero();
        for &s in &st {
            sum = sum + u[k - s] + u[k + s];
        }
        out[k] = (sum - diag * u[k]) / h2;
    });

    out
}

/// Residual norm `‖F − A·U‖₂` over every element of the grid.
pub fn residual_norm<T: Float>(f: &[T], u: &[T], shape: &[usize], h: T) -> T {
    let au = apply_poisson(u, shape, h);
    l2_norm_of_difference(f, &au)
}
