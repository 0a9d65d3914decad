//! Red-black stencil sweep kernels.
//!
//! ## Purpose
//!
//! This module provides the half-sweep of the Red-Black Gauss-Seidel method:
//! given a color, every interior grid point of that color is replaced by the
//! average of its orthogonal neighbours minus the scaled source term.
//!
//! ## Design notes
//!
//! * **Specialized**: One kernel per rank (1D, 2D, 3D) with hand-written index
//!   arithmetic; the set is closed, so dispatch is a `match` on [`SweepKernel`].
//! * **Strided sub-updates**: Each color is covered by `2^(rank-1)` strided
//!   blocks, one per parity pattern of the leading axes, with the last axis
//!   stepping by two from the offset that completes the parity.
//! * **In-place**: Updates are written straight into `U`. Within one color no
//!   update reads another update's output, so visiting order is irrelevant.
//! * **Generics**: Generic over `Float` types, no precision promotion.
//!
//! ## Key concepts
//!
//! * **Update rule**: `U[idx] = (Σ neighbours − F[idx]·h²) / (2·rank)`.
//! * **Summation order**: axis 0 minus, axis 0 plus, axis 1 minus, axis 1
//!   plus, axis 2 minus, axis 2 plus, then the source term.
//!
//! ## Invariants
//!
//! * Boundary points (index 0 or extent−1 on any axis) are never written.
//! * Each interior point of the requested color is written exactly once.
//! * Points of the opposite color are never written.
//! * `F` is never mutated.
//!
//! ## Non-goals
//!
//! * This module does not validate shapes (handled by `validator`).
//! * This module does not run the iteration loop (handled by `executor`).

// Internal dependencies
use crate::algorithms::checkerboard::Color;
use crate::math::poisson::stencil_diagonal;
use crate::primitives::errors::RelaxationError;

// External dependencies
use num_traits::Float;

// ============================================================================
// Kernel Selection
// ============================================================================

/// Rank-specialized sweep kernel, selected once per solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepKernel {
    /// Rank-1 grids, 3-point stencil.
    Line,

    /// Rank-2 grids, 5-point stencil.
    Plane,

    /// Rank-3 grids, 7-point stencil.
    Volume,
}

impl SweepKernel {
    /// Select the kernel for a grid of the given rank.
    pub fn for_rank(rank: usize) -> Result<Self, RelaxationError> {
        match rank {
            1 => Ok(Self::Line),
            2 => Ok(Self::Plane),
            3 => Ok(Self::Volume),
            _ => Err(RelaxationError::UnsupportedRank { rank }),
        }
    }

    /// Rank handled by this kernel.
    pub fn rank(self) -> usize {
        match self {
            Self::Line => 1,
            Self::Plane => 2,
            Self::Volume => 3,
        }
    }

    /// Perform one half-sweep of `color` over `u`.
    ///
    /// `shape` must have exactly [`Self::rank`] extents.
    #[inline]
    pub fn sweep<T: Float>(self, color: Color, f: &[T], u: &mut [T], shape: &[usize], h2: T) {
        debug_assert_eq!(shape.len(), self.rank());
        match self {
            Self::Line => sweep_1d(color, f, u, shape[0], h2),
            Self::Plane => sweep_2d(color, f, u, [shape[0], shape[1]], h2),
            Self::Volume => sweep_3d(color, f, u, [shape[0], shape[1], shape[2]], h2),
        }
    }
}

/// Default sweep pass: dispatches on the rank of `shape`.
///
/// Ranks other than 1, 2 and 3 are ignored; the driver rejects them earlier.
pub fn sweep_pass<T: Float>(color: Color, f: &[T], u: &mut [T], shape: &[usize], h2: T) {
    if let Ok(kernel) = SweepKernel::for_rank(shape.len()) {
        kernel.sweep(color, f, u, shape, h2);
    }
}

// ============================================================================
// 1D
// ============================================================================

/// Half-sweep over a line of `n` points.
pub fn sweep_1d<T: Float>(color: Color, f: &[T], u: &mut [T], n: usize, h2: T) {
    if n < 3 {
        return;
    }
    let two = stencil_diagonal::<T>(1);

    for i in (2 - color.parity()..n - 1).step_by(2) {
        u[i] = (u[i - 1] + u[i + 1] - f[i] * h2) / two;
    }
}

// ============================================================================
// 2D
// ============================================================================

/// Half-sweep over an `m x n` plane.
pub fn sweep_2d<T: Float>(color: Color, f: &[T], u: &mut [T], shape: [usize; 2], h2: T) {
    let [m, n] = shape;
    if m < 3 || n < 3 {
        return;
    }
    let c = color.parity();
    let four = stencil_diagonal::<T>(2);

    // Odd rows
    relax_rows_2d(f, u, shape, [1, 1 + c], h2, four);
    // Even rows
    relax_rows_2d(f, u, shape, [2, 2 - c], h2, four);
}

#[inline]
fn relax_rows_2d<T: Float>(
    f: &[T],
    u: &mut [T],
    [m, n]: [usize; 2],
    [row_start, col_start]: [usize; 2],
    h2: T,
    four: T,
) {
    for i in (row_start..m - 1).step_by(2) {
        let row = i * n;
        for j in (col_start..n - 1).step_by(2) {
            let k = row + j;
            u[k] = (u[k - n] + u[k + n] + u[k - 1] + u[k + 1] - f[k] * h2) / four;
        }
    }
}

// ============================================================================
// 3D
// ============================================================================

/// Half-sweep over an `m x n x o` volume.
pub fn sweep_3d<T: Float>(color: Color, f: &[T], u: &mut [T], shape: [usize; 3], h2: T) {
    let [m, n, o] = shape;
    if m < 3 || n < 3 || o < 3 {
        return;
    }
    let c = color.parity();
    let six = stencil_diagonal::<T>(3);

    relax_block_3d(f, u, shape, [2, 1, 1 + c], h2, six);
    relax_block_3d(f, u, shape, [1, 1, 2 - c], h2, six);
    relax_block_3d(f, u, shape, [1, 2, 1 + c], h2, six);
    relax_block_3d(f, u, shape, [2, 2, 2 - c], h2, six);
}

#[inline]
fn relax_block_3d<T: Float>(
    f: &[T],
    u: &mut [T],
    [m, n, o]: [usize; 3],
    [i0, j0, k0]: [usize; 3],
    h2: T,
    six: T,
) {
    let plane = n * o;
    for i in (i0..m - 1).step_by(2) {
        for j in (j0..n - 1).step_by(2) {
            let line = i * plane + j * o;
            for k in (k0..o - 1).step_by(2) {
                let p = line + k;
                u[p] = (u[p - plane]
                    + u[p + plane]
                    + u[p - o]
                    + u[p + o]
                    + u[p - 1]
                    + u[p + 1]
                    - f[p] * h2)
                    / six;
            }
        }
    }
}
