//! Parallel execution engine for red-black relaxation passes.
//!
//! ## Purpose
//!
//! This module provides the parallel half-sweep and residual functions that
//! are injected into the `rbgs` crate's execution engine. Points of one colour
//! only read points of the other colour, so a half-sweep can be split across
//! CPU cores without changing the result.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacements for the sequential passes.
//! * **Parallelism**: Uses `rayon` over axis-0 lanes (rows in 2D, planes in 3D)
//!   and over fixed-size chunks in 1D.
//! * **Snapshot**: Each half-sweep reads neighbours from a copy of `U` taken
//!   before the pass, so every lane can be written independently.
//! * **Determinism**: Stencil terms are summed in the same order as the
//!   sequential kernels; results are bit-identical to them.
//! * **Small grids**: Fall back to the sequential passes below
//!   [`PARALLEL_THRESHOLD`] elements.
//!
//! ## Key concepts
//!
//! * **Lane**: A contiguous block of `U` sharing one axis-0 index.
//! * **Integration**: Plugs into the `rbgs` executor via the `SweepPassFn`
//!   and `ResidualPassFn` hooks.
//!
//! ## Invariants
//!
//! * `f`, `u` and `shape` agree (checked by the `rbgs` validator).
//! * Boundary lanes and boundary points inside a lane are never written.
//!
//! ## Non-goals
//!
//! * This module does not handle the iteration loop (handled by `rbgs::executor`).
//! * This module does not validate input data (handled by `validator`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
#[cfg(feature = "cpu")]
use num_traits::Float;

// Export dependencies from rbgs crate
#[cfg(feature = "cpu")]
use rbgs::internals::algorithms::checkerboard::Color;
#[cfg(feature = "cpu")]
use rbgs::internals::algorithms::sweep::sweep_pass;
#[cfg(feature = "cpu")]
use rbgs::internals::math::norm::l2_norm_of_difference;
#[cfg(feature = "cpu")]
use rbgs::internals::math::poisson::{residual_norm, stencil_diagonal};
#[cfg(feature = "cpu")]
use rbgs::internals::primitives::grid::{for_each_interior, strides};

/// Grids with fewer elements than this are relaxed sequentially.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Chunk length used to split 1D lines across threads.
pub const LINE_CHUNK: usize = 2048;

// ============================================================================
// Parallel Sweep Function
// ============================================================================

/// Perform a single half-sweep over all points of `color` in parallel.
#[cfg(feature = "cpu")]
pub fn sweep_pass_parallel<T>(color: Color, f: &[T], u: &mut [T], shape: &[usize], h2: T)
where
    T: Float + Send + Sync,
{
    if u.len() < PARALLEL_THRESHOLD || shape.iter().any(|&extent| extent < 3) {
        sweep_pass(color, f, u, shape, h2);
        return;
    }

    let src = u.to_vec();
    let c = color.parity();

    match *shape {
        [n] => sweep_line_parallel(c, f, u, &src, n, h2),
        [m, n] => sweep_plane_parallel(c, f, u, &src, [m, n], h2),
        [m, n, o] => sweep_volume_parallel(c, f, u, &src, [m, n, o], h2),
        _ => sweep_pass(color, f, u, shape, h2),
    }
}

#[cfg(feature = "cpu")]
fn sweep_line_parallel<T>(c: usize, f: &[T], u: &mut [T], src: &[T], n: usize, h2: T)
where
    T: Float + Send + Sync,
{
    let two = stencil_diagonal::<T>(1);

    u.par_chunks_mut(LINE_CHUNK)
        .enumerate()
        .for_each(|(chunk, out)| {
            let base = chunk * LINE_CHUNK;
            for (offset, value) in out.iter_mut().enumerate() {
                let i = base + offset;
                if i == 0 || i + 1 >= n || i % 2 != c {
                    continue;
                }
                *value = (src[i - 1] + src[i + 1] - f[i] * h2) / two;
            }
        });
}

#[cfg(feature = "cpu")]
fn sweep_plane_parallel<T>(c: usize, f: &[T], u: &mut [T], src: &[T], [m, n]: [usize; 2], h2: T)
where
    T: Float + Send + Sync,
{
    let four = stencil_diagonal::<T>(2);

    u.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
        if i == 0 || i + 1 >= m {
            return;
        }
        let base = i * n;
        // First column with (i + j) % 2 == c
        let j0 = 1 + (i + 1 + c) % 2;
        for j in (j0..n - 1).step_by(2) {
            let k = base + j;
            row[j] = (src[k - n] + src[k + n] + src[k - 1] + src[k + 1] - f[k] * h2) / four;
        }
    });
}

#[cfg(feature = "cpu")]
fn sweep_volume_parallel<T>(
    c: usize,
    f: &[T],
    u: &mut [T],
    src: &[T],
    [m, n, o]: [usize; 3],
    h2: T,
) where
    T: Float + Send + Sync,
{
    let six = stencil_diagonal::<T>(3);
    let plane = n * o;

    u.par_chunks_mut(plane).enumerate().for_each(|(i, slab)| {
        if i == 0 || i + 1 >= m {
            return;
        }
        let base = i * plane;
        for j in 1..n - 1 {
            let k0 = 1 + (i + j + 1 + c) % 2;
            for k in (k0..o - 1).step_by(2) {
                let local = j * o + k;
                let p = base + local;
                slab[local] = (src[p - plane]
                    + src[p + plane]
                    + src[p - o]
                    + src[p + o]
                    + src[p - 1]
                    + src[p + 1]
                    - f[p] * h2)
                    / six;
            }
        }
    });
}

// ============================================================================
// Parallel Residual Function
// ============================================================================

/// Residual norm `‖F − A·U‖₂` with the Laplacian evaluated in parallel.
///
/// The final reduction runs sequentially in row-major order, so the value is
/// bit-identical to `rbgs::internals::math::poisson::residual_norm`.
#[cfg(feature = "cpu")]
pub fn residual_pass_parallel<T>(f: &[T], u: &[T], shape: &[usize], h: T) -> T
where
    T: Float + Send + Sync,
{
    if u.len() < PARALLEL_THRESHOLD {
        return residual_norm(f, u, shape, h);
    }
    let au = apply_poisson_parallel(u, shape, h);
    l2_norm_of_difference(f, &au)
}

/// Apply the discrete Laplacian to `u`, one axis-0 lane per task.
///
/// Boundary entries are zero, matching the sequential operator.
#[cfg(feature = "cpu")]
pub fn apply_poisson_parallel<T>(u: &[T], shape: &[usize], h: T) -> Vec<T>
where
    T: Float + Send + Sync,
{
    let mut out = vec![T::zero(); u.len()];
    let [extent, inner @ ..] = shape else {
        return out;
    };
    if shape.iter().any(|&e| e < 3) {
        return out;
    }

    let extent = *extent;
    let h2 = h * h;
    let diag = stencil_diagonal::<T>(shape.len());
    let st = strides(shape);

    let stencil = |k: usize| {
        let mut sum = T::zero();
        for &s in &st {
            sum = sum + u[k - s] + u[k + s];
        }
        (sum - diag * u[k]) / h2
    };

    if inner.is_empty() {
        out.par_chunks_mut(LINE_CHUNK)
            .enumerate()
            .for_each(|(chunk, values)| {
                let base = chunk * LINE_CHUNK;
                for (offset, value) in values.iter_mut().enumerate() {
                    let k = base + offset;
                    if k > 0 && k + 1 < extent {
                        *value = stencil(k);
                    }
                }
            });
    } else {
        let lane = st[0];
        out.par_chunks_mut(lane).enumerate().for_each(|(i, values)| {
            if i == 0 || i + 1 >= extent {
                return;
            }
            let base = i * lane;
            for_each_interior(inner, |local| values[local] = stencil(base + local));
        });
    }

    out
}
