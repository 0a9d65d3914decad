//! Smooth adapter with parallel half-sweeps.
//!
//! ## Purpose
//!
//! This module provides the fixed-sweep smoothing adapter with optional
//! parallel execution, for use on the fine levels of a multigrid cycle.
//!
//! ## Design notes
//!
//! * **Delegation**: Delegates to the `rbgs` smooth processor.
//! * **Parallelism**: Installs the `rayon` passes (fastRbgs extension).
//!
//! ## Invariants
//!
//! * Exactly `sweeps` iterations are performed.
//! * `converged` is always `false` in the reported status.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::{residual_pass_parallel, sweep_pass_parallel};

// External dependencies
use ndarray::ArrayD;
use num_traits::Float;

// Export dependencies from rbgs crate
use rbgs::internals::adapters::smooth::{SmoothBuilder, SmoothRelaxation};
use rbgs::internals::engine::output::{RelaxationResult, RelaxationStatus};
use rbgs::internals::engine::validator::Validator;
use rbgs::internals::primitives::errors::RelaxationError;

// Internal dependencies
use crate::input::{GridInput, GridInputMut};

// ============================================================================
// Extended Smooth Builder
// ============================================================================

/// Builder for the smoothing processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelSmoothBuilder<T: Float> {
    /// Base builder from the rbgs crate
    pub base: SmoothBuilder<T>,
}

impl<T: Float> Default for ParallelSmoothBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelSmoothBuilder<T> {
    /// Create a new smooth builder with default parameters (parallel on).
    fn new() -> Self {
        let base = SmoothBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    /// Set the grid spacing.
    pub fn spacing(mut self, h: T) -> Self {
        self.base = self.base.spacing(h);
        self
    }

    /// Set the number of red+black iterations.
    pub fn sweeps(mut self, n: usize) -> Self {
        self.base = self.base.sweeps(n);
        self
    }

    /// Evaluate the residual norm once after the last iteration.
    pub fn return_residual_norm(mut self, enabled: bool) -> Self {
        self.base = self.base.return_residual_norm(enabled);
        self
    }

    /// Build the smoothing processor.
    pub fn build(self) -> Result<ParallelSmoothRelaxation<T>, RelaxationError> {
        if let Some(ref err) = self.base.deferred_error {
            return Err(err.clone());
        }

        let _ = self.base.clone().build()?;

        Ok(ParallelSmoothRelaxation { config: self })
    }
}

// ============================================================================
// Extended Smooth Processor
// ============================================================================

/// Fixed-sweep smoothing processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelSmoothRelaxation<T: Float> {
    config: ParallelSmoothBuilder<T>,
}

impl<T: Float + Send + Sync> ParallelSmoothRelaxation<T> {
    /// Smooth `u` against the source `f`, returning it in the result.
    pub fn fit<F>(
        &self,
        f: &F,
        mut u: ArrayD<T>,
    ) -> Result<RelaxationResult<T, ArrayD<T>>, RelaxationError>
    where
        F: GridInput<T> + ?Sized,
    {
        let status = self.fit_in_place(f, &mut u)?;
        Ok(RelaxationResult {
            solution: u,
            status,
        })
    }

    /// Smooth `u` in place against the source `f`.
    pub fn fit_in_place<F, U>(
        &self,
        f: &F,
        u: &mut U,
    ) -> Result<RelaxationStatus<T>, RelaxationError>
    where
        F: GridInput<T> + ?Sized,
        U: GridInputMut<T> + ?Sized,
    {
        let f_slice = f.as_grid_slice()?;
        let shape = f.grid_shape();
        Validator::validate_grid(f_slice, shape)?;
        Validator::validate_solution(shape, u.as_grid_slice()?, u.grid_shape())?;

        self.fit_slices(f_slice, u.as_grid_slice_mut()?, shape)
    }

    /// Smooth flat row-major data in place; `f` and `u` share `shape`.
    pub fn fit_slices(
        &self,
        f: &[T],
        u: &mut [T],
        shape: &[usize],
    ) -> Result<RelaxationStatus<T>, RelaxationError> {
        self.processor()?.fit_slices(f, u, shape)
    }

    /// Whether this processor runs the parallel passes.
    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "cpu") && self.config.base.parallel.unwrap_or(true)
    }

    fn processor(&self) -> Result<SmoothRelaxation<T>, RelaxationError> {
        let mut builder = self.config.base.clone();

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                builder = builder
                    .custom_sweep_pass(sweep_pass_parallel)
                    .custom_residual_pass(residual_pass_parallel);
            } else {
                builder.custom_sweep_pass = None;
                builder.custom_residual_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            builder = builder.parallel(false);
            builder.custom_sweep_pass = None;
            builder.custom_residual_pass = None;
        }

        builder.build()
    }
}
