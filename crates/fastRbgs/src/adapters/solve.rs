//! Solve adapter with parallel half-sweeps.
//!
//! ## Purpose
//!
//! This module provides the convergence-driven relaxation adapter with
//! optional parallel execution. It accepts `ndarray` arrays and `GridField`
//! values of rank 1, 2 or 3.
//!
//! ## Design notes
//!
//! * **Delegation**: Validation and the iteration loop live in the `rbgs` crate.
//! * **Parallelism**: Installs the `rayon` passes (fastRbgs extension).
//! * **Layout**: `ndarray` inputs must be in standard layout.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Hook Injection**: The parallel passes replace the sequential ones
//!   through the `rbgs` executor hooks.
//! * **Same Answer**: Parallel and sequential runs produce identical output.
//!
//! ## Invariants
//!
//! * `F` and `U` have identical shape of rank 1, 2 or 3.
//! * Boundary values of `U` are returned unchanged.
//!
//! ## Non-goals
//!
//! * This adapter does not copy non-contiguous arrays into standard layout.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::{residual_pass_parallel, sweep_pass_parallel};

// External dependencies
use log::debug;
use ndarray::{ArrayD, IxDyn};
use num_traits::Float;

// Export dependencies from rbgs crate
use rbgs::internals::adapters::solve::{SolveBuilder, SolveRelaxation};
use rbgs::internals::engine::output::{RelaxationResult, RelaxationStatus};
use rbgs::internals::engine::validator::Validator;
use rbgs::internals::primitives::errors::RelaxationError;

// Internal dependencies
use crate::input::{GridInput, GridInputMut};

// ============================================================================
// Extended Solve Builder
// ============================================================================

/// Builder for the solve processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelSolveBuilder<T: Float> {
    /// Base builder from the rbgs crate
    pub base: SolveBuilder<T>,
}

impl<T: Float> Default for ParallelSolveBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelSolveBuilder<T> {
    /// Create a new solve builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from rbgs SolveBuilder
    /// * parallel: true (fastRbgs extension)
    fn new() -> Self {
        let base = SolveBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the grid spacing.
    pub fn spacing(mut self, h: T) -> Self {
        self.base = self.base.spacing(h);
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.base = self.base.max_iterations(n);
        self
    }

    // ========================================================================
    // Solve-Specific Setters
    // ========================================================================

    /// Set the convergence threshold.
    pub fn tolerance(mut self, eps: T) -> Self {
        self.base = self.base.tolerance(eps);
        self
    }

    /// Set the period between residual evaluations.
    pub fn norm_interval(mut self, n: usize) -> Self {
        self.base = self.base.norm_interval(n);
        self
    }

    /// Record every sampled residual norm in the result.
    pub fn return_history(mut self, enabled: bool) -> Self {
        self.base = self.base.return_history(enabled);
        self
    }

    /// Report `NotConverged` when the cap is reached above tolerance.
    pub fn require_convergence(mut self, enabled: bool) -> Self {
        self.base = self.base.require_convergence(enabled);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the solve processor.
    pub fn build(self) -> Result<ParallelSolveRelaxation<T>, RelaxationError> {
        // Check for deferred errors from adapter conversion
        if let Some(ref err) = self.base.deferred_error {
            return Err(err.clone());
        }

        // Validate by attempting to build the base processor
        let _ = self.base.clone().build()?;

        Ok(ParallelSolveRelaxation { config: self })
    }
}

// ============================================================================
// Extended Solve Processor
// ============================================================================

/// Convergence-driven relaxation processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelSolveRelaxation<T: Float> {
    config: ParallelSolveBuilder<T>,
}

impl<T: Float + Send + Sync> ParallelSolveRelaxation<T> {
    /// Relax `u` (or a zero array when `None`) against the source `f`.
    pub fn fit<F>(
        &self,
        f: &F,
        u: Option<ArrayD<T>>,
    ) -> Result<RelaxationResult<T, ArrayD<T>>, RelaxationError>
    where
        F: GridInput<T> + ?Sized,
    {
        let mut u = match u {
            Some(u) => u,
            None => {
                Validator::validate_grid(f.as_grid_slice()?, f.grid_shape())?;
                ArrayD::zeros(IxDyn(f.grid_shape()))
            }
        };
        let status = self.fit_in_place(f, &mut u)?;

        Ok(RelaxationResult {
            solution: u,
            status,
        })
    }

    /// Relax `u` in place against the source `f`.
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

    /// Relax flat row-major data in place; `f` and `u` share `shape`.
    pub fn fit_slices(
        &self,
        f: &[T],
        u: &mut [T],
        shape: &[usize],
    ) -> Result<RelaxationStatus<T>, RelaxationError> {
        let processor = self.processor()?;
        debug!(
            "relaxing {:?} grid with {} passes",
            shape,
            if processor.is_parallel() {
                "parallel"
            } else {
                "sequential"
            }
        );

        // Delegate execution to the base implementation
        processor.fit_slices(f, u, shape)
    }

    /// Whether this processor runs the parallel passes.
    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "cpu") && self.config.base.parallel.unwrap_or(true)
    }

    /// Configure the base processor with the parallel passes if enabled.
    fn processor(&self) -> Result<SolveRelaxation<T>, RelaxationError> {
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
            // Fallback to sequential if cpu feature is disabled
            builder = builder.parallel(false);
            builder.custom_sweep_pass = None;
            builder.custom_residual_pass = None;
        }

        builder.build()
    }
}
