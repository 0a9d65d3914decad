//! Solve adapter for convergence-driven relaxation.
//!
//! ## Purpose
//!
//! This module provides the solve execution adapter: it relaxes `U` with
//! red-black sweeps until the residual norm sampled every `norm_interval`
//! iterations drops to the tolerance, or until the iteration cap is reached.
//!
//! ## Design notes
//!
//! * **Validation**: Every fatal condition is reported before `U` is touched.
//! * **Ownership**: `fit` takes `U` by value (or allocates zeros) and moves it
//!   back in the result; `fit_in_place` borrows it mutably.
//! * **Delegation**: Delegates the iteration loop to the execution engine.
//! * **Logging**: One `debug` record per run, emitted after the loop.
//!
//! ## Key concepts
//!
//! * **Defaults**: `max_iterations = 10_000_000`, `tolerance = 1e-8`,
//!   `norm_interval = 1000`, `spacing = 1 / extent_along_axis_0`.
//! * **Strict mode**: With `require_convergence`, hitting the cap is an error.
//!
//! ## Invariants
//!
//! * `F` and `U` have identical shape of rank 1, 2 or 3.
//! * `F` is never mutated.
//! * Boundary values of `U` are returned unchanged.
//!
//! ## Non-goals
//!
//! * This adapter does not impose boundary conditions.
//! * This adapter does not detect divergence or NaN.

// External dependencies
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{ResidualPassFn, SweepPassFn};
use crate::engine::executor::{RelaxationConfig, RelaxationExecutor};
use crate::engine::output::{RelaxationResult, RelaxationStatus};
use crate::engine::validator::Validator;
use crate::math::spacing::resolve_spacing;
use crate::primitives::errors::RelaxationError;
use crate::primitives::grid::GridField;

// ============================================================================
// Solve Builder
// ============================================================================

/// Builder for the convergence-driven relaxation processor.
#[derive(Debug, Clone)]
pub struct SolveBuilder<T: Float> {
    /// Grid spacing (`None` for `1 / extent_along_axis_0`)
    pub spacing: Option<T>,

    /// Iteration cap
    pub max_iterations: usize,

    /// Convergence threshold on the residual norm
    pub tolerance: T,

    /// Period between residual evaluations
    pub norm_interval: usize,

    /// Whether to record every sampled residual norm
    pub return_history: bool,

    /// Whether exhausting the cap is an error
    pub require_convergence: bool,

    /// Deferred error from adapter conversion
    pub deferred_error: Option<RelaxationError>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom half-sweep function.
    #[doc(hidden)]
    pub custom_sweep_pass: Option<SweepPassFn<T>>,

    /// Custom residual norm function.
    #[doc(hidden)]
    pub custom_residual_pass: Option<ResidualPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SolveBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SolveBuilder<T> {
    /// Create a new solve builder with default parameters.
    fn new() -> Self {
        let defaults = RelaxationConfig::<T>::default();
        Self {
            spacing: None,
            max_iterations: defaults.max_iterations,
            tolerance: defaults.tolerance.unwrap_or_else(T::epsilon),
            norm_interval: defaults.norm_interval,
            return_history: false,
            require_convergence: false,
            deferred_error: None,
            custom_sweep_pass: None,
            custom_residual_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the grid spacing.
    pub fn spacing(mut self, h: T) -> Self {
        self.spacing = Some(h);
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    // ========================================================================
    // Solve-Specific Setters
    // ========================================================================

    /// Set the convergence threshold.
    pub fn tolerance(mut self, eps: T) -> Self {
        self.tolerance = eps;
        self
    }

    /// Set the period between residual evaluations.
    pub fn norm_interval(mut self, n: usize) -> Self {
        self.norm_interval = n;
        self
    }

    /// Record every sampled residual norm in the result.
    pub fn return_history(mut self, enabled: bool) -> Self {
        self.return_history = enabled;
        self
    }

    /// Report `NotConverged` when the cap is reached above tolerance.
    pub fn require_convergence(mut self, enabled: bool) -> Self {
        self.require_convergence = enabled;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set a custom half-sweep function.
    #[doc(hidden)]
    pub fn custom_sweep_pass(mut self, pass: SweepPassFn<T>) -> Self {
        self.custom_sweep_pass = Some(pass);
        self
    }

    /// Set a custom residual norm function.
    #[doc(hidden)]
    pub fn custom_residual_pass(mut self, pass: ResidualPassFn<T>) -> Self {
        self.custom_residual_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the solve processor.
    pub fn build(self) -> Result<SolveRelaxation<T>, RelaxationError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Validate explicit spacing
        if let Some(h) = self.spacing {
            Validator::validate_spacing(h)?;
        }

        // Validate convergence parameters
        Validator::validate_tolerance(self.tolerance)?;
        Validator::validate_norm_interval(self.norm_interval)?;

        Ok(SolveRelaxation { config: self })
    }
}

// ============================================================================
// Solve Processor
// ============================================================================

/// Convergence-driven relaxation processor.
#[derive(Debug, Clone)]
pub struct SolveRelaxation<T: Float> {
    config: SolveBuilder<T>,
}

impl<T: Float> SolveRelaxation<T> {
    /// Relax `u` (or a zero field when `None`) against the source `f`.
    pub fn fit(
        &self,
        f: &GridField<T>,
        u: Option<GridField<T>>,
    ) -> Result<RelaxationResult<T>, RelaxationError> {
        let mut u = match u {
            Some(u) => u,
            None => {
                Validator::validate_grid(f.as_slice(), f.shape())?;
                GridField::zeros_like(f)
            }
        };
        let status = self.fit_in_place(f, &mut u)?;

        Ok(RelaxationResult {
            solution: u,
            status,
        })
    }

    /// Relax `u` in place against the source `f`.
    pub fn fit_in_place(
        &self,
        f: &GridField<T>,
        u: &mut GridField<T>,
    ) -> Result<RelaxationStatus<T>, RelaxationError> {
        Validator::validate_grid(f.as_slice(), f.shape())?;
        Validator::validate_solution(f.shape(), u.as_slice(), u.shape())?;

        self.fit_slices(f.as_slice(), u.as_mut_slice(), f.shape())
    }

    /// Relax flat row-major data in place; `f` and `u` share `shape`.
    pub fn fit_slices(
        &self,
        f: &[T],
        u: &mut [T],
        shape: &[usize],
    ) -> Result<RelaxationStatus<T>, RelaxationError> {
        Validator::validate_grid(f, shape)?;
        Validator::validate_solution(shape, u, shape)?;

        let h = resolve_spacing(self.config.spacing, shape).ok_or(RelaxationError::EmptyGrid)?;
        Validator::validate_spacing(h)?;

        // Configure solve execution
        let config = RelaxationConfig {
            spacing: h,
            max_iterations: self.config.max_iterations,
            tolerance: Some(self.config.tolerance),
            norm_interval: self.config.norm_interval,
            return_history: self.config.return_history,
            final_residual: false,
            // ++++++++++++++++++++++++++++++++++++++
            // +               DEV                  +
            // ++++++++++++++++++++++++++++++++++++++
            custom_sweep_pass: self.config.custom_sweep_pass,
            custom_residual_pass: self.config.custom_residual_pass,
        };

        let output = RelaxationExecutor::run_with_config(f, u, shape, config)?;
        let norm = output
            .residual_norm
            .and_then(|r| r.to_f64())
            .unwrap_or(0.0);

        if output.converged {
            debug!(
                "converged after {} iterations with {:.4e} error",
                output.iterations, norm
            );
        } else {
            debug!(
                "stopped after {} iterations with {:.4e} error",
                output.iterations, norm
            );
            if self.config.require_convergence {
                return Err(RelaxationError::NotConverged {
                    iterations: output.iterations,
                    residual_norm: output
                        .residual_norm
                        .and_then(|r| r.to_f64())
                        .unwrap_or(f64::NAN),
                });
            }
        }

        Ok(RelaxationStatus::from_output(output, h))
    }

    /// Whether this processor was configured for parallel passes.
    pub fn is_parallel(&self) -> bool {
        self.config.parallel.unwrap_or(false)
    }
}
