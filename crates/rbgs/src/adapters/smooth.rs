//! Smooth adapter for a fixed number of red-black sweeps.
//!
//! ## Purpose
//!
//! This module provides the smoothing adapter used inside multigrid cycles:
//! it applies exactly `sweeps` red+black iterations to `U` and never
//! evaluates the residual inside the loop.
//!
//! ## Design notes
//!
//! * **No checks**: The residual is evaluated at most once, after the last
//!   iteration, and only when requested.
//! * **Delegation**: Shares the execution engine with the solve adapter.
//! * **Reuse**: A built processor can be applied to many grids (one per level).
//!
//! ## Invariants
//!
//! * Exactly `sweeps` iterations are performed.
//! * `converged` is always `false` in the reported status.
//!
//! ## Non-goals
//!
//! * This adapter does not restrict or prolong between grid levels.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{ResidualPassFn, SweepPassFn};
use crate::engine::executor::{RelaxationConfig, RelaxationExecutor};
use crate::engine::output::{RelaxationResult, RelaxationStatus};
use crate::engine::validator::Validator;
use crate::math::spacing::resolve_spacing;
use crate::primitives::errors::RelaxationError;
use crate::primitives::grid::GridField;

/// Default number of red+black iterations per smoothing step.
pub const DEFAULT_SWEEPS: usize = 2;

// ============================================================================
// Smooth Builder
// ============================================================================

/// Builder for the fixed-sweep smoothing processor.
#[derive(Debug, Clone)]
pub struct SmoothBuilder<T: Float> {
    /// Grid spacing (`None` for `1 / extent_along_axis_0`)
    pub spacing: Option<T>,

    /// Number of red+black iterations
    pub sweeps: usize,

    /// Whether to evaluate the residual norm after the last iteration
    pub return_residual_norm: bool,

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

impl<T: Float> Default for SmoothBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SmoothBuilder<T> {
    /// Create a new smooth builder with default parameters.
    fn new() -> Self {
        Self {
            spacing: None,
            sweeps: DEFAULT_SWEEPS,
            return_residual_norm: false,
            deferred_error: None,
            custom_sweep_pass: None,
            custom_residual_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the grid spacing.
    pub fn spacing(mut self, h: T) -> Self {
        self.spacing = Some(h);
        self
    }

    /// Set the number of red+black iterations.
    pub fn sweeps(mut self, n: usize) -> Self {
        self.sweeps = n;
        self
    }

    /// Evaluate the residual norm once after the last iteration.
    pub fn return_residual_norm(mut self, enabled: bool) -> Self {
        self.return_residual_norm = enabled;
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

    /// Build the smoothing processor.
    pub fn build(self) -> Result<SmoothRelaxation<T>, RelaxationError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        Validator::validate_no_duplicates(self.duplicate_param)?;

        if let Some(h) = self.spacing {
            Validator::validate_spacing(h)?;
        }

        Ok(SmoothRelaxation { config: self })
    }
}

// ============================================================================
// Smooth Processor
// ============================================================================

/// Fixed-sweep smoothing processor.
#[derive(Debug, Clone)]
pub struct SmoothRelaxation<T: Float> {
    config: SmoothBuilder<T>,
}

impl<T: Float> SmoothRelaxation<T> {
    /// Smooth `u` against the source `f`, returning it in the result.
    pub fn fit(
        &self,
        f: &GridField<T>,
        mut u: GridField<T>,
    ) -> Result<RelaxationResult<T>, RelaxationError> {
        let status = self.fit_in_place(f, &mut u)?;
        Ok(RelaxationResult {
            solution: u,
            status,
        })
    }

    /// Smooth `u` in place against the source `f`.
    pub fn fit_in_place(
        &self,
        f: &GridField<T>,
        u: &mut GridField<T>,
    ) -> Result<RelaxationStatus<T>, RelaxationError> {
        Validator::validate_grid(f.as_slice(), f.shape())?;
        Validator::validate_solution(f.shape(), u.as_slice(), u.shape())?;

        self.fit_slices(f.as_slice(), u.as_mut_slice(), f.shape())
    }

    /// Smooth flat row-major data in place; `f` and `u` share `shape`.
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

        let config = RelaxationConfig {
            spacing: h,
            max_iterations: self.config.sweeps,
            tolerance: None,
            norm_interval: 1,
            return_history: false,
            final_residual: self.config.return_residual_norm,
            custom_sweep_pass: self.config.custom_sweep_pass,
            custom_residual_pass: self.config.custom_residual_pass,
        };

        let output = RelaxationExecutor::run_with_config(f, u, shape, config)?;

        Ok(RelaxationStatus::from_output(output, h))
    }

    /// Whether this processor was configured for parallel passes.
    pub fn is_parallel(&self) -> bool {
        self.config.parallel.unwrap_or(false)
    }
}
