//! Execution engine for Red-Black Gauss-Seidel relaxation.
//!
//! ## Purpose
//!
//! This module provides the relaxation driver: it selects the sweep kernel
//! for the grid's rank, runs red and black half-sweeps in strict alternation,
//! samples the residual norm every `norm_interval` iterations and stops on
//! tolerance or on the iteration cap.
//!
//! ## Design notes
//!
//! * **Single dispatch**: The kernel is chosen once per run, not per sweep.
//! * **Sampled convergence**: The residual is only evaluated on iterations
//!   that are multiples of `norm_interval`, trading detection latency for speed.
//! * **Hooks**: Sweep and residual passes can be replaced by extension crates
//!   (parallel execution) through plain function pointers.
//! * **In-place**: `U` is the only buffer mutated; no scratch survives an iteration.
//! * **Generics**: Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! * **Iteration**: One red half-sweep immediately followed by one black half-sweep.
//! * **Solve mode**: Runs until `‖F − A·U‖₂ <= tolerance` or `max_iterations`.
//! * **Smooth mode**: Runs exactly `max_iterations` iterations without checks.
//!
//! ## Invariants
//!
//! * The iteration counter is strictly increasing and never exceeds `max_iterations`.
//! * The red half-sweep of an iteration completes before its black half-sweep.
//! * `h²` is computed once per run.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`); it
//!   only guards the norm interval of convergence-driven runs.
//! * This module does not allocate the solution field (handled by adapters).
//! * This module does not log (handled by adapters).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::checkerboard::Color;
use crate::algorithms::sweep::SweepKernel;
use crate::engine::validator::Validator;
use crate::math::poisson::residual_norm;
use crate::primitives::errors::RelaxationError;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for custom half-sweep function
#[doc(hidden)]
pub type SweepPassFn<T> = fn(
    Color,    // color to update
    &[T],     // f
    &mut [T], // u
    &[usize], // shape
    T,        // h2
);

/// Signature for custom residual norm function
#[doc(hidden)]
pub type ResidualPassFn<T> = fn(
    &[T],     // f
    &[T],     // u
    &[usize], // shape
    T,        // h
) -> T; // ‖F − A·U‖₂

/// Output from relaxation execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOutput<T> {
    /// Number of iterations performed.
    pub iterations: usize,

    /// Last sampled residual norm (`None` if it was never evaluated).
    pub residual_norm: Option<T>,

    /// Whether the residual reached the tolerance.
    pub converged: bool,

    /// Every sampled residual norm, in order (if requested).
    pub residual_history: Option<Vec<T>>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for relaxation execution.
#[derive(Debug, Clone)]
pub struct RelaxationConfig<T> {
    /// Grid spacing, already resolved and validated.
    pub spacing: T,

    /// Iteration cap (solve mode) or exact iteration count (smooth mode).
    pub max_iterations: usize,

    /// Convergence threshold. `None` selects smooth mode.
    pub tolerance: Option<T>,

    /// Period, in iterations, between residual evaluations.
    pub norm_interval: usize,

    /// Record every sampled residual norm.
    pub return_history: bool,

    /// Evaluate the residual once after the last iteration (smooth mode).
    pub final_residual: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom half-sweep function (enables parallel execution).
    #[doc(hidden)]
    pub custom_sweep_pass: Option<SweepPassFn<T>>,

    /// Custom residual norm function.
    #[doc(hidden)]
    pub custom_residual_pass: Option<ResidualPassFn<T>>,
}

impl<T: Float> Default for RelaxationConfig<T> {
    fn default() -> Self {
        Self {
            spacing: T::one(),
            max_iterations: 10_000_000,
            tolerance: T::from(1e-8),
            norm_interval: 1000,
            return_history: false,
            final_residual: false,
            custom_sweep_pass: None,
            custom_residual_pass: None,
        }
    }
}

/// Unified executor for relaxation runs.
#[derive(Debug, Clone)]
pub struct RelaxationExecutor<T: Float> {
    /// Grid spacing.
    pub spacing: T,

    /// Iteration cap.
    pub max_iterations: usize,

    /// Convergence threshold (`None` disables residual checks).
    pub tolerance: Option<T>,

    /// Residual check period.
    pub norm_interval: usize,

    /// Record sampled residual norms.
    pub return_history: bool,

    /// Evaluate the residual after the last iteration when not checking.
    pub final_residual: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom half-sweep function.
    #[doc(hidden)]
    pub custom_sweep_pass: Option<SweepPassFn<T>>,

    /// Custom residual norm function.
    #[doc(hidden)]
    pub custom_residual_pass: Option<ResidualPassFn<T>>,
}

impl<T: Float> Default for RelaxationExecutor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> RelaxationExecutor<T> {
    // ========================================================================
    // Constructor and Builder Methods
    // ========================================================================

    /// Create a new executor with default parameters.
    pub fn new() -> Self {
        Self::from_config(&RelaxationConfig::default())
    }

    /// Create a new executor from a `RelaxationConfig`.
    pub fn from_config(config: &RelaxationConfig<T>) -> Self {
        Self {
            spacing: config.spacing,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            norm_interval: config.norm_interval,
            return_history: config.return_history,
            final_residual: config.final_residual,
            custom_sweep_pass: config.custom_sweep_pass,
            custom_residual_pass: config.custom_residual_pass,
        }
    }

    /// Set the grid spacing.
    pub fn spacing(mut self, h: T) -> Self {
        self.spacing = h;
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Set the convergence threshold (`None` for smooth mode).
    pub fn tolerance(mut self, eps: Option<T>) -> Self {
        self.tolerance = eps;
        self
    }

    /// Set the residual check period.
    pub fn norm_interval(mut self, n: usize) -> Self {
        self.norm_interval = n;
        self
    }

    /// Record every sampled residual norm.
    pub fn return_history(mut self, enabled: bool) -> Self {
        self.return_history = enabled;
        self
    }

    /// Evaluate the residual once after the last iteration.
    pub fn final_residual(mut self, enabled: bool) -> Self {
        self.final_residual = enabled;
        self
    }

    /// Set a custom half-sweep function.
    #[doc(hidden)]
    pub fn custom_sweep_pass(mut self, pass: Option<SweepPassFn<T>>) -> Self {
        self.custom_sweep_pass = pass;
        self
    }

    /// Set a custom residual norm function.
    #[doc(hidden)]
    pub fn custom_residual_pass(mut self, pass: Option<ResidualPassFn<T>>) -> Self {
        self.custom_residual_pass = pass;
        self
    }

    // ========================================================================
    // Main Entry Points
    // ========================================================================

    /// Relax `u` in place using a `RelaxationConfig` payload.
    pub fn run_with_config(
        f: &[T],
        u: &mut [T],
        shape: &[usize],
        config: RelaxationConfig<T>,
    ) -> Result<ExecutorOutput<T>, RelaxationError> {
        RelaxationExecutor::from_config(&config).run(f, u, shape)
    }

    /// Relax `u` in place against source `f` on a grid of the given shape.
    ///
    /// Fails if the rank has no sweep kernel or if a convergence-driven run
    /// has a zero norm interval; every other precondition is the caller's
    /// responsibility.
    pub fn run(
        &self,
        f: &[T],
        u: &mut [T],
        shape: &[usize],
    ) -> Result<ExecutorOutput<T>, RelaxationError> {
        let kernel = SweepKernel::for_rank(shape.len())?;
        if self.tolerance.is_some() {
            Validator::validate_norm_interval(self.norm_interval)?;
        }

        Ok(match self.tolerance {
            Some(eps) => self.relaxation_loop(kernel, f, u, shape, eps),
            None => self.smoothing_loop(kernel, f, u, shape),
        })
    }

    /// Run until the sampled residual norm drops to `eps` or the cap is hit.
    pub fn relaxation_loop(
        &self,
        kernel: SweepKernel,
        f: &[T],
        u: &mut [T],
        shape: &[usize],
        eps: T,
    ) -> ExecutorOutput<T> {
        let h2 = self.spacing * self.spacing;
        let mut history = self.return_history.then(Vec::new);
        let mut norm = None;
        let mut converged = false;
        let mut it = 0;

        while it < self.max_iterations {
            it += 1;

            // Sample convergence every `norm_interval` iterations
            if it % self.norm_interval == 0 {
                let r = self.residual(f, u, shape);
                norm = Some(r);
                if let Some(h) = history.as_mut() {
                    h.push(r);
                }
                if r <= eps {
                    converged = true;
                    break;
                }
            }

            self.iteration(kernel, f, u, shape, h2);
        }

        ExecutorOutput {
            iterations: it,
            residual_norm: norm,
            converged,
            residual_history: history,
        }
    }

    /// Run exactly `max_iterations` iterations without residual checks.
    pub fn smoothing_loop(
        &self,
        kernel: SweepKernel,
        f: &[T],
        u: &mut [T],
        shape: &[usize],
    ) -> ExecutorOutput<T> {
        let h2 = self.spacing * self.spacing;

        for _ in 0..self.max_iterations {
            self.iteration(kernel, f, u, shape, h2);
        }

        let norm = self.final_residual.then(|| self.residual(f, u, shape));

        ExecutorOutput {
            iterations: self.max_iterations,
            residual_norm: norm,
            converged: false,
            residual_history: if self.return_history {
                Some(norm.into_iter().collect())
            } else {
                None
            },
        }
    }

    // ========================================================================
    // Passes
    // ========================================================================

    /// One red half-sweep followed by one black half-sweep.
    #[inline]
    fn iteration(&self, kernel: SweepKernel, f: &[T], u: &mut [T], shape: &[usize], h2: T) {
        for color in Color::SWEEP_ORDER {
            match self.custom_sweep_pass {
                Some(pass) => pass(color, f, u, shape, h2),
                None => kernel.sweep(color, f, u, shape, h2),
            }
        }
    }

    /// Residual norm through the custom pass if one is installed.
    #[inline]
    fn residual(&self, f: &[T], u: &[T], shape: &[usize]) -> T {
        match self.custom_residual_pass {
            Some(pass) => pass(f, u, shape, self.spacing),
            None => residual_norm(f, u, shape, self.spacing),
        }
    }
}
