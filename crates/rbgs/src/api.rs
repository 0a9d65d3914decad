//! High-level API for Red-Black Gauss-Seidel relaxation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the relaxation parameters and the selection of an
//! execution adapter (Solve or Smooth).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Execution Adapters**: Solve (tolerance-driven) and Smooth (fixed sweeps).
//! * **Configuration Flow**: Builder pattern ending in `.adapter(Adapter::Type)`.
//! * **Adapter-specific options**: Setting an option the chosen adapter cannot
//!   honour is reported as `UnsupportedFeature` on `.build()`.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`RelaxationBuilder`] via `Relaxation::new()`.
//! 2. Chain configuration methods (`.tolerance()`, `.norm_interval()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Solve)` to get an execution builder.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::smooth::SmoothBuilder;
use crate::adapters::solve::SolveBuilder;
use crate::engine::executor::{ResidualPassFn, SweepPassFn};

// Publicly re-exported types
pub use crate::adapters::smooth::SmoothRelaxation;
pub use crate::adapters::solve::SolveRelaxation;
pub use crate::algorithms::checkerboard::Color;
pub use crate::engine::output::{RelaxationResult, RelaxationStatus};
pub use crate::primitives::errors::RelaxationError;
pub use crate::primitives::grid::GridField;

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Smooth, Solve};
}

/// Fluent builder for configuring relaxation parameters and execution modes.
#[derive(Debug, Clone)]
pub struct RelaxationBuilder<T> {
    /// Grid spacing `h` (default: `1 / extent_along_axis_0`).
    pub spacing: Option<T>,

    /// Iteration cap (Solve only).
    pub max_iterations: Option<usize>,

    /// Residual norm threshold (Solve only).
    pub tolerance: Option<T>,

    /// Iterations between residual evaluations (Solve only).
    pub norm_interval: Option<usize>,

    /// Red+black iterations per call (Smooth only).
    pub sweeps: Option<usize>,

    /// Record every sampled residual norm (Solve only).
    pub return_history: Option<bool>,

    /// Treat exhaustion of the cap as an error (Solve only).
    pub require_convergence: Option<bool>,

    /// Evaluate the residual after the last sweep (Smooth only).
    pub return_residual_norm: Option<bool>,

    // ======================================
    // DEV
    // ======================================
    /// Custom half-sweep function.
    #[doc(hidden)]
    pub custom_sweep_pass: Option<SweepPassFn<T>>,

    /// Custom residual norm function.
    #[doc(hidden)]
    pub custom_residual_pass: Option<ResidualPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for RelaxationBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> RelaxationBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: RelaxationAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            spacing: None,
            max_iterations: None,
            tolerance: None,
            norm_interval: None,
            sweeps: None,
            return_history: None,
            require_convergence: None,
            return_residual_norm: None,
            custom_sweep_pass: None,
            custom_residual_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the uniform grid spacing `h`.
    pub fn spacing(mut self, h: T) -> Self {
        if self.spacing.is_some() {
            self.duplicate_param = Some("spacing");
        }
        self.spacing = Some(h);
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, n: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(n);
        self
    }

    /// Set the residual norm threshold.
    pub fn tolerance(mut self, eps: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(eps);
        self
    }

    /// Set the number of iterations between residual evaluations.
    pub fn norm_interval(mut self, n: usize) -> Self {
        if self.norm_interval.is_some() {
            self.duplicate_param = Some("norm_interval");
        }
        self.norm_interval = Some(n);
        self
    }

    /// Set the number of red+black iterations per smoothing call.
    pub fn sweeps(mut self, n: usize) -> Self {
        if self.sweeps.is_some() {
            self.duplicate_param = Some("sweeps");
        }
        self.sweeps = Some(n);
        self
    }

    /// Include every sampled residual norm in the output.
    pub fn return_history(mut self) -> Self {
        self.return_history = Some(true);
        self
    }

    /// Fail with `NotConverged` when the cap is reached above tolerance.
    pub fn require_convergence(mut self) -> Self {
        self.require_convergence = Some(true);
        self
    }

    /// Evaluate the residual norm once after smoothing.
    pub fn return_residual_norm(mut self) -> Self {
        self.return_residual_norm = Some(true);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom half-sweep function for execution (only for dev)
    #[doc(hidden)]
    pub fn custom_sweep_pass(mut self, pass: SweepPassFn<T>) -> Self {
        self.custom_sweep_pass = Some(pass);
        self
    }

    /// Set a custom residual norm function (only for dev)
    #[doc(hidden)]
    pub fn custom_residual_pass(mut self, pass: ResidualPassFn<T>) -> Self {
        self.custom_residual_pass = Some(pass);
        self
    }

    /// Set parallel execution hint (only for dev)
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait RelaxationAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`RelaxationBuilder`] into a specialized execution builder.
    fn convert(builder: RelaxationBuilder<T>) -> Self::Output;
}

/// Marker for tolerance-driven solving.
#[derive(Debug, Clone, Copy)]
pub struct Solve;

impl<T: Float> RelaxationAdapter<T> for Solve {
    type Output = SolveBuilder<T>;

    fn convert(builder: RelaxationBuilder<T>) -> Self::Output {
        let mut result = SolveBuilder::default();

        if let Some(h) = builder.spacing {
            result.spacing = Some(h);
        }
        if let Some(n) = builder.max_iterations {
            result.max_iterations = n;
        }
        if let Some(eps) = builder.tolerance {
            result.tolerance = eps;
        }
        if let Some(n) = builder.norm_interval {
            result.norm_interval = n;
        }
        if let Some(rh) = builder.return_history {
            result.return_history = rh;
        }
        if let Some(rc) = builder.require_convergence {
            result.require_convergence = rc;
        }

        // Smooth-only options
        if builder.sweeps.is_some() {
            result.deferred_error = Some(RelaxationError::UnsupportedFeature {
                adapter: "Solve",
                feature: "sweeps",
            });
        } else if builder.return_residual_norm.is_some() {
            result.deferred_error = Some(RelaxationError::UnsupportedFeature {
                adapter: "Solve",
                feature: "return_residual_norm",
            });
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(sp) = builder.custom_sweep_pass {
            result.custom_sweep_pass = Some(sp);
        }
        if let Some(rp) = builder.custom_residual_pass {
            result.custom_residual_pass = Some(rp);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for fixed-sweep smoothing.
#[derive(Debug, Clone, Copy)]
pub struct Smooth;

impl<T: Float> RelaxationAdapter<T> for Smooth {
    type Output = SmoothBuilder<T>;

    fn convert(builder: RelaxationBuilder<T>) -> Self::Output {
        let mut result = SmoothBuilder::default();

        if let Some(h) = builder.spacing {
            result.spacing = Some(h);
        }
        if let Some(n) = builder.sweeps {
            result.sweeps = n;
        }
        if let Some(rr) = builder.return_residual_norm {
            result.return_residual_norm = rr;
        }

        // Solve-only options
        let unsupported = [
            ("max_iterations", builder.max_iterations.is_some()),
            ("tolerance", builder.tolerance.is_some()),
            ("norm_interval", builder.norm_interval.is_some()),
            ("return_history", builder.return_history.is_some()),
            ("require_convergence", builder.require_convergence.is_some()),
        ];
        if let Some(&(feature, _)) = unsupported.iter().find(|(_, set)| *set) {
            result.deferred_error = Some(RelaxationError::UnsupportedFeature {
                adapter: "Smooth",
                feature,
            });
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(sp) = builder.custom_sweep_pass {
            result.custom_sweep_pass = Some(sp);
        }
        if let Some(rp) = builder.custom_residual_pass {
            result.custom_residual_pass = Some(rp);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
