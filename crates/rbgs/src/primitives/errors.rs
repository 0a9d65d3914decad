//! Error types for relaxation operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while configuring
//! or running a Red-Black Gauss-Seidel relaxation, including grid validation,
//! parameter constraints and the optional strict convergence mode.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected shapes).
//! * **Deferred**: Duplicate builder parameters are recorded and reported on `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic payloads.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Grid validation**: Unsupported rank, mismatched shapes, empty extents.
//! 2. **Parameter validation**: Invalid spacing, tolerance or check interval.
//! 3. **Convergence**: Reported as an error only when strict mode was requested.
//!
//! ## Invariants
//!
//! * Every fatal condition is raised before the first sweep touches `U`.
//! * Numeric values in errors are widened to `f64` for display.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not detect NaN or overflow produced inside the iteration loop.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for relaxation operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RelaxationError {
    /// The source field has a rank other than 1, 2 or 3.
    UnsupportedRank {
        /// Rank of the rejected field.
        rank: usize,
    },

    /// The supplied solution field does not have the shape of the source field.
    ShapeMismatch {
        /// Shape of the source field `F`.
        expected: Vec<usize>,
        /// Shape of the supplied solution field `U`.
        got: Vec<usize>,
    },

    /// At least one axis of the grid has zero extent.
    EmptyGrid,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// Grid spacing must be positive and finite.
    InvalidSpacing(f64),

    /// Convergence threshold must be non-negative and finite.
    InvalidTolerance(f64),

    /// The residual check interval must be at least one iteration.
    InvalidNormInterval(usize),

    /// The iteration budget was exhausted before the residual reached the threshold.
    ///
    /// Only returned when strict convergence was requested.
    NotConverged {
        /// Number of iterations performed.
        iterations: usize,
        /// Last sampled residual norm.
        residual_norm: f64,
    },

    /// Selected adapter does not support the requested feature.
    UnsupportedFeature {
        /// Name of the adapter (e.g., "Smooth").
        adapter: &'static str,
        /// Name of the unsupported feature.
        feature: &'static str,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for RelaxationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::UnsupportedRank { rank } => {
                write!(f, "Unsupported grid rank: {rank} (must be 1, 2 or 3)")
            }
            Self::ShapeMismatch { expected, got } => {
                write!(f, "Shape mismatch: F has shape {expected:?}, U has {got:?}")
            }
            Self::EmptyGrid => write!(f, "Grid has an axis of zero extent"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::InvalidSpacing(h) => {
                write!(f, "Invalid grid spacing: {h} (must be > 0 and finite)")
            }
            Self::InvalidTolerance(eps) => {
                write!(f, "Invalid tolerance: {eps} (must be >= 0 and finite)")
            }
            Self::InvalidNormInterval(n) => {
                write!(f, "Invalid norm interval: {n} (must be at least 1)")
            }
            Self::NotConverged {
                iterations,
                residual_norm,
            } => {
                write!(
                    f,
                    "Did not converge: residual norm {residual_norm} after {iterations} iterations"
                )
            }
            Self::UnsupportedFeature { adapter, feature } => {
                write!(f, "Adapter '{adapter}' does not support feature: {feature}")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for RelaxationError {}
