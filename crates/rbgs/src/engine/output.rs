//! Output types and result structures for relaxation runs.
//!
//! ## Purpose
//!
//! This module defines `RelaxationResult`, which hands the relaxed solution
//! field back to the caller together with the run's `RelaxationStatus`
//! (iteration count, last residual norm, convergence flag).
//!
//! ## Design notes
//!
//! * **Ownership**: The solution is moved into the result; no copy of `U` is made.
//! * **Container-agnostic**: The solution type is a parameter so extension
//!   crates can return their own array types.
//! * **Ergonomics**: Implements `Display` for a human-readable summary.
//!
//! ## Invariants
//!
//! * `iterations` never exceeds the configured cap.
//! * `converged` implies `residual_norm` is `Some` and at most the tolerance.
//! * If present, the last entry of `residual_history` equals `residual_norm`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::ExecutorOutput;
use crate::primitives::grid::GridField;

// ============================================================================
// Status
// ============================================================================

/// Convergence report of a relaxation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationStatus<T> {
    /// Number of red+black iterations performed.
    pub iterations: usize,

    /// Last sampled residual norm `‖F − A·U‖₂` (`None` if never evaluated).
    pub residual_norm: Option<T>,

    /// Whether the residual norm reached the tolerance.
    pub converged: bool,

    /// Every sampled residual norm, in order (if requested).
    pub residual_history: Option<Vec<T>>,

    /// Grid spacing the run used.
    pub spacing: T,
}

impl<T: Float> RelaxationStatus<T> {
    /// Assemble the status from executor output and the spacing in use.
    pub fn from_output(output: ExecutorOutput<T>, spacing: T) -> Self {
        Self {
            iterations: output.iterations,
            residual_norm: output.residual_norm,
            converged: output.converged,
            residual_history: output.residual_history,
            spacing,
        }
    }

    /// Number of residual evaluations recorded (0 without history).
    pub fn checks(&self) -> usize {
        self.residual_history.as_ref().map_or(0, Vec::len)
    }
}

// ============================================================================
// Result Structure
// ============================================================================

/// Relaxed solution field plus its convergence status.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationResult<T, S = GridField<T>> {
    /// The solution field `U`, relaxed in place.
    pub solution: S,

    /// How the run ended.
    pub status: RelaxationStatus<T>,
}

impl<T: Float, S> RelaxationResult<T, S> {
    /// Whether the residual norm reached the tolerance.
    pub fn converged(&self) -> bool {
        self.status.converged
    }

    /// Number of iterations performed.
    pub fn iterations(&self) -> usize {
        self.status.iterations
    }

    /// Last sampled residual norm.
    pub fn residual_norm(&self) -> Option<T> {
        self.status.residual_norm
    }

    /// Convert the solution container, keeping the status.
    pub fn map_solution<R, F>(self, f: F) -> RelaxationResult<T, R>
    where
        F: FnOnce(S) -> R,
    {
        RelaxationResult {
            solution: f(self.solution),
            status: self.status,
        }
    }

    /// Split into solution and status.
    pub fn into_parts(self) -> (S, RelaxationStatus<T>) {
        (self.solution, self.status)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for RelaxationStatus<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Iterations:    {}", self.iterations)?;
        writeln!(f, "  Grid spacing:  {}", self.spacing)?;

        match self.residual_norm {
            Some(norm) => writeln!(f, "  Residual norm: {}", norm)?,
            None => writeln!(f, "  Residual norm: not evaluated")?,
        }
        writeln!(
            f,
            "  Converged:     {}",
            if self.converged { "yes" } else { "no" }
        )?;

        if let Some(history) = &self.residual_history {
            writeln!(f)?;
            writeln!(f, "Residual History:")?;
            writeln!(f, "{:>8} {:>14}", "Check", "Norm")?;
            writeln!(f, "{:-<23}", "")?;

            // Show first 5 and last 5 if there are many checks
            let n = history.len();
            for (i, norm) in history.iter().enumerate() {
                if n > 10 && i == 5 {
                    writeln!(f, "{:>8}", "...")?;
                }
                if n > 10 && (5..n - 5).contains(&i) {
                    continue;
                }
                writeln!(f, "{:>8} {:>14.6}", i + 1, norm)?;
            }
        }

        Ok(())
    }
}

impl<T: Float + Display + Debug, S> Display for RelaxationResult<T, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.status)
    }
}
