//! Input validation for relaxation configuration and grid data.
//!
//! ## Purpose
//!
//! This module provides the validation functions run before any sweep:
//! grid rank and shape agreement, spacing, tolerance and check interval.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Ordering**: Rank is checked first, so a rank-0 or rank-4 field is
//!   always reported as `UnsupportedRank` whatever else is wrong with it.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * Validation is deterministic and side-effect free.
//! * No field data is read beyond its length.
//!
//! ## Non-goals
//!
//! * This module does not check field values for NaN or infinity.
//! * This module does not allocate or initialize the solution field.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RelaxationError;
use crate::primitives::grid::checked_element_count;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for relaxation configuration and grid data.
///
/// All methods return `Result<(), RelaxationError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Grid Validation
    // ========================================================================

    /// Validate that the rank is 1, 2 or 3.
    pub fn validate_rank(rank: usize) -> Result<(), RelaxationError> {
        if !(1..=3).contains(&rank) {
            return Err(RelaxationError::UnsupportedRank { rank });
        }
        Ok(())
    }

    /// Validate a source field: supported rank, non-empty extents, matching data length.
    pub fn validate_grid<T: Float>(data: &[T], shape: &[usize]) -> Result<(), RelaxationError> {
        // Check 1: Supported rank
        Self::validate_rank(shape.len())?;

        // Check 2: Non-empty extents
        if shape.contains(&0) {
            return Err(RelaxationError::EmptyGrid);
        }

        // Check 3: Data covers the shape exactly
        let expected = Self::element_count(shape)?;
        if data.len() != expected {
            return Err(RelaxationError::InvalidInput(format!(
                "field has {} values but shape {:?} needs {}",
                data.len(),
                shape,
                expected
            )));
        }

        Ok(())
    }

    /// Validate that the solution field has the shape of the source field.
    pub fn validate_solution<T: Float>(
        f_shape: &[usize],
        u: &[T],
        u_shape: &[usize],
    ) -> Result<(), RelaxationError> {
        if f_shape != u_shape {
            return Err(RelaxationError::ShapeMismatch {
                expected: f_shape.to_vec(),
                got: u_shape.to_vec(),
            });
        }
        let expected = Self::element_count(u_shape)?;
        if u.len() != expected {
            return Err(RelaxationError::InvalidInput(format!(
                "solution has {} values but shape {:?} needs {}",
                u.len(),
                u_shape,
                expected
            )));
        }
        Ok(())
    }

    /// Element count of `shape`, rejecting extents whose product overflows.
    fn element_count(shape: &[usize]) -> Result<usize, RelaxationError> {
        checked_element_count(shape).ok_or_else(|| {
            RelaxationError::InvalidInput(format!("shape {:?} overflows the element count", shape))
        })
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the grid spacing.
    pub fn validate_spacing<T: Float>(h: T) -> Result<(), RelaxationError> {
        if !h.is_finite() || h <= T::zero() {
            return Err(RelaxationError::InvalidSpacing(
                h.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the convergence threshold.
    ///
    /// Zero is accepted: the loop then only stops on an exact solution or
    /// the iteration cap.
    pub fn validate_tolerance<T: Float>(eps: T) -> Result<(), RelaxationError> {
        if !eps.is_finite() || eps < T::zero() {
            return Err(RelaxationError::InvalidTolerance(
                eps.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the residual check interval.
    pub fn validate_norm_interval(norm_interval: usize) -> Result<(), RelaxationError> {
        if norm_interval == 0 {
            return Err(RelaxationError::InvalidNormInterval(norm_interval));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), RelaxationError> {
        if let Some(param) = duplicate_param {
            return Err(RelaxationError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
