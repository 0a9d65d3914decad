//! Input abstractions for grid fields.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for relaxation inputs, allowing
//! `fit` to accept `GridField` values and `ndarray` arrays of any rank
//! through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Provides direct slice access to the underlying buffers.
//! * **Fail-fast validation**: Non-contiguous or non-row-major arrays are
//!   rejected before any processing.
//!
//! ## Key concepts
//!
//! * **GridInput Trait**: Read access to the row-major data and its shape.
//! * **GridInputMut Trait**: Mutable access for in-place relaxation.
//! * **Standard Layout**: The kernels index in C order; arrays must match it.
//!
//! ## Invariants
//!
//! * Returned slices cover every element of the container, in row-major order.
//! * The reported shape describes the returned slice.
//!
//! ## Non-goals
//!
//! * This module does not copy or reorder non-standard layouts.

// External dependencies
use ndarray::{ArrayBase, Data, DataMut, Dimension};
use num_traits::Float;

// Export dependencies from rbgs crate
use rbgs::internals::primitives::errors::RelaxationError;
use rbgs::internals::primitives::grid::GridField;

/// Trait for types that can be read as a dense row-major grid.
pub trait GridInput<T: Float> {
    /// Extents of the grid, slowest axis first.
    fn grid_shape(&self) -> &[usize];

    /// The grid data as a contiguous row-major slice.
    fn as_grid_slice(&self) -> Result<&[T], RelaxationError>;
}

/// Trait for grids that can be relaxed in place.
pub trait GridInputMut<T: Float>: GridInput<T> {
    /// The grid data as a mutable contiguous row-major slice.
    fn as_grid_slice_mut(&mut self) -> Result<&mut [T], RelaxationError>;
}

impl<T: Float> GridInput<T> for GridField<T> {
    fn grid_shape(&self) -> &[usize] {
        self.shape()
    }

    fn as_grid_slice(&self) -> Result<&[T], RelaxationError> {
        Ok(self.as_slice())
    }
}

impl<T: Float> GridInputMut<T> for GridField<T> {
    fn as_grid_slice_mut(&mut self) -> Result<&mut [T], RelaxationError> {
        Ok(self.as_mut_slice())
    }
}

impl<T: Float, S, D> GridInput<T> for ArrayBase<S, D>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    fn grid_shape(&self) -> &[usize] {
        self.shape()
    }

    fn as_grid_slice(&self) -> Result<&[T], RelaxationError> {
        self.as_slice().ok_or_else(non_standard_layout)
    }
}

impl<T: Float, S, D> GridInputMut<T> for ArrayBase<S, D>
where
    S: DataMut<Elem = T>,
    D: Dimension,
{
    fn as_grid_slice_mut(&mut self) -> Result<&mut [T], RelaxationError> {
        self.as_slice_mut().ok_or_else(non_standard_layout)
    }
}

fn non_standard_layout() -> RelaxationError {
    RelaxationError::InvalidInput(
        "ndarray input must be contiguous in standard (row-major) layout".to_string(),
    )
}
