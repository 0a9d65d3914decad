//! Dense row-major grid field storage.
//!
//! ## Purpose
//!
//! This module provides `GridField`, the owned container for the source term
//! `F` and the solution `U`, together with the shape helpers the kernels use
//! for index arithmetic.
//!
//! ## Design notes
//!
//! * **Layout**: Row-major (C order); the last axis is contiguous.
//! * **Any rank**: Rank 0 and rank >= 4 fields are representable so that the
//!   driver can reject them with a proper error instead of a panic.
//! * **Generics**: Storage is generic over `Float` types.
//!
//! ## Invariants
//!
//! * `data.len()` always equals the product of the shape extents.
//! * A rank-0 field holds exactly one element.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec, vec::Vec};
#[cfg(feature = "std")]
use std::{format, vec, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RelaxationError;

// ============================================================================
// Shape Helpers
// ============================================================================

/// Number of elements described by `shape` (1 for rank 0), saturating at
/// `usize::MAX`.
#[inline]
pub fn element_count(shape: &[usize]) -> usize {
    checked_element_count(shape).unwrap_or(usize::MAX)
}

/// Number of elements described by `shape`, or `None` if it overflows `usize`.
#[inline]
pub fn checked_element_count(shape: &[usize]) -> Option<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
}

/// Row-major strides for `shape`, in elements.
pub fn strides(shape: &[usize]) -> Vec<usize> {
    let mut out = vec![1; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        out[axis] = out[axis + 1] * shape[axis + 1];
    }
    out
}

/// Decompose a flat row-major offset into per-axis coordinates.
pub fn unravel(mut flat: usize, shape: &[usize], coords: &mut [usize]) {
    for axis in (0..shape.len()).rev() {
        coords[axis] = flat % shape[axis];
        flat /= shape[axis];
    }
}

/// Whether `coords` lies on the outermost layer along any axis.
#[inline]
pub fn is_boundary(coords: &[usize], shape: &[usize]) -> bool {
    coords
        .iter()
        .zip(shape)
        .any(|(&c, &extent)| c == 0 || c + 1 >= extent)
}

/// Visit the flat offset of every interior point in row-major order.
///
/// Interior means every coordinate lies in `[1, extent - 2]`. Grids with an
/// extent below 3 on any axis (and rank-0 grids) have no interior points.
pub fn for_each_interior<F: FnMut(usize)>(shape: &[usize], mut f: F) {
    let rank = shape.len();
    if rank == 0 || shape.iter().any(|&extent| extent < 3) {
        return;
    }

    let st = strides(shape);
    let mut coords = vec![1; rank];
    let mut flat: usize = st.iter().sum();

    loop {
        f(flat);

        // Odometer advance, last axis fastest
        let mut axis = rank;
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            if coords[axis] + 2 < shape[axis] {
                coords[axis] += 1;
                flat += st[axis];
                break;
            }
            flat -= (coords[axis] - 1) * st[axis];
            coords[axis] = 1;
        }
    }
}

// ============================================================================
// Grid Field
// ============================================================================

/// Dense, mutable, rectangular field of floating-point values.
#[derive(Debug, Clone, PartialEq)]
pub struct GridField<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T: Float> GridField<T> {
    /// Create a zero-filled field of the given shape.
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow if the element count does not fit in
    /// memory. Use [`GridField::from_vec`] to get an error instead.
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            data: vec![T::zero(); element_count(shape)],
        }
    }

    /// Create a zero-filled field with the shape of `other`.
    pub fn zeros_like(other: &Self) -> Self {
        Self::zeros(&other.shape)
    }

    /// Wrap existing row-major data.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self, RelaxationError> {
        let expected = checked_element_count(shape).ok_or_else(|| {
            RelaxationError::InvalidInput(format!("shape {:?} overflows the element count", shape))
        })?;
        if data.len() != expected {
            return Err(RelaxationError::InvalidInput(format!(
                "data length {} does not match shape {:?} ({} elements)",
                data.len(),
                shape,
                expected
            )));
        }
        Ok(Self {
            shape: shape.to_vec(),
            data,
        })
    }

    /// Build a field by evaluating `f` at every coordinate.
    ///
    /// Panics like [`GridField::zeros`] on an overflowing shape.
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let n = element_count(shape);
        let mut coords = vec![0; shape.len()];
        let mut data = Vec::with_capacity(n);
        for flat in 0..n {
            unravel(flat, shape, &mut coords);
            data.push(f(&coords));
        }
        Self {
            shape: shape.to_vec(),
            data,
        }
    }

    /// Extents of the field, slowest axis first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major view of the data.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Flat offset of `coords`, or `None` if out of range or of the wrong rank.
    pub fn offset(&self, coords: &[usize]) -> Option<usize> {
        if coords.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&c, &extent) in coords.iter().zip(&self.shape) {
            if c >= extent {
                return None;
            }
            flat = flat * extent + c;
        }
        Some(flat)
    }

    /// Value at `coords`, or `None` if out of range.
    pub fn get(&self, coords: &[usize]) -> Option<T> {
        self.offset(coords).map(|i| self.data[i])
    }

    /// Mutable reference to the value at `coords`, or `None` if out of range.
    pub fn get_mut(&mut self, coords: &[usize]) -> Option<&mut T> {
        let i = self.offset(coords)?;
        Some(&mut self.data[i])
    }

    /// Set every element, boundary included, to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Consume the field, returning its shape and data.
    pub fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.shape, self.data)
    }
}

impl<T> From<GridField<T>> for Vec<T> {
    fn from(field: GridField<T>) -> Self {
        field.data
    }
}
