//! Checkerboard coloring of grid points.
//!
//! ## Purpose
//!
//! This module defines the two color classes of the red-black ordering and
//! the parity rule that assigns each grid point to exactly one of them.
//!
//! ## Key concepts
//!
//! * **Parity**: A point at integer coordinates `idx` is red when
//!   `sum(idx)` is odd and black when it is even.
//! * **Independence**: Every orthogonal neighbour of a point has the opposite
//!   color, so the updates of one half-sweep never read each other's output.
//!
//! ## Invariants
//!
//! * `Color::Black.parity() == 0` and `Color::Red.parity() == 1`.
//! * Red and black partition the interior of every grid.

// External dependencies
use core::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::primitives::grid::{element_count, is_boundary, unravel};

// ============================================================================
// Color
// ============================================================================

/// Checkerboard color class of a grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Points whose coordinate sum is even.
    Black,

    /// Points whose coordinate sum is odd.
    Red,
}

impl Color {
    /// Both colors in the order one iteration visits them.
    pub const SWEEP_ORDER: [Color; 2] = [Color::Red, Color::Black];

    /// Parity bit of this color (black = 0, red = 1).
    #[inline]
    pub fn parity(self) -> usize {
        match self {
            Self::Black => 0,
            Self::Red => 1,
        }
    }

    /// Color with the given parity bit (only the lowest bit is used).
    #[inline]
    pub fn from_parity(bit: usize) -> Self {
        if bit & 1 == 0 {
            Self::Black
        } else {
            Self::Red
        }
    }

    /// Color of the point at `coords`.
    #[inline]
    pub fn of(coords: &[usize]) -> Self {
        Self::from_parity(coords.iter().sum())
    }

    /// The other color.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Black => Self::Red,
            Self::Red => Self::Black,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::Red => write!(f, "red"),
        }
    }
}

// ============================================================================
// Enumeration
// ============================================================================

/// Count the interior points of `shape` that carry `color`.
///
/// This walks the grid point by point and is meant for verification, not for
/// the hot path.
pub fn count_interior(shape: &[usize], color: Color) -> usize {
    let mut coords = [0usize; 8];
    if shape.is_empty() || shape.len() > coords.len() {
        return 0;
    }
    let coords = &mut coords[..shape.len()];
    (0..element_count(shape))
        .filter(|&flat| {
            unravel(flat, shape, coords);
            !is_boundary(coords, shape) && Color::of(coords) == color
        })
        .count()
}
