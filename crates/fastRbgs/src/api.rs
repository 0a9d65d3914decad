//! High-level API for red-black relaxation with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for the parallel
//! crate. It reuses the `rbgs` fluent builder and swaps in adapters whose
//! half-sweeps run on all available CPU cores.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `rbgs` builder pattern.
//! * **Parallel-First**: Both adapters default to parallel execution.
//! * **Transparent**: Marker types (Solve, Smooth) select the parallel builders.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`RelaxationBuilder`] via `Relaxation::new()`.
//! 2. Chain configuration methods (`.tolerance()`, `.norm_interval()`, etc.).
//! 3. Select an adapter via `.adapter(Solve)` to get a parallel execution builder.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::smooth::ParallelSmoothBuilder;
use crate::adapters::solve::ParallelSolveBuilder;

// Import base marker types for delegation
use rbgs::internals::api::Smooth as BaseSmooth;
use rbgs::internals::api::Solve as BaseSolve;

// Publicly re-exported types
pub use crate::input::{GridInput, GridInputMut};
pub use rbgs::internals::algorithms::checkerboard::Color;
pub use rbgs::internals::api::{RelaxationAdapter, RelaxationBuilder};
pub use rbgs::internals::engine::output::{RelaxationResult, RelaxationStatus};
pub use rbgs::internals::primitives::errors::RelaxationError;
pub use rbgs::internals::primitives::grid::GridField;

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Smooth, Solve};
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel tolerance-driven solving.
#[derive(Debug, Clone, Copy)]
pub struct Solve;

impl<T: Float> RelaxationAdapter<T> for Solve {
    type Output = ParallelSolveBuilder<T>;

    fn convert(builder: RelaxationBuilder<T>) -> Self::Output {
        // User choice, parallel by default
        let parallel = builder.parallel.unwrap_or(true);

        let mut base = <BaseSolve as RelaxationAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        ParallelSolveBuilder { base }
    }
}

/// Marker for parallel fixed-sweep smoothing.
#[derive(Debug, Clone, Copy)]
pub struct Smooth;

impl<T: Float> RelaxationAdapter<T> for Smooth {
    type Output = ParallelSmoothBuilder<T>;

    fn convert(builder: RelaxationBuilder<T>) -> Self::Output {
        let parallel = builder.parallel.unwrap_or(true);

        let mut base = <BaseSmooth as RelaxationAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        ParallelSmoothBuilder { base }
    }
}
