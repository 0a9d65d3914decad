//! Layer 6: Adapters
//!
//! This layer wraps the `rbgs` adapters with parallel execution and
//! `ndarray` input support:
//!
//! - **Solve**: Convergence-driven relaxation
//! - **Smooth**: Fixed number of sweeps for multigrid smoothing

// Convergence-driven relaxation.
pub mod solve;

// Fixed-sweep smoothing.
pub mod smooth;
