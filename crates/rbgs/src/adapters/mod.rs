//! Layer 5: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing processors that adapt the engine layer for
//! the two ways a relaxation is used:
//!
//! - **Solve**: Iterate until the residual reaches a tolerance
//! - **Smooth**: Apply a fixed number of sweeps (multigrid smoother)
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Convergence-driven solve adapter.
pub mod solve;

/// Fixed-sweep smoothing adapter.
pub mod smooth;
