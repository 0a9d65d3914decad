//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the relaxation:
//! - Euclidean norms
//! - The discrete Poisson operator and its residual
//! - Grid spacing defaults
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Euclidean norms.
pub mod norm;

/// Discrete Laplacian and residual evaluation.
pub mod poisson;

/// Grid spacing defaults.
pub mod spacing;
