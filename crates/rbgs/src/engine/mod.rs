//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the relaxation by coordinating the sweep kernels
//! (algorithms) with the residual evaluation (math). It provides the main
//! iteration loop and convergence detection.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Relaxation driver.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for relaxation runs.
pub mod output;
