//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive data structures shared by the whole
//! crate: grid storage and error types. It has zero internal dependencies
//! within the crate.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Grid field storage and shape helpers.
pub mod grid;
