//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the core relaxation algorithms:
//! - Checkerboard coloring of grid points
//! - Rank-specialized red-black sweep kernels
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Red/black color classes.
pub mod checkerboard;

/// Stencil sweep kernels.
pub mod sweep;
