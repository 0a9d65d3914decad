//! Layer 5: Engine
//!
//! This layer provides the parallel half-sweep and residual passes that are
//! injected into the `rbgs` execution engine.

// Parallel execution engine using CPU threads
pub mod executor;
