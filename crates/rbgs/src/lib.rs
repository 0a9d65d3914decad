//! # rbgs (Red-Black Gauss-Seidel relaxation)
//!
//! Iterative solver and smoother for the discretized Poisson equation
//! `A·U = F` on regular 1D, 2D and 3D grids, using the Red-Black
//! (checkerboard) ordering of the Gauss-Seidel method.
//!
//! ## What is Red-Black Gauss-Seidel?
//!
//! Grid points are colored by the parity of their coordinate sum. Every
//! neighbour of a red point is black and vice versa, so all points of one
//! color can be updated from the current values of the other color in any
//! order. One iteration updates every red interior point, then every black
//! interior point; the outermost layer holds fixed boundary values and is
//! never written. The method is commonly used on its own or as the smoother
//! of a multigrid cycle.
//!
//! ## Quick Start
//!
//! ### Solving
//!
//! ```rust
//! use rbgs::prelude::*;
//!
//! // Boundary values 0 and 1 on a line of 5 points, no source term
//! let f = GridField::<f64>::zeros(&[5]);
//! let u = GridField::from_vec(&[5], vec![0.0, 0.0, 0.0, 0.0, 1.0])?;
//!
//! let solver = Relaxation::new()
//!     .tolerance(1e-6)        // Stop when ‖F − A·U‖₂ <= 1e-6
//!     .norm_interval(10)      // Measure every 10 iterations
//!     .adapter(Solve)
//!     .build()?;
//!
//! let result = solver.fit(&f, Some(u))?;
//!
//! assert!(result.converged());
//! println!("{}", result);
//! # Result::<(), RelaxationError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Iterations:    30
//!   Grid spacing:  0.2
//!   Residual norm: 0.00000003292722539913596
//!   Converged:     yes
//! ```
//!
//! ### Smoothing
//!
//! ```rust
//! use rbgs::prelude::*;
//!
//! let f = GridField::<f64>::from_fn(&[17, 17], |idx| (idx[0] * idx[1]) as f64);
//! let u = GridField::zeros_like(&f);
//!
//! // Two red+black iterations, as a multigrid pre-smoother would do
//! let smoother = Relaxation::new()
//!     .sweeps(2)
//!     .return_residual_norm()
//!     .adapter(Smooth)
//!     .build()?;
//!
//! let result = smoother.fit(&f, u)?;
//! assert_eq!(result.iterations(), 2);
//! # Result::<(), RelaxationError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `fit` returns `Result<RelaxationResult<T>, RelaxationError>`. All input
//! errors (unsupported rank, shape mismatch, invalid spacing) are reported
//! before the solution field is touched. Reaching the iteration cap is not an
//! error unless `.require_convergence()` was requested:
//!
//! ```rust
//! use rbgs::prelude::*;
//!
//! let f = GridField::<f64>::zeros(&[9]);
//! let u = GridField::from_fn(&[9], |idx| if idx[0] == 8 { 1.0 } else { 0.0 });
//!
//! let solver = Relaxation::new()
//!     .max_iterations(5)
//!     .norm_interval(1)
//!     .require_convergence()
//!     .adapter(Solve)
//!     .build()?;
//!
//! match solver.fit(&f, Some(u)) {
//!     Ok(result) => println!("converged: {}", result.converged()),
//!     Err(RelaxationError::NotConverged { iterations, .. }) => {
//!         assert_eq!(iterations, 5);
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Result::<(), RelaxationError>::Ok(())
//! ```
//!
//! ## Logging
//!
//! The crate emits one `debug` record per solve through the [`log`] facade.
//! No logger is installed; wire up any `log` backend to see it.
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! Disable default features to remove the standard library dependency
//! (`alloc` is still required):
//!
//! ```toml
//! [dependencies]
//! rbgs = { version = "0.1", default-features = false }
//! ```
//!
//! ## References
//!
//! - Briggs, W. L., Henson, V. E., McCormick, S. F. (2000). "A Multigrid Tutorial", 2nd ed.
//! - Trottenberg, U., Oosterlee, C. W., Schüller, A. (2001). "Multigrid"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - error types and grid storage.
mod primitives;

// Layer 2: Math - Poisson operator and norms.
mod math;

// Layer 3: Algorithms - checkerboard coloring and sweep kernels.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
mod engine;

// Layer 5: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for relaxation.
mod api;

// Standard rbgs prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Smooth, Solve},
        Color, GridField, RelaxationBuilder as Relaxation, RelaxationError, RelaxationResult,
        RelaxationStatus,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
