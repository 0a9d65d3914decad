//! # fastRbgs (parallel Red-Black Gauss-Seidel relaxation)
//!
//! Multi-threaded front end for the [`rbgs`] crate. It relaxes the discrete
//! Poisson equation `A·U = F` on 1D, 2D and 3D grids with the same
//! red-black ordering, splitting every half-sweep across CPU cores with
//! `rayon`, and accepts `ndarray` arrays directly.
//!
//! ## Why parallel red-black?
//!
//! In a red-black half-sweep every updated point reads only points of the
//! other colour, so all updates of one colour are independent. The parallel
//! passes therefore produce exactly the same numbers as the sequential
//! kernels in `rbgs`; only the wall-clock time changes.
//!
//! ## Quick Start
//!
//! ### Solving with ndarray
//!
//! ```rust
//! use fastRbgs::prelude::*;
//! use ndarray::Array2;
//!
//! let n = 33;
//! let f = Array2::<f64>::zeros((n, n));
//!
//! // Hot edge along the last row, cold elsewhere
//! let mut u = Array2::<f64>::zeros((n, n));
//! for j in 0..n {
//!     u[[n - 1, j]] = 1.0;
//! }
//!
//! let solver = Relaxation::<f64>::new()
//!     .tolerance(1e-3)       // Stop once ‖F − A·U‖₂ ≤ 1e-3
//!     .norm_interval(50)     // Check every 50 iterations
//!     .adapter(Solve)        // Parallel by default
//!     .build()?;
//!
//! let status = solver.fit_in_place(&f, &mut u)?;
//!
//! assert!(status.converged);
//! assert_eq!(u[[n - 1, n / 2]], 1.0);
//! println!("{}", status);
//! # Result::<(), RelaxationError>::Ok(())
//! ```
//!
//! ### Smoothing a multigrid level
//!
//! ```rust
//! use fastRbgs::prelude::*;
//! use ndarray::ArrayD;
//!
//! let f = ArrayD::<f64>::zeros(vec![17, 17, 17]);
//! let u = ArrayD::<f64>::from_elem(vec![17, 17, 17], 0.5);
//!
//! let smoother = Relaxation::<f64>::new()
//!     .sweeps(3)
//!     .return_residual_norm()
//!     .adapter(Smooth)
//!     .build()?;
//!
//! let result = smoother.fit(&f, u)?;
//! assert_eq!(result.iterations(), 3);
//! assert!(result.residual_norm().is_some());
//! # Result::<(), RelaxationError>::Ok(())
//! ```
//!
//! ### Sequential execution
//!
//! Use `.parallel(false)` to run the sequential `rbgs` kernels through the
//! same API, for example when the caller already parallelises over grids.
//!
//! ```rust
//! use fastRbgs::prelude::*;
//!
//! let solver = Relaxation::<f64>::new()
//!     .parallel(false)
//!     .adapter(Solve)
//!     .build()?;
//! assert!(!solver.is_parallel());
//! # Result::<(), RelaxationError>::Ok(())
//! ```
//!
//! ## Input layout
//!
//! `ndarray` inputs must be in standard (row-major, contiguous) layout.
//! Transposed or sliced views are rejected with
//! [`RelaxationError::InvalidInput`](crate::prelude::RelaxationError::InvalidInput);
//! call `as_standard_layout()` first to relax them.
//!
//! ## Feature flags
//!
//! - **`cpu`** (default): parallel passes via `rayon`. Without it the
//!   adapters run the sequential kernels.
//! - **`dev`**: exposes the `internals` module for testing.

#![allow(non_snake_case)]

// Layer 5: Engine - parallel relaxation passes.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API.
mod api;

// Input data handling.
mod input;

// Standard fastRbgs prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Smooth, Solve},
        Color, GridField, GridInput, GridInputMut, RelaxationBuilder as Relaxation,
        RelaxationError, RelaxationResult, RelaxationStatus,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
