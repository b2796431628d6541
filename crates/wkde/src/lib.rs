//! # wkde — Windowed Kernel Density Estimation for Rust
//!
//! A running, bounded-memory probability density estimator over a fixed
//! integer domain. It is the statistical likelihood term used by
//! front-propagation segmentation: intensity realizations stream in, the
//! estimator maintains a FIFO sample window with running moments, and
//! queries are answered from a Gaussian-kernel-smoothed histogram or, while
//! samples are still sparse, from a closed-form Gaussian fit.
//!
//! ## How it works
//!
//! Ingestion is O(1): realizations are validated and queued. Periodically
//! (by schedule or queue pressure) a *rebuild* merges the queue into the
//! active window, evicts the oldest samples past the memory bound, and
//! recomputes a kernel-smoothed density over the whole domain. The smoothing
//! convolution is O(domain^2) by design and amortized over many samples.
//! Queries pick the representation adaptively: the empirical histogram once
//! the window is dense enough, the parametric Gaussian before that.
//!
//! ## Quick Start
//!
//! ```rust
//! use wkde::prelude::*;
//!
//! // Intensities live in [0, 255]; remember the last 1000 samples and
//! // refresh the density every 50 ingested realizations.
//! let mut pdf: DensityEstimator<f64> = DensityBuilder::new(255)
//!     .memory_capacity(Bounded(1000))
//!     .rebuild_schedule(Every(50))
//!     .build()?;
//!
//! for x in [98.0, 101.0, 100.0, 99.5, 100.0, 102.0] {
//!     pdf.add_realization(x)?;
//! }
//! pdf.rebuild()?;
//!
//! let p = pdf.value(100)?;
//! assert!(p > 0.0);
//! assert!((pdf.mean() - 100.0).abs() < 1.0);
//! # Result::<(), DensityError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every fallible operation returns `Result<_, DensityError>`, and every
//! error is locally recoverable: a non-finite sample is dropped, a rebuild
//! on an empty window preserves prior state, an out-of-domain query reports
//! the bound it violated. The estimator never aborts the surrounding run.
//!
//! ## References
//!
//! - Pichon, E., Tannenbaum, A., Kikinis, R. (2004). "A statistically based
//!   flow for image segmentation"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - errors, sample window, running moments.
mod primitives;

// Layer 2: Math - kernel table and closed-form Gaussian.
mod math;

// Layer 3: Engine - validation, merge/evict, smoothing, reporting.
mod engine;

// Layer 4: Estimator - the running density model.
mod estimator;

// High-level fluent API.
mod api;

// Standard prelude.
pub mod prelude {
    pub use crate::api::{
        Capacity::{Bounded, Unbounded},
        DensityBuilder, DensityError, DensityEstimator, DensityReport,
        RebuildSchedule::{Every, Manual},
        DEFAULT_SMOOTHING_FACTOR, MIN_REBUILD_PERIOD,
    };
}

pub use crate::api::{
    Capacity, DensityBuilder, DensityError, DensityEstimator, DensityReport, RebuildSchedule,
};

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing
// purposes. It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
