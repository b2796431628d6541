//! Error types for density estimation.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while configuring
//! the estimator, ingesting realizations, rebuilding the density, and
//! answering queries.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (e.g., the sample that
//!   was rejected, the domain bound that was exceeded).
//! * **Recoverable**: Every variant is recovered locally by the caller; none
//!   is fatal to the surrounding process. The estimator degrades gracefully
//!   (samples are dropped, rebuilds are skipped) rather than aborting.
//! * **No-std**: Supports `no_std` environments; `std::error::Error` is
//!   implemented only when the `std` feature is enabled.
//!
//! ## Key concepts
//!
//! 1. **Ingestion errors**: Non-finite realizations are rejected at the door.
//! 2. **Rebuild errors**: Rebuilding with an empty window is reported, with
//!    prior state preserved.
//! 3. **Query errors**: Out-of-domain queries are surfaced to the caller.
//! 4. **Configuration errors**: Builder validation failures, caught in
//!    `build()`.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not decide recovery policy; callers do.

// Feature-gated imports
#[cfg(feature = "std")]
use std::error::Error;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for density estimation operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityError {
    /// A non-finite realization (NaN or infinity) was passed to
    /// `add_realization`. The sample is dropped and no state changes.
    NonFiniteSample(f64),

    /// `rebuild` was invoked with zero samples in the active window.
    /// Prior state is preserved; query the density only after at least one
    /// valid sample has been merged.
    EmptyWindow,

    /// `value` was queried outside the realization domain `[0, domain_max]`.
    OutOfDomain {
        /// The queried index.
        value: usize,
        /// Inclusive upper bound of the domain.
        domain_max: usize,
    },

    /// The domain must contain at least two values (`domain_max >= 1`).
    InvalidDomain(usize),

    /// A bounded memory capacity must hold at least one sample.
    InvalidCapacity(usize),

    /// The smoothing factor must be finite and strictly positive.
    InvalidSmoothingFactor(f64),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for DensityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::NonFiniteSample(v) => {
                write!(f, "Non-finite realization rejected: {v}")
            }
            Self::EmptyWindow => {
                write!(f, "Rebuild requested with an empty sample window")
            }
            Self::OutOfDomain { value, domain_max } => {
                write!(f, "Query index {value} outside domain [0, {domain_max}]")
            }
            Self::InvalidDomain(got) => {
                write!(f, "Invalid domain_max: {got} (must be at least 1)")
            }
            Self::InvalidCapacity(got) => {
                write!(f, "Invalid memory capacity: {got} (must be at least 1)")
            }
            Self::InvalidSmoothingFactor(got) => {
                write!(
                    f,
                    "Invalid smoothing factor: {got} (must be finite and > 0)"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for DensityError {}
