//! Diagnostic report for the estimator state.
//!
//! ## Purpose
//!
//! This module defines the [`DensityReport`] snapshot returned by the
//! estimator's `report()` method: a human-readable summary of the domain,
//! window occupancy, moments, and the full density table.
//!
//! ## Design notes
//!
//! * **Owned snapshot**: The report copies the density table so it remains
//!   valid after further ingestion; it is a diagnostic aid, not part of the
//!   numerical contract.
//! * **Ergonomics**: Implements `Display` for direct logging or printing.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Report Structure
// ============================================================================

/// Snapshot of the estimator's diagnostic state.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityReport<T> {
    /// Inclusive upper bound of the realization domain.
    pub domain_max: usize,

    /// Number of samples in the active window.
    pub window_len: usize,

    /// Number of accepted samples not yet merged.
    pub pending_len: usize,

    /// Sample mean over the active window.
    pub mean: T,

    /// Sample standard deviation over the active window.
    pub sigma: T,

    /// Whether queries currently answer from the Gaussian model
    /// rather than the smoothed histogram.
    pub gaussian_model: bool,

    /// Estimated probability for every value in `[0, domain_max]`,
    /// as the current `value()` query would report it.
    pub density: Vec<T>,
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for DensityReport<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Density estimator:")?;
        writeln!(f, "  Domain:  [0, {}]", self.domain_max)?;
        writeln!(f, "  Window:  {} samples", self.window_len)?;
        writeln!(f, "  Pending: {} samples", self.pending_len)?;
        writeln!(f, "  Mean:    {:.4}", self.mean)?;
        writeln!(f, "  Sigma:   {:.4}", self.sigma)?;
        writeln!(
            f,
            "  Model:   {}",
            if self.gaussian_model {
                "Gaussian"
            } else {
                "Smoothed histogram"
            }
        )?;

        writeln!(f)?;
        writeln!(f, "  {:>8} {:>14}", "Value", "Density")?;
        writeln!(f, "  {}", "-".repeat(24))?;
        for (k, p) in self.density.iter().enumerate() {
            writeln!(f, "  {:>8} {:>14.8}", k, p)?;
        }

        Ok(())
    }
}
