//! High-level API for the density estimator.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent
//! builder for configuring the estimator's domain, memory policy, rebuild
//! schedule, and kernel bandwidth scale.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for everything but
//!   the domain bound, which has no sensible default and is required up
//!   front.
//! * **Validated**: Parameters are validated when `build()` is called;
//!   setting a parameter twice is reported as a configuration error.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`DensityBuilder`] via `DensityBuilder::new(domain_max)`.
//! 2. Chain configuration methods (`.memory_capacity()`, etc.).
//! 3. Call `.build()` to obtain a validated [`DensityEstimator`].

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::engine::report::DensityReport;
pub use crate::estimator::{DensityEstimator, RebuildSchedule, MIN_REBUILD_PERIOD};
pub use crate::primitives::errors::DensityError;
pub use crate::primitives::window::Capacity;

/// Default kernel bandwidth scale relative to the window variance.
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.25;

// ============================================================================
// Density Builder
// ============================================================================

/// Fluent builder for [`DensityEstimator`].
#[derive(Debug, Clone)]
pub struct DensityBuilder<T> {
    /// Inclusive upper bound of the realization domain.
    pub domain_max: usize,

    /// Window memory policy (default: unbounded).
    pub memory_capacity: Option<Capacity>,

    /// Automatic rebuild schedule (default: every 100 realizations).
    pub rebuild_schedule: Option<RebuildSchedule>,

    /// Kernel bandwidth scale factor (default: 0.25).
    pub smoothing_factor: Option<T>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float + Debug> DensityBuilder<T> {
    /// Create a builder for the realization domain `[0, domain_max]`.
    pub fn new(domain_max: usize) -> Self {
        Self {
            domain_max,
            memory_capacity: None,
            rebuild_schedule: None,
            smoothing_factor: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the window memory policy.
    pub fn memory_capacity(mut self, capacity: Capacity) -> Self {
        if self.memory_capacity.is_some() {
            self.duplicate_param = Some("memory_capacity");
        }
        self.memory_capacity = Some(capacity);
        self
    }

    /// Set the automatic rebuild schedule.
    pub fn rebuild_schedule(mut self, schedule: RebuildSchedule) -> Self {
        if self.rebuild_schedule.is_some() {
            self.duplicate_param = Some("rebuild_schedule");
        }
        self.rebuild_schedule = Some(schedule);
        self
    }

    /// Set the kernel bandwidth scale factor
    /// (`bandwidth = smoothing_factor * variance`).
    pub fn smoothing_factor(mut self, factor: T) -> Self {
        if self.smoothing_factor.is_some() {
            self.duplicate_param = Some("smoothing_factor");
        }
        self.smoothing_factor = Some(factor);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and construct the estimator.
    pub fn build(self) -> Result<DensityEstimator<T>, DensityError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_domain_max(self.domain_max)?;

        let capacity = self.memory_capacity.unwrap_or_default();
        Validator::validate_capacity(capacity)?;

        let smoothing_factor = self
            .smoothing_factor
            .unwrap_or_else(|| T::from(DEFAULT_SMOOTHING_FACTOR).unwrap());
        Validator::validate_smoothing_factor(smoothing_factor)?;

        let schedule = self.rebuild_schedule.unwrap_or_default().clamped();

        Ok(DensityEstimator::from_parts(
            self.domain_max,
            capacity,
            schedule,
            smoothing_factor,
        ))
    }
}
