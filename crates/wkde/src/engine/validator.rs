//! Validation for estimator configuration and ingested samples.
//!
//! ## Purpose
//!
//! This module provides the validation functions shared by the builder and
//! the estimator. It checks parameter bounds at construction time and sample
//! finiteness at ingestion time.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Side-effect free**: Validation never mutates estimator state; callers
//!   decide whether a failure is fatal (builder) or recovered (ingestion).
//!
//! ## Non-goals
//!
//! * This module does not clamp or correct invalid inputs; clamping of the
//!   rebuild period is a documented configuration behavior and lives with
//!   the schedule type.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::DensityError;
use crate::primitives::window::Capacity;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for estimator configuration and input samples.
///
/// All methods return `Result<(), DensityError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    /// Validate the inclusive domain bound. A domain of a single value
    /// (`domain_max == 0`) has no spread to estimate.
    pub fn validate_domain_max(domain_max: usize) -> Result<(), DensityError> {
        if domain_max < 1 {
            return Err(DensityError::InvalidDomain(domain_max));
        }
        Ok(())
    }

    /// Validate the window memory policy.
    pub fn validate_capacity(capacity: Capacity) -> Result<(), DensityError> {
        if let Capacity::Bounded(n) = capacity {
            if n < 1 {
                return Err(DensityError::InvalidCapacity(n));
            }
        }
        Ok(())
    }

    /// Validate the kernel bandwidth scale factor.
    pub fn validate_smoothing_factor<T: Float>(factor: T) -> Result<(), DensityError> {
        if !factor.is_finite() || factor <= T::zero() {
            return Err(DensityError::InvalidSmoothingFactor(
                factor.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate a single realization for finiteness.
    pub fn validate_sample<T: Float>(value: T) -> Result<(), DensityError> {
        if !value.is_finite() {
            return Err(DensityError::NonFiniteSample(
                value.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), DensityError> {
        if let Some(parameter) = duplicate_param {
            return Err(DensityError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
