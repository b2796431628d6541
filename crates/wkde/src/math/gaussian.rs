//! Closed-form Gaussian density evaluation.
//!
//! This is the parametric half of the adaptive model: when the window holds
//! too few samples relative to its spread, the estimator answers queries from
//! the fitted normal `N(mean, variance)` instead of the sparse histogram.

// External dependencies
use num_traits::Float;

/// Square root of 2*pi, used in Gaussian density calculations.
const SQRT_2PI: f64 = 2.5066282746310005024157652848110452530069867406099_f64;

/// Variances at or below this value are treated as a point mass.
const DEGENERATE_VARIANCE: f64 = 1e-12;

/// Evaluate the normal density `N(mean, variance)` at `x`.
///
/// A degenerate variance (near-constant window) makes the closed form divide
/// by zero; in that regime the distribution is a point mass, so the density
/// is one on the unit-width bin containing the mean and zero elsewhere. This
/// mirrors the no-smoothing guard applied on the histogram side.
#[inline]
pub fn normal_pdf<T: Float>(x: T, mean: T, variance: T) -> T {
    if variance <= T::from(DEGENERATE_VARIANCE).unwrap() {
        let half = T::from(0.5).unwrap();
        return if (x - mean).abs() < half {
            T::one()
        } else {
            T::zero()
        };
    }

    let half = T::from(0.5).unwrap();
    let norm = T::one() / (T::from(SQRT_2PI).unwrap() * variance.sqrt());
    let delta = x - mean;
    norm * (-half * delta * delta / variance).exp()
}
