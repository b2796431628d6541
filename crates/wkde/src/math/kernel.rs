//! Gaussian smoothing kernel lookup table.
//!
//! ## Purpose
//!
//! This module precomputes the Gaussian kernel weights used to smooth the
//! per-bin histogram into a density estimate. The table is indexed by the
//! absolute distance between two bins, so a single vector of `domain_max + 1`
//! entries covers every pair of indices in the domain.
//!
//! ## Design notes
//!
//! * **Bandwidth-coupled**: The kernel depends on the current sample variance
//!   (`bandwidth = smoothing_factor * variance`), so it is repopulated on
//!   every rebuild rather than fixed at construction.
//! * **Reused storage**: The table is allocated once and refilled in place.
//! * **Degenerate bandwidth**: A near-zero bandwidth (near-constant window)
//!   would underflow every off-center weight toward zero and, at distance
//!   zero, evaluate `0/0`. The table collapses to the identity kernel in that
//!   regime, which makes smoothing a no-op with a strictly positive
//!   normalizer.
//!
//! ## Invariants
//!
//! * `weight(0) == 1` and weights are non-increasing in distance.
//! * All weights are finite and non-negative for any bandwidth input.

// External dependencies
use num_traits::Float;

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Bandwidths at or below this value collapse the kernel to identity.
const DEGENERATE_BANDWIDTH: f64 = 1e-12;

// ============================================================================
// Kernel Lookup Table
// ============================================================================

/// Precomputed Gaussian weights `w[d] = exp(-d^2 / (2 * bandwidth))`,
/// indexed by bin distance `d` in `[0, domain_max]`.
#[derive(Debug, Clone)]
pub struct KernelLut<T> {
    weights: Vec<T>,
}

impl<T: Float> KernelLut<T> {
    /// Allocate a table covering distances `0..=domain_max`, initialized to
    /// the identity kernel.
    pub fn new(domain_max: usize) -> Self {
        let mut lut = Self {
            weights: vec![T::zero(); domain_max + 1],
        };
        lut.weights[0] = T::one();
        lut
    }

    /// Refill the table for the given bandwidth.
    ///
    /// Underflow far from the center is acceptable: a weight that rounds to
    /// zero simply stops contributing to the convolution.
    pub fn populate(&mut self, bandwidth: T) {
        if !bandwidth.is_finite() || bandwidth <= T::from(DEGENERATE_BANDWIDTH).unwrap() {
            self.make_identity();
            return;
        }

        let half = T::from(0.5).unwrap();
        for (d, w) in self.weights.iter_mut().enumerate() {
            let dist = T::from(d).unwrap();
            *w = (-half * dist * dist / bandwidth).exp();
        }
    }

    /// Weight for the given bin distance.
    #[inline]
    pub fn weight(&self, distance: usize) -> T {
        self.weights[distance]
    }

    /// Number of distances covered (`domain_max + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Collapse to the identity kernel: full weight at distance zero,
    /// nothing elsewhere.
    fn make_identity(&mut self) {
        for w in self.weights.iter_mut() {
            *w = T::zero();
        }
        self.weights[0] = T::one();
    }
}
