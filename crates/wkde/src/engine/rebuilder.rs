//! Rebuild engine: window merge, eviction, and kernel-smoothed density.
//!
//! ## Purpose
//!
//! This module implements the two halves of a rebuild as stateless functions
//! over borrowed estimator state:
//!
//! 1. **Merge**: drain the pending queue into the active window, keeping the
//!    per-bin counts and running moments synchronized, then evict the oldest
//!    samples past the capacity bound.
//! 2. **Smooth**: convolve the counts with the Gaussian kernel table and
//!    normalize into a density over the full domain.
//!
//! ## Design notes
//!
//! * **Batched cost**: The convolution is O(domain^2) and runs only at
//!   rebuild time. Ingestion stays O(1) precisely so this cost is amortized
//!   over many samples.
//! * **Graceful merge**: A pending realization that bins outside the domain
//!   is dropped with a warning instead of corrupting the counts; the rest of
//!   the batch still merges.
//! * **Zero-denominator guard**: With a degenerate kernel the normalizer for
//!   a bin could reach zero; the bin then falls back to its own unsmoothed
//!   mass `counts[i] / n`.
//!
//! ## Invariants
//!
//! * After merge + eviction, `sum(counts) == window.len()` and the moments
//!   cover exactly the windowed samples.
//! * After smoothing a non-empty window, the density sums to 1 within
//!   floating-point tolerance.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(feature = "std")]
use std::collections::VecDeque;

// External dependencies
use log::warn;
use num_traits::Float;

// Internal dependencies
use crate::math::kernel::KernelLut;
use crate::primitives::moments::RunningMoments;
use crate::primitives::window::SampleWindow;

// ============================================================================
// Merge Phase
// ============================================================================

/// Drain the pending queue oldest-first into the window, counts, and moments.
///
/// Realizations are binned by rounding to the nearest integer. A realization
/// whose bin falls outside `[0, counts.len() - 1]` is dropped and counted in
/// the return value.
pub fn merge_pending<T: Float>(
    pending: &mut VecDeque<T>,
    window: &mut SampleWindow,
    counts: &mut [u64],
    moments: &mut RunningMoments<T>,
) -> usize {
    let domain_max = counts.len() - 1;
    let mut dropped = 0usize;

    while let Some(x) = pending.pop_front() {
        let bin = match x.round().to_isize() {
            Some(b) if b >= 0 && (b as usize) <= domain_max => b as usize,
            _ => {
                dropped += 1;
                continue;
            }
        };

        window.push(bin);
        counts[bin] += 1;
        moments.add(T::from(bin).unwrap());
    }

    if dropped > 0 {
        warn!(
            "merge dropped {} realization(s) outside domain [0, {}]",
            dropped, domain_max
        );
    }

    dropped
}

/// Evict the oldest samples until the window is back within capacity,
/// keeping counts and moments synchronized with each removal.
pub fn evict_overflow<T: Float>(
    window: &mut SampleWindow,
    counts: &mut [u64],
    moments: &mut RunningMoments<T>,
) {
    let mut overflow = window.overflow();
    while overflow > 0 {
        if let Some(bin) = window.evict_oldest() {
            debug_assert!(counts[bin] > 0, "eviction of an uncounted bin");
            counts[bin] -= 1;
            moments.remove(T::from(bin).unwrap());
        }
        overflow -= 1;
    }
}

// ============================================================================
// Smoothing Phase
// ============================================================================

/// Convolve the counts with the kernel table and normalize into `density`.
///
/// For every output bin `i`:
///
/// ```text
/// density[i] = (sum_j w[|i-j|] * counts[j]) / (sum_j w[|i-j|]) / n
/// ```
///
/// where `n` is the number of windowed samples. The per-bin division by the
/// local kernel mass keeps the estimate unbiased near the domain boundaries,
/// where the kernel support is truncated; the boundary correction leaves a
/// small residual in the total mass, so the table is rescaled at the end to
/// sum to exactly one.
pub fn smooth<T: Float>(
    counts: &[u64],
    kernel: &KernelLut<T>,
    window_len: usize,
    density: &mut [T],
) {
    debug_assert_eq!(counts.len(), density.len());
    debug_assert_eq!(kernel.len(), counts.len(), "kernel must cover the domain");
    debug_assert!(window_len > 0, "smoothing an empty window");

    let n = T::from(window_len).unwrap();

    for i in 0..counts.len() {
        let mut numerator = T::zero();
        let mut denominator = T::zero();

        for (j, &count) in counts.iter().enumerate() {
            let w = kernel.weight(i.abs_diff(j));
            denominator = denominator + w;
            if count > 0 {
                numerator = numerator + w * T::from(count).unwrap();
            }
        }

        density[i] = if denominator > T::zero() {
            numerator / denominator / n
        } else {
            // Fully underflowed kernel: fall back to the bin's own mass.
            T::from(counts[i]).unwrap() / n
        };
    }

    let total = density.iter().fold(T::zero(), |acc, &p| acc + p);
    if total > T::zero() {
        for p in density.iter_mut() {
            *p = *p / total;
        }
    }
}
