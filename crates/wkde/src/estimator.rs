//! Layer 4: Estimator
//!
//! ## Purpose
//!
//! This module provides [`DensityEstimator`], the running probability density
//! model over a bounded integer domain. It accepts a stream of intensity
//! realizations, maintains a bounded-memory sample window with running
//! moments, and answers `value(k)` queries by adaptively choosing between a
//! kernel-smoothed histogram and a closed-form Gaussian fit.
//!
//! ## Design notes
//!
//! * **Batched rebuilds**: Ingestion only queues; the O(domain^2) smoothing
//!   convolution runs at rebuild time, triggered by the configured schedule
//!   or by pending-queue pressure. This is the component's only backpressure
//!   mechanism, trading estimate staleness against CPU cost.
//! * **Model selection**: With few samples relative to spread the empirical
//!   histogram is too sparse to trust, so queries fall back to the Gaussian
//!   fit. The rule `n < 50 * sqrt(variance)` is a deliberate heuristic
//!   reproduced exactly for behavioral compatibility, not a statistical test.
//! * **Graceful degradation**: Bad samples are dropped and logged, empty
//!   rebuilds preserve prior state, and queries never mutate.
//!
//! ## Key concepts
//!
//! * **Active window**: FIFO of the most recent binned realizations; evicting
//!   the oldest keeps counts and moments exact under bounded memory.
//! * **Pending queue**: accepted realizations awaiting the next merge.
//! * **Rebuild**: merge + evict + recompute moments, kernel, and density.
//!
//! ## Invariants
//!
//! * `sum(counts) == window.len()` after every rebuild.
//! * The smoothed density sums to 1 within floating-point tolerance whenever
//!   it is valid.
//! * Queries are pure: no state mutation, safe to repeat.
//!
//! ## Non-goals
//!
//! * No thread safety: the estimator has a single owner (the front-propagation
//!   driver); concurrent callers must serialize access externally.
//! * No persistence or serialization of the model state.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::VecDeque;

// External dependencies
use core::fmt::Debug;
use log::{debug, warn};
use num_traits::Float;

// Internal dependencies
use crate::engine::rebuilder;
use crate::engine::report::DensityReport;
use crate::engine::validator::Validator;
use crate::math::gaussian::normal_pdf;
use crate::math::kernel::KernelLut;
use crate::primitives::errors::DensityError;
use crate::primitives::moments::RunningMoments;
use crate::primitives::window::{Capacity, SampleWindow};

// ============================================================================
// Rebuild Schedule
// ============================================================================

/// Minimum automatic rebuild period. Shorter periods would pay the
/// O(domain^2) smoothing cost nearly per-sample, defeating the batching.
pub const MIN_REBUILD_PERIOD: usize = 10;

/// When the density estimate is automatically recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildSchedule {
    /// Rebuild after every `n` ingested realizations. Values below
    /// [`MIN_REBUILD_PERIOD`] are clamped up to it.
    Every(usize),

    /// Never rebuild automatically on the ingestion counter; the caller
    /// invokes `rebuild()` itself. Pending-queue pressure can still force a
    /// rebuild under bounded memory.
    Manual,
}

impl Default for RebuildSchedule {
    fn default() -> Self {
        RebuildSchedule::Every(100)
    }
}

impl RebuildSchedule {
    /// Clamp the period to [`MIN_REBUILD_PERIOD`], logging when a requested
    /// period was raised.
    pub fn clamped(self) -> Self {
        match self {
            RebuildSchedule::Every(n) if n < MIN_REBUILD_PERIOD => {
                warn!(
                    "rebuild period {} below minimum, clamped to {}",
                    n, MIN_REBUILD_PERIOD
                );
                RebuildSchedule::Every(MIN_REBUILD_PERIOD)
            }
            other => other,
        }
    }
}

// ============================================================================
// Density Estimator
// ============================================================================

/// Running kernel-density model over the integer domain `[0, domain_max]`.
///
/// Construct through [`DensityBuilder`](crate::DensityBuilder).
#[derive(Debug, Clone)]
pub struct DensityEstimator<T: Float> {
    /// Inclusive upper bound of the realization domain. Immutable.
    domain_max: usize,

    /// Per-value occurrence counts within the active window.
    counts: Vec<u64>,

    /// Kernel-smoothed, normalized density; meaningful only when `rebuilt`.
    smoothed: Vec<T>,

    /// Whether `smoothed` reflects a successful rebuild of the current window.
    rebuilt: bool,

    /// Gaussian kernel table, repopulated each rebuild from current variance.
    kernel: KernelLut<T>,

    /// Active window of binned realizations, oldest to newest.
    window: SampleWindow,

    /// Accepted realizations not yet merged.
    pending: VecDeque<T>,

    /// Running m1/m2 sums over the active window.
    moments: RunningMoments<T>,

    /// Monotonic count of accepted realizations, driving the schedule.
    ingested: u64,

    /// Realizations dropped at merge time for binning outside the domain.
    dropped: u64,

    /// Automatic rebuild schedule (already clamped).
    schedule: RebuildSchedule,

    /// Kernel bandwidth scale: `bandwidth = smoothing_factor * variance`.
    smoothing_factor: T,
}

impl<T: Float + Debug> DensityEstimator<T> {
    /// Assemble an estimator from validated configuration.
    ///
    /// Used by the builder; `schedule` must already be clamped.
    pub(crate) fn from_parts(
        domain_max: usize,
        capacity: Capacity,
        schedule: RebuildSchedule,
        smoothing_factor: T,
    ) -> Self {
        Self {
            domain_max,
            counts: vec![0u64; domain_max + 1],
            smoothed: vec![T::zero(); domain_max + 1],
            rebuilt: false,
            kernel: KernelLut::new(domain_max),
            window: SampleWindow::new(capacity),
            pending: VecDeque::new(),
            moments: RunningMoments::new(),
            ingested: 0,
            dropped: 0,
            schedule,
            smoothing_factor,
        }
    }

    // ========================================================================
    // Ingestion
    // ========================================================================

    /// Accept a new intensity realization.
    ///
    /// Non-finite values fail with [`DensityError::NonFiniteSample`] and leave
    /// all state untouched. Valid values are queued for the next merge; no
    /// domain bounds check happens here (an out-of-domain realization is
    /// dropped during merge instead). May trigger an automatic [`rebuild`]
    /// according to the configured schedule or pending-queue pressure.
    ///
    /// [`rebuild`]: DensityEstimator::rebuild
    pub fn add_realization(&mut self, x: T) -> Result<(), DensityError> {
        if let Err(e) = Validator::validate_sample(x) {
            warn!("rejected realization: {:?}", x);
            return Err(e);
        }

        self.pending.push_back(x);
        self.ingested += 1;

        if self.auto_rebuild_due() {
            // A scheduled rebuild that finds nothing valid to merge is a
            // schedule artifact, not an ingestion failure.
            if let Err(DensityError::EmptyWindow) = self.rebuild() {
                debug!("scheduled rebuild skipped: window still empty");
            }
        }

        Ok(())
    }

    /// Check the two automatic triggers: the ingestion-counter schedule and,
    /// under bounded memory, pending-queue pressure past half the capacity.
    fn auto_rebuild_due(&self) -> bool {
        if let RebuildSchedule::Every(n) = self.schedule {
            if self.ingested % n as u64 == 0 {
                return true;
            }
        }

        if let Capacity::Bounded(cap) = self.window.capacity() {
            if self.pending.len() > cap / 2 {
                return true;
            }
        }

        false
    }

    // ========================================================================
    // Rebuild
    // ========================================================================

    /// Merge pending realizations and recompute the smoothed density.
    ///
    /// Drains the pending queue oldest-first into the window, counts, and
    /// moments; evicts the oldest samples past the capacity bound; then
    /// repopulates the kernel from the current variance and convolves the
    /// counts into a normalized density over the full domain.
    ///
    /// Calling with an empty pending queue is valid and re-smooths the
    /// current window (the driver invokes this periodically regardless of
    /// ingestion volume). Fails with [`DensityError::EmptyWindow`] when no
    /// samples remain after the merge, preserving prior window state.
    pub fn rebuild(&mut self) -> Result<(), DensityError> {
        self.dropped += rebuilder::merge_pending(
            &mut self.pending,
            &mut self.window,
            &mut self.counts,
            &mut self.moments,
        ) as u64;

        rebuilder::evict_overflow(&mut self.window, &mut self.counts, &mut self.moments);

        if self.window.is_empty() {
            warn!("rebuild skipped: sample window is empty");
            return Err(DensityError::EmptyWindow);
        }

        let bandwidth = self.smoothing_factor * self.moments.variance();
        self.kernel.populate(bandwidth);
        rebuilder::smooth(&self.counts, &self.kernel, self.window.len(), &mut self.smoothed);
        self.rebuilt = true;

        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Estimated probability of the value `k`.
    ///
    /// Fails with [`DensityError::OutOfDomain`] outside `[0, domain_max]`;
    /// callers wanting the parametric estimate at an arbitrary abscissa use
    /// [`value_gauss`](DensityEstimator::value_gauss) instead. In-domain
    /// queries answer from the smoothed histogram or the Gaussian fit per
    /// [`will_use_gaussian`](DensityEstimator::will_use_gaussian); before the
    /// first successful rebuild the histogram is invalid and the Gaussian fit
    /// answers unconditionally.
    pub fn value(&self, k: usize) -> Result<T, DensityError> {
        if k > self.domain_max {
            debug!("query index {} outside domain [0, {}]", k, self.domain_max);
            return Err(DensityError::OutOfDomain {
                value: k,
                domain_max: self.domain_max,
            });
        }

        if self.will_use_gaussian() || !self.rebuilt {
            Ok(self.value_gauss(T::from(k).unwrap()))
        } else {
            Ok(self.smoothed[k])
        }
    }

    /// Closed-form Gaussian estimate `N(mean, variance)` at an arbitrary
    /// abscissa. Always defined, also outside the domain.
    #[inline]
    pub fn value_gauss(&self, x: T) -> T {
        normal_pdf(x, self.moments.mean(), self.moments.variance())
    }

    /// Smoothed-histogram estimate at `k`, or `None` when `k` is outside the
    /// domain or no successful rebuild has happened yet.
    #[inline]
    pub fn value_histo(&self, k: usize) -> Option<T> {
        if self.rebuilt {
            self.smoothed.get(k).copied()
        } else {
            None
        }
    }

    /// Whether queries currently answer from the Gaussian model.
    ///
    /// True when the window is too sparse for its spread:
    /// `window_len < 50 * sqrt(variance)`.
    #[inline]
    pub fn will_use_gaussian(&self) -> bool {
        Self::gaussian_preferred(self.window.len(), self.moments.variance())
    }

    /// The model-selection rule over explicit inputs, for direct evaluation
    /// at synthetic boundary points a binned window cannot realize.
    #[doc(hidden)]
    #[inline]
    pub fn gaussian_preferred(window_len: usize, variance: T) -> bool {
        T::from(window_len).unwrap() < T::from(50).unwrap() * variance.sqrt()
    }

    // ========================================================================
    // Reset
    // ========================================================================

    /// Return to the just-constructed state: clears the window, pending
    /// queue, counts, and moments, and invalidates the smoothed density.
    /// Configuration is retained.
    pub fn reset(&mut self) {
        self.window.clear();
        self.pending.clear();
        self.counts.fill(0);
        self.smoothed.fill(T::zero());
        self.moments.clear();
        self.ingested = 0;
        self.dropped = 0;
        self.rebuilt = false;
    }

    // ========================================================================
    // Runtime Configuration
    // ========================================================================

    /// Replace the window memory policy. A shrink takes effect at the next
    /// rebuild through the normal eviction pass, so the query representation
    /// and the window never disagree between rebuilds.
    pub fn set_memory_capacity(&mut self, capacity: Capacity) -> Result<(), DensityError> {
        Validator::validate_capacity(capacity)?;
        self.window.set_capacity(capacity);
        Ok(())
    }

    /// Replace the automatic rebuild schedule (clamped to the minimum
    /// period).
    pub fn set_rebuild_schedule(&mut self, schedule: RebuildSchedule) {
        self.schedule = schedule.clamped();
    }

    /// Replace the kernel bandwidth scale factor. Applies at the next
    /// rebuild.
    pub fn set_smoothing_factor(&mut self, factor: T) -> Result<(), DensityError> {
        Validator::validate_smoothing_factor(factor)?;
        self.smoothing_factor = factor;
        Ok(())
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Inclusive upper bound of the realization domain.
    #[inline]
    pub fn domain_max(&self) -> usize {
        self.domain_max
    }

    /// Sample mean over the active window; zero when empty.
    #[inline]
    pub fn mean(&self) -> T {
        self.moments.mean()
    }

    /// Sample variance over the active window; zero when empty.
    #[inline]
    pub fn variance(&self) -> T {
        self.moments.variance()
    }

    /// Occurrence count of `k` within the active window.
    #[inline]
    pub fn count(&self, k: usize) -> u64 {
        self.counts.get(k).copied().unwrap_or(0)
    }

    /// Number of samples in the active window.
    #[inline]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Number of accepted samples awaiting merge.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Total realizations accepted since construction or the last reset.
    #[inline]
    pub fn samples_ingested(&self) -> u64 {
        self.ingested
    }

    /// Total realizations dropped at merge time for binning outside the
    /// domain.
    #[inline]
    pub fn samples_dropped(&self) -> u64 {
        self.dropped
    }

    /// Whether a successful rebuild has validated the smoothed histogram.
    #[inline]
    pub fn is_rebuilt(&self) -> bool {
        self.rebuilt
    }

    /// Current rebuild schedule.
    #[inline]
    pub fn rebuild_schedule(&self) -> RebuildSchedule {
        self.schedule
    }

    /// Current window memory policy.
    #[inline]
    pub fn memory_capacity(&self) -> Capacity {
        self.window.capacity()
    }

    /// Snapshot the diagnostic state, including the density table as the
    /// current `value()` policy would report it.
    pub fn report(&self) -> DensityReport<T> {
        let gaussian_model = self.will_use_gaussian() || !self.rebuilt;
        let density = (0..=self.domain_max)
            .map(|k| {
                if gaussian_model {
                    self.value_gauss(T::from(k).unwrap())
                } else {
                    self.smoothed[k]
                }
            })
            .collect();

        DensityReport {
            domain_max: self.domain_max,
            window_len: self.window.len(),
            pending_len: self.pending.len(),
            mean: self.moments.mean(),
            sigma: self.moments.variance().sqrt(),
            gaussian_model,
            density,
        }
    }
}
