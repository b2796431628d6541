//! Running first and second moments over the active window.
//!
//! ## Purpose
//!
//! This module tracks the sum and sum-of-squares of the windowed samples so
//! that mean and variance are available in O(1) at every rebuild, including
//! after FIFO evictions.
//!
//! ## Design notes
//!
//! * **Removable**: Unlike a pure accumulator, moments support `remove` so
//!   that evicting the oldest sample keeps the sums consistent with the
//!   window contents.
//! * **Clamped variance**: `m2/n - mean^2` can go slightly negative through
//!   floating-point cancellation on near-constant windows; the variance is
//!   clamped at zero so downstream bandwidth computation never sees a
//!   negative spread.
//!
//! ## Invariants
//!
//! * `count` equals the number of `add` calls minus the number of successful
//!   `remove` calls.
//! * `mean()` and `variance()` return zero for an empty window.

// External dependencies
use num_traits::Float;

// ============================================================================
// Running Moments
// ============================================================================

/// Running m1/m2 sums over the samples currently in the window.
#[derive(Debug, Clone, Copy)]
pub struct RunningMoments<T> {
    /// Sum of sample values.
    m1: T,

    /// Sum of squared sample values.
    m2: T,

    /// Number of samples contributing to the sums.
    count: usize,
}

impl<T: Float> Default for RunningMoments<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> RunningMoments<T> {
    /// Create zeroed moments.
    pub fn new() -> Self {
        Self {
            m1: T::zero(),
            m2: T::zero(),
            count: 0,
        }
    }

    /// Incorporate a sample value.
    #[inline]
    pub fn add(&mut self, value: T) {
        self.m1 = self.m1 + value;
        self.m2 = self.m2 + value * value;
        self.count += 1;
    }

    /// Remove a previously incorporated sample value.
    #[inline]
    pub fn remove(&mut self, value: T) {
        debug_assert!(self.count > 0, "remove called on empty moments");
        self.m1 = self.m1 - value;
        self.m2 = self.m2 - value * value;
        self.count -= 1;
    }

    /// Number of samples contributing to the sums.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean; zero when empty.
    #[inline]
    pub fn mean(&self) -> T {
        if self.count == 0 {
            return T::zero();
        }
        self.m1 / T::from(self.count).unwrap()
    }

    /// Population variance `m2/n - mean^2`, clamped at zero; zero when empty.
    #[inline]
    pub fn variance(&self) -> T {
        if self.count == 0 {
            return T::zero();
        }
        let n = T::from(self.count).unwrap();
        let mean = self.m1 / n;
        (self.m2 / n - mean * mean).max(T::zero())
    }

    /// Reset to the just-constructed state.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
