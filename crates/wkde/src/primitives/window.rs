//! Bounded FIFO sample window.
//!
//! This module provides the capacity-bounded sample window that holds the
//! realizations currently contributing to the histogram, ordered oldest to
//! newest, together with the [`Capacity`] policy that bounds it.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(feature = "std")]
use std::collections::VecDeque;

// ============================================================================
// Capacity Policy
// ============================================================================

/// Memory policy for the active sample window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capacity {
    /// Retain at most this many samples; the oldest are evicted first.
    Bounded(usize),

    /// Never forget: the window grows without bound.
    #[default]
    Unbounded,
}

impl Capacity {
    /// Bounded capacity value, if any.
    #[inline]
    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Bounded(n) => Some(*n),
            Capacity::Unbounded => None,
        }
    }
}

// ============================================================================
// Sample Window
// ============================================================================

/// FIFO window of binned realizations with explicit capacity accounting.
///
/// The window itself never evicts implicitly: callers drive eviction through
/// [`SampleWindow::evict_oldest`] so that per-bin counts and running moments
/// stay synchronized with every removal.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<usize>,
    capacity: Capacity,
}

impl SampleWindow {
    /// Create an empty window with the given capacity policy.
    pub fn new(capacity: Capacity) -> Self {
        let samples = match capacity.limit() {
            Some(n) => VecDeque::with_capacity(n.min(MAX_PREALLOC)),
            None => VecDeque::new(),
        };
        Self { samples, capacity }
    }

    /// Append a sample at the newest end.
    #[inline]
    pub fn push(&mut self, bin: usize) {
        self.samples.push_back(bin);
    }

    /// Remove and return the oldest sample.
    #[inline]
    pub fn evict_oldest(&mut self) -> Option<usize> {
        self.samples.pop_front()
    }

    /// Number of samples beyond the configured capacity.
    #[inline]
    pub fn overflow(&self) -> usize {
        match self.capacity.limit() {
            Some(limit) => self.samples.len().saturating_sub(limit),
            None => 0,
        }
    }

    /// Replace the capacity policy. A shrink does not evict by itself;
    /// the overflow is drained by the caller's next eviction pass.
    #[inline]
    pub fn set_capacity(&mut self, capacity: Capacity) {
        self.capacity = capacity;
    }

    /// Current capacity policy.
    #[inline]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Number of samples currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the window holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples, preserving allocated storage.
    #[inline]
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Iterate samples oldest to newest.
    #[cfg(feature = "dev")]
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.samples.iter().copied()
    }
}

/// Upper bound on eager pre-allocation for bounded windows, so that a huge
/// configured capacity does not reserve memory before samples arrive.
const MAX_PREALLOC: usize = 1 << 16;
