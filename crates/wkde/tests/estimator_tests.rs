//! Black-box tests for the density estimator.
//!
//! These tests verify the estimator's public contract:
//! - Count conservation and FIFO eviction under bounded memory
//! - Moment correctness, including the zero-variance guard
//! - Normalization of the smoothed density
//! - Adaptive model selection between histogram and Gaussian
//! - Reset semantics and graceful error recovery
//!
//! ## Test Organization
//!
//! 1. **Ingestion** - validation, triggers, pending queue behavior
//! 2. **Rebuild** - merge, eviction, moments, normalization
//! 3. **Queries** - model selection, fallbacks, domain bounds
//! 4. **Reset & Runtime Configuration**
//! 5. **End-to-End Scenario**

use approx::assert_relative_eq;
use wkde::prelude::*;

/// A manual, unbounded estimator over `[0, domain_max]`.
fn manual(domain_max: usize) -> DensityEstimator<f64> {
    DensityBuilder::new(domain_max)
        .rebuild_schedule(Manual)
        .build()
        .expect("builder should accept manual unbounded config")
}

// ============================================================================
// Ingestion Tests
// ============================================================================

/// Test that non-finite realizations are rejected without state change.
#[test]
fn test_non_finite_sample_rejected() {
    let mut pdf = manual(100);

    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = pdf.add_realization(bad).unwrap_err();
        assert!(
            matches!(err, DensityError::NonFiniteSample(_)),
            "expected NonFiniteSample, got {err:?}"
        );
    }

    assert_eq!(pdf.samples_ingested(), 0, "counter must be unaffected");
    assert_eq!(pdf.pending_len(), 0, "nothing should be queued");
}

/// Test that a manual schedule with unbounded memory never auto-rebuilds.
#[test]
fn test_manual_unbounded_never_auto_rebuilds() {
    let mut pdf = manual(50);

    for i in 0..30 {
        pdf.add_realization(f64::from(i % 10)).unwrap();
    }

    assert!(!pdf.is_rebuilt(), "no automatic rebuild expected");
    assert_eq!(pdf.pending_len(), 30);
    assert_eq!(pdf.window_len(), 0);
}

/// Test that the periodic schedule triggers a rebuild on the counter.
#[test]
fn test_periodic_schedule_triggers_rebuild() {
    let mut pdf = DensityBuilder::new(50)
        .rebuild_schedule(Every(10))
        .build()
        .unwrap();

    for i in 0..10 {
        pdf.add_realization(f64::from(20 + i)).unwrap();
    }

    assert!(pdf.is_rebuilt(), "rebuild expected on the 10th realization");
    assert_eq!(pdf.pending_len(), 0);
    assert_eq!(pdf.window_len(), 10);
}

/// Test that pending-queue pressure past half the bounded capacity forces a
/// rebuild even under a manual schedule.
#[test]
fn test_pending_pressure_triggers_rebuild() {
    let mut pdf = DensityBuilder::new(50)
        .memory_capacity(Bounded(10))
        .rebuild_schedule(Manual)
        .build()
        .unwrap();

    for i in 0..6 {
        pdf.add_realization(f64::from(i)).unwrap();
    }

    assert!(pdf.is_rebuilt(), "pending overflow should force a rebuild");
    assert_eq!(pdf.window_len(), 6);
    assert_eq!(pdf.pending_len(), 0);
}

/// Test that realizations are binned by rounding to the nearest integer.
#[test]
fn test_realizations_bin_by_rounding() {
    let mut pdf = manual(10);

    pdf.add_realization(4.4).unwrap();
    pdf.add_realization(4.6).unwrap();
    pdf.rebuild().unwrap();

    assert_eq!(pdf.count(4), 1);
    assert_eq!(pdf.count(5), 1);
}

// ============================================================================
// Rebuild Tests
// ============================================================================

/// Test rebuilding with an empty window fails and preserves state.
#[test]
fn test_rebuild_empty_window_fails() {
    let mut pdf = manual(10);

    assert_eq!(pdf.rebuild().unwrap_err(), DensityError::EmptyWindow);
    assert!(!pdf.is_rebuilt());
}

/// Test that out-of-domain realizations are dropped at merge time while the
/// rest of the batch still merges.
#[test]
fn test_merge_drops_out_of_domain_samples() {
    let mut pdf = manual(10);

    pdf.add_realization(25.0).unwrap();
    pdf.add_realization(-3.0).unwrap();
    pdf.add_realization(5.0).unwrap();
    pdf.rebuild().unwrap();

    assert_eq!(pdf.samples_dropped(), 2);
    assert_eq!(pdf.window_len(), 1);
    assert_eq!(pdf.count(5), 1);
}

/// Test that a merge that drops every sample reports an empty window.
#[test]
fn test_merge_dropping_everything_reports_empty_window() {
    let mut pdf = manual(10);

    pdf.add_realization(99.0).unwrap();
    assert_eq!(pdf.rebuild().unwrap_err(), DensityError::EmptyWindow);
    assert_eq!(pdf.samples_dropped(), 1);
}

/// Test FIFO eviction under bounded capacity: with capacity 3, ingesting
/// `[1, 2, 3, 4]` must retain only `{2, 3, 4}`.
#[test]
fn test_fifo_eviction_order() {
    let mut pdf = DensityBuilder::new(10)
        .memory_capacity(Bounded(3))
        .rebuild_schedule(Manual)
        .build()
        .unwrap();

    for x in [1.0, 2.0, 3.0, 4.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();

    assert_eq!(pdf.window_len(), 3);
    assert_eq!(pdf.count(1), 0, "oldest sample must be evicted");
    assert_eq!(pdf.count(2), 1);
    assert_eq!(pdf.count(3), 1);
    assert_eq!(pdf.count(4), 1);
    assert_relative_eq!(pdf.mean(), 3.0, epsilon = 1e-12);
}

/// Test count conservation: the per-bin counts always sum to the window
/// length, which is the minimum of total ingested and capacity.
#[test]
fn test_count_conservation() {
    let mut pdf = DensityBuilder::new(20)
        .memory_capacity(Bounded(8))
        .rebuild_schedule(Manual)
        .build()
        .unwrap();

    for i in 0..12 {
        pdf.add_realization(f64::from(i % 5)).unwrap();
        // Keep the pending queue below the pressure threshold.
        pdf.rebuild().unwrap();
    }

    let total: u64 = (0..=20).map(|k| pdf.count(k)).sum();
    assert_eq!(total as usize, pdf.window_len());
    assert_eq!(pdf.window_len(), 8, "window is capped at capacity");
}

/// Test moment correctness on a constant window, with the zero-bandwidth
/// guard engaged: all mass stays on the single occupied bin.
#[test]
fn test_moments_constant_window() {
    let mut pdf = manual(20);

    for _ in 0..4 {
        pdf.add_realization(10.0).unwrap();
    }
    pdf.rebuild().unwrap();

    assert_relative_eq!(pdf.mean(), 10.0, epsilon = 1e-12);
    assert_relative_eq!(pdf.variance(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(pdf.value_histo(10).unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(pdf.value_histo(9).unwrap(), 0.0, epsilon = 1e-12);
}

/// Test that a successful rebuild yields a normalized density.
#[test]
fn test_smoothed_density_normalization() {
    let mut pdf = manual(30);

    for x in [5.0, 7.0, 7.0, 12.0, 12.0, 12.0, 15.0, 18.0, 22.0, 25.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();

    let sum: f64 = (0..=30).map(|k| pdf.value_histo(k).unwrap()).sum();
    assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
}

/// Test that rebuilding with an empty pending queue is a valid re-smooth.
#[test]
fn test_rebuild_without_new_samples() {
    let mut pdf = manual(20);

    for x in [8.0, 9.0, 10.0, 11.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();
    let before = pdf.value_histo(10).unwrap();

    pdf.rebuild().unwrap();
    assert_relative_eq!(pdf.value_histo(10).unwrap(), before, epsilon = 1e-12);
    assert_eq!(pdf.window_len(), 4);
}

// ============================================================================
// Query Tests
// ============================================================================

/// Test the model-selection boundary with the documented synthetic numbers:
/// window of 10 with variance 0.04 gives a threshold of exactly 10.
#[test]
fn test_model_selection_boundary() {
    assert!(
        !DensityEstimator::<f64>::gaussian_preferred(10, 0.04),
        "n == threshold must select the histogram"
    );
    assert!(
        DensityEstimator::<f64>::gaussian_preferred(9, 0.04),
        "n below threshold must select the Gaussian"
    );
}

/// Test that `will_use_gaussian` selects each model on its own side of the
/// rule when driven through ingestion and rebuild.
#[test]
fn test_will_use_gaussian_through_estimator() {
    // Constant window: variance 0 makes the threshold 0, so even a small
    // window is dense enough for the histogram.
    let mut dense = manual(20);
    for _ in 0..5 {
        dense.add_realization(10.0).unwrap();
    }
    dense.rebuild().unwrap();
    assert!(!dense.will_use_gaussian(), "zero spread must trust the histogram");

    // Two far-apart samples: variance 25 gives a threshold of 250, far above
    // the window size, so the Gaussian fit answers.
    let mut sparse = manual(20);
    sparse.add_realization(5.0).unwrap();
    sparse.add_realization(15.0).unwrap();
    sparse.rebuild().unwrap();
    assert!(sparse.will_use_gaussian(), "sparse spread must fall back to Gaussian");

    // And the query path follows the selection.
    let gauss = sparse.value_gauss(10.0);
    assert_relative_eq!(sparse.value(10).unwrap(), gauss, epsilon = 1e-15);
}

/// Test that out-of-domain queries fail with the violated bound.
#[test]
fn test_query_out_of_domain() {
    let mut pdf = manual(10);
    pdf.add_realization(5.0).unwrap();
    pdf.rebuild().unwrap();

    assert_eq!(
        pdf.value(11).unwrap_err(),
        DensityError::OutOfDomain {
            value: 11,
            domain_max: 10
        }
    );
}

/// Test that the parametric estimate stays available at any abscissa.
#[test]
fn test_value_gauss_any_abscissa() {
    let mut pdf = manual(10);
    for x in [4.0, 5.0, 5.0, 6.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();

    let inside = pdf.value_gauss(5.0);
    let outside = pdf.value_gauss(25.0);
    assert!(inside > outside, "density must decay away from the mean");
    assert!(outside.is_finite() && outside >= 0.0);
}

/// Test that queries before the first rebuild answer from the Gaussian
/// fallback instead of an invalid histogram.
#[test]
fn test_query_before_first_rebuild_uses_gaussian() {
    let mut pdf = manual(10);
    pdf.add_realization(5.0).unwrap();

    // Nothing merged yet: the fit is the degenerate N(0, 0) point mass.
    assert_relative_eq!(pdf.value(0).unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(pdf.value(5).unwrap(), 0.0, epsilon = 1e-12);
    assert!(pdf.value_histo(5).is_none());
}

/// Test that queries do not mutate state.
#[test]
fn test_queries_are_pure() {
    let mut pdf = manual(20);
    for x in [9.0, 10.0, 10.0, 11.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();

    let first = pdf.value(10).unwrap();
    for _ in 0..100 {
        assert_relative_eq!(pdf.value(10).unwrap(), first, epsilon = 1e-15);
    }
    assert_eq!(pdf.window_len(), 4);
    assert_eq!(pdf.pending_len(), 0);
}

// ============================================================================
// Reset & Runtime Configuration Tests
// ============================================================================

/// Test reset returns the estimator to the just-constructed state.
#[test]
fn test_reset_idempotence() {
    let mut pdf = manual(20);
    for x in [3.0, 6.0, 9.0, 12.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();

    pdf.reset();

    assert_relative_eq!(pdf.mean(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(pdf.variance(), 0.0, epsilon = 1e-12);
    assert_eq!((0..=20).map(|k| pdf.count(k)).sum::<u64>(), 0);
    assert_eq!(pdf.samples_ingested(), 0);
    assert!(!pdf.is_rebuilt());
    assert_eq!(pdf.rebuild().unwrap_err(), DensityError::EmptyWindow);
}

/// Test that shrinking the capacity mid-run takes effect at the next
/// rebuild through normal eviction.
#[test]
fn test_capacity_shrink_applies_at_next_rebuild() {
    let mut pdf = manual(20);
    for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();
    assert_eq!(pdf.window_len(), 5);

    pdf.set_memory_capacity(Bounded(2)).unwrap();
    assert_eq!(pdf.window_len(), 5, "shrink is deferred to the next rebuild");

    pdf.rebuild().unwrap();
    assert_eq!(pdf.window_len(), 2);
    assert_eq!(pdf.count(4), 1);
    assert_eq!(pdf.count(5), 1);
    assert_relative_eq!(pdf.mean(), 4.5, epsilon = 1e-12);
}

/// Test runtime setter validation and schedule clamping.
#[test]
fn test_runtime_setters() {
    let mut pdf = manual(20);

    assert!(matches!(
        pdf.set_smoothing_factor(-1.0).unwrap_err(),
        DensityError::InvalidSmoothingFactor(_)
    ));
    assert!(matches!(
        pdf.set_memory_capacity(Bounded(0)).unwrap_err(),
        DensityError::InvalidCapacity(0)
    ));

    pdf.set_rebuild_schedule(Every(3));
    assert_eq!(pdf.rebuild_schedule(), Every(MIN_REBUILD_PERIOD));
}

/// Test the diagnostic report snapshot and its rendering.
#[test]
fn test_report_snapshot() {
    let mut pdf = manual(10);
    for x in [4.0, 5.0, 5.0, 6.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();

    let report = pdf.report();
    assert_eq!(report.domain_max, 10);
    assert_eq!(report.window_len, 4);
    assert_eq!(report.density.len(), 11);
    assert_relative_eq!(report.mean, 5.0, epsilon = 1e-12);

    let rendered = report.to_string();
    assert!(rendered.contains("Domain:  [0, 10]"));
    assert!(rendered.contains("Mean:"));
    assert!(rendered.contains("Sigma:"));
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

/// Feed 200 realizations drawn from a known discrete distribution
/// concentrated at 50 and verify the density peaks there.
#[test]
fn test_end_to_end_concentrated_distribution() {
    let mut pdf = DensityBuilder::new(100)
        .memory_capacity(Bounded(1000))
        .rebuild_schedule(Every(50))
        .build()
        .unwrap();

    // Symmetric distribution around 50: 80 x 50, 40 x (50 +/- 1),
    // 15 x (50 +/- 2), 5 x (50 +/- 3) = 200 samples, mean exactly 50.
    let mut samples = Vec::new();
    let reps = [(0usize, 80usize), (1, 40), (2, 15), (3, 5)];
    for &(d, n) in &reps {
        for _ in 0..n {
            samples.push(50.0 + d as f64);
            if d > 0 {
                samples.push(50.0 - d as f64);
            }
        }
    }
    assert_eq!(samples.len(), 200);

    for &x in &samples {
        pdf.add_realization(x).unwrap();
    }

    // The schedule fires on the 200th realization, so nothing is pending.
    assert_eq!(pdf.pending_len(), 0);
    assert_eq!(pdf.window_len(), 200);
    assert!(
        !pdf.will_use_gaussian(),
        "200 tight samples should trust the histogram"
    );

    let p50 = pdf.value(50).unwrap();
    for k in 0..=100 {
        assert!(
            pdf.value(k).unwrap() <= p50,
            "density must peak at 50, but value({k}) exceeds it"
        );
    }
    assert!((pdf.mean() - 50.0).abs() < 2.0);
}
