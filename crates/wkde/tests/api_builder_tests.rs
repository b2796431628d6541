//! Tests for builder configuration and validation.
//!
//! These tests verify that the fluent builder accepts sane configurations,
//! applies documented defaults, rejects invalid parameters with contextual
//! errors, and clamps the rebuild period.

use wkde::prelude::*;

/// Test that defaults produce an unbounded, periodically rebuilt estimator.
#[test]
fn test_builder_defaults() {
    let pdf: DensityEstimator<f64> = DensityBuilder::new(255).build().unwrap();

    assert_eq!(pdf.domain_max(), 255);
    assert_eq!(pdf.memory_capacity(), Unbounded);
    assert_eq!(pdf.rebuild_schedule(), Every(100));
    assert_eq!(pdf.window_len(), 0);
    assert!(!pdf.is_rebuilt());
}

/// Test that a single-value domain is rejected.
#[test]
fn test_builder_rejects_degenerate_domain() {
    let err = DensityBuilder::<f64>::new(0).build().unwrap_err();
    assert_eq!(err, DensityError::InvalidDomain(0));
}

/// Test that a zero bounded capacity is rejected.
#[test]
fn test_builder_rejects_zero_capacity() {
    let err = DensityBuilder::<f64>::new(100)
        .memory_capacity(Bounded(0))
        .build()
        .unwrap_err();
    assert_eq!(err, DensityError::InvalidCapacity(0));
}

/// Test that non-positive or non-finite smoothing factors are rejected.
#[test]
fn test_builder_rejects_bad_smoothing_factor() {
    for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
        let err = DensityBuilder::new(100)
            .smoothing_factor(bad)
            .build()
            .unwrap_err();
        assert!(
            matches!(err, DensityError::InvalidSmoothingFactor(_)),
            "factor {bad} should be rejected, got {err:?}"
        );
    }
}

/// Test that setting a parameter twice is reported.
#[test]
fn test_builder_rejects_duplicate_parameter() {
    let err = DensityBuilder::new(100)
        .smoothing_factor(0.2)
        .smoothing_factor(0.3)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        DensityError::DuplicateParameter {
            parameter: "smoothing_factor"
        }
    );
}

/// Test that rebuild periods below the minimum are clamped up.
#[test]
fn test_builder_clamps_rebuild_period() {
    let pdf: DensityEstimator<f64> = DensityBuilder::new(100)
        .rebuild_schedule(Every(2))
        .build()
        .unwrap();
    assert_eq!(pdf.rebuild_schedule(), Every(MIN_REBUILD_PERIOD));

    let pdf: DensityEstimator<f64> = DensityBuilder::new(100)
        .rebuild_schedule(Every(500))
        .build()
        .unwrap();
    assert_eq!(pdf.rebuild_schedule(), Every(500), "long periods unchanged");
}

/// Test that the manual schedule survives the clamp.
#[test]
fn test_builder_manual_schedule() {
    let pdf: DensityEstimator<f64> = DensityBuilder::new(100)
        .rebuild_schedule(Manual)
        .build()
        .unwrap();
    assert_eq!(pdf.rebuild_schedule(), Manual);
}

/// Test that estimators work at f32 precision as well.
#[test]
fn test_builder_f32_estimator() {
    let mut pdf: DensityEstimator<f32> = DensityBuilder::new(50)
        .rebuild_schedule(Manual)
        .build()
        .unwrap();

    for x in [24.0f32, 25.0, 25.0, 26.0] {
        pdf.add_realization(x).unwrap();
    }
    pdf.rebuild().unwrap();

    assert!((pdf.mean() - 25.0).abs() < 1e-4);
    let sum: f32 = (0..=50).map(|k| pdf.value_histo(k).unwrap()).sum();
    assert!((sum - 1.0).abs() < 1e-4);
}
