//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure mathematical building blocks of the
//! estimator:
//! - The Gaussian kernel lookup table for histogram smoothing
//! - Closed-form normal density evaluation
//!
//! These are reusable functions with no estimator-specific state.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Estimator
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Closed-form Gaussian density.
pub mod gaussian;

/// Gaussian kernel lookup table.
pub mod kernel;
