//! Layer 3: Engine
//!
//! # Purpose
//!
//! This layer implements the rebuild machinery on top of the primitives and
//! math layers: validation of configuration and samples, the merge/evict
//! pass, the smoothing convolution, and the diagnostic report type.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Estimator
//!   ↓
//! Layer 3: Engine ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Window merge, eviction, and density smoothing.
pub mod rebuilder;

/// Diagnostic report type.
pub mod report;

/// Validation utilities.
pub mod validator;
