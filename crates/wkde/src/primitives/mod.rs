//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive data structures used throughout the
//! crate: error types, the bounded FIFO sample window, and running moment
//! accumulators. It has zero internal dependencies within the crate.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Running moment accumulators.
pub mod moments;

/// Bounded FIFO sample window.
pub mod window;
