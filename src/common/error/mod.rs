//! Unified error types for the conversion engine.
//!
//! This module provides the error type shared by the record decoders, the
//! conversion session and the package writer.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{ConversionStatus, Error, Result};
