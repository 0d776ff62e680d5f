//! Common types and utilities shared by the record decoders, the output
//! model and the conversion engine.

// Submodule declarations
pub mod binary;
pub mod error;
pub mod metadata;
pub mod style;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{ConversionStatus, Error, Result};
pub use metadata::Metadata;
pub use style::RGBColor;
pub use unit::Pt;
