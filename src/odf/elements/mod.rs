//! ODF style elements used by the converter.

/// Style elements
pub mod style;

pub use style::{OdfStyle, PropertyType, StyleFamily};
