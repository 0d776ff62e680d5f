//! OpenDocument output model.
//!
//! The converter writes text through [`core::XmlWriter`], registers styles
//! in a [`styles::StyleRegistry`] and hands the assembled parts to an
//! [`odt::OdtDocument`] for packaging.

/// Core ODF writing functionality
pub mod core;
/// ODF style elements
pub mod elements;
/// OpenDocument Text package
pub mod odt;
/// Output style registry
pub mod styles;

pub use elements::{OdfStyle, PropertyType, StyleFamily};
pub use odt::OdtDocument;
pub use styles::{InsertFlags, StyleRegistry};
