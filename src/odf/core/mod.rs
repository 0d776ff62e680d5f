//! Core ODF writing functionality.
//!
//! [`XmlWriter`] serialises the XML parts and [`PackageWriter`] stores them
//! in the ZIP container with the generated manifest.

/// ODF package writing
mod writer;
/// Streaming XML serialisation
mod xml;

pub use writer::PackageWriter;
pub use xml::{SlotContents, SlotId, XmlWriter};
