//! doc2odt - Conversion of legacy Microsoft Word documents into OpenDocument Text
//!
//! This library is the conversion engine that sits between a Word binary
//! (.doc) stream parser and an ODT package. The parser walks the document
//! and reports structure through events; the engine translates what it
//! receives into ODF styles, page layouts, master pages, headers, notes and
//! text, and assembles the package.
//!
//! # Features
//!
//! - **Style translation**: Word style sheets become named ODF paragraph and
//!   text styles with their inheritance chains
//! - **Page layout**: sections become page layouts and master pages, reusing
//!   masters when nothing changed and chaining distinct first pages
//! - **Headers and footers**: even/odd/first-page stories are merged into the
//!   right master pages
//! - **Sub-documents**: note and annotation bodies are converted after the
//!   main text and spliced in where they were referenced
//! - **Metadata**: title, author, keywords and dates go to `meta.xml`
//!
//! # Example - Converting a document
//!
//! ```no_run
//! use doc2odt::{OdtOptions, convert};
//! use doc2odt::ole::doc::{DocumentSource, NoPictures};
//!
//! fn save_as_odt<S: DocumentSource>(source: &mut S) -> doc2odt::Result<()> {
//!     let options = OdtOptions::default().with_footer_margin_floor(10.0);
//!     let document = convert(source, &mut NoPictures, &options)?;
//!     document.save("document.odt")?;
//!     Ok(())
//! }
//! ```
//!
//! # Example - Exit status
//!
//! ```
//! use doc2odt::{ConversionStatus, Error};
//!
//! let err = Error::InconsistentState("paragraph still open".into());
//! assert_eq!(err.status(), ConversionStatus::InconsistentState);
//! assert_eq!(err.status_code(), 2);
//! ```

/// Shared helpers: errors, units, colors, XML escaping and metadata
pub mod common;

/// OpenDocument output model
///
/// This module provides the XML writer, the style registry and the ODT
/// package the conversion produces.
pub mod odf;

/// Conversion engine
pub mod odt;

/// Word (.doc) document model
///
/// The decoded records a parser hands over (style sheet, section and
/// document properties, associated strings) and the event interface it
/// drives a conversion through.
pub mod ole;

pub use common::{ConversionStatus, Error, Result};
pub use odf::OdtDocument;
pub use odt::{OdtOptions, convert, convert_with_report};
