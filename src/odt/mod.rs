//! Word to OpenDocument Text conversion engine.
//!
//! A conversion runs in four phases:
//!
//! 1. the style sheet is translated into named ODF styles,
//! 2. the parser walks the main text and reports events to a
//!    [`ConversionSession`], which builds page layouts, master pages and
//!    headers as sections open and close,
//! 3. the deferred work (note and annotation bodies) is drained until the
//!    queue reaches a fixed point,
//! 4. the note and line numbering configurations and the metadata are
//!    written and the package parts are assembled.
//!
//! # Examples
//!
//! ```no_run
//! use doc2odt::odt::{OdtOptions, convert};
//! use doc2odt::ole::doc::{DocumentSource, NoPictures};
//!
//! fn to_odt<S: DocumentSource>(source: &mut S) -> doc2odt::Result<()> {
//!     let document = convert(source, &mut NoPictures, &OdtOptions::default())?;
//!     document.save("out.odt")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod finalize;
pub mod header;
pub mod metadata;
pub mod page_layout;
pub mod queue;
pub mod section;
pub mod session;
pub mod styles;
pub mod text;

pub use config::OdtOptions;
pub use session::{ConversionReport, ConversionSession};

use crate::common::{Error, Result};
use crate::odf::OdtDocument;
use crate::ole::doc::events::{DocumentSource, PictureResolver};
use queue::drain_all;

/// Convert a parsed Word document into an ODT package.
///
/// # Errors
///
/// * [`Error::ParserUnavailable`] when the parser fails on the main text
/// * [`Error::InconsistentState`] when the main text leaves a section,
///   header, paragraph or other structure open
/// * [`Error::InvariantViolation`] when the parser cannot resolve a
///   reference it reported
pub fn convert<S: DocumentSource>(
    source: &mut S,
    resolver: &mut dyn PictureResolver,
    options: &OdtOptions,
) -> Result<OdtDocument> {
    convert_with_report(source, resolver, options).map(|(document, _)| document)
}

/// [`convert`], also returning a summary of the conversion.
pub fn convert_with_report<S: DocumentSource>(
    source: &mut S,
    resolver: &mut dyn PictureResolver,
    options: &OdtOptions,
) -> Result<(OdtDocument, ConversionReport)> {
    let mut session = ConversionSession::new(
        source.style_sheet(),
        source.dop(),
        source.headers_changed(),
        resolver,
        options,
    );

    source.parse(&mut session).map_err(|err| match err {
        Error::InvariantViolation(_)
        | Error::InconsistentState(_)
        | Error::ParserUnavailable(_)
        | Error::Corrupted(_) => err,
        other => Error::ParserUnavailable(other.to_string()),
    })?;
    session.check_consistency()?;

    drain_all(&mut session, &mut *source)?;

    let (document, report) = session.finish(source.associated_strings())?;
    log::info!(
        "Converted {} sections: {} master pages, {} paragraph and {} text styles, {} sub-documents",
        report.sections,
        report.master_pages,
        report.paragraph_styles,
        report.text_styles,
        report.queue.executed,
    );
    Ok((document, report))
}
