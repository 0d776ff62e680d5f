//! OpenDocument Text package.
//!
//! An [`OdtDocument`] holds the serialised parts of a converted document and
//! writes them as a `.odt` package.

use std::path::Path;

use crate::common::{Metadata, Result};
use crate::odf::core::{PackageWriter, XmlWriter};

/// MIME type of OpenDocument Text packages
pub const ODT_MIME_TYPE: &str = "application/vnd.oasis.opendocument.text";

/// ODF version written on every root element
pub const ODF_VERSION: &str = "1.2";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

const NAMESPACES: &[(&str, &str)] = &[
    ("xmlns:office", "urn:oasis:names:tc:opendocument:xmlns:office:1.0"),
    ("xmlns:style", "urn:oasis:names:tc:opendocument:xmlns:style:1.0"),
    ("xmlns:text", "urn:oasis:names:tc:opendocument:xmlns:text:1.0"),
    ("xmlns:table", "urn:oasis:names:tc:opendocument:xmlns:table:1.0"),
    ("xmlns:draw", "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0"),
    ("xmlns:fo", "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0"),
    ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:meta", "urn:oasis:names:tc:opendocument:xmlns:meta:1.0"),
    ("xmlns:number", "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0"),
    ("xmlns:svg", "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0"),
];

/// Open a root element (`office:document-content`, ...) with the ODF
/// namespace declarations and version.
pub fn start_root(w: &mut XmlWriter, name: &str) {
    w.start_element(name);
    for (prefix, uri) in NAMESPACES {
        w.add_attribute(prefix, uri);
    }
    w.add_attribute("office:version", ODF_VERSION);
}

/// Prefix a finished part with the XML declaration.
pub fn with_declaration(xml: &str) -> String {
    let mut out = String::with_capacity(XML_DECLARATION.len() + xml.len());
    out.push_str(XML_DECLARATION);
    out.push_str(xml);
    out
}

/// A converted document.
///
/// # Examples
///
/// ```no_run
/// # fn example(doc: doc2odt::OdtDocument) -> doc2odt::Result<()> {
/// doc.save("converted.odt")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OdtDocument {
    content_xml: String,
    styles_xml: String,
    meta_xml: String,
    pictures: Vec<(String, Vec<u8>)>,
    metadata: Metadata,
}

impl OdtDocument {
    pub fn new(
        content_xml: String,
        styles_xml: String,
        meta_xml: String,
        pictures: Vec<(String, Vec<u8>)>,
        metadata: Metadata,
    ) -> Self {
        Self {
            content_xml,
            styles_xml,
            meta_xml,
            pictures,
            metadata,
        }
    }

    pub fn content_xml(&self) -> &str {
        &self.content_xml
    }

    pub fn styles_xml(&self) -> &str {
        &self.styles_xml
    }

    pub fn meta_xml(&self) -> &str {
        &self.meta_xml
    }

    /// Pictures stored in the package, by package path.
    pub fn pictures(&self) -> &[(String, Vec<u8>)] {
        &self.pictures
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Write the package to memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = PackageWriter::new(ODT_MIME_TYPE)?;
        writer.add_file("content.xml", self.content_xml.as_bytes())?;
        writer.add_file("styles.xml", self.styles_xml.as_bytes())?;
        writer.add_file("meta.xml", self.meta_xml.as_bytes())?;
        for (path, bytes) in &self.pictures {
            writer.add_file(path, bytes)?;
        }
        writer.finish_to_bytes()
    }

    /// Write the package to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
