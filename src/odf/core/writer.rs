//! ODF package writing functionality.
//!
//! An ODF package is a ZIP archive whose first entry is the uncompressed
//! `mimetype` file, followed by the XML parts, pictures and the manifest.

use crate::common::Result;
use crate::common::xml::escape_xml;
use std::io::{Seek, Write};
use zip::write::{SimpleFileOptions, ZipWriter};

/// Builder for ODF packages (ZIP archives).
///
/// The MIME type is written as the first, stored entry when the writer is
/// created; the manifest is generated by [`PackageWriter::finish`].
///
/// # Examples
///
/// ```no_run
/// # use doc2odt::odf::core::PackageWriter;
/// # fn example() -> doc2odt::Result<()> {
/// let mut writer = PackageWriter::new("application/vnd.oasis.opendocument.text")?;
/// writer.add_file("content.xml", b"<office:document-content/>")?;
/// let bytes = writer.finish_to_bytes()?;
/// std::fs::write("document.odt", bytes)?;
/// # Ok(())
/// # }
/// ```
pub struct PackageWriter<W: Write + Seek> {
    zip_writer: ZipWriter<W>,
    manifest_entries: Vec<ManifestEntry>,
}

/// Entry in the ODF manifest
#[derive(Debug, Clone)]
struct ManifestEntry {
    full_path: String,
    media_type: String,
}

impl PackageWriter<std::io::Cursor<Vec<u8>>> {
    /// Create a package writer that writes to memory.
    pub fn new(mimetype: &str) -> Result<Self> {
        Self::with_writer(std::io::Cursor::new(Vec::new()), mimetype)
    }

    /// Finish writing and return the bytes.
    pub fn finish_to_bytes(self) -> Result<Vec<u8>> {
        let cursor = self.finish()?;
        Ok(cursor.into_inner())
    }
}

impl<W: Write + Seek> PackageWriter<W> {
    /// Create a package writer on top of `writer`.
    pub fn with_writer(writer: W, mimetype: &str) -> Result<Self> {
        let mut zip_writer = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip_writer.start_file("mimetype", options)?;
        zip_writer.write_all(mimetype.as_bytes())?;

        Ok(Self {
            zip_writer,
            manifest_entries: vec![ManifestEntry {
                full_path: "/".to_string(),
                media_type: mimetype.to_string(),
            }],
        })
    }

    /// Add a file to the package, recording it in the manifest with a media
    /// type guessed from its extension.
    ///
    /// # Arguments
    ///
    /// * `path` - Path within the ZIP archive (e.g., "content.xml", "Pictures/image1.png")
    /// * `content` - File content as bytes
    pub fn add_file(&mut self, path: &str, content: &[u8]) -> Result<()> {
        self.manifest_entries.push(ManifestEntry {
            full_path: path.to_string(),
            media_type: Self::guess_media_type(path).to_string(),
        });

        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer.start_file(path, options)?;
        self.zip_writer.write_all(content)?;
        Ok(())
    }

    /// Generate the manifest.xml content
    fn generate_manifest(&self) -> String {
        let mut manifest = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
"#,
        );

        for entry in &self.manifest_entries {
            manifest.push_str(&format!(
                r#"  <manifest:file-entry manifest:full-path="{}" manifest:media-type="{}"/>
"#,
                escape_xml(&entry.full_path),
                escape_xml(&entry.media_type)
            ));
        }

        manifest.push_str("</manifest:manifest>\n");
        manifest
    }

    /// Guess media type from file path
    fn guess_media_type(path: &str) -> &'static str {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".xml") {
            "text/xml"
        } else if lower.ends_with(".png") {
            "image/png"
        } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            "image/jpeg"
        } else if lower.ends_with(".gif") {
            "image/gif"
        } else if lower.ends_with(".bmp") {
            "image/bmp"
        } else if lower.ends_with(".wmf") {
            "image/x-wmf"
        } else if lower.ends_with(".emf") {
            "image/x-emf"
        } else {
            "application/octet-stream"
        }
    }

    /// Write the manifest and finalize the ZIP archive.
    pub fn finish(mut self) -> Result<W> {
        let manifest_content = self.generate_manifest();
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer.start_file("META-INF/manifest.xml", options)?;
        self.zip_writer.write_all(manifest_content.as_bytes())?;

        let writer = self.zip_writer.finish()?;
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_mimetype_first_and_stored() {
        let mut writer = PackageWriter::new("application/vnd.oasis.opendocument.text").unwrap();
        writer.add_file("content.xml", b"<x/>").unwrap();
        writer.add_file("Pictures/a.PNG", &[1, 2, 3]).unwrap();
        let bytes = writer.finish_to_bytes().unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), zip::CompressionMethod::Stored);
        let mut mimetype = String::new();
        first.read_to_string(&mut mimetype).unwrap();
        assert_eq!(mimetype, "application/vnd.oasis.opendocument.text");
        drop(first);

        let mut manifest = String::new();
        archive
            .by_name("META-INF/manifest.xml")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        assert!(manifest.contains(r#"manifest:full-path="Pictures/a.PNG" manifest:media-type="image/png""#));
        assert!(manifest.contains(r#"manifest:full-path="content.xml" manifest:media-type="text/xml""#));
    }
}
