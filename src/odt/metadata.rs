/// Metadata translation.
///
/// The associated strings table supplies the textual document properties,
/// the document options record the creation and revision dates. Properties
/// the source does not have are left out of `meta.xml`.
use crate::common::{Metadata, Result};
use crate::odf::core::XmlWriter;
use crate::ole::doc::parts::{AssociatedStrings, DocumentProperties};

/// Value of `meta:generator`.
pub const GENERATOR: &str = concat!("doc2odt/", env!("CARGO_PKG_VERSION"));

/// Collect the document metadata.
pub fn collect_metadata(strings: &AssociatedStrings, dop: &DocumentProperties) -> Metadata {
    Metadata {
        title: strings.title.clone(),
        subject: strings.subject.clone(),
        author: strings.author.clone(),
        keywords: strings.keywords.clone(),
        description: strings.comments.clone(),
        last_modified_by: strings.last_revised_by.clone(),
        created: dop.created.map(|dt| dt.and_utc()),
        modified: dop.revised.map(|dt| dt.and_utc()),
    }
}

/// Write the content of `office:meta`.
pub fn write_metadata(metadata: &Metadata, w: &mut XmlWriter) -> Result<()> {
    text_element(w, "meta:generator", Some(GENERATOR))?;

    let fields = [
        ("meta:initial-creator", &metadata.author),
        ("dc:title", &metadata.title),
        ("dc:subject", &metadata.subject),
        ("dc:creator", &metadata.last_modified_by),
        ("meta:keyword", &metadata.keywords),
        ("dc:description", &metadata.description),
    ];
    for (element, value) in fields {
        text_element(w, element, value.as_deref())?;
    }

    let created = metadata.created.map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string());
    text_element(w, "meta:creation-date", created.as_deref())?;
    let modified = metadata.modified.map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string());
    text_element(w, "dc:date", modified.as_deref())
}

fn text_element(w: &mut XmlWriter, name: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    w.start_element(name);
    w.add_text_node(value);
    w.end_element()
}
