/// Document-level settings written once the whole text is converted:
/// footnote and endnote numbering and line numbering.
use crate::odf::StyleRegistry;
use crate::ole::doc::parts::{DocumentProperties, LineNumbering, NoteRestart};

/// ODF number format for a Word nfc code.
pub fn number_format(nfc: u8) -> &'static str {
    match nfc {
        0 => "1",
        1 => "I",
        2 => "i",
        3 => "A",
        4 => "a",
        other => {
            log::warn!("Unsupported note number format {}, using arabic numbers", other);
            "1"
        },
    }
}

fn start_numbering_at(restart: NoteRestart) -> &'static str {
    match restart {
        NoteRestart::Continuous => "document",
        NoteRestart::EachSection => "chapter",
        NoteRestart::EachPage => "page",
    }
}

/// `text:notes-configuration` for footnotes.
pub fn footnotes_configuration(dop: &DocumentProperties) -> String {
    format!(
        concat!(
            r#"<text:notes-configuration text:note-class="footnote" style:num-format="{}" "#,
            r#"text:start-value="{}" text:footnotes-position="page" text:start-numbering-at="{}"/>"#
        ),
        number_format(dop.footnote_format),
        dop.footnote_start.saturating_sub(1),
        start_numbering_at(dop.footnote_restart),
    )
}

/// `text:notes-configuration` for endnotes. ODF has no restart policy for
/// endnotes, so `text:start-numbering-at` is never written here.
pub fn endnotes_configuration(dop: &DocumentProperties) -> String {
    format!(
        r#"<text:notes-configuration text:note-class="endnote" style:num-format="{}" text:start-value="{}"/>"#,
        number_format(dop.endnote_format),
        dop.endnote_start.saturating_sub(1),
    )
}

/// `text:linenumbering-configuration` for the line numbering of a section.
pub fn line_numbering_configuration(numbering: &LineNumbering, style: Option<&str>) -> String {
    let mut xml = String::from(r#"<text:linenumbering-configuration"#);
    if let Some(style) = style {
        xml.push_str(&format!(
            r#" text:style-name="{}""#,
            crate::common::xml::escape_xml(style)
        ));
    }
    let restart = if numbering.restart == 0 { "true" } else { "false" };
    xml.push_str(&format!(
        concat!(
            r#" text:number-lines="true" text:increment="{}" text:restart-on-page="{}""#,
            r#" text:offset="{}" style:num-format="1" text:number-position="left"/>"#
        ),
        numbering.count_by.max(1),
        restart,
        crate::common::unit::Pt::from_twips(numbering.distance.max(0) as i32),
    ));
    xml
}

/// Write the numbering configurations into the `office:styles` section.
pub fn finalize(
    dop: &DocumentProperties,
    line_numbering: Option<(&LineNumbering, Option<&str>)>,
    registry: &mut StyleRegistry,
) {
    registry.insert_raw(footnotes_configuration(dop));
    registry.insert_raw(endnotes_configuration(dop));

    if let Some((numbering, style)) = line_numbering {
        registry.insert_raw(line_numbering_configuration(numbering, style));
    }
}
