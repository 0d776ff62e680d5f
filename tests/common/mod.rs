//! Scripted document source for conversion tests.
//!
//! A [`ScriptedDocument`] replays a fixed list of events for the main text
//! and answers sub-document requests from maps keyed by the reference the
//! session hands back.
#![allow(dead_code)]

use std::collections::HashMap;

use doc2odt::ole::doc::parts::{
    AssociatedStrings, DocumentProperties, FontTable, HeaderFooterFlags, SectionProperties,
    StyleRecord, StyleSheet,
};
use doc2odt::ole::doc::{
    AnnotationReference, CellDescriptor, DocumentSource, HeaderGroup, HeaderKind, NoteKind,
    NoteReference, ParagraphEvent, ParserEvents, PictureData, RunProperties, SubDocumentParser,
    SubDocumentRef, TableDescriptor, TableRow,
};
use doc2odt::{Error, Result};
use fixedbitset::FixedBitSet;

#[derive(Debug, Clone)]
pub enum Step {
    SectionStart(SectionProperties),
    SectionEnd(SectionProperties),
    Headers(HeaderGroup),
    /// A complete paragraph with one run of text
    Paragraph(u16, &'static str),
    OpenParagraph(u16),
    Text(&'static str),
    CloseParagraph,
    Note(NoteReference),
    Annotation(AnnotationReference),
    Table(TableDescriptor),
    Picture(PictureData),
    TextBox(u32),
    Fail(&'static str),
}

pub struct ScriptedDocument {
    pub dop: DocumentProperties,
    pub sheet: StyleSheet,
    pub strings: AssociatedStrings,
    pub headers_changed: FixedBitSet,
    pub main: Vec<Step>,
    pub headers: HashMap<u32, Vec<(HeaderKind, Vec<Step>)>>,
    pub bodies: HashMap<SubDocumentRef, Vec<Step>>,
    pub rows: HashMap<u32, Vec<(CellDescriptor, Vec<Step>)>>,
    pub text_boxes: HashMap<u32, Vec<Step>>,
}

impl ScriptedDocument {
    pub fn new(main: Vec<Step>) -> Self {
        Self {
            dop: DocumentProperties::default(),
            sheet: StyleSheet::from_records(
                vec![StyleRecord::paragraph(0, "Normal")],
                FontTable::from_names(["Times New Roman"]),
            ),
            strings: AssociatedStrings::default(),
            headers_changed: FixedBitSet::with_capacity(16),
            main,
            headers: HashMap::new(),
            bodies: HashMap::new(),
            rows: HashMap::new(),
            text_boxes: HashMap::new(),
        }
    }

    pub fn with_body(mut self, target: SubDocumentRef, steps: Vec<Step>) -> Self {
        self.bodies.insert(target, steps);
        self
    }

    pub fn with_headers(mut self, section: u32, stories: Vec<(HeaderKind, Vec<Step>)>) -> Self {
        self.headers.insert(section, stories);
        self
    }

    pub fn with_row(mut self, index: u32, cells: Vec<(CellDescriptor, Vec<Step>)>) -> Self {
        self.rows.insert(index, cells);
        self
    }

    fn play(&mut self, steps: Vec<Step>, events: &mut dyn ParserEvents) -> Result<()> {
        for step in steps {
            match step {
                Step::SectionStart(sep) => events.section_start(&sep)?,
                Step::SectionEnd(sep) => events.section_end(&sep)?,
                Step::Headers(group) => events.headers_found(group, self)?,
                Step::Paragraph(style, text) => {
                    events.paragraph_start(&ParagraphEvent {
                        style,
                        ..Default::default()
                    })?;
                    events.run_of_text(text, &RunProperties::default())?;
                    events.paragraph_end()?;
                },
                Step::OpenParagraph(style) => events.paragraph_start(&ParagraphEvent {
                    style,
                    ..Default::default()
                })?,
                Step::Text(text) => events.run_of_text(text, &RunProperties::default())?,
                Step::CloseParagraph => events.paragraph_end()?,
                Step::Note(reference) => events.footnote_found(reference)?,
                Step::Annotation(reference) => events.annotation_found(reference)?,
                Step::Table(table) => events.table_found(table, self)?,
                Step::Picture(picture) => events.inline_object_found(&picture)?,
                Step::TextBox(index) => events.text_box_found(index, false, self)?,
                Step::Fail(message) => return Err(Error::Corrupted(message.to_string())),
            }
        }
        Ok(())
    }
}

impl SubDocumentParser for ScriptedDocument {
    fn parse_sub_document(
        &mut self,
        target: &SubDocumentRef,
        events: &mut dyn ParserEvents,
    ) -> Result<()> {
        let steps = self
            .bodies
            .get(target)
            .cloned()
            .ok_or_else(|| Error::InvariantViolation(format!("no body for {:?}", target)))?;
        match target {
            SubDocumentRef::Footnote(_) => events.footnote_start(NoteKind::Footnote)?,
            SubDocumentRef::Endnote(_) => events.footnote_start(NoteKind::Endnote)?,
            SubDocumentRef::Annotation(_) => events.annotation_start()?,
        }
        self.play(steps, events)?;
        match target {
            SubDocumentRef::Annotation(_) => events.annotation_end(),
            _ => events.footnote_end(),
        }
    }

    fn parse_headers(&mut self, group: &HeaderGroup, events: &mut dyn ParserEvents) -> Result<()> {
        let stories = self.headers.get(&group.section).cloned().unwrap_or_default();
        for (kind, steps) in stories {
            events.header_start(kind)?;
            self.play(steps, events)?;
            events.header_end()?;
        }
        Ok(())
    }

    fn parse_table_row(&mut self, row: &TableRow, events: &mut dyn ParserEvents) -> Result<()> {
        let cells = self
            .rows
            .get(&row.index)
            .cloned()
            .ok_or_else(|| Error::InvariantViolation(format!("no row {}", row.index)))?;
        for (cell, steps) in cells {
            events.table_cell_start(&cell)?;
            self.play(steps, events)?;
            events.table_cell_end()?;
        }
        Ok(())
    }

    fn parse_text_box(
        &mut self,
        index: u32,
        _styles_xml: bool,
        events: &mut dyn ParserEvents,
    ) -> Result<()> {
        let steps = self.text_boxes.get(&index).cloned().unwrap_or_default();
        self.play(steps, events)
    }

    fn parse_floating_object(&mut self, _global_cp: u32, _events: &mut dyn ParserEvents) -> Result<()> {
        Ok(())
    }
}

impl DocumentSource for ScriptedDocument {
    fn dop(&self) -> &DocumentProperties {
        &self.dop
    }

    fn style_sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    fn associated_strings(&self) -> &AssociatedStrings {
        &self.strings
    }

    fn headers_changed(&self) -> &FixedBitSet {
        &self.headers_changed
    }

    fn parse(&mut self, events: &mut dyn ParserEvents) -> Result<()> {
        let main = std::mem::take(&mut self.main);
        self.play(main, events)
    }
}

/// A letter-size section with the given header/footer stories.
pub fn section(headers: HeaderFooterFlags) -> SectionProperties {
    SectionProperties {
        headers,
        ..SectionProperties::default()
    }
}

/// The group of header stories for a zero-based section.
pub fn header_group(section: u32, defined: HeaderFooterFlags) -> HeaderGroup {
    HeaderGroup { section, defined }
}

/// Assert that `xml` parses without errors.
pub fn assert_well_formed(xml: &str) {
    let mut reader = quick_xml::Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(quick_xml::events::Event::Eof) => break,
            Ok(_) => {},
            Err(err) => panic!("malformed XML at {}: {}\n{}", reader.buffer_position(), err, xml),
        }
    }
}

/// The attributes of the first `style:page-layout-properties` element
/// of the page layout named `name`.
pub fn page_layout_properties<'a>(styles_xml: &'a str, name: &str) -> &'a str {
    let start = styles_xml
        .find(&format!(r#"<style:page-layout style:name="{}">"#, name))
        .unwrap_or_else(|| panic!("no page layout {}", name));
    let rest = &styles_xml[start..];
    let props = rest.find("<style:page-layout-properties").unwrap();
    let rest = &rest[props..];
    &rest[..rest.find('>').unwrap()]
}
