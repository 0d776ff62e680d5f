/// Conversion session: the per-document state of one conversion.
///
/// The session receives the parser's events, drives the section and header
/// state machines, writes text into its frame stack and runs sub-document
/// work. A session is created for one document and consumed when the
/// document is assembled.
use fixedbitset::FixedBitSet;

use crate::common::{Error, RGBColor, Result};
use crate::common::unit::Pt;
use crate::odf::core::{SlotContents, SlotId, XmlWriter};
use crate::odf::odt::{start_root, with_declaration};
use crate::odf::{InsertFlags, OdfStyle, OdtDocument, PropertyType, StyleFamily, StyleRegistry};
use crate::odt::OdtOptions;
use crate::odt::finalize::finalize;
use crate::odt::header::HeaderCapture;
use crate::odt::metadata::{collect_metadata, write_metadata};
use crate::odt::page_layout::PageContext;
use crate::odt::queue::{QueueStats, WorkExecutor, WorkItem, WorkQueue};
use crate::odt::section::{SectionMachine, SectionState};
use crate::odt::styles::{
    StyleNames, apply_character_properties, apply_paragraph_properties, translate_styles,
};
use crate::odt::text::{Frame, FrameKind, PictureStore};
use crate::ole::doc::events::{
    AnnotationReference, CellDescriptor, HeaderGroup, HeaderKind, NoteKind, NoteReference,
    ParagraphEvent, ParserEvents, PictureData, PictureResolver, RunProperties, SubDocumentParser,
    SubDocumentRef, TableDescriptor,
};
use crate::ole::doc::parts::{
    AssociatedStrings, DocumentProperties, FontTable, SectionProperties, StyleSheet,
};

/// Summary of a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub sections: u32,
    pub master_pages: usize,
    pub paragraph_styles: usize,
    pub text_styles: usize,
    pub queue: QueueStats,
}

/// A note or annotation body the parser is about to report.
#[derive(Debug, Clone)]
enum PendingBody {
    Note {
        reference: NoteReference,
        slot: SlotId,
    },
    Annotation {
        reference: AnnotationReference,
        slot: SlotId,
    },
}

impl PendingBody {
    fn target(&self) -> SubDocumentRef {
        match self {
            PendingBody::Note { reference, .. } => reference.body(),
            PendingBody::Annotation { reference, .. } => reference.body(),
        }
    }
}

/// State of one document conversion.
pub struct ConversionSession<'a> {
    options: &'a OdtOptions,
    resolver: &'a mut dyn PictureResolver,
    registry: StyleRegistry,
    names: StyleNames,
    fonts: FontTable,
    dop: DocumentProperties,
    headers_changed: FixedBitSet,
    sections: SectionMachine,
    headers: HeaderCapture,
    queue: WorkQueue,
    frames: Vec<Frame>,
    slots: SlotContents,
    next_slot: u32,
    pending_body: Option<PendingBody>,
    /// Column spans of the open table cells
    cell_spans: Vec<u16>,
    footnote_number: u32,
    endnote_number: u32,
    tables: u32,
    /// Number of tables being converted, nested ones included
    open_tables: u32,
    drawings: u32,
    pictures: PictureStore,
    current_background: Option<RGBColor>,
}

impl<'a> ConversionSession<'a> {
    /// Start a conversion: the style sheet is translated right away.
    pub fn new(
        sheet: &StyleSheet,
        dop: &DocumentProperties,
        headers_changed: &FixedBitSet,
        resolver: &'a mut dyn PictureResolver,
        options: &'a OdtOptions,
    ) -> Self {
        let mut registry = StyleRegistry::new();
        let names = translate_styles(sheet, dop, &mut registry);

        Self {
            options,
            resolver,
            registry,
            names,
            fonts: sheet.fonts().clone(),
            dop: dop.clone(),
            headers_changed: headers_changed.clone(),
            sections: SectionMachine::new(),
            headers: HeaderCapture::new(),
            queue: WorkQueue::new(),
            frames: vec![Frame::new(FrameKind::Body)],
            slots: SlotContents::new(),
            next_slot: 0,
            pending_body: None,
            cell_spans: Vec::new(),
            footnote_number: dop.footnote_start as u32,
            endnote_number: dop.endnote_start as u32,
            tables: 0,
            open_tables: 0,
            drawings: 0,
            pictures: PictureStore::default(),
            current_background: None,
        }
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn sections(&self) -> &SectionMachine {
        &self.sections
    }

    pub fn queue_stats(&self) -> QueueStats {
        self.queue.stats()
    }

    /// Background color of the last section with a solid page fill.
    pub fn current_background(&self) -> Option<RGBColor> {
        self.current_background
    }

    /// Verify the main text left nothing open. Open lists are closed.
    pub fn check_consistency(&mut self) -> Result<()> {
        let problems = self.sections.inconsistencies();
        if !problems.is_empty() {
            return Err(Error::InconsistentState(problems.join("; ")));
        }
        if self.sections.state() == SectionState::InSection {
            return Err(Error::InconsistentState(format!(
                "section {} was never closed",
                self.sections.section_count()
            )));
        }
        if self.headers.is_capturing() {
            return Err(Error::InconsistentState("header still open".to_string()));
        }
        if self.frames.len() != 1 {
            return Err(Error::InconsistentState(format!(
                "{} output frames still open",
                self.frames.len() - 1
            )));
        }

        let body = self.frame()?;
        if body.in_paragraph() {
            return Err(Error::InconsistentState("paragraph still open".to_string()));
        }
        body.close_lists()?;
        if !body.writer.is_balanced() {
            return Err(Error::InconsistentState(format!(
                "{} elements still open in the main text",
                body.writer.depth()
            )));
        }
        Ok(())
    }

    /// Write the document-level records and assemble the package parts.
    pub fn finish(mut self, strings: &AssociatedStrings) -> Result<(OdtDocument, ConversionReport)> {
        let numbering = self
            .sections
            .line_numbering()
            .filter(|_| self.options.emit_line_numbering);
        finalize(
            &self.dop,
            numbering.as_ref().map(|n| (n, self.names.line_number_style())),
            &mut self.registry,
        );

        let report = ConversionReport {
            sections: self.sections.section_count(),
            master_pages: self.sections.master_pages_created(),
            paragraph_styles: self.registry.count(StyleFamily::Paragraph),
            text_styles: self.registry.count(StyleFamily::Text),
            queue: self.queue.stats(),
        };

        let body = self
            .frames
            .pop()
            .ok_or_else(|| Error::InconsistentState("main text frame missing".to_string()))?;

        let mut w = XmlWriter::new();
        start_root(&mut w, "office:document-content");
        self.registry.write_font_face_decls(&mut w)?;
        self.registry.write_automatic_styles(&mut w, false)?;
        w.start_element("office:body");
        w.start_element("office:text");
        w.add_writer(body.writer)?;
        w.end_element()?;
        w.end_element()?;
        w.end_element()?;
        let content = with_declaration(&w.finish_with(&mut self.slots)?);
        if !self.slots.is_empty() {
            log::warn!("{} converted bodies were never referenced", self.slots.len());
        }

        let mut w = XmlWriter::new();
        start_root(&mut w, "office:document-styles");
        self.registry.write_font_face_decls(&mut w)?;
        self.registry.write_common_styles(&mut w)?;
        self.registry.write_automatic_styles(&mut w, true)?;
        self.registry.write_master_styles(&mut w)?;
        w.end_element()?;
        let styles = with_declaration(&w.finish()?);

        let metadata = collect_metadata(strings, &self.dop);
        if !metadata.has_data() {
            log::debug!("Document carries no metadata");
        }
        let mut w = XmlWriter::new();
        start_root(&mut w, "office:document-meta");
        w.start_element("office:meta");
        write_metadata(&metadata, &mut w)?;
        w.end_element()?;
        w.end_element()?;
        let meta = with_declaration(&w.finish()?);

        let document = OdtDocument::new(content, styles, meta, self.pictures.into_entries(), metadata);
        Ok((document, report))
    }

    fn frame(&mut self) -> Result<&mut Frame> {
        self.frames
            .last_mut()
            .ok_or_else(|| Error::InconsistentState("no output frame".to_string()))
    }

    /// Pop the top frame if it is not the main text and `is_expected` holds.
    fn pop_frame(&mut self, what: &str, is_expected: impl Fn(FrameKind) -> bool) -> Result<Frame> {
        match self.frames.last() {
            Some(frame) if self.frames.len() > 1 && is_expected(frame.kind) => {},
            _ => {
                return Err(Error::InvariantViolation(format!("{} without matching start", what)));
            },
        }
        let mut frame = self
            .frames
            .pop()
            .ok_or_else(|| Error::InconsistentState("no output frame".to_string()))?;
        if frame.in_paragraph() {
            return Err(Error::InconsistentState(format!("{} inside an open paragraph", what)));
        }
        frame.close_lists()?;
        Ok(frame)
    }

    fn reserve_slot(&mut self) -> Result<SlotId> {
        self.next_slot += 1;
        let slot = SlotId(self.next_slot);
        self.frame()?.writer.add_slot(slot);
        Ok(slot)
    }

    fn run_inline(&mut self, item: WorkItem, parser: &mut dyn SubDocumentParser) -> Result<()> {
        self.queue.record_inline();
        self.execute(item, parser)
    }

    /// Have the parser report a queued note or annotation body.
    fn convert_body(&mut self, body: PendingBody, parser: &mut dyn SubDocumentParser) -> Result<()> {
        let target = body.target();
        let depth = self.frames.len();
        self.pending_body = Some(body);

        parser.parse_sub_document(&target, self)?;

        if self.pending_body.take().is_some() {
            return Err(Error::InvariantViolation(format!(
                "{:?} was never reported by the parser",
                target
            )));
        }
        if self.frames.len() != depth {
            return Err(Error::InconsistentState(format!("{:?} was left open", target)));
        }
        Ok(())
    }

    fn convert_table(&mut self, table: TableDescriptor, parser: &mut dyn SubDocumentParser) -> Result<()> {
        self.tables += 1;
        let name = format!("Table{}", self.tables);

        // A table opening a section starts its master page
        let master_page = if self.open_tables == 0 && self.frame()?.kind == FrameKind::Body {
            self.sections.take_next_master_page()
        } else {
            None
        };

        let width: u32 = table.column_widths.iter().map(|&w| w as u32).sum();
        let mut table_style = OdfStyle::automatic(StyleFamily::Table);
        if let Some(master) = &master_page {
            table_style.add_attribute("style:master-page-name", master);
        }
        table_style.add_property(PropertyType::Table, "style:width", Pt::from_twips(width as i32));
        table_style.add_property(PropertyType::Table, "table:align", "margins");
        let table_style = self.registry.insert(table_style, &name, InsertFlags::DONT_ADD_NUMBER);

        let column_styles: Vec<String> = table
            .column_widths
            .iter()
            .map(|&width| {
                let mut column = OdfStyle::automatic(StyleFamily::TableColumn);
                column.add_property(
                    PropertyType::TableColumn,
                    "style:column-width",
                    Pt::from_twips(width as i32),
                );
                self.registry.insert(column, &format!("{}.", name), InsertFlags::empty())
            })
            .collect();

        let frame = self.frame()?;
        if frame.in_paragraph() {
            return Err(Error::InconsistentState(format!("{} inside an open paragraph", name)));
        }
        frame.close_lists()?;
        let w = &mut frame.writer;
        w.start_element("table:table");
        w.add_attribute("table:name", &name);
        w.add_attribute("table:style-name", &table_style);
        for style in &column_styles {
            w.start_element("table:table-column");
            w.add_attribute("table:style-name", style);
            w.end_element()?;
        }
        let depth = w.depth();

        self.open_tables += 1;
        let rows = self.convert_rows(&table, &name, depth, parser);
        self.open_tables -= 1;
        rows?;

        self.frame()?.writer.end_element()
    }

    fn convert_rows(
        &mut self,
        table: &TableDescriptor,
        name: &str,
        depth: usize,
        parser: &mut dyn SubDocumentParser,
    ) -> Result<()> {
        for row in &table.rows {
            self.frame()?.writer.start_element("table:table-row");
            parser.parse_table_row(row, self)?;
            let w = &mut self.frame()?.writer;
            if w.depth() != depth + 1 {
                return Err(Error::InconsistentState(format!(
                    "row {} of {} left {} elements open",
                    row.index,
                    name,
                    w.depth() as isize - depth as isize - 1
                )));
            }
            w.end_element()?;
        }
        Ok(())
    }

    fn convert_text_box(
        &mut self,
        index: u32,
        styles_xml: bool,
        parser: &mut dyn SubDocumentParser,
    ) -> Result<()> {
        self.drawings += 1;
        let name = format!("Text Frame{}", self.drawings);

        let frame = self.frame()?;
        let own_paragraph = !frame.in_paragraph();
        if own_paragraph {
            frame.start_paragraph(None);
        }
        frame.writer.start_element("draw:frame");
        frame.writer.add_attribute("draw:name", &name);
        frame.writer.add_attribute("text:anchor-type", "paragraph");
        frame.writer.start_element("draw:text-box");

        self.frames.push(Frame::new(FrameKind::TextBox));
        parser.parse_text_box(index, styles_xml, self)?;
        let inner = self.pop_frame("text box end", |kind| kind == FrameKind::TextBox)?;

        let frame = self.frame()?;
        frame.writer.add_writer(inner.writer)?;
        frame.writer.end_element()?;
        frame.writer.end_element()?;
        if own_paragraph {
            frame.end_paragraph()?;
        }
        Ok(())
    }

    fn write_picture(&mut self, picture: &PictureData) -> Result<()> {
        self.drawings += 1;
        let path = format!("Pictures/{}", picture.name);
        if self.options.embed_pictures {
            self.pictures.add(&path, picture.bytes.clone());
        }

        let name = format!("Picture{}", self.drawings);
        let frame = self.frame()?;
        let own_paragraph = !frame.in_paragraph();
        if own_paragraph {
            frame.start_paragraph(None);
        }
        let w = &mut frame.writer;
        w.start_element("draw:frame");
        w.add_attribute("draw:name", &name);
        w.add_attribute("text:anchor-type", "as-char");
        w.add_attribute("svg:width", Pt::from_twips(picture.width_twips as i32));
        w.add_attribute("svg:height", Pt::from_twips(picture.height_twips as i32));
        w.start_element("draw:image");
        w.add_attribute("xlink:href", &path);
        w.add_attribute("xlink:type", "simple");
        w.add_attribute("xlink:show", "embed");
        w.add_attribute("xlink:actuate", "onLoad");
        w.end_element()?;
        w.end_element()?;
        if own_paragraph {
            frame.end_paragraph()?;
        }
        Ok(())
    }
}

impl WorkExecutor for ConversionSession<'_> {
    fn queue(&mut self) -> &mut WorkQueue {
        &mut self.queue
    }

    fn execute(&mut self, item: WorkItem, parser: &mut dyn SubDocumentParser) -> Result<()> {
        match item {
            WorkItem::Footnote { reference, slot } | WorkItem::Endnote { reference, slot } => {
                self.convert_body(PendingBody::Note { reference, slot }, parser)
            },
            WorkItem::Annotation { reference, slot } => {
                self.convert_body(PendingBody::Annotation { reference, slot }, parser)
            },
            WorkItem::HeaderGroup(group) => parser.parse_headers(&group, self),
            WorkItem::Table(table) => self.convert_table(table, parser),
            WorkItem::InlineObject(picture) => self.write_picture(&picture),
            WorkItem::FloatingObject { global_cp } => parser.parse_floating_object(global_cp, self),
            WorkItem::TextBox { index, styles_xml } => self.convert_text_box(index, styles_xml, parser),
        }
    }
}

impl ParserEvents for ConversionSession<'_> {
    fn section_start(&mut self, sep: &SectionProperties) -> Result<()> {
        let mut ctx = PageContext {
            resolver: &mut *self.resolver,
            options: self.options,
            current_background: &mut self.current_background,
            pictures: &mut self.pictures,
        };
        self.sections.section_start(sep, &self.headers_changed, &mut ctx);
        Ok(())
    }

    fn section_end(&mut self, sep: &SectionProperties) -> Result<()> {
        self.headers.reset_section();
        self.sections.section_end(sep, &mut self.registry, self.options)
    }

    fn headers_found(&mut self, group: HeaderGroup, parser: &mut dyn SubDocumentParser) -> Result<()> {
        if !self.sections.accepts_headers() {
            log::debug!("Skipping headers of section {}: no new master page", group.section);
            return Ok(());
        }
        self.run_inline(WorkItem::HeaderGroup(group), parser)
    }

    fn header_start(&mut self, kind: HeaderKind) -> Result<()> {
        if self.frames.len() != 1 {
            return Err(Error::InconsistentState(format!(
                "{:?} starts inside another story",
                kind
            )));
        }
        let serial = self.sections.next_header_serial();
        let element = self.headers.start(kind, serial, self.sections.pending_mut())?;
        let mut frame = Frame::new(FrameKind::Header);
        frame.writer.start_element(element);
        self.frames.push(frame);
        Ok(())
    }

    fn header_end(&mut self) -> Result<()> {
        let frame = self.pop_frame("header end", |kind| kind == FrameKind::Header)?;
        self.headers.end(frame.writer, self.sections.pending_mut())
    }

    fn footnote_found(&mut self, reference: NoteReference) -> Result<()> {
        if self.headers.is_capturing() {
            log::warn!("Note {} in a header or footer, skipped", reference.index);
            return Ok(());
        }
        let slot = self.reserve_slot()?;
        let item = match reference.kind {
            NoteKind::Footnote => WorkItem::Footnote { reference, slot },
            NoteKind::Endnote => WorkItem::Endnote { reference, slot },
        };
        self.queue.enqueue(item);
        Ok(())
    }

    fn annotation_found(&mut self, reference: AnnotationReference) -> Result<()> {
        if self.headers.is_capturing() {
            log::warn!("Annotation {} in a header or footer, skipped", reference.index);
            return Ok(());
        }
        let slot = self.reserve_slot()?;
        self.queue.enqueue(WorkItem::Annotation { reference, slot });
        Ok(())
    }

    fn footnote_start(&mut self, kind: NoteKind) -> Result<()> {
        let Some(PendingBody::Note { reference, slot }) = self.pending_body.take() else {
            return Err(Error::InvariantViolation(format!(
                "{:?} body reported without a queued reference",
                kind
            )));
        };
        if reference.kind != kind {
            log::warn!("{:?} {} reported as {:?}", reference.kind, reference.index, kind);
        }

        let (class, prefix, counter) = match reference.kind {
            NoteKind::Footnote => ("footnote", "ftn", &mut self.footnote_number),
            NoteKind::Endnote => ("endnote", "edn", &mut self.endnote_number),
        };
        let citation = match &reference.custom_mark {
            Some(mark) => mark.clone(),
            None => {
                let number = *counter;
                *counter += 1;
                number.to_string()
            },
        };

        let mut frame = Frame::new(FrameKind::Note(slot));
        let w = &mut frame.writer;
        w.start_element("text:note");
        w.add_attribute("text:id", format!("{}{}", prefix, slot.0));
        w.add_attribute("text:note-class", class);
        w.start_element("text:note-citation");
        if reference.custom_mark.is_some() {
            w.add_attribute("text:label", &citation);
        }
        w.add_text_node(&citation);
        w.end_element()?;
        w.start_element("text:note-body");
        self.frames.push(frame);
        Ok(())
    }

    fn footnote_end(&mut self) -> Result<()> {
        let mut frame = self.pop_frame("footnote end", |kind| matches!(kind, FrameKind::Note(_)))?;
        let FrameKind::Note(slot) = frame.kind else {
            return Err(Error::InvariantViolation("footnote end outside a note".to_string()));
        };
        frame.writer.end_element()?; // text:note-body
        frame.writer.end_element()?; // text:note
        self.slots.insert(slot, frame.writer);
        Ok(())
    }

    fn annotation_start(&mut self) -> Result<()> {
        let Some(PendingBody::Annotation { reference, slot }) = self.pending_body.take() else {
            return Err(Error::InvariantViolation(
                "annotation body reported without a queued reference".to_string(),
            ));
        };

        let mut frame = Frame::new(FrameKind::Annotation(slot));
        let w = &mut frame.writer;
        w.start_element("office:annotation");
        if let Some(author) = &reference.author {
            w.start_element("dc:creator");
            w.add_text_node(author);
            w.end_element()?;
        }
        if let Some(date) = reference.date {
            w.start_element("dc:date");
            w.add_text_node(&date.format("%Y-%m-%dT%H:%M:%S").to_string());
            w.end_element()?;
        }
        self.frames.push(frame);
        Ok(())
    }

    fn annotation_end(&mut self) -> Result<()> {
        let mut frame =
            self.pop_frame("annotation end", |kind| matches!(kind, FrameKind::Annotation(_)))?;
        let FrameKind::Annotation(slot) = frame.kind else {
            return Err(Error::InvariantViolation("annotation end outside an annotation".to_string()));
        };
        frame.writer.end_element()?;
        self.slots.insert(slot, frame.writer);
        Ok(())
    }

    fn table_found(&mut self, table: TableDescriptor, parser: &mut dyn SubDocumentParser) -> Result<()> {
        self.run_inline(WorkItem::Table(table), parser)
    }

    fn table_cell_start(&mut self, cell: &CellDescriptor) -> Result<()> {
        let style = cell.background.map(|color| {
            let mut style = OdfStyle::automatic(StyleFamily::TableCell);
            style.add_property(PropertyType::TableCell, "fo:background-color", color.to_odf());
            self.registry.insert(style, "ce", InsertFlags::empty())
        });

        let frame = self.frame()?;
        if frame.in_paragraph() {
            return Err(Error::InconsistentState("table cell inside a paragraph".to_string()));
        }
        let w = &mut frame.writer;
        w.start_element("table:table-cell");
        if let Some(style) = &style {
            w.add_attribute("table:style-name", style);
        }
        if cell.column_span > 1 {
            w.add_attribute("table:number-columns-spanned", cell.column_span);
        }
        w.add_attribute("office:value-type", "string");
        self.cell_spans.push(cell.column_span);
        Ok(())
    }

    fn table_cell_end(&mut self) -> Result<()> {
        let span = self
            .cell_spans
            .pop()
            .ok_or_else(|| Error::InvariantViolation("table cell end without start".to_string()))?;
        let frame = self.frame()?;
        if frame.in_paragraph() {
            return Err(Error::InconsistentState("table cell ends inside a paragraph".to_string()));
        }
        frame.close_lists()?;
        frame.writer.end_element()?;
        for _ in 1..span {
            frame.writer.start_element("table:covered-table-cell");
            frame.writer.end_element()?;
        }
        Ok(())
    }

    fn inline_object_found(&mut self, picture: &PictureData) -> Result<()> {
        self.queue.record_inline();
        self.write_picture(picture)
    }

    fn floating_object_found(&mut self, global_cp: u32, parser: &mut dyn SubDocumentParser) -> Result<()> {
        self.run_inline(WorkItem::FloatingObject { global_cp }, parser)
    }

    fn text_box_found(
        &mut self,
        index: u32,
        styles_xml: bool,
        parser: &mut dyn SubDocumentParser,
    ) -> Result<()> {
        self.run_inline(WorkItem::TextBox { index, styles_xml }, parser)
    }

    fn paragraph_start(&mut self, paragraph: &ParagraphEvent) -> Result<()> {
        let in_body = self.frame()?.kind == FrameKind::Body && self.open_tables == 0;
        let master_page = if in_body {
            self.sections.take_next_master_page()
        } else {
            None
        };

        let named = self.names.name(paragraph.style).map(str::to_string);
        if named.is_none() {
            log::debug!("Paragraph style {} is not in the style sheet", paragraph.style);
        }
        let style = if paragraph.properties.has_formatting() || master_page.is_some() {
            let mut style = OdfStyle::automatic(StyleFamily::Paragraph);
            if let Some(parent) = &named {
                style.set_parent(parent);
            }
            if let Some(master) = &master_page {
                style.add_attribute("style:master-page-name", master);
            }
            apply_paragraph_properties(&mut style, &paragraph.properties);
            Some(self.registry.insert(style, "P", InsertFlags::empty()))
        } else {
            named
        };

        let frame = self.frame()?;
        if frame.in_paragraph() {
            return Err(Error::InconsistentState("paragraph starts inside a paragraph".to_string()));
        }
        frame.enter_list(paragraph.list)?;
        frame.start_paragraph(style.as_deref());
        Ok(())
    }

    fn run_of_text(&mut self, text: &str, run: &RunProperties) -> Result<()> {
        let named = run
            .style
            .and_then(|istd| self.names.name(istd))
            .map(str::to_string);
        let style = if run.character.has_formatting() {
            let mut style = OdfStyle::automatic(StyleFamily::Text);
            if let Some(parent) = &named {
                style.set_parent(parent);
            }
            apply_character_properties(&mut style, &run.character, &self.fonts, &mut self.registry);
            Some(self.registry.insert(style, "T", InsertFlags::empty()))
        } else {
            named
        };

        let frame = self.frame()?;
        if !frame.in_paragraph() {
            return Err(Error::InconsistentState("text outside a paragraph".to_string()));
        }
        frame.write_run(text, style.as_deref())
    }

    fn paragraph_end(&mut self) -> Result<()> {
        let frame = self.frame()?;
        if !frame.in_paragraph() {
            return Err(Error::InconsistentState("paragraph end without start".to_string()));
        }
        frame.end_paragraph()
    }
}
