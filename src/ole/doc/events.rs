/// Parser event interface.
///
/// The binary stream walker drives a conversion by calling [`ParserEvents`]
/// methods as it meets structure in the main body. Content stored outside
/// the main text (notes, annotations, headers, table rows, text boxes,
/// floating objects) is parsed on demand: the handler calls back into a
/// [`SubDocumentParser`] with a reference it received in an event, and the
/// parser reports that content through the same [`ParserEvents`].
///
/// Everything here is synchronous and single threaded. A parser may call
/// back into the handler from inside a `SubDocumentParser` method; the
/// handler may call back into the parser from inside an event.
use chrono::NaiveDateTime;
use fixedbitset::FixedBitSet;

use super::parts::{
    AssociatedStrings, BlipRef, CharacterProperties, DocumentProperties, HeaderFooterFlags,
    ParagraphProperties, SectionProperties, StyleSheet,
};
use crate::common::{RGBColor, Result};

/// The six header/footer stories of a section.
///
/// Word always reports them in the order of [`HeaderKind::ORDER`]; the
/// header capture relies on an even story arriving right before its odd
/// counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    HeaderEven,
    HeaderOdd,
    FooterEven,
    FooterOdd,
    HeaderFirst,
    FooterFirst,
}

impl HeaderKind {
    pub const ORDER: [HeaderKind; 6] = [
        HeaderKind::HeaderEven,
        HeaderKind::HeaderOdd,
        HeaderKind::FooterEven,
        HeaderKind::FooterOdd,
        HeaderKind::HeaderFirst,
        HeaderKind::FooterFirst,
    ];

    #[inline]
    pub fn is_even(self) -> bool {
        matches!(self, HeaderKind::HeaderEven | HeaderKind::FooterEven)
    }

    #[inline]
    pub fn is_first(self) -> bool {
        matches!(self, HeaderKind::HeaderFirst | HeaderKind::FooterFirst)
    }

    #[inline]
    pub fn is_footer(self) -> bool {
        matches!(
            self,
            HeaderKind::FooterEven | HeaderKind::FooterOdd | HeaderKind::FooterFirst
        )
    }

    /// The grpfIhdt bit for this story.
    pub fn flag(self) -> HeaderFooterFlags {
        match self {
            HeaderKind::HeaderEven => HeaderFooterFlags::HEADER_EVEN,
            HeaderKind::HeaderOdd => HeaderFooterFlags::HEADER_ODD,
            HeaderKind::FooterEven => HeaderFooterFlags::FOOTER_EVEN,
            HeaderKind::FooterOdd => HeaderFooterFlags::FOOTER_ODD,
            HeaderKind::HeaderFirst => HeaderFooterFlags::HEADER_FIRST,
            HeaderKind::FooterFirst => HeaderFooterFlags::FOOTER_FIRST,
        }
    }
}

/// The header/footer stories of one section, to be parsed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderGroup {
    /// Zero-based section number the stories belong to
    pub section: u32,
    /// Stories the section defines
    pub defined: HeaderFooterFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    Footnote,
    Endnote,
}

/// Body of a note or annotation stored outside the main text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubDocumentRef {
    Footnote(u32),
    Endnote(u32),
    Annotation(u32),
}

/// A footnote or endnote reference met in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteReference {
    pub kind: NoteKind,
    /// Index of the note body in its sub-document
    pub index: u32,
    /// Custom reference mark; `None` for auto-numbered notes
    pub custom_mark: Option<String>,
}

impl NoteReference {
    pub fn footnote(index: u32) -> Self {
        Self {
            kind: NoteKind::Footnote,
            index,
            custom_mark: None,
        }
    }

    pub fn endnote(index: u32) -> Self {
        Self {
            kind: NoteKind::Endnote,
            index,
            custom_mark: None,
        }
    }

    pub fn body(&self) -> SubDocumentRef {
        match self.kind {
            NoteKind::Footnote => SubDocumentRef::Footnote(self.index),
            NoteKind::Endnote => SubDocumentRef::Endnote(self.index),
        }
    }
}

/// An annotation (comment) anchor met in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationReference {
    pub index: u32,
    pub author: Option<String>,
    pub initials: Option<String>,
    pub date: Option<NaiveDateTime>,
}

impl AnnotationReference {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            author: None,
            initials: None,
            date: None,
        }
    }

    pub fn body(&self) -> SubDocumentRef {
        SubDocumentRef::Annotation(self.index)
    }
}

/// One table row, parsed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow {
    /// Parser-defined row handle
    pub index: u32,
    /// Row height in twips; negative means exact
    pub height: Option<i16>,
}

/// A table met in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Column widths in twips
    pub column_widths: Vec<u16>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDescriptor {
    pub column_span: u16,
    pub background: Option<RGBColor>,
}

impl Default for CellDescriptor {
    fn default() -> Self {
        Self {
            column_span: 1,
            background: None,
        }
    }
}

/// An inline picture with its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureData {
    /// File name inside the package's `Pictures/` folder
    pub name: String,
    pub bytes: Vec<u8>,
    pub width_twips: u32,
    pub height_twips: u32,
}

/// List membership of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListInfo {
    pub list_id: u32,
    /// Zero-based nesting level
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphEvent {
    /// istd of the paragraph style
    pub style: u16,
    /// Direct formatting on top of the style
    pub properties: ParagraphProperties,
    pub list: Option<ListInfo>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProperties {
    /// istd of the character style, if any
    pub style: Option<u16>,
    /// Direct formatting on top of the style
    pub character: CharacterProperties,
}

/// Structural events reported by the parser.
pub trait ParserEvents {
    fn section_start(&mut self, sep: &SectionProperties) -> Result<()>;
    fn section_end(&mut self, sep: &SectionProperties) -> Result<()>;

    /// A section's header/footer stories were located. The handler decides
    /// whether they are needed and parses them through `parser`.
    fn headers_found(
        &mut self,
        group: HeaderGroup,
        parser: &mut dyn SubDocumentParser,
    ) -> Result<()>;
    fn header_start(&mut self, kind: HeaderKind) -> Result<()>;
    fn header_end(&mut self) -> Result<()>;

    /// A note reference; the body is parsed later.
    fn footnote_found(&mut self, reference: NoteReference) -> Result<()>;
    /// An annotation anchor; the body is parsed later.
    fn annotation_found(&mut self, reference: AnnotationReference) -> Result<()>;
    fn footnote_start(&mut self, kind: NoteKind) -> Result<()>;
    fn footnote_end(&mut self) -> Result<()>;
    fn annotation_start(&mut self) -> Result<()>;
    fn annotation_end(&mut self) -> Result<()>;

    /// A table starts here; its rows are parsed through `parser`.
    fn table_found(
        &mut self,
        table: TableDescriptor,
        parser: &mut dyn SubDocumentParser,
    ) -> Result<()>;
    fn table_cell_start(&mut self, cell: &CellDescriptor) -> Result<()>;
    fn table_cell_end(&mut self) -> Result<()>;

    fn inline_object_found(&mut self, picture: &PictureData) -> Result<()>;
    /// A floating drawing object anchored at `global_cp`.
    fn floating_object_found(
        &mut self,
        global_cp: u32,
        parser: &mut dyn SubDocumentParser,
    ) -> Result<()>;
    /// A text box; `styles_xml` is set when it sits in a header or footer.
    fn text_box_found(
        &mut self,
        index: u32,
        styles_xml: bool,
        parser: &mut dyn SubDocumentParser,
    ) -> Result<()>;

    fn paragraph_start(&mut self, paragraph: &ParagraphEvent) -> Result<()>;
    fn run_of_text(&mut self, text: &str, run: &RunProperties) -> Result<()>;
    fn paragraph_end(&mut self) -> Result<()>;
}

/// On-demand parsing of content stored outside the main text.
///
/// Every method reports the content through `events` and returns once it is
/// complete. A reference the parser cannot resolve must be reported as
/// [`crate::common::Error::InvariantViolation`].
pub trait SubDocumentParser {
    fn parse_sub_document(
        &mut self,
        target: &SubDocumentRef,
        events: &mut dyn ParserEvents,
    ) -> Result<()>;
    fn parse_headers(&mut self, group: &HeaderGroup, events: &mut dyn ParserEvents) -> Result<()>;
    fn parse_table_row(&mut self, row: &TableRow, events: &mut dyn ParserEvents) -> Result<()>;
    fn parse_text_box(
        &mut self,
        index: u32,
        styles_xml: bool,
        events: &mut dyn ParserEvents,
    ) -> Result<()>;
    fn parse_floating_object(
        &mut self,
        global_cp: u32,
        events: &mut dyn ParserEvents,
    ) -> Result<()>;
}

/// A parsed Word document ready to be converted.
pub trait DocumentSource: SubDocumentParser {
    fn dop(&self) -> &DocumentProperties;
    fn style_sheet(&self) -> &StyleSheet;
    fn associated_strings(&self) -> &AssociatedStrings;

    /// Bit `n` is set when section `n` (zero-based) defines different
    /// header/footer stories than section `n - 1`.
    fn headers_changed(&self) -> &FixedBitSet;

    /// Walk the main text, reporting every event to `events`.
    fn parse(&mut self, events: &mut dyn ParserEvents) -> Result<()>;
}

/// Access to pictures referenced by page backgrounds.
pub trait PictureResolver {
    /// Package path the picture should be stored at, e.g.
    /// `"Pictures/image1.png"`.
    fn resolve_picture_path(&mut self, blip: &BlipRef) -> Option<String>;

    /// Picture bytes, when the resolver can provide them for embedding.
    fn picture_bytes(&mut self, _blip: &BlipRef) -> Option<Vec<u8>> {
        None
    }
}

/// Resolver for documents without a picture store.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPictures;

impl PictureResolver for NoPictures {
    fn resolve_picture_path(&mut self, _blip: &BlipRef) -> Option<String> {
        None
    }
}
