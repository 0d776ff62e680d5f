/// Word (.doc) document model consumed by the converter.
///
/// The binary stream walker is an external collaborator. What it hands over
/// is modelled here: the decoded records in [`parts`] and the event
/// interface in [`events`] through which it drives a conversion.
///
/// # DOC File Structure
///
/// A .doc file is an OLE2 structured storage containing several streams:
/// - **WordDocument**: Main document stream containing the FIB and text
/// - **1Table** or **0Table**: Style sheet, font table, DOP, SEPX offsets
/// - **Data**: Embedded pictures
pub mod events;
pub mod parts;

pub use events::{
    AnnotationReference, CellDescriptor, DocumentSource, HeaderGroup, HeaderKind, ListInfo,
    NoPictures, NoteKind, NoteReference, ParagraphEvent, ParserEvents, PictureData,
    PictureResolver, RunProperties, SubDocumentParser, SubDocumentRef, TableDescriptor, TableRow,
};
