/// Decoders for the binary records of a Word document.
///
/// Each part turns the raw bytes of one record type into a typed value:
/// - SEP (section properties) and BRC (border codes)
/// - DOP (document properties)
/// - STSH (style sheet) with its CHP and PAP property deltas
/// - SttbfFfn (font table) and SttbfAssoc (associated strings)
pub mod assoc;
pub mod brc;
pub mod chp;
pub mod dop;
pub mod font_table;
pub mod pap;
pub mod sep;
pub mod stylesheet;

pub use assoc::AssociatedStrings;
pub use brc::BorderCode;
pub use chp::CharacterProperties;
pub use dop::{DocumentProperties, NoteRestart};
pub use font_table::FontTable;
pub use pap::{Justification, ParagraphProperties};
pub use sep::{
    BlipRef, BorderOffset, BorderScope, BreakKind, Fill, HeaderFooterFlags, LineNumbering,
    Orientation, SectionProperties,
};
pub use stylesheet::{STI_LINE_NUMBER, StyleKind, StyleRecord, StyleSheet};
