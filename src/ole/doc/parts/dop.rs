/// Document Properties (DOP).
///
/// The DOP holds the document-wide defaults the engine needs: footnote and
/// endnote numbering, the default tab stop and the creation and revision
/// timestamps.
use chrono::{NaiveDate, NaiveDateTime};

use crate::common::binary::{BinaryResult, read_u16_le, read_u32_le};

/// Minimum DOP length covering every field read here.
const DOP_MIN_SIZE: usize = 0x38;

/// When footnote/endnote numbering restarts (rnc).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteRestart {
    #[default]
    Continuous,
    EachSection,
    EachPage,
}

impl From<u16> for NoteRestart {
    fn from(rnc: u16) -> Self {
        match rnc {
            1 => NoteRestart::EachSection,
            2 => NoteRestart::EachPage,
            _ => NoteRestart::Continuous,
        }
    }
}

/// Document Properties structure.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProperties {
    /// Initial footnote number (nFtn)
    pub footnote_start: u16,
    pub footnote_restart: NoteRestart,
    /// Footnote number format code (nfcFtnRef)
    pub footnote_format: u8,
    /// Initial endnote number (nEdn)
    pub endnote_start: u16,
    pub endnote_restart: NoteRestart,
    /// Endnote number format code (nfcEdnRef)
    pub endnote_format: u8,
    /// Default tab stop distance in twips (dxaTab)
    pub tab_stop_twips: u16,
    pub created: Option<NaiveDateTime>,
    pub revised: Option<NaiveDateTime>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            footnote_start: 1,
            footnote_restart: NoteRestart::Continuous,
            footnote_format: 0,
            endnote_start: 1,
            endnote_restart: NoteRestart::Continuous,
            endnote_format: 2,
            tab_stop_twips: 720,
            created: None,
            revised: None,
        }
    }
}

impl DocumentProperties {
    /// Parse the Word 97 part of a DOP record.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is shorter than the fields read.
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        // Probe the far end first so a short record fails as a whole
        read_u16_le(data, DOP_MIN_SIZE - 2)?;

        let ftn = read_u16_le(data, 0x02)?;
        let edn = read_u16_le(data, 0x34)?;
        let nfc = read_u16_le(data, 0x36)?;

        Ok(Self {
            footnote_restart: NoteRestart::from(ftn & 0x03),
            footnote_start: ftn >> 2,
            footnote_format: ((nfc >> 2) & 0x0F) as u8,
            endnote_restart: NoteRestart::from(edn & 0x03),
            endnote_start: edn >> 2,
            endnote_format: ((nfc >> 6) & 0x0F) as u8,
            tab_stop_twips: read_u16_le(data, 0x0A)?,
            created: decode_dttm(read_u32_le(data, 0x14)?),
            revised: decode_dttm(read_u32_le(data, 0x18)?),
        })
    }
}

/// Decode a DTTM packed date. Zero and out-of-range values yield `None`.
///
/// Layout: minutes (6 bits), hours (5), day of month (5), month (4),
/// years since 1900 (9), weekday (3).
pub fn decode_dttm(dttm: u32) -> Option<NaiveDateTime> {
    if dttm == 0 {
        return None;
    }
    let minute = dttm & 0x3F;
    let hour = (dttm >> 6) & 0x1F;
    let day = (dttm >> 11) & 0x1F;
    let month = (dttm >> 16) & 0x0F;
    let year = 1900 + ((dttm >> 20) & 0x1FF) as i32;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}
