/// Style sheet (STSH).
///
/// The STSH starts with an STSHI header followed by one STD per style
/// index (istd). An STD is a fixed Stdf base, the style name and the UPX
/// property deltas. Empty slots (cbStd = 0) stay in the table as `None` so
/// istd values keep their meaning.
use super::chp::CharacterProperties;
use super::font_table::FontTable;
use super::pap::ParagraphProperties;
use crate::common::binary::{BinaryError, BinaryResult, parse_utf16le_string_len, read_u16_le};

/// Invariant style identifier of the built-in "Line Number" style.
pub const STI_LINE_NUMBER: u16 = 40;

/// `istdBase` value meaning "no base style".
pub const ISTD_NIL: u16 = 0x0FFF;

/// Style kind (stk).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
    List,
}

impl StyleKind {
    fn from_stk(stk: u16) -> Option<Self> {
        match stk {
            1 => Some(StyleKind::Paragraph),
            2 => Some(StyleKind::Character),
            3 => Some(StyleKind::Table),
            4 => Some(StyleKind::List),
            _ => None,
        }
    }
}

/// One decoded style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    pub istd: u16,
    pub name: String,
    pub kind: StyleKind,
    /// Invariant style identifier
    pub sti: u16,
    pub base: Option<u16>,
    /// Style applied to the following paragraph
    pub next: u16,
    pub character: CharacterProperties,
    pub paragraph: ParagraphProperties,
}

impl StyleRecord {
    /// A paragraph style with no properties, mostly for synthetic documents.
    pub fn paragraph(istd: u16, name: impl Into<String>) -> Self {
        Self {
            istd,
            name: name.into(),
            kind: StyleKind::Paragraph,
            sti: 0x0FFE,
            base: None,
            next: istd,
            character: CharacterProperties::default(),
            paragraph: ParagraphProperties::default(),
        }
    }

    /// A character style with no properties.
    pub fn character(istd: u16, name: impl Into<String>) -> Self {
        Self {
            kind: StyleKind::Character,
            ..Self::paragraph(istd, name)
        }
    }

    pub fn with_base(mut self, base: u16) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_next(mut self, next: u16) -> Self {
        self.next = next;
        self
    }

    pub fn with_sti(mut self, sti: u16) -> Self {
        self.sti = sti;
        self
    }

    pub fn with_character(mut self, character: CharacterProperties) -> Self {
        self.character = character;
        self
    }

    pub fn with_paragraph(mut self, paragraph: ParagraphProperties) -> Self {
        self.paragraph = paragraph;
        self
    }
}

/// The document's style sheet plus the font table its styles refer to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    styles: Vec<Option<StyleRecord>>,
    fonts: FontTable,
}

impl StyleSheet {
    /// Build a style sheet from records, placing each at its istd.
    pub fn from_records(records: Vec<StyleRecord>, fonts: FontTable) -> Self {
        let len = records.iter().map(|r| r.istd as usize + 1).max().unwrap_or(0);
        let mut styles = vec![None; len];
        for record in records {
            let istd = record.istd as usize;
            styles[istd] = Some(record);
        }
        Self { styles, fonts }
    }

    /// Parse an STSH.
    pub fn parse(stsh: &[u8], fonts: FontTable) -> BinaryResult<Self> {
        let cb_stshi = read_u16_le(stsh, 0)? as usize;
        let cstd = read_u16_le(stsh, 2)?;
        let cb_std_base = read_u16_le(stsh, 4)? as usize;

        let mut styles = Vec::with_capacity(cstd as usize);
        let mut offset = 2 + cb_stshi;
        for istd in 0..cstd {
            let cb_std = read_u16_le(stsh, offset)? as usize;
            offset += 2;
            if cb_std == 0 {
                styles.push(None);
                continue;
            }
            let std = stsh.get(offset..offset + cb_std).ok_or_else(|| {
                BinaryError::ParseError(format!("STD {} exceeds the style sheet", istd))
            })?;
            styles.push(parse_std(istd, std, cb_std_base)?);
            offset += cb_std;
        }

        Ok(Self { styles, fonts })
    }

    /// Style at `istd`, if that slot is populated.
    pub fn style(&self, istd: u16) -> Option<&StyleRecord> {
        self.styles.get(istd as usize).and_then(Option::as_ref)
    }

    /// Populated styles in istd order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRecord> {
        self.styles.iter().flatten()
    }

    /// Number of istd slots, including empty ones.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }
}

fn parse_std(istd: u16, std: &[u8], cb_std_base: usize) -> BinaryResult<Option<StyleRecord>> {
    let sti = read_u16_le(std, 0)? & 0x0FFF;
    let word = read_u16_le(std, 2)?;
    let stk = word & 0x000F;
    let istd_base = word >> 4;
    let word = read_u16_le(std, 4)?;
    let cupx = word & 0x000F;
    let istd_next = word >> 4;

    let Some(kind) = StyleKind::from_stk(stk) else {
        return Ok(None);
    };

    let cch = read_u16_le(std, cb_std_base)? as usize;
    let name = parse_utf16le_string_len(std, cb_std_base + 2, cch)?;
    // length prefix, characters, null terminator
    let mut offset = cb_std_base + 2 + cch * 2 + 2;

    let mut upxs = Vec::with_capacity(cupx as usize);
    for _ in 0..cupx {
        if offset % 2 != 0 {
            offset += 1;
        }
        let cb_upx = read_u16_le(std, offset)? as usize;
        let upx = std
            .get(offset + 2..offset + 2 + cb_upx)
            .ok_or_else(|| BinaryError::ParseError(format!("UPX of style {} truncated", istd)))?;
        upxs.push(upx);
        offset += 2 + cb_upx;
    }

    let mut character = CharacterProperties::default();
    let mut paragraph = ParagraphProperties::default();
    match kind {
        StyleKind::Paragraph => {
            // UPX 0 is a PAPX (istd + grpprl), UPX 1 a CHPX
            if let Some(papx) = upxs.first() {
                paragraph.apply_grpprl(papx.get(2..).unwrap_or_default());
            }
            if let Some(chpx) = upxs.get(1) {
                character.apply_grpprl(chpx);
            }
        },
        StyleKind::Character => {
            if let Some(chpx) = upxs.first() {
                character.apply_grpprl(chpx);
            }
        },
        StyleKind::Table | StyleKind::List => {},
    }

    Ok(Some(StyleRecord {
        istd,
        name,
        kind,
        sti,
        base: (istd_base != ISTD_NIL).then_some(istd_base),
        next: istd_next,
        character,
        paragraph,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CB_STD_BASE: u16 = 10;

    fn std_bytes(sti: u16, stk: u16, base: u16, next: u16, name: &str, upxs: &[&[u8]]) -> Vec<u8> {
        let mut std = Vec::new();
        std.extend_from_slice(&sti.to_le_bytes());
        std.extend_from_slice(&(stk | (base << 4)).to_le_bytes());
        std.extend_from_slice(&((upxs.len() as u16) | (next << 4)).to_le_bytes());
        std.extend_from_slice(&[0, 0, 0, 0]);
        let units: Vec<u16> = name.encode_utf16().collect();
        std.extend_from_slice(&(units.len() as u16).to_le_bytes());
        for unit in units.iter().chain(std::iter::once(&0)) {
            std.extend_from_slice(&unit.to_le_bytes());
        }
        for upx in upxs {
            if std.len() % 2 != 0 {
                std.push(0);
            }
            std.extend_from_slice(&(upx.len() as u16).to_le_bytes());
            std.extend_from_slice(upx);
        }
        std
    }

    fn stsh(stds: &[Vec<u8>]) -> Vec<u8> {
        let mut data = Vec::new();
        // cbStshi = 4: cstd + cbSTDBaseInFile
        data.extend_from_slice(&4u16.to_le_bytes());
        data.extend_from_slice(&(stds.len() as u16).to_le_bytes());
        data.extend_from_slice(&CB_STD_BASE.to_le_bytes());
        for std in stds {
            data.extend_from_slice(&(std.len() as u16).to_le_bytes());
            data.extend_from_slice(std);
        }
        data
    }

    #[test]
    fn test_parse_paragraph_and_character_styles() {
        // PAPX: istd 1 + sprmPJc center; CHPX: sprmCFBold
        let papx: &[u8] = &[0x01, 0x00, 0x61, 0x24, 0x01];
        let chpx: &[u8] = &[0x35, 0x08, 0x01];
        let data = stsh(&[
            std_bytes(0, 1, ISTD_NIL, 0, "Normal", &[&[0, 0], &[]]),
            std_bytes(1, 1, 0, 0, "Heading 1", &[papx, chpx]),
            Vec::new(),
            std_bytes(STI_LINE_NUMBER, 2, ISTD_NIL, 3, "Line Number", &[chpx]),
        ]);

        let sheet = StyleSheet::parse(&data, FontTable::default()).unwrap();
        assert_eq!(sheet.len(), 4);
        assert_eq!(sheet.iter().count(), 3);
        assert!(sheet.style(2).is_none());

        let normal = sheet.style(0).unwrap();
        assert_eq!(normal.name, "Normal");
        assert_eq!(normal.base, None);

        let heading = sheet.style(1).unwrap();
        assert_eq!(heading.kind, StyleKind::Paragraph);
        assert_eq!(heading.base, Some(0));
        assert_eq!(heading.next, 0);
        assert!(heading.paragraph.justification.is_some());
        assert_eq!(heading.character.is_bold, Some(true));

        let line_number = sheet.style(3).unwrap();
        assert_eq!(line_number.kind, StyleKind::Character);
        assert_eq!(line_number.sti, STI_LINE_NUMBER);
        assert_eq!(line_number.character.is_bold, Some(true));
    }

    #[test]
    fn test_truncated_std() {
        let mut data = stsh(&[std_bytes(0, 1, ISTD_NIL, 0, "Normal", &[])]);
        data.truncate(data.len() - 3);
        assert!(StyleSheet::parse(&data, FontTable::default()).is_err());
    }

    #[test]
    fn test_from_records() {
        let sheet = StyleSheet::from_records(
            vec![
                StyleRecord::paragraph(0, "Normal"),
                StyleRecord::paragraph(3, "Body").with_base(0),
            ],
            FontTable::default(),
        );
        assert_eq!(sheet.len(), 4);
        assert_eq!(sheet.style(3).unwrap().base, Some(0));
        assert!(sheet.style(1).is_none());
    }
}
