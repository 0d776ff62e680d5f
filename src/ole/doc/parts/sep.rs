/// Section Properties (SEP).
///
/// A SEP describes the page setup of one section: geometry, margins, the
/// header and footer distances, page borders, line numbering and how the
/// section starts. Word stores it as a SEPX grpprl applied on top of the
/// defaults below.
use bitflags::bitflags;

use super::brc::BorderCode;
use crate::common::RGBColor;
use crate::ole::sprm::{Sprm, SprmIter};
use crate::ole::sprm_operations::*;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// How a section starts (bkc).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakKind {
    Continuous,
    NewColumn,
    #[default]
    NewPage,
    EvenPage,
    OddPage,
    Unknown(u8),
}

impl From<u8> for BreakKind {
    fn from(bkc: u8) -> Self {
        match bkc {
            0 => BreakKind::Continuous,
            1 => BreakKind::NewColumn,
            2 => BreakKind::NewPage,
            3 => BreakKind::EvenPage,
            4 => BreakKind::OddPage,
            other => BreakKind::Unknown(other),
        }
    }
}

/// Pages a page border applies to (pgbApplyTo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderScope {
    #[default]
    AllPages,
    FirstPage,
    AllButFirst,
    WholeDocument,
}

/// Origin the page border distance is measured from (pgbOffsetFrom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderOffset {
    #[default]
    FromText,
    FromEdge,
}

/// Reference to a picture stored in the document's blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlipRef {
    /// Index into the picture store (1-based in the drawing group)
    pub index: u32,
    /// Stable name for the embedded picture, e.g. `"image1.png"`
    pub name: String,
}

/// Page background fill.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(RGBColor),
    Picture(BlipRef),
    /// Any other fill type (gradients, patterns, textures), carrying the
    /// raw fill type code
    Other(u16),
}

/// Line numbering settings of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumbering {
    /// Number every n-th line
    pub count_by: u16,
    /// lnc: 0 per page, 1 per section, 2 continuous
    pub restart: u8,
    /// Distance from text in twips; 0 means automatic
    pub distance: i16,
}

bitflags! {
    /// Headers and footers a section defines (grpfIhdt).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HeaderFooterFlags: u8 {
        const HEADER_EVEN = 0x01;
        const HEADER_ODD = 0x02;
        const FOOTER_EVEN = 0x04;
        const FOOTER_ODD = 0x08;
        const HEADER_FIRST = 0x10;
        const FOOTER_FIRST = 0x20;
    }
}

/// Section Properties structure.
///
/// Lengths are twips. `dya_top` and `dya_bottom` are signed: a negative
/// value means the margin is exact and the header/footer may not push the
/// body.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProperties {
    pub xa_page: u16,
    pub ya_page: u16,
    pub dxa_left: u16,
    pub dxa_right: u16,
    pub dya_top: i16,
    pub dya_bottom: i16,
    pub dya_hdr_top: u16,
    pub dya_hdr_bottom: u16,
    pub orientation: Orientation,
    pub break_kind: BreakKind,
    pub title_page: bool,
    pub border_scope: BorderScope,
    pub border_offset: BorderOffset,
    pub brc_top: BorderCode,
    pub brc_left: BorderCode,
    pub brc_bottom: BorderCode,
    pub brc_right: BorderCode,
    pub background: Option<Fill>,
    pub line_numbering: Option<LineNumbering>,
    pub headers: HeaderFooterFlags,
}

impl Default for SectionProperties {
    /// Word's defaults: US Letter, 1" top/bottom, 1.25" left/right, headers
    /// 0.5" from the edge.
    fn default() -> Self {
        Self {
            xa_page: 12240,
            ya_page: 15840,
            dxa_left: 1800,
            dxa_right: 1800,
            dya_top: 1440,
            dya_bottom: 1440,
            dya_hdr_top: 720,
            dya_hdr_bottom: 720,
            orientation: Orientation::Portrait,
            break_kind: BreakKind::NewPage,
            title_page: false,
            border_scope: BorderScope::AllPages,
            border_offset: BorderOffset::FromText,
            brc_top: BorderCode::default(),
            brc_left: BorderCode::default(),
            brc_bottom: BorderCode::default(),
            brc_right: BorderCode::default(),
            background: None,
            line_numbering: None,
            headers: HeaderFooterFlags::empty(),
        }
    }
}

impl SectionProperties {
    /// Apply a SEPX grpprl on top of Word's defaults.
    pub fn from_grpprl(grpprl: &[u8]) -> Self {
        let mut sep = Self::default();
        let mut count_by = 0u16;
        let mut restart = 0u8;
        let mut distance = 0i16;

        for sprm in SprmIter::new(grpprl) {
            match sprm.opcode {
                SPRM_S_N_LNN_MOD => count_by = sprm.word().unwrap_or(0),
                SPRM_S_LNC => restart = sprm.byte().unwrap_or(0),
                SPRM_S_DXA_LNN => distance = sprm.i16().unwrap_or(0),
                _ => sep.apply_sprm(&sprm),
            }
        }

        if count_by > 0 {
            sep.line_numbering = Some(LineNumbering {
                count_by,
                restart,
                distance,
            });
        }
        sep
    }

    fn apply_sprm(&mut self, sprm: &Sprm) {
        match sprm.opcode {
            SPRM_S_BKC => {
                if let Some(bkc) = sprm.byte() {
                    self.break_kind = BreakKind::from(bkc);
                }
            },
            SPRM_S_F_TITLE_PAGE => self.title_page = sprm.flag(),
            SPRM_S_GPRF_IHDT => {
                self.headers = HeaderFooterFlags::from_bits_truncate(sprm.byte().unwrap_or(0));
            },
            SPRM_S_B_ORIENTATION => {
                self.orientation = if sprm.byte() == Some(2) {
                    Orientation::Landscape
                } else {
                    Orientation::Portrait
                };
            },
            SPRM_S_XA_PAGE => set(&mut self.xa_page, sprm.word()),
            SPRM_S_YA_PAGE => set(&mut self.ya_page, sprm.word()),
            SPRM_S_DXA_LEFT => set(&mut self.dxa_left, sprm.word()),
            SPRM_S_DXA_RIGHT => set(&mut self.dxa_right, sprm.word()),
            SPRM_S_DYA_TOP => set(&mut self.dya_top, sprm.i16()),
            SPRM_S_DYA_BOTTOM => set(&mut self.dya_bottom, sprm.i16()),
            SPRM_S_DYA_HDR_TOP => set(&mut self.dya_hdr_top, sprm.word()),
            SPRM_S_DYA_HDR_BOTTOM => set(&mut self.dya_hdr_bottom, sprm.word()),
            SPRM_S_PGB_PROP => {
                let prop = sprm.word().unwrap_or(0);
                self.border_scope = match prop & 0x07 {
                    1 => BorderScope::FirstPage,
                    2 => BorderScope::AllButFirst,
                    3 => BorderScope::WholeDocument,
                    _ => BorderScope::AllPages,
                };
                self.border_offset = if (prop >> 5) & 0x07 == 1 {
                    BorderOffset::FromEdge
                } else {
                    BorderOffset::FromText
                };
            },
            SPRM_S_BRC_TOP80 => set(&mut self.brc_top, BorderCode::from_brc80(sprm.operand)),
            SPRM_S_BRC_LEFT80 => set(&mut self.brc_left, BorderCode::from_brc80(sprm.operand)),
            SPRM_S_BRC_BOTTOM80 => {
                set(&mut self.brc_bottom, BorderCode::from_brc80(sprm.operand))
            },
            SPRM_S_BRC_RIGHT80 => set(&mut self.brc_right, BorderCode::from_brc80(sprm.operand)),
            SPRM_S_BRC_TOP => set(&mut self.brc_top, BorderCode::from_brc(sprm.operand)),
            SPRM_S_BRC_LEFT => set(&mut self.brc_left, BorderCode::from_brc(sprm.operand)),
            SPRM_S_BRC_BOTTOM => set(&mut self.brc_bottom, BorderCode::from_brc(sprm.operand)),
            SPRM_S_BRC_RIGHT => set(&mut self.brc_right, BorderCode::from_brc(sprm.operand)),
            _ => {},
        }
    }

    /// Whether the first page of the section needs its own master page.
    pub fn first_page_distinct(&self) -> bool {
        self.title_page || self.border_scope == BorderScope::FirstPage
    }

    /// Whether any of the four page borders is drawn.
    pub fn has_page_border(&self) -> bool {
        [self.brc_top, self.brc_left, self.brc_bottom, self.brc_right]
            .iter()
            .any(|brc| !brc.is_none())
    }
}

#[inline]
fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}
