/// Border Code (BRC) records.
///
/// Word stores a border as either the legacy 4-byte BRC80 (palette color)
/// or the 8-byte BRC (COLORREF). Both decode into [`BorderCode`].
use crate::common::RGBColor;
use crate::common::binary::read_u32_le;
use crate::common::unit::{Pt, eighths_to_pt};

/// One border edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderCode {
    /// Line width in eighths of a point
    pub line_width: u8,
    /// brcType; 0 and 0xFF mean "no border"
    pub border_type: u8,
    /// Line color, `None` for auto
    pub color: Option<RGBColor>,
    /// Distance from text in points
    pub space: u8,
    pub shadow: bool,
    pub frame: bool,
}

impl BorderCode {
    /// Decode a BRC80 (4 bytes).
    pub fn from_brc80(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }
        Some(Self {
            line_width: data[0],
            border_type: data[1],
            color: RGBColor::from_ico(data[2]),
            space: data[3] & 0x1F,
            shadow: data[3] & 0x20 != 0,
            frame: data[3] & 0x40 != 0,
        })
    }

    /// Decode a BRC (8 bytes).
    pub fn from_brc(data: &[u8]) -> Option<Self> {
        if data.len() < 8 {
            return None;
        }
        let cv = read_u32_le(data, 0).ok()?;
        Some(Self {
            line_width: data[4],
            border_type: data[5],
            color: RGBColor::from_colorref(cv),
            space: data[6] & 0x1F,
            shadow: data[6] & 0x20 != 0,
            frame: data[6] & 0x40 != 0,
        })
    }

    /// Whether this edge has no border.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.border_type == 0 || self.border_type == 0xFF
    }

    /// Line width in points.
    #[inline]
    pub fn width_pt(&self) -> f64 {
        eighths_to_pt(self.line_width as u32)
    }

    /// ODF line style for the brcType.
    pub fn odf_style(&self) -> &'static str {
        match self.border_type {
            3 | 10 | 11 | 12 | 13 | 14 | 15 | 16 | 17 | 18 | 19 | 20 | 21 => "double",
            6 | 22 => "dotted",
            7 | 8 | 9 | 23 => "dashed",
            _ => "solid",
        }
    }

    /// ODF `fo:border-*` value, e.g. `"0.5pt solid #000000"`. `None` when the
    /// edge has no border.
    pub fn to_odf(&self) -> Option<String> {
        if self.is_none() {
            return None;
        }
        // Thick lines (brcType 2) are stored at half width
        let width = if self.border_type == 2 {
            self.width_pt() * 2.0
        } else {
            self.width_pt()
        };
        let color = self.color.unwrap_or(RGBColor::new(0, 0, 0));
        Some(format!("{} {} {}", Pt(width), self.odf_style(), color.to_odf()))
    }
}
