/// Character Properties (CHP) for DOC styles and runs.
///
/// Only the formatting the ODF writer can express is tracked: weight,
/// posture, underline, strike-through, capitalisation, size, font and
/// color. Everything else in a CHPX is skipped.
use crate::common::RGBColor;
use crate::common::unit::{Pt, half_points_to_pt};
use crate::ole::sprm::{Sprm, SprmIter};
use crate::ole::sprm_operations::*;

/// Character Properties structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterProperties {
    /// Bold text
    pub is_bold: Option<bool>,
    /// Italic text
    pub is_italic: Option<bool>,
    /// Underline code (kul); 0 means no underline
    pub underline: Option<u8>,
    /// Strikethrough
    pub is_strikethrough: Option<bool>,
    /// All caps
    pub is_all_caps: Option<bool>,
    /// Small caps
    pub is_small_caps: Option<bool>,
    /// Font size in half-points (e.g., 24 = 12pt)
    pub font_size: Option<u16>,
    /// Font index in font table (ASCII characters)
    pub font_index: Option<u16>,
    /// Text color, `None` when unset or "auto"
    pub color: Option<RGBColor>,
}

impl CharacterProperties {
    /// Create a new CharacterProperties with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse character properties from a CHPX grpprl.
    pub fn from_sprm(grpprl: &[u8]) -> Self {
        let mut chp = Self::default();
        chp.apply_grpprl(grpprl);
        chp
    }

    /// Apply every SPRM of `grpprl` on top of the current values.
    pub fn apply_grpprl(&mut self, grpprl: &[u8]) {
        for sprm in SprmIter::new(grpprl) {
            self.apply_sprm(&sprm);
        }
    }

    fn apply_sprm(&mut self, sprm: &Sprm) {
        match sprm.opcode {
            SPRM_C_F_BOLD => self.is_bold = toggle(self.is_bold, sprm),
            SPRM_C_F_ITALIC => self.is_italic = toggle(self.is_italic, sprm),
            SPRM_C_F_STRIKE => self.is_strikethrough = toggle(self.is_strikethrough, sprm),
            SPRM_C_F_CAPS => self.is_all_caps = toggle(self.is_all_caps, sprm),
            SPRM_C_F_SMALL_CAPS => self.is_small_caps = toggle(self.is_small_caps, sprm),
            SPRM_C_KUL => self.underline = sprm.byte(),
            SPRM_C_HPS => self.font_size = sprm.word(),
            SPRM_C_RG_FTC0 => self.font_index = sprm.word(),
            SPRM_C_ICO => {
                if let Some(ico) = sprm.byte() {
                    self.color = RGBColor::from_ico(ico);
                }
            },
            SPRM_C_CV => {
                if let Some(cv) = sprm.dword() {
                    self.color = RGBColor::from_colorref(cv);
                }
            },
            _ => {},
        }
    }

    /// Whether any property is set.
    pub fn has_formatting(&self) -> bool {
        *self != Self::default()
    }

    /// ODF `style:text-properties` attributes for the set properties, in a
    /// stable order. The font name is resolved by the caller.
    pub fn odf_properties(&self) -> Vec<(&'static str, String)> {
        let mut props = Vec::new();
        if let Some(bold) = self.is_bold {
            let weight = if bold { "bold" } else { "normal" };
            props.push(("fo:font-weight", weight.to_string()));
        }
        if let Some(italic) = self.is_italic {
            let posture = if italic { "italic" } else { "normal" };
            props.push(("fo:font-style", posture.to_string()));
        }
        if let Some(kul) = self.underline {
            let (style, kind) = underline_style(kul);
            props.push(("style:text-underline-style", style.to_string()));
            if kul != 0 {
                props.push(("style:text-underline-type", kind.to_string()));
                props.push(("style:text-underline-width", "auto".to_string()));
                props.push(("style:text-underline-color", "font-color".to_string()));
            }
        }
        if let Some(strike) = self.is_strikethrough {
            let style = if strike { "solid" } else { "none" };
            props.push(("style:text-line-through-style", style.to_string()));
        }
        if let Some(caps) = self.is_all_caps {
            let transform = if caps { "uppercase" } else { "none" };
            props.push(("fo:text-transform", transform.to_string()));
        }
        if let Some(small_caps) = self.is_small_caps {
            let variant = if small_caps { "small-caps" } else { "normal" };
            props.push(("fo:font-variant", variant.to_string()));
        }
        if let Some(hps) = self.font_size {
            props.push(("fo:font-size", Pt(half_points_to_pt(hps)).to_string()));
        }
        if let Some(color) = self.color {
            props.push(("fo:color", color.to_odf()));
        }
        props
    }
}

/// Resolve a toggle operand: 0 off, 1 on, 0x80 keep, 0x81 invert.
fn toggle(current: Option<bool>, sprm: &Sprm) -> Option<bool> {
    match sprm.byte() {
        Some(0) => Some(false),
        Some(1) => Some(true),
        Some(0x81) => Some(!current.unwrap_or(false)),
        _ => current,
    }
}

/// Map a kul code to ODF underline style and line count.
fn underline_style(kul: u8) -> (&'static str, &'static str) {
    match kul {
        0 => ("none", "none"),
        3 => ("solid", "double"),
        4 | 20 => ("dotted", "single"),
        7 | 23 | 39 | 55 => ("dash", "single"),
        9 | 25 => ("dot-dash", "single"),
        10 | 26 => ("dot-dot-dash", "single"),
        11 | 27 | 43 => ("wave", "single"),
        _ => ("solid", "single"),
    }
}
