/// Paragraph Properties (PAP) for DOC styles and paragraphs.
///
/// Covers alignment, indents, vertical spacing and the keep/break flags.
use crate::common::unit::Pt;
use crate::ole::sprm::{Sprm, SprmIter};
use crate::ole::sprm_operations::*;

/// Paragraph justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    Left,
    Center,
    Right,
    Justify,
}

impl Justification {
    fn from_jc(jc: u8) -> Option<Self> {
        match jc {
            0 => Some(Justification::Left),
            1 => Some(Justification::Center),
            2 => Some(Justification::Right),
            3 | 4 | 5 => Some(Justification::Justify),
            _ => None,
        }
    }

    /// ODF `fo:text-align` value.
    pub fn as_odf(self) -> &'static str {
        match self {
            Justification::Left => "start",
            Justification::Center => "center",
            Justification::Right => "end",
            Justification::Justify => "justify",
        }
    }
}

/// Paragraph Properties structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphProperties {
    pub justification: Option<Justification>,
    /// Left indent in twips
    pub indent_left: Option<i16>,
    /// Right indent in twips
    pub indent_right: Option<i16>,
    /// First line indent in twips (negative for hanging)
    pub indent_first_line: Option<i16>,
    /// Space before in twips
    pub space_before: Option<u16>,
    /// Space after in twips
    pub space_after: Option<u16>,
    pub keep_together: Option<bool>,
    pub keep_with_next: Option<bool>,
    pub page_break_before: Option<bool>,
}

impl ParagraphProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse paragraph properties from a PAPX grpprl (without the istd).
    pub fn from_sprm(grpprl: &[u8]) -> Self {
        let mut pap = Self::default();
        pap.apply_grpprl(grpprl);
        pap
    }

    pub fn apply_grpprl(&mut self, grpprl: &[u8]) {
        for sprm in SprmIter::new(grpprl) {
            self.apply_sprm(&sprm);
        }
    }

    fn apply_sprm(&mut self, sprm: &Sprm) {
        match sprm.opcode {
            SPRM_P_JC | SPRM_P_JC80 => {
                if let Some(jc) = sprm.byte() {
                    self.justification = Justification::from_jc(jc);
                }
            },
            SPRM_P_DXA_LEFT | SPRM_P_DXA_LEFT80 => self.indent_left = sprm.i16(),
            SPRM_P_DXA_RIGHT | SPRM_P_DXA_RIGHT80 => self.indent_right = sprm.i16(),
            SPRM_P_DXA_LEFT1 | SPRM_P_DXA_LEFT1_80 => self.indent_first_line = sprm.i16(),
            SPRM_P_DYA_BEFORE => self.space_before = sprm.word(),
            SPRM_P_DYA_AFTER => self.space_after = sprm.word(),
            SPRM_P_F_KEEP => self.keep_together = Some(sprm.flag()),
            SPRM_P_F_KEEP_FOLLOW => self.keep_with_next = Some(sprm.flag()),
            SPRM_P_F_PAGE_BREAK_BEFORE => self.page_break_before = Some(sprm.flag()),
            _ => {},
        }
    }

    pub fn has_formatting(&self) -> bool {
        *self != Self::default()
    }

    /// ODF `style:paragraph-properties` attributes for the set properties.
    pub fn odf_properties(&self) -> Vec<(&'static str, String)> {
        let mut props = Vec::new();
        if let Some(jc) = self.justification {
            props.push(("fo:text-align", jc.as_odf().to_string()));
        }
        if let Some(left) = self.indent_left {
            props.push(("fo:margin-left", Pt::from_twips(left as i32).to_string()));
        }
        if let Some(right) = self.indent_right {
            props.push(("fo:margin-right", Pt::from_twips(right as i32).to_string()));
        }
        if let Some(first) = self.indent_first_line {
            props.push(("fo:text-indent", Pt::from_twips(first as i32).to_string()));
        }
        if let Some(before) = self.space_before {
            props.push(("fo:margin-top", Pt::from_twips(before as i32).to_string()));
        }
        if let Some(after) = self.space_after {
            props.push(("fo:margin-bottom", Pt::from_twips(after as i32).to_string()));
        }
        if let Some(keep) = self.keep_together {
            let value = if keep { "always" } else { "auto" };
            props.push(("fo:keep-together", value.to_string()));
        }
        if let Some(keep) = self.keep_with_next {
            let value = if keep { "always" } else { "auto" };
            props.push(("fo:keep-with-next", value.to_string()));
        }
        if self.page_break_before == Some(true) {
            props.push(("fo:break-before", "page".to_string()));
        }
        props
    }
}
