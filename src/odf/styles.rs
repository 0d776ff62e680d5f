//! Output style registry.
//!
//! Collects every style a conversion produces, hands out unique names and
//! writes the style sections of `styles.xml` and `content.xml`.

use std::collections::HashSet;

use bitflags::bitflags;

use crate::common::Result;
use crate::odf::core::XmlWriter;
use crate::odf::elements::style::{OdfStyle, StyleFamily};

bitflags! {
    /// Naming policy for [`StyleRegistry::insert`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InsertFlags: u8 {
        /// Use the candidate name verbatim when it is free
        const DONT_ADD_NUMBER = 0x01;
        /// Register even if an identical automatic style exists
        const ALLOW_DUPLICATES = 0x02;
    }
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    style: OdfStyle,
}

/// Registry of output styles, font faces and raw style markup.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    entries: Vec<Entry>,
    names: HashSet<(StyleFamily, String)>,
    defaults: Vec<OdfStyle>,
    /// Configuration markup for `office:styles`
    raw: Vec<String>,
    font_faces: Vec<String>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `style` and return the name it is known by.
    ///
    /// Without [`InsertFlags::DONT_ADD_NUMBER`] the name is the candidate
    /// followed by the first free number (`"P"` becomes `"P1"`, `"P2"`, ...).
    /// With it, the candidate is used as is unless it is already taken in
    /// the style's family. An automatic style identical to one already
    /// registered returns the existing name. Default styles replace the
    /// family's previous default and keep the candidate as name.
    pub fn insert(&mut self, style: OdfStyle, candidate: &str, flags: InsertFlags) -> String {
        let family = style.family();

        if style.is_default() {
            self.defaults.retain(|d| d.family() != family);
            self.defaults.push(style);
            return candidate.to_string();
        }

        if style.is_auto() && !flags.contains(InsertFlags::ALLOW_DUPLICATES) {
            if let Some(existing) = self.entries.iter().find(|e| e.style == style) {
                return existing.name.clone();
            }
        }

        let name = if flags.contains(InsertFlags::DONT_ADD_NUMBER) && !self.is_taken(family, candidate)
        {
            candidate.to_string()
        } else {
            (1u32..)
                .map(|n| format!("{}{}", candidate, n))
                .find(|name| !self.is_taken(family, name))
                .unwrap_or_else(|| candidate.to_string())
        };

        self.names.insert((family, name.clone()));
        self.entries.push(Entry {
            name: name.clone(),
            style,
        });
        name
    }

    /// Append raw markup to `office:styles`.
    pub fn insert_raw(&mut self, xml: impl Into<String>) {
        self.raw.push(xml.into());
    }

    /// Register a font face once.
    pub fn insert_font_face(&mut self, name: &str) {
        if !self.font_faces.iter().any(|f| f == name) {
            self.font_faces.push(name.to_string());
        }
    }

    fn is_taken(&self, family: StyleFamily, name: &str) -> bool {
        self.names.contains(&(family, name.to_string()))
    }

    pub fn style(&self, family: StyleFamily, name: &str) -> Option<&OdfStyle> {
        self.entries
            .iter()
            .find(|e| e.style.family() == family && e.name == name)
            .map(|e| &e.style)
    }

    /// Registered styles of a family, in registration order.
    pub fn styles(&self, family: StyleFamily) -> impl Iterator<Item = (&str, &OdfStyle)> {
        self.entries
            .iter()
            .filter(move |e| e.style.family() == family)
            .map(|e| (e.name.as_str(), &e.style))
    }

    pub fn count(&self, family: StyleFamily) -> usize {
        self.styles(family).count()
    }

    pub fn default_style(&self, family: StyleFamily) -> Option<&OdfStyle> {
        self.defaults.iter().find(|d| d.family() == family)
    }

    pub fn raw(&self) -> impl Iterator<Item = &str> {
        self.raw.iter().map(String::as_str)
    }

    pub fn font_faces(&self) -> &[String] {
        &self.font_faces
    }

    /// `office:font-face-decls`
    pub fn write_font_face_decls(&self, w: &mut XmlWriter) -> Result<()> {
        w.start_element("office:font-face-decls");
        for face in &self.font_faces {
            w.start_element("style:font-face");
            w.add_attribute("style:name", face);
            w.add_attribute("svg:font-family", format!("'{}'", face));
            w.end_element()?;
        }
        w.end_element()
    }

    /// `office:styles`: default styles, common styles and raw markup.
    pub fn write_common_styles(&self, w: &mut XmlWriter) -> Result<()> {
        w.start_element("office:styles");
        for style in &self.defaults {
            style.write_xml("", w)?;
        }
        for entry in self.entries.iter().filter(|e| {
            !e.style.is_auto() && e.style.family() != StyleFamily::MasterPage
        }) {
            entry.style.write_xml(&entry.name, w)?;
        }
        for xml in &self.raw {
            w.add_complete_element(xml);
        }
        w.end_element()
    }

    /// `office:automatic-styles`. Page layouts only belong in styles.xml.
    pub fn write_automatic_styles(&self, w: &mut XmlWriter, styles_xml: bool) -> Result<()> {
        w.start_element("office:automatic-styles");
        for entry in self.entries.iter().filter(|e| e.style.is_auto()) {
            if entry.style.family() == StyleFamily::PageLayout && !styles_xml {
                continue;
            }
            entry.style.write_xml(&entry.name, w)?;
        }
        w.end_element()
    }

    /// `office:master-styles`
    pub fn write_master_styles(&self, w: &mut XmlWriter) -> Result<()> {
        w.start_element("office:master-styles");
        for (name, style) in self.styles(StyleFamily::MasterPage) {
            style.write_xml(name, w)?;
        }
        w.end_element()
    }
}
