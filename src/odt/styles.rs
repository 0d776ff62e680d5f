/// Style sheet translation.
///
/// Every paragraph and character style of the Word style sheet becomes a
/// named ODF style. Names are sanitised the way OpenOffice encodes style
/// names (`"Heading 1"` is written as `"Heading_20_1"` with the original as
/// display name), parent and follow-on relations are carried over when they
/// resolve to a style of the same kind, and a default paragraph style holds
/// the document tab stop distance.
use std::collections::HashMap;

use crate::common::unit::Pt;
use crate::odf::{InsertFlags, OdfStyle, PropertyType, StyleFamily, StyleRegistry};
use crate::ole::doc::parts::{
    CharacterProperties, DocumentProperties, FontTable, ParagraphProperties, STI_LINE_NUMBER,
    StyleKind, StyleRecord, StyleSheet,
};

/// Output names of the translated styles.
#[derive(Debug, Clone, Default)]
pub struct StyleNames {
    names: HashMap<u16, String>,
    line_number_style: Option<String>,
}

impl StyleNames {
    /// Output name of the style at `istd`.
    pub fn name(&self, istd: u16) -> Option<&str> {
        self.names.get(&istd).map(String::as_str)
    }

    /// Name of the style Word uses for line numbers, if the sheet has one.
    pub fn line_number_style(&self) -> Option<&str> {
        self.line_number_style.as_deref()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Encode a style name as an ODF style identifier.
///
/// ASCII letters, digits, `-` and `.` are kept; every other character is
/// written as `_XX_` with its hexadecimal code point.
///
/// # Examples
///
/// ```
/// use doc2odt::odt::styles::sanitize_style_name;
///
/// assert_eq!(sanitize_style_name("Heading 1"), "Heading_20_1");
/// assert_eq!(sanitize_style_name("Normal"), "Normal");
/// ```
pub fn sanitize_style_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
            out.push(ch);
        } else {
            out.push_str(&format!("_{:X}_", ch as u32));
        }
    }
    out
}

/// Register every paragraph and character style of `sheet` in `registry`.
pub fn translate_styles(
    sheet: &StyleSheet,
    dop: &DocumentProperties,
    registry: &mut StyleRegistry,
) -> StyleNames {
    let mut names = assign_names(sheet);

    for record in sheet.iter() {
        let Some(name) = names.name(record.istd).map(str::to_string) else {
            log::debug!(
                "Skipping {:?} style {} ({})",
                record.kind,
                record.istd,
                record.name
            );
            continue;
        };

        let style = match record.kind {
            StyleKind::Paragraph => paragraph_style(record, sheet, &names, registry),
            StyleKind::Character => character_style(record, sheet, &names, registry),
            StyleKind::Table | StyleKind::List => continue,
        };

        let registered = registry.insert(style, &name, InsertFlags::DONT_ADD_NUMBER);
        if registered != name {
            log::warn!("Style name {} already taken, registered as {}", name, registered);
            names.names.insert(record.istd, registered.clone());
        }

        if record.sti == STI_LINE_NUMBER {
            names.line_number_style = Some(registered);
        }
    }

    let mut default = OdfStyle::default_style(StyleFamily::Paragraph);
    default.add_property(
        PropertyType::Paragraph,
        "style:tab-stop-distance",
        Pt::from_twips(dop.tab_stop_twips as i32),
    );
    registry.insert(default, "", InsertFlags::empty());

    names
}

/// Compute an output name for every paragraph and character style, unique
/// within its family.
fn assign_names(sheet: &StyleSheet) -> StyleNames {
    let mut names = StyleNames::default();
    let mut taken: HashMap<(StyleFamily, String), u16> = HashMap::new();

    for record in sheet.iter() {
        let Some(family) = family_of(record.kind) else {
            continue;
        };
        let base = if record.name.trim().is_empty() {
            format!("Style{}", record.istd)
        } else {
            sanitize_style_name(&record.name)
        };
        let name = if taken.contains_key(&(family, base.clone())) {
            format!("{}_{}", base, record.istd)
        } else {
            base
        };
        taken.insert((family, name.clone()), record.istd);
        names.names.insert(record.istd, name);
    }
    names
}

fn family_of(kind: StyleKind) -> Option<StyleFamily> {
    match kind {
        StyleKind::Paragraph => Some(StyleFamily::Paragraph),
        StyleKind::Character => Some(StyleFamily::Text),
        StyleKind::Table | StyleKind::List => None,
    }
}

/// Output name of `istd` when it is a style of `kind`.
fn related_name<'a>(
    sheet: &StyleSheet,
    names: &'a StyleNames,
    istd: u16,
    kind: StyleKind,
) -> Option<&'a str> {
    sheet
        .style(istd)
        .filter(|related| related.kind == kind)
        .and_then(|related| names.name(related.istd))
}

fn named_style(record: &StyleRecord, family: StyleFamily, names: &StyleNames) -> OdfStyle {
    let mut style = OdfStyle::new(family);
    if names.name(record.istd) != Some(record.name.as_str()) && !record.name.is_empty() {
        style.add_attribute("style:display-name", &record.name);
    }
    style
}

fn paragraph_style(
    record: &StyleRecord,
    sheet: &StyleSheet,
    names: &StyleNames,
    registry: &mut StyleRegistry,
) -> OdfStyle {
    let mut style = named_style(record, StyleFamily::Paragraph, names);

    if record.next != record.istd {
        if let Some(next) = related_name(sheet, names, record.next, StyleKind::Paragraph) {
            style.add_attribute("style:next-style-name", next);
        }
    }
    if let Some(base) = record.base.filter(|&base| base != record.istd) {
        match related_name(sheet, names, base, StyleKind::Paragraph) {
            Some(parent) => style.set_parent(parent),
            None => log::debug!("Style {} has unresolvable parent {}", record.istd, base),
        }
    }

    apply_paragraph_properties(&mut style, &record.paragraph);
    apply_character_properties(&mut style, &record.character, sheet.fonts(), registry);
    style
}

fn character_style(
    record: &StyleRecord,
    sheet: &StyleSheet,
    names: &StyleNames,
    registry: &mut StyleRegistry,
) -> OdfStyle {
    let mut style = named_style(record, StyleFamily::Text, names);

    if let Some(base) = record.base.filter(|&base| base != record.istd) {
        if let Some(parent) = related_name(sheet, names, base, StyleKind::Character) {
            style.set_parent(parent);
        }
    }

    apply_character_properties(&mut style, &record.character, sheet.fonts(), registry);
    style
}

/// Copy paragraph formatting into `style`.
pub fn apply_paragraph_properties(style: &mut OdfStyle, pap: &ParagraphProperties) {
    for (name, value) in pap.odf_properties() {
        style.add_property(PropertyType::Paragraph, name, value);
    }
}

/// Copy character formatting into `style`, registering the font face.
pub fn apply_character_properties(
    style: &mut OdfStyle,
    chp: &CharacterProperties,
    fonts: &FontTable,
    registry: &mut StyleRegistry,
) {
    if let Some(ftc) = chp.font_index {
        match fonts.name(ftc) {
            Some(font) => {
                registry.insert_font_face(font);
                style.add_property(PropertyType::Text, "style:font-name", font);
            },
            None => log::debug!("Font index {} not in font table", ftc),
        }
    }
    for (name, value) in chp.odf_properties() {
        style.add_property(PropertyType::Text, name, value);
    }
}
