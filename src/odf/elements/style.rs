//! Style objects for ODF output.
//!
//! An [`OdfStyle`] is a generic style under construction: a family, its own
//! attributes, property sets per property type and, for master pages, named
//! child blocks of raw XML (the header and footer content).

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::common::Result;
use crate::odf::core::XmlWriter;

/// Style family types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleFamily {
    /// Paragraph styles
    Paragraph,
    /// Text/character styles
    Text,
    /// Table styles
    Table,
    /// Table column styles
    TableColumn,
    /// Table cell styles
    TableCell,
    /// Graphic (frame) styles
    Graphic,
    /// Page layout styles
    PageLayout,
    /// Master page styles
    MasterPage,
}

impl StyleFamily {
    /// Value of `style:family`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Text => "text",
            Self::Table => "table",
            Self::TableColumn => "table-column",
            Self::TableCell => "table-cell",
            Self::Graphic => "graphic",
            Self::PageLayout => "page-layout",
            Self::MasterPage => "master-page",
        }
    }

    /// Element a style of this family is written as.
    fn element_name(&self, is_default: bool) -> &'static str {
        match self {
            _ if is_default => "style:default-style",
            Self::PageLayout => "style:page-layout",
            Self::MasterPage => "style:master-page",
            _ => "style:style",
        }
    }
}

/// Property groups of a style, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyType {
    PageLayout,
    HeaderStyle,
    FooterStyle,
    Paragraph,
    Text,
    Table,
    TableColumn,
    TableCell,
    Graphic,
}

impl PropertyType {
    /// Element(s) wrapping the properties: an optional outer element and
    /// the properties element itself.
    fn elements(&self) -> (Option<&'static str>, &'static str) {
        match self {
            Self::PageLayout => (None, "style:page-layout-properties"),
            Self::HeaderStyle => (Some("style:header-style"), "style:header-footer-properties"),
            Self::FooterStyle => (Some("style:footer-style"), "style:header-footer-properties"),
            Self::Paragraph => (None, "style:paragraph-properties"),
            Self::Text => (None, "style:text-properties"),
            Self::Table => (None, "style:table-properties"),
            Self::TableColumn => (None, "style:table-column-properties"),
            Self::TableCell => (None, "style:table-cell-properties"),
            Self::Graphic => (None, "style:graphic-properties"),
        }
    }
}

/// A style definition under construction.
///
/// Two styles compare equal when their family, attributes and properties
/// are equal; child blocks do not take part in the comparison.
#[derive(Debug, Clone)]
pub struct OdfStyle {
    family: StyleFamily,
    attributes: BTreeMap<String, String>,
    properties: BTreeMap<PropertyType, BTreeMap<String, String>>,
    property_children: BTreeMap<PropertyType, String>,
    children: Vec<(String, String)>,
    auto: bool,
    default: bool,
}

impl PartialEq for OdfStyle {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.auto == other.auto
            && self.default == other.default
            && self.attributes == other.attributes
            && self.properties == other.properties
            && self.property_children == other.property_children
    }
}

impl OdfStyle {
    /// A common (named) style.
    pub fn new(family: StyleFamily) -> Self {
        Self {
            family,
            attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
            property_children: BTreeMap::new(),
            children: Vec::new(),
            auto: false,
            default: false,
        }
    }

    /// An automatic style; identical automatic styles are shared.
    pub fn automatic(family: StyleFamily) -> Self {
        Self {
            auto: true,
            ..Self::new(family)
        }
    }

    /// The family default style (`style:default-style`).
    pub fn default_style(family: StyleFamily) -> Self {
        Self {
            default: true,
            ..Self::new(family)
        }
    }

    #[inline]
    pub fn family(&self) -> StyleFamily {
        self.family
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        self.auto
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.default
    }

    /// Set an attribute on the style element, replacing any previous value.
    pub fn add_attribute(&mut self, name: &str, value: impl Display) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_parent(&mut self, parent: &str) {
        self.add_attribute("style:parent-style-name", parent);
    }

    /// Set a property, replacing any previous value.
    pub fn add_property(&mut self, kind: PropertyType, name: &str, value: impl Display) {
        self.properties
            .entry(kind)
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    pub fn property(&self, kind: PropertyType, name: &str) -> Option<&str> {
        self.properties
            .get(&kind)
            .and_then(|props| props.get(name))
            .map(String::as_str)
    }

    pub fn remove_property(&mut self, kind: PropertyType, name: &str) -> Option<String> {
        self.properties.get_mut(&kind).and_then(|props| props.remove(name))
    }

    /// Add raw XML inside a properties element.
    pub fn add_property_child(&mut self, kind: PropertyType, xml: &str) {
        self.property_children.entry(kind).or_default().push_str(xml);
    }

    /// Add a named block of raw XML as child of the style element.
    pub fn add_child_element(&mut self, key: &str, xml: String) {
        self.children.push((key.to_string(), xml));
    }

    /// Child blocks in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &str)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialise under `name` (ignored for default styles).
    pub fn write_xml(&self, name: &str, w: &mut XmlWriter) -> Result<()> {
        w.start_element(self.family.element_name(self.default));
        if !self.default {
            w.add_attribute("style:name", name);
        }
        if !matches!(self.family, StyleFamily::PageLayout | StyleFamily::MasterPage) {
            w.add_attribute("style:family", self.family.as_str());
        }
        for (attr, value) in &self.attributes {
            w.add_attribute(attr, value);
        }

        let kinds: std::collections::BTreeSet<_> = self
            .properties
            .keys()
            .chain(self.property_children.keys())
            .copied()
            .collect();
        for kind in kinds {
            let (outer, inner) = kind.elements();
            if let Some(outer) = outer {
                w.start_element(outer);
            }
            w.start_element(inner);
            for (prop, value) in self.properties.get(&kind).into_iter().flatten() {
                w.add_attribute(prop, value);
            }
            if let Some(xml) = self.property_children.get(&kind) {
                w.add_complete_element(xml);
            }
            w.end_element()?;
            if outer.is_some() {
                w.end_element()?;
            }
        }

        for (_, xml) in &self.children {
            w.add_complete_element(xml);
        }
        w.end_element()
    }
}
