//! Streaming XML writer for ODF parts.
//!
//! [`XmlWriter`] accepts start-element / attribute / text / end-element
//! calls and serialises them immediately. Content that is only known later
//! (note and annotation bodies) is represented by a slot: the writer records
//! a placeholder and the body, produced by another writer, is spliced in
//! when the output is rendered.

use std::collections::HashMap;
use std::fmt::Display;

use crate::common::xml::{escape_text, escape_xml};
use crate::common::{Error, Result};

/// Identifier of a deferred content slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    Xml(String),
    Slot(SlotId),
}

/// Writers that fill slots, keyed by the slot they fill.
pub type SlotContents = HashMap<SlotId, XmlWriter>;

/// Streaming XML serialiser.
///
/// # Examples
///
/// ```
/// use doc2odt::odf::core::XmlWriter;
///
/// let mut w = XmlWriter::new();
/// w.start_element("text:p");
/// w.add_attribute("text:style-name", "Standard");
/// w.add_text_node("a < b");
/// w.end_element().unwrap();
/// assert_eq!(
///     w.finish().unwrap(),
///     r#"<text:p text:style-name="Standard">a &lt; b</text:p>"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct XmlWriter {
    chunks: Vec<Chunk>,
    buf: String,
    open: Vec<String>,
    /// A start tag has been written without its closing `>`
    tag_pending: bool,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an element. Attributes may follow until the next content call.
    pub fn start_element(&mut self, name: &str) {
        self.close_pending_tag();
        self.buf.push('<');
        self.buf.push_str(name);
        self.open.push(name.to_string());
        self.tag_pending = true;
    }

    /// Add an attribute to the element opened last. Ignored (with a
    /// warning) once that element has content.
    pub fn add_attribute(&mut self, name: &str, value: impl Display) {
        if !self.tag_pending {
            log::warn!("attribute {} written outside a start tag, dropped", name);
            return;
        }
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        self.buf.push_str(&escape_xml(&value.to_string()));
        self.buf.push('"');
    }

    pub fn add_text_node(&mut self, text: &str) {
        self.close_pending_tag();
        self.buf.push_str(&escape_text(text));
    }

    /// Close the element opened last.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentState`] when no element is open.
    pub fn end_element(&mut self) -> Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| Error::InconsistentState("end_element without open element".into()))?;
        if self.tag_pending {
            self.buf.push_str("/>");
            self.tag_pending = false;
        } else {
            self.buf.push_str("</");
            self.buf.push_str(&name);
            self.buf.push('>');
        }
        Ok(())
    }

    /// Append an already serialised subtree.
    pub fn add_complete_element(&mut self, xml: &str) {
        self.close_pending_tag();
        self.buf.push_str(xml);
    }

    /// Splice another writer's output, keeping its slots.
    pub fn add_writer(&mut self, other: XmlWriter) -> Result<()> {
        if !other.is_balanced() {
            return Err(Error::InconsistentState(format!(
                "spliced writer has {} open elements",
                other.depth()
            )));
        }
        self.close_pending_tag();
        for chunk in other.chunks {
            self.push_chunk(chunk);
        }
        self.buf.push_str(&other.buf);
        Ok(())
    }

    /// Reserve a slot at the current position.
    pub fn add_slot(&mut self, id: SlotId) {
        self.close_pending_tag();
        self.push_chunk(Chunk::Slot(id));
    }

    /// Number of open elements.
    #[inline]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.open.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty() && self.buf.is_empty()
    }

    /// Slots reserved in this writer, in document order.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.chunks.iter().filter_map(|chunk| match chunk {
            Chunk::Slot(id) => Some(*id),
            Chunk::Xml(_) => None,
        })
    }

    /// Finish a writer that has no slots.
    pub fn finish(self) -> Result<String> {
        self.finish_with(&mut SlotContents::new())
    }

    /// Finish the writer, splicing each slot's content recursively. Every
    /// slot must have content; each content is used once.
    pub fn finish_with(mut self, contents: &mut SlotContents) -> Result<String> {
        if !self.is_balanced() {
            return Err(Error::InconsistentState(format!(
                "unclosed elements: {}",
                self.open.join(", ")
            )));
        }
        self.close_pending_tag();
        let mut out = String::new();
        for chunk in self.chunks {
            match chunk {
                Chunk::Xml(xml) => out.push_str(&xml),
                Chunk::Slot(id) => {
                    let content = contents.remove(&id).ok_or_else(|| {
                        Error::InvariantViolation(format!("slot {} was never filled", id.0))
                    })?;
                    out.push_str(&content.finish_with(contents)?);
                },
            }
        }
        out.push_str(&self.buf);
        Ok(out)
    }

    fn close_pending_tag(&mut self) {
        if self.tag_pending {
            self.buf.push('>');
            self.tag_pending = false;
        }
    }

    fn push_chunk(&mut self, chunk: Chunk) {
        if !self.buf.is_empty() {
            self.chunks.push(Chunk::Xml(std::mem::take(&mut self.buf)));
        }
        self.chunks.push(chunk);
    }
}
