/// Text output: frames, lists, runs and picture storage.
///
/// Text is written into the frame on top of the session's frame stack. The
/// main text is the bottom frame; a header, a note or annotation body and a
/// text box each get a frame of their own while they are converted.
use crate::common::Result;
use crate::odf::core::{SlotId, XmlWriter};
use crate::ole::doc::events::ListInfo;

/// What a frame's content belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Body,
    Header,
    Note(SlotId),
    Annotation(SlotId),
    TextBox,
}

/// Output target with its paragraph and list state.
#[derive(Debug, Clone)]
pub struct Frame {
    pub kind: FrameKind,
    pub writer: XmlWriter,
    list_id: Option<u32>,
    /// Open list levels; each level is a `text:list` with an open `text:list-item`
    list_depth: usize,
    in_paragraph: bool,
    /// The paragraph is empty or its last run ended with a space
    after_space: bool,
    paragraphs: usize,
}

impl Frame {
    pub fn new(kind: FrameKind) -> Self {
        Self::with_writer(kind, XmlWriter::new())
    }

    pub fn with_writer(kind: FrameKind, writer: XmlWriter) -> Self {
        Self {
            kind,
            writer,
            list_id: None,
            list_depth: 0,
            in_paragraph: false,
            after_space: false,
            paragraphs: 0,
        }
    }

    pub fn in_paragraph(&self) -> bool {
        self.in_paragraph
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs
    }

    pub fn list_depth(&self) -> usize {
        self.list_depth
    }

    /// Put the list structure in place for a paragraph. `None` closes any
    /// open list.
    pub fn enter_list(&mut self, list: Option<ListInfo>) -> Result<()> {
        let Some(info) = list else {
            return self.close_lists();
        };
        if self.list_id != Some(info.list_id) {
            self.close_lists()?;
        }

        let target = info.level as usize + 1;
        while self.list_depth > target {
            self.writer.end_element()?; // text:list-item
            self.writer.end_element()?; // text:list
            self.list_depth -= 1;
        }
        if self.list_depth == target {
            self.writer.end_element()?;
            self.writer.start_element("text:list-item");
        }
        while self.list_depth < target {
            self.writer.start_element("text:list");
            self.writer.start_element("text:list-item");
            self.list_depth += 1;
        }
        self.list_id = Some(info.list_id);
        Ok(())
    }

    pub fn close_lists(&mut self) -> Result<()> {
        while self.list_depth > 0 {
            self.writer.end_element()?;
            self.writer.end_element()?;
            self.list_depth -= 1;
        }
        self.list_id = None;
        Ok(())
    }

    /// Open a `text:p`.
    pub fn start_paragraph(&mut self, style: Option<&str>) {
        self.writer.start_element("text:p");
        if let Some(style) = style {
            self.writer.add_attribute("text:style-name", style);
        }
        self.in_paragraph = true;
        self.after_space = true;
        self.paragraphs += 1;
    }

    pub fn end_paragraph(&mut self) -> Result<()> {
        self.writer.end_element()?;
        self.in_paragraph = false;
        Ok(())
    }

    /// Write a run, inside a `text:span` when it has a style.
    pub fn write_run(&mut self, text: &str, style: Option<&str>) -> Result<()> {
        if let Some(style) = style {
            self.writer.start_element("text:span");
            self.writer.add_attribute("text:style-name", style);
            self.after_space = write_text(&mut self.writer, text, self.after_space)?;
            self.writer.end_element()
        } else {
            self.after_space = write_text(&mut self.writer, text, self.after_space)?;
            Ok(())
        }
    }
}

/// Write text, turning tabs, line breaks and runs of spaces into their ODF
/// elements.
///
/// `after_space` tells whether the text starts a paragraph or follows a
/// space, where a leading space would be collapsed. Returns the same for
/// whatever comes after `text`.
pub fn write_text(w: &mut XmlWriter, text: &str, after_space: bool) -> Result<bool> {
    let mut plain = String::new();
    let mut spaces = 0usize;
    let mut collapse = after_space;

    for ch in text.chars() {
        match ch {
            ' ' if plain.ends_with(' ') || (plain.is_empty() && (spaces > 0 || collapse)) => {
                spaces += 1
            },
            ' ' => plain.push(' '),
            '\t' | '\n' | '\u{b}' => {
                flush_text(w, &mut plain, &mut spaces)?;
                w.start_element(if ch == '\t' { "text:tab" } else { "text:line-break" });
                w.end_element()?;
                collapse = false;
            },
            _ => {
                if spaces > 0 {
                    flush_text(w, &mut plain, &mut spaces)?;
                }
                plain.push(ch);
                collapse = false;
            },
        }
    }
    flush_text(w, &mut plain, &mut spaces)?;
    Ok(match text.chars().last() {
        Some(last) => last == ' ',
        None => after_space,
    })
}

fn flush_text(w: &mut XmlWriter, plain: &mut String, spaces: &mut usize) -> Result<()> {
    if !plain.is_empty() {
        w.add_text_node(plain);
        plain.clear();
    }
    if *spaces > 0 {
        w.start_element("text:s");
        if *spaces > 1 {
            w.add_attribute("text:c", *spaces);
        }
        w.end_element()?;
        *spaces = 0;
    }
    Ok(())
}

/// Pictures to be stored in the package, by package path.
#[derive(Debug, Clone, Default)]
pub struct PictureStore {
    entries: Vec<(String, Vec<u8>)>,
}

impl PictureStore {
    /// Store a picture once per path.
    pub fn add(&mut self, path: &str, bytes: Vec<u8>) {
        if self.entries.iter().any(|(p, _)| p == path) {
            return;
        }
        self.entries.push((path.to_string(), bytes));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, Vec<u8>)> {
        self.entries
    }
}
