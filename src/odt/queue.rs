/// Sub-document work queue.
///
/// Note and annotation bodies live outside the main text. When a reference
/// is met, a slot is reserved in the output at the reference position and a
/// work item is queued; the body is parsed once the main text is done and
/// written into the slot. Converting a body can queue more work (a table in
/// a footnote may hold another note reference), so the queue is drained
/// until it stays empty.
///
/// Tables, header groups, pictures, floating objects and text boxes must
/// stay at their position in the text. They go through the same dispatcher
/// but are executed as soon as they are found.
use std::collections::VecDeque;

use crate::common::Result;
use crate::odf::core::SlotId;
use crate::ole::doc::events::{
    AnnotationReference, HeaderGroup, NoteReference, PictureData, SubDocumentParser,
    TableDescriptor,
};

/// A unit of sub-document work.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkItem {
    Footnote {
        reference: NoteReference,
        slot: SlotId,
    },
    Endnote {
        reference: NoteReference,
        slot: SlotId,
    },
    Annotation {
        reference: AnnotationReference,
        slot: SlotId,
    },
    HeaderGroup(HeaderGroup),
    Table(TableDescriptor),
    InlineObject(PictureData),
    FloatingObject {
        global_cp: u32,
    },
    TextBox {
        index: u32,
        styles_xml: bool,
    },
}

impl WorkItem {
    /// Whether the item is queued rather than executed where it is found.
    pub fn is_deferred(&self) -> bool {
        matches!(
            self,
            WorkItem::Footnote { .. } | WorkItem::Endnote { .. } | WorkItem::Annotation { .. }
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            WorkItem::Footnote { .. } => "footnote",
            WorkItem::Endnote { .. } => "endnote",
            WorkItem::Annotation { .. } => "annotation",
            WorkItem::HeaderGroup(_) => "header group",
            WorkItem::Table(_) => "table",
            WorkItem::InlineObject(_) => "inline object",
            WorkItem::FloatingObject { .. } => "floating object",
            WorkItem::TextBox { .. } => "text box",
        }
    }
}

/// Queue counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Items ever queued
    pub enqueued: usize,
    /// Queued items taken out for execution
    pub executed: usize,
    /// Items executed where they were found
    pub executed_inline: usize,
}

/// FIFO of deferred work items.
#[derive(Debug, Clone, Default)]
pub struct WorkQueue {
    items: VecDeque<WorkItem>,
    stats: QueueStats,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, item: WorkItem) {
        log::debug!("Queueing {}", item.kind_name());
        self.stats.enqueued += 1;
        self.items.push_back(item);
    }

    /// Take the oldest item for execution.
    pub fn pop(&mut self) -> Option<WorkItem> {
        let item = self.items.pop_front()?;
        self.stats.executed += 1;
        Some(item)
    }

    /// Count an item executed without going through the queue.
    pub fn record_inline(&mut self) {
        self.stats.executed_inline += 1;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> QueueStats {
        self.stats
    }
}

/// Something that owns a [`WorkQueue`] and knows how to run its items.
pub trait WorkExecutor {
    fn queue(&mut self) -> &mut WorkQueue;

    /// Run one item. May queue more work.
    fn execute(&mut self, item: WorkItem, parser: &mut dyn SubDocumentParser) -> Result<()>;
}

/// Execute queued work until the queue stays empty. Returns the number of
/// items executed.
pub fn drain_all<E>(executor: &mut E, parser: &mut dyn SubDocumentParser) -> Result<usize>
where
    E: WorkExecutor + ?Sized,
{
    let mut executed = 0;
    while let Some(item) = executor.queue().pop() {
        executor.execute(item, parser)?;
        executed += 1;
    }
    log::debug!("Work queue drained after {} items", executed);
    Ok(executed)
}
