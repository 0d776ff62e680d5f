/// Header and footer capture.
///
/// Word stores six header/footer stories per section and reports them in
/// a fixed order (even before odd, headers before footers, first-page
/// stories last). ODF has one header and one footer element per master
/// page, with the even-page content as `style:header-left` /
/// `style:footer-left` next to it. An even story is therefore held back
/// until the odd story that follows it is complete, and both go into the
/// master page as one block.
use crate::common::{Error, Result};
use crate::odf::core::XmlWriter;
use crate::odt::section::PendingPages;
use crate::ole::doc::events::HeaderKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Closed,
    CapturingEven,
    CapturingPrimary { first: bool },
}

/// Header/footer capture state of one conversion.
#[derive(Debug, Clone)]
pub struct HeaderCapture {
    state: CaptureState,
    kind: Option<HeaderKind>,
    /// Child block key of the open capture
    serial: u32,
    /// Serialised even-page element waiting for its odd counterpart
    pending_even: Option<(HeaderKind, String)>,
}

impl Default for HeaderCapture {
    fn default() -> Self {
        Self {
            state: CaptureState::Closed,
            kind: None,
            serial: 0,
            pending_even: None,
        }
    }
}

impl HeaderCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state != CaptureState::Closed
    }

    /// Start capturing `kind`, returning the element the captured content
    /// must be written in. `serial` is the key the content will be stored
    /// under in its master page.
    ///
    /// Odd and first-page stories mark their master page as having a header
    /// or footer.
    pub fn start(
        &mut self,
        kind: HeaderKind,
        serial: u32,
        pending: &mut PendingPages,
    ) -> Result<&'static str> {
        if self.is_capturing() {
            return Err(Error::InconsistentState(format!(
                "{:?} starts while {:?} is still open",
                kind, self.kind
            )));
        }
        let stale = self.pending_even.as_ref().is_some_and(|(even, _)| {
            kind.is_even() || kind.is_first() || kind.is_footer() != even.is_footer()
        });
        if stale {
            if let Some((even, _)) = self.pending_even.take() {
                log::warn!("Dropping {:?}: no matching odd story followed it", even);
            }
        }
        self.kind = Some(kind);
        self.serial = serial;

        if kind.is_even() {
            self.state = CaptureState::CapturingEven;
            return Ok(if kind.is_footer() {
                "style:footer-left"
            } else {
                "style:header-left"
            });
        }

        let first = kind.is_first();
        self.state = CaptureState::CapturingPrimary { first };
        let target = if first {
            pending.first_mut()
        } else {
            pending.last_mut()
        };
        match target {
            Some(page) if kind.is_footer() => page.has_footer = true,
            Some(page) => page.has_header = true,
            None => log::warn!("{:?} outside a section with pending master pages", kind),
        }

        Ok(if kind.is_footer() {
            "style:footer"
        } else {
            "style:header"
        })
    }

    /// Finish the capture whose content was written into `writer`, the
    /// element returned by [`HeaderCapture::start`] still open.
    ///
    /// A finished primary story is added to its master page, followed by the
    /// even story captured right before it.
    pub fn end(&mut self, mut writer: XmlWriter, pending: &mut PendingPages) -> Result<()> {
        let state = self.state;
        let kind = self.kind.take();
        self.state = CaptureState::Closed;

        match state {
            CaptureState::Closed => Err(Error::InvariantViolation(
                "header end without header start".to_string(),
            )),
            CaptureState::CapturingEven => {
                writer.end_element()?;
                let kind = kind.ok_or_else(|| {
                    Error::InvariantViolation("even capture without a story kind".to_string())
                })?;
                self.pending_even = Some((kind, writer.finish()?));
                Ok(())
            },
            CaptureState::CapturingPrimary { first } => {
                writer.end_element()?;
                if let Some((_, even)) = self.pending_even.take() {
                    writer.add_complete_element(&even);
                }
                let content = writer.finish()?;

                let target = if first {
                    pending.first_mut()
                } else {
                    pending.last_mut()
                };
                match target {
                    Some(page) => page.master.add_child_element(&self.serial.to_string(), content),
                    None => log::warn!("Dropping {:?}: no master page to attach it to", kind),
                }
                Ok(())
            },
        }
    }

    /// Forget an even story of the section that just ended which never met
    /// its odd counterpart.
    pub fn reset_section(&mut self) {
        if let Some((kind, _)) = self.pending_even.take() {
            log::warn!("Dropping {:?}: section ended before its odd story", kind);
        }
    }
}
