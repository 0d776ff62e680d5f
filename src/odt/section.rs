/// Section and page layout state machine.
///
/// Each Word section may need its own page layout and master page. They are
/// built when the section starts, kept pending while the section body (and
/// its headers and footers) is converted, and registered when the section
/// ends, once it is known which master pages really got a header or footer.
///
/// A section that looks exactly like the previous one does not get new
/// styles: a continuous break simply carries on with the current master
/// page, a page break starts a new page on the previous master page.
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;

use crate::common::unit::Pt;
use crate::common::Result;
use crate::odf::{InsertFlags, OdfStyle, PropertyType, StyleFamily, StyleRegistry};
use crate::odt::OdtOptions;
use crate::odt::page_layout::{LayoutVariant, PageContext, build_page_layout};
use crate::ole::doc::parts::{BreakKind, LineNumbering, SectionProperties};

/// Master page name of the first section.
pub const FIRST_MASTER_PAGE: &str = "Standard";

/// A page layout / master page pair waiting for the end of its section.
#[derive(Debug, Clone)]
pub struct PendingPage {
    pub layout: OdfStyle,
    pub master: OdfStyle,
    pub master_name: String,
    pub has_header: bool,
    pub has_footer: bool,
}

impl PendingPage {
    fn new(layout: OdfStyle, master_name: String) -> Self {
        Self {
            layout,
            master: OdfStyle::new(StyleFamily::MasterPage),
            master_name,
            has_header: false,
            has_footer: false,
        }
    }
}

/// Pending pages of the current section.
///
/// The first-page entry, when there is one, is always at the front; the
/// regular entry is always last.
#[derive(Debug, Clone, Default)]
pub struct PendingPages {
    pages: SmallVec<[PendingPage; 2]>,
}

impl PendingPages {
    pub fn push_back(&mut self, page: PendingPage) {
        self.pages.push(page);
    }

    pub fn push_front(&mut self, page: PendingPage) {
        self.pages.insert(0, page);
    }

    pub fn first(&self) -> Option<&PendingPage> {
        self.pages.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut PendingPage> {
        self.pages.first_mut()
    }

    pub fn last(&self) -> Option<&PendingPage> {
        self.pages.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut PendingPage> {
        self.pages.last_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingPage> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn drain(&mut self) -> impl Iterator<Item = PendingPage> + '_ {
        self.pages.drain(..)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Idle,
    InSection,
}

/// What a started section does about master pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterPageDecision {
    /// New page layouts and master pages are pending
    Create,
    /// Same page setup, continuous break: no master page change
    Omit,
    /// Same page setup, page break: the previous master page starts the new page
    ReuseLast,
}

/// The section state machine of one conversion.
#[derive(Debug, Clone)]
pub struct SectionMachine {
    state: SectionState,
    /// Number of sections started so far; the current section's 1-based index
    section_index: u32,
    decision: MasterPageDecision,
    pending: PendingPages,
    /// Regular layout of the last section that created master pages, as
    /// built before section end completed its margins
    last_layout: Option<OdfStyle>,
    last_master_name: Option<String>,
    /// Master page the next body paragraph has to switch to
    next_master_page: Option<String>,
    header_count: u32,
    line_numbering: Option<LineNumbering>,
    master_pages_created: usize,
    inconsistencies: Vec<String>,
}

impl Default for SectionMachine {
    fn default() -> Self {
        Self {
            state: SectionState::Idle,
            section_index: 0,
            decision: MasterPageDecision::Create,
            pending: PendingPages::default(),
            last_layout: None,
            last_master_name: None,
            next_master_page: None,
            header_count: 0,
            line_numbering: None,
            master_pages_created: 0,
            inconsistencies: Vec::new(),
        }
    }
}

impl SectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a section.
    ///
    /// `headers_changed` has bit `n` set when section `n` (zero-based)
    /// defines other headers or footers than the section before it.
    pub fn section_start(
        &mut self,
        sep: &SectionProperties,
        headers_changed: &FixedBitSet,
        ctx: &mut PageContext<'_>,
    ) {
        if self.state == SectionState::InSection {
            self.record_inconsistency(format!(
                "section start while section {} is open",
                self.section_index
            ));
            return;
        }
        self.state = SectionState::InSection;
        self.section_index += 1;
        let index = self.section_index;

        if self.line_numbering.is_none() {
            self.line_numbering = sep.line_numbering;
        }

        let first_page_distinct = sep.first_page_distinct();
        let candidate = build_page_layout(sep, LayoutVariant::Regular, ctx);
        let headers_changed = headers_changed.contains(index as usize - 1);

        if !first_page_distinct && !headers_changed && self.last_layout.as_ref() == Some(&candidate) {
            self.decision = match sep.break_kind {
                BreakKind::Continuous => MasterPageDecision::Omit,
                BreakKind::NewPage | BreakKind::EvenPage | BreakKind::OddPage => {
                    MasterPageDecision::ReuseLast
                },
                other => {
                    log::warn!(
                        "Unsupported section break {:?} in section {}, treated as continuous",
                        other,
                        index
                    );
                    MasterPageDecision::Omit
                },
            };
            log::debug!("Section {}: page setup unchanged, {:?}", index, self.decision);
            if self.decision == MasterPageDecision::ReuseLast {
                self.next_master_page = self.last_master_name.clone();
            }
            return;
        }

        self.decision = MasterPageDecision::Create;
        self.last_layout = Some(candidate.clone());

        let master_name = if index == 1 {
            FIRST_MASTER_PAGE.to_string()
        } else {
            format!("{}{}", ctx.options.master_page_prefix, index)
        };
        self.pending.push_back(PendingPage::new(candidate, master_name.clone()));

        if first_page_distinct {
            let layout = build_page_layout(sep, LayoutVariant::FirstPage, ctx);
            let first_name = if index > 1 {
                format!("{}{}", ctx.options.first_page_master_name, index)
            } else {
                ctx.options.first_page_master_name.clone()
            };
            let mut first = PendingPage::new(layout, first_name.clone());
            first.master.add_attribute("style:next-style-name", &master_name);
            self.pending.push_front(first);
            self.next_master_page = Some(first_name);
        } else {
            self.next_master_page = Some(master_name.clone());
        }
        self.last_master_name = Some(master_name);
    }

    /// End the section: complete the pending page layouts and register them
    /// together with their master pages.
    pub fn section_end(
        &mut self,
        sep: &SectionProperties,
        registry: &mut StyleRegistry,
        options: &OdtOptions,
    ) -> Result<()> {
        if self.state == SectionState::Idle {
            self.record_inconsistency("section end without open section".to_string());
            return Ok(());
        }

        for page in self.pending.drain() {
            let PendingPage {
                mut layout,
                mut master,
                master_name,
                has_header,
                has_footer,
            } = page;

            if has_header {
                layout.add_property(
                    PropertyType::PageLayout,
                    "fo:margin-top",
                    Pt::from_twips(sep.dya_hdr_top as i32),
                );
            } else if layout.property(PropertyType::PageLayout, "fo:border-top").is_none() {
                layout.add_property(
                    PropertyType::PageLayout,
                    "fo:margin-top",
                    Pt::from_twips((sep.dya_top as i32).abs()),
                );
            }

            if has_footer {
                layout.add_property(
                    PropertyType::PageLayout,
                    "fo:margin-bottom",
                    Pt::from_twips(sep.dya_hdr_bottom as i32),
                );
            } else if layout.property(PropertyType::PageLayout, "fo:border-bottom").is_none() {
                layout.add_property(
                    PropertyType::PageLayout,
                    "fo:margin-bottom",
                    Pt::from_twips((sep.dya_bottom as i32).abs()),
                );
            }

            let layout_name = registry.insert(layout, &options.page_layout_prefix, InsertFlags::empty());
            master.add_attribute("style:page-layout-name", &layout_name);
            let registered = registry.insert(master, &master_name, InsertFlags::DONT_ADD_NUMBER);
            if registered != master_name {
                log::warn!("Master page {} registered as {}", master_name, registered);
            }
            self.master_pages_created += 1;
        }

        self.header_count = 0;
        self.decision = MasterPageDecision::Create;
        self.state = SectionState::Idle;
        Ok(())
    }

    /// Whether headers and footers of the current section have anywhere to go.
    pub fn accepts_headers(&self) -> bool {
        self.state == SectionState::InSection
            && self.decision == MasterPageDecision::Create
            && !self.pending.is_empty()
    }

    /// Take the master page the next body paragraph must start.
    pub fn take_next_master_page(&mut self) -> Option<String> {
        self.next_master_page.take()
    }

    /// Advance the per-section header counter, returning the new value.
    pub fn next_header_serial(&mut self) -> u32 {
        self.header_count += 1;
        self.header_count
    }

    pub fn pending(&self) -> &PendingPages {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingPages {
        &mut self.pending
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn decision(&self) -> MasterPageDecision {
        self.decision
    }

    pub fn section_count(&self) -> u32 {
        self.section_index
    }

    pub fn master_pages_created(&self) -> usize {
        self.master_pages_created
    }

    /// Line numbering of the first section that enables it.
    pub fn line_numbering(&self) -> Option<LineNumbering> {
        self.line_numbering
    }

    pub fn inconsistencies(&self) -> &[String] {
        &self.inconsistencies
    }

    fn record_inconsistency(&mut self, message: String) {
        log::warn!("{}", message);
        self.inconsistencies.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::odt::text::PictureStore;
    use crate::ole::doc::events::NoPictures;
    use crate::ole::doc::parts::BorderCode;

    struct Harness {
        machine: SectionMachine,
        registry: StyleRegistry,
        options: OdtOptions,
        changed: FixedBitSet,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                machine: SectionMachine::new(),
                registry: StyleRegistry::new(),
                options: OdtOptions::default(),
                changed: FixedBitSet::with_capacity(16),
            }
        }

        fn start(&mut self, sep: &SectionProperties) {
            let mut background: Option<RGBColor> = None;
            let mut pictures = PictureStore::default();
            let mut resolver = NoPictures;
            let mut ctx = PageContext {
                resolver: &mut resolver,
                options: &self.options,
                current_background: &mut background,
                pictures: &mut pictures,
            };
            self.machine.section_start(sep, &self.changed, &mut ctx);
        }

        fn end(&mut self, sep: &SectionProperties) {
            self.machine
                .section_end(sep, &mut self.registry, &self.options)
                .unwrap();
        }

        fn section(&mut self, sep: &SectionProperties) {
            self.start(sep);
            self.end(sep);
        }
    }

    fn continuous() -> SectionProperties {
        SectionProperties {
            break_kind: BreakKind::Continuous,
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_continuous_section_is_omitted() {
        let mut h = Harness::new();
        h.section(&continuous());
        assert_eq!(h.registry.count(StyleFamily::MasterPage), 1);

        h.start(&continuous());
        assert_eq!(h.machine.decision(), MasterPageDecision::Omit);
        assert!(!h.machine.accepts_headers());
        h.end(&continuous());
        assert_eq!(h.registry.count(StyleFamily::MasterPage), 1);
        assert_eq!(h.registry.count(StyleFamily::PageLayout), 1);
    }

    #[test]
    fn test_identical_page_break_reuses_master() {
        let mut h = Harness::new();
        h.section(&SectionProperties::default());
        assert_eq!(h.machine.take_next_master_page().as_deref(), Some("Standard"));

        h.section(&SectionProperties::default());
        assert_eq!(h.machine.decision(), MasterPageDecision::Create);
        assert_eq!(h.registry.count(StyleFamily::MasterPage), 1);
        assert_eq!(h.machine.take_next_master_page().as_deref(), Some("Standard"));
    }

    #[test]
    fn test_unknown_break_is_omitted() {
        let mut h = Harness::new();
        let sep = SectionProperties {
            break_kind: BreakKind::NewColumn,
            ..Default::default()
        };
        h.section(&sep);
        h.start(&sep);
        assert_eq!(h.machine.decision(), MasterPageDecision::Omit);
        assert_eq!(h.machine.take_next_master_page().as_deref(), Some("Standard"));
        h.end(&sep);
        assert_eq!(h.registry.count(StyleFamily::MasterPage), 1);
    }

    #[test]
    fn test_changed_headers_force_new_master() {
        let mut h = Harness::new();
        h.section(&continuous());
        h.changed.insert(1);
        h.section(&continuous());
        assert_eq!(h.registry.count(StyleFamily::MasterPage), 2);
        assert!(h.registry.style(StyleFamily::MasterPage, "MP2").is_some());
    }

    #[test]
    fn test_changed_geometry_creates_master() {
        let mut h = Harness::new();
        h.section(&continuous());
        let wide = SectionProperties {
            xa_page: 15840,
            ..continuous()
        };
        h.section(&wide);
        let mp2 = h.registry.style(StyleFamily::MasterPage, "MP2").unwrap();
        assert_eq!(mp2.attribute("style:page-layout-name"), Some("Mpm2"));
    }

    #[test]
    fn test_first_page_master_chains_to_regular() {
        let mut h = Harness::new();
        h.section(&SectionProperties::default());
        let title = SectionProperties {
            title_page: true,
            xa_page: 11906,
            ..Default::default()
        };
        h.start(&title);

        let pending = h.machine.pending();
        assert_eq!(pending.len(), 2);
        let first = pending.first().unwrap();
        assert_eq!(first.master_name, "First_Page2");
        assert_eq!(first.master.attribute("style:next-style-name"), Some("MP2"));
        assert_eq!(pending.last().unwrap().master_name, "MP2");
        assert_eq!(h.machine.take_next_master_page().as_deref(), Some("First_Page2"));

        h.end(&title);
        assert!(h.registry.style(StyleFamily::MasterPage, "First_Page2").is_some());
        assert!(h.registry.style(StyleFamily::MasterPage, "MP2").is_some());
    }

    #[test]
    fn test_first_section_first_page_name() {
        let mut h = Harness::new();
        h.start(&SectionProperties {
            title_page: true,
            ..Default::default()
        });
        assert_eq!(h.machine.pending().first().unwrap().master_name, "First_Page");
        assert_eq!(h.machine.pending().last().unwrap().master_name, "Standard");
    }

    #[test]
    fn test_margins_completed_at_section_end() {
        let mut h = Harness::new();
        let sep = SectionProperties {
            dya_top: 1440,
            dya_bottom: -1080,
            dya_hdr_top: 600,
            ..Default::default()
        };
        h.start(&sep);
        h.machine.pending_mut().last_mut().unwrap().has_header = true;
        h.end(&sep);

        let layout = h.registry.style(StyleFamily::PageLayout, "Mpm1").unwrap();
        assert_eq!(layout.property(PropertyType::PageLayout, "fo:margin-top"), Some("30pt"));
        assert_eq!(layout.property(PropertyType::PageLayout, "fo:margin-bottom"), Some("54pt"));
    }

    #[test]
    fn test_border_keeps_its_margin() {
        let mut h = Harness::new();
        let sep = SectionProperties {
            brc_top: BorderCode {
                line_width: 8,
                border_type: 1,
                space: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        h.section(&sep);
        let layout = h.registry.style(StyleFamily::PageLayout, "Mpm1").unwrap();
        assert_eq!(layout.property(PropertyType::PageLayout, "fo:margin-top"), Some("67pt"));
    }

    #[test]
    fn test_inconsistent_events_recorded() {
        let mut h = Harness::new();
        h.end(&SectionProperties::default());
        h.start(&SectionProperties::default());
        h.start(&SectionProperties::default());
        assert_eq!(h.machine.inconsistencies().len(), 2);
        assert_eq!(h.machine.section_count(), 1);
    }
}
