mod common;

use std::io::Read;

use common::{
    ScriptedDocument, Step, assert_well_formed, header_group, page_layout_properties, section,
};
use doc2odt::odt::ConversionReport;
use doc2odt::ole::doc::parts::{
    BreakKind, HeaderFooterFlags, NoteRestart, StyleRecord, StyleSheet, FontTable,
};
use doc2odt::ole::doc::{
    AnnotationReference, CellDescriptor, HeaderKind, NoPictures, NoteReference, PictureData,
    SubDocumentRef, TableDescriptor, TableRow,
};
use doc2odt::{ConversionStatus, Error, OdtDocument, OdtOptions, convert, convert_with_report};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(doc: &mut ScriptedDocument) -> (OdtDocument, ConversionReport) {
    init();
    convert_with_report(doc, &mut NoPictures, &OdtOptions::default()).unwrap()
}

fn run_err(doc: &mut ScriptedDocument) -> Error {
    init();
    match convert(doc, &mut NoPictures, &OdtOptions::default()) {
        Ok(_) => panic!("conversion should fail"),
        Err(err) => err,
    }
}

fn two_sections(second_break: BreakKind) -> ScriptedDocument {
    let first = section(HeaderFooterFlags::empty());
    let second = doc2odt::ole::doc::parts::SectionProperties {
        break_kind: second_break,
        ..first.clone()
    };
    ScriptedDocument::new(vec![
        Step::SectionStart(first.clone()),
        Step::Paragraph(0, "one"),
        Step::SectionEnd(first),
        Step::SectionStart(second.clone()),
        Step::Paragraph(0, "two"),
        Step::SectionEnd(second),
    ])
}

#[test]
fn test_unchanged_section_reuses_master_page() {
    let (document, report) = run(&mut two_sections(BreakKind::NewPage));

    assert_eq!(report.sections, 2);
    assert_eq!(report.master_pages, 1);
    assert_eq!(document.styles_xml().matches("<style:master-page ").count(), 1);

    // Both sections start a page with the same master
    let content = document.content_xml();
    assert!(content.contains(r#"style:master-page-name="Standard""#));
    assert_eq!(content.matches(r#"<text:p text:style-name="P1">"#).count(), 2);
}

#[test]
fn test_continuous_section_omits_master_page() {
    let (document, report) = run(&mut two_sections(BreakKind::Continuous));

    assert_eq!(report.master_pages, 1);
    let content = document.content_xml();
    assert!(content.contains(r#"<text:p text:style-name="P1">one</text:p>"#));
    assert!(content.contains(r#"<text:p text:style-name="Normal">two</text:p>"#));
}

#[test]
fn test_first_page_master_chains_to_regular_master() {
    let plain = section(HeaderFooterFlags::empty());
    let titled = doc2odt::ole::doc::parts::SectionProperties {
        title_page: true,
        ..plain.clone()
    };
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(plain.clone()),
        Step::Paragraph(0, "one"),
        Step::SectionEnd(plain),
        Step::SectionStart(titled.clone()),
        Step::Paragraph(0, "two"),
        Step::SectionEnd(titled),
    ]);
    let (document, report) = run(&mut doc);

    assert_eq!(report.master_pages, 3);
    let styles = document.styles_xml();
    assert!(styles.contains(r#"<style:master-page style:name="First_Page2" style:next-style-name="MP2""#));
    assert!(styles.contains(r#"<style:master-page style:name="MP2""#));
    // the first-page master is registered before the master it leads to
    assert!(styles.find(r#"style:name="First_Page2""#) < styles.find(r#"style:name="MP2""#));
    assert!(document.content_xml().contains(r#"style:master-page-name="First_Page2""#));
}

#[test]
fn test_first_section_title_page_uses_first_page_name() {
    let titled = doc2odt::ole::doc::parts::SectionProperties {
        title_page: true,
        ..section(HeaderFooterFlags::empty())
    };
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(titled.clone()),
        Step::Paragraph(0, "title"),
        Step::SectionEnd(titled),
    ]);
    let (document, _) = run(&mut doc);

    assert!(
        document
            .styles_xml()
            .contains(r#"<style:master-page style:name="First_Page" style:next-style-name="Standard""#)
    );
    assert!(document.content_xml().contains(r#"style:master-page-name="First_Page""#));
}

#[test]
fn test_margins_depend_on_captured_headers() {
    let with_header = section(HeaderFooterFlags::HEADER_ODD);
    let without = section(HeaderFooterFlags::empty());
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(with_header.clone()),
        Step::Headers(header_group(0, HeaderFooterFlags::HEADER_ODD)),
        Step::Paragraph(0, "body"),
        Step::SectionEnd(with_header),
        Step::SectionStart(without.clone()),
        Step::Paragraph(0, "more"),
        Step::SectionEnd(without),
    ])
    .with_headers(0, vec![(HeaderKind::HeaderOdd, vec![Step::Paragraph(0, "Header")])]);
    doc.headers_changed.insert(1);

    let (document, report) = run(&mut doc);
    assert_eq!(report.master_pages, 2);

    let styles = document.styles_xml();
    let first = page_layout_properties(styles, "Mpm1");
    assert!(first.contains(r#"fo:margin-top="36pt""#), "{}", first);
    assert!(first.contains(r#"fo:margin-bottom="72pt""#), "{}", first);

    let second = page_layout_properties(styles, "Mpm2");
    assert!(second.contains(r#"fo:margin-top="72pt""#), "{}", second);
}

#[test]
fn test_even_and_odd_headers_merge_into_one_master() {
    let flags = HeaderFooterFlags::HEADER_EVEN | HeaderFooterFlags::HEADER_ODD;
    let sep = section(flags);
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::Headers(header_group(0, flags)),
        Step::Paragraph(0, "body"),
        Step::SectionEnd(sep),
    ])
    .with_headers(
        0,
        vec![
            (HeaderKind::HeaderEven, vec![Step::Paragraph(0, "even")]),
            (HeaderKind::HeaderOdd, vec![Step::Paragraph(0, "odd")]),
        ],
    );

    let (document, _) = run(&mut doc);
    assert!(document.styles_xml().contains(concat!(
        r#"<style:header><text:p text:style-name="Normal">odd</text:p></style:header>"#,
        r#"<style:header-left><text:p text:style-name="Normal">even</text:p></style:header-left>"#
    )));
}

#[test]
fn test_odd_footer_alone() {
    let flags = HeaderFooterFlags::FOOTER_ODD;
    let sep = section(flags);
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::Headers(header_group(0, flags)),
        Step::Paragraph(0, "body"),
        Step::SectionEnd(sep),
    ])
    .with_headers(0, vec![(HeaderKind::FooterOdd, vec![Step::Paragraph(0, "page")])]);

    let (document, _) = run(&mut doc);
    let styles = document.styles_xml();
    assert!(styles.contains(r#"<style:footer><text:p text:style-name="Normal">page</text:p></style:footer>"#));
    assert!(!styles.contains("style:footer-left"));
    assert!(!styles.contains("<style:header>"));

    let layout = page_layout_properties(styles, "Mpm1");
    assert!(layout.contains(r#"fo:margin-top="72pt""#), "{}", layout);
    assert!(layout.contains(r#"fo:margin-bottom="36pt""#), "{}", layout);
}

#[test]
fn test_headers_of_reused_section_are_skipped() {
    let flags = HeaderFooterFlags::HEADER_ODD;
    let sep = section(flags);
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::Headers(header_group(0, flags)),
        Step::Paragraph(0, "one"),
        Step::SectionEnd(sep.clone()),
        Step::SectionStart(sep.clone()),
        Step::Headers(header_group(1, flags)),
        Step::Paragraph(0, "two"),
        Step::SectionEnd(sep),
    ])
    .with_headers(0, vec![(HeaderKind::HeaderOdd, vec![Step::Paragraph(0, "first")])])
    .with_headers(1, vec![(HeaderKind::HeaderOdd, vec![Step::Paragraph(0, "second")])]);

    let (document, report) = run(&mut doc);
    assert_eq!(report.master_pages, 1);
    assert!(document.styles_xml().contains(">first<"));
    assert!(!document.styles_xml().contains(">second<"));
}

#[test]
fn test_even_and_odd_page_breaks_reuse_master_page() {
    for kind in [BreakKind::EvenPage, BreakKind::OddPage] {
        let (document, report) = run(&mut two_sections(kind));

        assert_eq!(report.master_pages, 1, "{:?}", kind);
        let content = document.content_xml();
        assert_eq!(content.matches(r#"style:master-page-name="Standard""#).count(), 1);
        assert_eq!(content.matches(r#"<text:p text:style-name="P1">"#).count(), 2, "{:?}", kind);
    }
}

#[test]
fn test_margins_ignore_header_footer_order() {
    let flags = HeaderFooterFlags::HEADER_ODD | HeaderFooterFlags::FOOTER_ODD;
    let sep = section(flags);
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::Headers(header_group(0, flags)),
        Step::Paragraph(0, "body"),
        Step::SectionEnd(sep),
    ])
    .with_headers(
        0,
        vec![
            (HeaderKind::FooterOdd, vec![Step::Paragraph(0, "foot")]),
            (HeaderKind::HeaderOdd, vec![Step::Paragraph(0, "head")]),
        ],
    );

    let (document, _) = run(&mut doc);
    let styles = document.styles_xml();
    let layout = page_layout_properties(styles, "Mpm1");
    assert!(layout.contains(r#"fo:margin-top="36pt""#), "{}", layout);
    assert!(layout.contains(r#"fo:margin-bottom="36pt""#), "{}", layout);
    assert!(styles.contains(">head<") && styles.contains(">foot<"));
}

#[test]
fn test_unmatched_even_header_stays_in_its_section() {
    let first = section(HeaderFooterFlags::HEADER_EVEN);
    let second = doc2odt::ole::doc::parts::SectionProperties {
        xa_page: first.xa_page + 1440,
        headers: HeaderFooterFlags::FOOTER_ODD,
        ..first.clone()
    };
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(first.clone()),
        Step::Headers(header_group(0, first.headers)),
        Step::Paragraph(0, "one"),
        Step::SectionEnd(first),
        Step::SectionStart(second.clone()),
        Step::Headers(header_group(1, second.headers)),
        Step::Paragraph(0, "two"),
        Step::SectionEnd(second),
    ])
    .with_headers(0, vec![(HeaderKind::HeaderEven, vec![Step::Paragraph(0, "EVEN-S1")])])
    .with_headers(1, vec![(HeaderKind::FooterOdd, vec![Step::Paragraph(0, "FOOT-S2")])]);

    let (document, report) = run(&mut doc);
    assert_eq!(report.master_pages, 2);
    let styles = document.styles_xml();
    assert!(!styles.contains("EVEN-S1"));
    assert!(!styles.contains("style:header-left"));
    assert!(styles.contains(
        r#"<style:footer><text:p text:style-name="Normal">FOOT-S2</text:p></style:footer></style:master-page>"#
    ));
    assert_well_formed(styles);
}

#[test]
fn test_table_opening_section_carries_master_page() {
    let plain = section(HeaderFooterFlags::empty());
    let wide = doc2odt::ole::doc::parts::SectionProperties {
        xa_page: plain.xa_page + 1440,
        ..plain.clone()
    };
    let table = TableDescriptor {
        column_widths: vec![2880],
        rows: vec![TableRow {
            index: 0,
            height: None,
        }],
    };
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(plain.clone()),
        Step::Paragraph(0, "before"),
        Step::SectionEnd(plain),
        Step::SectionStart(wide.clone()),
        Step::Table(table),
        Step::Paragraph(0, "after"),
        Step::SectionEnd(wide),
    ])
    .with_row(0, vec![(CellDescriptor::default(), vec![Step::Paragraph(0, "cell")])]);

    let (document, report) = run(&mut doc);
    assert_eq!(report.master_pages, 2);
    let content = document.content_xml();
    assert_eq!(content.matches(r#"style:master-page-name="MP2""#).count(), 1);

    let start = content.find(r#"<style:style style:name="Table1""#).unwrap();
    let table_style = &content[start..];
    let table_style = &table_style[..table_style.find('>').unwrap()];
    assert!(table_style.contains(r#"style:master-page-name="MP2""#), "{}", table_style);

    assert!(content.contains(r#"<text:p text:style-name="Normal">cell</text:p>"#));
    assert!(content.contains(r#"<text:p text:style-name="Normal">after</text:p>"#));
    assert_well_formed(content);
}

#[test]
fn test_note_inside_table_inside_note_reaches_fixed_point() {
    let sep = section(HeaderFooterFlags::empty());
    let table = TableDescriptor {
        column_widths: vec![1440, 2880],
        rows: vec![TableRow {
            index: 0,
            height: None,
        }],
    };
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::OpenParagraph(0),
        Step::Text("See"),
        Step::Note(NoteReference::footnote(0)),
        Step::CloseParagraph,
        Step::SectionEnd(sep),
    ])
    .with_body(SubDocumentRef::Footnote(0), vec![Step::Table(table)])
    .with_row(
        0,
        vec![
            (
                CellDescriptor::default(),
                vec![
                    Step::OpenParagraph(0),
                    Step::Text("cell"),
                    Step::Note(NoteReference::footnote(1)),
                    Step::CloseParagraph,
                ],
            ),
            (CellDescriptor::default(), vec![Step::Paragraph(0, "right")]),
        ],
    )
    .with_body(SubDocumentRef::Footnote(1), vec![Step::Paragraph(0, "deep")]);

    let (document, report) = run(&mut doc);
    assert_eq!(report.queue.enqueued, 2);
    assert_eq!(report.queue.executed, 2);
    assert_eq!(report.queue.executed_inline, 1);

    let content = document.content_xml();
    let outer = content.find(r#"text:id="ftn1""#).unwrap();
    let table = content.find("<table:table ").unwrap();
    let inner = content.find(r#"text:id="ftn2""#).unwrap();
    let deep = content.find("deep").unwrap();
    assert!(outer < table && table < inner && inner < deep);
    assert!(content.contains("<text:note-citation>2</text:note-citation>"));
    assert_eq!(content.matches("<table:table-column ").count(), 2);
    assert_well_formed(content);
}

#[test]
fn test_style_inheritance_and_next_style() {
    let mut doc = two_sections(BreakKind::Continuous);
    doc.sheet = StyleSheet::from_records(
        vec![
            StyleRecord::paragraph(0, "Normal"),
            StyleRecord::paragraph(1, "Heading 1").with_base(0).with_next(1),
            StyleRecord::paragraph(2, "Body Text").with_base(0).with_next(2),
            StyleRecord::paragraph(3, "Heading 2").with_base(1).with_next(2),
            StyleRecord::character(10, "Emphasis").with_base(0),
        ],
        FontTable::default(),
    );

    let (document, _) = run(&mut doc);
    let styles = document.styles_xml();
    assert!(styles.contains(concat!(
        r#"<style:style style:name="Heading_20_1" style:family="paragraph" "#,
        r#"style:display-name="Heading 1" style:parent-style-name="Normal"/>"#
    )));
    assert!(styles.contains(concat!(
        r#"<style:style style:name="Heading_20_2" style:family="paragraph" "#,
        r#"style:display-name="Heading 2" style:next-style-name="Body_20_Text" "#,
        r#"style:parent-style-name="Heading_20_1"/>"#
    )));
    // a paragraph style cannot be the parent of a text style
    assert!(styles.contains(r#"<style:style style:name="Emphasis" style:family="text"/>"#));
    assert!(styles.contains(r#"style:tab-stop-distance="36pt""#));
}

#[test]
fn test_endnotes_have_no_restart_policy() {
    let sep = section(HeaderFooterFlags::empty());
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::OpenParagraph(0),
        Step::Text("end"),
        Step::Note(NoteReference::endnote(0)),
        Step::CloseParagraph,
        Step::SectionEnd(sep),
    ])
    .with_body(SubDocumentRef::Endnote(0), vec![Step::Paragraph(0, "endnote")]);
    doc.dop.footnote_restart = NoteRestart::EachPage;
    doc.dop.endnote_format = 2;

    let (document, _) = run(&mut doc);
    let styles = document.styles_xml();
    assert!(styles.contains(concat!(
        r#"<text:notes-configuration text:note-class="footnote" style:num-format="1" "#,
        r#"text:start-value="0" text:footnotes-position="page" text:start-numbering-at="page"/>"#
    )));
    assert!(styles.contains(
        r#"<text:notes-configuration text:note-class="endnote" style:num-format="i" text:start-value="0"/>"#
    ));

    let content = document.content_xml();
    assert!(content.contains(r#"<text:note text:id="edn1" text:note-class="endnote">"#));
    assert!(content.contains("<text:note-body><text:p text:style-name=\"Normal\">endnote</text:p>"));
}

#[test]
fn test_custom_note_mark_and_annotation() {
    let sep = section(HeaderFooterFlags::empty());
    let mut annotation = AnnotationReference::new(0);
    annotation.author = Some("Reviewer".to_string());
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::OpenParagraph(0),
        Step::Text("text"),
        Step::Note(NoteReference {
            custom_mark: Some("*".to_string()),
            ..NoteReference::footnote(0)
        }),
        Step::Annotation(annotation),
        Step::CloseParagraph,
        Step::SectionEnd(sep),
    ])
    .with_body(SubDocumentRef::Footnote(0), vec![Step::Paragraph(0, "starred")])
    .with_body(SubDocumentRef::Annotation(0), vec![Step::Paragraph(0, "remark")]);

    let (document, report) = run(&mut doc);
    assert_eq!(report.queue.executed, 2);
    let content = document.content_xml();
    assert!(content.contains(r#"<text:note-citation text:label="*">*</text:note-citation>"#));
    assert!(content.contains(
        r#"<office:annotation><dc:creator>Reviewer</dc:creator><text:p text:style-name="Normal">remark</text:p></office:annotation>"#
    ));
}

#[test]
fn test_notes_in_headers_are_dropped() {
    let flags = HeaderFooterFlags::HEADER_ODD;
    let sep = section(flags);
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::Headers(header_group(0, flags)),
        Step::Paragraph(0, "body"),
        Step::SectionEnd(sep),
    ])
    .with_headers(
        0,
        vec![(
            HeaderKind::HeaderOdd,
            vec![
                Step::OpenParagraph(0),
                Step::Text("head"),
                Step::Note(NoteReference::footnote(0)),
                Step::CloseParagraph,
            ],
        )],
    );

    let (document, report) = run(&mut doc);
    assert_eq!(report.queue.enqueued, 0);
    assert!(!document.styles_xml().contains("text:note "));
}

#[test]
fn test_inline_picture_is_embedded() {
    let sep = section(HeaderFooterFlags::empty());
    let picture = PictureData {
        name: "image1.png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
        width_twips: 1440,
        height_twips: 720,
    };
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::OpenParagraph(0),
        Step::Picture(picture.clone()),
        Step::CloseParagraph,
        Step::Picture(picture),
        Step::SectionEnd(sep),
    ]);

    let (document, _) = run(&mut doc);
    assert_eq!(document.pictures().len(), 1);
    assert_eq!(document.pictures()[0].0, "Pictures/image1.png");

    let content = document.content_xml();
    assert!(content.contains(r#"svg:width="72pt" svg:height="36pt""#));
    assert!(content.contains(r#"<draw:image xlink:href="Pictures/image1.png""#));
    // the second picture sits outside a paragraph and gets one of its own
    assert_eq!(content.matches("<text:p").count(), 2);
    assert_well_formed(content);
}

#[test]
fn test_metadata_and_saved_package() {
    let sep = section(HeaderFooterFlags::empty());
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::Paragraph(0, "a < b & c"),
        Step::SectionEnd(sep),
    ]);
    doc.strings.title = Some("Quarterly Report".to_string());
    doc.strings.author = Some("Ada".to_string());

    let (document, _) = run(&mut doc);
    let meta = document.meta_xml();
    assert!(meta.contains("<dc:title>Quarterly Report</dc:title>"));
    assert!(meta.contains("<meta:initial-creator>Ada</meta:initial-creator>"));
    assert!(meta.contains("<meta:generator>doc2odt/"));

    for part in [document.content_xml(), document.styles_xml(), meta] {
        assert_well_formed(part);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.odt");
    document.save(&path).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.by_index(0).unwrap().name(), "mimetype");
    let mut content = String::new();
    archive
        .by_name("content.xml")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert!(content.contains("a &lt; b &amp; c"));
    assert!(archive.by_name("styles.xml").is_ok());
    assert!(archive.by_name("META-INF/manifest.xml").is_ok());
}

#[test]
fn test_options_from_yaml_rename_master_pages() {
    init();
    let options = OdtOptions::from_yaml_str("master_page_prefix: Page\n").unwrap();
    let mut doc = two_sections(BreakKind::NewPage);
    doc.headers_changed.insert(1);

    let (document, report) = convert_with_report(&mut doc, &mut NoPictures, &options).unwrap();
    assert_eq!(report.master_pages, 2);
    assert!(document.styles_xml().contains(r#"<style:master-page style:name="Page2""#));
}

#[test]
fn test_parser_failure_is_status_one() {
    let mut doc = ScriptedDocument::new(vec![Step::Fail("truncated piece table")]);
    let err = run_err(&mut doc);
    assert_eq!(err.status(), ConversionStatus::ParserFailed);
    assert_eq!(err.status_code(), 1);
}

#[test]
fn test_open_paragraph_is_status_two() {
    let sep = section(HeaderFooterFlags::empty());
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::OpenParagraph(0),
        Step::Text("dangling"),
        Step::SectionEnd(sep),
    ]);
    let err = run_err(&mut doc);
    assert!(matches!(err, Error::InconsistentState(_)), "{}", err);
    assert_eq!(err.status_code(), 2);
}

#[test]
fn test_unclosed_section_is_status_two() {
    let sep = section(HeaderFooterFlags::empty());
    let mut doc = ScriptedDocument::new(vec![Step::SectionStart(sep), Step::Paragraph(0, "x")]);
    assert_eq!(run_err(&mut doc).status_code(), 2);
}

#[test]
fn test_unresolvable_note_body() {
    let sep = section(HeaderFooterFlags::empty());
    let mut doc = ScriptedDocument::new(vec![
        Step::SectionStart(sep.clone()),
        Step::OpenParagraph(0),
        Step::Note(NoteReference::footnote(9)),
        Step::CloseParagraph,
        Step::SectionEnd(sep),
    ]);
    let err = run_err(&mut doc);
    assert!(matches!(err, Error::InvariantViolation(_)), "{}", err);
}
