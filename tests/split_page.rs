mod common;

use std::fs;

use lopdf::Document;
use pdfsnip::split::{SplitError, split_page};

#[test]
fn extracts_a_single_page_document() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::write_fixture(
        dir.path(),
        "three.pdf",
        &["Page one", "Page two", "Page three"],
    );
    let destination = dir.path().join("last.pdf");

    let written = split_page(&source, 2, &destination).unwrap();
    assert_eq!(written, destination);

    let doc = Document::load(&destination).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    let text = doc.extract_text(&[1]).unwrap();
    assert!(text.contains("Page three"), "unexpected text: {text:?}");
    assert!(!text.contains("Page one"));
}

#[test]
fn repeated_split_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::write_fixture(dir.path(), "two.pdf", &["alpha", "beta"]);
    let destination = dir.path().join("out.pdf");

    split_page(&source, 0, &destination).unwrap();
    split_page(&source, 1, &destination).unwrap();

    let doc = Document::load(&destination).unwrap();
    let text = doc.extract_text(&[1]).unwrap();
    assert!(text.contains("beta"), "unexpected text: {text:?}");
    assert!(!text.contains("alpha"));
}

#[test]
fn overwrites_unrelated_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::write_fixture(dir.path(), "one.pdf", &["only page"]);
    let destination = dir.path().join("taken.pdf");
    fs::write(&destination, b"not a pdf at all").unwrap();

    split_page(&source, 0, &destination).unwrap();

    let doc = Document::load(&destination).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn out_of_range_page_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::write_fixture(dir.path(), "two.pdf", &["alpha", "beta"]);
    let destination = dir.path().join("missing.pdf");

    let err = split_page(&source, 5, &destination).unwrap_err();
    assert!(matches!(
        err,
        SplitError::InvalidPage {
            page: 5,
            page_count: 2
        }
    ));
    assert!(!destination.exists());
}

#[test]
fn unreadable_source_reports_extraction_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("garbage.pdf");
    fs::write(&source, b"hello world").unwrap();
    let destination = dir.path().join("out.pdf");

    let err = split_page(&source, 0, &destination).unwrap_err();
    assert!(matches!(err, SplitError::Extraction(_)));
    assert!(!destination.exists());
}
