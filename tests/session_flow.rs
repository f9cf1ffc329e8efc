mod common;

use pdfsnip::render::{Command, ZoomMode};
use pdfsnip::{Session, SessionUpdate};

fn bitmap_page(updates: &[SessionUpdate]) -> Option<(usize, ZoomMode)> {
    updates.iter().find_map(|u| match u {
        SessionUpdate::Bitmap { page, zoom, .. } => Some((*page, *zoom)),
        _ => None,
    })
}

#[test]
fn navigation_drives_fresh_bitmaps() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_fixture(dir.path(), "doc.pdf", &["one", "two", "three"]);
    let mut session = Session::open(path).unwrap();
    assert_eq!(session.page_count(), 3);

    let updates = session.initial_view();
    assert_eq!(bitmap_page(&updates), Some((0, ZoomMode::Full)));

    let updates = session.handle(Command::NextPage);
    assert_eq!(bitmap_page(&updates), Some((1, ZoomMode::Full)));
    assert_eq!(session.current_page(), 1);

    let updates = session.handle(Command::PrevPage);
    assert_eq!(bitmap_page(&updates), Some((0, ZoomMode::Full)));

    // wraps backwards past the first page
    let updates = session.handle(Command::PrevPage);
    assert_eq!(bitmap_page(&updates), Some((2, ZoomMode::Full)));
}

#[test]
fn zoom_toggles_and_page_turn_resets_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_fixture(dir.path(), "doc.pdf", &["one", "two"]);
    let mut session = Session::open(path).unwrap();
    session.initial_view();

    let updates = session.handle(Command::Zoom(ZoomMode::TopLeft));
    assert_eq!(bitmap_page(&updates), Some((0, ZoomMode::TopLeft)));
    assert_eq!(session.zoom(), ZoomMode::TopLeft);

    let updates = session.handle(Command::NextPage);
    assert_eq!(bitmap_page(&updates), Some((1, ZoomMode::Full)));
    assert_eq!(session.zoom(), ZoomMode::Full);
}

#[test]
fn goto_current_page_only_syncs_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_fixture(dir.path(), "doc.pdf", &["one", "two"]);
    let mut session = Session::open(path).unwrap();
    session.initial_view();

    let updates = session.handle(Command::GotoPage("1".into()));
    assert!(bitmap_page(&updates).is_none());
    assert!(
        updates
            .iter()
            .any(|u| matches!(u, SessionUpdate::PageField { page: 0 }))
    );
}

#[test]
fn malformed_goto_falls_back_to_the_first_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_fixture(dir.path(), "doc.pdf", &["one", "two", "three"]);
    let mut session = Session::open(path).unwrap();
    session.initial_view();
    session.handle(Command::NextPage);

    let updates = session.handle(Command::GotoPage("wat".into()));
    assert_eq!(bitmap_page(&updates), Some((0, ZoomMode::Full)));
    assert_eq!(session.current_page(), 0);
}
