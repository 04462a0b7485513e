use super::*;
use crate::test_support::doc_with_text;
use crate::{Document, Rect, SceneHost};

#[test]
fn page_resolution_is_idempotent_by_name() {
    let mut doc = Document::new();
    let first = resolve_target_page(&mut doc, "Shimmer Components").unwrap();
    assert!(first.created);
    let second = resolve_target_page(&mut doc, "Shimmer Components").unwrap();
    assert!(!second.created);
    assert_eq!(first.page, second.page);
    assert_eq!(doc.pages_named("Shimmer Components").len(), 1);
    assert_eq!(doc.pages().len(), 2);
}

#[test]
fn page_lookup_is_case_sensitive() {
    let mut doc = Document::new();
    doc.add_page("shimmer components");
    let res = resolve_target_page(&mut doc, "Shimmer Components").unwrap();
    assert!(res.created);
}

#[test]
fn right_edge_slot_follows_rightmost_content() {
    let mut doc = Document::new();
    let page = doc.current_page();
    assert_eq!(
        right_edge_slot(&doc, page, NodeId(u32::MAX), 100.0).unwrap(),
        Point::ZERO
    );

    doc.add_rectangle(page, "a", Rect::new(0.0, 50.0, 300.0, 80.0))
        .unwrap();
    let b = doc
        .add_rectangle(page, "b", Rect::new(100.0, 10.0, 250.0, 20.0))
        .unwrap();
    assert_eq!(
        right_edge_slot(&doc, page, b, 100.0).unwrap(),
        Point::new(400.0, 50.0)
    );
}

#[test]
fn removing_twice_is_not_an_error() {
    let mut doc = Document::new();
    let page = doc.current_page();
    let r = doc
        .add_rectangle(page, "tmp", Rect::new(0.0, 0.0, 1.0, 1.0))
        .unwrap();
    assert_eq!(
        remove_transient(&mut doc, r, "tmp").unwrap(),
        RemovalOutcome::Removed
    );
    assert_eq!(
        remove_transient(&mut doc, r, "tmp").unwrap(),
        RemovalOutcome::AlreadyAbsent
    );
}

#[test]
fn source_capture_records_parent_index_and_page_bounds() {
    let mut doc = Document::new();
    doc.install_font("Inter", &["Regular"]);
    let page = doc.current_page();
    let card = doc.create_frame().unwrap();
    doc.set_position(card, Point::new(100.0, 200.0)).unwrap();
    doc.add_rectangle(card, "bg", Rect::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let text = doc
        .add_text(
            card,
            "Label",
            crate::test_support::text_props("Regular", crate::FontWeight::Resolved(400)),
            Rect::new(5.0, 6.0, 55.0, 26.0),
        )
        .unwrap();
    let src = SourceText::capture(&doc, text).unwrap();
    assert_eq!(src.parent, card);
    assert_eq!(src.index, 1);
    assert_eq!(src.bounds, Rect::new(5.0, 6.0, 55.0, 26.0));
    assert_eq!(src.page_bounds, Rect::new(105.0, 206.0, 155.0, 226.0));
    assert_ne!(page, card);
}

#[test]
fn source_capture_rejects_non_text() {
    let (mut doc, _) = doc_with_text(Rect::new(0.0, 0.0, 10.0, 10.0), &[]);
    let page = doc.current_page();
    let r = doc.add_rectangle(page, "r", Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
    let err = SourceText::capture(&doc, r).unwrap_err();
    assert!(matches!(err, ShimmerError::Selection(_)));
}
