use super::*;
use crate::test_support::{FAMILY, block_on, doc_with_text, text_props};

fn frame() -> Rect {
    Rect::new(10.0, 10.0, 210.0, 50.0)
}

#[test]
fn new_document_has_one_current_page() {
    let doc = Document::new();
    assert_eq!(doc.pages().len(), 1);
    assert_eq!(doc.pages()[0], doc.current_page());
    assert_eq!(doc.node(doc.current_page()).unwrap().name, "Page 1");
    doc.validate().unwrap();
}

#[test]
fn clone_inserts_copy_after_original_with_fresh_ids() {
    let mut doc = Document::new();
    let page = doc.current_page();
    let frame_id = doc.create_frame().unwrap();
    let child = doc.create_rectangle().unwrap();
    doc.append_child(frame_id, child).unwrap();

    let map = doc.clone_subtree(frame_id).unwrap();
    let copy = map.root.unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(doc.children(page).unwrap(), vec![frame_id, copy]);
    let child_copy = map.get(child).unwrap();
    assert_ne!(child_copy, child);
    assert_eq!(doc.node(child_copy).unwrap().parent, Some(copy));
    doc.validate().unwrap();
}

#[test]
fn flatten_consumes_input_and_keeps_frame() {
    let (mut doc, text) = doc_with_text(frame(), &[]);
    let page = doc.current_page();
    let vector = doc.flatten(text).unwrap();
    assert!(!doc.contains(text));
    let v = doc.node(vector).unwrap();
    assert_eq!(v.bounds(), frame());
    assert!(matches!(v.kind, NodeKind::Vector { .. }));
    assert_eq!(doc.children(page).unwrap(), vec![vector]);
    assert!(doc.selection().is_empty());
}

#[test]
fn flatten_uses_text_outline_when_present() {
    let mut doc = Document::new();
    let page = doc.current_page();
    let mut props = text_props("Regular", FontWeight::Resolved(400));
    let mut outline = BezPath::new();
    outline.move_to((0.0, 0.0));
    outline.line_to((5.0, 8.0));
    outline.close_path();
    props.outline = Some(outline.clone());
    let text = doc.add_text(page, "T", props, frame()).unwrap();
    let vector = doc.flatten(text).unwrap();
    match &doc.node(vector).unwrap().kind {
        NodeKind::Vector { path } => assert_eq!(*path, outline),
        other => panic!("expected vector, got {other:?}"),
    }
}

#[test]
fn remove_reports_already_absent() {
    let (mut doc, text) = doc_with_text(frame(), &[]);
    assert_eq!(doc.remove(text).unwrap(), RemovalOutcome::Removed);
    assert_eq!(doc.remove(text).unwrap(), RemovalOutcome::AlreadyAbsent);
}

#[test]
fn last_page_cannot_be_removed() {
    let mut doc = Document::new();
    let page = doc.current_page();
    assert!(doc.remove(page).is_err());
}

#[test]
fn text_font_requires_loading() {
    let (mut doc, text) = doc_with_text(frame(), &["Bold"]);
    let bold = FontName::new(FAMILY, "Bold");
    assert!(matches!(
        doc.set_text_font(text, bold.clone(), 700),
        Err(ShimmerError::Font(_))
    ));
    block_on(doc.load_font(&bold)).unwrap();
    doc.set_text_font(text, bold, 700).unwrap();
}

#[test]
fn unknown_font_fails_to_load() {
    let mut doc = Document::new();
    let err = block_on(doc.load_font(&FontName::new("Nope", "Bold"))).unwrap_err();
    assert!(matches!(err, ShimmerError::Font(_)));
}

#[test]
fn combine_requires_components_and_rebases_positions() {
    let mut doc = Document::new();
    let page = doc.current_page();
    let rect = doc.create_rectangle().unwrap();
    assert!(doc.combine_as_variants(&[rect], page).is_err());

    let a = doc.create_component().unwrap();
    let b = doc.create_component().unwrap();
    doc.set_position(a, Point::new(50.0, 20.0)).unwrap();
    doc.set_position(b, Point::new(250.0, 20.0)).unwrap();
    let set = doc.combine_as_variants(&[a, b], page).unwrap();
    let s = doc.node(set).unwrap();
    assert_eq!(s.position, Point::new(50.0, 20.0));
    assert_eq!(s.size, Size::new(300.0, 100.0));
    assert_eq!(doc.node(a).unwrap().position, Point::ZERO);
    assert_eq!(doc.node(b).unwrap().position, Point::new(200.0, 0.0));
}

#[test]
fn instance_copies_component_children() {
    let mut doc = Document::new();
    let component = doc.create_component().unwrap();
    let rect = doc.create_rectangle().unwrap();
    doc.append_child(component, rect).unwrap();
    let instance = doc.create_instance(component).unwrap();
    let node = doc.node(instance).unwrap();
    assert_eq!(
        node.kind,
        NodeKind::Instance {
            main_component: component
        }
    );
    assert_eq!(node.children.len(), 1);
    assert_ne!(node.children[0], rect);
}

#[test]
fn leaf_nodes_reject_children_and_cycles_are_refused() {
    let mut doc = Document::new();
    let rect = doc.create_rectangle().unwrap();
    let frame_id = doc.create_frame().unwrap();
    assert!(doc.append_child(rect, frame_id).is_err());

    let inner = doc.create_frame().unwrap();
    doc.append_child(frame_id, inner).unwrap();
    assert!(doc.append_child(inner, frame_id).is_err());
}

#[test]
fn selection_is_per_page() {
    let (mut doc, text) = doc_with_text(frame(), &[]);
    let first = doc.current_page();
    let second = doc.add_page("Other");
    doc.set_current_page(second).unwrap();
    assert!(doc.selection().is_empty());
    assert!(doc.set_selection(&[text]).is_err());
    doc.set_current_page(first).unwrap();
    assert_eq!(doc.selection(), vec![text]);
    assert_eq!(doc.page_selection(first), vec![text]);
}

#[test]
fn zero_delay_reactions_are_rejected() {
    let mut doc = Document::new();
    let a = doc.create_component().unwrap();
    let b = doc.create_component().unwrap();
    let reaction = Reaction {
        trigger: Trigger::AfterTimeout { timeout_ms: 0 },
        actions: vec![Action::ChangeTo {
            destination: b,
            transition: None,
        }],
    };
    assert!(block_on(doc.set_reactions(a, vec![reaction])).is_err());
}

#[test]
fn json_roundtrip_preserves_structure() {
    let (doc, text) = doc_with_text(frame(), &["Bold"]);
    let s = serde_json::to_string_pretty(&doc).unwrap();
    let de: Document = serde_json::from_str(&s).unwrap();
    de.validate().unwrap();
    assert_eq!(de.node(text).unwrap().bounds(), frame());
    assert_eq!(de.selection(), vec![text]);
    assert_eq!(de.node_count(), doc.node_count());
}

/// Serialize `doc`, let `edit` corrupt the JSON, and read it back.
fn reload(doc: &Document, edit: impl FnOnce(&mut serde_json::Value)) -> Document {
    let mut v = serde_json::to_value(doc).unwrap();
    edit(&mut v);
    serde_json::from_str(&v.to_string()).unwrap()
}

fn key(id: NodeId) -> String {
    id.0.to_string()
}

#[test]
fn validate_rejects_parent_cycles() {
    let mut doc = Document::new();
    let page = doc.current_page();
    let outer = doc.create_frame().unwrap();
    let inner = doc.create_frame().unwrap();
    doc.append_child(outer, inner).unwrap();
    doc.validate().unwrap();

    let broken = reload(&doc, |v| {
        v["nodes"][key(page)]["children"] = serde_json::json!([]);
        v["nodes"][key(outer)]["parent"] = serde_json::json!(inner.0);
        v["nodes"][key(inner)]["children"] = serde_json::json!([outer.0]);
    });
    assert!(matches!(broken.validate(), Err(ShimmerError::Validation(_))));
}

#[test]
fn validate_rejects_stale_selection() {
    let (doc, _) = doc_with_text(frame(), &[]);
    let page = doc.current_page();
    let broken = reload(&doc, |v| {
        v["nodes"][key(page)]["kind"]["selection"] = serde_json::json!([999]);
    });
    assert!(matches!(broken.validate(), Err(ShimmerError::Validation(_))));
}

#[test]
fn validate_rejects_orphaned_child_links() {
    let mut doc = Document::new();
    let page = doc.current_page();
    let r = doc.create_rectangle().unwrap();
    let broken = reload(&doc, |v| {
        v["nodes"][key(page)]["children"] = serde_json::json!([]);
    });
    assert!(matches!(broken.validate(), Err(ShimmerError::Validation(_))));
    assert!(doc.contains(r));
}
