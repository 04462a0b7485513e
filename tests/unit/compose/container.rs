use super::*;
use crate::compose::geometry::{build_layers, capture_glyphs};
use crate::test_support::doc_with_text;
use crate::{Document, Node, Rect, SceneHost, ShimmerConfig, Size};

fn build() -> (Document, ShimmerPlan, ContainerFrame, ContainerFrame) {
    let (mut doc, text) = doc_with_text(Rect::new(10.0, 10.0, 210.0, 50.0), &[]);
    let capture = capture_glyphs(&mut doc, text).unwrap();
    let plan = ShimmerPlan::new(capture.size, &ShimmerConfig::default()).unwrap();
    let layers = build_layers(&mut doc, &capture, &plan).unwrap();
    let start = assemble_start(&mut doc, layers, capture.origin, &plan).unwrap();
    let end = clone_end(&mut doc, &start, &plan).unwrap();
    (doc, plan, start, end)
}

/// Node with identity fields cleared, for structural comparison.
fn shape(doc: &Document, id: NodeId) -> Node {
    let mut n = doc.node(id).unwrap().clone();
    n.id = NodeId(0);
    n.parent = None;
    n.children.clear();
    n
}

#[test]
fn start_frame_stacks_layers_at_local_origin() {
    let (doc, _, start, _) = build();
    let frame = doc.node(start.frame).unwrap();
    assert_eq!(frame.name, "Container");
    assert!(frame.clips_content);
    assert!(frame.fills.is_empty());
    assert_eq!(frame.position, Point::ZERO);
    assert_eq!(frame.size, Size::new(200.0, 40.0));
    assert_eq!(frame.children, start.layers().to_vec());

    assert_eq!(doc.node(start.mask).unwrap().position, Point::ZERO);
    assert_eq!(doc.node(start.backdrop).unwrap().position, Point::ZERO);
    assert_eq!(
        doc.node(start.gradient).unwrap().position,
        Point::new(-200.0, 0.0)
    );
    for layer in start.layers() {
        assert_eq!(doc.node(layer).unwrap().size, Size::new(200.0, 40.0));
    }
}

#[test]
fn end_frame_differs_only_by_gradient_x() {
    let (doc, _, start, end) = build();
    assert_ne!(start.frame, end.frame);
    assert_eq!(
        doc.node(end.gradient).unwrap().position,
        Point::new(200.0, 0.0)
    );
    assert_eq!(shape(&doc, start.frame), shape(&doc, end.frame));
    assert_eq!(shape(&doc, start.mask), shape(&doc, end.mask));
    assert_eq!(shape(&doc, start.backdrop), shape(&doc, end.backdrop));

    let mut end_gradient = shape(&doc, end.gradient);
    end_gradient.position.x = -200.0;
    assert_eq!(end_gradient, shape(&doc, start.gradient));
}

#[test]
fn end_gradient_is_found_by_handle_not_name() {
    let (mut doc, plan, start, _) = build();
    doc.set_name(start.gradient, "renamed").unwrap();
    let again = clone_end(&mut doc, &start, &plan).unwrap();
    assert_eq!(
        doc.node(again.gradient).unwrap().position,
        Point::new(200.0, 0.0)
    );
    assert_eq!(doc.node(again.gradient).unwrap().name, "renamed");
}
