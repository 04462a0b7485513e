use super::*;
use crate::test_support::{FAMILY, block_on, doc_with_text, text_props};
use crate::{Document, NodeKind, Rect};

fn font_of(doc: &Document, id: NodeId) -> (FontName, FontWeight) {
    match &doc.node(id).unwrap().kind {
        NodeKind::Text(p) => (p.font.clone(), p.weight),
        other => panic!("expected text, got {other:?}"),
    }
}

fn frame() -> Rect {
    Rect::new(0.0, 0.0, 120.0, 24.0)
}

#[test]
fn loads_current_font_without_auto_bold() {
    let (mut doc, text) = doc_with_text(frame(), &["Bold"]);
    let res = block_on(resolve_font(&mut doc, text, false)).unwrap();
    assert_eq!(res, FontResolution::Unchanged);
    assert!(doc.is_font_loaded(&FontName::new(FAMILY, "Regular")));
    assert_eq!(font_of(&doc, text).1, FontWeight::Resolved(400));
}

#[test]
fn escalates_to_bold_first() {
    let (mut doc, text) = doc_with_text(frame(), &["Medium", "Bold", "Black"]);
    let res = block_on(resolve_font(&mut doc, text, true)).unwrap();
    assert_eq!(
        res,
        FontResolution::Escalated {
            font: FontName::new(FAMILY, "Bold"),
            weight: 700
        }
    );
    assert_eq!(
        font_of(&doc, text),
        (FontName::new(FAMILY, "Bold"), FontWeight::Resolved(700))
    );
}

#[test]
fn prefers_black_over_medium_when_bold_is_missing() {
    let (mut doc, text) = doc_with_text(frame(), &["Black", "Medium"]);
    let res = block_on(resolve_font(&mut doc, text, true)).unwrap();
    assert_eq!(
        res,
        FontResolution::Escalated {
            font: FontName::new(FAMILY, "Black"),
            weight: 900
        }
    );
}

#[test]
fn extra_bold_spelling_variants_are_tried() {
    let (mut doc, text) = doc_with_text(frame(), &["Extra Bold"]);
    let res = block_on(resolve_font(&mut doc, text, true)).unwrap();
    assert_eq!(
        res,
        FontResolution::Escalated {
            font: FontName::new(FAMILY, "Extra Bold"),
            weight: 800
        }
    );
}

#[test]
fn missing_bolder_styles_keep_original_weight() {
    let (mut doc, text) = doc_with_text(frame(), &["Light"]);
    let res = block_on(resolve_font(&mut doc, text, true)).unwrap();
    assert_eq!(res, FontResolution::NoBolderStyle);
    assert_eq!(
        font_of(&doc, text),
        (FontName::new(FAMILY, "Regular"), FontWeight::Resolved(400))
    );
}

#[test]
fn mixed_weight_skips_auto_bold() {
    let mut doc = Document::new();
    doc.install_font(FAMILY, &["Regular", "Bold"]);
    let page = doc.current_page();
    let text = doc
        .add_text(page, "Mixed", text_props("Regular", FontWeight::Mixed), frame())
        .unwrap();
    let res = block_on(resolve_font(&mut doc, text, true)).unwrap();
    assert_eq!(res, FontResolution::SkippedMixed);
    assert_eq!(font_of(&doc, text).1, FontWeight::Mixed);
}

#[test]
fn heavy_enough_text_is_left_alone() {
    let mut doc = Document::new();
    doc.install_font(FAMILY, &["Medium", "Bold"]);
    let page = doc.current_page();
    let text = doc
        .add_text(page, "Medium", text_props("Medium", FontWeight::Resolved(500)), frame())
        .unwrap();
    let res = block_on(resolve_font(&mut doc, text, true)).unwrap();
    assert_eq!(res, FontResolution::Unchanged);
}

#[test]
fn unavailable_current_font_is_an_error() {
    let mut doc = Document::new();
    let page = doc.current_page();
    let text = doc
        .add_text(page, "Missing", text_props("Regular", FontWeight::Resolved(400)), frame())
        .unwrap();
    let err = block_on(resolve_font(&mut doc, text, false)).unwrap_err();
    assert!(matches!(err, ShimmerError::Font(_)));
}

#[test]
fn candidate_table_is_in_try_order() {
    let weights: Vec<u16> = BOLD_CANDIDATES.iter().map(|c| c.weight).collect();
    assert_eq!(weights, vec![700, 800, 900, 600, 500]);
}
