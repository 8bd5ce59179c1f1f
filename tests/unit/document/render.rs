use super::*;
use crate::document::model::{Document, ElementBox};

#[test]
fn empty_page_renders_nothing() {
    let page = Page::default();
    let display = render_page(2, &page, &SceneConfig::default(), false);
    assert!(display.items.is_empty());
    assert_eq!(display.badge.map(|b| b.number), Some(3));
}

#[test]
fn items_follow_z_then_insertion_order() {
    let mut low = Element::body_text("low", ElementBox::new(0.0, 0.0, 30.0, 30.0), "a");
    low.z_index = 5;
    let mut high = Element::body_text("high", ElementBox::new(0.0, 0.0, 30.0, 30.0), "b");
    high.z_index = 1;
    let tie = Element::body_text("tie", ElementBox::new(0.0, 0.0, 30.0, 30.0), "c");
    let page = Page::new(vec![low, high, tie]);

    let display = render_page(0, &page, &SceneConfig::default(), false);
    let ids: Vec<_> = display.items.iter().map(|i| i.element_id.as_str()).collect();
    assert_eq!(ids, ["high", "tie", "low"]);
}

#[test]
fn treatments_follow_kind_and_content() {
    let doc = Document::daily_fold();
    let display = render_page(0, doc.page(0).unwrap(), &SceneConfig::default(), false);
    assert!(matches!(display.items[0].paint, Paint::Headline { .. }));
    assert!(matches!(display.items[1].paint, Paint::Image { .. }));
    assert!(matches!(display.items[2].paint, Paint::Body { .. }));
}

#[test]
fn malformed_image_url_renders_placeholder() {
    let page = Page::new(vec![Element::image_url(
        "i",
        ElementBox::new(0.0, 0.0, 100.0, 100.0),
        "ftp:/nope",
    )]);
    let display = render_page(0, &page, &SceneConfig::default(), false);
    assert_eq!(display.items[0].paint, Paint::BrokenImage);
}

#[test]
fn links_are_suppressed_in_edit_mode() {
    let page = Page::new(vec![
        Element::body_text("t", ElementBox::new(0.0, 0.0, 100.0, 100.0), "x")
            .with_link("https://example.com"),
    ]);
    let reading = render_page(0, &page, &SceneConfig::default(), false);
    assert_eq!(reading.items[0].link.as_deref(), Some("https://example.com"));
    let editing = render_page(0, &page, &SceneConfig::default(), true);
    assert!(editing.items[0].link.is_none());
}

#[test]
fn badges_alternate_sides_and_skip_back_page() {
    let page = Page::default();
    let cfg = SceneConfig::default();
    assert_eq!(render_page(0, &page, &cfg, false).badge.unwrap().side, BadgeSide::Right);
    assert_eq!(render_page(1, &page, &cfg, false).badge.unwrap().side, BadgeSide::Left);
    assert!(render_page(5, &page, &cfg, false).badge.is_none());
}
