use crate::document::model::{Element, ElementContent, ElementKind, ImageSource, Page};
use crate::foundation::core::Rect;
use crate::scene::config::{FontStyle, SceneConfig};

/// Pages at or beyond this index carry no page-number badge (the back page).
const NUMBERED_PAGES: usize = 5;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Backend-agnostic draw list for one page.
pub struct PageDisplay {
    /// Page index.
    pub page_index: usize,
    /// Paper background as `#rrggbb`.
    pub paper_color: String,
    /// Element draws in paint order.
    pub items: Vec<DrawItem>,
    /// Page-number badge, when the page is numbered.
    pub badge: Option<PageBadge>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One element resolved for drawing.
pub struct DrawItem {
    pub element_id: String,
    /// Element box in page units.
    pub rect: Rect,
    pub z: i32,
    pub paint: Paint,
    /// Clickable target; only set outside edit mode.
    pub link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Render treatment chosen by element kind and content.
pub enum Paint {
    /// Large bold type.
    Headline { text: String, font: FontStyle },
    /// Justified small body type.
    Body { text: String, font: FontStyle },
    /// Cover-fit image, top aligned.
    Image { source: ImageSource },
    /// Placeholder for image content that cannot be resolved.
    BrokenImage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum BadgeSide {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PageBadge {
    pub number: usize,
    pub side: BadgeSide,
}

/// Resolve a page into its draw list.
///
/// Items are ordered by `z_index`, ties broken by insertion order. An empty page
/// produces an empty list.
pub fn render_page(page_index: usize, page: &Page, config: &SceneConfig, edit_mode: bool) -> PageDisplay {
    let mut keyed: Vec<(i32, usize, DrawItem)> = page
        .elements
        .iter()
        .enumerate()
        .map(|(order, el)| (el.z_index, order, draw_item(el, config.font_style, edit_mode)))
        .collect();
    keyed.sort_by_key(|(z, order, _)| (*z, *order));

    let badge = (page_index < NUMBERED_PAGES).then(|| PageBadge {
        number: page_index + 1,
        side: if page_index % 2 == 0 {
            BadgeSide::Right
        } else {
            BadgeSide::Left
        },
    });

    PageDisplay {
        page_index,
        paper_color: config.paper_color.clone(),
        items: keyed.into_iter().map(|(_, _, item)| item).collect(),
        badge,
    }
}

fn draw_item(el: &Element, font: FontStyle, edit_mode: bool) -> DrawItem {
    let paint = match (&el.content, el.kind()) {
        (ElementContent::Text(text), ElementKind::Headline) => Paint::Headline {
            text: text.clone(),
            font,
        },
        (ElementContent::Text(text), _) => Paint::Body {
            text: text.clone(),
            font,
        },
        (ElementContent::Image(source), _) if is_resolvable(source) => Paint::Image {
            source: source.clone(),
        },
        (ElementContent::Image(_), _) => Paint::BrokenImage,
    };

    DrawItem {
        element_id: el.id().to_string(),
        rect: el.bbox.to_rect(),
        z: el.z_index,
        paint,
        link: if edit_mode { None } else { el.link.clone() },
    }
}

fn is_resolvable(source: &ImageSource) -> bool {
    match source {
        ImageSource::Url(url) => url.starts_with("http") || url.starts_with("data:"),
        ImageSource::Embedded { bytes, .. } => !bytes.is_empty(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/render.rs"]
mod tests;
