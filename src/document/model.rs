use crate::foundation::core::Rect;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::rng::Rng64;

/// Smallest width/height an element box may shrink to, in page units.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Page size in unscaled page units.
pub const PAGE_WIDTH: f64 = 400.0;
/// Page size in unscaled page units.
pub const PAGE_HEIGHT: f64 = 500.0;

const ELEMENT_ID_LEN: usize = 9;
const DEFAULT_ID_SEED: u64 = 0x00DA_11F0_1D00;

const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&q=80&w=800";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// What an element is; fixed for the element's lifetime.
pub enum ElementKind {
    /// Large bold type.
    Headline,
    /// Justified body type.
    Text,
    /// Media fill.
    Image,
}

impl ElementKind {
    /// Geometry a freshly added element of this kind starts with.
    pub fn default_box(self) -> ElementBox {
        match self {
            Self::Headline => ElementBox::new(50.0, 50.0, 352.0, 70.0),
            Self::Text => ElementBox::new(50.0, 50.0, 300.0, 100.0),
            Self::Image => ElementBox::new(50.0, 50.0, 300.0, 200.0),
        }
    }

    /// Placeholder content for a freshly added element of this kind.
    pub fn placeholder_content(self) -> ElementContent {
        match self {
            Self::Headline => ElementContent::Text("New headline".to_string()),
            Self::Text => ElementContent::Text("New text block...".to_string()),
            Self::Image => ElementContent::Image(ImageSource::Url(PLACEHOLDER_IMAGE_URL.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Position and size in page-local, unscaled units.
pub struct ElementBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ElementBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Full-bleed box covering a whole page.
    pub fn full_page() -> Self {
        Self::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT)
    }

    /// Copy with width and height floored at [`MIN_ELEMENT_SIZE`].
    pub fn with_min_size(self) -> Self {
        Self {
            w: self.w.max(MIN_ELEMENT_SIZE),
            h: self.h.max(MIN_ELEMENT_SIZE),
            ..self
        }
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
/// Where an image element's pixels come from.
pub enum ImageSource {
    /// Remote or data URL, resolved by the host at render time.
    Url(String),
    /// Encoded raster produced by ingestion.
    Embedded {
        /// MIME type of `bytes`, e.g. `image/jpeg`.
        mime: String,
        /// Encoded image bytes.
        bytes: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
/// Element payload.
pub enum ElementContent {
    /// Plain text for headline and text elements.
    Text(String),
    /// Image reference for image elements.
    Image(ImageSource),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A positioned block on a page.
pub struct Element {
    id: String,
    kind: ElementKind,
    /// Position and size.
    #[serde(rename = "box")]
    pub bbox: ElementBox,
    /// Text or image payload.
    pub content: ElementContent,
    /// Outbound URL; makes the element a hyperlink region outside edit mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Paint order among siblings.
    pub z_index: i32,
}

impl Element {
    /// Kind and content must agree; the public constructors below guarantee it.
    pub(crate) fn new(
        id: impl Into<String>,
        kind: ElementKind,
        bbox: ElementBox,
        content: ElementContent,
        z_index: i32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            bbox,
            content,
            link: None,
            z_index,
        }
    }

    pub fn headline(id: impl Into<String>, bbox: ElementBox, text: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Headline, bbox, ElementContent::Text(text.into()), 1)
    }

    /// Justified body text block.
    pub fn body_text(id: impl Into<String>, bbox: ElementBox, text: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Text, bbox, ElementContent::Text(text.into()), 1)
    }

    /// Convenience for URL-backed image elements.
    pub fn image_url(id: impl Into<String>, bbox: ElementBox, url: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementKind::Image,
            bbox,
            ElementContent::Image(ImageSource::Url(url.into())),
            1,
        )
    }

    /// Image element carrying its own encoded raster.
    pub fn embedded_image(
        id: impl Into<String>,
        bbox: ElementBox,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self::new(
            id,
            ElementKind::Image,
            bbox,
            ElementContent::Image(ImageSource::Embedded {
                mime: mime.into(),
                bytes,
            }),
            1,
        )
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Text payload for headline/text, an image for image.
    pub fn is_consistent(&self) -> bool {
        matches!(
            (self.kind, &self.content),
            (ElementKind::Headline | ElementKind::Text, ElementContent::Text(_))
                | (ElementKind::Image, ElementContent::Image(_))
        )
    }

    fn apply(&mut self, patch: &ElementPatch) {
        if let Some(x) = patch.x {
            self.bbox.x = x;
        }
        if let Some(y) = patch.y {
            self.bbox.y = y;
        }
        if let Some(w) = patch.w {
            self.bbox.w = w;
        }
        if let Some(h) = patch.h {
            self.bbox.h = h;
        }
        self.bbox = self.bbox.with_min_size();
        if let Some(content) = &patch.content {
            self.content = match self.kind {
                ElementKind::Image => ElementContent::Image(ImageSource::Url(content.clone())),
                ElementKind::Headline | ElementKind::Text => ElementContent::Text(content.clone()),
            };
        }
        if let Some(link) = &patch.link {
            self.link = link.clone().filter(|l| !l.trim().is_empty());
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Partial update merged into an element by [`Document::update_element`].
///
/// `content` is interpreted through the element's kind: text for headline/text
/// elements, a URL for image elements.
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub content: Option<String>,
    /// `Some(None)` clears the link.
    pub link: Option<Option<String>>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(w: f64, h: f64) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn link(link: Option<String>) -> Self {
        Self {
            link: Some(link),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One physical page; element order is insertion order.
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Ids are non-empty and unique within the page; every payload matches its kind.
    pub fn validate(&self) -> SceneResult<()> {
        let mut seen = std::collections::HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if element.id.is_empty() {
                return Err(SceneError::validation("element id must be non-empty"));
            }
            if !seen.insert(element.id.as_str()) {
                return Err(SceneError::validation(format!(
                    "duplicate element id '{}'",
                    element.id
                )));
            }
            if !element.is_consistent() {
                return Err(SceneError::validation(format!(
                    "element '{}' content does not match kind '{}'",
                    element.id,
                    element.kind.label()
                )));
            }
        }
        Ok(())
    }

    /// Z-index the next added element receives.
    pub fn next_z_index(&self) -> i32 {
        self.elements
            .iter()
            .map(|e| e.z_index)
            .max()
            .map_or(1, |z| z.saturating_add(1))
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Ordered, fixed-length sequence of pages.
pub struct Document {
    pages: Vec<Page>,
    #[serde(skip, default = "default_id_rng")]
    id_rng: Rng64,
}

fn default_id_rng() -> Rng64 {
    Rng64::new(DEFAULT_ID_SEED)
}

impl Document {
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            id_rng: default_id_rng(),
        }
    }

    /// `count` blank pages.
    pub fn blank(count: usize) -> Self {
        Self::from_pages(vec![Page::default(); count])
    }

    /// Reseed element id generation.
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_rng = Rng64::new(seed);
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    fn page_mut(&mut self, index: usize) -> SceneResult<&mut Page> {
        let count = self.pages.len();
        self.pages.get_mut(index).ok_or_else(|| {
            SceneError::validation(format!("page index {index} out of range (0..{count})"))
        })
    }

    /// Append a new element with default geometry and placeholder content.
    pub fn add_element(&mut self, page_index: usize, kind: ElementKind) -> SceneResult<&Element> {
        let count = self.pages.len();
        let Some(page) = self.pages.get(page_index) else {
            return Err(SceneError::validation(format!(
                "page index {page_index} out of range (0..{count})"
            )));
        };
        let id = loop {
            let candidate = self.id_rng.next_base36(ELEMENT_ID_LEN);
            if page.element(&candidate).is_none() {
                break candidate;
            }
        };
        let element = Element::new(
            id,
            kind,
            kind.default_box(),
            kind.placeholder_content(),
            page.next_z_index(),
        );
        tracing::debug!(page_index, id = element.id(), kind = kind.label(), "add element");

        let page = self.page_mut(page_index)?;
        page.elements.push(element);
        let added = page.elements.len() - 1;
        Ok(&page.elements[added])
    }

    /// Merge `patch` into the element `element_id`. Returns `false` if nothing matched.
    pub fn update_element(&mut self, page_index: usize, element_id: &str, patch: &ElementPatch) -> bool {
        let Some(page) = self.pages.get_mut(page_index) else {
            return false;
        };
        match page.elements.iter_mut().find(|e| e.id == element_id) {
            Some(element) => {
                element.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Remove an element. Removing an absent element is a no-op that returns `false`.
    pub fn delete_element(&mut self, page_index: usize, element_id: &str) -> bool {
        let Some(page) = self.pages.get_mut(page_index) else {
            return false;
        };
        let before = page.elements.len();
        page.elements.retain(|e| e.id != element_id);
        let removed = page.elements.len() != before;
        if removed {
            tracing::debug!(page_index, id = element_id, "delete element");
        }
        removed
    }

    /// Replace the whole element list of one page.
    pub fn replace_page(&mut self, page_index: usize, elements: Vec<Element>) -> SceneResult<()> {
        let replacement = Page::new(elements);
        replacement
            .validate()
            .map_err(|e| SceneError::validation(format!("page {page_index}: {e}")))?;
        *self.page_mut(page_index)? = replacement;
        Ok(())
    }

    /// Check every page. Run after deserializing or assembling pages by hand.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, page) in self.pages.iter().enumerate() {
            page.validate()
                .map_err(|e| SceneError::validation(format!("page {index}: {e}")))?;
        }
        Ok(())
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let doc: Self = serde_json::from_str(json).map_err(|e| SceneError::serde(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// The six-page demo issue: cover, four interior pages, back page.
    pub fn daily_fold() -> Self {
        let body = |y: f64, h: f64| ElementBox::new(24.0, y, 352.0, h);
        let page = |img_id: &str, img_y_h: (f64, f64), url: &str, txt_id: &str, txt: (f64, f64), text: &str| {
            Page::new(vec![
                Element::image_url(img_id, body(img_y_h.0, img_y_h.1), url),
                Element::body_text(txt_id, body(txt.0, txt.1), text),
            ])
        };

        Self::from_pages(vec![
            Page::new(vec![
                Element::headline("h1", body(120.0, 70.0), "BEYOND THE GRID"),
                Element::image_url(
                    "i1",
                    body(200.0, 180.0),
                    "https://images.unsplash.com/photo-1523275335684-37898b6baf30?auto=format&fit=crop&q=80&w=800",
                ),
                Element::body_text(
                    "t1",
                    body(390.0, 80.0),
                    "Revolutionizing digital storefronts. The 'Daily Code' format replaces infinite scrolls with tactile, editorial storytelling perfect for premium product showcases.",
                ),
            ]),
            page(
                "i2",
                (60.0, 220.0),
                "https://images.unsplash.com/photo-1556742049-0cfed4f7a07d?auto=format&fit=crop&q=80&w=800",
                "t2",
                (290.0, 180.0),
                "Emotional Commerce: Transform the mundane 'Checkout' click into a memorable event. Fold your receipt into a plane and launch it to fulfillment.",
            ),
            page(
                "i3",
                (60.0, 180.0),
                "https://images.unsplash.com/photo-1512428559087-560fa0db7986?auto=format&fit=crop&q=80&w=800",
                "t3",
                (250.0, 220.0),
                "Mobile Real Estate: Interactive folds allow dense information to live in compact spaces. Reveal specs, reviews, and stories with a gesture.",
            ),
            page(
                "i4",
                (60.0, 180.0),
                "https://images.unsplash.com/photo-1451187580459-43490279c0fa?auto=format&fit=crop&q=80&w=800",
                "t4",
                (250.0, 220.0),
                "Can an element be both visible and hidden? Schrödinger's Div explains all.",
            ),
            page(
                "i5",
                (60.0, 180.0),
                "https://images.unsplash.com/photo-1502472584811-0a2f2ca84465?auto=format&fit=crop&q=80&w=800",
                "t5",
                (250.0, 220.0),
                "Exploring the hidden corners of the digital world.",
            ),
            Page::new(vec![Element::body_text(
                "end",
                ElementBox::new(50.0, 200.0, 300.0, 100.0),
                "Safe Landing",
            )]),
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
