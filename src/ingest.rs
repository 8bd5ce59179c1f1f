use anyhow::Context;

use crate::document::model::{Element, ElementBox};
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::instance::Scene;

/// Text shown to the user for any ingestion failure.
pub const INGEST_FAILURE_ALERT: &str = "Failed to process PDF file.";

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Turns PDF bytes into page rasters. Implemented by the host's PDF backend.
pub trait PdfRasterizer {
    /// Parse `bytes` and return the number of pages.
    fn open(&mut self, bytes: &[u8]) -> anyhow::Result<usize>;

    /// Render page `index` (0-based) scaled to `target_width` pixels wide,
    /// over a `background` fill.
    fn render_page(&mut self, index: usize, target_width: u32, background: [u8; 3]) -> anyhow::Result<image::RgbaImage>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IngestOptions {
    /// Pages read from the front of the file; the rest are ignored.
    pub max_pages: usize,
    pub target_width: u32,
    /// JPEG quality, `1..=100`.
    pub jpeg_quality: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_pages: 5,
            target_width: 1000,
            jpeg_quality: 85,
        }
    }
}

impl IngestOptions {
    pub fn validate(&self) -> SceneResult<()> {
        if self.max_pages == 0 {
            return Err(SceneError::validation("max_pages must be >= 1"));
        }
        if self.target_width == 0 {
            return Err(SceneError::validation("target_width must be >= 1"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SceneError::validation("jpeg_quality must be in 1..=100"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct IngestReport {
    /// Page count reported by the file.
    pub file_pages: usize,
    /// Document pages that were replaced, in order.
    pub written: Vec<usize>,
    /// Whether a fold in progress was reset afterwards.
    pub reset_scene: bool,
}

/// Clears the scene's loading flag on every exit path.
struct LoadingGuard<'a> {
    scene: &'a mut Scene,
}

impl<'a> LoadingGuard<'a> {
    fn new(scene: &'a mut Scene) -> Self {
        scene.set_loading(true);
        Self { scene }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.scene.set_loading(false);
    }
}

/// Replace the leading document pages with rasters of a PDF, one full-bleed image per page.
///
/// Pages are rendered and written strictly in order. A failure stops the import but keeps
/// the pages already written. Any failure surfaces as [`SceneError::Ingestion`] carrying
/// [`INGEST_FAILURE_ALERT`].
#[tracing::instrument(skip(scene, bytes, rasterizer), fields(len = bytes.len()))]
pub fn ingest_pdf(
    scene: &mut Scene,
    bytes: &[u8],
    rasterizer: &mut dyn PdfRasterizer,
    opts: &IngestOptions,
) -> SceneResult<IngestReport> {
    opts.validate()?;
    let guard = LoadingGuard::new(scene);
    let mut report = IngestReport::default();

    match import_pages(&mut *guard.scene, bytes, rasterizer, opts, &mut report) {
        Ok(()) => {
            if !guard.scene.phase().is_reading() {
                report.reset_scene = guard.scene.reset();
            }
            tracing::info!(
                file_pages = report.file_pages,
                written = report.written.len(),
                "pdf imported"
            );
            Ok(report)
        }
        Err(err) => {
            tracing::warn!(error = ?err, written = report.written.len(), "pdf import failed");
            Err(SceneError::ingestion(INGEST_FAILURE_ALERT))
        }
    }
}

fn import_pages(
    scene: &mut Scene,
    bytes: &[u8],
    rasterizer: &mut dyn PdfRasterizer,
    opts: &IngestOptions,
    report: &mut IngestReport,
) -> anyhow::Result<()> {
    if !bytes.starts_with(PDF_MAGIC) {
        anyhow::bail!("input is not a PDF file");
    }
    let background = scene.config().paper_rgb()?;

    report.file_pages = rasterizer.open(bytes).context("open pdf")?;
    let count = report.file_pages.min(opts.max_pages);

    for index in 0..count {
        if index >= scene.document().page_count() {
            tracing::debug!(index, "pdf page has no document page; skipped");
            continue;
        }
        let raster = rasterizer
            .render_page(index, opts.target_width, background)
            .with_context(|| format!("render pdf page {}", index + 1))?;
        let jpeg = encode_jpeg(&raster, background, opts.jpeg_quality)
            .with_context(|| format!("encode pdf page {}", index + 1))?;

        scene.document_mut().replace_page(index, vec![page_image(index, jpeg)])?;
        report.written.push(index);
        tracing::debug!(index, "pdf page written");
    }
    Ok(())
}

/// The element that stands in for a whole imported page.
pub fn page_image(index: usize, jpeg: Vec<u8>) -> Element {
    Element::embedded_image(format!("pdf-{index}"), ElementBox::full_page(), "image/jpeg", jpeg)
}

/// Flatten `raster` over `background` and encode it as JPEG.
pub fn encode_jpeg(raster: &image::RgbaImage, background: [u8; 3], quality: u8) -> anyhow::Result<Vec<u8>> {
    if raster.width() == 0 || raster.height() == 0 {
        anyhow::bail!("empty raster");
    }
    let flat = image::RgbImage::from_fn(raster.width(), raster.height(), |x, y| {
        let [r, g, b, a] = raster.get_pixel(x, y).0;
        let over = |c: u8, bg: u8| -> u8 {
            let a = u16::from(a);
            ((u16::from(c) * a + u16::from(bg) * (255 - a) + 127) / 255) as u8
        };
        image::Rgb([over(r, background[0]), over(g, background[1]), over(b, background[2])])
    });

    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&flat)
        .context("jpeg encode")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/ingest/ingest.rs"]
mod tests;
