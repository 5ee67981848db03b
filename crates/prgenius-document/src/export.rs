// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export — capture region to PDF bytes, and the file name to save them under.

use std::sync::Arc;

use prgenius_core::PaperSize;
use prgenius_core::config::ExportConfig;
use prgenius_core::error::Result;
use tracing::{info, instrument};

use crate::pdf::PdfWriter;
use crate::preview::PreviewDocument;
use crate::raster::{CaptureOptions, GlyphRasterizer, Rasterizer};

/// File name used when the headline is empty.
pub const DEFAULT_FILENAME: &str = "Pressemitteilung.pdf";
/// Product token in front of headline-derived file names.
pub const FILENAME_PREFIX: &str = "PR-Genius_";
/// Characters of the headline that go into the file name.
const HEADLINE_CHARS: usize = 20;

/// File name for an export of a release with this headline.
///
/// Takes the first 20 characters of the headline and replaces everything
/// that is not an ASCII letter or digit with `_`.
pub fn export_filename(headline: &str) -> String {
    if headline.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }
    let stem: String = headline
        .chars()
        .take(HEADLINE_CHARS)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{FILENAME_PREFIX}{stem}.pdf")
}

/// Rasterizer plus PDF writer: everything needed to turn a preview into a
/// PDF file's bytes.
#[derive(Clone)]
pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    writer: PdfWriter,
    options: CaptureOptions,
}

impl ExportPipeline {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, writer: PdfWriter, options: CaptureOptions) -> Self {
        Self {
            rasterizer,
            writer,
            options,
        }
    }

    /// Glyph rasterizer and writer set up from the export settings.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(
            Arc::new(GlyphRasterizer::from_config(config)),
            PdfWriter::new(config.paper_size),
            CaptureOptions::with_scale(config.scale),
        )
    }

    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    /// Paper the export is laid out and paginated on.
    pub fn paper_size(&self) -> PaperSize {
        self.writer.paper_size()
    }

    /// Capture `preview` on the export paper and encode it as a PDF titled
    /// `title`.
    #[instrument(skip_all, fields(title = %title))]
    pub fn render(&self, preview: &PreviewDocument, title: &str) -> Result<Vec<u8>> {
        let region = preview.clone().on_paper(self.paper_size());
        let image = self.rasterizer.capture(&region, &self.options)?;
        let mut writer = self.writer.clone();
        writer.set_title(title);
        let bytes = writer.create_from_raster(&image, self.options.effective_scale())?;
        info!(bytes = bytes.len(), "Export rendered");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use image::{Rgba, RgbaImage};
    use crate::preview::PageGeometry;
    use prgenius_core::PressReleaseData;
    use prgenius_core::error::PrGeniusError;
    use std::sync::Mutex;

    #[test]
    fn empty_headline_uses_default_name() {
        assert_eq!(export_filename(""), "Pressemitteilung.pdf");
    }

    #[test]
    fn headline_punctuation_becomes_underscores() {
        assert_eq!(export_filename("Neues Produkt!!"), "PR-Genius_Neues_Produkt__.pdf");
    }

    #[test]
    fn only_twenty_characters_are_used() {
        let name = export_filename("Eine sehr lange Schlagzeile über nichts");
        assert_eq!(name, "PR-Genius_Eine_sehr_lange_Schl.pdf");
    }

    #[test]
    fn umlauts_are_replaced() {
        assert_eq!(export_filename("Grüße"), "PR-Genius_Gr__e.pdf");
    }

    /// Records what it was called with and returns a blank page.
    #[derive(Default)]
    struct BlankPage {
        seen: Mutex<Option<CaptureOptions>>,
        page: Mutex<Option<PageGeometry>>,
    }

    impl Rasterizer for BlankPage {
        fn capture(&self, region: &PreviewDocument, options: &CaptureOptions) -> Result<RgbaImage> {
            *self.seen.lock().unwrap() = Some(*options);
            *self.page.lock().unwrap() = Some(region.page);
            Ok(RgbaImage::from_pixel(420, 594, Rgba(options.opaque_background())))
        }
    }

    struct Broken;

    impl Rasterizer for Broken {
        fn capture(&self, _region: &PreviewDocument, _options: &CaptureOptions) -> Result<RgbaImage> {
            Err(PrGeniusError::Rasterize("no canvas".into()))
        }
    }

    fn preview() -> PreviewDocument {
        PreviewDocument::project(
            &PressReleaseData::new(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        )
    }

    #[test]
    fn pipeline_produces_pdf_with_default_capture_options() {
        let raster = Arc::new(BlankPage::default());
        let pipeline = ExportPipeline::new(raster.clone(), PdfWriter::a4(), CaptureOptions::default());
        let bytes = pipeline.render(&preview(), "Pressemitteilung").unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let seen = raster.seen.lock().unwrap().unwrap();
        assert!(seen.effective_scale() >= 2.0);
        assert_eq!(seen.opaque_background(), [255, 255, 255, 255]);
    }

    #[test]
    fn capture_uses_the_export_paper() {
        let raster = Arc::new(BlankPage::default());
        let pipeline = ExportPipeline::new(
            raster.clone(),
            PdfWriter::new(PaperSize::Letter),
            CaptureOptions::default(),
        );
        assert_eq!(pipeline.paper_size(), PaperSize::Letter);
        pipeline.render(&preview(), "Pressemitteilung").unwrap();

        let page = raster.page.lock().unwrap().unwrap();
        assert_eq!(page, PageGeometry::for_paper(PaperSize::Letter));
        assert_eq!(page.width_mm, 216.0);
    }

    #[test]
    fn rasterizer_failure_propagates() {
        let pipeline = ExportPipeline::new(Arc::new(Broken), PdfWriter::a4(), CaptureOptions::default());
        assert!(matches!(
            pipeline.render(&preview(), "x"),
            Err(PrGeniusError::Rasterize(_))
        ));
    }
}
