// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — wrap a captured page image into a PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use image::{DynamicImage, RgbaImage, imageops};
use prgenius_core::PaperSize;
use prgenius_core::error::{PrGeniusError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Screen resolution the capture scale is relative to.
const CSS_DPI: f32 = 96.0;

/// Rounding slack, in pixels, absorbed by the last page.
const SLIVER_PX: u32 = 2;

/// Creates paginated PDF documents from captured page images.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    /// Paper whose width the page takes.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// The paper the pages take their size from.
    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }

    /// Height in image pixels of one paper-sized page, for an image as wide
    /// as the paper.
    pub fn page_height_px(&self, image_width: u32) -> f32 {
        image_width as f32 * self.paper_size.height_mm() / self.paper_size.width_mm()
    }

    /// Row ranges `(top, height)` of the image, one per page.
    ///
    /// Every page but the last is a full paper height.  A remainder of a
    /// pixel or two from rounding does not open another page.
    pub fn page_slices(&self, image_width: u32, image_height: u32) -> Vec<(u32, u32)> {
        let page_h = self.page_height_px(image_width).round().max(1.0) as u32;
        let mut slices = Vec::new();
        let mut top = 0;
        while top < image_height {
            let rest = image_height - top;
            let height = if rest <= page_h + SLIVER_PX { rest } else { page_h };
            slices.push((top, height));
            top += height;
        }
        slices
    }

    /// Create a PDF showing `image` edge to edge across paper-sized pages.
    ///
    /// The image is scaled to the paper width and cut into paper-height
    /// slices, one per page; the last page keeps the paper height with the
    /// remaining slice at the top.  `capture_scale` is the multiple of
    /// 96 dpi the image was rendered at; it sets the image's nominal
    /// resolution.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn create_from_raster(&self, image: &RgbaImage, capture_scale: f32) -> Result<Vec<u8>> {
        let (img_width, img_height) = image.dimensions();
        if img_width == 0 || img_height == 0 {
            return Err(PrGeniusError::ImageError(format!(
                "cannot place an empty {img_width}x{img_height} image"
            )));
        }

        let title = self.title.as_deref().unwrap_or("Pressemitteilung");
        let page_w = Mm(self.paper_size.width_mm());
        let page_h_min_pt = Mm(self.paper_size.height_mm()).into_pt().0;
        let slices = self.page_slices(img_width, img_height);
        info!(paper = ?self.paper_size, title, pages = slices.len(), "Creating PDF from capture");

        // Native size at the capture resolution, then stretch to the page width.
        let dpi = CSS_DPI * capture_scale.max(1.0);
        let native_w_pt = img_width as f32 / dpi * 72.0;
        let page_w_pt = page_w.into_pt().0;
        let scale = page_w_pt / native_w_pt;
        let pt_per_px = page_w_pt / img_width as f32;

        let mut doc = PdfDocument::new(title);
        let mut pages = Vec::with_capacity(slices.len());
        for (top, height) in slices {
            // The capture background is opaque, so dropping alpha loses nothing.
            let slice = imageops::crop_imm(image, 0, top, img_width, height).to_image();
            let rgb = DynamicImage::ImageRgba8(slice).into_rgb8();
            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: img_width as usize,
                height: height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let slice_h_pt = height as f32 * pt_per_px;
            let page_h_pt = page_h_min_pt.max(slice_h_pt);
            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(page_h_pt - slice_h_pt)),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    dpi: Some(dpi),
                    rotate: None,
                },
            }];
            pages.push(PdfPage::new(page_w, Mm::from(Pt(page_h_pt)), ops));
        }
        doc.with_pages(pages);

        debug!(dpi, scale, "Image placed on pages");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }
        if output.is_empty() {
            return Err(PrGeniusError::PdfError("serialised document is empty".into()));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn white(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    /// Page heights in points, in page order.
    fn page_heights(bytes: &[u8]) -> Vec<f32> {
        let doc = lopdf::Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|id| {
                let page = doc.get_dictionary(*id).unwrap();
                let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
                media_box[3].as_float().unwrap() - media_box[1].as_float().unwrap()
            })
            .collect()
    }

    #[test]
    fn a4_capture_fits_one_page() {
        let mut writer = PdfWriter::a4();
        writer.set_title("Neues Produkt");
        let bytes = writer.create_from_raster(&white(400, 566), 2.0).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(page_heights(&bytes).len(), 1);

        // 210x297 mm at 2x rounds to 1587x2245.
        assert_eq!(writer.page_slices(1587, 2245), vec![(0, 2245)]);
    }

    #[test]
    fn tall_capture_is_split_into_paper_pages() {
        let writer = PdfWriter::a4();
        // One A4 page is 1414 px tall at this width.
        assert_eq!(
            writer.page_slices(1000, 3000),
            vec![(0, 1414), (1414, 1414), (2828, 172)]
        );

        let bytes = writer.create_from_raster(&white(1000, 3000), 2.0).unwrap();
        let heights = page_heights(&bytes);
        assert_eq!(heights.len(), 3);
        for height in heights {
            assert!((height - 841.89).abs() < 1.0, "page is {height} pt tall");
        }
    }

    #[test]
    fn very_long_capture_stays_within_pdf_page_limits() {
        // 3000 body lines at 2x.
        let slices = PdfWriter::a4().page_slices(1587, 157_099);
        assert_eq!(slices.len(), 70);
        let covered: u32 = slices.iter().map(|(_, h)| h).sum();
        assert_eq!(covered, 157_099);
        assert!(slices.iter().all(|(_, h)| *h <= 2245 + SLIVER_PX));
    }

    #[test]
    fn letter_paper_changes_the_page_shape() {
        let writer = PdfWriter::new(PaperSize::Letter);
        assert_eq!(writer.paper_size(), PaperSize::Letter);
        assert!((writer.page_height_px(216) - 279.0).abs() < 0.001);
    }

    #[test]
    fn empty_image_is_rejected() {
        let err = PdfWriter::a4().create_from_raster(&white(0, 0), 2.0).unwrap_err();
        assert!(matches!(err, PrGeniusError::ImageError(_)));
    }
}
