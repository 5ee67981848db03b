// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph rasterizer — paints a laid-out page with TrueType fonts using the
// `imageproc` drawing primitives.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use prgenius_core::config::ExportConfig;
use prgenius_core::error::{PrGeniusError, Result};
use tracing::{debug, info, instrument, warn};

use super::layout::{Layout, Measure, PaintOp, Weight, layout};
use super::{CaptureOptions, Rasterizer, check_canvas};
use crate::preview::PreviewDocument;

/// Regular and bold faces.  Bold falls back to the regular face.
pub struct FontSet {
    regular: FontVec,
    bold: Option<FontVec>,
}

impl FontSet {
    /// Load the first readable font from each candidate list.
    pub fn load(regular: &[PathBuf], bold: &[PathBuf]) -> Result<Self> {
        let regular_font = first_font(regular).ok_or_else(|| {
            PrGeniusError::FontUnavailable(
                regular
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        })?;
        let bold_font = first_font(bold);
        if bold_font.is_none() {
            warn!("no bold font found, using the regular face for bold text");
        }
        Ok(Self {
            regular: regular_font,
            bold: bold_font,
        })
    }

    /// Build from in-memory font data.
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<Self> {
        let regular = FontVec::try_from_vec(regular)
            .map_err(|e| PrGeniusError::FontUnavailable(format!("invalid font data: {e}")))?;
        let bold = bold.and_then(|b| FontVec::try_from_vec(b).ok());
        Ok(Self { regular, bold })
    }

    fn face(&self, weight: Weight) -> &FontVec {
        match weight {
            Weight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            Weight::Regular => &self.regular,
        }
    }
}

impl Measure for FontSet {
    fn text_width(&self, text: &str, size_px: f32, weight: Weight) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        text_size(PxScale::from(size_px), self.face(weight), text).0 as f32
    }
}

fn first_font(candidates: &[PathBuf]) -> Option<FontVec> {
    candidates.iter().find_map(|path| read_font(path))
}

fn read_font(path: &Path) -> Option<FontVec> {
    let bytes = std::fs::read(path).ok()?;
    match FontVec::try_from_vec(bytes) {
        Ok(font) => {
            debug!(path = %path.display(), "font loaded");
            Some(font)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable font file");
            None
        }
    }
}

/// Rasterizer drawing text with system TrueType fonts.
///
/// Fonts are loaded on the first capture and kept for the life of the
/// rasterizer.  A failed load is not cached, so fixing the font path and
/// exporting again works without a restart.
pub struct GlyphRasterizer {
    regular_paths: Vec<PathBuf>,
    bold_paths: Vec<PathBuf>,
    fonts: OnceLock<FontSet>,
}

impl GlyphRasterizer {
    pub fn new(regular_paths: Vec<PathBuf>, bold_paths: Vec<PathBuf>) -> Self {
        Self {
            regular_paths,
            bold_paths,
            fonts: OnceLock::new(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.font_paths.clone(), config.bold_font_paths.clone())
    }

    fn fonts(&self) -> Result<&FontSet> {
        if let Some(fonts) = self.fonts.get() {
            return Ok(fonts);
        }
        let loaded = FontSet::load(&self.regular_paths, &self.bold_paths)?;
        Ok(self.fonts.get_or_init(|| loaded))
    }
}

impl Rasterizer for GlyphRasterizer {
    #[instrument(skip_all, fields(region = region.region_id, blocks = region.blocks.len()))]
    fn capture(&self, region: &PreviewDocument, options: &CaptureOptions) -> Result<RgbaImage> {
        let fonts = self.fonts()?;
        let scale = options.effective_scale();
        if !options.inline_remote_images {
            debug!("remote image inlining disabled; preview has no remote images");
        }

        let page = layout(region, scale, fonts);
        info!(width = page.width, height = page.height, scale, "Rasterizing preview");
        paint(&page, fonts, options.opaque_background())
    }
}

/// Execute the paint operations of a layout onto a fresh canvas.
fn paint(page: &Layout, fonts: &FontSet, background: [u8; 4]) -> Result<RgbaImage> {
    check_canvas(page.width, page.height)?;

    let mut canvas = RgbaImage::from_pixel(page.width, page.height, Rgba(background));
    for op in &page.ops {
        match op {
            PaintOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let w = width.round().max(1.0) as u32;
                let h = height.round().max(1.0) as u32;
                let rect = Rect::at(x.round() as i32, y.round() as i32).of_size(w, h);
                draw_filled_rect_mut(&mut canvas, rect, Rgba(*color));
            }
            PaintOp::Text {
                x,
                y,
                size,
                weight,
                color,
                text,
            } => {
                draw_text_mut(
                    &mut canvas,
                    Rgba(*color),
                    x.round() as i32,
                    y.round() as i32,
                    PxScale::from(*size),
                    fonts.face(*weight),
                    text,
                );
            }
        }
    }

    debug!(ops = page.ops.len(), "Paint complete");
    Ok(canvas)
}
