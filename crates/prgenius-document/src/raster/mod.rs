// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — paint a preview document into an image.

pub mod glyph;
pub mod layout;

use image::RgbaImage;
use prgenius_core::error::{PrGeniusError, Result};

use crate::preview::PreviewDocument;

pub use glyph::GlyphRasterizer;

/// Lowest capture scale; anything below is raised to this.
pub const MIN_SCALE: f32 = 2.0;

/// Highest capture scale; anything above is lowered to this.
pub const MAX_SCALE: f32 = 4.0;

/// Largest canvas a capture may allocate, in pixels (256 MiB of RGBA).
pub const MAX_CAPTURE_PIXELS: u64 = 64 * 1024 * 1024;

/// How a capture is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Multiple of the 96 dpi screen resolution.
    pub scale: f32,
    /// Page background, RGBA.
    pub background: [u8; 4],
    /// Embed remote images instead of skipping them. The preview has none
    /// today.
    pub inline_remote_images: bool,
}

impl CaptureOptions {
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// `scale`, clamped to [`MIN_SCALE`]..=[`MAX_SCALE`].
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() {
            self.scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            MIN_SCALE
        }
    }

    /// Background with the alpha channel forced opaque.
    pub fn opaque_background(&self) -> [u8; 4] {
        let [r, g, b, _] = self.background;
        [r, g, b, 255]
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            background: [255, 255, 255, 255],
            inline_remote_images: true,
        }
    }
}

/// Refuse canvases that are empty or larger than [`MAX_CAPTURE_PIXELS`].
///
/// Called before the canvas is allocated.
pub fn check_canvas(width: u32, height: u32) -> Result<()> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels == 0 {
        return Err(PrGeniusError::Rasterize(format!("empty page {width}x{height}")));
    }
    if pixels > MAX_CAPTURE_PIXELS {
        return Err(PrGeniusError::Rasterize(format!(
            "page {width}x{height} exceeds the limit of {MAX_CAPTURE_PIXELS} pixels"
        )));
    }
    Ok(())
}

/// Turns the capture region into pixels.
pub trait Rasterizer: Send + Sync {
    fn capture(&self, region: &PreviewDocument, options: &CaptureOptions) -> Result<RgbaImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_never_drops_below_two() {
        assert_eq!(CaptureOptions::with_scale(1.0).effective_scale(), 2.0);
        assert_eq!(CaptureOptions::with_scale(3.0).effective_scale(), 3.0);
        assert_eq!(CaptureOptions::with_scale(f32::NAN).effective_scale(), 2.0);
    }

    #[test]
    fn scale_is_capped() {
        assert_eq!(CaptureOptions::with_scale(10.0).effective_scale(), MAX_SCALE);
        assert_eq!(CaptureOptions::with_scale(f32::INFINITY).effective_scale(), MIN_SCALE);
    }

    #[test]
    fn oversized_canvas_is_refused() {
        assert!(check_canvas(1587, 2245).is_ok());
        assert!(matches!(check_canvas(0, 2245), Err(PrGeniusError::Rasterize(_))));
        // 3000 body lines at 2x.
        assert!(matches!(check_canvas(1587, 157_099), Err(PrGeniusError::Rasterize(_))));
        assert!(matches!(check_canvas(u32::MAX, u32::MAX), Err(PrGeniusError::Rasterize(_))));
    }

    #[test]
    fn background_is_always_opaque() {
        let options = CaptureOptions {
            background: [255, 255, 255, 0],
            ..CaptureOptions::default()
        };
        assert_eq!(options.opaque_background(), [255, 255, 255, 255]);
    }
}
