// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// prgenius-document — Everything between the press release record and the
// exported file.
//
// Provides the preview projection (the printable document the user sees),
// German date formatting, a rasterizer that paints the preview into an image,
// and a PDF writer that cuts that image into paper-sized pages.

pub mod date;
pub mod export;
pub mod pdf;
pub mod preview;
pub mod raster;

// Re-export the primary structs so callers can use `prgenius_document::PdfWriter` etc.
pub use export::{ExportPipeline, export_filename};
pub use pdf::writer::PdfWriter;
pub use preview::{Block, PreviewDocument};
pub use raster::{CaptureOptions, GlyphRasterizer, Rasterizer};
