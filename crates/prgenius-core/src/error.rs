// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for PR-Genius.

use thiserror::Error;

/// Top-level error type for all PR-Genius operations.
#[derive(Debug, Error)]
pub enum PrGeniusError {
    // -- Generation errors --
    #[error("text generation failed: {0}")]
    Generation(String),

    #[error("no API key found in environment variable {0}")]
    MissingApiKey(String),

    // -- Export errors --
    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("no usable font found (tried: {0})")]
    FontUnavailable(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("background task failed: {0}")]
    TaskFailed(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PrGeniusError>;
