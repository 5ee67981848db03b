// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing failure notices.
//
// The user sees exactly one generic message per failure kind. Technical
// detail stays in the log; the notice only tells the user that the action
// failed and can be tried again.

use crate::error::PrGeniusError;

/// The two classes of failure the user can run into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The text generator could not produce text.
    Generation,
    /// Rendering, encoding or saving the PDF did not complete.
    Export,
}

impl NoticeKind {
    /// The single message shown for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Generation => "Fehler bei der KI-Anfrage.",
            Self::Export => "Fehler beim Erstellen der PDF.",
        }
    }
}

/// A blocking notice, shown until the user dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// Map an error to the notice the user gets for it.
pub fn notice_for(err: &PrGeniusError) -> Notice {
    let kind = match err {
        PrGeniusError::Generation(_) | PrGeniusError::MissingApiKey(_) => NoticeKind::Generation,

        PrGeniusError::Rasterize(_)
        | PrGeniusError::FontUnavailable(_)
        | PrGeniusError::ImageError(_)
        | PrGeniusError::PdfError(_)
        | PrGeniusError::TaskFailed(_)
        | PrGeniusError::Io(_)
        | PrGeniusError::Serialization(_) => NoticeKind::Export,
    };
    Notice::new(kind)
}
