// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The seam between the editor and whatever produces text.

use async_trait::async_trait;
use prgenius_core::error::Result;
use prgenius_core::types::AiRequest;

/// Produces text for an AI-assist request.
///
/// Implementations fail with `PrGeniusError::Generation` (or
/// `MissingApiKey`) on any transport or service problem. Callers do not
/// distinguish between failure causes. An empty string is a valid answer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &AiRequest) -> Result<String>;
}
