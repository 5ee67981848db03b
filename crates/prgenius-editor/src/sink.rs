// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Download sinks — where a finished PDF goes.

use std::path::PathBuf;

use async_trait::async_trait;
use prgenius_core::error::Result;
use tracing::{info, instrument};

/// Receives the bytes of a finished export.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Store `bytes` under the suggested `filename`.
    ///
    /// Returns the path written, or `None` when the user declined to save.
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<Option<PathBuf>>;
}

/// Writes every export straight into one directory, overwriting files of
/// the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    #[instrument(skip(self, bytes), fields(dir = %self.dir.display(), len = bytes.len()))]
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<Option<PathBuf>> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), "PDF written");
        Ok(Some(path))
    }
}
