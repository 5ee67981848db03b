// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// "Save as" dialog sink — asks the user where the PDF goes.

use std::path::PathBuf;

use async_trait::async_trait;
use prgenius_core::error::Result;
use prgenius_editor::DownloadSink;
use tracing::info;

/// Opens a native save dialog pre-filled with the suggested file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveDialogSink;

#[async_trait]
impl DownloadSink for SaveDialogSink {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<Option<PathBuf>> {
        let picked = rfd::AsyncFileDialog::new()
            .set_title("PDF speichern")
            .set_file_name(filename)
            .add_filter("PDF", &["pdf"])
            .save_file()
            .await;

        let Some(handle) = picked else {
            return Ok(None);
        };
        let path = handle.path().to_path_buf();
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), "PDF saved");
        Ok(Some(path))
    }
}
