// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — builds the text generator, export pipeline and
// download sink from the persisted configuration.
//
// Every field is Arc-wrapped or cheaply cloneable so the struct can move
// into event handlers and spawned tasks.

use std::path::Path;
use std::sync::Arc;

use prgenius_ai::{GeminiClient, TextGenerator};
use prgenius_core::AppConfig;
use prgenius_core::error::Result;
use prgenius_document::ExportPipeline;
use prgenius_editor::{DirectorySink, DownloadSink};
use tracing::{info, warn};

use super::data_dir;
use super::save_dialog::SaveDialogSink;

const CONFIG_FILE: &str = "config.json";

/// Shared application services, provided to every component via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    generator: Arc<dyn TextGenerator>,
    pipeline: ExportPipeline,
    sink: Arc<dyn DownloadSink>,
}

impl AppServices {
    /// Initialise from the config file in the data directory.  Call once at
    /// app startup.
    ///
    /// A missing config file is created with defaults so the user has one to
    /// edit.  An unreadable one is left alone and defaults are used.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = match load_config(&dir) {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = AppConfig::default();
                persist_config(&dir, &config)?;
                info!("default config written");
                config
            }
            Err(e) => {
                warn!(error = %e, "config file unreadable, using defaults");
                AppConfig::default()
            }
        };

        Ok(Self::from_config(&config))
    }

    /// Services on default settings, touching nothing on disk.
    pub fn fallback() -> Self {
        Self::from_config(&AppConfig::default())
    }

    fn from_config(config: &AppConfig) -> Self {
        let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::from_env(&config.generation));

        let sink: Arc<dyn DownloadSink> = match &config.export.directory {
            Some(dir) => {
                info!(dir = %dir.display(), "exports go straight to the configured directory");
                Arc::new(DirectorySink::new(dir.clone()))
            }
            None => Arc::new(SaveDialogSink),
        };

        info!(
            model = %config.generation.model,
            paper = ?config.export.paper_size,
            scale = config.export.scale,
            "app services initialised"
        );

        Self {
            generator,
            pipeline: ExportPipeline::from_config(&config.export),
            sink,
        }
    }

    pub fn generator(&self) -> Arc<dyn TextGenerator> {
        Arc::clone(&self.generator)
    }

    pub fn pipeline(&self) -> ExportPipeline {
        self.pipeline.clone()
    }

    pub fn sink(&self) -> Arc<dyn DownloadSink> {
        Arc::clone(&self.sink)
    }
}

// -- Config persistence -------------------------------------------------------

fn load_config(data_dir: &Path) -> Result<Option<AppConfig>> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn persisted_config_loads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.generation.model = "gemini-test".into();
        config.export.directory = Some(tmp.path().join("pdf"));
        persist_config(tmp.path(), &config).unwrap();

        let loaded = load_config(tmp.path()).unwrap().unwrap();
        assert_eq!(loaded.generation.model, "gemini-test");
        assert_eq!(loaded.export.directory, Some(tmp.path().join("pdf")));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), r#"{"export":{"scale":3.0}}"#).unwrap();

        let loaded = load_config(tmp.path()).unwrap().unwrap();
        assert_eq!(loaded.export.scale, 3.0);
        assert_eq!(loaded.generation.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn broken_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "{ nope").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }
}
