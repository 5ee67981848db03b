// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persistent application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub export: ExportConfig,
}

/// Settings for the text generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Base URL of the Generative Language API.
    pub endpoint: String,
    /// Model used for every request.
    pub model: String,
    /// Sampling temperature, identical for all request kinds.
    pub temperature: f32,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl GenerationConfig {
    /// Checked when `api_key_env` is unset.
    pub const FALLBACK_KEY_ENV: &'static str = "API_KEY";
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-2.5-flash".into(),
            temperature: 0.7,
            api_key_env: "GEMINI_API_KEY".into(),
        }
    }
}

/// Settings for PDF export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Paper whose width the exported page takes.
    pub paper_size: crate::PaperSize,
    /// Capture resolution relative to 96 dpi; values below 2 are raised to 2.
    pub scale: f32,
    /// Candidate TrueType fonts for regular text, first readable one wins.
    pub font_paths: Vec<PathBuf>,
    /// Candidate TrueType fonts for bold text; falls back to the regular font.
    pub bold_font_paths: Vec<PathBuf>,
    /// Save straight into this directory instead of asking with a dialog.
    pub directory: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            paper_size: crate::PaperSize::A4,
            scale: 2.0,
            font_paths: [
                "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
                "/usr/share/fonts/dejavu/DejaVuSerif.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
                "/System/Library/Fonts/Supplemental/Georgia.ttf",
                "C:\\Windows\\Fonts\\georgia.ttf",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            bold_font_paths: [
                "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Bold.ttf",
                "/usr/share/fonts/dejavu/DejaVuSerif-Bold.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSerif-Bold.ttf",
                "/System/Library/Fonts/Supplemental/Georgia Bold.ttf",
                "C:\\Windows\\Fonts\\georgiab.ttf",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "generation": { "model": "gemini-2.0-pro" } }"#).unwrap();
        assert_eq!(cfg.generation.model, "gemini-2.0-pro");
        assert_eq!(cfg.generation.temperature, 0.7);
        assert_eq!(cfg.export.scale, 2.0);
        assert!(cfg.export.directory.is_none());
    }
}
