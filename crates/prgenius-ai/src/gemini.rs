// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async client for the Gemini `generateContent` endpoint.
//
// One POST per request:
//   {endpoint}/v1beta/models/{model}:generateContent
// with the prompt as a single user turn, the PR persona as system
// instruction, and a fixed temperature.  No timeout and no retry: the caller
// waits for the service and surfaces any failure to the user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use prgenius_core::config::GenerationConfig;
use prgenius_core::error::{PrGeniusError, Result};
use prgenius_core::types::AiRequest;

use crate::generator::TextGenerator;
use crate::prompts::{SYSTEM_INSTRUCTION, build_prompt};

/// Text generator backed by the Gemini API.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    /// `None` when no key was found; every request then fails.
    api_key: Option<String>,
    /// Where the key was expected, for the error message.
    key_source: String,
}

impl GeminiClient {
    /// Create a client with an explicit key.
    pub fn new(config: &GenerationConfig, api_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("prgenius/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "custom HTTP client setup failed, using defaults");
                reqwest::Client::new()
            });

        Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            key_source: config.api_key_env.clone(),
        }
    }

    /// Create a client reading the key from the configured environment
    /// variable, falling back to `API_KEY`.
    pub fn from_env(config: &GenerationConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .or_else(|_| std::env::var(GenerationConfig::FALLBACK_KEY_ENV))
            .ok();
        if api_key.is_none() {
            info!(
                var = %config.api_key_env,
                "no API key in environment; AI-assist requests will fail"
            );
        }
        Self::new(config, api_key)
    }

    /// Whether a key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    fn request_body(&self, prompt: String) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(SYSTEM_INSTRUCTION.into()),
                }],
            },
            generation_config: GenerationSettings {
                temperature: self.temperature,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, request), fields(kind = %request.kind, model = %self.model))]
    async fn generate(&self, request: &AiRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PrGeniusError::MissingApiKey(self.key_source.clone()))?;

        let body = self.request_body(build_prompt(request));

        debug!("sending generateContent");
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "generateContent request failed");
                PrGeniusError::Generation(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(%status, detail = %detail, "generateContent rejected");
            return Err(PrGeniusError::Generation(format!(
                "service returned {status}"
            )));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "generateContent response undecodable");
            PrGeniusError::Generation(format!("invalid response: {e}"))
        })?;

        let text = payload.text();
        info!(chars = text.chars().count(), "generation complete");
        Ok(text)
    }
}

// -- Wire format ---------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationSettings,
}

#[derive(Debug, Serialize)]
struct GenerationSettings {
    temperature: f32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined.  Empty when the service
    /// returned no candidate or no text parts.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prgenius_core::types::GeneratorType;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(endpoint: &str) -> GenerationConfig {
        GenerationConfig {
            endpoint: endpoint.into(),
            ..GenerationConfig::default()
        }
    }

    /// Serve exactly one HTTP response, then hang up.  Returns the base URL
    /// and a handle resolving to the raw request that was received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(split) = text.find("\r\n\r\n") {
                    let content_length = text[..split]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= split + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Big "},{"text":"News!"}]}},
                              {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(payload.text(), "Big News!");
    }

    #[test]
    fn response_without_candidates_is_empty_text() {
        let payload: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.text(), "");
    }

    #[test]
    fn request_body_carries_persona_and_temperature() {
        let client = GeminiClient::new(&config("http://localhost"), Some("k".into()));
        let json = serde_json::to_value(client.request_body("Hallo".into())).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hallo");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], SYSTEM_INSTRUCTION);
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(&config("http://127.0.0.1:9"), Some("  ".into()));
        assert!(!client.has_api_key());
        let err = client
            .generate(&AiRequest::new(GeneratorType::Body, "Thema"))
            .await
            .unwrap_err();
        assert!(matches!(err, PrGeniusError::MissingApiKey(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_generation_error() {
        let client = GeminiClient::new(&config("http://127.0.0.1:9"), Some("key".into()));
        let err = client
            .generate(&AiRequest::new(GeneratorType::Headline, "Thema"))
            .await
            .unwrap_err();
        assert!(matches!(err, PrGeniusError::Generation(_)));
    }

    #[tokio::test]
    async fn successful_call_returns_candidate_text() {
        let (base, request) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Neuer Text"}]}}]}"#,
        )
        .await;
        let client = GeminiClient::new(&config(&base), Some("secret".into()));
        let text = client
            .generate(&AiRequest::new(GeneratorType::Body, "Produktstart"))
            .await
            .unwrap();
        assert_eq!(text, "Neuer Text");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent"));
        assert!(raw.to_ascii_lowercase().contains("x-goog-api-key: secret"));
        assert!(raw.contains("Produktstart"));
    }

    #[tokio::test]
    async fn error_status_is_a_generation_error() {
        let (base, _request) =
            serve_once("HTTP/1.1 503 Service Unavailable", r#"{"error":"busy"}"#).await;
        let client = GeminiClient::new(&config(&base), Some("secret".into()));
        let err = client
            .generate(&AiRequest::new(GeneratorType::About, "Firma"))
            .await
            .unwrap_err();
        assert!(matches!(err, PrGeniusError::Generation(_)));
    }
}
