//! Google Gemini `generateContent` client for the styling pipeline.
//!
//! Two call shapes: structured text generation (JSON mime type plus a
//! response schema) for the plan stage, and image generation (aspect-ratio
//! config, inline payload in the response) for the visual stage.
//!
//! Auth: explicit key from config, else `GEMINI_API_KEY`, else
//! `GOOGLE_API_KEY`.

use crate::look::LookImage;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

mod types;
use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MAX_OUTPUT_TOKENS: u32 = 8192;
const JPEG_MIME: &str = "image/jpeg";

pub struct GeminiClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Cut API error bodies down to a safe, loggable size and redact any
/// `key=...` tokens the API may have echoed back from the request URL.
pub(crate) fn sanitize_api_error(text: &str) -> String {
    const MAX_API_ERROR_CHARS: usize = 200;

    let mut scrubbed = text.to_string();
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find("key=") {
        let start = search_from + rel;
        let content_start = start + "key=".len();
        let end = scrubbed[content_start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
            .map_or(scrubbed.len(), |i| content_start + i);
        if end == content_start {
            search_from = content_start;
            continue;
        }
        scrubbed.replace_range(start..end, "key=[REDACTED]");
        search_from = start + "key=[REDACTED]".len();
    }

    if scrubbed.chars().count() > MAX_API_ERROR_CHARS {
        let truncated: String = scrubbed.chars().take(MAX_API_ERROR_CHARS).collect();
        format!("{truncated}…")
    } else {
        scrubbed
    }
}

impl GeminiClient {
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Self {
        let resolved_key = api_key
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: build_client(timeout_secs),
        }
    }

    /// Point the client at a different endpoint (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found. Options:\n\
                 1. Set GEMINI_API_KEY env var\n\
                 2. Add api_key under [gemini] in config.toml\n\
                 3. Get an API key from https://aistudio.google.com/app/apikey"
            )
        })
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    async fn call_api(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        let api_key = self.api_key()?;
        let model_name = Self::model_name(model);
        let url = format!(
            "{}/{model_name}:generateContent?key={api_key}",
            self.base_url
        );

        let response = self.client.post(url).json(request).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Gemini API error ({status}): {}",
                sanitize_api_error(&error_text)
            );
        }

        let result: GenerateContentResponse = response.json().await?;
        if let Some(err) = result.error.as_ref() {
            anyhow::bail!("Gemini API error: {}", sanitize_api_error(&err.message));
        }

        Ok(result)
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        let text = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .map(|candidate| {
                let mut out = String::new();
                for part in &candidate.content.parts {
                    if let Some(t) = &part.text {
                        if !out.is_empty() {
                            out.push('\n');
                        }
                        out.push_str(t);
                    }
                }
                out
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("No response from Gemini");
        }

        Ok(text)
    }

    /// One text-generation call constrained to a JSON response matching
    /// `schema`. Returns the raw JSON text of the first candidate.
    pub async fn generate_structured(
        &self,
        model: &str,
        system_instruction: &str,
        user_content: &str,
        schema: Value,
        temperature: f64,
    ) -> anyhow::Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: user_content.to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                image_config: None,
            },
        };

        let result = self.call_api(model, &request).await?;
        Self::extract_text(&result)
    }

    /// One image-generation call. Scans the response for the first inline
    /// binary payload; `Ok(None)` when the model returned no image at all.
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        aspect_ratio: &str,
        temperature: f64,
    ) -> anyhow::Result<Option<LookImage>> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: None,
                response_schema: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.to_string(),
                }),
            },
        };

        let result = self.call_api(model, &request).await?;

        let image = result
            .candidates
            .iter()
            .flatten()
            .flat_map(|candidate| candidate.content.parts.iter())
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| LookImage {
                mime_type: inline
                    .mime_type
                    .clone()
                    .unwrap_or_else(|| JPEG_MIME.to_string()),
                data: inline.data.clone(),
            });

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_name_prefixes_bare_models() {
        assert_eq!(
            GeminiClient::model_name("gemini-2.5-flash"),
            "models/gemini-2.5-flash"
        );
        assert_eq!(
            GeminiClient::model_name("models/gemini-2.5-flash"),
            "models/gemini-2.5-flash"
        );
    }

    #[test]
    fn sanitize_redacts_key_tokens() {
        let text = "request to /v1beta/models/x:generateContent?key=AIzaSyFakeKey123 failed";
        let cleaned = sanitize_api_error(text);
        assert!(cleaned.contains("key=[REDACTED]"));
        assert!(!cleaned.contains("AIzaSyFakeKey123"));
    }

    #[test]
    fn sanitize_truncates_long_bodies() {
        let text = "x".repeat(500);
        let cleaned = sanitize_api_error(&text);
        assert!(cleaned.chars().count() <= 201);
        assert!(cleaned.ends_with('…'));
    }

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let client = GeminiClient::new(Some("k"), 30).with_base_url("http://127.0.0.1:9/v1beta/");
        assert_eq!(client.base_url, "http://127.0.0.1:9/v1beta");
    }

    #[test]
    fn structured_request_serializes_generation_config() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: "hi".into() }],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 64,
                response_mime_type: Some("application/json".into()),
                response_schema: Some(serde_json::json!({"type": "OBJECT"})),
                image_config: None,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(json["generationConfig"].get("imageConfig").is_none());
    }

    #[test]
    fn image_response_parses_inline_data() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "here is your look"},
                        {"inlineData": {"mimeType": "image/png", "data": "aW1n"}}
                    ]
                }
            }]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let inline = parsed.candidates.unwrap()[0].content.parts[1]
            .inline_data
            .as_ref()
            .map(|d| d.data.clone());
        assert_eq!(inline.as_deref(), Some("aW1n"));
    }
}
