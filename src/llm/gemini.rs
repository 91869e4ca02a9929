//! Google Gemini `generateContent` client for screenshot analysis.
//!
//! All images of a batch go into a single user turn, after the instruction
//! text, as inline base64 PNG data.

use super::prompts::{ANALYSIS_MAX_OUTPUT_TOKENS, ANALYSIS_TEMPERATURE};
use super::{AnalysisError, Analyzer};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API base URL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for screenshot analysis
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Several full-screen PNGs plus a long answer can take a while.
const REQUEST_TIMEOUT_SECS: u64 = 300;

// =============================================================================
// API Request/Response Structures
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[GEMINI] Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            api_base: GEMINI_API_BASE.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

impl Analyzer for GeminiClient {
    async fn analyze(&self, images: &[&[u8]], prompt: &str) -> Result<String, AnalysisError> {
        let start = std::time::Instant::now();
        let request = build_request(images, prompt);

        log::info!(
            "[GEMINI] Model: {}, {} image(s), {} bytes total",
            self.model,
            images.len(),
            images.iter().map(|i| i.len()).sum::<usize>()
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Http(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[GEMINI] API returned {}: {}", status, body);
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(e.without_url().to_string()))?;

        let text = reply_text(body).ok_or(AnalysisError::Empty)?;

        log::info!(
            "[GEMINI] Analysis received: {} chars in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}

fn build_request(images: &[&[u8]], prompt: &str) -> GeminiRequest {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(Part::Text {
        text: prompt.to_string(),
    });
    parts.extend(images.iter().map(|png| Part::InlineData {
        inline_data: InlineData {
            mime_type: "image/png",
            data: BASE64.encode(png),
        },
    }));

    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            temperature: ANALYSIS_TEMPERATURE,
            max_output_tokens: ANALYSIS_MAX_OUTPUT_TOKENS,
        },
    }
}

/// Text of the first part of the first candidate.
fn reply_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}
