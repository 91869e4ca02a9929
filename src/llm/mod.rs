//! Analysis collaborator: a multimodal LLM over a batch of screenshots.

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

/// Turns a set of PNG images plus an instruction into text.
#[allow(async_fn_in_trait)]
pub trait Analyzer {
    /// One blocking request for the whole batch.
    async fn analyze(&self, images: &[&[u8]], prompt: &str) -> Result<String, AnalysisError>;
}

/// Why an analysis produced no text.
///
/// The `Display` output is user-facing: it replaces the analysis body in the
/// summary message when the request fails.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("❌ Gemini analysis error: {0}")]
    Http(String),

    #[error("❌ Gemini API Error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("❌ Gemini analysis error: unexpected response: {0}")]
    Malformed(String),

    #[error("❌ Gemini analysis error: response contained no text")]
    Empty,
}
