//! Fixed instruction sent with every screenshot batch.

/// Instruction text placed before the images in the analysis request.
///
/// Covers the three things the screenshots usually hold: code to explain
/// and improve, open questions, and MCQ/MSQ or fill-in-the-blank items
/// answered by question number.
pub const ANALYSIS_PROMPT: &str = "Analyze this screenshot. If you see code, explain it and provide improvements and provide the code as per the needs mentioned. If you see questions, answer them comprehensively. Be detailed and practical then choose the option from the MCQ or MSQ which is the most appropriate answer or else if its a fill in blanks then provide the suitable answer, at last give all the answer with their question number.";

/// Sampling temperature for analysis.
pub const ANALYSIS_TEMPERATURE: f32 = 0.7;

/// Max output tokens. Answers for a page of questions run long.
pub const ANALYSIS_MAX_OUTPUT_TOKENS: u32 = 8192;
