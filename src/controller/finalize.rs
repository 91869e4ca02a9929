//! Finalize: deliver a finished batch, then analyze and summarize it.
//!
//! Order is fixed: every image goes out (in batch order) before the analysis
//! request starts, so the user sees the raw screenshots while the model is
//! still working. Nothing in here fails the caller; each step logs its own
//! errors and the next step runs regardless.

use super::batch::Shot;
use crate::llm::{prompts::ANALYSIS_PROMPT, Analyzer};
use crate::telegram::Messenger;
use std::path::Path;
use std::time::Duration;

/// Width of the `=` rules framing the analysis body.
const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// Empty batch; no request was made.
    Skipped,
    Succeeded,
    /// The error text was sent in place of the analysis.
    Failed,
}

/// What happened during one finalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReport {
    pub shots: usize,
    /// 1-based positions delivered successfully.
    pub delivered: Vec<usize>,
    /// 1-based positions whose delivery failed.
    pub failed: Vec<usize>,
    pub analysis: AnalysisStatus,
}

impl FinalizeReport {
    fn empty() -> Self {
        Self {
            shots: 0,
            delivered: Vec::new(),
            failed: Vec::new(),
            analysis: AnalysisStatus::Skipped,
        }
    }
}

/// Runs the full finalize procedure over `shots`.
///
/// `delivery_delay` is slept after each successful image delivery only.
pub async fn finalize<M, A>(
    shots: &[Shot],
    messenger: &M,
    analyzer: &A,
    storage_root: &Path,
    delivery_delay: Duration,
) -> FinalizeReport
where
    M: Messenger,
    A: Analyzer,
{
    if shots.is_empty() {
        log::warn!("[BATCH] No screenshots to process");
        return FinalizeReport::empty();
    }

    let start = std::time::Instant::now();
    let total = shots.len();
    log::info!("[BATCH] Processing {} screenshot(s)", total);

    let mut report = FinalizeReport {
        shots: total,
        delivered: Vec::with_capacity(total),
        failed: Vec::new(),
        analysis: AnalysisStatus::Skipped,
    };

    // Step 1: images, one by one, in order
    log::info!("[BATCH] Sending {} image(s) to Telegram", total);
    for (i, shot) in shots.iter().enumerate() {
        let position = i + 1;
        let caption = image_caption(position, total, &shot.file_name());

        match messenger.send_image(shot.path(), &caption).await {
            Ok(()) => {
                report.delivered.push(position);
                tokio::time::sleep(delivery_delay).await;
            }
            Err(e) => {
                log::error!("[BATCH] Failed to send image {}/{}: {}", position, total, e);
                report.failed.push(position);
            }
        }
    }
    log::info!(
        "[BATCH] Image delivery done: {} sent, {} failed",
        report.delivered.len(),
        report.failed.len()
    );

    // Step 2: one analysis request over all raw images
    log::info!("[BATCH] Analyzing {} screenshot(s)", total);
    let images: Vec<&[u8]> = shots.iter().map(Shot::png).collect();
    let analysis = match analyzer.analyze(&images, ANALYSIS_PROMPT).await {
        Ok(text) => {
            report.analysis = AnalysisStatus::Succeeded;
            text
        }
        Err(e) => {
            log::error!("[BATCH] Analysis failed: {}", e);
            report.analysis = AnalysisStatus::Failed;
            e.to_string()
        }
    };

    // Step 3: summary through the text channel
    let analyzed_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let summary = compose_summary(total, &analyzed_at, storage_root, &analysis);
    messenger.send_text(&summary).await;

    log::info!(
        "[BATCH] Processing complete in {}ms, screenshots saved in {}",
        start.elapsed().as_millis(),
        storage_root.display()
    );
    report
}

pub fn image_caption(position: usize, total: usize, file_name: &str) -> String {
    format!("Screenshot {position}/{total} - {file_name}")
}

/// Builds the summary message sent after analysis.
pub fn compose_summary(
    shots: usize,
    analyzed_at: &str,
    storage_root: &Path,
    analysis: &str,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "🔍 AI Analysis Results:\n\
         📊 Screenshots analyzed: {shots}\n\
         🕐 Analysis time: {analyzed_at}\n\
         📁 Saved to: {}\n\n\
         {rule}\n\
         📋 DETAILED ANALYSIS:\n\
         {rule}\n\
         {analysis}",
        storage_root.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_names_position_and_file() {
        assert_eq!(
            image_caption(2, 5, "screenshot_1700000000_2.png"),
            "Screenshot 2/5 - screenshot_1700000000_2.png"
        );
    }

    #[test]
    fn summary_layout() {
        let summary = compose_summary(
            3,
            "2025-01-02 03:04:05",
            Path::new("/home/me/shots"),
            "Q1: B",
        );
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "🔍 AI Analysis Results:");
        assert_eq!(lines[1], "📊 Screenshots analyzed: 3");
        assert_eq!(lines[2], "🕐 Analysis time: 2025-01-02 03:04:05");
        assert_eq!(lines[3], "📁 Saved to: /home/me/shots");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "=".repeat(50));
        assert_eq!(lines[6], "📋 DETAILED ANALYSIS:");
        assert_eq!(lines[7], "=".repeat(50));
        assert_eq!(lines[8], "Q1: B");
        assert_eq!(lines.len(), 9);
    }
}
