//! HTTP client for the Telegram Bot API (`sendPhoto`, `sendMessage`).

use super::{split_message, DeliveryError, Messenger, TransportError, MAX_MESSAGE_CHARS};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

/// Default Bot API host.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Request timeout for a single Bot API call.
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
    chat_id: String,
    part_delay: Duration,
}

impl TelegramClient {
    /// `part_delay` is the pause between consecutive parts of a split message.
    pub fn new(token: &str, chat_id: &str, part_delay: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[TELEGRAM] Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            api_base: TELEGRAM_API_BASE.to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
            part_delay,
        }
    }

    /// Points the client at a different Bot API host (self-hosted server).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Sends one `sendMessage` call with no splitting.
    pub async fn send_message(&self, text: &str) -> Result<(), TransportError> {
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .map_err(http_error)?;

        check_status(response).await
    }
}

impl Messenger for TelegramClient {
    async fn send_image(&self, path: &Path, caption: &str) -> Result<(), DeliveryError> {
        let start = std::time::Instant::now();

        let data = tokio::fs::read(path)
            .await
            .map_err(|source| DeliveryError::ReadImage {
                path: path.to_path_buf(),
                source,
            })?;
        let size = data.len();

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "screenshot.png".to_string());

        let photo = Part::bytes(data)
            .file_name(file_name.clone())
            .mime_str("image/png")
            .map_err(http_error)?;

        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .part("photo", photo);

        let response = self
            .http
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(http_error)?;

        check_status(response).await?;

        log::info!(
            "[TELEGRAM] Image sent: {} ({} bytes) in {}ms",
            file_name,
            size,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    async fn send_text(&self, message: &str) {
        let parts = split_message(message, MAX_MESSAGE_CHARS);
        let total = parts.len();

        for (i, part) in parts.iter().enumerate() {
            match self.send_message(part).await {
                Ok(()) if total == 1 => log::info!("[TELEGRAM] Text message sent"),
                Ok(()) => log::info!("[TELEGRAM] Text part {}/{} sent", i + 1, total),
                Err(e) => log::error!("[TELEGRAM] Text part {}/{} failed: {}", i + 1, total, e),
            }

            if i + 1 < total {
                tokio::time::sleep(self.part_delay).await;
            }
        }
    }
}

/// The request URL embeds the bot token, so it is stripped before the
/// error text can reach a log line.
fn http_error(e: reqwest::Error) -> TransportError {
    TransportError::Http(e.without_url().to_string())
}

async fn check_status(response: reqwest::Response) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}
