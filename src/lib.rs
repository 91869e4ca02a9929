//! Screenshot agent — hotkey-driven screenshot batches.
//!
//! This is the app shell that wires together:
//! - Configuration (config.rs)
//! - Screen capture and local storage (capture/)
//! - Keyboard triggers (trigger/)
//! - Telegram delivery (telegram/) and Gemini analysis (llm/)
//! - The capture-batch controller (controller/) and its polling loop (event_loop.rs)

pub mod capture;
pub mod config;
pub mod controller;
pub mod event_loop;
pub mod llm;
pub mod telegram;
pub mod trigger;

use capture::{PrimaryMonitor, ShotStore};
use config::{AgentConfig, ConfigError};
use controller::Controller;
use llm::GeminiClient;
use std::path::PathBuf;
use telegram::TelegramClient;
use trigger::KeyboardTrigger;

/// Startup failures. Nothing after startup is fatal.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot create screenshot folder {path}: {source}")]
    StorageRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read keyboard state (no display, or accessibility permission missing)")]
    Trigger,

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Entry point, called by the binary.
pub fn run() -> Result<(), AgentError> {
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match dotenv {
        Ok(path) => log::info!("[CONFIG] Loaded {}", path.display()),
        Err(e) => log::debug!("[CONFIG] No .env loaded: {}", e),
    }

    let config = AgentConfig::from_env()?;

    let store = ShotStore::create(&config.screenshot_folder).map_err(|source| {
        AgentError::StorageRoot {
            path: config.screenshot_folder.clone(),
            source,
        }
    })?;

    let trigger = KeyboardTrigger::new(config.toggle_key, config.capture_key)
        .ok_or(AgentError::Trigger)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AgentError::Runtime)?;

    log_banner(&config);

    let messenger = TelegramClient::new(
        &config.telegram_token,
        &config.telegram_chat_id,
        config.send_delay,
    );
    let analyzer = GeminiClient::new(&config.google_api_key, &config.gemini_model);
    let mut controller =
        Controller::new(PrimaryMonitor, messenger, analyzer, store, config.send_delay);

    runtime.block_on(event_loop::run_until(
        &trigger,
        &mut controller,
        config.poll_interval,
        interrupted(),
    ));

    log::info!("[AGENT] Screenshot agent stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed, never resolves.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("[AGENT] Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn log_banner(config: &AgentConfig) {
    log::info!("[AGENT] Screenshot agent started");
    log::info!("[AGENT] Screenshots folder: {}", config.screenshot_folder.display());
    log::info!("[AGENT] Telegram chat id: {}", config.telegram_chat_id);
    log::info!("[AGENT] Analysis model: {}", config.gemini_model);
    log::info!(
        "[AGENT] Controls: {:?} start/submit, {:?} capture while collecting, Ctrl+C exit",
        config.toggle_key,
        config.capture_key
    );
    log::info!("[AGENT] Ready: images are sent first, analysis follows");
}
