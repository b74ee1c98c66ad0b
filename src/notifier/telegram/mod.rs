pub mod command_handler;
pub mod listener;
pub mod sender;

use crate::checker::MensaChecker;
use crate::model::{MatchReport, NotifyError};
use reqwest::Client;
use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use std::time::Instant;
use tokio::sync::Notify;

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: i64,
    pub client: Client,
    pub offset: Arc<AtomicI64>,
    pub checker: Arc<MensaChecker>,
    pub start_time: Instant,
    pub refresh_notify: Arc<Notify>,
}

impl TelegramNotifier {
    pub fn new(
        bot_token: String,
        chat_id: i64,
        checker: Arc<MensaChecker>,
        refresh_notify: Arc<Notify>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError::ApiError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            bot_token,
            chat_id,
            client,
            offset: Arc::new(AtomicI64::new(0)),
            checker,
            start_time: Instant::now(),
            refresh_notify,
        })
    }

    pub fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.bot_token, method)
    }

    pub async fn notify_text(&self, text: &str) -> Result<(), NotifyError> {
        sender::send_text(self, text).await
    }

    pub async fn notify_report(&self, report: &MatchReport) -> Result<(), NotifyError> {
        sender::send_report(self, report).await
    }

    pub async fn listen_for_commands(&self) {
        listener::listen_for_commands(self).await;
    }

    pub async fn set_my_commands(&self) -> Result<(), NotifyError> {
        let commands = serde_json::json!({
            "commands": [
                { "command": "add", "description": "Save a dish keyword" },
                { "command": "keywords", "description": "List saved keywords" },
                { "command": "clear", "description": "Remove all keywords" },
                { "command": "check", "description": "Check today's menus now" },
                { "command": "refresh", "description": "Run the scheduled check now" },
                { "command": "help", "description": "Command list" },
                { "command": "ping", "description": "Check connection" },
                { "command": "uptime", "description": "Service uptime" }
            ]
        });
        let response = self
            .client
            .post(self.api_url("setMyCommands"))
            .json(&commands)
            .send()
            .await
            .map_err(|e| NotifyError::ApiError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(NotifyError::ApiError(format!(
                "setMyCommands answered {}",
                response.status()
            )));
        }
        Ok(())
    }

    pub fn spawn_listener(notifier: Arc<TelegramNotifier>) {
        tokio::spawn(async move {
            tracing::info!("▶️ Starting Telegram listener...");
            notifier.listen_for_commands().await;
            tracing::info!("🛑 Telegram listener ended.");
        });
    }
}
