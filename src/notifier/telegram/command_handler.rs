// notifier/telegram/command_handler.rs

use crate::notifier::telegram::TelegramNotifier;
use crate::utils::today;
use tracing::{info, warn};

const HELP: &str = "📋 Available commands:\n\
    /add <keyword> - save a dish keyword\n\
    /keywords - list saved keywords\n\
    /clear - remove all keywords\n\
    /check - check today's menus now\n\
    /refresh - run the scheduled check now\n\
    /help - command list\n\
    /ping - check connection\n\
    /uptime - service uptime";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Keyword text, trimmed; empty when the user gave none.
    Add(String),
    Keywords,
    Clear,
    Check,
    Refresh,
    Help,
    Ping,
    Uptime,
    Unknown(String),
}

impl Command {
    /// Parses `/name[@bot] [argument]`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (head, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        let name = head.split('@').next().unwrap_or(head);

        match name {
            "/add" => Command::Add(rest.trim().to_string()),
            "/keywords" => Command::Keywords,
            "/clear" => Command::Clear,
            "/check" => Command::Check,
            "/refresh" => Command::Refresh,
            "/help" | "/start" => Command::Help,
            "/ping" => Command::Ping,
            "/uptime" => Command::Uptime,
            _ => Command::Unknown(text.to_string()),
        }
    }
}

/// Handles an incoming command and triggers the corresponding action.
pub async fn handle_command(command_text: &str, notifier: &TelegramNotifier) {
    info!("Handling command: {}", command_text);
    let reply = match Command::parse(command_text) {
        Command::Add(keyword) if keyword.is_empty() => "⚠️ Usage: /add <keyword>".to_string(),
        Command::Add(keyword) => {
            match notifier.checker.storage().lock().await.add_keyword(&keyword) {
                Ok(()) => format!("✅ Saved keyword: {}", keyword),
                Err(e) => format!("❌ Error: {}", e),
            }
        }
        Command::Keywords => match notifier.checker.storage().lock().await.list_keywords() {
            Ok(keywords) if !keywords.is_empty() => {
                let mut msg = String::from("🔖 Saved keywords:\n");
                for keyword in keywords {
                    msg.push_str(&format!("• {}\n", keyword.raw));
                }
                msg
            }
            Ok(_) => "📭 No keywords saved.".to_string(),
            Err(e) => format!("❌ Error: {}", e),
        },
        Command::Clear => match notifier.checker.storage().lock().await.clear_keywords() {
            Ok(count) => format!("🗑 Removed {} keywords.", count),
            Err(e) => format!("❌ Error: {}", e),
        },
        Command::Check => {
            let day = today();
            match notifier.checker.check(day).await {
                Ok(report) if report.is_empty() => "📭 No matches today.".to_string(),
                Ok(report) => {
                    if let Err(e) = notifier.checker.mark_notified(&report, day).await {
                        warn!("/check mark notified failed: {}", e);
                    }
                    report.render()
                }
                Err(e) => format!("❌ Error: {}", e),
            }
        }
        Command::Refresh => {
            info!("/refresh command received, triggering refresh...");
            notifier.refresh_notify.notify_one();
            "🔄 Scheduled check triggered.".to_string()
        }
        Command::Help => HELP.to_string(),
        Command::Ping => "✅ I am online!".to_string(),
        Command::Uptime => {
            let uptime = notifier.start_time.elapsed();
            format!(
                "⏱ Uptime: {:02}:{:02}:{:02}",
                uptime.as_secs() / 3600,
                (uptime.as_secs() % 3600) / 60,
                uptime.as_secs() % 60
            )
        }
        Command::Unknown(_) => "🤖 Unknown command. Type /help for a list of commands.".to_string(),
    };

    if let Err(e) = notifier.notify_text(&reply).await {
        warn!("Reply to '{}' failed: {:?}", command_text, e);
    }
}
