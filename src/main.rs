use mensa_reminder::checker::MensaChecker;
use mensa_reminder::config::{AppConfig, load_config};
use mensa_reminder::notifier::TelegramNotifier;
use mensa_reminder::scraper::ScraperImpl;
use mensa_reminder::storage::SqliteStorage;
use mensa_reminder::utils::today;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let matcher = match config.matcher() {
        Ok(m) => m,
        Err(e) => {
            error!("Invalid matcher configuration: {}", e);
            return;
        }
    };

    let fetcher = match ScraperImpl::new() {
        Ok(f) => Arc::new(f),
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return;
        }
    };

    let storage = match SqliteStorage::new(&config.database_path) {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return;
        }
    };

    let checker = Arc::new(MensaChecker::new(
        fetcher,
        matcher,
        config.mensas.clone(),
        storage,
    ));

    let refresh_notify = Arc::new(Notify::new());
    let notifier = match TelegramNotifier::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id,
        checker.clone(),
        refresh_notify.clone(),
    ) {
        Ok(n) => Arc::new(n),
        Err(e) => {
            error!("Failed to create notifier: {}", e);
            return;
        }
    };

    if let Err(e) = notifier.set_my_commands().await {
        warn!("Registering bot commands failed: {}", e);
    }

    // Spawn listener for chat commands (/add, /check, /refresh, ...)
    TelegramNotifier::spawn_listener(notifier.clone());

    info!("Sending startup message...");
    if let Err(e) = notifier.notify_text("🚀 Mensa reminder started!").await {
        warn!("Startup notification failed: {:?}", e);
    }

    loop {
        run_check(&checker, &notifier).await;

        info!(
            "Waiting for timer ({}s) or manual refresh...",
            config.check_interval_seconds
        );
        tokio::select! {
            _ = sleep(Duration::from_secs(config.check_interval_seconds)) => {
                info!("Timer triggered.");
            }
            _ = refresh_notify.notified() => {
                info!("Manual refresh triggered.");
            }
        }
    }
}

/// Checks today's menus and pushes match lines the user has not seen yet today.
async fn run_check(checker: &MensaChecker, notifier: &TelegramNotifier) {
    let day = today();
    info!("Checking menus for {}", day);

    let report = match checker.check(day).await {
        Ok(r) => r,
        Err(e) => {
            warn!("Check failed: {}", e);
            return;
        }
    };

    let fresh = match checker.unseen(&report, day).await {
        Ok(f) => f,
        Err(e) => {
            warn!("Notification lookup failed: {}", e);
            return;
        }
    };

    if fresh.is_empty() {
        info!("No new matches.");
    } else if let Err(e) = notifier.notify_report(&fresh).await {
        warn!("Telegram send error: {:?}", e);
    } else if let Err(e) = checker.mark_notified(&fresh, day).await {
        warn!("Mark notified failed: {}", e);
    } else {
        info!("Matches notified and marked.");
    }

    if let Err(e) = checker.storage().lock().await.prune_notified_before(day) {
        warn!("Pruning old notifications failed: {}", e);
    }
}
