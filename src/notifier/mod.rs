// Notifier module: pushes match reports to the user and takes their commands.

pub mod telegram;

pub use telegram::TelegramNotifier;
