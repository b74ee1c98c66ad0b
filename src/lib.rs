pub mod checker;
pub mod config;
pub mod matcher;
pub mod model;
pub mod normalizer;
pub mod notifier;
pub mod parser;
pub mod scraper;
pub mod storage;
pub mod utils;
