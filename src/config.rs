use crate::matcher::{Aggregator, Classifier, DEFAULT_FUZZY_THRESHOLD, SynonymTable};
use crate::model::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct MensaConfig {
    pub name: String,
    /// Page URL without the trailing `YYYY-MM-DD.html`.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub telegram_chat_id: i64,
    pub check_interval_seconds: u64,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: u8,
    #[serde(default = "default_mensas")]
    pub mensas: Vec<MensaConfig>,
    /// Replaces the built-in synonym table when present.
    #[serde(default)]
    pub synonyms: Option<BTreeMap<String, Vec<String>>>,
}

fn default_database_path() -> String {
    "data.db".to_string()
}

fn default_fuzzy_threshold() -> u8 {
    DEFAULT_FUZZY_THRESHOLD
}

fn default_mensas() -> Vec<MensaConfig> {
    vec![
        MensaConfig {
            name: "Hauptmensa".into(),
            base_url: "https://www.studentenwerk-oberfranken.de/essen/speiseplaene/bayreuth/hauptmensa/tag/".into(),
        },
        MensaConfig {
            name: "Frischraum".into(),
            base_url: "https://www.studentenwerk-oberfranken.de/essen/speiseplaene/bayreuth/frischraum/tag/".into(),
        },
    ]
}

impl AppConfig {
    /// Builds the matching engine from the configured threshold and synonyms.
    pub fn matcher(&self) -> Result<Aggregator, ConfigError> {
        let synonyms = match &self.synonyms {
            Some(entries) => SynonymTable::from_entries(entries)?,
            None => SynonymTable::builtin(),
        };
        let classifier = Classifier::new(synonyms, self.fuzzy_threshold)?;
        Ok(Aggregator::new(classifier))
    }
}

/// Parses and validates a JSON config.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.matcher()?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
