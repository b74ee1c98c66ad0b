// Core structs: Keyword, MatchKind, Match, MatchGroup, error types
use std::fmt;
use thiserror::Error;

use crate::normalizer::normalize;

/// A user keyword. `raw` is shown back to the user, `normalized` is compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub raw: String,
    pub normalized: String,
}

impl Keyword {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self { raw, normalized }
    }
}

/// Partial-ratio similarity in the range 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FuzzyScore(pub f64);

impl FuzzyScore {
    /// Integer score as shown to the user.
    pub fn rounded(self) -> u8 {
        self.0.round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Direct,
    Category,
    Fuzzy(FuzzyScore),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub item: String,
    pub kind: MatchKind,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MatchKind::Direct => write!(f, "{} (direct match)", self.item),
            MatchKind::Category => write!(f, "{} (category match)", self.item),
            MatchKind::Fuzzy(score) => {
                write!(f, "{} (fuzzy match, score: {})", self.item, score.rounded())
            }
        }
    }
}

/// All matches found for one cafeteria, in menu order, without duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchGroup {
    pub source: String,
    pub matches: Vec<Match>,
}

impl MatchGroup {
    pub fn explanations(&self) -> Vec<String> {
        self.matches.iter().map(|m| m.to_string()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchReport {
    pub groups: Vec<MatchGroup>,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, source: &str) -> Option<&MatchGroup> {
        self.groups.iter().find(|g| g.source == source)
    }

    /// Source name → explanation lines, in report order.
    pub fn to_lines(&self) -> Vec<(String, Vec<String>)> {
        self.groups
            .iter()
            .map(|g| (g.source.clone(), g.explanations()))
            .collect()
    }

    /// Plain-text rendering used for chat messages.
    pub fn render(&self) -> String {
        let mut msg = String::from("🍽 Matches found:\n");
        for (source, lines) in self.to_lines() {
            msg.push_str(&format!("\n🏫 {}\n", source));
            for line in lines {
                msg.push_str(&format!("• {}\n", line));
            }
        }
        msg
    }
}

#[derive(Debug, Clone)]
pub struct MenuRequest {
    pub mensa: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected response status {0}")]
    InvalidResponse(u16),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTML parse error: {0}")]
    HtmlParseError(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("invalid stored data: {0}")]
    InvalidData(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram API error: {0}")]
    ApiError(String),
    #[error("Telegram API unreachable")]
    Unreachable,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] MatchError),
}
