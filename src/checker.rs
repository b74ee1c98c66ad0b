use crate::config::MensaConfig;
use crate::matcher::{Aggregator, MenuSnapshot};
use crate::model::{MatchGroup, MatchReport, MenuRequest, StorageError};
use crate::parser::{MensaParser, Parser};
use crate::scraper::MenuFetcher;
use crate::storage::SqliteStorage;
use crate::utils::menu_url;
use chrono::NaiveDate;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Fetches today's menus, loads the saved keywords and runs the matcher.
pub struct MensaChecker {
    fetcher: Arc<dyn MenuFetcher>,
    parser: MensaParser,
    matcher: Aggregator,
    mensas: Vec<MensaConfig>,
    storage: Arc<Mutex<SqliteStorage>>,
}

impl MensaChecker {
    pub fn new(
        fetcher: Arc<dyn MenuFetcher>,
        matcher: Aggregator,
        mensas: Vec<MensaConfig>,
        storage: Arc<Mutex<SqliteStorage>>,
    ) -> Self {
        Self {
            fetcher,
            parser: MensaParser::new(),
            matcher,
            mensas,
            storage,
        }
    }

    pub fn storage(&self) -> Arc<Mutex<SqliteStorage>> {
        self.storage.clone()
    }

    /// Runs one full check for `day`.
    pub async fn check(&self, day: NaiveDate) -> Result<MatchReport, StorageError> {
        let menus = self.fetch_menus(day).await;
        let keywords = self.storage.lock().await.list_keywords()?;

        info!(
            "Matching {} keywords against {} cafeterias",
            keywords.len(),
            menus.len()
        );
        let report = self.matcher.find_matches(&menus, &keywords);
        info!("Found matches in {} cafeterias", report.groups.len());
        Ok(report)
    }

    /// All configured cafeterias, fetched concurrently, in configured order.
    pub async fn fetch_menus(&self, day: NaiveDate) -> MenuSnapshot {
        let tasks = self.mensas.iter().map(|mensa| self.fetch_items(mensa, day));
        let results = join_all(tasks).await;

        self.mensas
            .iter()
            .zip(results)
            .map(|(mensa, items)| (mensa.name.clone(), items))
            .collect()
    }

    /// A cafeteria that cannot be fetched or parsed contributes no items.
    async fn fetch_items(&self, mensa: &MensaConfig, day: NaiveDate) -> Vec<String> {
        let request = MenuRequest {
            mensa: mensa.name.clone(),
            url: menu_url(&mensa.base_url, day),
        };

        let html = match self.fetcher.fetch(&request).await {
            Ok(html) => html,
            Err(e) => {
                warn!("{}: fetch failed: {}", mensa.name, e);
                return Vec::new();
            }
        };

        match self.parser.parse(&html) {
            Ok(items) => {
                info!("{}: {} dishes", mensa.name, items.len());
                items
            }
            Err(e) => {
                warn!("{}: parse failed: {}", mensa.name, e);
                Vec::new()
            }
        }
    }

    /// The part of `report` not yet pushed to the user on `day`.
    pub async fn unseen(&self, report: &MatchReport, day: NaiveDate) -> Result<MatchReport, StorageError> {
        let storage = self.storage.lock().await;
        let mut fresh = MatchReport::default();

        for group in &report.groups {
            let mut matches = Vec::new();
            for found in &group.matches {
                if !storage.is_match_notified(day, &group.source, &found.to_string())? {
                    matches.push(found.clone());
                }
            }
            if !matches.is_empty() {
                fresh.groups.push(MatchGroup {
                    source: group.source.clone(),
                    matches,
                });
            }
        }

        Ok(fresh)
    }

    pub async fn mark_notified(&self, report: &MatchReport, day: NaiveDate) -> Result<(), StorageError> {
        let storage = self.storage.lock().await;
        for group in &report.groups {
            for line in group.explanations() {
                storage.mark_match_notified(day, &group.source, &line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScraperError;
    use std::collections::HashMap;

    struct StubFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait::async_trait]
    impl MenuFetcher for StubFetcher {
        async fn fetch(&self, req: &MenuRequest) -> Result<String, ScraperError> {
            self.pages
                .get(&req.mensa)
                .cloned()
                .ok_or(ScraperError::InvalidResponse(404))
        }
    }

    fn page(dishes: &[&str]) -> String {
        let rows: String = dishes
            .iter()
            .map(|d| format!("<tr><td>{}<sup>1</sup></td></tr>", d))
            .collect();
        format!(
            r#"<div class="tx-bwrkspeiseplan__hauptgerichte"><table class="tx-bwrkspeiseplan__table-meals">{}</table></div>"#,
            rows
        )
    }

    fn mensa(name: &str) -> MensaConfig {
        MensaConfig {
            name: name.into(),
            base_url: format!("https://example.org/{}/", name.to_lowercase()),
        }
    }

    fn checker(keywords: &[&str]) -> MensaChecker {
        let mut pages = HashMap::new();
        pages.insert(
            "Hauptmensa".to_string(),
            page(&["Spaghetti Bolognese", "Rindergulasch", "Apfelstrudel"]),
        );
        let storage = SqliteStorage::new(":memory:").unwrap();
        for kw in keywords {
            storage.add_keyword(kw).unwrap();
        }
        MensaChecker::new(
            Arc::new(StubFetcher { pages }),
            Aggregator::default(),
            vec![mensa("Hauptmensa"), mensa("Frischraum")],
            Arc::new(Mutex::new(storage)),
        )
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    #[tokio::test]
    async fn failed_fetch_contributes_empty_menu() {
        let menus = checker(&[]).fetch_menus(day()).await;
        assert_eq!(menus.len(), 2);
        assert_eq!(menus.sources()[0].items.len(), 3);
        assert_eq!(menus.get("Frischraum"), Some(&[][..]));
    }

    #[tokio::test]
    async fn check_matches_saved_keywords() {
        let report = checker(&["nudeln", "dessert"]).check(day()).await.unwrap();
        assert_eq!(
            report.to_lines(),
            vec![(
                "Hauptmensa".to_string(),
                vec![
                    "Spaghetti Bolognese (category match)".to_string(),
                    "Apfelstrudel (category match)".to_string(),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn unseen_hides_already_notified_lines() {
        let checker = checker(&["gulasch", "dessert"]);
        let report = checker.check(day()).await.unwrap();

        let first = checker.unseen(&report, day()).await.unwrap();
        assert_eq!(first, report);
        checker.mark_notified(&first, day()).await.unwrap();

        assert!(checker.unseen(&report, day()).await.unwrap().is_empty());
        let next_day = day().succ_opt().unwrap();
        assert_eq!(checker.unseen(&report, next_day).await.unwrap(), report);
    }
}
