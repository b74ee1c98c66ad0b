use crate::matcher::classifier::Classifier;
use crate::model::{Keyword, Match, MatchGroup, MatchReport};
use crate::normalizer::normalize;
use std::collections::HashSet;
use tracing::debug;

/// One cafeteria's dishes for the day.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSource {
    pub name: String,
    pub items: Vec<String>,
}

/// Cafeteria name → dishes, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuSnapshot {
    sources: Vec<MenuSource>,
}

impl MenuSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-inserting a name replaces its items and keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, items: Vec<String>) {
        let name = name.into();
        match self.sources.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.items = items,
            None => self.sources.push(MenuSource { name, items }),
        }
    }

    pub fn sources(&self) -> &[MenuSource] {
        &self.sources
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.sources
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.items.as_slice())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<String>)> for MenuSnapshot {
    fn from_iter<T: IntoIterator<Item = (N, Vec<String>)>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for (name, items) in iter {
            snapshot.insert(name, items);
        }
        snapshot
    }
}

/// Runs the classifier over every cafeteria, dish and keyword.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    classifier: Classifier,
}

impl Aggregator {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Each dish is explained by the first keyword that matches it. Repeated
    /// explanations collapse, and cafeterias without matches are omitted.
    pub fn find_matches(&self, menus: &MenuSnapshot, keywords: &[Keyword]) -> MatchReport {
        let mut report = MatchReport::default();
        if keywords.is_empty() {
            return report;
        }

        for source in menus.sources() {
            let mut seen = HashSet::new();
            let mut matches = Vec::new();

            for item in &source.items {
                let Some(found) = self.match_item(item, keywords) else {
                    continue;
                };
                if seen.insert(found.to_string()) {
                    debug!("{}: {}", source.name, found);
                    matches.push(found);
                }
            }

            if !matches.is_empty() {
                report.groups.push(MatchGroup {
                    source: source.name.clone(),
                    matches,
                });
            }
        }

        report
    }

    fn match_item(&self, item: &str, keywords: &[Keyword]) -> Option<Match> {
        let normalized = normalize(item);
        keywords.iter().find_map(|keyword| {
            self.classifier
                .classify_normalized(&normalized, &keyword.normalized)
                .map(|kind| Match {
                    item: item.to_string(),
                    kind,
                })
        })
    }
}
