use crate::matcher::similarity::partial_ratio;
use crate::matcher::synonyms::SynonymTable;
use crate::model::{MatchError, MatchKind};
use crate::normalizer::normalize;
use tracing::trace;

pub const DEFAULT_FUZZY_THRESHOLD: u8 = 85;

/// One match strategy: normalized item, normalized keyword → match kind.
type Strategy = fn(&Classifier, &str, &str) -> Option<MatchKind>;

/// Evaluated in order, first hit wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("direct", Classifier::direct),
    ("category", Classifier::category),
    ("fuzzy", Classifier::fuzzy),
];

/// Decides whether and how a single menu item matches a single keyword.
#[derive(Debug, Clone)]
pub struct Classifier {
    synonyms: SynonymTable,
    threshold: u8,
}

impl Classifier {
    pub fn new(synonyms: SynonymTable, threshold: u8) -> Result<Self, MatchError> {
        if threshold > 100 {
            return Err(MatchError::InvalidArgument(format!(
                "fuzzy threshold must be within 0..=100, got {}",
                threshold
            )));
        }
        Ok(Self { synonyms, threshold })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Classifies raw strings; both sides are normalized first.
    pub fn classify(&self, item: &str, keyword: &str) -> Option<MatchKind> {
        self.classify_normalized(&normalize(item), &normalize(keyword))
    }

    /// Classifies strings that already went through `normalize`.
    /// A keyword that is empty or only whitespace never matches.
    pub fn classify_normalized(&self, item: &str, keyword: &str) -> Option<MatchKind> {
        if keyword.trim().is_empty() {
            return None;
        }
        STRATEGIES.iter().find_map(|(name, strategy)| {
            let kind = strategy(self, item, keyword)?;
            trace!(strategy = *name, item, keyword, "matched");
            Some(kind)
        })
    }

    fn direct(&self, item: &str, keyword: &str) -> Option<MatchKind> {
        item.contains(keyword).then_some(MatchKind::Direct)
    }

    fn category(&self, item: &str, keyword: &str) -> Option<MatchKind> {
        self.synonyms
            .lookup(keyword)
            .any(|synonym| item.contains(synonym))
            .then_some(MatchKind::Category)
    }

    fn fuzzy(&self, item: &str, keyword: &str) -> Option<MatchKind> {
        let score = partial_ratio(keyword, item);
        (score.0 >= f64::from(self.threshold)).then_some(MatchKind::Fuzzy(score))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            synonyms: SynonymTable::builtin(),
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FuzzyScore;

    fn plain() -> Classifier {
        Classifier::new(SynonymTable::empty(), DEFAULT_FUZZY_THRESHOLD).unwrap()
    }

    #[test]
    fn substring_is_direct() {
        assert_eq!(Classifier::default().classify("Rindergulasch", "gulasch"), Some(MatchKind::Direct));
    }

    #[test]
    fn direct_ignores_case() {
        assert_eq!(plain().classify("SPAGHETTI Bolognese", "Spaghetti"), Some(MatchKind::Direct));
    }

    #[test]
    fn synonym_is_category() {
        assert_eq!(
            Classifier::default().classify("Spaghetti Bolognese", "Nudeln"),
            Some(MatchKind::Category)
        );
    }

    #[test]
    fn direct_beats_category() {
        // "reis" is its own synonym in the built-in table
        assert_eq!(Classifier::default().classify("Basmatireis mit Curry", "reis"), Some(MatchKind::Direct));
    }

    #[test]
    fn direct_holds_regardless_of_table() {
        let table = SynonymTable::from_entries(vec![("pasta", vec!["pasta"])]).unwrap();
        let classifier = Classifier::new(table, 0).unwrap();
        assert_eq!(classifier.classify("Pasta Pesto", "pasta"), Some(MatchKind::Direct));
    }

    #[test]
    fn overlapping_synonyms_resolve_by_keyword() {
        let table = SynonymTable::from_entries(vec![
            ("vegan", vec!["tofu"]),
            ("asiatisch", vec!["tofu"]),
        ])
        .unwrap();
        let classifier = Classifier::new(table, 100).unwrap();
        assert_eq!(classifier.classify("Tofu Curry", "vegan"), Some(MatchKind::Category));
        assert_eq!(classifier.classify("Tofu Curry", "asiatisch"), Some(MatchKind::Category));
        assert_eq!(classifier.classify("Tofu Curry", "fisch"), None);
    }

    #[test]
    fn typo_is_fuzzy() {
        let kind = plain().classify("Spaghetti Bolognese", "spagetti");
        assert_eq!(kind, Some(MatchKind::Fuzzy(FuzzyScore(87.5))));
    }

    #[test]
    fn score_of_exactly_85_matches() {
        let kind = plain().classify("abcdexghijkymnopzrst", "abcdefghijklmnopqrst");
        assert_eq!(kind, Some(MatchKind::Fuzzy(FuzzyScore(85.0))));
    }

    #[test]
    fn score_of_84_does_not_match() {
        let item = "abcd1fghij2lmnop3rstu4wxy";
        let keyword = "abcdefghijklmnopqrstuvwxy";
        assert_eq!(partial_ratio(keyword, item).0, 84.0);
        assert_eq!(plain().classify(item, keyword), None);
    }

    #[test]
    fn unrelated_item_does_not_match() {
        assert_eq!(Classifier::default().classify("Rindergulasch", "nudeln"), None);
        assert_eq!(Classifier::default().classify("Rindergulasch", "dessert"), None);
    }

    #[test]
    fn empty_keyword_never_matches() {
        let classifier = Classifier::new(SynonymTable::builtin(), 0).unwrap();
        assert_eq!(classifier.classify("Apfelstrudel", ""), None);
    }

    #[test]
    fn whitespace_keyword_never_matches() {
        assert_eq!(Classifier::default().classify("Rindergulasch mit Knödeln", " "), None);
        assert_eq!(Classifier::default().classify("Rindergulasch mit Knödeln", " \t "), None);
    }

    #[test]
    fn threshold_above_100_is_rejected() {
        let err = Classifier::new(SynonymTable::empty(), 101).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument(_)));
    }
}
