use crate::model::MatchError;
use crate::normalizer::normalize;
use std::collections::{BTreeSet, HashMap};

const BUILTIN: &[(&str, &[&str])] = &[
    ("nudeln", &["pasta", "spaghetti", "teigwaren", "maccheroni", "lasagne", "tagliatelle", "penne"]),
    ("reis", &["reis", "basmatireis", "wildreis", "jasminreis"]),
    ("kartoffeln", &["kartoffel", "pommes", "kartoffelbrei", "kartoffelsalat", "bratkartoffeln", "rosenkartoffeln"]),
    ("hähnchen", &["huhn", "poulet", "hähnchenbrust", "pouletbrust", "hähnchenfleisch"]),
    ("rind", &["rindfleisch", "rind", "rinderfilet", "rinderhack", "rinderbraten"]),
    ("schwein", &["schweinefleisch", "schwein", "schweineschnitzel", "schweinebraten"]),
    ("fisch", &["fisch", "lachs", "forelle", "seelachs", "fischfilet"]),
    ("vegan", &["vegetarisch", "pflanzlich", "gemüse", "salat", "tofu", "falafel"]),
    ("asiatisch", &["japanisch", "chinesisch", "thai", "koreanisch", "vietnamesisch", "indisch", "indonesisch"]),
    ("käse", &["käse", "emmentaler", "schafskäse", "mozarella", "parmesan"]),
    ("dessert", &["nachtisch", "kuchen", "pudding", "creme", "eis", "torte", "apfelstrudel"]),
    ("burger", &["burger", "hamburger", "cheeseburger", "veggie burger", "chicken burger"]),
    ("pizza", &["pizza", "fladenbrotpizza", "margherita", "pepperoni", "vegetarisch pizza"]),
    ("dip", &["dip", "soße", "sauce", "dressing", "ketchup", "mayonnaise", "senf"]),
];

/// Canonical category keyword → related dish terms, all stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, BTreeSet<String>>,
}

impl SynonymTable {
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        for (canonical, synonyms) in BUILTIN {
            let set = synonyms.iter().map(|s| normalize(s)).collect();
            entries.insert(normalize(canonical), set);
        }
        Self { entries }
    }

    /// An empty table: only direct and fuzzy matching remain.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from configuration, normalizing keys and values.
    /// Entries sharing a canonical key after normalization are merged.
    pub fn from_entries<I, K, V, S>(entries: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (canonical, synonyms) in entries {
            let key = normalize(canonical.as_ref().trim());
            if key.is_empty() {
                return Err(MatchError::InvalidArgument(
                    "synonym table contains an empty category keyword".into(),
                ));
            }
            let set = table.entry(key.clone()).or_default();
            for synonym in synonyms {
                let value = normalize(synonym.as_ref().trim());
                if value.is_empty() {
                    return Err(MatchError::InvalidArgument(format!(
                        "category '{}' contains an empty synonym",
                        key
                    )));
                }
                set.insert(value);
            }
        }
        Ok(Self { entries: table })
    }

    /// Synonyms registered for `canonical`, empty if there is no entry.
    /// The caller passes the normalized keyword.
    pub fn lookup(&self, canonical: &str) -> impl Iterator<Item = &str> {
        self.entries
            .get(canonical)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_category() {
        let table = SynonymTable::builtin();
        assert_eq!(table.len(), 14);
        assert!(table.lookup("dessert").any(|s| s == "apfelstrudel"));
        assert!(table.lookup("hähnchen").any(|s| s == "poulet"));
    }

    #[test]
    fn unknown_keyword_has_no_synonyms() {
        let table = SynonymTable::builtin();
        assert_eq!(table.lookup("sushi").count(), 0);
    }

    #[test]
    fn from_entries_normalizes() {
        let table = SynonymTable::from_entries(vec![("Suppe", vec!["Eintopf", " Brühe "])]).unwrap();
        let mut synonyms: Vec<_> = table.lookup("suppe").collect();
        synonyms.sort();
        assert_eq!(synonyms, vec!["brühe", "eintopf"]);
    }

    #[test]
    fn from_entries_rejects_empty_synonym() {
        let err = SynonymTable::from_entries(vec![("suppe", vec![""])]).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument(_)));
    }

    #[test]
    fn from_entries_rejects_empty_key() {
        let err = SynonymTable::from_entries(vec![("  ", vec!["eintopf"])]).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument(_)));
    }
}
