// Matcher module: keyword matching against menu items.

pub mod aggregator;
pub mod classifier;
pub mod similarity;
pub mod synonyms;

pub use aggregator::{Aggregator, MenuSnapshot, MenuSource};
pub use classifier::{Classifier, DEFAULT_FUZZY_THRESHOLD};
pub use synonyms::SynonymTable;
