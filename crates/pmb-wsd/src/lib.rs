//! Word sense disambiguation over Parallel Meaning Bank corpora.
//!
//! Every token with a gold sense key (`cloud.n.02`) gets a predicted sense
//! from one of the predictors in this crate:
//!
//! - [`first_sense_predictions`]: WordNet's first-ranked sense.
//! - [`FrequencyTable`]: the sense most often annotated in a reference
//!   corpus, falling back to the first sense for unseen lemmas.
//! - [`classify_document`]: the candidate a [`PairClassifier`] scores highest
//!   when the sentence is paired with each candidate's gloss.
//!
//! Predictions line up with the sense layer of the document: tokens without
//! a key are `None`, lemmas without WordNet senses are
//! [`Prediction::NoEntry`].

pub mod classify;
pub mod first_sense;
pub mod frequency;
pub mod gloss;
pub mod inventory;
pub mod pairs;
pub mod prediction;
pub mod sense_key;

pub use classify::{ClassifyError, PairClassifier, classify_document};
pub use first_sense::{first_sense, first_sense_predictions};
pub use frequency::FrequencyTable;
pub use gloss::{ContextOptions, gloss_context};
pub use inventory::{CachedInventory, Relation, Sense, SenseInventory, WordNetInventory};
pub use pairs::{TextPair, sense_pairs, training_pairs};
pub use prediction::{NO_ENTRY, Prediction};
pub use sense_key::{SenseKey, SenseKeyError};
