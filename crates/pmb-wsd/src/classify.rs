use pmb_conll::Document;
use thiserror::Error;
use tracing::debug;

use crate::gloss::ContextOptions;
use crate::inventory::SenseInventory;
use crate::pairs::{TextPair, pairs_for};
use crate::prediction::Prediction;
use crate::sense_key::{SenseKey, SenseKeyError};

/// Scores how well each gloss in a batch of pairs matches its sentence.
pub trait PairClassifier {
    /// Probability of a match for every pair, in input order.
    fn match_probabilities(&self, pairs: &[TextPair]) -> anyhow::Result<Vec<f32>>;
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    SenseKey(#[from] SenseKeyError),
    #[error("classifier returned {found} probabilities for {expected} candidate senses of `{key}`")]
    ProbabilityCount {
        key: String,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Classifier(#[from] anyhow::Error),
}

/// Predict a sense for every gold key of `document` with a pair classifier.
///
/// The document's raw sentence is paired with the gloss of each candidate
/// sense; the most probable candidate wins, the first one on ties, and is
/// reported by its position among the lemma's senses.
pub fn classify_document<I, C>(
    inventory: &I,
    classifier: &C,
    document: &Document,
    options: ContextOptions,
) -> Result<Vec<Option<Prediction>>, ClassifyError>
where
    I: SenseInventory + ?Sized,
    C: PairClassifier + ?Sized,
{
    let context = document.raw_sentence().unwrap_or_default();
    document
        .sense_keys()
        .iter()
        .map(|key| {
            key.as_deref()
                .map(|key| classify_key(inventory, classifier, key, context, options))
                .transpose()
        })
        .collect()
}

fn classify_key<I, C>(
    inventory: &I,
    classifier: &C,
    key: &str,
    context: &str,
    options: ContextOptions,
) -> Result<Prediction, ClassifyError>
where
    I: SenseInventory + ?Sized,
    C: PairClassifier + ?Sized,
{
    let parsed = SenseKey::parse(key)?;
    let candidates = inventory.lookup(parsed.lemma, parsed.pos);
    if candidates.is_empty() {
        return Ok(Prediction::NoEntry);
    }

    let pairs = pairs_for(inventory, &candidates, context, options, None);
    let probabilities = classifier.match_probabilities(&pairs)?;
    if probabilities.len() != pairs.len() {
        return Err(ClassifyError::ProbabilityCount {
            key: key.to_string(),
            expected: pairs.len(),
            found: probabilities.len(),
        });
    }

    let best = most_probable(&probabilities);
    debug!(
        "{key}: picked candidate {} of {} ({})",
        best + 1,
        candidates.len(),
        probabilities[best]
    );
    Ok(Prediction::Sense(parsed.with_sense_number(best as u32 + 1)))
}

/// Index of the highest probability; the earliest index wins ties.
fn most_probable(probabilities: &[f32]) -> usize {
    let mut best = 0;
    for (idx, &p) in probabilities.iter().enumerate() {
        if p > probabilities[best] {
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earliest_maximum_wins() {
        assert_eq!(most_probable(&[0.2, 0.7, 0.7, 0.1]), 1);
        assert_eq!(most_probable(&[0.9]), 0);
        assert_eq!(most_probable(&[0.1, 0.1]), 0);
    }
}
