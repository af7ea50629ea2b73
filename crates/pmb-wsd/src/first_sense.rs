use tracing::debug;

use crate::inventory::SenseInventory;
use crate::prediction::Prediction;
use crate::sense_key::{SenseKey, SenseKeyError};

/// Predict the first-ranked sense for every gold key of a document.
///
/// Tokens without a key stay `None`, so the output lines up with the input.
pub fn first_sense_predictions<I>(
    inventory: &I,
    sense_keys: &[Option<String>],
) -> Result<Vec<Option<Prediction>>, SenseKeyError>
where
    I: SenseInventory + ?Sized,
{
    sense_keys
        .iter()
        .map(|key| {
            key.as_deref()
                .map(|key| first_sense(inventory, key))
                .transpose()
        })
        .collect()
}

/// First-sense prediction for a single gold key; the key's sense number is
/// ignored.
pub fn first_sense<I>(inventory: &I, key: &str) -> Result<Prediction, SenseKeyError>
where
    I: SenseInventory + ?Sized,
{
    let parsed = SenseKey::parse(key)?;
    Ok(predict_first_sense(inventory, &parsed))
}

pub(crate) fn predict_first_sense<I>(inventory: &I, key: &SenseKey<'_>) -> Prediction
where
    I: SenseInventory + ?Sized,
{
    let senses = inventory.lookup(key.lemma, key.pos);
    let Some(first) = senses.first() else {
        debug!("no wordnet entry for {}.{}", key.lemma, key.pos.to_char());
        return Prediction::NoEntry;
    };

    let lemma = key.lemma.to_lowercase();
    if first
        .synonyms
        .iter()
        .any(|synonym| synonym.to_lowercase() == lemma)
    {
        Prediction::Sense(key.with_sense_number(1))
    } else {
        // Inflected or derived forms resolve to another headword.
        Prediction::Sense(first.name.clone())
    }
}
