use pmb_conll::Corpus;
use serde::Serialize;
use tracing::info;

use crate::gloss::{ContextOptions, gloss_context};
use crate::inventory::{Sense, SenseInventory};
use crate::sense_key::{SenseKey, SenseKeyError};

/// A sentence/gloss pair for a text-pair match classifier.
///
/// `label` is `Some(1)` when the gloss belongs to the gold sense, `Some(0)`
/// for the other candidates and `None` for unlabelled prediction input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextPair {
    pub text_a: String,
    pub text_b: String,
    #[serde(rename = "labels")]
    pub label: Option<u8>,
}

/// One pair per candidate sense of the key's lemma, in sense order.
pub fn sense_pairs<I>(
    inventory: &I,
    key: &str,
    context: &str,
    options: ContextOptions,
    labelled: bool,
) -> Result<Vec<TextPair>, SenseKeyError>
where
    I: SenseInventory + ?Sized,
{
    let parsed = SenseKey::parse(key)?;
    let candidates = inventory.lookup(parsed.lemma, parsed.pos);
    Ok(pairs_for(inventory, &candidates, context, options, labelled.then_some(key)))
}

pub(crate) fn pairs_for<I>(
    inventory: &I,
    candidates: &[Sense],
    context: &str,
    options: ContextOptions,
    gold: Option<&str>,
) -> Vec<TextPair>
where
    I: SenseInventory + ?Sized,
{
    candidates
        .iter()
        .map(|sense| TextPair {
            text_a: context.to_string(),
            text_b: gloss_context(inventory, sense, options),
            label: gold.map(|gold| u8::from(gold == sense.name)),
        })
        .collect()
}

/// Labelled pairs for every gold sense key of `corpus`, with each
/// document's raw sentence as context.
pub fn training_pairs<I>(
    inventory: &I,
    corpus: &Corpus,
    options: ContextOptions,
) -> Result<Vec<TextPair>, SenseKeyError>
where
    I: SenseInventory + ?Sized,
{
    let mut pairs = Vec::new();
    for doc in corpus {
        let context = doc.raw_sentence().unwrap_or_default();
        for key in doc.sense_keys().iter().flatten() {
            pairs.extend(sense_pairs(inventory, key, context, options, true)?);
        }
    }
    info!(
        "built {} text pairs from {} documents",
        pairs.len(),
        corpus.len()
    );
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_labels_column() {
        let pair = TextPair {
            text_a: "Clouds gathered.".into(),
            text_b: "a visible mass.".into(),
            label: Some(1),
        };
        assert_eq!(
            serde_json::to_string(&pair).expect("serialize"),
            r#"{"text_a":"Clouds gathered.","text_b":"a visible mass.","labels":1}"#
        );

        let unlabelled = TextPair { label: None, ..pair };
        assert!(
            serde_json::to_string(&unlabelled)
                .expect("serialize")
                .ends_with(r#""labels":null}"#)
        );
    }
}
