use std::collections::HashMap;

use pmb_conll::Corpus;
use tracing::info;
use wordnet_types::Pos;

use crate::first_sense::predict_first_sense;
use crate::inventory::SenseInventory;
use crate::prediction::Prediction;
use crate::sense_key::{SenseKey, SenseKeyError};

/// Sense-number counts per `(lemma, pos)` from a gold-annotated corpus.
///
/// Each bucket keeps its sense numbers in the order they were first seen,
/// which decides ties between equally frequent senses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    buckets: HashMap<(String, Pos), Vec<(String, u32)>>,
}

impl FrequencyTable {
    /// Count every gold sense key of `corpus`.
    pub fn from_corpus(corpus: &Corpus) -> Result<Self, SenseKeyError> {
        let table = Self::from_keys(corpus.sense_keys().flatten().map(String::as_str))?;
        info!(
            "counted senses for {} lemma/pos pairs from {} documents",
            table.len(),
            corpus.len()
        );
        Ok(table)
    }

    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Result<Self, SenseKeyError> {
        keys.into_iter().try_fold(Self::default(), |mut table, key| {
            table.record(&SenseKey::parse(key)?);
            Ok(table)
        })
    }

    fn record(&mut self, key: &SenseKey<'_>) {
        let bucket = self
            .buckets
            .entry((key.lemma.to_string(), key.pos))
            .or_default();
        match bucket.iter_mut().find(|(number, _)| number == key.sense_number) {
            Some((_, count)) => *count += 1,
            None => bucket.push((key.sense_number.to_string(), 1)),
        }
    }

    /// Number of distinct `(lemma, pos)` buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sense numbers and counts for a lemma, in first-seen order.
    pub fn counts(&self, lemma: &str, pos: Pos) -> Option<&[(String, u32)]> {
        self.buckets
            .get(&(lemma.to_string(), pos))
            .map(Vec::as_slice)
    }

    /// The most frequent sense number; on a tie the one seen first wins.
    pub fn most_frequent(&self, lemma: &str, pos: Pos) -> Option<&str> {
        let mut best: Option<&(String, u32)> = None;
        for entry in self.counts(lemma, pos)? {
            if best.is_none_or(|(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.map(|(number, _)| number.as_str())
    }

    /// Most frequent sense for `key`'s lemma, falling back to the first
    /// WordNet sense for lemmas the table never saw.
    pub fn predict<I>(&self, inventory: &I, key: &str) -> Result<Prediction, SenseKeyError>
    where
        I: SenseInventory + ?Sized,
    {
        let parsed = SenseKey::parse(key)?;
        Ok(match self.most_frequent(parsed.lemma, parsed.pos) {
            Some(number) => Prediction::Sense(format!(
                "{}.{}.{number}",
                parsed.lemma,
                parsed.pos.to_char()
            )),
            None => predict_first_sense(inventory, &parsed),
        })
    }

    pub fn predictions<I>(
        &self,
        inventory: &I,
        sense_keys: &[Option<String>],
    ) -> Result<Vec<Option<Prediction>>, SenseKeyError>
    where
        I: SenseInventory + ?Sized,
    {
        sense_keys
            .iter()
            .map(|key| key.as_deref().map(|key| self.predict(inventory, key)).transpose())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_seen_order() {
        let table = FrequencyTable::from_keys([
            "forget.v.04",
            "week.n.01",
            "forget.v.02",
            "forget.v.04",
        ])
        .expect("table");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.counts("forget", Pos::Verb),
            Some(&[("04".to_string(), 2), ("02".to_string(), 1)][..])
        );
        assert_eq!(table.counts("forget", Pos::Noun), None);
    }

    #[test]
    fn ties_go_to_the_first_seen_sense() {
        let table =
            FrequencyTable::from_keys(["run.v.03", "run.v.01", "run.v.01", "run.v.03"])
                .expect("table");
        assert_eq!(table.most_frequent("run", Pos::Verb), Some("03"));
    }

    #[test]
    fn malformed_keys_abort_the_build() {
        assert!(matches!(
            FrequencyTable::from_keys(["week.n.01", "week.q.01"]),
            Err(SenseKeyError::UnknownPos { .. })
        ));
    }
}
