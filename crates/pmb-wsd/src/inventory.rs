use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use dashmap::DashMap;
use tracing::warn;
use wordnet_db::{LoadMode, WordNet};
use wordnet_morphy::Morphy;
use wordnet_types::{HYPERNYM, HYPONYM, Pos, SynsetId};

/// One candidate meaning of a lemma.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sense {
    /// Canonical `lemma.pos.NN` name.
    pub name: String,
    /// Lemma names of the synset, in synset order.
    pub synonyms: Vec<String>,
    pub definition: Option<String>,
    pub examples: Vec<String>,
    pub id: SynsetId,
}

impl Sense {
    /// Definition and usage examples of the sense's gloss.
    pub fn gloss_text(&self) -> (Option<&str>, &[String]) {
        (self.definition.as_deref(), &self.examples)
    }
}

/// Direction of a taxonomy step between senses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Hypernyms.
    Broader,
    /// Hyponyms.
    Narrower,
}

impl Relation {
    fn pointer_symbol(self) -> &'static str {
        match self {
            Relation::Broader => HYPERNYM,
            Relation::Narrower => HYPONYM,
        }
    }
}

/// A lexical knowledge base that ranks the senses of a lemma.
pub trait SenseInventory {
    /// Senses of `lemma`, most common first; empty when the lemma is unknown.
    fn lookup(&self, lemma: &str, pos: Pos) -> Vec<Sense>;

    fn related(&self, sense: &Sense, relation: Relation) -> Vec<Sense>;
}

impl<I: SenseInventory + ?Sized> SenseInventory for &I {
    fn lookup(&self, lemma: &str, pos: Pos) -> Vec<Sense> {
        (**self).lookup(lemma, pos)
    }

    fn related(&self, sense: &Sense, relation: Relation) -> Vec<Sense> {
        (**self).related(sense, relation)
    }
}

/// Sense inventory backed by WordNet dictionary files.
///
/// Lookups lowercase the lemma and reduce inflected forms with morphy
/// before reading the index, so `geese` finds the senses of `goose`.
pub struct WordNetInventory {
    wordnet: WordNet,
    morphy: Morphy,
}

impl WordNetInventory {
    pub fn new(wordnet: WordNet, morphy: Morphy) -> Self {
        Self { wordnet, morphy }
    }

    /// Load the dictionary and its exception lists from `dict_dir`.
    pub fn load(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let wordnet = WordNet::load_with_mode(dir, mode)
            .with_context(|| format!("load wordnet from {}", dir.display()))?;
        let morphy = Morphy::load(dir)
            .with_context(|| format!("load morphy exceptions from {}", dir.display()))?;
        Ok(Self::new(wordnet, morphy))
    }

    pub fn wordnet(&self) -> &WordNet {
        &self.wordnet
    }

    fn sense(&self, id: SynsetId) -> Option<Sense> {
        let synset = self.wordnet.get_synset(id)?;
        let Some(name) = self.wordnet.synset_name(id) else {
            warn!("synset {:?} has no index entry for its first word", id);
            return None;
        };
        let definition = synset.gloss.definition;
        Some(Sense {
            name,
            synonyms: synset.words.iter().map(|w| w.to_string()).collect(),
            definition: (!definition.is_empty()).then(|| definition.into_owned()),
            examples: synset.gloss.examples.iter().map(|e| e.to_string()).collect(),
            id,
        })
    }
}

impl SenseInventory for WordNetInventory {
    fn lookup(&self, lemma: &str, pos: Pos) -> Vec<Sense> {
        let lemma = lemma.to_lowercase();
        let forms = self
            .morphy
            .base_forms(pos, &lemma, |pos, form| self.wordnet.lemma_exists(pos, form));

        let mut seen = HashSet::new();
        forms
            .iter()
            .flat_map(|form| self.wordnet.synsets_for_lemma(pos, &form.lemma))
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.sense(*id))
            .collect()
    }

    fn related(&self, sense: &Sense, relation: Relation) -> Vec<Sense> {
        let Some(synset) = self.wordnet.get_synset(sense.id) else {
            return Vec::new();
        };
        synset
            .targets(relation.pointer_symbol())
            .filter_map(|id| self.sense(id))
            .collect()
    }
}

/// Memoizes `lookup` per `(lemma, pos)` in front of another inventory.
///
/// Corpora repeat the same lemmas constantly; the cache sits behind `&self`
/// so the wrapped inventory can be shared freely.
pub struct CachedInventory<I> {
    inner: I,
    lookups: DashMap<(String, Pos), Vec<Sense>>,
}

impl<I: SenseInventory> CachedInventory<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            lookups: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    /// Number of distinct `(lemma, pos)` lookups cached so far.
    pub fn cached_lookups(&self) -> usize {
        self.lookups.len()
    }
}

impl<I: SenseInventory> SenseInventory for CachedInventory<I> {
    fn lookup(&self, lemma: &str, pos: Pos) -> Vec<Sense> {
        let key = (lemma.to_string(), pos);
        if let Some(hit) = self.lookups.get(&key) {
            return hit.value().clone();
        }
        let senses = self.inner.lookup(lemma, pos);
        self.lookups.insert(key, senses.clone());
        senses
    }

    fn related(&self, sense: &Sense, relation: Relation) -> Vec<Sense> {
        self.inner.related(sense, relation)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct CountingInventory {
        calls: Cell<usize>,
    }

    impl SenseInventory for CountingInventory {
        fn lookup(&self, lemma: &str, pos: Pos) -> Vec<Sense> {
            self.calls.set(self.calls.get() + 1);
            vec![Sense {
                name: format!("{lemma}.{}.01", pos.to_char()),
                synonyms: vec![lemma.to_string()],
                definition: None,
                examples: Vec::new(),
                id: SynsetId { pos, offset: 1 },
            }]
        }

        fn related(&self, _sense: &Sense, _relation: Relation) -> Vec<Sense> {
            Vec::new()
        }
    }

    #[test]
    fn cache_hits_skip_the_inner_inventory() {
        let cached = CachedInventory::new(CountingInventory {
            calls: Cell::new(0),
        });
        let first = cached.lookup("week", Pos::Noun);
        let second = cached.lookup("week", Pos::Noun);
        cached.lookup("week", Pos::Verb);

        assert_eq!(first, second);
        assert_eq!(first[0].name, "week.n.01");
        assert_eq!(cached.inner().calls.get(), 2);
        assert_eq!(cached.cached_lookups(), 2);
    }

    #[test]
    fn gloss_text_exposes_definition_and_examples() {
        let sense = Sense {
            name: "cloud.n.01".into(),
            synonyms: vec!["cloud".into()],
            definition: Some("a visible mass".into()),
            examples: vec!["dark clouds".into()],
            id: SynsetId {
                pos: Pos::Noun,
                offset: 2000,
            },
        };
        let (definition, examples) = sense.gloss_text();
        assert_eq!(definition, Some("a visible mass"));
        assert_eq!(examples, ["dark clouds".to_string()]);
    }
}
