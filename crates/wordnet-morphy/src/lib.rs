//! WordNet-style morphological processing (morphy).
//!
//! Maps an inflected or otherwise non-base form to the base forms WordNet
//! indexes. The crate is decoupled from any particular loader; it only
//! depends on `Pos` and the existence predicate you supply.
//!
//! # How it works
//! 1. If the form is listed in the POS exception file (`*.exc`), the answer is
//!    the form itself plus its exception targets, filtered by existence.
//! 2. Otherwise apply every POS suffix rule once; the answer is the form plus
//!    the rewritten candidates, filtered by existence.
//! 3. If nothing exists yet, keep applying the rules to the previous round's
//!    candidates until one exists or no rule applies any more.
//!
//! Results are deduplicated in order and carry their provenance
//! ([`FormSource`]).
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, WordNet};
//! use wordnet_morphy::Morphy;
//! use wordnet_types::Pos;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = "/path/to/wordnet";
//! let wn = WordNet::load_with_mode(dict, LoadMode::Mmap)?;
//! let morph = Morphy::load(dict)?;
//!
//! for form in morph.base_forms(Pos::Noun, "geese", |pos, lemma| wn.lemma_exists(pos, lemma)) {
//!     println!("{:?}: {}", form.source, form.lemma);
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p wordnet-morphy --example lookup -- <dict> [--demo|<word>]`.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wordnet_types::Pos;

/// Where a base form originated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormSource {
    Surface,
    Exception,
    Rule {
        suffix: &'static str,
        replacement: &'static str,
    },
}

/// An indexed base form paired with its provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaseForm {
    pub lemma: String,
    pub source: FormSource,
}

/// Exception lists per POS plus the fixed suffix rules.
#[derive(Debug, Default)]
pub struct Morphy {
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
}

impl Morphy {
    /// Load morphy exception lists (`*.exc`) from a WordNet dict directory.
    ///
    /// Files are optional; missing ones are treated as empty.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let mut exceptions = HashMap::new();
        for pos in Pos::ALL {
            exceptions.insert(pos, load_exc(dir.join(format!("{}.exc", pos.file_suffix())))?);
        }
        Ok(Self { exceptions })
    }

    /// Morphy without exception lists; only suffix rules apply.
    pub fn rules_only() -> Self {
        Self::default()
    }

    /// Base forms of `form` that satisfy `lemma_exists`, in lookup order.
    ///
    /// The callback typically delegates to `WordNet::lemma_exists` so this
    /// crate stays ignorant of any concrete database layout.
    pub fn base_forms<F>(&self, pos: Pos, form: &str, lemma_exists: F) -> Vec<BaseForm>
    where
        F: Fn(Pos, &str) -> bool,
    {
        let form = normalize(form);
        let surface = (form.clone(), FormSource::Surface);

        if let Some(targets) = self.exceptions.get(&pos).and_then(|exc| exc.get(&form)) {
            let candidates = std::iter::once(surface).chain(
                targets
                    .iter()
                    .map(|lemma| (lemma.clone(), FormSource::Exception)),
            );
            return filter_existing(pos, candidates, &lemma_exists);
        }

        let mut round = apply_rules(pos, std::slice::from_ref(&surface));
        let found = filter_existing(
            pos,
            std::iter::once(surface).chain(round.iter().cloned()),
            &lemma_exists,
        );
        if !found.is_empty() {
            return found;
        }

        while !round.is_empty() {
            round = apply_rules(pos, &round);
            let found = filter_existing(pos, round.iter().cloned(), &lemma_exists);
            if !found.is_empty() {
                return found;
            }
        }

        Vec::new()
    }
}

fn load_exc(path: PathBuf) -> Result<HashMap<String, Vec<String>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file =
        File::open(&path).with_context(|| format!("open exception file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut map = HashMap::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let mut parts = line.split_whitespace();
        let Some(inflected) = parts.next() else {
            continue;
        };
        let lemmas: Vec<String> = parts.map(normalize).collect();
        if !lemmas.is_empty() {
            map.insert(normalize(inflected), lemmas);
        }
    }
    Ok(map)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}

fn filter_existing<I, F>(pos: Pos, candidates: I, lemma_exists: &F) -> Vec<BaseForm>
where
    I: Iterator<Item = (String, FormSource)>,
    F: Fn(Pos, &str) -> bool,
{
    let mut seen = HashSet::new();
    candidates
        .filter(|(lemma, _)| lemma_exists(pos, lemma) && seen.insert(lemma.clone()))
        .map(|(lemma, source)| BaseForm { lemma, source })
        .collect()
}

fn apply_rules(pos: Pos, forms: &[(String, FormSource)]) -> Vec<(String, FormSource)> {
    forms
        .iter()
        .flat_map(|(form, _)| {
            rules_for(pos).iter().filter_map(move |&(suffix, replacement)| {
                form.strip_suffix(suffix).map(|stem| {
                    (
                        format!("{stem}{replacement}"),
                        FormSource::Rule {
                            suffix,
                            replacement,
                        },
                    )
                })
            })
        })
        .collect()
}

fn rules_for(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        Pos::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        Pos::Adj => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        Pos::Adv => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_exists(targets: &[(&str, Pos)]) -> impl Fn(Pos, &str) -> bool {
        let set: HashSet<(Pos, String)> = targets
            .iter()
            .map(|(lemma, pos)| (*pos, normalize(lemma)))
            .collect();
        move |pos, lemma| set.contains(&(pos, normalize(lemma)))
    }

    fn lemmas(forms: &[BaseForm]) -> Vec<&str> {
        forms.iter().map(|f| f.lemma.as_str()).collect()
    }

    #[test]
    fn exceptions_short_circuit_rules() {
        let mut morph = Morphy::rules_only();
        morph.exceptions.insert(
            Pos::Noun,
            HashMap::from([("geese".into(), vec!["goose".into()])]),
        );

        let forms = morph.base_forms(
            Pos::Noun,
            "Geese",
            fake_exists(&[("goose", Pos::Noun), ("gees", Pos::Noun)]),
        );
        assert_eq!(lemmas(&forms), vec!["goose"]);
        assert_eq!(forms[0].source, FormSource::Exception);
    }

    #[test]
    fn keeps_surface_and_single_rule_hits() {
        let morph = Morphy::rules_only();
        let forms = morph.base_forms(
            Pos::Verb,
            "saws",
            fake_exists(&[("saws", Pos::Verb), ("saw", Pos::Verb)]),
        );
        assert_eq!(lemmas(&forms), vec!["saws", "saw"]);
        assert_eq!(forms[0].source, FormSource::Surface);
        assert!(matches!(forms[1].source, FormSource::Rule { suffix: "s", .. }));
    }

    #[test]
    fn reapplies_rules_until_something_exists() {
        let morph = Morphy::rules_only();
        let forms = morph.base_forms(Pos::Noun, "classeses", fake_exists(&[("class", Pos::Noun)]));
        assert_eq!(lemmas(&forms), vec!["class"]);
    }

    #[test]
    fn unknown_forms_yield_nothing() {
        let morph = Morphy::rules_only();
        assert!(morph
            .base_forms(Pos::Adv, "quicklier", fake_exists(&[("quickly", Pos::Adv)]))
            .is_empty());
    }
}
