//! Shared types for reading WordNet and naming its senses.
//!
//! Text fields borrow from a backing buffer (`&str`) so a loader can hand out
//! cheap views. Only what sense lookup needs is kept: words, relation
//! pointers and the gloss.
//!
//! Use [`Pos`] and [`SynsetId`] to key into a database, [`Synset`] to inspect
//! parsed records, and [`sense_name`] to format the `lemma.pos.NN` identifiers
//! used by sense-annotated corpora.
//!
//! ```rust
//! use wordnet_types::{Pos, SynsetId, sense_name};
//!
//! let pos = Pos::from_tag("n").unwrap();
//! let id = SynsetId { pos, offset: 1740 };
//! assert_eq!(id.pos, Pos::Noun);
//! assert_eq!(sense_name("cloud", pos.to_char(), 2), "cloud.n.02");
//! ```

use std::borrow::Cow;
use std::fmt;

/// Hypernym pointer symbol (the broader sense).
pub const HYPERNYM: &str = "@";
/// Hyponym pointer symbol (the narrower sense).
pub const HYPONYM: &str = "~";

/// Part of speech as used by WordNet lookups (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Parse a POS character found in `data.*` pointer blocks.
    ///
    /// Adjective satellites (`s`) fold into [`Pos::Adj`].
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Parse the POS segment of a sense key such as `cloud.n.02`.
    ///
    /// Only the four coarse tags are accepted; satellites never appear in
    /// annotated sense keys.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(Pos::Noun),
            "v" => Some(Pos::Verb),
            "a" => Some(Pos::Adj),
            "r" => Some(Pos::Adv),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }

    /// Suffix of the `index.*`, `data.*` and `*.exc` files for this POS.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        })
    }
}

/// `(offset, pos)` pair uniquely identifying a synset within the WordNet files.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SynsetId {
    pub pos: Pos,
    pub offset: u32,
}

/// Raw `ss_type` marker from `data.*`, including adjective satellites.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SynsetType {
    Noun,
    Verb,
    Adj,
    Adv,
    AdjSatellite,
}

impl SynsetType {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(SynsetType::Noun),
            'v' => Some(SynsetType::Verb),
            'a' => Some(SynsetType::Adj),
            's' => Some(SynsetType::AdjSatellite),
            'r' => Some(SynsetType::Adv),
            _ => None,
        }
    }

    /// Character used in canonical synset names (`glad.s.02`).
    pub fn to_char(self) -> char {
        match self {
            SynsetType::Noun => 'n',
            SynsetType::Verb => 'v',
            SynsetType::Adj => 'a',
            SynsetType::AdjSatellite => 's',
            SynsetType::Adv => 'r',
        }
    }
}

/// Pointer from the `p_cnt` section of a data line.
#[derive(Clone, Debug)]
pub struct Pointer<'a> {
    pub symbol: &'a str,
    pub target: SynsetId,
}

/// Gloss split into its definition and quoted example sentences.
///
/// A definition made of several `;`-separated parts is joined with `"; "`,
/// so it only borrows when the gloss has a single definition part.
#[derive(Clone, Debug)]
pub struct Gloss<'a> {
    pub definition: Cow<'a, str>,
    pub examples: Vec<&'a str>,
}

#[derive(Clone, Debug)]
pub struct Synset<'a> {
    pub id: SynsetId,
    pub synset_type: SynsetType,
    /// Words in synset order, adjective markers removed.
    pub words: Vec<&'a str>,
    pub pointers: Vec<Pointer<'a>>,
    pub gloss: Gloss<'a>,
}

impl<'a> Synset<'a> {
    /// Targets of every pointer carrying `symbol`, in pointer order.
    pub fn targets<'s>(&'s self, symbol: &'s str) -> impl Iterator<Item = SynsetId> + 's {
        self.pointers
            .iter()
            .filter(move |p| p.symbol == symbol)
            .map(|p| p.target)
    }
}

/// Format a `lemma.pos.NN` sense identifier.
///
/// Sense numbers below ten are zero-padded to two digits; larger ones are
/// written as-is.
pub fn sense_name(lemma: &str, pos: char, sense_number: u32) -> String {
    format!("{lemma}.{pos}.{sense_number:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sense_tags_are_strict() {
        assert_eq!(Pos::from_tag("v"), Some(Pos::Verb));
        assert_eq!(Pos::from_tag("s"), None);
        assert_eq!(Pos::from_tag("noun"), None);
        assert_eq!(Pos::from_char('s'), Some(Pos::Adj));
    }

    #[test]
    fn targets_filter_by_symbol() {
        let noun = |offset| SynsetId {
            pos: Pos::Noun,
            offset,
        };
        let synset = Synset {
            id: noun(1),
            synset_type: SynsetType::Noun,
            words: vec!["cloud"],
            pointers: vec![
                Pointer {
                    symbol: HYPERNYM,
                    target: noun(2),
                },
                Pointer {
                    symbol: "@i",
                    target: noun(3),
                },
                Pointer {
                    symbol: HYPONYM,
                    target: noun(4),
                },
            ],
            gloss: Gloss {
                definition: Cow::Borrowed("a visible mass"),
                examples: Vec::new(),
            },
        };
        assert_eq!(synset.targets(HYPERNYM).collect::<Vec<_>>(), [noun(2)]);
        assert_eq!(synset.targets(HYPONYM).collect::<Vec<_>>(), [noun(4)]);
    }

    #[test]
    fn pads_sense_numbers() {
        assert_eq!(sense_name("week", 'n', 1), "week.n.01");
        assert_eq!(sense_name("run", 'v', 12), "run.v.12");
        assert_eq!(sense_name("glad", SynsetType::AdjSatellite.to_char(), 2), "glad.s.02");
    }
}
