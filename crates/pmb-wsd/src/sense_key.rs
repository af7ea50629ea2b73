use thiserror::Error;
use wordnet_types::{Pos, sense_name};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SenseKeyError {
    #[error("malformed sense key `{0}`, expected lemma.pos.NN")]
    Malformed(String),
    #[error("unknown part of speech `{pos}` in sense key `{key}`")]
    UnknownPos { key: String, pos: String },
}

/// A gold sense key such as `cloud.n.02`, borrowed from the corpus.
///
/// The lemma is everything before the last two dots, so lemmas that contain
/// dots themselves (`st._louis.n.01`) survive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SenseKey<'a> {
    pub lemma: &'a str,
    pub pos: Pos,
    pub sense_number: &'a str,
}

impl<'a> SenseKey<'a> {
    pub fn parse(key: &'a str) -> Result<Self, SenseKeyError> {
        let mut parts = key.rsplitn(3, '.');
        let (Some(sense_number), Some(tag), Some(lemma)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(SenseKeyError::Malformed(key.to_string()));
        };
        if lemma.is_empty() || sense_number.is_empty() {
            return Err(SenseKeyError::Malformed(key.to_string()));
        }
        let pos = Pos::from_tag(tag).ok_or_else(|| SenseKeyError::UnknownPos {
            key: key.to_string(),
            pos: tag.to_string(),
        })?;
        Ok(Self {
            lemma,
            pos,
            sense_number,
        })
    }

    /// `lemma.pos.NN` for this key's lemma and tag with another sense number.
    pub fn with_sense_number(&self, sense_number: u32) -> String {
        sense_name(self.lemma, self.pos.to_char(), sense_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_from_the_right() {
        let key = SenseKey::parse("st._louis.n.01").expect("parse");
        assert_eq!(key.lemma, "st._louis");
        assert_eq!(key.pos, Pos::Noun);
        assert_eq!(key.sense_number, "01");

        let key = SenseKey::parse("glad.a.12").expect("parse");
        assert_eq!(key.pos, Pos::Adj);
        assert_eq!(key.with_sense_number(1), "glad.a.01");
        assert_eq!(key.with_sense_number(12), "glad.a.12");
    }

    #[test]
    fn rejects_unknown_pos() {
        assert_eq!(
            SenseKey::parse("cloud.x.01"),
            Err(SenseKeyError::UnknownPos {
                key: "cloud.x.01".into(),
                pos: "x".into(),
            })
        );
    }

    #[test]
    fn rejects_keys_without_three_parts() {
        for key in ["cloud", "cloud.n", ".n.01", "cloud.n."] {
            assert_eq!(
                SenseKey::parse(key),
                Err(SenseKeyError::Malformed(key.to_string())),
                "{key}"
            );
        }
    }
}
