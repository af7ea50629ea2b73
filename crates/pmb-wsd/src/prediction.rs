use std::fmt;

use serde::{Serialize, Serializer};

/// Output marker for a gold key whose lemma has no WordNet senses.
pub const NO_ENTRY: &str = "NO WORDNET ENTRY FOUND";

/// Predicted sense for a token that carries a gold sense key.
///
/// Tokens without a key are `None` in prediction lists, which keeps them
/// apart from `NoEntry`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prediction {
    Sense(String),
    NoEntry,
}

impl Prediction {
    pub fn as_str(&self) -> &str {
        match self {
            Prediction::Sense(name) => name,
            Prediction::NoEntry => NO_ENTRY,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_strings() {
        let predictions = vec![
            None,
            Some(Prediction::Sense("cloud.n.01".into())),
            Some(Prediction::NoEntry),
        ];
        assert_eq!(
            serde_json::to_string(&predictions).expect("serialize"),
            r#"[null,"cloud.n.01","NO WORDNET ENTRY FOUND"]"#
        );
    }
}
