use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One of the six per-token annotation tracks of a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Layer {
    Surface,
    Symbol,
    Semantic,
    Category,
    Sense,
    Role,
}

impl Layer {
    pub const ALL: [Layer; 6] = [
        Layer::Surface,
        Layer::Symbol,
        Layer::Semantic,
        Layer::Category,
        Layer::Sense,
        Layer::Role,
    ];

    /// Short column name used by the PMB tooling (`tok`, `sym`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Layer::Surface => "tok",
            Layer::Symbol => "sym",
            Layer::Semantic => "sem",
            Layer::Category => "cat",
            Layer::Sense => "sns",
            Layer::Role => "rol",
        }
    }

    /// Whether the layer may hold missing values.
    pub fn is_nullable(self) -> bool {
        matches!(self, Layer::Semantic | Layer::Sense | Layer::Role)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown annotation layer `{0}` (expected one of tok, sym, sem, cat, sns, rol)")]
pub struct UnknownLayer(pub String);

impl FromStr for Layer {
    type Err = UnknownLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layer::ALL
            .into_iter()
            .find(|layer| layer.name() == s)
            .ok_or_else(|| UnknownLayer(s.to_string()))
    }
}

/// Values of a single layer for one document.
///
/// Surface, symbol and category tags are always present; the other three
/// layers may be missing for a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerValues<'a> {
    Required(&'a [String]),
    Nullable(&'a [Option<String>]),
}

impl<'a> LayerValues<'a> {
    pub fn len(&self) -> usize {
        match self {
            LayerValues::Required(values) => values.len(),
            LayerValues::Nullable(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `idx`; the outer `None` means out of bounds.
    pub fn get(&self, idx: usize) -> Option<Option<&'a str>> {
        match *self {
            LayerValues::Required(values) => values.get(idx).map(|v| Some(v.as_str())),
            LayerValues::Nullable(values) => values.get(idx).map(|v| v.as_deref()),
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Option<&'a str>> + 'a {
        (0..self.len()).filter_map(move |idx| self.get(idx))
    }
}

/// All annotations of a single token, borrowed from its document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub surface: &'a str,
    pub symbol: &'a str,
    pub semantic_tag: Option<&'a str>,
    pub category_tag: &'a str,
    pub sense_key: Option<&'a str>,
    pub role_tag: Option<&'a str>,
}

/// A PMB document: optional metadata plus six index-aligned layers.
///
/// Documents are only built by the parser, which pushes one value to every
/// layer per token line, so all layers always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    id: Option<String>,
    raw_sentence: Option<String>,
    surface: Vec<String>,
    symbol: Vec<String>,
    semantic: Vec<Option<String>>,
    category: Vec<String>,
    sense: Vec<Option<String>>,
    role: Vec<Option<String>>,
}

impl Document {
    /// Some PMB files omit the `newdoc id` comment, so the id is optional.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn raw_sentence(&self) -> Option<&str> {
        self.raw_sentence.as_deref()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.surface.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surface.is_empty()
    }

    /// All annotations of the token at `idx`, or `None` when out of bounds.
    pub fn get_by_index(&self, idx: usize) -> Option<Token<'_>> {
        Some(Token {
            surface: self.surface.get(idx)?,
            symbol: self.symbol.get(idx)?,
            semantic_tag: self.semantic.get(idx)?.as_deref(),
            category_tag: self.category.get(idx)?,
            sense_key: self.sense.get(idx)?.as_deref(),
            role_tag: self.role.get(idx)?.as_deref(),
        })
    }

    /// All annotations of the first token whose surface form is `surface`.
    pub fn get_by_token(&self, surface: &str) -> Option<Token<'_>> {
        let idx = self.surface.iter().position(|tok| tok == surface)?;
        self.get_by_index(idx)
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        (0..self.len()).filter_map(|idx| self.get_by_index(idx))
    }

    pub fn layer(&self, layer: Layer) -> LayerValues<'_> {
        match layer {
            Layer::Surface => LayerValues::Required(&self.surface),
            Layer::Symbol => LayerValues::Required(&self.symbol),
            Layer::Semantic => LayerValues::Nullable(&self.semantic),
            Layer::Category => LayerValues::Required(&self.category),
            Layer::Sense => LayerValues::Nullable(&self.sense),
            Layer::Role => LayerValues::Nullable(&self.role),
        }
    }

    /// Gold sense keys (`lemma.pos.NN`), `None` for tokens without a sense.
    pub fn sense_keys(&self) -> &[Option<String>] {
        &self.sense
    }

    pub(crate) fn set_id(&mut self, id: &str) {
        self.id = Some(id.to_string());
    }

    pub(crate) fn set_raw_sentence(&mut self, raw: &str) {
        self.raw_sentence = Some(raw.to_string());
    }

    pub(crate) fn push(&mut self, token: Token<'_>) {
        self.surface.push(token.surface.to_string());
        self.symbol.push(token.symbol.to_string());
        self.semantic.push(token.semantic_tag.map(str::to_string));
        self.category.push(token.category_tag.to_string());
        self.sense.push(token.sense_key.map(str::to_string));
        self.role.push(token.role_tag.map(str::to_string));
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Document(")?;
        writeln!(f, "  id: {:?}", self.id)?;
        writeln!(f, "  raw_sent: {:?}", self.raw_sentence)?;
        for layer in Layer::ALL {
            let values: Vec<Option<&str>> = self.layer(layer).iter().collect();
            writeln!(f, "  {layer}: {values:?}")?;
        }
        write!(f, ")")
    }
}
