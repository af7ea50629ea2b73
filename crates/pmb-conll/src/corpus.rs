use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::document::{Document, Layer, LayerValues};
use crate::parser::{ParseError, parse_documents};

/// Documents of a PMB CoNLL file, in file order.
///
/// Think of documents as rows and annotation layers as columns:
///
/// ```text
///        tok  sym  sem  cat  sns  rol
/// doc1
/// doc2
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Parse a corpus from text.
    ///
    /// Documents are separated by blank lines. A token line that does not have
    /// exactly seven tab-separated fields fails the whole parse.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(Self {
            documents: parse_documents(text)?,
        })
    }

    /// Read and parse a corpus file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::parse(&text)?;
        info!(
            "loaded {} documents from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// One layer for every document, in corpus order.
    pub fn layer(&self, layer: Layer) -> Vec<LayerValues<'_>> {
        self.documents.iter().map(|doc| doc.layer(layer)).collect()
    }

    /// Sense keys of every token in the corpus, document by document.
    pub fn sense_keys(&self) -> impl Iterator<Item = &Option<String>> + '_ {
        self.documents.iter().flat_map(|doc| doc.sense_keys())
    }

    pub fn raw_sentences(&self) -> Vec<Option<&str>> {
        self.documents.iter().map(Document::raw_sentence).collect()
    }

    pub fn ids(&self) -> Vec<Option<&str>> {
        self.documents.iter().map(Document::id).collect()
    }
}

impl FromStr for Corpus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
