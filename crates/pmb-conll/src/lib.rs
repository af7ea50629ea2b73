//! Parallel Meaning Bank corpora with six annotation layers per token.
//!
//! A corpus file is a sequence of documents separated by blank lines. Each
//! document starts with `#` metadata comments (`newdoc id = ...`,
//! `raw sent = ...`) followed by one tab-separated line per token:
//!
//! ```text
//! # newdoc id = p00/d0801
//! # raw sent = Clouds gathered.
//! Clouds	Clouds	cloud	CON	N	cloud.n.01	[]
//! gathered	gathered	gather	PST	S\NP	gather.v.01	[Theme]
//! .	.	.	NIL	T	O	[]
//! ```
//!
//! The columns are surface, surface again, symbol, semantic tag, category,
//! sense key and role. `NIL`, `O` and `[]` mark a missing semantic tag, sense
//! and role; they are turned into `None` while parsing and never surface in
//! the model.
//!
//! ```rust
//! use pmb_conll::{Corpus, Layer};
//!
//! let corpus: Corpus = "# newdoc id = d1\nRain\tRain\train\tCON\tN\train.n.01\t[]\n"
//!     .parse()
//!     .unwrap();
//! let doc = &corpus.documents()[0];
//! assert_eq!(doc.id(), Some("d1"));
//! assert_eq!(doc.get_by_token("Rain").unwrap().sense_key, Some("rain.n.01"));
//! assert_eq!(doc.layer(Layer::Role).get(0), Some(None));
//! ```

mod corpus;
mod document;
mod parser;

pub use corpus::Corpus;
pub use document::{Document, Layer, LayerValues, Token, UnknownLayer};
pub use parser::ParseError;
