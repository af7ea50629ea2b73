//! Load a WordNet dictionary directory and answer sense lookups.
//!
//! This crate ingests the `data.*`/`index.*` files and exposes borrowed
//! `&str` views for lemmas, pointer symbols, and glosses. Callers choose
//! between memory-mapped files or owned buffers at runtime via [`LoadMode`].
//!
//! Besides raw synset access it knows how WordNet names its senses: the
//! canonical name of a synset is its first word, its `ss_type`, and the
//! position of the synset in that word's index entry (see
//! [`WordNet::synset_name`]).
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, WordNet};
//! use wordnet_types::Pos;
//!
//! # fn main() -> anyhow::Result<()> {
//! let wn = WordNet::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! for sid in wn.synsets_for_lemma(Pos::Noun, "cloud") {
//!     let syn = wn.get_synset(*sid).unwrap();
//!     println!("{:?}: {}", wn.synset_name(*sid), syn.gloss.definition);
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p wordnet-db --example stats -- <dict>`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use wordnet_types::{
    Gloss, Pointer, Pos, Synset, SynsetId, SynsetType, sense_name,
};

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each WordNet file (fast, zero-copy).
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum FileKind {
    Data(Pos),
    Index(Pos),
}

#[derive(Clone, Copy)]
struct TextRef {
    file: FileKind,
    start: usize,
    len: usize,
}

/// One `data.*` and one `index.*` buffer per POS, in [`Pos::ALL`] order.
struct DictFiles {
    data: Vec<Buffer>,
    index: Vec<Buffer>,
}

impl DictFiles {
    fn load(dict_dir: &Path, mode: LoadMode) -> Result<Self> {
        let mut data = Vec::with_capacity(Pos::ALL.len());
        let mut index = Vec::with_capacity(Pos::ALL.len());
        for pos in Pos::ALL {
            data.push(load_file(
                &dict_dir.join(format!("data.{}", pos.file_suffix())),
                mode,
            )?);
            index.push(load_file(
                &dict_dir.join(format!("index.{}", pos.file_suffix())),
                mode,
            )?);
        }
        Ok(Self { data, index })
    }

    fn bytes(&self, file: FileKind) -> &[u8] {
        match file {
            FileKind::Data(pos) => self.data[slot(pos)].as_slice(),
            FileKind::Index(pos) => self.index[slot(pos)].as_slice(),
        }
    }

    fn text(&self, r: TextRef) -> &str {
        let slice = &self.bytes(r.file)[r.start..r.start + r.len];
        // Every TextRef points inside a line that was validated as UTF-8.
        std::str::from_utf8(slice).unwrap_or_default()
    }
}

fn slot(pos: Pos) -> usize {
    match pos {
        Pos::Noun => 0,
        Pos::Verb => 1,
        Pos::Adj => 2,
        Pos::Adv => 3,
    }
}

struct PointerData {
    symbol: TextRef,
    target: SynsetId,
}

struct SynsetData {
    id: SynsetId,
    synset_type: SynsetType,
    words: Vec<TextRef>,
    pointers: Vec<PointerData>,
    /// `;`-separated definition parts, joined when a view is built.
    definition: Vec<TextRef>,
    examples: Vec<TextRef>,
}

/// In-memory view of a WordNet dictionary backed by mmap or owned buffers.
pub struct WordNet {
    files: DictFiles,
    lemma_to_synsets: HashMap<(Pos, String), Vec<SynsetId>>,
    synsets: HashMap<SynsetId, SynsetData>,
}

impl WordNet {
    /// Load WordNet from a directory containing `data.*` and `index.*` files.
    ///
    /// Defaults to memory-mapping the source files. Use [`Self::load_with_mode`]
    /// to force owned buffers instead.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load WordNet choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        for pos in Pos::ALL {
            for prefix in ["data", "index"] {
                let path = dir.join(format!("{prefix}.{}", pos.file_suffix()));
                if !path.exists() {
                    anyhow::bail!("missing required WordNet file: {}", path.display());
                }
            }
        }

        let files = DictFiles::load(dir, mode)?;

        let mut lemma_to_synsets = HashMap::new();
        let mut synsets = HashMap::new();
        for pos in Pos::ALL {
            parse_index(&files, pos, &mut lemma_to_synsets)?;
            parse_data(&files, pos, &mut synsets)?;
        }

        Ok(Self {
            files,
            lemma_to_synsets,
            synsets,
        })
    }

    /// Check whether a lemma exists for the given POS according to index files.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.lemma_to_synsets
            .contains_key(&(pos, normalize_lemma(lemma)))
    }

    /// Synsets listed for a lemma in index order, or an empty slice.
    ///
    /// Index order is WordNet's sense ranking: the first id is sense `01`.
    pub fn synsets_for_lemma(&self, pos: Pos, lemma: &str) -> &[SynsetId] {
        self.lemma_to_synsets
            .get(&(pos, normalize_lemma(lemma)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Fetch a `Synset` by id if loaded.
    pub fn get_synset(&self, id: SynsetId) -> Option<Synset<'_>> {
        self.synsets.get(&id).map(|syn| self.make_synset_view(syn))
    }

    /// Iterate over all synsets as borrowed views.
    pub fn iter_synsets(&self) -> impl Iterator<Item = Synset<'_>> + '_ {
        self.synsets.values().map(|s| self.make_synset_view(s))
    }

    /// 1-based position of `id` among the senses of `lemma`.
    pub fn sense_number(&self, lemma: &str, id: SynsetId) -> Option<u32> {
        self.synsets_for_lemma(id.pos, lemma)
            .iter()
            .position(|sid| *sid == id)
            .map(|idx| idx as u32 + 1)
    }

    /// Canonical `lemma.pos.NN` name of a synset, built from its first word.
    ///
    /// Returns `None` when the synset is unknown or its first word has no
    /// index entry pointing back at it.
    pub fn synset_name(&self, id: SynsetId) -> Option<String> {
        let data = self.synsets.get(&id)?;
        let first = data.words.first()?;
        let lemma = normalize_lemma(self.files.text(*first));
        let number = self.sense_number(&lemma, id)?;
        Some(sense_name(&lemma, data.synset_type.to_char(), number))
    }

    /// Number of lemmas tracked across all parts of speech.
    pub fn lemma_count(&self) -> usize {
        self.lemma_to_synsets.len()
    }

    /// Number of synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    fn make_synset_view<'a>(&'a self, data: &'a SynsetData) -> Synset<'a> {
        Synset {
            id: data.id,
            synset_type: data.synset_type,
            words: data.words.iter().map(|r| self.files.text(*r)).collect(),
            pointers: data
                .pointers
                .iter()
                .map(|p| Pointer {
                    symbol: self.files.text(p.symbol),
                    target: p.target,
                })
                .collect(),
            gloss: Gloss {
                definition: match data.definition.as_slice() {
                    [] => Cow::Borrowed(""),
                    [single] => Cow::Borrowed(self.files.text(*single)),
                    parts => Cow::Owned(
                        parts
                            .iter()
                            .map(|r| self.files.text(*r))
                            .collect::<Vec<_>>()
                            .join("; "),
                    ),
                },
                examples: data.examples.iter().map(|r| self.files.text(*r)).collect(),
            },
        }
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    match mode {
        LoadMode::Mmap => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .with_context(|| format!("mmap {}", path.display())),
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Yield `(line number, line)` for every record line, skipping the license
/// header (lines starting with whitespace) and blank lines.
fn record_lines(bytes: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    bytes
        .split(|b| *b == b'\n')
        .enumerate()
        .map(|(idx, raw)| (idx + 1, raw.strip_suffix(b"\r").unwrap_or(raw)))
        .filter(|(_, line)| !line.is_empty() && !matches!(line.first(), Some(b' ' | b'\t')))
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt offset...`
fn parse_index(
    files: &DictFiles,
    pos: Pos,
    lemma_to_synsets: &mut HashMap<(Pos, String), Vec<SynsetId>>,
) -> Result<()> {
    let file = FileKind::Index(pos);
    for (lineno, line) in record_lines(files.bytes(file)) {
        let line = std::str::from_utf8(line)
            .with_context(|| format!("{file:?}:{lineno} invalid utf8"))?;
        let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
        if tokens.len() < 6 {
            anyhow::bail!("{file:?}:{lineno} malformed index line (too few tokens)");
        }

        let synset_cnt: usize = tokens[2]
            .parse()
            .with_context(|| format!("{file:?}:{lineno} synset_cnt"))?;
        let p_cnt: usize = tokens[3]
            .parse()
            .with_context(|| format!("{file:?}:{lineno} p_cnt"))?;
        // Skip the pointer symbols plus sense_cnt and tagsense_cnt.
        let first_offset = 4 + p_cnt + 2;
        if tokens.len() != first_offset + synset_cnt {
            anyhow::bail!(
                "{file:?}:{lineno} synset_cnt mismatch (expected {synset_cnt}, got {})",
                tokens.len().saturating_sub(first_offset)
            );
        }

        let ids = tokens[first_offset..]
            .iter()
            .map(|t| {
                t.parse::<u32>()
                    .map(|offset| SynsetId { pos, offset })
                    .with_context(|| format!("{file:?}:{lineno} synset offset {t}"))
            })
            .collect::<Result<Vec<_>>>()?;
        lemma_to_synsets.insert((pos, normalize_lemma(tokens[0])), ids);
    }

    Ok(())
}

/// `offset lex_filenum ss_type w_cnt [word lex_id...] p_cnt [ptr...] [frames] | gloss`
fn parse_data(
    files: &DictFiles,
    pos: Pos,
    synsets: &mut HashMap<SynsetId, SynsetData>,
) -> Result<()> {
    let file = FileKind::Data(pos);
    let root = files.bytes(file);
    for (lineno, line) in record_lines(root) {
        let line = std::str::from_utf8(line)
            .with_context(|| format!("{file:?}:{lineno} invalid utf8"))?;
        // A line without a gloss still yields an empty span inside the buffer.
        let (fields, gloss) = line
            .split_once('|')
            .unwrap_or((line, &line[line.len()..]));
        let tokens: Vec<&str> = fields.split_ascii_whitespace().collect();
        if tokens.len() < 5 {
            anyhow::bail!("{file:?}:{lineno} malformed data line");
        }

        let offset: u32 = tokens[0]
            .parse()
            .with_context(|| format!("{file:?}:{lineno} offset"))?;
        let synset_type = tokens[2]
            .chars()
            .next()
            .and_then(SynsetType::from_char)
            .ok_or_else(|| anyhow::anyhow!("{file:?}:{lineno} invalid ss_type {}", tokens[2]))?;
        let w_cnt = usize::from_str_radix(tokens[3], 16)
            .with_context(|| format!("{file:?}:{lineno} w_cnt"))?;

        let mut cursor = 4;
        let word_tokens = tokens
            .get(cursor..cursor + w_cnt * 2)
            .ok_or_else(|| anyhow::anyhow!("{file:?}:{lineno} not enough word/lex_id pairs"))?;
        let words = word_tokens
            .chunks(2)
            .map(|pair| text_ref(file, root, strip_adj_marker(pair[0])))
            .collect();
        cursor += w_cnt * 2;

        let p_cnt: usize = tokens
            .get(cursor)
            .ok_or_else(|| anyhow::anyhow!("{file:?}:{lineno} missing pointer count"))?
            .parse()
            .with_context(|| format!("{file:?}:{lineno} p_cnt"))?;
        cursor += 1;
        let pointer_tokens = tokens
            .get(cursor..cursor + p_cnt * 4)
            .ok_or_else(|| anyhow::anyhow!("{file:?}:{lineno} incomplete pointer block"))?;
        let pointers = pointer_tokens
            .chunks(4)
            .map(|ptr| -> Result<PointerData> {
                let target_offset: u32 = ptr[1]
                    .parse()
                    .with_context(|| format!("{file:?}:{lineno} pointer target offset"))?;
                let target_pos = ptr[2]
                    .chars()
                    .next()
                    .and_then(Pos::from_char)
                    .ok_or_else(|| anyhow::anyhow!("{file:?}:{lineno} pointer target pos"))?;
                Ok(PointerData {
                    symbol: text_ref(file, root, ptr[0]),
                    target: SynsetId {
                        pos: target_pos,
                        offset: target_offset,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let (definition, examples) = split_gloss(gloss);
        let id = SynsetId { pos, offset };
        synsets.insert(
            id,
            SynsetData {
                id,
                synset_type,
                words,
                pointers,
                definition: definition
                    .into_iter()
                    .map(|part| text_ref(file, root, part))
                    .collect(),
                examples: examples
                    .into_iter()
                    .map(|ex| text_ref(file, root, ex))
                    .collect(),
            },
        );
    }

    Ok(())
}

/// Split a gloss into definition parts and examples.
///
/// The gloss is cut at every `;`. Parts starting with a quote are examples
/// with their surrounding quotes removed; the others are definition parts.
/// Empty parts are dropped.
fn split_gloss(gloss: &str) -> (Vec<&str>, Vec<&str>) {
    let mut definition = Vec::new();
    let mut examples = Vec::new();
    for part in gloss.split(';').map(str::trim) {
        if part.starts_with('"') {
            let example = part.trim_matches('"');
            if !example.is_empty() {
                examples.push(example);
            }
        } else if !part.is_empty() {
            definition.push(part);
        }
    }
    (definition, examples)
}

/// Drop adjective syntactic markers such as `(p)`, `(a)` or `(ip)`.
fn strip_adj_marker(word: &str) -> &str {
    match word.strip_suffix(')').and_then(|w| w.rfind('(').map(|idx| &w[..idx])) {
        Some(stem) if !stem.is_empty() => stem,
        _ => word,
    }
}

fn text_ref(file: FileKind, root: &[u8], token: &str) -> TextRef {
    TextRef {
        file,
        start: token.as_ptr() as usize - root.as_ptr() as usize,
        len: token.len(),
    }
}

fn normalize_lemma(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_definition_from_examples() {
        let (definition, examples) =
            split_gloss(r#" a group of many things; "a cloud of bees"; "clouds of smoke"  "#);
        assert_eq!(definition, vec!["a group of many things"]);
        assert_eq!(examples, vec!["a cloud of bees", "clouds of smoke"]);
    }

    #[test]
    fn keeps_definition_parts_after_examples() {
        let (definition, examples) =
            split_gloss(r#"dismiss from the mind; "forget it"; stop remembering"#);
        assert_eq!(definition, vec!["dismiss from the mind", "stop remembering"]);
        assert_eq!(examples, vec!["forget it"]);
    }

    #[test]
    fn unterminated_quote_is_still_an_example() {
        let (definition, examples) = split_gloss(r#"plain text; "dangling"#);
        assert_eq!(definition, vec!["plain text"]);
        assert_eq!(examples, vec!["dangling"]);
    }

    #[test]
    fn gloss_without_definition() {
        let (definition, examples) = split_gloss(r#""only an example";  ;"#);
        assert!(definition.is_empty());
        assert_eq!(examples, vec!["only an example"]);
    }

    #[test]
    fn strips_adjective_markers() {
        assert_eq!(strip_adj_marker("galore(ip)"), "galore");
        assert_eq!(strip_adj_marker("glad"), "glad");
        assert_eq!(strip_adj_marker("(p)"), "(p)");
    }
}
