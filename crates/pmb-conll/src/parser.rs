use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::document::{Document, Token};

/// Missing semantic tag.
const SEMANTIC_NONE: &str = "NIL";
/// Token without a gold sense.
const SENSE_NONE: &str = "O";
/// Token without a thematic role.
const ROLE_NONE: &str = "[]";

const DOC_ID_KEY: &str = "newdoc id";
const RAW_SENT_KEY: &str = "raw sent";
const METADATA_SEPARATOR: &str = " = ";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read corpus {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "line {line}: expected 7 tab-separated fields, found {found} (document {})",
        .document.as_deref().unwrap_or("without id")
    )]
    MalformedLine {
        line: usize,
        found: usize,
        document: Option<String>,
    },
}

/// Parse a whole corpus; the first malformed token line aborts the parse.
pub(crate) fn parse_documents(text: &str) -> Result<Vec<Document>, ParseError> {
    // Documents are separated by an empty line, so CRLF must be folded first.
    let text = text.replace("\r\n", "\n");
    let text = text.trim_end();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    let mut first_line = 1;
    for block in text.split("\n\n") {
        documents.push(parse_block(block, first_line)?);
        // Lines of this block plus the blank separator line.
        first_line += block.split('\n').count() + 1;
    }
    debug!("parsed {} documents", documents.len());
    Ok(documents)
}

fn parse_block(block: &str, first_line: usize) -> Result<Document, ParseError> {
    let mut doc = Document::default();
    // A token line could contain the metadata keys by coincidence, so only
    // the first matching comment of each kind is honoured.
    let mut found_id = false;
    let mut found_sent = false;

    for (offset, line) in block.split('\n').enumerate() {
        if line.starts_with('#') {
            if !found_id && line.contains(DOC_ID_KEY) {
                doc.set_id(metadata_value(line));
                found_id = true;
            } else if !found_sent && line.contains(RAW_SENT_KEY) {
                doc.set_raw_sentence(metadata_value(line));
                found_sent = true;
            }
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let &[surface, _duplicate, symbol, semantic, category, sense, role] = fields.as_slice()
        else {
            return Err(ParseError::MalformedLine {
                line: first_line + offset,
                found: fields.len(),
                document: doc.id().map(str::to_string),
            });
        };

        doc.push(Token {
            surface,
            symbol,
            semantic_tag: non_sentinel(semantic, SEMANTIC_NONE),
            category_tag: category,
            sense_key: non_sentinel(sense, SENSE_NONE),
            role_tag: non_sentinel(role, ROLE_NONE),
        });
    }

    if !found_id {
        warn!(
            raw_sentence = doc.raw_sentence().unwrap_or_default(),
            "document at line {first_line} has no id"
        );
    }

    Ok(doc)
}

fn metadata_value(line: &str) -> &str {
    line.split_once(METADATA_SEPARATOR)
        .map_or(line, |(_, value)| value)
}

fn non_sentinel<'a>(value: &'a str, sentinel: &str) -> Option<&'a str> {
    (value != sentinel).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_value_takes_text_after_first_separator() {
        assert_eq!(metadata_value("# newdoc id = p00/d1"), "p00/d1");
        assert_eq!(metadata_value("# raw sent = x = y"), "x = y");
        assert_eq!(metadata_value("# newdoc id"), "# newdoc id");
    }

    #[test]
    fn sentinels_become_none() {
        assert_eq!(non_sentinel("NIL", SEMANTIC_NONE), None);
        assert_eq!(non_sentinel("O", SENSE_NONE), None);
        assert_eq!(non_sentinel("[]", ROLE_NONE), None);
        assert_eq!(non_sentinel("[Agent]", ROLE_NONE), Some("[Agent]"));
    }

    #[test]
    fn counts_lines_across_blocks() {
        let text = "# newdoc id = a\nA\tA\ta\tNIL\tN\tO\t[]\n\n# newdoc id = b\nB\tB\tb\tNIL\tN\tO";
        match parse_documents(text) {
            Err(ParseError::MalformedLine {
                line,
                found,
                document,
            }) => {
                assert_eq!(line, 5);
                assert_eq!(found, 6);
                assert_eq!(document.as_deref(), Some("b"));
            }
            other => panic!("expected malformed line error, got {other:?}"),
        }
    }

    #[test]
    fn crlf_blank_line_separates_documents() {
        let text = "# newdoc id = a\r\nA\tA\ta\tNIL\tN\tO\t[]\r\n\r\n\
                    # newdoc id = b\r\nB\tB\tb\tNIL\tN\tO\t[]\r\n";
        let documents = parse_documents(text).expect("parse");
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id(), Some("a"));
        assert_eq!(documents[1].id(), Some("b"));
        let token = documents[1].get_by_index(0).expect("token");
        assert_eq!(token.role_tag, None);
    }

    #[test]
    fn crlf_keeps_line_numbers() {
        let text = "# newdoc id = a\r\nA\tA\ta\tNIL\tN\tO\t[]\r\n\r\n\
                    # newdoc id = b\r\nB\tB\tb\tNIL\tN\tO\r\n";
        match parse_documents(text) {
            Err(ParseError::MalformedLine { line, .. }) => assert_eq!(line, 5),
            other => panic!("expected malformed line error, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_input_is_an_empty_corpus() {
        assert!(parse_documents(" \n\n\t\n").expect("parse").is_empty());
    }
}
