//! Full-text index primitives
//!
//! Postings live in their own tree as `token \0 note_id` keys with empty
//! values, so an exact term is a prefix scan on `token \0` and a prefix term
//! is a prefix scan on the bare token.

use std::collections::BTreeSet;
use til_core::Note;

const SEPARATOR: u8 = 0;

/// Splits text into lowercase alphanumeric tokens.
///
/// ```
/// assert_eq!(til_db::tokenize("Rust's sled-DB v0.34"), vec!["rust", "s", "sled", "db", "v0", "34"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Distinct tokens of the indexed columns (title, body)
pub(crate) fn note_tokens(note: &Note) -> BTreeSet<String> {
    tokenize(&note.title)
        .into_iter()
        .chain(tokenize(&note.body))
        .collect()
}

pub(crate) fn posting_key(token: &str, id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(token.len() + id.len() + 1);
    key.extend_from_slice(token.as_bytes());
    key.push(SEPARATOR);
    key.extend_from_slice(id.as_bytes());
    key
}

/// Note id stored in a posting key
pub(crate) fn posting_id(key: &[u8]) -> Option<String> {
    let pos = key.iter().position(|&b| b == SEPARATOR)?;
    String::from_utf8(key[pos + 1..].to_vec()).ok()
}

/// One search term after tokenization
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Term {
    pub text: String,
    pub prefix: bool,
}

impl Term {
    /// Key prefix to scan in the postings tree
    pub fn scan_prefix(&self) -> Vec<u8> {
        let mut key = self.text.as_bytes().to_vec();
        if !self.prefix {
            key.push(SEPARATOR);
        }
        key
    }
}

/// Parses a query: words are tokenized like indexed text, a trailing `*`
/// turns the word's last token into a prefix match
pub(crate) fn parse_query(query: &str) -> Vec<Term> {
    let mut terms = Vec::new();
    for word in query.split_whitespace() {
        let (word, prefix) = match word.strip_suffix('*') {
            Some(stripped) => (stripped, true),
            None => (word, false),
        };
        let tokens = tokenize(word);
        let last = tokens.len().saturating_sub(1);
        for (i, text) in tokens.into_iter().enumerate() {
            terms.push(Term { text, prefix: prefix && i == last });
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
        assert_eq!(tokenize("  "), Vec::<String>::new());
        assert_eq!(tokenize("Überprüfung"), vec!["überprüfung"]);
    }

    #[test]
    fn test_posting_key_roundtrip_id() {
        let key = posting_key("walrus", "python_one.md");
        assert_eq!(posting_id(&key).as_deref(), Some("python_one.md"));
    }

    #[test]
    fn test_parse_query_prefix_applies_to_last_token() {
        let terms = parse_query("git-rebas*");
        assert_eq!(
            terms,
            vec![
                Term { text: "git".into(), prefix: false },
                Term { text: "rebas".into(), prefix: true },
            ]
        );
    }

    #[test]
    fn test_exact_term_scan_includes_separator() {
        let exact = Term { text: "go".into(), prefix: false };
        let prefix = Term { text: "go".into(), prefix: true };
        assert_eq!(exact.scan_prefix(), b"go\0".to_vec());
        assert_eq!(prefix.scan_prefix(), b"go".to_vec());
    }
}
