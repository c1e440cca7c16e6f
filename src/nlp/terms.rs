//! Keyword terms, the lexical frequency signal for summary prompts.
//!
//! Pipeline per corpus:
//!   skip missing entries → alphabetic-run tokenisation → length filter
//!   (≥ 2 chars) → case-insensitive frequency ranking
//!
//! A term is reported in the spelling it first appeared with (`iOS`, not `ios`).
//!
//! No stemming and no stop words: the terms are only a hint handed to the
//! text generator, and Korean morphology is left to it.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Maximal runs of alphabetic code points (Hangul syllables, Latin, …).
static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Alphabetic}+").expect("WORD_REGEX: invalid pattern"));

/// Tokens shorter than this (in chars) are dropped.
const MIN_TERM_CHARS: usize = 2;

/// A term with its number of occurrences in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermFrequency {
    pub term: String,
    pub count: usize,
}

/// Split `text` into alphabetic tokens of at least two characters, case kept.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
        .collect()
}

/// Rank the terms of `texts` by descending frequency and keep the first `limit`.
///
/// Missing entries are skipped. Counting ignores case; the displayed term is
/// its first-seen spelling. Ties keep the order in which the terms first
/// appear across the concatenated input.
pub fn top_terms<'a, I>(texts: I, limit: usize) -> Vec<TermFrequency>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    // folded term → (first spelling, count, first position)
    let mut counts: HashMap<String, (String, usize, usize)> = HashMap::new();
    let mut position = 0usize;

    for text in texts.into_iter().flatten() {
        for token in tokenize(text) {
            let entry = counts
                .entry(token.to_lowercase())
                .or_insert_with(|| (token.to_string(), 0, position));
            entry.1 += 1;
            position += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = counts.into_values().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(term, count, _)| TermFrequency { term, count })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
