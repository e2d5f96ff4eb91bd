//! Lexical span classification for already-formatted query text.
//!
//! The MySQL/Doris path collects every match class over a line, sorts by
//! start offset, and resolves overlaps leftmost-first: a match starting
//! before the previous accepted match's end is dropped. Collection order
//! (string, number, function, keyword) is what breaks ties at equal start
//! offsets, so `SUM(` classifies as a function even though `SUM` is also
//! a keyword. The Mongo path locates string literals first and drops any
//! keyword/operator match that touches one.

use std::sync::LazyLock;

use regex::Regex;

use crate::options::Dialect;
use crate::sql;

/// Classification of one highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Keyword,
    Function,
    StringLit,
    NumberLit,
}

/// A classified region of one line; offsets are byte offsets within the
/// line. Text not covered by any span is plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

static STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#).unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap());
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({})\s*\(", sql::FUNCTIONS.join("|"))).unwrap()
});
static MONGO_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$[A-Za-z]+|\b(?:db|find|findOne|insertOne|insertMany|updateOne|updateMany|deleteOne|deleteMany|replaceOne|aggregate|countDocuments|distinct|sort|limit|skip|projection)\b",
    )
    .unwrap()
});

/// Classifies every line of `text` for the given dialect.
///
/// # Example
///
/// ```rust
/// use neatfmt::{highlight, Dialect, SpanKind};
///
/// let spans = &highlight("SUM(1)", Dialect::MySql)[0];
/// assert_eq!(spans[0].kind, SpanKind::Function);
/// assert_eq!(spans[1].kind, SpanKind::NumberLit);
/// ```
pub fn highlight(text: &str, dialect: Dialect) -> Vec<Vec<HighlightSpan>> {
    text.lines()
        .map(|line| match dialect {
            Dialect::MySql => highlight_sql_line(line),
            Dialect::Mongo => highlight_mongo_line(line),
        })
        .collect()
}

fn highlight_sql_line(line: &str) -> Vec<HighlightSpan> {
    let mut candidates = Vec::new();
    for m in STRING_RE.find_iter(line) {
        candidates.push(HighlightSpan { start: m.start(), end: m.end(), kind: SpanKind::StringLit });
    }
    for m in NUMBER_RE.find_iter(line) {
        candidates.push(HighlightSpan { start: m.start(), end: m.end(), kind: SpanKind::NumberLit });
    }
    for caps in FUNCTION_RE.captures_iter(line) {
        if let Some(name) = caps.get(1) {
            candidates.push(HighlightSpan {
                start: name.start(),
                end: name.end(),
                kind: SpanKind::Function,
            });
        }
    }
    for m in sql::keyword_regex().find_iter(line) {
        candidates.push(HighlightSpan { start: m.start(), end: m.end(), kind: SpanKind::Keyword });
    }

    // Stable sort keeps collection order for equal starts, so the class
    // collected first wins the tie below.
    candidates.sort_by_key(|span| span.start);
    let mut accepted: Vec<HighlightSpan> = Vec::with_capacity(candidates.len());
    for span in candidates {
        let clear = accepted.last().map_or(true, |prev| span.start >= prev.end);
        if clear {
            accepted.push(span);
        }
    }
    accepted
}

fn highlight_mongo_line(line: &str) -> Vec<HighlightSpan> {
    let strings: Vec<HighlightSpan> = STRING_RE
        .find_iter(line)
        .map(|m| HighlightSpan { start: m.start(), end: m.end(), kind: SpanKind::StringLit })
        .collect();

    let mut spans = strings.clone();
    for m in MONGO_WORD_RE.find_iter(line) {
        let inside_string = strings
            .iter()
            .any(|s| m.start() < s.end && m.end() > s.start);
        if !inside_string {
            spans.push(HighlightSpan { start: m.start(), end: m.end(), kind: SpanKind::Keyword });
        }
    }
    for m in NUMBER_RE.find_iter(line) {
        let covered = spans.iter().any(|s| m.start() < s.end && m.end() > s.start);
        if !covered {
            spans.push(HighlightSpan { start: m.start(), end: m.end(), kind: SpanKind::NumberLit });
        }
    }
    spans.sort_by_key(|span| span.start);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_beats_keyword_at_same_start() {
        let spans = highlight_sql_line("SUM(1)");
        assert_eq!(spans[0].kind, SpanKind::Function);
        assert_eq!(&"SUM(1)"[spans[0].start..spans[0].end], "SUM");
    }

    #[test]
    fn string_beats_keyword_it_contains() {
        let spans = highlight_sql_line("WHERE name = 'select'");
        let kinds: Vec<SpanKind> = spans.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SpanKind::Keyword, SpanKind::StringLit]);
    }

    #[test]
    fn leftmost_match_wins_overlaps() {
        // The string literal starts first; the number inside it is dropped.
        let spans = highlight_sql_line("'a 1 b' 2");
        assert_eq!(spans[0].kind, SpanKind::StringLit);
        assert_eq!(spans[1].kind, SpanKind::NumberLit);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn mongo_operators_outside_strings_only() {
        let spans = highlight_mongo_line(r#""$gt": 1, $lt"#);
        let kinds: Vec<SpanKind> = spans.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SpanKind::StringLit, SpanKind::NumberLit, SpanKind::Keyword]
        );
    }
}
