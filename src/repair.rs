//! Repair pipeline for malformed JSON text.
//!
//! Two entry points: [`preprocess`]/[`parse`] run automatically before
//! formatting and only keep transforms that produce parseable text, while
//! [`fix`] applies a caller-selected repair step (or all of them)
//! unconditionally and reports what happened in an ordered log.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FormatError;
use crate::model::JsonValue;
use crate::options::FixKind;
use crate::parser::parse_str;

/// A document whose structural quotes are escaped as though the whole text
/// were itself a string literal, but without the enclosing quotes.
static BARE_ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[\{\[]\\""#).unwrap());

// An unescaped newline is one preceded by a non-backslash character.
static LF_AFTER_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\\])\n").unwrap());
static CRLF_AFTER_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\\])\r\n").unwrap());
static CR_AFTER_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\\])\r").unwrap());

// A newline inside a quoted key: quote, non-quote run, newline, non-quote
// run, quote, colon. Values are the same pattern after a colon.
static KEY_NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\n]*)\n([^"]*)"(\s*:)"#).unwrap());
static VALUE_NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#":(\s*)"([^"\n]*)\n([^"]*)""#).unwrap());

static EXTRA_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Result of a [`fix`](crate::JsonFormatter::fix) run.
///
/// The text is always populated, even when validation failed, so callers
/// can surface the partially-repaired input for manual follow-up.
#[derive(Debug, Clone)]
pub struct FixReport {
    /// The (possibly partially) repaired text.
    pub text: String,
    /// One human-readable line per repair step that ran, plus a final
    /// validation line.
    pub log: Vec<String>,
    /// Set when the repaired text still fails to parse.
    pub error: Option<FormatError>,
}

/// Normalizes malformed JSON text ahead of parsing.
///
/// Strips a leading byte-order mark, trims whitespace, and unescapes a
/// bare-escaped document. The unescape transform is validated by parsing:
/// if the result does not parse, the trimmed text is returned unchanged
/// rather than half-transformed.
pub fn preprocess(text: &str) -> String {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let trimmed = text.trim();
    if !BARE_ESCAPE_RE.is_match(trimmed) {
        return trimmed.to_string();
    }
    let unescaped = unescape_bare(&strip_unescaped_newlines(trimmed));
    if parse_str(&unescaped).is_ok() {
        unescaped
    } else {
        trimmed.to_string()
    }
}

/// Parses text after [`preprocess`], retrying once on a doubly-encoded
/// document.
///
/// If the top-level value is itself a string, the document was JSON-encoded
/// twice; the inner string is preprocessed and parsed again. A failure in
/// that second pass keeps the first-level string result rather than
/// propagating the inner error.
pub(crate) fn parse(text: &str) -> Result<JsonValue, FormatError> {
    let value = parse_str(&preprocess(text))?;
    if let JsonValue::String(inner) = &value {
        if let Ok(inner_value) = parse_str(&preprocess(inner)) {
            return Ok(inner_value);
        }
    }
    Ok(value)
}

/// Applies the selected repair step (or all of them, in order) and
/// validates the result with a final parse.
pub(crate) fn fix(text: &str, kind: FixKind) -> FixReport {
    let single = kind != FixKind::All;
    let mut out = text.to_string();
    let mut log = Vec::new();

    if matches!(kind, FixKind::All | FixKind::RemoveBom) {
        let changed = out.starts_with('\u{FEFF}');
        if let Some(stripped) = out.strip_prefix('\u{FEFF}') {
            out = stripped.to_string();
        }
        step_log(&mut log, single, changed, "removed byte-order mark", "no byte-order mark found");
    }

    if matches!(kind, FixKind::All | FixKind::TrimWhitespace) {
        let trimmed = out.trim().to_string();
        let changed = trimmed.len() != out.len();
        if changed {
            out = trimmed;
        }
        step_log(
            &mut log,
            single,
            changed,
            "trimmed leading/trailing whitespace",
            "no surrounding whitespace to trim",
        );
    }

    if matches!(kind, FixKind::All | FixKind::FixEscapedJson) {
        if BARE_ESCAPE_RE.is_match(&out) {
            out = unescape_bare(&strip_unescaped_newlines(&out));
            log.push("unescaped bare-escaped document".to_string());
        } else if single {
            log.push("no bare-escaped document detected".to_string());
        }
    }

    if matches!(kind, FixKind::All | FixKind::FixNewlines) {
        let mut changed = false;
        loop {
            let pass = KEY_NEWLINE_RE.replace_all(&out, "\"$1$2\"$3").into_owned();
            let pass = VALUE_NEWLINE_RE.replace_all(&pass, ":$1\"$2$3\"").into_owned();
            if pass == out {
                break;
            }
            out = pass;
            changed = true;
        }
        step_log(
            &mut log,
            single,
            changed,
            "removed newlines inside quoted keys/values",
            "no newlines inside quoted keys/values",
        );
    }

    if matches!(kind, FixKind::All | FixKind::NormalizeNewlines) {
        let normalized = out.replace("\r\n", "\n").replace('\r', "\n");
        let changed = normalized != out;
        out = normalized;
        step_log(
            &mut log,
            single,
            changed,
            "normalized line endings to \\n",
            "line endings already normalized",
        );
    }

    if matches!(kind, FixKind::All | FixKind::RemoveEmptyLines) {
        let collapsed = EXTRA_NEWLINES_RE.replace_all(&out, "\n\n").into_owned();
        let changed = collapsed != out;
        out = collapsed;
        step_log(
            &mut log,
            single,
            changed,
            "collapsed runs of blank lines",
            "no runs of blank lines",
        );
    }

    let error = match parse_str(&out) {
        Ok(_) => {
            let before = text.chars().count();
            let after = out.chars().count();
            let delta = if after < before {
                format!("reduced by {} characters", before - after)
            } else if after > before {
                format!("increased by {} characters", after - before)
            } else {
                "length unchanged".to_string()
            };
            log.push(format!("result parses as valid JSON ({})", delta));
            None
        }
        Err(parse_error) => {
            log.push(format!("result still fails to parse: {}", parse_error));
            Some(FormatError::fix_validation(format!(
                "fix did not produce valid JSON: {}",
                parse_error
            )))
        }
    };

    FixReport { text: out, log, error }
}

fn step_log(log: &mut Vec<String>, single: bool, changed: bool, did: &str, skipped: &str) {
    if changed {
        log.push(did.to_string());
    } else if single {
        log.push(skipped.to_string());
    }
}

/// Removes newlines preceded by a non-backslash character, in three passes
/// covering `\n`, `\r\n`, and `\r`.
fn strip_unescaped_newlines(text: &str) -> String {
    let pass = LF_AFTER_CHAR_RE.replace_all(text, "$1");
    let pass = CRLF_AFTER_CHAR_RE.replace_all(&pass, "$1");
    CR_AFTER_CHAR_RE.replace_all(&pass, "$1").into_owned()
}

/// Reverses one level of string escaping with a single forward scan:
/// `\\` becomes `\`, `\"` becomes `"`, anything else is copied through.
fn unescape_bare(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            Some('"') => {
                chars.next();
                out.push('"');
            }
            _ => out.push('\\'),
        }
    }
    out
}
