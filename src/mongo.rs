//! MongoDB query formatting.
//!
//! Two input shapes: a bare object/array literal (a query filter), or a
//! method-chain expression such as `db.coll.find({...}).sort({...})`. The
//! literal path quotes identifier-style keys and goes through the JSON
//! core; the chain path walks the text with quote-aware bracket matching
//! so commas and closers inside string literals cannot derail it.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FormatError;
use crate::repair;
use crate::writer;

const INDENT: &str = "    ";
const MONGO_INDENT_SPACES: usize = 4;

// An unquoted identifier-style key after `{` or `,`.
static UNQUOTED_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\{,]\s*)([A-Za-z_$][A-Za-z0-9_$]*)\s*:"#).unwrap());

pub(crate) fn format_query(input: &str) -> Result<String, FormatError> {
    let trimmed = input.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        format_object_literal(trimmed, 0)
    } else {
        Ok(format_method_chain(trimmed))
    }
}

/// Formats a bare object/array literal with fixed 4-space indentation.
/// Continuation lines are shifted right by `base_indent` spaces so the
/// result can be embedded inside a method call.
fn format_object_literal(text: &str, base_indent: usize) -> Result<String, FormatError> {
    let quoted = UNQUOTED_KEY_RE.replace_all(text, "$1\"$2\":");
    let value = repair::parse(&quoted)?;
    let pretty = writer::to_pretty(&value, MONGO_INDENT_SPACES);
    if base_indent == 0 {
        return Ok(pretty);
    }
    let prefix = " ".repeat(base_indent);
    let mut lines = pretty.lines();
    let mut out = String::with_capacity(pretty.len());
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        out.push_str(&prefix);
        out.push_str(line);
    }
    Ok(out)
}

fn format_method_chain(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch.is_whitespace() {
            let mut j = i;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            // Keep a separator between adjacent identifiers (`new Date`),
            // drop it everywhere else.
            let prev_ident = out.chars().last().is_some_and(is_identifier_char);
            let next_ident = chars.get(j).copied().is_some_and(is_identifier_char);
            if prev_ident && next_ident {
                out.push(' ');
            }
            i = j;
            continue;
        }

        if is_quote(ch) {
            let end = string_end(&chars, i);
            out.extend(&chars[i..end]);
            i = end;
            continue;
        }

        if ch == '.' && is_method_call(&chars, i) {
            out.push('\n');
            out.push_str(INDENT);
            out.push('.');
            i += 1;
            continue;
        }

        if ch == '(' {
            match matching_close(&chars, i) {
                Some(close) => {
                    let inner: String = chars[i + 1..close].iter().collect();
                    out.push('(');
                    out.push_str(&format_arguments(&inner));
                    out.push(')');
                    i = close + 1;
                    continue;
                }
                None => {
                    // Unbalanced; copy the rest through untouched.
                    out.extend(&chars[i..]);
                    break;
                }
            }
        }

        out.push(ch);
        i += 1;
    }

    out
}

/// Formats the comma-separated arguments of one call. Object and array
/// arguments go through the literal path (indented to the chain depth);
/// anything else, or a literal that fails to parse, is kept verbatim.
fn format_arguments(inner: &str) -> String {
    if inner.trim().is_empty() {
        return String::new();
    }
    let arguments = split_arguments(inner);
    let mut parts = Vec::with_capacity(arguments.len());
    for argument in arguments {
        let trimmed = argument.trim();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            match format_object_literal(trimmed, INDENT.len()) {
                Ok(formatted) => parts.push(formatted),
                Err(_) => parts.push(trimmed.to_string()),
            }
        } else {
            parts.push(trimmed.to_string());
        }
    }
    parts.join(", ")
}

/// True when the `.` at `at` begins a chained method call: an identifier
/// run immediately followed by `(`. Plain property access stays inline.
fn is_method_call(chars: &[char], at: usize) -> bool {
    let mut j = at + 1;
    while j < chars.len() && is_identifier_char(chars[j]) {
        j += 1;
    }
    j > at + 1 && chars.get(j) == Some(&'(')
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

fn is_quote(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '`')
}

/// Index one past the closing quote of the string starting at `start`.
fn string_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    let mut escaped = false;
    while i < chars.len() {
        let ch = chars[i];
        i += 1;
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            break;
        }
    }
    i
}

/// Finds the closer matching the bracket at `open`, skipping string
/// literal content.
fn matching_close(chars: &[char], open: usize) -> Option<usize> {
    let close_char = match chars[open] {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        _ => return None,
    };
    let open_char = chars[open];
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        let ch = chars[i];
        if is_quote(ch) {
            i = string_end(chars, i);
            continue;
        }
        if ch == open_char {
            depth += 1;
        } else if ch == close_char {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Splits call arguments on top-level commas, tracking all three bracket
/// kinds and string literals.
fn split_arguments(inner: &str) -> Vec<String> {
    let chars: Vec<char> = inner.chars().collect();
    let mut arguments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if is_quote(ch) {
            let end = string_end(&chars, i);
            current.extend(&chars[i..end]);
            i = end;
            continue;
        }
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                arguments.push(std::mem::take(&mut current));
                i += 1;
                continue;
            }
            _ => {}
        }
        current.push(ch);
        i += 1;
    }
    if !current.trim().is_empty() {
        arguments.push(current);
    }
    arguments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifier_keys_in_literals() {
        let out = format_query("{age: {$gt: 21}, name: \"x\"}").unwrap();
        assert_eq!(
            out,
            "{\n    \"age\": {\n        \"$gt\": 21\n    },\n    \"name\": \"x\"\n}"
        );
    }

    #[test]
    fn method_chain_breaks_before_calls_only() {
        let out = format_method_chain("db.users.find({}).sort({})");
        assert_eq!(out, "db.users\n    .find({})\n    .sort({})");
    }

    #[test]
    fn commas_inside_strings_do_not_split_arguments() {
        let arguments = split_arguments(r#""a,b", 2"#);
        assert_eq!(arguments, vec![r#""a,b""#.to_string(), " 2".to_string()]);
    }

    #[test]
    fn matching_close_skips_string_content() {
        let chars: Vec<char> = r#"("a)b")"#.chars().collect();
        assert_eq!(matching_close(&chars, 0), Some(6));
    }
}
