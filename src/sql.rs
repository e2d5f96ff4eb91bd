//! Regex-driven SQL statement formatter.
//!
//! Structure is rebuilt from scratch: whitespace runs are collapsed,
//! recognized keywords are re-cased, and each statement kind gets its own
//! line layout. Comma-separated lists (columns, value tuples, column
//! definitions) are split on every comma with no awareness of nested
//! parentheses or string literals; that imprecision is inherited behavior,
//! not an accident, and is pinned by the integration tests.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::FormatError;
use crate::mongo;
use crate::options::{Dialect, KeywordCase, SqlFormatOptions};

pub(crate) const KEYWORDS: &[&str] = &[
    "SELECT", "DISTINCT", "FROM", "WHERE", "GROUP", "BY", "HAVING", "ORDER", "LIMIT",
    "OFFSET", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS", "ON", "AS",
    "AND", "OR", "NOT", "IN", "EXISTS", "BETWEEN", "LIKE", "IS", "NULL", "INSERT",
    "INTO", "VALUES", "UPDATE", "SET", "DELETE", "CREATE", "TABLE", "ALTER", "DROP",
    "INDEX", "VIEW", "DATABASE", "PRIMARY", "KEY", "UNIQUE", "DEFAULT", "UNION", "ALL",
    "CASE", "WHEN", "THEN", "ELSE", "END", "ASC", "DESC", "IF", "ADD", "COLUMN",
    "USING", "INT", "BIGINT", "VARCHAR", "CHAR", "TEXT", "DECIMAL", "FLOAT", "DOUBLE",
    "BOOLEAN", "DATE", "DATETIME", "TIMESTAMP",
];

pub(crate) const FUNCTIONS: &[&str] = &[
    "COUNT", "SUM", "AVG", "MIN", "MAX", "ROUND", "FLOOR", "CEIL", "ABS", "LENGTH",
    "UPPER", "LOWER", "TRIM", "LTRIM", "RTRIM", "SUBSTRING", "SUBSTR", "CONCAT",
    "COALESCE", "IFNULL", "NULLIF", "NOW", "CURDATE", "DATE_FORMAT", "DATE_ADD",
    "DATE_SUB", "UNIX_TIMESTAMP", "FROM_UNIXTIME", "CAST", "CONVERT", "GROUP_CONCAT",
    "REPLACE",
];

const INDENT: &str = "    ";

static WS_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RECASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = KEYWORDS.iter().chain(FUNCTIONS).copied().collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).unwrap()
});

// Clause keywords that start a new unindented line. Longer alternatives
// first so "LEFT JOIN" is not consumed as a bare "JOIN".
static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i) (LEFT OUTER JOIN|RIGHT OUTER JOIN|FULL OUTER JOIN|LEFT JOIN|RIGHT JOIN|INNER JOIN|CROSS JOIN|FULL JOIN|JOIN|WHERE|GROUP BY|HAVING|ORDER BY|LIMIT|UNION ALL|UNION)\b",
    )
    .unwrap()
});

static WHERE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bWHERE\b").unwrap());
static AND_OR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i) (AND|OR)\b").unwrap());
static SELECT_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^SELECT(\s+DISTINCT)?\s+").unwrap());
static FROM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bFROM\b").unwrap());
static VALUES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bVALUES\b").unwrap());
static SET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bSET\b").unwrap());
static TUPLE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\)\s*,\s*\(").unwrap());
static CREATE_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^CREATE TABLE\b").unwrap());

pub(crate) fn keyword_regex() -> &'static Regex {
    &RECASE_RE
}

/// The SQL/Mongo pretty-printer.
///
/// # Example
///
/// ```rust
/// use neatfmt::SqlFormatter;
///
/// let formatter = SqlFormatter::new();
/// let output = formatter.reformat("select id,name from t").unwrap();
/// assert_eq!(output, "SELECT\n    id,\n    name\nFROM t;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlFormatter {
    /// Configuration applied by [`reformat`](Self::reformat).
    pub options: SqlFormatOptions,
}

impl SqlFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reformats the input according to the configured dialect.
    ///
    /// The MySQL/Doris path never fails; the Mongo path can return a
    /// parse error for an object-literal query that is not valid JSON
    /// even after key quoting.
    pub fn reformat(&self, input: &str) -> Result<String, FormatError> {
        match self.options.dialect {
            Dialect::MySql => Ok(format_statements(input, &self.options)),
            Dialect::Mongo => mongo::format_query(input),
        }
    }
}

fn format_statements(input: &str, opts: &SqlFormatOptions) -> String {
    let statements: Vec<String> = input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format_statement(s, opts))
        .collect();
    if statements.is_empty() {
        return String::new();
    }
    let separator = format!(";{}", "\n".repeat(opts.blank_lines_between + 1));
    format!("{};", statements.join(&separator))
}

fn format_statement(statement: &str, opts: &SqlFormatOptions) -> String {
    let collapsed = WS_RUN_RE.replace_all(statement.trim(), " ").into_owned();
    let cased = recase_keywords(&collapsed, opts.keyword_case);
    let leading = cased
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_uppercase();
    match leading.as_str() {
        "SELECT" => format_select(&cased),
        "INSERT" => format_insert(&cased),
        "UPDATE" => format_update(&cased),
        "DELETE" => format_delete(&cased),
        "CREATE" | "ALTER" | "DROP" => format_ddl(&cased),
        _ => cased,
    }
}

fn recase_keywords(text: &str, case: KeywordCase) -> String {
    RECASE_RE
        .replace_all(text, |caps: &Captures| {
            let word = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            match case {
                KeywordCase::Upper => word.to_uppercase(),
                KeywordCase::Lower => word.to_lowercase(),
            }
        })
        .into_owned()
}

fn format_select(statement: &str) -> String {
    let (head, tail) = match FROM_RE.find(statement) {
        Some(m) => (
            statement[..m.start()].trim_end(),
            Some(&statement[m.start()..]),
        ),
        None => (statement, None),
    };

    let mut out = String::new();
    match SELECT_HEAD_RE.find(head) {
        Some(m) => {
            out.push_str(head[..m.end()].trim_end());
            let columns = split_list(&head[m.end()..]);
            for (i, column) in columns.iter().enumerate() {
                out.push('\n');
                out.push_str(INDENT);
                out.push_str(column);
                if i + 1 < columns.len() {
                    out.push(',');
                }
            }
        }
        None => out.push_str(head),
    }

    if let Some(tail) = tail {
        out.push('\n');
        out.push_str(&layout_clauses(tail));
    }
    out
}

fn format_insert(statement: &str) -> String {
    let values = match VALUES_RE.find(statement) {
        Some(m) => m,
        None => return statement.to_string(),
    };
    let head = statement[..values.start()].trim_end();
    let keyword = &statement[values.start()..values.end()];
    let tuples = statement[values.end()..].trim();
    let tuples = TUPLE_SPLIT_RE.replace_all(tuples, "),\n    (");
    format!("{}\n{}\n{}{}", head, keyword, INDENT, tuples)
}

fn format_update(statement: &str) -> String {
    let set = match SET_RE.find(statement) {
        Some(m) => m,
        None => return statement.to_string(),
    };
    let head = statement[..set.start()].trim_end();
    let keyword = &statement[set.start()..set.end()];
    let after_set = &statement[set.end()..];
    let (assignments_region, where_region) = match WHERE_RE.find(after_set) {
        Some(w) => (&after_set[..w.start()], Some(&after_set[w.start()..])),
        None => (after_set, None),
    };

    let mut out = format!("{}\n{}", head, keyword);
    let assignments = split_list(assignments_region);
    for (i, assignment) in assignments.iter().enumerate() {
        out.push('\n');
        out.push_str(INDENT);
        out.push_str(assignment);
        if i + 1 < assignments.len() {
            out.push(',');
        }
    }
    if let Some(where_clause) = where_region {
        out.push('\n');
        out.push_str(&indent_conditions(where_clause.trim()));
    }
    out
}

fn format_delete(statement: &str) -> String {
    layout_clauses(statement)
}

fn format_ddl(statement: &str) -> String {
    if !CREATE_TABLE_RE.is_match(statement) {
        return statement.to_string();
    }
    let open = match statement.find('(') {
        Some(i) => i,
        None => return statement.to_string(),
    };
    let close = match statement.rfind(')') {
        Some(i) if i > open => i,
        _ => return statement.to_string(),
    };
    let head = statement[..open].trim_end();
    let definitions = split_list(&statement[open + 1..close]);
    let suffix = statement[close + 1..].trim();

    let mut out = format!("{} (", head);
    for (i, definition) in definitions.iter().enumerate() {
        out.push('\n');
        out.push_str(INDENT);
        out.push_str(definition);
        if i + 1 < definitions.len() {
            out.push(',');
        }
    }
    out.push_str("\n)");
    if !suffix.is_empty() {
        out.push(' ');
        out.push_str(suffix);
    }
    out
}

/// Puts each clause keyword on its own unindented line, then indents
/// AND/OR from the first WHERE onward. OFFSET is intentionally absent from
/// the clause set so it stays inline after LIMIT.
fn layout_clauses(statement: &str) -> String {
    let with_lines = CLAUSE_RE.replace_all(statement, "\n$1").into_owned();
    match WHERE_RE.find(&with_lines) {
        Some(m) => {
            let (head, conditions) = with_lines.split_at(m.end());
            format!("{}{}", head, AND_OR_RE.replace_all(conditions, "\n    $1"))
        }
        None => with_lines,
    }
}

fn indent_conditions(where_clause: &str) -> String {
    AND_OR_RE.replace_all(where_clause, "\n    $1").into_owned()
}

/// Splits on every comma. No nested-paren or string-literal tracking.
fn split_list(region: &str) -> Vec<&str> {
    region
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recase_matches_whole_words_only() {
        let cased = recase_keywords("select selector from from_date", KeywordCase::Upper);
        assert_eq!(cased, "SELECT selector FROM from_date");
    }

    #[test]
    fn recase_lowers_when_asked() {
        let cased = recase_keywords("SELECT X FROM T", KeywordCase::Lower);
        assert_eq!(cased, "select X from T");
    }

    #[test]
    fn clause_layout_keeps_offset_inline() {
        let out = layout_clauses("FROM t WHERE a=1 LIMIT 10 OFFSET 20");
        assert_eq!(out, "FROM t\nWHERE a=1\nLIMIT 10 OFFSET 20");
    }

    #[test]
    fn join_conditions_stay_on_join_line() {
        let out = layout_clauses("FROM a LEFT JOIN b ON a.id = b.id AND b.live = 1 WHERE a.x = 2");
        assert_eq!(
            out,
            "FROM a\nLEFT JOIN b ON a.id = b.id AND b.live = 1\nWHERE a.x = 2"
        );
    }
}
