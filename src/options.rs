/// Case applied to recognized SQL keywords during formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCase {
    /// `SELECT`, `FROM`, ... This is the default.
    Upper,
    /// `select`, `from`, ...
    Lower,
}

/// Which query-language grammar to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// MySQL and Doris, which share one grammar here.
    MySql,
    /// MongoDB object-literal filters and method-chain queries.
    Mongo,
}

/// One selectable repair step (or all of them) for
/// [`JsonFormatter::fix`](crate::JsonFormatter::fix).
///
/// Steps always run in the order they are declared here; selecting a single
/// step runs only that step but still logs whether it changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixKind {
    /// Apply every repair step in order.
    All,
    /// Strip a single leading byte-order mark.
    RemoveBom,
    /// Trim leading/trailing whitespace.
    TrimWhitespace,
    /// Unescape a bare-escaped document (one that starts with `{\"` or
    /// `[\"`), stripping unescaped newlines first. Unlike the automatic
    /// preprocessing path, the transform is not reverted if the result
    /// still fails to parse.
    FixEscapedJson,
    /// Remove newlines embedded inside quoted keys and quoted values.
    FixNewlines,
    /// Normalize `\r\n` and `\r` line endings to `\n`.
    NormalizeNewlines,
    /// Collapse runs of 3+ consecutive newlines down to exactly 2.
    RemoveEmptyLines,
}

/// Configuration for the JSON formatter.
///
/// # Example
///
/// ```rust
/// use neatfmt::JsonFormatOptions;
///
/// let mut options = JsonFormatOptions::default();
/// options.indent_spaces = 2;
/// ```
#[derive(Debug, Clone)]
pub struct JsonFormatOptions {
    /// Number of spaces per indentation level (2, 4, or 8). Default: 4.
    pub indent_spaces: usize,

    /// Emit compressed output with no whitespace instead of indented
    /// output. Default: false.
    pub compress: bool,
}

impl Default for JsonFormatOptions {
    fn default() -> Self {
        Self { indent_spaces: 4, compress: false }
    }
}

/// Configuration for the SQL formatter.
///
/// The statement indent is fixed at 4 spaces; only keyword case, dialect,
/// and inter-statement spacing are configurable.
#[derive(Debug, Clone)]
pub struct SqlFormatOptions {
    /// Case applied to recognized keywords. Default: [`KeywordCase::Upper`].
    pub keyword_case: KeywordCase,

    /// Query grammar to apply. Default: [`Dialect::MySql`].
    pub dialect: Dialect,

    /// Number of blank lines between consecutive statements. Default: 1.
    pub blank_lines_between: usize,
}

impl Default for SqlFormatOptions {
    fn default() -> Self {
        Self {
            keyword_case: KeywordCase::Upper,
            dialect: Dialect::MySql,
            blank_lines_between: 1,
        }
    }
}
