//! # neatfmt
//!
//! Text-processing cores for a pair of developer utilities: a JSON
//! repair/formatter and a SQL/MongoDB pretty-printer with lightweight
//! syntax highlighting.
//!
//! The JSON engine accepts the kinds of malformed input people actually
//! paste into a formatter:
//!
//! - a leading byte-order mark,
//! - surrounding whitespace,
//! - "bare-escaped" documents whose structural quotes are escaped as if
//!   the whole text were a string literal (`{\"a\":1}`),
//! - documents that were JSON-encoded twice,
//! - stray newlines inside quoted keys and values.
//!
//! Repairs that run automatically are validated by parsing and reverted
//! if they do not help; the explicit [`JsonFormatter::fix`] pipeline
//! applies a selected repair unconditionally and returns a log of what it
//! did.
//!
//! ## Command-Line Tool
//!
//! The `nfmt` binary formats JSON, SQL, or MongoDB queries from stdin or
//! files:
//!
//! ```sh
//! echo '{"a":1}' | nfmt
//! nfmt --lang sql query.sql
//! nfmt --lang sql --highlight query.sql
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use neatfmt::{JsonFormatter, SqlFormatter};
//!
//! let json = JsonFormatter::new();
//! assert_eq!(json.reformat("{\"a\":1}").unwrap(), "{\n    \"a\": 1\n}");
//!
//! let sql = SqlFormatter::new();
//! let out = sql.reformat("select id from t where a=1 and b=2").unwrap();
//! assert_eq!(out, "SELECT\n    id\nFROM t\nWHERE a=1\n    AND b=2;");
//! ```
//!
//! ## Repairing Broken Input
//!
//! ```rust
//! use neatfmt::{FixKind, JsonFormatter};
//!
//! let report = JsonFormatter::new().fix("a\r\nb\rc\n", FixKind::NormalizeNewlines);
//! assert_eq!(report.text, "a\nb\nc\n");
//! assert!(report.error.is_some()); // still not JSON, and the report says so
//! ```
//!
//! The two cores are invoked independently; the only internal overlap is
//! that the Mongo branch reuses the JSON core to lay out object-literal
//! arguments.

mod convert;
mod error;
mod formatter;
mod highlight;
mod model;
mod mongo;
mod options;
mod parser;
mod repair;
mod search;
mod sql;
mod tokenizer;
mod writer;

pub use crate::error::{ErrorKind, FormatError};
pub use crate::formatter::JsonFormatter;
pub use crate::highlight::{highlight, HighlightSpan, SpanKind};
pub use crate::model::{InputPosition, JsonValue};
pub use crate::options::{Dialect, FixKind, JsonFormatOptions, KeywordCase, SqlFormatOptions};
pub use crate::repair::{preprocess, FixReport};
pub use crate::search::match_positions;
pub use crate::sql::SqlFormatter;
