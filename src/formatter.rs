use crate::convert::from_serde_value;
use crate::error::FormatError;
use crate::model::JsonValue;
use crate::options::{FixKind, JsonFormatOptions};
use crate::repair::{self, FixReport};
use crate::writer;

const SERIALIZE_RECURSION_LIMIT: usize = 256;

/// The JSON repair-and-format engine.
///
/// `JsonFormatter` accepts possibly-malformed JSON text, repairs what it
/// can, and produces indented or compressed output according to
/// [`JsonFormatOptions`].
///
/// # Example
///
/// ```rust
/// use neatfmt::JsonFormatter;
///
/// let formatter = JsonFormatter::new();
///
/// let output = formatter.reformat("{\"a\":1}").unwrap();
/// assert_eq!(output, "{\n    \"a\": 1\n}");
///
/// let compact = formatter.minify("{ \"a\": 1 }").unwrap();
/// assert_eq!(compact, "{\"a\":1}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Configuration applied by the formatting methods.
    pub options: JsonFormatOptions,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses possibly-malformed text into a value tree.
    ///
    /// Input runs through the repair preprocessor first (BOM removal,
    /// whitespace trim, bare-escape reversal), and a document that was
    /// JSON-encoded twice is decoded twice.
    ///
    /// # Example
    ///
    /// ```rust
    /// use neatfmt::JsonFormatter;
    ///
    /// let value = JsonFormatter::new().parse("\u{FEFF} {\"a\": 1} ").unwrap();
    /// assert!(value.is_object());
    /// ```
    pub fn parse(&self, text: &str) -> Result<JsonValue, FormatError> {
        repair::parse(text)
    }

    /// Formats text according to the current options: indented by default,
    /// compressed when `options.compress` is set.
    pub fn reformat(&self, text: &str) -> Result<String, FormatError> {
        let value = repair::parse(text)?;
        if self.options.compress {
            Ok(writer::to_compact(&value))
        } else {
            Ok(writer::to_pretty(&value, self.options.indent_spaces))
        }
    }

    /// Formats text with all whitespace removed, regardless of options.
    pub fn minify(&self, text: &str) -> Result<String, FormatError> {
        let value = repair::parse(text)?;
        Ok(writer::to_compact(&value))
    }

    /// Applies the selected repair step (or all of them) and reports what
    /// happened.
    ///
    /// Unlike [`parse`](Self::parse), the repairs are not reverted when the
    /// result still fails to parse: the report carries the partially-fixed
    /// text, the step log, and the validation error so the caller can
    /// surface all three.
    pub fn fix(&self, text: &str, kind: FixKind) -> FixReport {
        repair::fix(text, kind)
    }

    /// Formats any serializable value directly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use neatfmt::JsonFormatter;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Player {
    ///     name: String,
    ///     score: i32,
    /// }
    ///
    /// let player = Player { name: "Alice".into(), score: 95 };
    /// let output = JsonFormatter::new().serialize(&player).unwrap();
    /// assert_eq!(output, "{\n    \"name\": \"Alice\",\n    \"score\": 95\n}");
    /// ```
    pub fn serialize<T: serde::Serialize>(&self, value: &T) -> Result<String, FormatError> {
        let serde_value = serde_json::to_value(value)
            .map_err(|e| FormatError::parse(format!("serialize failed: {}", e), None))?;
        let tree = from_serde_value(&serde_value, SERIALIZE_RECURSION_LIMIT)?;
        if self.options.compress {
            Ok(writer::to_compact(&tree))
        } else {
            Ok(writer::to_pretty(&tree, self.options.indent_spaces))
        }
    }
}
