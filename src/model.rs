/// A parsed JSON value.
///
/// This is the dynamically-typed tree handed to callers after a successful
/// parse: objects and arrays contain further values, everything else is a
/// leaf. Object members keep their source order; duplicate keys are kept in
/// encounter order rather than collapsed.
///
/// Numbers keep their source lexeme so formatting round-trips exactly
/// (`1e3` stays `1e3`, `1.50` stays `1.50`). Use [`JsonValue::as_f64`] for
/// a numeric view.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// JSON `null`.
    Null,
    /// JSON `true` or `false`.
    Bool(bool),
    /// A number, stored as its source lexeme.
    Number(String),
    /// A string, with escape sequences already decoded.
    String(String),
    /// An array of values.
    Array(Vec<JsonValue>),
    /// An object: ordered `(key, value)` pairs in source order.
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    /// Returns the decoded string content if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parses the number lexeme as `f64`, if this is a number value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(lexeme) => lexeme.parse().ok(),
            _ => None,
        }
    }

    /// Looks up the first member with the given key, if this is an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(members) => {
                members.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    String,
    Number,
    True,
    False,
    Null,
    Comma,
    Colon,
}

/// A position within the input text.
///
/// Carried by tokens and errors; all values are zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPosition {
    /// Character offset from the start of the input.
    pub index: usize,
    /// Line number.
    pub row: usize,
    /// Column within the line.
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonToken {
    pub token_type: TokenType,
    pub text: String,
    pub input_position: InputPosition,
}
