use crate::error::FormatError;
use crate::model::{InputPosition, JsonToken, JsonValue, TokenType};
use crate::tokenizer::tokenize;

/// Parses strict JSON text into a [`JsonValue`].
///
/// Exactly one top-level element is allowed. Object member order is
/// preserved, including duplicate keys.
pub(crate) fn parse_str(text: &str) -> Result<JsonValue, FormatError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.parse_value()?;
    if let Some(extra) = parser.tokens.get(parser.pos) {
        return Err(FormatError::parse(
            "unexpected trailing content",
            Some(extra.input_position),
        ));
    }
    Ok(value)
}

struct Parser {
    tokens: Vec<JsonToken>,
    pos: usize,
}

impl Parser {
    fn next(&mut self) -> Result<JsonToken, FormatError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| FormatError::parse("unexpected end of input", None))?;
        self.pos += 1;
        Ok(token)
    }

    fn peek_type(&self) -> Option<TokenType> {
        self.tokens.get(self.pos).map(|t| t.token_type)
    }

    fn parse_value(&mut self) -> Result<JsonValue, FormatError> {
        let token = self.next()?;
        match token.token_type {
            TokenType::BeginObject => self.parse_object(),
            TokenType::BeginArray => self.parse_array(),
            TokenType::String => {
                let decoded = decode_string(&token.text, token.input_position)?;
                Ok(JsonValue::String(decoded))
            }
            TokenType::Number => Ok(JsonValue::Number(token.text.clone())),
            TokenType::True => Ok(JsonValue::Bool(true)),
            TokenType::False => Ok(JsonValue::Bool(false)),
            TokenType::Null => Ok(JsonValue::Null),
            _ => Err(FormatError::parse(
                format!("unexpected token '{}'", token.text),
                Some(token.input_position),
            )),
        }
    }

    fn parse_object(&mut self) -> Result<JsonValue, FormatError> {
        let mut members = Vec::new();
        if self.peek_type() == Some(TokenType::EndObject) {
            self.pos += 1;
            return Ok(JsonValue::Object(members));
        }
        loop {
            let key_token = self.next()?;
            if key_token.token_type != TokenType::String {
                return Err(FormatError::parse(
                    "expected object key",
                    Some(key_token.input_position),
                ));
            }
            let key = decode_string(&key_token.text, key_token.input_position)?;
            let colon = self.next()?;
            if colon.token_type != TokenType::Colon {
                return Err(FormatError::parse(
                    "expected ':' after object key",
                    Some(colon.input_position),
                ));
            }
            let value = self.parse_value()?;
            members.push((key, value));

            let sep = self.next()?;
            match sep.token_type {
                TokenType::Comma => {}
                TokenType::EndObject => return Ok(JsonValue::Object(members)),
                _ => {
                    return Err(FormatError::parse(
                        "expected ',' or '}' in object",
                        Some(sep.input_position),
                    ));
                }
            }
        }
    }

    fn parse_array(&mut self) -> Result<JsonValue, FormatError> {
        let mut items = Vec::new();
        if self.peek_type() == Some(TokenType::EndArray) {
            self.pos += 1;
            return Ok(JsonValue::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            let sep = self.next()?;
            match sep.token_type {
                TokenType::Comma => {}
                TokenType::EndArray => return Ok(JsonValue::Array(items)),
                _ => {
                    return Err(FormatError::parse(
                        "expected ',' or ']' in array",
                        Some(sep.input_position),
                    ));
                }
            }
        }
    }
}

/// Decodes a string lexeme (quotes included) into its character content.
///
/// The tokenizer has already validated escape shapes, so this only has to
/// resolve them. Surrogate pairs are combined; a lone surrogate becomes
/// U+FFFD rather than an error.
fn decode_string(lexeme: &str, pos: InputPosition) -> Result<String, FormatError> {
    let inner: Vec<char> = lexeme[1..lexeme.len() - 1].chars().collect();
    let mut out = String::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        let ch = inner[i];
        if ch != '\\' {
            out.push(ch);
            i += 1;
            continue;
        }
        i += 1;
        match inner.get(i) {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let high = hex4(&inner, i + 1, pos)?;
                i += 4;
                if (0xD800..=0xDBFF).contains(&high) {
                    // Expect a low surrogate as the next escape.
                    if inner.get(i + 1) == Some(&'\\') && inner.get(i + 2) == Some(&'u') {
                        let low = hex4(&inner, i + 3, pos)?;
                        if (0xDC00..=0xDFFF).contains(&low) {
                            let combined =
                                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                            i += 6;
                        } else {
                            out.push('\u{FFFD}');
                        }
                    } else {
                        out.push('\u{FFFD}');
                    }
                } else if (0xDC00..=0xDFFF).contains(&high) {
                    out.push('\u{FFFD}');
                } else {
                    out.push(char::from_u32(high).unwrap_or('\u{FFFD}'));
                }
            }
            _ => {
                return Err(FormatError::parse("bad escape in string", Some(pos)));
            }
        }
        i += 1;
    }
    Ok(out)
}

fn hex4(chars: &[char], at: usize, pos: InputPosition) -> Result<u32, FormatError> {
    let mut value = 0u32;
    for offset in 0..4 {
        let digit = chars
            .get(at + offset)
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| FormatError::parse("bad unicode escape in string", Some(pos)))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_structure() {
        let value = parse_str(r#"{"a": [1, true, null], "b": {"c": "d"}}"#).unwrap();
        assert_eq!(value.get("a"), Some(&JsonValue::Array(vec![
            JsonValue::Number("1".into()),
            JsonValue::Bool(true),
            JsonValue::Null,
        ])));
        assert_eq!(value.get("b").and_then(|b| b.get("c")).and_then(|c| c.as_str()), Some("d"));
    }

    #[test]
    fn preserves_member_order_and_duplicates() {
        let value = parse_str(r#"{"z": 1, "a": 2, "z": 3}"#).unwrap();
        match value {
            JsonValue::Object(members) => {
                let keys: Vec<&str> = members.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["z", "a", "z"]);
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn decodes_escapes_and_surrogate_pairs() {
        let value = parse_str(r#""line\nbreak é 😀""#).unwrap();
        assert_eq!(value.as_str(), Some("line\nbreak \u{e9} \u{1F600}"));
    }

    #[test]
    fn rejects_second_top_level_element() {
        let err = parse_str("{} []").unwrap_err();
        assert!(err.message.contains("trailing"));
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(parse_str(r#"{"a" 1}"#).is_err());
    }
}
