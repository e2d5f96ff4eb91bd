use crate::error::FormatError;
use crate::model::{InputPosition, JsonToken, TokenType};

/// Splits JSON input into a token list.
///
/// Strings are returned as their raw lexeme, quotes included, with escape
/// sequences validated but not decoded; the parser decodes them. Numbers
/// keep their lexeme as well. Comments are not part of the grammar, so a
/// `/` is reported as an unexpected character like any other.
pub(crate) fn tokenize(text: &str) -> Result<Vec<JsonToken>, FormatError> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    while let Some(token) = scanner.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    row: usize,
    column: usize,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self { chars: text.chars().collect(), pos: 0, row: 0, column: 0 }
    }

    fn position(&self) -> InputPosition {
        InputPosition { index: self.pos, row: self.row, column: self.column }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        if self.peek() == Some('\n') {
            self.row += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn error(&self, message: &str) -> FormatError {
        FormatError::parse(message, Some(self.position()))
    }

    fn lexeme_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn next_token(&mut self) -> Result<Option<JsonToken>, FormatError> {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.bump();
        }
        let ch = match self.peek() {
            None => return Ok(None),
            Some(ch) => ch,
        };
        let token = match ch {
            '{' => self.single(TokenType::BeginObject, "{"),
            '}' => self.single(TokenType::EndObject, "}"),
            '[' => self.single(TokenType::BeginArray, "["),
            ']' => self.single(TokenType::EndArray, "]"),
            ':' => self.single(TokenType::Colon, ":"),
            ',' => self.single(TokenType::Comma, ","),
            't' => self.keyword(TokenType::True, "true")?,
            'f' => self.keyword(TokenType::False, "false")?,
            'n' => self.keyword(TokenType::Null, "null")?,
            '"' => self.string()?,
            '-' | '0'..='9' => self.number()?,
            _ => return Err(self.error("unexpected character")),
        };
        Ok(Some(token))
    }

    fn single(&mut self, token_type: TokenType, text: &str) -> JsonToken {
        let token = JsonToken {
            token_type,
            text: text.to_string(),
            input_position: self.position(),
        };
        self.bump();
        token
    }

    fn keyword(&mut self, token_type: TokenType, word: &str) -> Result<JsonToken, FormatError> {
        let position = self.position();
        for expected in word.chars() {
            if self.peek() != Some(expected) {
                return Err(self.error("unexpected keyword"));
            }
            self.bump();
        }
        Ok(JsonToken { token_type, text: word.to_string(), input_position: position })
    }

    fn string(&mut self) -> Result<JsonToken, FormatError> {
        let position = self.position();
        let start = self.pos;
        self.bump();
        loop {
            let ch = match self.peek() {
                None => return Err(self.error("unexpected end of input in string")),
                Some(ch) => ch,
            };
            if is_control(ch) {
                return Err(self.error("control character in string"));
            }
            self.bump();
            match ch {
                '"' => {
                    return Ok(JsonToken {
                        token_type: TokenType::String,
                        text: self.lexeme_from(start),
                        input_position: position,
                    });
                }
                '\\' => self.escape()?,
                _ => {}
            }
        }
    }

    fn escape(&mut self) -> Result<(), FormatError> {
        match self.peek() {
            Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {
                self.bump();
                Ok(())
            }
            Some('u') => {
                self.bump();
                for _ in 0..4 {
                    if !matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                        return Err(self.error("bad unicode escape in string"));
                    }
                    self.bump();
                }
                Ok(())
            }
            _ => Err(self.error("bad escaped character in string")),
        }
    }

    fn number(&mut self) -> Result<JsonToken, FormatError> {
        let position = self.position();
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        match self.peek() {
            Some('0') => self.bump(),
            Some('1'..='9') => self.digits(),
            _ => return Err(self.error("bad character in number")),
        }
        if self.peek() == Some('.') {
            self.bump();
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.error("digit expected after decimal point"));
            }
            self.digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.error("digit expected in exponent"));
            }
            self.digits();
        }
        Ok(JsonToken {
            token_type: TokenType::Number,
            text: self.lexeme_from(start),
            input_position: position,
        })
    }

    fn digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
    }
}

fn is_control(ch: char) -> bool {
    let code = ch as u32;
    code <= 0x1F || code == 0x7F || (0x80..=0x9F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_simple_object() {
        let tokens = tokenize(r#"{"a": 1}"#).unwrap();
        let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(
            types,
            vec![
                TokenType::BeginObject,
                TokenType::String,
                TokenType::Colon,
                TokenType::Number,
                TokenType::EndObject,
            ]
        );
        assert_eq!(tokens[1].text, r#""a""#);
    }

    #[test]
    fn rejects_comments() {
        assert!(tokenize("// nope\n{}").is_err());
    }

    #[test]
    fn rejects_truncated_string() {
        let err = tokenize(r#""abc"#).unwrap_err();
        assert!(err.message.contains("unexpected end of input"));
    }

    #[test]
    fn keeps_number_lexemes() {
        let tokens = tokenize("[1e3, -0.50]").unwrap();
        assert_eq!(tokens[1].text, "1e3");
        assert_eq!(tokens[3].text, "-0.50");
    }

    #[test]
    fn positions_track_rows() {
        let tokens = tokenize("{\n  \"a\": 1\n}").unwrap();
        assert_eq!(tokens[1].input_position.row, 1);
        assert_eq!(tokens[1].input_position.column, 2);
    }
}
