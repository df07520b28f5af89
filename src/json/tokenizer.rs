//! Splits an in-memory JSON document into tokens.
//!
//! Token boundaries are found by scanning the buffer; string literals are
//! decoded by `serde_json`, numbers are kept as written.

use std::fmt;

use crate::error::{SerializerError, SerializerResult};

const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    Colon,
    Comma,
    String(String),
    /// A numeric literal, as written in the document.
    Number(String),
    True,
    False,
    Null,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::BeginArray => write!(f, "'['"),
            Token::EndArray => write!(f, "']'"),
            Token::BeginObject => write!(f, "'{{'"),
            Token::EndObject => write!(f, "'}}'"),
            Token::Colon => write!(f, "':'"),
            Token::Comma => write!(f, "','"),
            Token::String(value) => write!(f, "string {:?}", value),
            Token::Number(value) => write!(f, "number {}", value),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
        }
    }
}

/// Pull tokenizer over a complete JSON document.
///
/// # Examples
///
/// ```
/// use list_serializer::json::tokenizer::{Token, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new(br#"[{"Data": null}]"#);
///
/// assert_eq!(tokenizer.next_token().unwrap(), Some(Token::BeginArray));
/// assert_eq!(tokenizer.next_token().unwrap(), Some(Token::BeginObject));
/// assert_eq!(tokenizer.next_token().unwrap(), Some(Token::String("Data".to_string())));
/// assert_eq!(tokenizer.next_token().unwrap(), Some(Token::Colon));
/// assert_eq!(tokenizer.next_token().unwrap(), Some(Token::Null));
/// ```
pub struct Tokenizer<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        let position = if buffer.starts_with(BOM) { BOM.len() } else { 0 };
        Self { buffer, position }
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the next token, or `None` once only whitespace is left.
    pub fn next_token(&mut self) -> SerializerResult<Option<Token>> {
        self.skip_whitespace();

        let Some(&current) = self.buffer.get(self.position) else {
            return Ok(None);
        };

        let token = match current {
            b'[' => self.single(Token::BeginArray),
            b']' => self.single(Token::EndArray),
            b'{' => self.single(Token::BeginObject),
            b'}' => self.single(Token::EndObject),
            b':' => self.single(Token::Colon),
            b',' => self.single(Token::Comma),
            b'"' => self.string()?,
            b'-' | b'0'..=b'9' => self.number(),
            b't' => self.literal(b"true", Token::True)?,
            b'f' => self.literal(b"false", Token::False)?,
            b'n' => self.literal(b"null", Token::Null)?,
            other => {
                return Err(self.error(format!("unexpected character '{}'", other as char)));
            }
        };
        Ok(Some(token))
    }

    fn error(&self, message: String) -> SerializerError {
        SerializerError::Format(format!("{} at byte {}", message, self.position))
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.buffer.get(self.position) {
            self.position += 1;
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.position += 1;
        token
    }

    fn string(&mut self) -> SerializerResult<Token> {
        let start = self.position;
        let mut end = start + 1;
        loop {
            match self.buffer.get(end) {
                Some(b'"') => break,
                Some(b'\\') => end += 2,
                Some(_) => end += 1,
                None => return Err(self.error("unterminated string".to_string())),
            }
        }

        let value: String = serde_json::from_slice(&self.buffer[start..=end])
            .map_err(|error| self.error(format!("invalid string ({})", error)))?;
        self.position = end + 1;
        Ok(Token::String(value))
    }

    fn number(&mut self) -> Token {
        let start = self.position;
        while let Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') = self.buffer.get(self.position) {
            self.position += 1;
        }
        Token::Number(String::from_utf8_lossy(&self.buffer[start..self.position]).into_owned())
    }

    fn literal(&mut self, expected: &[u8], token: Token) -> SerializerResult<Token> {
        if self.buffer[self.position..].starts_with(expected) {
            self.position += expected.len();
            Ok(token)
        } else {
            Err(self.error("invalid literal".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(json: &str) -> SerializerResult<Vec<Token>> {
        let mut tokenizer = Tokenizer::new(json.as_bytes());
        let mut tokens = Vec::new();
        while let Some(token) = tokenizer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    #[test]
    fn record_should_be_tokenized() {
        let tokens = tokens(r#"[ { "Index": 12, "RandomIndex": null, "Data": "x" } ]"#).unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::BeginArray,
                Token::BeginObject,
                Token::String("Index".to_string()),
                Token::Colon,
                Token::Number("12".to_string()),
                Token::Comma,
                Token::String("RandomIndex".to_string()),
                Token::Colon,
                Token::Null,
                Token::Comma,
                Token::String("Data".to_string()),
                Token::Colon,
                Token::String("x".to_string()),
                Token::EndObject,
                Token::EndArray,
            ]
        );
    }

    #[test]
    fn escaped_strings_should_be_decoded() {
        let tokens = tokens(r#""quote \" slash \\ é 😀""#).unwrap();
        assert_eq!(tokens, vec![Token::String("quote \" slash \\ é 😀".to_string())]);
    }

    #[test]
    fn literals_should_be_recognized() {
        let tokens = tokens("true false null -3").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::True,
                Token::False,
                Token::Null,
                Token::Number("-3".to_string())
            ]
        );
    }

    #[test]
    fn byte_order_mark_should_be_skipped() {
        let tokens = tokens("\u{feff}[]").unwrap();
        assert_eq!(tokens, vec![Token::BeginArray, Token::EndArray]);
    }

    #[test]
    fn malformed_input_should_fail() {
        assert!(matches!(tokens(r#""open"#), Err(SerializerError::Format(_))));
        assert!(matches!(tokens("nul"), Err(SerializerError::Format(_))));
        assert!(matches!(tokens("@"), Err(SerializerError::Format(_))));
    }
}
