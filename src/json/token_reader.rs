use std::io::Read;

use log::debug;

use crate::{
    core::{
        codec::{RecordReader, RecordReaderResult},
        record::NodeRecord,
    },
    error::{SerializerError, SerializerResult},
};

use super::{
    property::{PropertyValue, RecordAssembler},
    tokenizer::{Token, Tokenizer},
};

/// A reader that loads the whole source and walks it token by token.
///
/// The document must be an array of record objects. Unlike
/// [`JsonScannerReader`](super::JsonScannerReader) it fails as soon as the
/// first token is not the start of an array, and rejects anything after the
/// closing bracket. Trailing commas before `]` or `}` are accepted unless
/// disabled on the builder.
///
/// # Examples
///
/// ```
/// use list_serializer::core::codec::RecordReader;
/// use list_serializer::json::JsonTokenReaderBuilder;
///
/// let json = r#"[{"Index":0,"RandomIndex":0,"Data":"self"},]"#;
///
/// let reader = JsonTokenReaderBuilder::new().build();
/// let records = reader.read_records(&mut json.as_bytes()).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].random_index(), Some(0));
///
/// let strict = JsonTokenReaderBuilder::new().allow_trailing_commas(false).build();
/// assert!(strict.read_records(&mut json.as_bytes()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct JsonTokenReader {
    allow_trailing_commas: bool,
}

impl JsonTokenReader {
    fn unexpected(tokenizer: &Tokenizer, token: Option<Token>, expected: &str) -> SerializerError {
        let found = match token {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        SerializerError::Format(format!(
            "unexpected {} at byte {} (expected {})",
            found,
            tokenizer.position(),
            expected
        ))
    }

    fn read_record(&self, tokenizer: &mut Tokenizer, position: usize) -> SerializerResult<NodeRecord> {
        let mut record = RecordAssembler::new(position);
        let mut expect_property = true;
        let mut after_comma = false;

        loop {
            match tokenizer.next_token()? {
                Some(Token::String(name)) if expect_property => {
                    match tokenizer.next_token()? {
                        Some(Token::Colon) => {}
                        other => return Err(Self::unexpected(tokenizer, other, "':'")),
                    }
                    let value = match tokenizer.next_token()? {
                        Some(Token::Number(raw)) => PropertyValue::Number(raw),
                        Some(Token::String(text)) => PropertyValue::Text(text),
                        Some(Token::Null) => PropertyValue::Null,
                        other => {
                            let expected = format!("a value for property \"{}\"", name);
                            return Err(Self::unexpected(tokenizer, other, &expected));
                        }
                    };
                    record.assign(&name, value)?;
                    expect_property = false;
                    after_comma = false;
                }
                Some(Token::Comma) if !expect_property => {
                    expect_property = true;
                    after_comma = true;
                }
                Some(Token::EndObject) if !after_comma || self.allow_trailing_commas => {
                    return record.finish();
                }
                other => return Err(Self::unexpected(tokenizer, other, "a property or '}'")),
            }
        }
    }
}

impl RecordReader for JsonTokenReader {
    fn read_records(&self, source: &mut dyn Read) -> RecordReaderResult {
        let mut buffer = Vec::new();
        source.read_to_end(&mut buffer)?;

        let mut tokenizer = Tokenizer::new(&buffer);

        match tokenizer.next_token()? {
            Some(Token::BeginArray) => {}
            other => {
                return Err(Self::unexpected(&tokenizer, other, "start of the array"));
            }
        }

        let mut records = Vec::new();
        let mut expect_record = true;
        let mut after_comma = false;

        loop {
            match tokenizer.next_token()? {
                Some(Token::BeginObject) if expect_record => {
                    let record = self.read_record(&mut tokenizer, records.len())?;
                    records.push(record);
                    expect_record = false;
                    after_comma = false;
                }
                Some(Token::Comma) if !expect_record => {
                    expect_record = true;
                    after_comma = true;
                }
                Some(Token::EndArray) if !after_comma || self.allow_trailing_commas => break,
                other => return Err(Self::unexpected(&tokenizer, other, "a record or ']'")),
            }
        }

        if let Some(token) = tokenizer.next_token()? {
            return Err(Self::unexpected(&tokenizer, Some(token), "end of input"));
        }

        debug!("Read {} records from {} bytes", records.len(), buffer.len());
        Ok(records)
    }
}

/// Builder for [`JsonTokenReader`].
#[derive(Debug)]
pub struct JsonTokenReaderBuilder {
    allow_trailing_commas: bool,
}

impl Default for JsonTokenReaderBuilder {
    fn default() -> Self {
        Self {
            allow_trailing_commas: true,
        }
    }
}

impl JsonTokenReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a comma right before `]` or `}` (enabled by default).
    pub fn allow_trailing_commas(mut self, yes: bool) -> Self {
        self.allow_trailing_commas = yes;
        self
    }

    pub fn build(self) -> JsonTokenReader {
        JsonTokenReader {
            allow_trailing_commas: self.allow_trailing_commas,
        }
    }
}
