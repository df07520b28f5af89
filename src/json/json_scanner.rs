use std::io::{self, BufReader, Bytes, Read};

use log::debug;

use crate::{
    core::{
        codec::{RecordReader, RecordReaderResult},
        record::NodeRecord,
    },
    error::{SerializerError, SerializerResult},
};

use super::property::{PropertyValue, RecordAssembler};

/// Default capacity of the buffer placed in front of the byte source.
pub const DEFAULT_CAPACITY: usize = 8 * 1024;

/// A streaming reader that rebuilds records one byte at a time.
///
/// The reader keeps the nesting depth (0 outside of any record, 1 inside a
/// record object) and the properties seen so far in the current record.
/// Quoted tokens alternate between property name and value; letters and
/// digits outside of quotes form unquoted literals such as numbers and
/// `null`. A `,` or `}` inside a record closes the current property, and a
/// `}` bringing the depth back to 0 closes the record.
///
/// It does not validate the full JSON grammar, only what the record format
/// needs, and fails on any nesting deeper than one object.
///
/// # Examples
///
/// ```
/// use list_serializer::core::codec::RecordReader;
/// use list_serializer::json::JsonScannerReaderBuilder;
///
/// let json = r#"[
///   { "Index": 0, "RandomIndex": 1, "Data": "A" },
///   { "Index": 1, "RandomIndex": null, "Data": null }
/// ]"#;
///
/// let reader = JsonScannerReaderBuilder::new().capacity(64).build();
/// let records = reader.read_records(&mut json.as_bytes()).unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].random_index(), Some(1));
/// assert_eq!(records[1].data(), None);
/// ```
#[derive(Debug, Clone)]
pub struct JsonScannerReader {
    capacity: usize,
}

impl RecordReader for JsonScannerReader {
    fn read_records(&self, source: &mut dyn Read) -> RecordReaderResult {
        let reader = BufReader::with_capacity(self.capacity, source);
        let records = Scanner::new(reader.bytes()).run()?;
        debug!("Scanned {} records", records.len());
        Ok(records)
    }
}

/// Parsing state of one `read_records` call.
struct Scanner<R> {
    bytes: Bytes<R>,
    offset: usize,
    depth: usize,
    records: Vec<NodeRecord>,
    record: Option<RecordAssembler>,
    name: Option<String>,
    quoted_value: Option<String>,
    bare_value: String,
}

impl<R: Read> Scanner<R> {
    fn new(bytes: Bytes<R>) -> Self {
        Self {
            bytes,
            offset: 0,
            depth: 0,
            records: Vec::new(),
            record: None,
            name: None,
            quoted_value: None,
            bare_value: String::new(),
        }
    }

    fn run(mut self) -> SerializerResult<Vec<NodeRecord>> {
        while let Some(current) = self.next_byte()? {
            match current {
                b'{' => self.start_object()?,
                b',' | b'}' if self.depth > 0 => {
                    self.end_property()?;
                    if current == b'}' {
                        self.end_object()?;
                    }
                }
                b'"' => {
                    let text = self.read_quoted()?;
                    self.push_quoted(text)?;
                }
                c if is_bare_char(c) => {
                    if self.depth == 0 {
                        return Err(self.error(format!(
                            "unexpected character '{}' outside of a record",
                            c as char
                        )));
                    }
                    self.bare_value.push(c as char);
                }
                _ => {}
            }
        }

        if self.depth > 0 {
            return Err(self.error("unexpected end of input inside a record".to_string()));
        }
        Ok(self.records)
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self.bytes.next() {
            Some(byte) => {
                self.offset += 1;
                byte.map(Some)
            }
            None => Ok(None),
        }
    }

    fn expect_byte(&mut self) -> SerializerResult<u8> {
        self.next_byte()?
            .ok_or_else(|| self.error("unterminated string".to_string()))
    }

    fn error(&self, message: String) -> SerializerError {
        SerializerError::Format(format!("{} at byte {}", message, self.offset))
    }

    fn start_object(&mut self) -> SerializerResult<()> {
        if self.depth == 0 {
            self.record = Some(RecordAssembler::new(self.records.len()));
        }
        self.depth += 1;
        if self.depth > 1 {
            return Err(self.error("wrong nesting depth of the JSON input".to_string()));
        }
        Ok(())
    }

    fn push_quoted(&mut self, text: String) -> SerializerResult<()> {
        if self.depth == 0 {
            return Err(self.error(format!("unexpected string \"{}\" outside of a record", text)));
        }
        if self.name.is_none() {
            self.name = Some(text);
        } else if self.quoted_value.is_none() && self.bare_value.is_empty() {
            self.quoted_value = Some(text);
        } else {
            return Err(self.error(format!("unexpected string \"{}\"", text)));
        }
        Ok(())
    }

    fn end_property(&mut self) -> SerializerResult<()> {
        let name = self
            .name
            .take()
            .ok_or_else(|| self.error("missing property name".to_string()))?;

        let bare = std::mem::take(&mut self.bare_value);
        let value = match self.quoted_value.take() {
            Some(text) if bare.is_empty() => PropertyValue::Text(text),
            Some(_) => {
                return Err(self.error(format!("malformed value for property \"{}\"", name)));
            }
            None if bare == "null" => PropertyValue::Null,
            None if bare.is_empty() => {
                return Err(self.error(format!("missing value for property \"{}\"", name)));
            }
            None => PropertyValue::Number(bare),
        };

        let offset = self.offset;
        let Some(record) = self.record.as_mut() else {
            return Err(at_offset(
                SerializerError::Format("property outside of a record".to_string()),
                offset,
            ));
        };
        record
            .assign(&name, value)
            .map_err(|error| at_offset(error, offset))
    }

    fn end_object(&mut self) -> SerializerResult<()> {
        self.depth -= 1;
        if self.depth == 0 {
            let record = self
                .record
                .take()
                .ok_or_else(|| self.error("record closed before it started".to_string()))?;
            let offset = self.offset;
            self.records
                .push(record.finish().map_err(|error| at_offset(error, offset))?);
        }
        Ok(())
    }

    /// Reads a string literal whose opening quote was just consumed.
    fn read_quoted(&mut self) -> SerializerResult<String> {
        let mut text = Vec::new();
        loop {
            match self.expect_byte()? {
                b'"' => break,
                b'\\' => self.read_escape(&mut text)?,
                c => text.push(c),
            }
        }
        String::from_utf8(text).map_err(|_| self.error("invalid UTF-8 in string".to_string()))
    }

    fn read_escape(&mut self, text: &mut Vec<u8>) -> SerializerResult<()> {
        let decoded = match self.expect_byte()? {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => self.read_unicode_escape()?,
            other => {
                return Err(self.error(format!("invalid escape '\\{}'", other as char)));
            }
        };
        let mut buffer = [0; 4];
        text.extend_from_slice(decoded.encode_utf8(&mut buffer).as_bytes());
        Ok(())
    }

    fn read_unicode_escape(&mut self) -> SerializerResult<char> {
        let high = self.read_hex4()?;
        let code = if (0xD800..0xDC00).contains(&high) {
            if self.expect_byte()? != b'\\' || self.expect_byte()? != b'u' {
                return Err(self.error("unpaired surrogate in string".to_string()));
            }
            let low = self.read_hex4()?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(self.error("unpaired surrogate in string".to_string()));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape".to_string()))
    }

    fn read_hex4(&mut self) -> SerializerResult<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self.expect_byte()?;
            let value = (digit as char)
                .to_digit(16)
                .ok_or_else(|| self.error("invalid unicode escape".to_string()))?;
            code = code * 16 + value;
        }
        Ok(code)
    }
}

fn is_bare_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'+' | b'.')
}

fn at_offset(error: SerializerError, offset: usize) -> SerializerError {
    match error {
        SerializerError::Format(message) => {
            SerializerError::Format(format!("{} at byte {}", message, offset))
        }
        other => other,
    }
}

/// Builder for [`JsonScannerReader`].
#[derive(Debug)]
pub struct JsonScannerReaderBuilder {
    capacity: usize,
}

impl Default for JsonScannerReaderBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl JsonScannerReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity of the read buffer.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> JsonScannerReader {
        JsonScannerReader {
            capacity: self.capacity,
        }
    }
}
