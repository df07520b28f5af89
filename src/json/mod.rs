//! JSON wire format of a record sequence.
//!
//! A list is written as a JSON array with one object per node, each object
//! carrying exactly three properties in this order:
//!
//! ```text
//! [
//!   { "Index": <int>, "RandomIndex": <int|null>, "Data": <string|null> },
//!   ...
//! ]
//! ```
//!
//! # Module Architecture
//!
//! 1. **Readers**: two interchangeable implementations of
//!    [`RecordReader`](crate::core::codec::RecordReader).
//!    - [`JsonScannerReader`] reads the source one byte at a time, tracking the
//!      nesting depth and the property count of the current record. It only
//!      understands the subset of JSON this format needs.
//!    - [`JsonTokenReader`] loads the whole source and walks it token by
//!      token, checking the top-level array shape. It tolerates trailing
//!      commas unless configured otherwise.
//!
//! 2. **Writers**: [`JsonRecordWriter`] picks, for every call, one of two
//!    writers from the size of the records:
//!    - [`LiteralJsonWriter`] concatenates the output in memory and writes it
//!      in a single block. Fastest for small and medium inputs.
//!    - [`SerdeJsonWriter`] encodes each record with `serde_json` straight
//!      into the sink. Faster past the configured thresholds.
//!
//! Each component follows the builder pattern for configuration.
//!
//! # Examples
//!
//! ```
//! use list_serializer::core::codec::RecordReader;
//! use list_serializer::core::record::NodeRecord;
//! use list_serializer::json::{JsonRecordWriterBuilder, JsonScannerReaderBuilder, WriteStrategy};
//!
//! let records = vec![
//!     NodeRecord::new(0, Some(1), Some("A".to_string())),
//!     NodeRecord::new(1, None, None),
//! ];
//!
//! let writer = JsonRecordWriterBuilder::new().build();
//! let mut output = Vec::new();
//! let strategy = writer.write(&records, &mut output).unwrap();
//!
//! assert_eq!(strategy, WriteStrategy::Custom);
//! assert_eq!(
//!     String::from_utf8(output.clone()).unwrap(),
//!     r#"[{"Index":0,"RandomIndex":1,"Data":"A"},{"Index":1,"RandomIndex":null,"Data":null}]"#
//! );
//!
//! let reader = JsonScannerReaderBuilder::new().build();
//! let read = reader.read_records(&mut output.as_slice()).unwrap();
//! assert_eq!(read, records);
//! ```

/// Byte-level streaming reader.
pub mod json_scanner;
/// Custom writer built on literal string concatenation.
pub mod json_writer;
mod property;
/// Generic writer delegating record encoding to `serde_json`.
pub mod serde_writer;
/// Size-based selection between both writers.
pub mod strategy;
/// Whole-buffer reader driven by [`tokenizer`].
pub mod token_reader;
pub mod tokenizer;

pub use json_scanner::{JsonScannerReader, JsonScannerReaderBuilder};
pub use json_writer::LiteralJsonWriter;
pub use property::{DATA_NAME, INDEX_NAME, PROPERTIES_COUNT, RANDOM_INDEX_NAME};
pub use serde_writer::SerdeJsonWriter;
pub use strategy::{JsonRecordWriter, JsonRecordWriterBuilder, WriteStrategy};
pub use token_reader::{JsonTokenReader, JsonTokenReaderBuilder};

/// Default indentation of pretty-printed output.
pub const DEFAULT_INDENT: &str = "  ";

/// Layout options shared by both writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonLayout {
    pretty: bool,
    indent: String,
}

impl Default for JsonLayout {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl JsonLayout {
    pub fn new(pretty: bool, indent: &str) -> Self {
        Self {
            pretty,
            indent: indent.to_string(),
        }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }
}
