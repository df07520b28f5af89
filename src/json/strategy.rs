use std::{fmt, io::Write};

use log::debug;

use crate::{
    core::{
        codec::{RecordWriter, RecordWriterResult},
        options::SerializationThresholds,
        record::{total_byte_size, NodeRecord},
    },
    error::SerializerResult,
};

use super::{JsonLayout, LiteralJsonWriter, SerdeJsonWriter, DEFAULT_INDENT};

/// The writer chosen for one serialization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStrategy {
    /// [`LiteralJsonWriter`]: in-memory concatenation, single write.
    Custom,
    /// [`SerdeJsonWriter`]: per-record `serde_json` encoding.
    Generic,
}

impl fmt::Display for WriteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStrategy::Custom => write!(f, "custom"),
            WriteStrategy::Generic => write!(f, "generic"),
        }
    }
}

/// Writes a record sequence with the writer best suited to its size.
///
/// The decision is taken on every call: when the record count exceeds the
/// node count threshold, or the summed record byte size exceeds the total
/// byte threshold, the generic writer is used; otherwise the custom one.
///
/// # Examples
///
/// ```
/// use list_serializer::core::options::SerializationThresholdsBuilder;
/// use list_serializer::core::record::NodeRecord;
/// use list_serializer::json::{JsonRecordWriterBuilder, WriteStrategy};
///
/// let writer = JsonRecordWriterBuilder::new()
///     .thresholds(SerializationThresholdsBuilder::new().node_count_threshold(1).build())
///     .pretty_formatter(true)
///     .build();
///
/// let one = vec![NodeRecord::new(0, None, None)];
/// let two = vec![NodeRecord::new(0, None, None), NodeRecord::new(1, Some(0), None)];
///
/// assert_eq!(writer.select_strategy(&one), WriteStrategy::Custom);
/// assert_eq!(writer.select_strategy(&two), WriteStrategy::Generic);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonRecordWriter {
    thresholds: SerializationThresholds,
    custom: LiteralJsonWriter,
    generic: SerdeJsonWriter,
}

impl JsonRecordWriter {
    pub fn thresholds(&self) -> &SerializationThresholds {
        &self.thresholds
    }

    /// Applies the threshold rule to `records`.
    pub fn select_strategy(&self, records: &[NodeRecord]) -> WriteStrategy {
        if self
            .thresholds
            .is_exceeded(records.len(), total_byte_size(records))
        {
            WriteStrategy::Generic
        } else {
            WriteStrategy::Custom
        }
    }

    /// Writes `records` to `sink` and reports which writer did it.
    pub fn write<W: Write>(
        &self,
        records: &[NodeRecord],
        sink: &mut W,
    ) -> SerializerResult<WriteStrategy> {
        let strategy = self.select_strategy(records);
        debug!(
            "Writing {} records with the {} writer",
            records.len(),
            strategy
        );

        match strategy {
            WriteStrategy::Custom => self.custom.write_records(records, sink)?,
            WriteStrategy::Generic => self.generic.write_records(records, sink)?,
        }
        Ok(strategy)
    }
}

impl RecordWriter for JsonRecordWriter {
    fn write_records(&self, records: &[NodeRecord], mut sink: &mut dyn Write) -> RecordWriterResult {
        self.write(records, &mut sink).map(|_| ())
    }
}

/// Builder for [`JsonRecordWriter`].
#[derive(Debug)]
pub struct JsonRecordWriterBuilder {
    thresholds: SerializationThresholds,
    indent: String,
    pretty_formatter: bool,
}

impl Default for JsonRecordWriterBuilder {
    fn default() -> Self {
        Self {
            thresholds: SerializationThresholds::default(),
            indent: DEFAULT_INDENT.to_string(),
            pretty_formatter: false,
        }
    }
}

impl JsonRecordWriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thresholds(mut self, thresholds: SerializationThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the indentation used by pretty printing.
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    pub fn pretty_formatter(mut self, yes: bool) -> Self {
        self.pretty_formatter = yes;
        self
    }

    pub fn build(self) -> JsonRecordWriter {
        let layout = JsonLayout::new(self.pretty_formatter, &self.indent);
        JsonRecordWriter {
            thresholds: self.thresholds,
            custom: LiteralJsonWriter::new(layout.clone()),
            generic: SerdeJsonWriter::new(layout),
        }
    }
}
