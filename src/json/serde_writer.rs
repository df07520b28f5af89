use std::io::{BufWriter, Write};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer};

use crate::{
    core::{
        codec::{RecordWriter, RecordWriterResult},
        record::NodeRecord,
    },
    error::SerializerError,
};

use super::JsonLayout;

/// Writes records one at a time, each encoded by `serde_json`, with the
/// array brackets and separators written around them.
#[derive(Debug, Clone, Default)]
pub struct SerdeJsonWriter {
    layout: JsonLayout,
}

impl SerdeJsonWriter {
    pub fn new(layout: JsonLayout) -> Self {
        Self { layout }
    }

    fn write_record<W: Write>(&self, record: &NodeRecord, out: &mut W) -> RecordWriterResult {
        if self.layout.is_pretty() {
            let formatter = PrettyFormatter::with_indent(self.layout.indent().as_bytes());
            let mut serializer = Serializer::with_formatter(out, formatter);
            record.serialize(&mut serializer).map_err(from_serde)?;
        } else {
            serde_json::to_writer(out, record).map_err(from_serde)?;
        }
        Ok(())
    }
}

impl RecordWriter for SerdeJsonWriter {
    fn write_records(&self, records: &[NodeRecord], sink: &mut dyn Write) -> RecordWriterResult {
        let separator: &[u8] = if self.layout.is_pretty() { b",\n" } else { b"," };
        let mut out = BufWriter::new(sink);

        out.write_all(b"[")?;
        for (position, record) in records.iter().enumerate() {
            if position > 0 {
                out.write_all(separator)?;
            }
            self.write_record(record, &mut out)?;
        }
        out.write_all(b"]")?;

        // hand buffered bytes over without flushing the caller's sink
        out.into_inner()
            .map_err(|error| SerializerError::Io(error.into_error()))?;
        Ok(())
    }
}

fn from_serde(error: serde_json::Error) -> SerializerError {
    if error.is_io() {
        SerializerError::Io(error.into())
    } else {
        SerializerError::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::LiteralJsonWriter;

    fn records() -> Vec<NodeRecord> {
        vec![
            NodeRecord::new(0, Some(1), Some("first \"one\"".to_string())),
            NodeRecord::new(1, Some(1), None),
            NodeRecord::new(2, None, Some(String::new())),
        ]
    }

    fn write(writer: &SerdeJsonWriter, records: &[NodeRecord]) -> String {
        let mut sink = Vec::new();
        writer.write_records(records, &mut sink).unwrap();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn compact_output_should_match_custom_writer() {
        let records = records();

        let generic = write(&SerdeJsonWriter::default(), &records);
        let custom = LiteralJsonWriter::default().render(&records);

        assert_eq!(generic, custom);
    }

    #[test]
    fn pretty_output_should_be_valid_json() {
        let records = records();
        let writer = SerdeJsonWriter::new(JsonLayout::new(true, "    "));

        let json = write(&writer, &records);

        assert!(json.starts_with("[{\n    \"Index\": 0,"));
        assert!(json.contains("},\n{"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[0]["Data"], "first \"one\"");
    }

    #[test]
    fn empty_sequence_should_be_empty_array() {
        assert_eq!(write(&SerdeJsonWriter::default(), &[]), "[]");
    }
}
