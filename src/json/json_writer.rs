use std::{fmt::Write as _, io::Write};

use crate::core::{
    codec::{RecordWriter, RecordWriterResult},
    record::{total_byte_size, NodeRecord},
};

use super::{
    property::{DATA_NAME, INDEX_NAME, RANDOM_INDEX_NAME},
    JsonLayout,
};

/// Rough size of the JSON punctuation and property names of one record.
const RECORD_OVERHEAD: usize = 48;

/// Writes records by concatenating JSON literals in memory, then sends the
/// whole document to the sink in a single write.
///
/// Compact output is byte-for-byte what `serde_json` produces for the same
/// records.
#[derive(Debug, Clone, Default)]
pub struct LiteralJsonWriter {
    layout: JsonLayout,
}

impl LiteralJsonWriter {
    pub fn new(layout: JsonLayout) -> Self {
        Self { layout }
    }

    /// Renders `records` as a JSON array.
    pub fn render(&self, records: &[NodeRecord]) -> String {
        if records.is_empty() {
            return "[]".to_string();
        }

        let pretty = self.layout.is_pretty();
        let (indent, new_line, space) = if pretty {
            (self.layout.indent(), "\n", " ")
        } else {
            ("", "", "")
        };

        let mut out = String::with_capacity(
            total_byte_size(records) + records.len() * (RECORD_OVERHEAD + 4 * indent.len()),
        );

        out.push('[');
        out.push_str(new_line);
        for record in records {
            out.push_str(indent);
            out.push('{');
            out.push_str(new_line);

            push_name(&mut out, indent, INDEX_NAME, space);
            let _ = write!(out, "{},{}", record.index(), new_line);

            push_name(&mut out, indent, RANDOM_INDEX_NAME, space);
            match record.random_index() {
                Some(random_index) => {
                    let _ = write!(out, "{}", random_index);
                }
                None => out.push_str("null"),
            }
            out.push(',');
            out.push_str(new_line);

            push_name(&mut out, indent, DATA_NAME, space);
            match record.data() {
                Some(data) => push_escaped(&mut out, data),
                None => out.push_str("null"),
            }
            out.push_str(new_line);

            out.push_str(indent);
            out.push_str("},");
            out.push_str(new_line);
        }

        // drop the separator following the last record
        out.truncate(out.len() - 1 - new_line.len());
        out.push_str(new_line);
        out.push(']');
        out
    }
}

impl RecordWriter for LiteralJsonWriter {
    fn write_records(&self, records: &[NodeRecord], sink: &mut dyn Write) -> RecordWriterResult {
        let json = self.render(records);
        sink.write_all(json.as_bytes())?;
        Ok(())
    }
}

fn push_name(out: &mut String, indent: &str, name: &str, space: &str) {
    out.push_str(indent);
    out.push_str(indent);
    out.push('"');
    out.push_str(name);
    out.push_str("\":");
    out.push_str(space);
}

/// Appends `value` as a JSON string literal, escaping like `serde_json`.
fn push_escaped(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<NodeRecord> {
        vec![
            NodeRecord::new(0, Some(2), Some("A".to_string())),
            NodeRecord::new(1, None, None),
        ]
    }

    #[test]
    fn compact_output_should_match_wire_format() {
        let json = LiteralJsonWriter::default().render(&records());

        assert_eq!(
            json,
            r#"[{"Index":0,"RandomIndex":2,"Data":"A"},{"Index":1,"RandomIndex":null,"Data":null}]"#
        );
    }

    #[test]
    fn pretty_output_should_be_indented() {
        let json = LiteralJsonWriter::new(JsonLayout::new(true, "  ")).render(&records());

        assert_eq!(
            json,
            r#"[
  {
    "Index": 0,
    "RandomIndex": 2,
    "Data": "A"
  },
  {
    "Index": 1,
    "RandomIndex": null,
    "Data": null
  }
]"#
        );
    }

    #[test]
    fn empty_sequence_should_be_empty_array() {
        assert_eq!(LiteralJsonWriter::default().render(&[]), "[]");
        assert_eq!(
            LiteralJsonWriter::new(JsonLayout::new(true, "  ")).render(&[]),
            "[]"
        );
    }

    #[test]
    fn special_characters_should_be_escaped_like_serde_json() {
        let data = "quote\" back\\ tab\t nl\n bell\u{7} é 😀 </>";
        let records = vec![NodeRecord::new(0, None, Some(data.to_string()))];

        let json = LiteralJsonWriter::default().render(&records);

        let expected = format!("[{}]", serde_json::to_string(&records[0]).unwrap());
        assert_eq!(json, expected);
    }

    #[test]
    fn output_should_be_written_in_one_block() {
        let mut sink = Vec::new();
        LiteralJsonWriter::default()
            .write_records(&records(), &mut sink)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&sink).unwrap();
        assert_eq!(value[0]["RandomIndex"], 2);
        assert!(value[1]["Data"].is_null());
    }
}
