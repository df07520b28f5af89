use std::io::{Read, Write};

use log::debug;

use crate::{
    error::{SerializerError, SerializerResult},
    json::{JsonRecordWriter, JsonRecordWriterBuilder, JsonTokenReaderBuilder, WriteStrategy},
};

use super::{
    codec::RecordReader,
    list::LinkedList,
    mapper::{ListToRecordsMapper, Mapper, RecordsToListMapper},
    options::SerializationThresholds,
};

/// Serializes, deserializes and deep copies lists with random pointers.
///
/// - [`serialize`](ListSerializer::serialize) maps the list to records and
///   writes them with the writer selected by the size thresholds.
/// - [`deserialize`](ListSerializer::deserialize) reads records with the
///   configured [`RecordReader`] and rebuilds a list from them.
/// - [`deep_copy`](ListSerializer::deep_copy) maps the list to records and
///   straight back to a new list, without going through text.
///
/// Every call allocates its own buffers, so one serializer can be shared
/// between threads working on distinct lists and streams.
///
/// # Examples
///
/// ```
/// use list_serializer::core::list::LinkedList;
/// use list_serializer::core::serializer::ListSerializerBuilder;
/// use list_serializer::json::JsonScannerReaderBuilder;
///
/// let mut list = LinkedList::from_data(["A", "B", "C"].map(|s| Some(s.to_string())));
/// let (head, tail) = (list.head().unwrap(), list.tail().unwrap());
/// list.set_random(head, Some(tail)).unwrap();
/// list.set_random(tail, Some(tail)).unwrap();
///
/// let serializer = ListSerializerBuilder::new()
///     .reader(JsonScannerReaderBuilder::new().build())
///     .build();
///
/// let mut buffer = Vec::new();
/// serializer.serialize(&list, &mut buffer).unwrap();
///
/// let copy = serializer.deserialize(&mut buffer.as_slice()).unwrap();
/// assert!(copy == list);
///
/// let deep_copy = serializer.deep_copy(&list).unwrap();
/// assert!(deep_copy == list);
/// ```
pub struct ListSerializer {
    reader: Box<dyn RecordReader + Send + Sync>,
    writer: JsonRecordWriter,
    to_records: ListToRecordsMapper,
    to_list: RecordsToListMapper,
}

impl Default for ListSerializer {
    fn default() -> Self {
        ListSerializerBuilder::new().build()
    }
}

impl ListSerializer {
    /// Writes `list` to `sink` as a JSON array of records.
    ///
    /// Returns the writer strategy that produced the output. The sink is
    /// neither flushed nor closed.
    pub fn serialize<W: Write>(
        &self,
        list: &LinkedList,
        sink: &mut W,
    ) -> SerializerResult<WriteStrategy> {
        let records = self.to_records.map(list)?;
        let strategy = self.writer.write(&records, sink)?;
        debug!("Serialized {} nodes ({} writer)", records.len(), strategy);
        Ok(strategy)
    }

    /// Reads a list back from `source`.
    ///
    /// Fails with [`SerializerError::EmptyInput`] when the source holds an
    /// empty record array.
    pub fn deserialize<R: Read>(&self, source: &mut R) -> SerializerResult<LinkedList> {
        let records = self.reader.read_records(source)?;
        if records.is_empty() {
            return Err(SerializerError::EmptyInput);
        }

        let list = self.to_list.map(records)?;
        debug!("Deserialized {} nodes", list.len());
        Ok(list)
    }

    /// Builds a new list with the same data and topology as `list`, sharing
    /// no node with it.
    pub fn deep_copy(&self, list: &LinkedList) -> SerializerResult<LinkedList> {
        let records = self.to_records.map(list)?;
        let copy = self.to_list.map(records)?;
        debug!("Deep copied {} nodes", copy.len());
        Ok(copy)
    }

    pub fn thresholds(&self) -> &SerializationThresholds {
        self.writer.thresholds()
    }
}

/// Builder for [`ListSerializer`].
///
/// By default the serializer reads with a
/// [`JsonTokenReader`](crate::json::JsonTokenReader), uses the default
/// thresholds and writes compact JSON.
pub struct ListSerializerBuilder {
    reader: Option<Box<dyn RecordReader + Send + Sync>>,
    writer: JsonRecordWriterBuilder,
}

impl Default for ListSerializerBuilder {
    fn default() -> Self {
        Self {
            reader: None,
            writer: JsonRecordWriterBuilder::new(),
        }
    }
}

impl ListSerializerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reader used by `deserialize`.
    pub fn reader<R: RecordReader + Send + Sync + 'static>(mut self, reader: R) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    pub fn thresholds(mut self, thresholds: SerializationThresholds) -> Self {
        self.writer = self.writer.thresholds(thresholds);
        self
    }

    pub fn pretty_formatter(mut self, yes: bool) -> Self {
        self.writer = self.writer.pretty_formatter(yes);
        self
    }

    pub fn indent(mut self, indent: &str) -> Self {
        self.writer = self.writer.indent(indent);
        self
    }

    pub fn build(self) -> ListSerializer {
        let reader: Box<dyn RecordReader + Send + Sync> = match self.reader {
            Some(reader) => reader,
            None => Box::new(JsonTokenReaderBuilder::new().build()),
        };

        ListSerializer {
            reader,
            writer: self.writer.build(),
            to_records: ListToRecordsMapper,
            to_list: RecordsToListMapper,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{
        core::options::SerializationThresholdsBuilder,
        json::JsonScannerReaderBuilder,
    };

    fn scenario() -> LinkedList {
        let mut list = LinkedList::from_data(["A", "B", "C"].map(|s| Some(s.to_string())));
        let first = list.head().unwrap();
        let last = list.tail().unwrap();
        list.set_random(first, Some(last)).unwrap();
        list.set_random(last, Some(last)).unwrap();
        list
    }

    #[test]
    fn scenario_should_serialize_to_expected_records() {
        let serializer = ListSerializer::default();
        let mut sink = Vec::new();

        let strategy = serializer.serialize(&scenario(), &mut sink).unwrap();

        assert_eq!(strategy, WriteStrategy::Custom);
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            r#"[{"Index":0,"RandomIndex":2,"Data":"A"},{"Index":1,"RandomIndex":null,"Data":"B"},{"Index":2,"RandomIndex":2,"Data":"C"}]"#
        );
    }

    #[test]
    fn round_trip_should_work_with_both_readers() {
        let list = scenario();
        let serializers = [
            ListSerializer::default(),
            ListSerializerBuilder::new()
                .reader(JsonScannerReaderBuilder::new().build())
                .pretty_formatter(true)
                .build(),
        ];

        for serializer in serializers {
            let mut buffer = Vec::new();
            serializer.serialize(&list, &mut buffer).unwrap();

            let copy = serializer.deserialize(&mut Cursor::new(buffer)).unwrap();

            assert!(copy == list);
        }
    }

    #[test]
    fn generic_strategy_output_should_round_trip() {
        let list = scenario();
        let serializer = ListSerializerBuilder::new()
            .thresholds(
                SerializationThresholdsBuilder::new()
                    .total_byte_threshold(1)
                    .build(),
            )
            .pretty_formatter(true)
            .build();

        let mut buffer = Vec::new();
        let strategy = serializer.serialize(&list, &mut buffer).unwrap();
        assert_eq!(strategy, WriteStrategy::Generic);

        let copy = serializer.deserialize(&mut buffer.as_slice()).unwrap();
        assert!(copy == list);
    }

    #[test]
    fn empty_array_should_be_rejected() {
        let serializer = ListSerializer::default();

        let result = serializer.deserialize(&mut "[]".as_bytes());

        assert!(matches!(result, Err(SerializerError::EmptyInput)));
    }

    #[test]
    fn empty_list_should_serialize_to_empty_array() {
        let serializer = ListSerializer::default();
        let mut sink = Vec::new();

        serializer.serialize(&LinkedList::new(), &mut sink).unwrap();

        assert_eq!(sink, b"[]");
        assert!(serializer.deep_copy(&LinkedList::new()).unwrap().is_empty());
    }

    #[test]
    fn deep_copy_should_keep_topology() {
        let list = scenario();

        let copy = ListSerializer::default().deep_copy(&list).unwrap();

        assert!(copy == list);
        assert!(copy.structurally_eq(&list));
    }
}
