use std::io::{Read, Write};

use crate::error::SerializerResult;

use super::record::NodeRecord;

/// Type alias for record reader results.
pub type RecordReaderResult = SerializerResult<Vec<NodeRecord>>;

/// Type alias for record writer results.
pub type RecordWriterResult = SerializerResult<()>;

/// Reads a complete record sequence from a byte source.
///
/// This is the pluggable deserialization capability of
/// [`ListSerializer`](super::serializer::ListSerializer): the streaming
/// scanner and the token reader both implement it and can be swapped without
/// touching caller code.
///
/// Implementations either return every record of the source, in order, or
/// fail; they never hand back a partial sequence. The source is borrowed,
/// its lifecycle stays with the caller.
pub trait RecordReader {
    fn read_records(&self, source: &mut dyn Read) -> RecordReaderResult;
}

/// Writes a record sequence as a JSON array to a byte sink.
///
/// The sink is only written to; flushing and closing it is left to the
/// caller.
pub trait RecordWriter {
    fn write_records(&self, records: &[NodeRecord], sink: &mut dyn Write) -> RecordWriterResult;
}

impl<T: RecordReader + ?Sized> RecordReader for Box<T> {
    fn read_records(&self, source: &mut dyn Read) -> RecordReaderResult {
        (**self).read_records(source)
    }
}
