use std::mem::size_of;

use serde::Serialize;

/// Bytes accounted for the `Index` field of a record.
pub const INDEX_SIZE: usize = size_of::<usize>();

/// Bytes accounted for the optional `RandomIndex` field of a record.
pub const RANDOM_INDEX_SIZE: usize = size_of::<Option<usize>>();

/// Flat, index-addressed projection of one list node.
///
/// `index` is the node position from head, `random_index` the position of
/// the node its random pointer targets. The byte size is derived from the
/// data each time it is set and is never part of the wire format.
///
/// Serializing a record with serde yields exactly the three wire fields,
/// in wire order:
///
/// ```
/// use list_serializer::core::record::NodeRecord;
///
/// let record = NodeRecord::new(0, Some(2), Some("A".to_string()));
/// let json = serde_json::to_string(&record).unwrap();
///
/// assert_eq!(json, r#"{"Index":0,"RandomIndex":2,"Data":"A"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    #[serde(rename = "Index")]
    index: usize,
    #[serde(rename = "RandomIndex")]
    random_index: Option<usize>,
    #[serde(rename = "Data")]
    data: Option<String>,
    #[serde(skip)]
    byte_size: usize,
}

impl NodeRecord {
    pub fn new(index: usize, random_index: Option<usize>, data: Option<String>) -> Self {
        let mut record = Self {
            index,
            random_index,
            data: None,
            byte_size: 0,
        };
        record.set_data(data);
        record
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn random_index(&self) -> Option<usize> {
        self.random_index
    }

    pub fn set_random_index(&mut self, random_index: Option<usize>) {
        self.random_index = random_index;
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Replaces the data and recomputes the byte size.
    pub fn set_data(&mut self, data: Option<String>) {
        self.byte_size = INDEX_SIZE + RANDOM_INDEX_SIZE + data.as_deref().map_or(0, str::len);
        self.data = data;
    }

    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    pub(crate) fn into_data(self) -> Option<String> {
        self.data
    }
}

/// Sum of the byte sizes of `records`.
pub fn total_byte_size(records: &[NodeRecord]) -> usize {
    records.iter().map(NodeRecord::byte_size).sum()
}
