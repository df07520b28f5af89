use std::collections::HashMap;

use log::debug;

use crate::error::{SerializerError, SerializerResult};

use super::{
    list::{LinkedList, NodeId},
    record::NodeRecord,
};

/// Converts a source value into a target value.
///
/// The two mappers of this module implement it in opposite directions:
/// list to records and records to list.
pub trait Mapper<S, T> {
    fn map(&self, source: S) -> SerializerResult<T>;
}

/// Projects a list onto a sequence of records, one per node, in traversal
/// order.
///
/// Random links may target nodes that come later in the list, so every node
/// is first given its position and only then random links are resolved.
///
/// # Examples
///
/// ```
/// use list_serializer::core::list::LinkedList;
/// use list_serializer::core::mapper::{ListToRecordsMapper, Mapper};
///
/// let mut list = LinkedList::from_data(["A", "B", "C"].map(|s| Some(s.to_string())));
/// let (head, tail) = (list.head().unwrap(), list.tail().unwrap());
/// list.set_random(head, Some(tail)).unwrap();
///
/// let records = ListToRecordsMapper.map(&list).unwrap();
///
/// assert_eq!(records[0].random_index(), Some(2));
/// assert_eq!(records[1].random_index(), None);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ListToRecordsMapper;

impl<'a> Mapper<&'a LinkedList, Vec<NodeRecord>> for ListToRecordsMapper {
    fn map(&self, list: &'a LinkedList) -> SerializerResult<Vec<NodeRecord>> {
        let mut positions: HashMap<NodeId, usize> = HashMap::with_capacity(list.len());
        let mut records = Vec::with_capacity(list.len());

        for (index, (id, node)) in list.iter().enumerate() {
            positions.insert(id, index);
            records.push(NodeRecord::new(index, None, node.data().map(str::to_owned)));
        }

        for (record, (id, node)) in records.iter_mut().zip(list.iter()) {
            let Some(target) = node.random() else {
                continue;
            };
            let position = positions.get(&target).copied().ok_or_else(|| {
                SerializerError::Argument(format!(
                    "random pointer of node {} targets node {} which is not in the list",
                    id, target
                ))
            })?;
            record.set_random_index(Some(position));
        }

        debug!("Mapped {} nodes to records", records.len());
        Ok(records)
    }
}

/// Rebuilds a new, independent list from a sequence of records.
///
/// Records are wired by position: record `i` becomes node `i`, linked to
/// `i - 1` and `i + 1`. A `RandomIndex` outside of the sequence fails with
/// [`SerializerError::OutOfRange`] and no list is returned.
///
/// An empty sequence maps to an empty list; rejecting it is up to the
/// caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordsToListMapper;

impl Mapper<Vec<NodeRecord>, LinkedList> for RecordsToListMapper {
    fn map(&self, records: Vec<NodeRecord>) -> SerializerResult<LinkedList> {
        let len = records.len();
        let random_indexes: Vec<Option<usize>> =
            records.iter().map(NodeRecord::random_index).collect();

        let mut list = LinkedList::with_capacity(len);
        let ids: Vec<NodeId> = records
            .into_iter()
            .map(|record| list.push_back(record.into_data()))
            .collect();

        for (id, random_index) in ids.iter().zip(random_indexes) {
            let Some(random_index) = random_index else {
                continue;
            };
            let target = ids
                .get(random_index)
                .copied()
                .ok_or(SerializerError::OutOfRange { random_index, len })?;
            list.set_random(*id, Some(target))?;
        }

        debug!("Mapped {} records to a new list", len);
        Ok(list)
    }
}
