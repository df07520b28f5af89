use log::debug;
use rand::distr::{Alphanumeric, SampleString};

use crate::{
    core::{
        list::LinkedList,
        record::{INDEX_SIZE, RANDOM_INDEX_SIZE},
    },
    error::{SerializerError, SerializerResult},
};

/// Default number of characters of generated data.
pub const DEFAULT_DATA_LENGTH: usize = 10;

/// Generates lists with random data and random links, for tests and
/// benchmarks.
///
/// Every node gets alphanumeric data of a fixed length, or no data at all
/// with probability `null_data_probability`. Every node points to a random
/// node of the list (itself included) with probability `random_probability`.
///
/// # Examples
///
/// ```
/// use list_serializer::fake::list_generator::LinkedListGeneratorBuilder;
///
/// let generator = LinkedListGeneratorBuilder::new()
///     .node_count(100)
///     .data_length(4)
///     .null_data_probability(0.0)
///     .build()
///     .unwrap();
///
/// let list = generator.generate();
///
/// assert_eq!(list.len(), 100);
/// assert!(list.iter().all(|(_, node)| node.data().unwrap().len() == 4));
/// ```
#[derive(Debug, Clone)]
pub struct LinkedListGenerator {
    node_count: usize,
    data_length: usize,
    null_data_probability: f64,
    random_probability: f64,
}

impl LinkedListGenerator {
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn data_length(&self) -> usize {
        self.data_length
    }

    pub fn generate(&self) -> LinkedList {
        let mut list = LinkedList::with_capacity(self.node_count);
        let ids: Vec<_> = (0..self.node_count)
            .map(|_| list.push_back(self.random_data()))
            .collect();

        for id in &ids {
            if rand::random_bool(self.random_probability) {
                let target = ids[rand::random_range(0..ids.len())];
                // both ids were just allocated in this list
                let _ = list.set_random(*id, Some(target));
            }
        }

        debug!("Generated a list of {} nodes", list.len());
        list
    }

    fn random_data(&self) -> Option<String> {
        if rand::random_bool(self.null_data_probability) {
            None
        } else {
            Some(Alphanumeric.sample_string(&mut rand::rng(), self.data_length))
        }
    }
}

/// Builder for [`LinkedListGenerator`].
#[derive(Debug)]
pub struct LinkedListGeneratorBuilder {
    node_count: usize,
    data_length: usize,
    record_size: Option<usize>,
    null_data_probability: f64,
    random_probability: f64,
}

impl Default for LinkedListGeneratorBuilder {
    fn default() -> Self {
        Self {
            node_count: 1,
            data_length: DEFAULT_DATA_LENGTH,
            record_size: None,
            null_data_probability: 0.5,
            random_probability: 0.5,
        }
    }
}

impl LinkedListGeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    pub fn data_length(mut self, data_length: usize) -> Self {
        self.data_length = data_length;
        self
    }

    /// Derives the data length from a target record byte size, overriding
    /// [`data_length`](Self::data_length).
    pub fn record_size(mut self, record_size: usize) -> Self {
        self.record_size = Some(record_size);
        self
    }

    pub fn null_data_probability(mut self, probability: f64) -> Self {
        self.null_data_probability = probability;
        self
    }

    pub fn random_probability(mut self, probability: f64) -> Self {
        self.random_probability = probability;
        self
    }

    pub fn build(self) -> SerializerResult<LinkedListGenerator> {
        if self.node_count == 0 {
            return Err(SerializerError::Argument(
                "nodes count should be greater than zero".to_string(),
            ));
        }

        for (name, probability) in [
            ("null data probability", self.null_data_probability),
            ("random probability", self.random_probability),
        ] {
            if !(0.0..=1.0).contains(&probability) {
                return Err(SerializerError::Argument(format!(
                    "{} should be between 0 and 1, got {}",
                    name, probability
                )));
            }
        }

        let data_length = match self.record_size {
            Some(record_size) => record_size
                .checked_sub(INDEX_SIZE + RANDOM_INDEX_SIZE)
                .filter(|length| *length > 0)
                .ok_or_else(|| {
                    SerializerError::Argument(format!(
                        "the size of a single node is too small: {} bytes cannot hold any data",
                        record_size
                    ))
                })?,
            None => self.data_length,
        };

        Ok(LinkedListGenerator {
            node_count: self.node_count,
            data_length,
            null_data_probability: self.null_data_probability,
            random_probability: self.random_probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapper::{ListToRecordsMapper, Mapper};

    #[test]
    fn zero_nodes_should_be_rejected() {
        let result = LinkedListGeneratorBuilder::new().node_count(0).build();
        assert!(matches!(result, Err(SerializerError::Argument(_))));
    }

    #[test]
    fn too_small_record_size_should_be_rejected() {
        let result = LinkedListGeneratorBuilder::new()
            .record_size(INDEX_SIZE + RANDOM_INDEX_SIZE)
            .build();
        assert!(matches!(result, Err(SerializerError::Argument(_))));
    }

    #[test]
    fn invalid_probability_should_be_rejected() {
        let result = LinkedListGeneratorBuilder::new()
            .random_probability(1.5)
            .build();
        assert!(matches!(result, Err(SerializerError::Argument(_))));
    }

    #[test]
    fn record_size_should_drive_data_length() {
        let generator = LinkedListGeneratorBuilder::new()
            .node_count(20)
            .record_size(INDEX_SIZE + RANDOM_INDEX_SIZE + 12)
            .null_data_probability(0.0)
            .build()
            .unwrap();

        let records = ListToRecordsMapper.map(&generator.generate()).unwrap();

        assert!(records
            .iter()
            .all(|record| record.byte_size() == INDEX_SIZE + RANDOM_INDEX_SIZE + 12));
    }

    #[test]
    fn probabilities_should_be_honoured_at_the_bounds() {
        let generator = LinkedListGeneratorBuilder::new()
            .node_count(50)
            .null_data_probability(1.0)
            .random_probability(1.0)
            .build()
            .unwrap();

        let list = generator.generate();

        assert_eq!(list.len(), 50);
        assert!(list
            .iter()
            .all(|(_, node)| node.data().is_none() && node.random().is_some()));
    }
}
