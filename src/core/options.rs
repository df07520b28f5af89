use serde::{Deserialize, Serialize};

/// Number of records above which the generic writer is faster.
pub const DEFAULT_NODE_COUNT_THRESHOLD: usize = 550_000;

/// Total record byte size above which the generic writer is faster.
pub const DEFAULT_TOTAL_BYTE_THRESHOLD: usize = 5_500_000;

/// Limits deciding which JSON writer serializes a record sequence.
///
/// Exceeding either limit routes serialization to the generic (serde)
/// writer; otherwise the custom writer is used. The defaults come from
/// measured crossover points between both writers.
///
/// The struct can be embedded in an application configuration file, missing
/// fields falling back to their defaults:
///
/// ```
/// use list_serializer::core::options::SerializationThresholds;
///
/// let thresholds: SerializationThresholds =
///     serde_json::from_str(r#"{ "node_count_threshold": 1000 }"#).unwrap();
///
/// assert_eq!(thresholds.node_count_threshold(), 1000);
/// assert_eq!(thresholds.total_byte_threshold(), 5_500_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializationThresholds {
    node_count_threshold: usize,
    total_byte_threshold: usize,
}

impl Default for SerializationThresholds {
    fn default() -> Self {
        Self {
            node_count_threshold: DEFAULT_NODE_COUNT_THRESHOLD,
            total_byte_threshold: DEFAULT_TOTAL_BYTE_THRESHOLD,
        }
    }
}

impl SerializationThresholds {
    pub fn node_count_threshold(&self) -> usize {
        self.node_count_threshold
    }

    pub fn total_byte_threshold(&self) -> usize {
        self.total_byte_threshold
    }

    /// Returns `true` when `record_count` or `total_bytes` is above its limit.
    pub fn is_exceeded(&self, record_count: usize, total_bytes: usize) -> bool {
        record_count > self.node_count_threshold || total_bytes > self.total_byte_threshold
    }
}

/// Builder for [`SerializationThresholds`].
///
/// # Examples
///
/// ```
/// use list_serializer::core::options::SerializationThresholdsBuilder;
///
/// let thresholds = SerializationThresholdsBuilder::new()
///     .node_count_threshold(10)
///     .total_byte_threshold(1024)
///     .build();
///
/// assert!(thresholds.is_exceeded(11, 0));
/// assert!(thresholds.is_exceeded(1, 1025));
/// assert!(!thresholds.is_exceeded(10, 1024));
/// ```
#[derive(Default)]
pub struct SerializationThresholdsBuilder {
    thresholds: SerializationThresholds,
}

impl SerializationThresholdsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count_threshold(mut self, node_count_threshold: usize) -> Self {
        self.thresholds.node_count_threshold = node_count_threshold;
        self
    }

    pub fn total_byte_threshold(mut self, total_byte_threshold: usize) -> Self {
        self.thresholds.total_byte_threshold = total_byte_threshold;
        self
    }

    pub fn build(self) -> SerializationThresholds {
        self.thresholds
    }
}
