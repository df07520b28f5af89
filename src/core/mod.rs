/// Capability traits for reading and writing record sequences.
pub mod codec;

/// The list itself: an arena of nodes with `previous`, `next` and `random` links.
pub mod list;

/// Conversions between a list and its records.
pub mod mapper;

/// Thresholds selecting the JSON writer.
pub mod options;

/// The flat record a node is projected onto.
pub mod record;

/// Entry point tying mapping, writing and reading together.
pub mod serializer;
