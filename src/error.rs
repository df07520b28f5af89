use thiserror::Error;

/// Convenience alias used by every fallible operation of the crate.
pub type SerializerResult<T> = Result<T, SerializerError>;

#[derive(Error, Debug)]
/// Serializer error
pub enum SerializerError {
    /// The payload does not follow the record wire format: bad nesting,
    /// unexpected or missing property, wrong property count, malformed
    /// top-level shape.
    #[error("Format error: {0}")]
    Format(String),

    /// The payload was well formed but held no record at all.
    #[error("No data in the stream")]
    EmptyInput,

    /// A record references a position outside of the record sequence.
    #[error("RandomIndex {random_index} is out of range for a sequence of {len} records")]
    OutOfRange { random_index: usize, len: usize },

    /// Invalid direct input to a list operation or generator.
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
