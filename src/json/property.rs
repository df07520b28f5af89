use crate::{
    core::record::NodeRecord,
    error::{SerializerError, SerializerResult},
};

pub const INDEX_NAME: &str = "Index";
pub const RANDOM_INDEX_NAME: &str = "RandomIndex";
pub const DATA_NAME: &str = "Data";

/// Number of properties of every record object.
pub const PROPERTIES_COUNT: usize = 3;

/// A property value as seen by a reader, before it is checked against the
/// property it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PropertyValue {
    /// Unquoted numeric literal, kept as written.
    Number(String),
    /// Decoded string literal.
    Text(String),
    Null,
}

impl PropertyValue {
    fn into_index(self, name: &str) -> SerializerResult<usize> {
        match self {
            PropertyValue::Number(raw) => raw.parse().map_err(|_| {
                SerializerError::Format(format!(
                    "invalid value {} for property \"{}\" (expected a non-negative integer)",
                    raw, name
                ))
            }),
            other => Err(SerializerError::Format(format!(
                "invalid value {:?} for property \"{}\" (expected a non-negative integer)",
                other, name
            ))),
        }
    }

    fn into_nullable_index(self, name: &str) -> SerializerResult<Option<usize>> {
        match self {
            PropertyValue::Null => Ok(None),
            other => other.into_index(name).map(Some),
        }
    }

    fn into_nullable_text(self, name: &str) -> SerializerResult<Option<String>> {
        match self {
            PropertyValue::Null => Ok(None),
            PropertyValue::Text(text) => Ok(Some(text)),
            PropertyValue::Number(raw) => Err(SerializerError::Format(format!(
                "invalid value {} for property \"{}\" (expected a string or null)",
                raw, name
            ))),
        }
    }
}

/// Collects the properties of one record object and checks them.
///
/// Both readers feed it name/value pairs in document order. A record is
/// complete once it holds each of the three properties exactly once and its
/// `Index` equals its position in the sequence.
#[derive(Debug)]
pub(crate) struct RecordAssembler {
    position: usize,
    count: usize,
    index: Option<usize>,
    random_index: Option<Option<usize>>,
    data: Option<Option<String>>,
}

impl RecordAssembler {
    pub(crate) fn new(position: usize) -> Self {
        Self {
            position,
            count: 0,
            index: None,
            random_index: None,
            data: None,
        }
    }

    pub(crate) fn assign(&mut self, name: &str, value: PropertyValue) -> SerializerResult<()> {
        self.count += 1;
        if self.count > PROPERTIES_COUNT {
            return Err(SerializerError::Format(format!(
                "wrong number of properties in record {} (expected {} properties)",
                self.position, PROPERTIES_COUNT
            )));
        }

        let position = self.position;
        match name {
            INDEX_NAME => set_once(&mut self.index, value.into_index(name)?, name, position),
            RANDOM_INDEX_NAME => set_once(
                &mut self.random_index,
                value.into_nullable_index(name)?,
                name,
                position,
            ),
            DATA_NAME => set_once(&mut self.data, value.into_nullable_text(name)?, name, position),
            _ => Err(SerializerError::Format(format!(
                "wrong name of the property: \"{}\" in record {}",
                name, position
            ))),
        }
    }

    pub(crate) fn finish(self) -> SerializerResult<NodeRecord> {
        let position = self.position;
        let index = self.index.ok_or_else(|| missing(INDEX_NAME, position))?;
        let random_index = self
            .random_index
            .ok_or_else(|| missing(RANDOM_INDEX_NAME, position))?;
        let data = self.data.ok_or_else(|| missing(DATA_NAME, position))?;

        if index != position {
            return Err(SerializerError::Format(format!(
                "record at position {} declares \"{}\" {}",
                position, INDEX_NAME, index
            )));
        }

        Ok(NodeRecord::new(index, random_index, data))
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, name: &str, position: usize) -> SerializerResult<()> {
    if slot.is_some() {
        return Err(SerializerError::Format(format!(
            "duplicate property \"{}\" in record {}",
            name, position
        )));
    }
    *slot = Some(value);
    Ok(())
}

fn missing(name: &str, position: usize) -> SerializerError {
    SerializerError::Format(format!(
        "missing property \"{}\" in record {} (expected {} properties)",
        name, position, PROPERTIES_COUNT
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(raw: &str) -> PropertyValue {
        PropertyValue::Number(raw.to_string())
    }

    fn assert_format_error(result: SerializerResult<impl std::fmt::Debug>, expected: &str) {
        match result {
            Err(SerializerError::Format(message)) => assert!(
                message.contains(expected),
                "`{}` does not contain `{}`",
                message,
                expected
            ),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn complete_record_should_be_assembled() {
        let mut assembler = RecordAssembler::new(4);
        assembler.assign(INDEX_NAME, number("4")).unwrap();
        assembler.assign(RANDOM_INDEX_NAME, PropertyValue::Null).unwrap();
        assembler
            .assign(DATA_NAME, PropertyValue::Text("null".to_string()))
            .unwrap();

        let record = assembler.finish().unwrap();

        assert_eq!(record, NodeRecord::new(4, None, Some("null".to_string())));
    }

    #[test]
    fn fourth_property_should_fail() {
        let mut assembler = RecordAssembler::new(0);
        assembler.assign(INDEX_NAME, number("0")).unwrap();
        assembler.assign(RANDOM_INDEX_NAME, number("0")).unwrap();
        assembler.assign(DATA_NAME, PropertyValue::Null).unwrap();

        let result = assembler.assign(DATA_NAME, PropertyValue::Null);

        assert_format_error(result, "expected 3 properties");
    }

    #[test]
    fn unknown_property_should_be_named() {
        let mut assembler = RecordAssembler::new(0);
        assert_format_error(assembler.assign("Value", number("1")), "\"Value\"");
    }

    #[test]
    fn duplicate_and_missing_properties_should_fail() {
        let mut assembler = RecordAssembler::new(0);
        assembler.assign(INDEX_NAME, number("0")).unwrap();
        assert_format_error(assembler.assign(INDEX_NAME, number("0")), "duplicate");

        let mut assembler = RecordAssembler::new(0);
        assembler.assign(INDEX_NAME, number("0")).unwrap();
        assembler.assign(DATA_NAME, PropertyValue::Null).unwrap();
        assert_format_error(assembler.finish(), "missing property \"RandomIndex\"");
    }

    #[test]
    fn wrong_value_types_should_fail() {
        let mut assembler = RecordAssembler::new(0);
        assert_format_error(assembler.assign(INDEX_NAME, number("-1")), "\"Index\"");

        let mut assembler = RecordAssembler::new(0);
        assert_format_error(assembler.assign(INDEX_NAME, PropertyValue::Null), "\"Index\"");

        let mut assembler = RecordAssembler::new(0);
        assert_format_error(
            assembler.assign(RANDOM_INDEX_NAME, PropertyValue::Text("1".to_string())),
            "\"RandomIndex\"",
        );

        let mut assembler = RecordAssembler::new(0);
        assert_format_error(assembler.assign(DATA_NAME, number("12")), "\"Data\"");
    }

    #[test]
    fn index_must_match_position() {
        let mut assembler = RecordAssembler::new(1);
        assembler.assign(INDEX_NAME, number("0")).unwrap();
        assembler.assign(RANDOM_INDEX_NAME, PropertyValue::Null).unwrap();
        assembler.assign(DATA_NAME, PropertyValue::Null).unwrap();

        assert_format_error(assembler.finish(), "position 1");
    }
}
