#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # List Serializer for Rust

 Serialize, deserialize and deep copy doubly-linked lists whose nodes carry an
 extra `random` pointer to any node of the same list (or to themselves).

 ## Core Concepts

- **LinkedList:** An arena of nodes. The list owns the forward chain; `previous` and `random` are ids resolved against the same list, never owners.
- **NodeRecord:** The flat, index-addressed projection of a node: its position, the position of its random target, and its data.
- **Mapper:** Converts a list into records (positions are assigned first, random links resolved afterwards) and records back into a brand new list.
- **RecordReader:** Reads records from a byte source. Two interchangeable implementations exist: a byte-level streaming scanner and a token reader.
- **JsonRecordWriter:** Writes records as JSON with a custom writer or with `serde_json`, depending on how many records and bytes are involved.
- **ListSerializer:** Ties everything together behind `serialize`, `deserialize` and `deep_copy`.

 ## Wire Format

```text
[
  { "Index": 0, "RandomIndex": 2, "Data": "A" },
  { "Index": 1, "RandomIndex": null, "Data": "B" },
  { "Index": 2, "RandomIndex": 2, "Data": "C" }
]
```

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| fake          | Enables a random list generator, useful for tests and benchmarks |
| full          | Enables all available features                                |

 ## Getting Started

```rust
# use list_serializer::{
#     core::{list::LinkedList, serializer::ListSerializerBuilder},
#     error::SerializerError,
#     json::JsonScannerReaderBuilder,
# };
fn main() -> Result<(), SerializerError> {
    let mut list = LinkedList::new();
    let a = list.push_back(Some("A".to_string()));
    list.push_back(Some("B".to_string()));
    let c = list.push_back(Some("C".to_string()));
    list.set_random(a, Some(c))?;
    list.set_random(c, Some(c))?;

    let serializer = ListSerializerBuilder::new()
        .reader(JsonScannerReaderBuilder::new().build()) // swap the default token reader
        .pretty_formatter(true)
        .build();

    let mut buffer = Vec::new();
    serializer.serialize(&list, &mut buffer)?;

    let restored = serializer.deserialize(&mut buffer.as_slice())?;
    assert!(restored == list);

    let copy = serializer.deep_copy(&list)?;
    assert!(copy.structurally_eq(&list));

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module: list model, records, mappers and the serializer
pub mod core;

/// Error types for serializer operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// JSON readers and writers for record sequences
pub mod json;

#[cfg(feature = "fake")]
/// Random list generation for tests and benchmarks
pub mod fake;
