/// Random list generation.
pub mod list_generator;

pub use list_generator::{LinkedListGenerator, LinkedListGeneratorBuilder};
