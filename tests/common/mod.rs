#![allow(dead_code)]

pub mod mocks;

pub use mocks::MockFile;

use list_serializer::core::list::LinkedList;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Three nodes "A", "B", "C": the first points to the last, the last to
/// itself, the middle one has no random link.
pub fn abc_list() -> LinkedList {
    let mut list = LinkedList::new();
    let a = list.push_back(Some("A".to_string()));
    list.push_back(Some("B".to_string()));
    let c = list.push_back(Some("C".to_string()));
    list.set_random(a, Some(c)).unwrap();
    list.set_random(c, Some(c)).unwrap();
    list
}
