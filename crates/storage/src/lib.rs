#![forbid(unsafe_code)]

pub mod json_file;
pub mod kv;

pub use json_file::JsonFileStore;
pub use kv::{InMemoryStore, KeyValueStore, StorageError, UnavailableStore};
