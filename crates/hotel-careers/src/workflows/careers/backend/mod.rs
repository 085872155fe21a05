pub mod memory;
pub mod rest;

pub use memory::{InMemoryBackend, StoredObject};
pub use rest::RestBackend;
