//! Rate table storage backends

pub mod disk;
pub mod memory;

pub use disk::JsonFileStorage;
pub use memory::MemoryStorage;
