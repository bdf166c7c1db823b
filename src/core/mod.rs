//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod log;
pub mod provider;
pub mod rates;
pub mod storage;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, ConversionError, ConversionRequest, Side};
pub use provider::RateTableProvider;
pub use rates::RateTable;
pub use storage::RateTableStorage;
