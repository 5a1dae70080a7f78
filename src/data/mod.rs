//! Data module - CSV loading, cleaning and calendar features

pub mod codes;
pub mod features;
mod loader;
pub mod processor;
mod record;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use codes::{RecodePolicy, Recoder, Season, Weather};
pub use loader::DataLoader;
pub use processor::DataProcessor;
pub use record::{BikeRecord, BikeTable};

#[cfg(test)]
pub(crate) use record::tests::record as test_record;
