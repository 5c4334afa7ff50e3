pub mod meter_reading;
pub mod query;
pub mod verdict;

pub use meter_reading::{kind_of, truthy, MeterReading, SchemaError};
pub use query::{Query, QueryError};
pub use verdict::Verdict;
