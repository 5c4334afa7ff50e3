pub mod domain;
pub mod lookup;

pub use domain::{MeterReading, Query, QueryError, SchemaError, Verdict};
pub use lookup::{find_first, Match};
