pub mod models;
pub mod queries;
pub mod schema;

pub use models::{EventRecord, SummaryReport};
pub use schema::{open_db, StoreError};
