//! Health records: authoring and queries

pub mod queries;
pub mod store;

pub use queries::RecordQuery;
pub use store::{AddHealthRecordDto, RecordStore};
