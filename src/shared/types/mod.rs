pub mod errors;
pub mod scan;
pub mod time;

pub use errors::*;
pub use scan::*;
pub use time::*;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
