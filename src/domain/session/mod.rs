//! Session aggregate

pub mod model;

pub use model::{Session, SessionState};
