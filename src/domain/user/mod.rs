//! User aggregate
//!
//! Contains the User entity, the role enumeration and the capability table.

pub mod model;

pub use model::{Capability, User, UserRole};
