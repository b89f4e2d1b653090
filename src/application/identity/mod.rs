//! Identity module - user registration and lookup

pub mod service;

pub use service::IdentityRegistry;
