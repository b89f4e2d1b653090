//! Device aggregate

pub mod model;

pub use model::Device;
