pub mod service;

pub use service::DeviceRegistry;
