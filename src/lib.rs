// Public API for integration tests and potential library usage

pub mod api;
pub mod catalog;
pub mod config;
pub mod hunt;
pub mod protocol;
pub mod qr;
pub mod store;
pub mod types;
