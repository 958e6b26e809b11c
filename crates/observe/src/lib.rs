//! This crate contains the logging setup shared by the chaincode and its
//! tests: subscriber initialization and its configuration.
pub mod config;
pub mod tracing;

pub use config::Config;
