/// Module containing helpers for unpacking compressed vendor payloads
pub mod compression;
/// Module containing environment variable helpers used by the configuration
pub mod config;
/// Module containing logging utilities
pub mod logger;

pub use compression::*;
pub use config::*;
pub use logger::*;
