/// REST API client
pub mod client;
/// Application configuration module
pub mod config;
/// Traits shared by the clients
pub mod interfaces;
/// SOAP API client
pub mod soap;
