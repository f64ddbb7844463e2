/// Endpoint, operation and parameter models for API calls
pub mod requests;
/// Records of exchanged messages
pub mod responses;
/// SOAP envelope encoding and decoding
pub mod soap;
/// XML tree parsing and conversion to JSON
pub mod xml;
