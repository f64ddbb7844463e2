//! Error type shared by the REST and SOAP clients
use reqwest::StatusCode;
use std::error::Error;
use std::fmt;

/// Errors returned by the Bisnode clients
#[derive(Debug)]
pub enum AppError {
    /// Transport failure reported by reqwest
    Network(reqwest::Error),
    /// I/O failure, e.g. while inflating a compressed payload
    Io(std::io::Error),
    /// JSON encoding or decoding failure
    Json(serde_json::Error),
    /// The vendor answered with a non-success status
    Unexpected(StatusCode),
    /// A response body could not be decoded into the requested shape
    Deserialization(String),
    /// A request payload could not be encoded
    SerializationError(String),
    /// The SOAP service answered with a `Fault` element
    SoapFault {
        /// `faultcode` of the fault
        code: String,
        /// `faultstring` of the fault
        message: String,
    },
    /// A format accessor was used before any response was stored
    EmptyResponse,
    /// The caller supplied a value the client cannot send
    InvalidInput(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Unexpected(status) => write!(f, "unexpected http status: {status}"),
            AppError::Deserialization(msg) => write!(f, "deserialization error: {msg}"),
            AppError::SerializationError(msg) => write!(f, "serialization error: {msg}"),
            AppError::SoapFault { code, message } => write!(f, "soap fault {code}: {message}"),
            AppError::EmptyResponse => write!(f, "empty response"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<quick_xml::Error> for AppError {
    fn from(e: quick_xml::Error) -> Self {
        AppError::Deserialization(e.to_string())
    }
}
