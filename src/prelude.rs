//! Prelude module for convenient imports
//!
//! ```ignore
//! use bisnode_client::prelude::*;
//! ```

// ============================================================================
// CLIENTS
// ============================================================================

/// REST API client
pub use crate::application::client::RestClient;

/// SOAP API client
pub use crate::application::soap::SoapClient;

/// Format views over the last response
pub use crate::application::interfaces::ResponseFormat;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Client configuration
pub use crate::application::config::{Config, RestApiConfig, SoapApiConfig};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Application error type
pub use crate::error::AppError;

// ============================================================================
// MODELS
// ============================================================================

/// Endpoints, operations and parameters
pub use crate::model::requests::{
    ApiMode, DocType, RestEndpoint, RestRequest, SoapOperation, SoapRequest,
};

/// Last SOAP exchange
pub use crate::model::responses::LastExchange;

/// Parsed XML tree
pub use crate::model::xml::XmlElement;

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use serde::{Deserialize, Serialize};
pub use serde_json::{Map, Value};
pub use tracing::{debug, error, info, warn};
