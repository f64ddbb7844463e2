//! # bisnode-client
//!
//! Async clients for the Bisnode Estonia business registry service.
//!
//! Two clients are provided:
//!
//! - [`RestClient`](application::client::RestClient) for the HTTP API, where
//!   every call is a form `POST` to `{base_url}/{api_key}/{endpoint}.{mode}`.
//! - [`SoapClient`](application::soap::SoapClient) for the SOAP API, where
//!   company operations carry a session token.
//!
//! Both keep the body of the last response and expose it through the
//! [`ResponseFormat`](application::interfaces::ResponseFormat) views: raw
//! text, XML tree, JSON string, dynamic value, map or a caller supplied type.
//!
//! ## Configuration
//!
//! [`Config::new`](application::config::Config::new) reads the environment
//! (and a `.env` file when present):
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BISNODE_API_URL` | `http://www.bisnode.ee/intranet/api` |
//! | `BISNODE_API_KEY` | empty |
//! | `BISNODE_API_MODE` | `xml` |
//! | `BISNODE_REST_TIMEOUT` | `30` |
//! | `BISNODE_ACCEPT_INVALID_CERTS` | `false` |
//! | `BISNODE_COOKIE_STORE` | `false` |
//! | `BISNODE_SOAP_URL` | `https://in.bisnode.ee/soap` |
//! | `BISNODE_SOAP_NAMESPACE` | `urn:bisnode` |
//! | `BISNODE_SOAP_TOKEN` | unset |
//! | `BISNODE_SOAP_TIMEOUT` | `30` |
//!
//! ## Example
//! ```ignore
//! use bisnode_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let mut client = RestClient::new(Config::new());
//!     let report = client.get_short_report("10000001").await?.as_json()?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

/// Client implementations, configuration and shared traits
pub mod application;
/// Global constants
pub mod constants;
/// Error type
pub mod error;
/// Request, response, SOAP and XML models
pub mod model;
/// Commonly used types, re-exported
pub mod prelude;
/// Environment, logging and compression helpers
pub mod utils;
