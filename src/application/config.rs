use crate::constants::{
    DEFAULT_API_URL, DEFAULT_SOAP_NAMESPACE, DEFAULT_SOAP_URL, DEFAULT_TIMEOUT_SECONDS,
};
use crate::model::requests::ApiMode;
use crate::utils::config::{get_env_flag, get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the Bisnode clients
pub struct Config {
    /// REST API configuration
    pub rest: RestApiConfig,
    /// SOAP API configuration
    pub soap: SoapApiConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL, the api key and endpoint are appended to it
    pub base_url: String,
    /// API key generated in the Bisnode intranet
    pub api_key: String,
    /// Response format requested from the API
    pub mode: ApiMode,
    /// Timeout in seconds for REST requests
    pub timeout: u64,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
    /// Keep cookies set by the API between requests
    pub cookie_store: bool,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the SOAP API
pub struct SoapApiConfig {
    /// Service endpoint the envelopes are posted to
    pub url: String,
    /// Target namespace of the operations
    pub namespace: String,
    /// Session token sent with every company operation
    pub token: Option<String>,
    /// Timeout in seconds for SOAP requests
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            mode: ApiMode::default(),
            timeout: DEFAULT_TIMEOUT_SECONDS,
            accept_invalid_certs: false,
            cookie_store: false,
        }
    }
}

impl Default for SoapApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOAP_URL.to_string(),
            namespace: DEFAULT_SOAP_NAMESPACE.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    /// Creates a new configuration from the environment
    ///
    /// A `.env` file in the working directory is loaded first. Unset
    /// variables fall back to the vendor defaults.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let api_key = get_env_or_default("BISNODE_API_KEY", String::new());
        if api_key.is_empty() {
            error!("BISNODE_API_KEY not found in environment variables or .env file");
        }

        Config {
            rest: RestApiConfig {
                base_url: get_env_or_default("BISNODE_API_URL", DEFAULT_API_URL.to_string()),
                api_key,
                mode: get_env_or_default("BISNODE_API_MODE", ApiMode::Xml),
                timeout: get_env_or_default("BISNODE_REST_TIMEOUT", DEFAULT_TIMEOUT_SECONDS),
                accept_invalid_certs: get_env_flag("BISNODE_ACCEPT_INVALID_CERTS", false),
                cookie_store: get_env_flag("BISNODE_COOKIE_STORE", false),
            },
            soap: SoapApiConfig {
                url: get_env_or_default("BISNODE_SOAP_URL", DEFAULT_SOAP_URL.to_string()),
                namespace: get_env_or_default(
                    "BISNODE_SOAP_NAMESPACE",
                    DEFAULT_SOAP_NAMESPACE.to_string(),
                ),
                token: get_env_or_none("BISNODE_SOAP_TOKEN"),
                timeout: get_env_or_default("BISNODE_SOAP_TIMEOUT", DEFAULT_TIMEOUT_SECONDS),
            },
        }
    }

    /// Configuration with vendor defaults only, ignoring the environment
    pub fn with_defaults() -> Self {
        Config {
            rest: RestApiConfig::default(),
            soap: SoapApiConfig::default(),
        }
    }

    /// Configuration pointing both APIs at `base_url`, useful for tests and
    /// staging hosts
    pub fn for_base_url(base_url: &str, api_key: &str, mode: ApiMode) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Config {
            rest: RestApiConfig {
                base_url: base_url.to_string(),
                api_key: api_key.to_string(),
                mode,
                ..RestApiConfig::default()
            },
            soap: SoapApiConfig {
                url: format!("{base_url}/soap"),
                ..SoapApiConfig::default()
            },
        }
    }
}
