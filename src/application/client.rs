//! Client for the Bisnode REST API
//!
//! Every operation is a single `POST {base_url}/{api_key}/{endpoint}.{mode}`
//! with form-encoded parameters. The body of the last response is kept on
//! the client and can be viewed through [`ResponseFormat`].
//!
//! # Example
//! ```ignore
//! use bisnode_client::prelude::*;
//!
//! let mut client = RestClient::new(Config::new());
//! let report = client.get_short_report("10000001").await?.as_map()?;
//! ```
use crate::application::config::{Config, RestApiConfig};
use crate::application::interfaces::format::{ResponseFormat, non_empty};
use crate::constants::{LOG_BODY_LIMIT, USER_AGENT};
use crate::error::AppError;
use crate::model::requests::{ApiMode, RestEndpoint, RestRequest};
use crate::utils::compression::inflate_gzip_member;
use crate::utils::logger::truncate_for_log;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the Bisnode REST API
///
/// The HTTP transport is created on the first request and reused after that.
/// Operations take `&mut self` because each one overwrites the stored body,
/// and return the client so a format view can be chained directly.
pub struct RestClient {
    config: RestApiConfig,
    http_client: Option<HttpClient>,
    raw_data: String,
    // mode the stored body was requested in
    raw_mode: ApiMode,
}

impl RestClient {
    /// Creates a client from the REST section of `config`
    pub fn new(config: Config) -> Self {
        Self {
            raw_mode: config.rest.mode,
            config: config.rest,
            http_client: None,
            raw_data: String::new(),
        }
    }

    /// Current REST configuration
    pub fn config(&self) -> &RestApiConfig {
        &self.config
    }

    /// Response format requested from the API
    pub fn mode(&self) -> ApiMode {
        self.config.mode
    }

    /// Changes the api key used in later requests
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> &mut Self {
        self.config.api_key = api_key.into();
        self
    }

    /// Changes the base URL used in later requests
    pub fn set_api_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.config.base_url = url.into();
        self
    }

    /// Changes the response format requested in later requests
    pub fn set_mode(&mut self, mode: ApiMode) -> &mut Self {
        self.config.mode = mode;
        self
    }

    /// Full URL of `endpoint` under the current configuration
    pub fn endpoint_url(&self, endpoint: RestEndpoint) -> String {
        format!(
            "{}/{}/{}.{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key,
            endpoint.path(),
            self.config.mode.extension()
        )
    }

    /// Gets the list of all registered companies
    ///
    /// The endpoint answers with a gzip member; the stored body is the
    /// inflated document.
    pub async fn get_list_of_companies(&mut self) -> Result<&mut Self, AppError> {
        self.request(RestEndpoint::ListCompaniesZipped, RestRequest::empty())
            .await?;
        Ok(self)
    }

    /// Gets the short report of a company
    pub async fn get_short_report(&mut self, reg_code: &str) -> Result<&mut Self, AppError> {
        self.request(RestEndpoint::ShortReport, RestRequest::by_reg_code(reg_code))
            .await?;
        Ok(self)
    }

    /// Gets the VAT (KMKR) registration data of a company from the tax board
    pub async fn get_kmkr_data(&mut self, reg_code: &str) -> Result<&mut Self, AppError> {
        self.request(RestEndpoint::KmkrData, RestRequest::by_reg_code(reg_code))
            .await?;
        Ok(self)
    }

    /// Gets tax arrears information of a company from the tax board
    pub async fn get_tax_arrears(&mut self, reg_code: &str) -> Result<&mut Self, AppError> {
        self.request(RestEndpoint::TaxArrears, RestRequest::by_reg_code(reg_code))
            .await?;
        Ok(self)
    }

    /// Gets the list of documents filed in the business register
    pub async fn get_ar_list_docs(&mut self, reg_code: &str) -> Result<&mut Self, AppError> {
        self.request(RestEndpoint::ArListDocs, RestRequest::by_reg_code(reg_code))
            .await?;
        Ok(self)
    }

    /// Gets the list of annual reports filed in the business register
    pub async fn get_ar_list_reports(&mut self, reg_code: &str) -> Result<&mut Self, AppError> {
        self.request(RestEndpoint::ArListReports, RestRequest::by_reg_code(reg_code))
            .await?;
        Ok(self)
    }

    fn transport(&mut self) -> Result<HttpClient, AppError> {
        if let Some(client) = &self.http_client {
            return Ok(client.clone());
        }

        let client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(self.config.timeout))
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .cookie_store(self.config.cookie_store)
            .build()?;
        debug!("REST transport created");

        self.http_client = Some(client.clone());
        Ok(client)
    }

    /// Sends one request and stores its body
    async fn request(
        &mut self,
        endpoint: RestEndpoint,
        request: RestRequest,
    ) -> Result<(), AppError> {
        self.raw_data.clear();
        self.raw_mode = self.config.mode;

        if self.config.api_key.is_empty() {
            error!("Refusing to call {} without an api key", endpoint);
            return Err(AppError::InvalidInput("api key is not set".to_string()));
        }

        let http_client = self.transport()?;
        let url = self.endpoint_url(endpoint);
        debug!("POST {}", url);
        debug!("Form: {:?}", request.form);

        let mut builder = http_client.post(&url);
        if !request.is_empty() {
            builder = builder.form(&request.form);
        }
        let response = builder.send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = if endpoint.is_compressed() && status.is_success() {
            let payload = response.bytes().await?;
            inflate_gzip_member(&payload)?
        } else {
            response.text().await?
        };
        debug!("{}", truncate_for_log(&body, LOG_BODY_LIMIT));
        self.raw_data = body;

        if !status.is_success() {
            error!(
                "Request to {} failed with status {}: {}",
                endpoint,
                status,
                truncate_for_log(&self.raw_data, LOG_BODY_LIMIT)
            );
            return Err(AppError::Unexpected(status));
        }
        Ok(())
    }
}

impl ResponseFormat for RestClient {
    fn raw(&self) -> &str {
        &self.raw_data
    }

    fn as_value(&self) -> Result<Value, AppError> {
        match self.raw_mode {
            ApiMode::Xml => Ok(self.as_xml()?.to_value()),
            ApiMode::Json => {
                let raw = non_empty(&self.raw_data)?;
                Ok(serde_json::from_str(raw)?)
            }
        }
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Display for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_data)
    }
}
