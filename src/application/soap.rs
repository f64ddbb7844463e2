//! Client for the Bisnode SOAP API
//!
//! Operations are sent as SOAP 1.1 envelopes. Apart from the profile
//! lookups, every operation carries the session token set with
//! [`SoapClient::set_token`]; the profile lookup is the usual way to obtain
//! one.
//!
//! # Example
//! ```ignore
//! use bisnode_client::prelude::*;
//!
//! let mut client = SoapClient::new(Config::new());
//! client.set_token("TOKEN");
//! let arrears = client.get_tax_arrears("EST", "10000001").await?.as_json()?;
//! ```
use crate::application::config::{Config, SoapApiConfig};
use crate::application::interfaces::format::{ResponseFormat, non_empty};
use crate::constants::{LOG_BODY_LIMIT, USER_AGENT};
use crate::error::AppError;
use crate::model::requests::{DocType, SoapOperation, SoapRequest};
use crate::model::responses::LastExchange;
use crate::model::soap::{build_envelope, decode_result, response_element, soap_action};
use crate::model::xml::XmlElement;
use crate::utils::logger::truncate_for_log;
use reqwest::{Client as HttpClient, Url};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Client for the Bisnode SOAP API
pub struct SoapClient {
    config: SoapApiConfig,
    http_client: Option<HttpClient>,
    exchange: LastExchange,
}

impl SoapClient {
    /// Creates a client from the SOAP section of `config`
    pub fn new(config: Config) -> Self {
        Self {
            config: config.soap,
            http_client: None,
            exchange: LastExchange::default(),
        }
    }

    /// Current SOAP configuration
    pub fn config(&self) -> &SoapApiConfig {
        &self.config
    }

    /// Session token sent with company operations
    pub fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    /// Changes the service endpoint; the transport is rebuilt on the next call
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.config.url = url.into();
        self.http_client = None;
        self
    }

    /// Sets the session token
    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.config.token = Some(token.into());
        self
    }

    /// Forgets the session token
    pub fn clear_token(&mut self) -> &mut Self {
        self.config.token = None;
        self
    }

    /// Changes the target namespace of the operations
    pub fn set_namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Signatures of all operations this client can call
    pub fn functions(&self) -> Vec<String> {
        SoapOperation::ALL.iter().map(|op| op.signature()).collect()
    }

    /// Request envelope of the last call
    pub fn last_request(&self) -> &str {
        &self.exchange.request
    }

    /// Response envelope of the last call
    pub fn last_response(&self) -> &str {
        &self.exchange.response
    }

    /// Request headers of the last call
    pub fn last_request_headers(&self) -> &str {
        &self.exchange.request_headers
    }

    /// The whole last exchange
    pub fn last_exchange(&self) -> &LastExchange {
        &self.exchange
    }

    /// Gets user profile information and api keys
    pub async fn get_profile(&mut self, email: &str, pass: &str) -> Result<&mut Self, AppError> {
        self.profile(SoapOperation::GetProfile, email, pass).await
    }

    /// Gets user profile information and api keys from the Finnish service
    pub async fn get_profile_finland(
        &mut self,
        email: &str,
        pass: &str,
    ) -> Result<&mut Self, AppError> {
        self.profile(SoapOperation::GetProfileFinland, email, pass)
            .await
    }

    /// Gets the short credit report (EST only)
    pub async fn get_credit_report(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::GetCreditReport, country, reg_code)
            .await
    }

    /// Dummy request for the credit report (EST only)
    pub async fn get_light_credit_report(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::GetLightCreditReport, country, reg_code)
            .await
    }

    /// Gets VAT (KMKR) registration data (EST only)
    pub async fn get_kmkr_data(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::GetKmkrData, country, reg_code)
            .await
    }

    /// Gets tax arrears of an Estonian company from the tax board
    pub async fn get_tax_arrears(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::GetTaxArrears, country, reg_code)
            .await
    }

    /// Gets free public information about a company (EST only)
    pub async fn get_free_info(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::GetFreeInfo, country, reg_code)
            .await
    }

    /// Searches registration codes by company name (EST, LTU, LVA)
    pub async fn search_company(&mut self, country: &str, name: &str) -> Result<&mut Self, AppError> {
        let request = SoapRequest::new(SoapOperation::SearchCompany)
            .with_param("token", self.token_param())
            .with_param("country", country)
            .with_param("name", name);
        self.call(request).await?;
        Ok(self)
    }

    /// Gets the last annual report PDF file and its analysis (EST only)
    pub async fn get_last_annual_report_pdf(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::GetLastAnnualReportPdf, country, reg_code)
            .await
    }

    /// Gets the last annual report XBRL file and its analysis (EST only)
    pub async fn get_last_annual_report_xbrl(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::GetLastAnnualReportXbrl, country, reg_code)
            .await
    }

    /// Lists doc_id, doc_type and year of the filed annual reports (EST only)
    pub async fn list_annual_report(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::ListAnnualReport, country, reg_code)
            .await
    }

    /// Gets the AAA rating (EST only)
    pub async fn get_aaa_rating(
        &mut self,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        self.company(SoapOperation::GetAaaRating, country, reg_code)
            .await
    }

    /// Gets the annual report of a specific type and year, with analysis
    pub async fn get_annual_report(
        &mut self,
        country: &str,
        reg_code: &str,
        doc_type: DocType,
        annual_year: u16,
    ) -> Result<&mut Self, AppError> {
        let request = SoapRequest::new(SoapOperation::GetAnnualReport)
            .with_param("token", self.token_param())
            .with_param("country", country)
            .with_param("reg_code", reg_code)
            .with_param("doc_type", doc_type.code())
            .with_param("annual_year", annual_year.to_string());
        self.call(request).await?;
        Ok(self)
    }

    async fn profile(
        &mut self,
        operation: SoapOperation,
        email: &str,
        pass: &str,
    ) -> Result<&mut Self, AppError> {
        let request = SoapRequest::new(operation)
            .with_param("email", email)
            .with_param("pass", pass);
        self.call(request).await?;
        Ok(self)
    }

    async fn company(
        &mut self,
        operation: SoapOperation,
        country: &str,
        reg_code: &str,
    ) -> Result<&mut Self, AppError> {
        let request = SoapRequest::new(operation)
            .with_param("token", self.token_param())
            .with_param("country", country)
            .with_param("reg_code", reg_code);
        self.call(request).await?;
        Ok(self)
    }

    fn token_param(&self) -> String {
        match &self.config.token {
            Some(token) => token.clone(),
            None => {
                warn!("No session token set, the service will reject the call");
                String::new()
            }
        }
    }

    fn transport(&mut self) -> Result<HttpClient, AppError> {
        if let Some(client) = &self.http_client {
            return Ok(client.clone());
        }

        let client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(self.config.timeout))
            .build()?;
        debug!("SOAP transport created for {}", self.config.url);

        self.http_client = Some(client.clone());
        Ok(client)
    }

    /// Sends one operation and records the exchange
    async fn call(&mut self, request: SoapRequest) -> Result<(), AppError> {
        self.exchange = LastExchange::default();

        let http_client = self.transport()?;
        let operation = request.operation.name();
        let url = Url::parse(&self.config.url).map_err(|e| {
            AppError::InvalidInput(format!("invalid soap url {}: {e}", self.config.url))
        })?;
        let envelope = build_envelope(&request, &self.config.namespace)?;
        let action = soap_action(&self.config.namespace, operation);

        self.exchange.request_headers = LastExchange::format_request(
            "POST",
            &url,
            [
                (CONTENT_TYPE.as_str(), SOAP_CONTENT_TYPE),
                ("SOAPAction", action.as_str()),
            ],
        );
        self.exchange.request = envelope.clone();

        info!("SOAP {} -> {}", operation, url);
        debug!("SOAP request {}", request.describe());

        let action = HeaderValue::from_str(&action)
            .map_err(|e| AppError::InvalidInput(format!("invalid soap action: {e}")))?;
        let response = http_client
            .post(url)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", action)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);
        self.exchange.response = response.text().await?;
        debug!("{}", truncate_for_log(&self.exchange.response, LOG_BODY_LIMIT));

        // faults arrive with status 500, so they are checked before the status
        if let Ok(envelope) = XmlElement::parse(&self.exchange.response)
            && let Err(fault @ AppError::SoapFault { .. }) = response_element(&envelope)
        {
            error!("{} failed: {}", operation, fault);
            return Err(fault);
        }

        if !status.is_success() {
            error!("{} failed with status {}", operation, status);
            return Err(AppError::Unexpected(status));
        }
        Ok(())
    }
}

impl ResponseFormat for SoapClient {
    fn raw(&self) -> &str {
        &self.exchange.response
    }

    fn as_value(&self) -> Result<Value, AppError> {
        let envelope = XmlElement::parse(non_empty(self.raw())?)?;
        Ok(decode_result(response_element(&envelope)?))
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Display for SoapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}
