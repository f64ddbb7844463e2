use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Response serialization format of the REST API
///
/// The mode is also the file extension of every REST endpoint, so switching
/// it changes both the request path and the decoder applied to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// `.xml` endpoints, decoded with the XML tree parser
    #[default]
    Xml,
    /// `.json` endpoints, decoded with serde_json
    Json,
}

impl ApiMode {
    /// Extension appended to the endpoint name
    pub fn extension(&self) -> &'static str {
        match self {
            ApiMode::Xml => "xml",
            ApiMode::Json => "json",
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ApiMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(ApiMode::Xml),
            "json" => Ok(ApiMode::Json),
            other => Err(AppError::InvalidInput(format!("unknown api mode: {other}"))),
        }
    }
}

/// Endpoints of the REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestEndpoint {
    /// Gzip-compressed list of all registered companies
    ListCompaniesZipped,
    /// Short company report
    ShortReport,
    /// VAT (KMKR) registration data from the tax board
    KmkrData,
    /// Tax arrears from the tax board
    TaxArrears,
    /// Documents filed in the business register
    ArListDocs,
    /// Annual reports filed in the business register
    ArListReports,
}

impl RestEndpoint {
    /// All endpoints, in declaration order
    pub const ALL: [RestEndpoint; 6] = [
        RestEndpoint::ListCompaniesZipped,
        RestEndpoint::ShortReport,
        RestEndpoint::KmkrData,
        RestEndpoint::TaxArrears,
        RestEndpoint::ArListDocs,
        RestEndpoint::ArListReports,
    ];

    /// Path segment of the endpoint, without extension
    pub fn path(&self) -> &'static str {
        match self {
            RestEndpoint::ListCompaniesZipped => "listcompanieszipped",
            RestEndpoint::ShortReport => "shortreport",
            RestEndpoint::KmkrData => "kmkrData",
            RestEndpoint::TaxArrears => "taxArrears",
            RestEndpoint::ArListDocs => "arListDocs",
            RestEndpoint::ArListReports => "arListReports",
        }
    }

    /// Whether the body is a gzip member that has to be inflated
    pub fn is_compressed(&self) -> bool {
        matches!(self, RestEndpoint::ListCompaniesZipped)
    }
}

impl fmt::Display for RestEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Form parameters of a single REST call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestRequest {
    /// Form fields in send order
    pub form: Vec<(&'static str, String)>,
}

impl RestRequest {
    /// Request without a body
    pub fn empty() -> Self {
        Self::default()
    }

    /// Request carrying only the company registration code as `id`
    pub fn by_reg_code(reg_code: &str) -> Self {
        Self {
            form: vec![("id", reg_code.to_string())],
        }
    }

    /// True when no form fields are attached
    pub fn is_empty(&self) -> bool {
        self.form.is_empty()
    }
}

/// Operations of the SOAP service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoapOperation {
    /// User profile and api keys
    GetProfile,
    /// User profile and api keys of the Finnish service
    GetProfileFinland,
    /// Short credit report
    GetCreditReport,
    /// Free dummy variant of the credit report
    GetLightCreditReport,
    /// VAT (KMKR) registration data
    GetKmkrData,
    /// Tax arrears of an Estonian company
    GetTaxArrears,
    /// Free public company information
    GetFreeInfo,
    /// Registration code lookup by company name
    SearchCompany,
    /// Last annual report as PDF, with analysis
    GetLastAnnualReportPdf,
    /// Last annual report as XBRL, with analysis
    GetLastAnnualReportXbrl,
    /// Document ids, types and years of the filed annual reports
    ListAnnualReport,
    /// AAA credit rating
    GetAaaRating,
    /// Annual report of a given type and year, with analysis
    GetAnnualReport,
}

const PROFILE_PARAMS: &[&str] = &["email", "pass"];
const COMPANY_PARAMS: &[&str] = &["token", "country", "reg_code"];
const SEARCH_PARAMS: &[&str] = &["token", "country", "name"];
const ANNUAL_REPORT_PARAMS: &[&str] = &["token", "country", "reg_code", "doc_type", "annual_year"];

impl SoapOperation {
    /// All operations, in declaration order
    pub const ALL: [SoapOperation; 13] = [
        SoapOperation::GetProfile,
        SoapOperation::GetProfileFinland,
        SoapOperation::GetCreditReport,
        SoapOperation::GetLightCreditReport,
        SoapOperation::GetKmkrData,
        SoapOperation::GetTaxArrears,
        SoapOperation::GetFreeInfo,
        SoapOperation::SearchCompany,
        SoapOperation::GetLastAnnualReportPdf,
        SoapOperation::GetLastAnnualReportXbrl,
        SoapOperation::ListAnnualReport,
        SoapOperation::GetAaaRating,
        SoapOperation::GetAnnualReport,
    ];

    /// Operation name as declared by the service
    pub fn name(&self) -> &'static str {
        match self {
            SoapOperation::GetProfile => "getProfile",
            SoapOperation::GetProfileFinland => "getProfileFinland",
            SoapOperation::GetCreditReport => "getCreditReport",
            SoapOperation::GetLightCreditReport => "getLightCreditReport",
            SoapOperation::GetKmkrData => "getKmkrData",
            SoapOperation::GetTaxArrears => "getTaxArrears",
            SoapOperation::GetFreeInfo => "getFreeInfo",
            SoapOperation::SearchCompany => "searchCompany",
            SoapOperation::GetLastAnnualReportPdf => "getLastAnnualReportPdf",
            SoapOperation::GetLastAnnualReportXbrl => "getLastAnnualReportXbrl",
            SoapOperation::ListAnnualReport => "listAnnualReport",
            SoapOperation::GetAaaRating => "getAaaRating",
            SoapOperation::GetAnnualReport => "getAnnualReport",
        }
    }

    /// Parameter names in the order they are sent
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            SoapOperation::GetProfile | SoapOperation::GetProfileFinland => PROFILE_PARAMS,
            SoapOperation::SearchCompany => SEARCH_PARAMS,
            SoapOperation::GetAnnualReport => ANNUAL_REPORT_PARAMS,
            _ => COMPANY_PARAMS,
        }
    }

    /// Whether the session token is part of the parameter set
    pub fn requires_token(&self) -> bool {
        self.params().first() == Some(&"token")
    }

    /// Human readable signature, e.g. `getTaxArrears(token, country, reg_code)`
    pub fn signature(&self) -> String {
        format!("{}({})", self.name(), self.params().join(", "))
    }
}

impl fmt::Display for SoapOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoapOperation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoapOperation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown soap operation: {s}")))
    }
}

/// Annual report document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    /// `X`, XBRL
    #[serde(rename = "X")]
    Xbrl,
    /// `A`, PDF
    #[serde(rename = "A")]
    Pdf,
    /// `D`, signed DigiDoc container
    #[serde(rename = "D")]
    DigiDoc,
}

impl DocType {
    /// Code sent to the service
    pub fn code(&self) -> &'static str {
        match self {
            DocType::Xbrl => "X",
            DocType::Pdf => "A",
            DocType::DigiDoc => "D",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DocType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(DocType::Xbrl),
            "A" => Ok(DocType::Pdf),
            "D" => Ok(DocType::DigiDoc),
            other => Err(AppError::InvalidInput(format!("unknown document type: {other}"))),
        }
    }
}

/// Operation name plus parameters of a single SOAP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    /// Operation to invoke
    pub operation: SoapOperation,
    /// Parameters in send order
    pub params: Vec<(&'static str, String)>,
}

impl SoapRequest {
    /// Create a request without parameters
    pub fn new(operation: SoapOperation) -> Self {
        Self {
            operation,
            params: Vec::with_capacity(operation.params().len()),
        }
    }

    /// Append a parameter
    pub fn with_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Value of a parameter, if present
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Operation and parameter names, without values, for logging
    pub fn describe(&self) -> String {
        let names: Vec<&str> = self.params.iter().map(|(name, _)| *name).collect();
        format!("{}({})", self.operation.name(), names.join(", "))
    }
}
