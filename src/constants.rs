/// Default base URL of the Bisnode REST API
pub const DEFAULT_API_URL: &str = "http://www.bisnode.ee/intranet/api";
/// Default endpoint of the Bisnode SOAP service
pub const DEFAULT_SOAP_URL: &str = "https://in.bisnode.ee/soap";
/// Default target namespace of the SOAP operations
pub const DEFAULT_SOAP_NAMESPACE: &str = "urn:bisnode";
/// Default timeout in seconds for both transports
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Maximum number of characters of a response body written to the debug log
pub const LOG_BODY_LIMIT: usize = 255;
/// User agent string used in HTTP requests to identify this client to the vendor
pub const USER_AGENT: &str = "bisnode-client/0.1.0";
/// SOAP 1.1 envelope namespace
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// Key under which XML attributes are placed when converting to JSON
pub const XML_ATTRIBUTES_KEY: &str = "@attributes";
