use pretty_simple_display::{DebugPretty, DisplaySimple};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// The last request/response pair exchanged with the SOAP service
#[derive(DebugPretty, DisplaySimple, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastExchange {
    /// Request envelope as sent
    pub request: String,
    /// Request line followed by the headers as sent, one `name: value` per
    /// line
    pub request_headers: String,
    /// Response envelope as received
    pub response: String,
}

impl LastExchange {
    /// Renders request headers the way they are stored in [`LastExchange`]
    pub fn format_headers<'a>(headers: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
        headers
            .into_iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders an HTTP/1.1 request line, the `Host` header and `headers`
    pub fn format_request<'a>(
        method: &str,
        url: &Url,
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> String {
        let target = match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        };
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        let headers = Self::format_headers(std::iter::once(("Host", host.as_str())).chain(headers.into_iter().map(|(name, value)| (name, value))));
        format!("{method} {target} HTTP/1.1\n{headers}")
    }
}
