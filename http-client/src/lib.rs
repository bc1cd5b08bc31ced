//! Private HTTP transport for widget server communication
//!
//! This crate provides the minimal plumbing the widget API needs: building a
//! request URI from host, port, path and a flat parameter mapping, and issuing
//! blocking GET/POST requests that report the raw status and body. It performs
//! no retries of its own; polling belongs to the caller.

mod error;
mod params;

pub use error::TransportError;
pub use params::{ParamValue, Params};
pub use url::Url;

use std::time::Duration;
use tracing::trace;

/// Status and body of a completed HTTP exchange, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Build `http://{host}:{port}{path}?{query}` from a parameter mapping
///
/// Keys and values are percent-encoded and joined with `&` in sorted key
/// order. An empty mapping produces no query string. A bare IPv6 host such
/// as `::1` is bracketed; an already bracketed one is used as given.
///
/// # Example
/// ```rust
/// use http_client::{compose_uri, Params, ParamValue};
///
/// let mut params = Params::new();
/// params.insert("id".to_string(), ParamValue::from("a b"));
/// let uri = compose_uri("localhost", 9999, "/widgets", &params).unwrap();
/// assert_eq!(uri.as_str(), "http://localhost:9999/widgets?id=a%20b");
/// ```
pub fn compose_uri(
    host: &str,
    port: u16,
    path: &str,
    params: &Params,
) -> Result<Url, TransportError> {
    if host.trim().is_empty() {
        return Err(TransportError::InvalidUri("empty host".to_string()));
    }

    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    // IPv6 literals need brackets in the authority
    let authority_host = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };

    let mut url = Url::parse(&format!("http://{}:{}{}", authority_host, port, path))
        .map_err(|e| TransportError::InvalidUri(format!("{}: {}", host, e)))?;

    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if !query.is_empty() {
        url.set_query(Some(&query));
    }

    Ok(url)
}

/// The request seam used by the widget API
///
/// Implementations report every HTTP status as a [`RawResponse`]; only
/// failures that leave no status behind are errors. `timeout` bounds a
/// single request.
pub trait Transport: Send + Sync {
    fn get(&self, uri: &Url, timeout: Duration) -> Result<RawResponse, TransportError>;

    fn post(&self, uri: &Url, timeout: Duration) -> Result<RawResponse, TransportError>;
}

/// Blocking HTTP client backed by a shared `ureq` agent
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_connect_timeout(Duration::from_secs(5))
    }

    /// Create a client whose connection attempts give up after `timeout`
    pub fn with_connect_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout_connect(timeout).build(),
        }
    }

    fn send(&self, method: &str, uri: &Url, timeout: Duration) -> Result<RawResponse, TransportError> {
        trace!(method, uri = %uri, "sending request");

        let response = match self.agent.request_url(method, uri).timeout(timeout).call() {
            Ok(response) => response,
            // 4xx/5xx still carry a status the caller needs to see
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => return Err(map_transport(transport)),
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        trace!(method, status, "received response");
        Ok(RawResponse::new(status, body))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpClient {
    fn get(&self, uri: &Url, timeout: Duration) -> Result<RawResponse, TransportError> {
        self.send("GET", uri, timeout)
    }

    fn post(&self, uri: &Url, timeout: Duration) -> Result<RawResponse, TransportError> {
        self.send("POST", uri, timeout)
    }
}

fn map_transport(transport: ureq::Transport) -> TransportError {
    match transport.kind() {
        ureq::ErrorKind::InvalidUrl | ureq::ErrorKind::UnknownScheme => {
            TransportError::InvalidUri(transport.to_string())
        }
        _ => TransportError::Network(transport.to_string()),
    }
}
