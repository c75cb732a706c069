//! Authenticated HTTP transport.
//!
//! The client core never touches credentials directly: it receives a
//! [`Transport`] that already carries the user's session, so everything
//! above this boundary is testable with a fake.

use async_trait::async_trait;
use reqwest::header::COOKIE;
use url::Url;

use courseflow_protocols::ClientError;

/// A single GET against the upstream API. Implementations attach the
/// ambient session credentials; callers interpret the status.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a path-and-query relative to the instance base URL. Absolute
    /// URLs (as produced by pagination `Link` headers) are passed through.
    async fn get(&self, path_and_query: &str) -> Result<TransportResponse, ClientError>;
}

/// A raw upstream response: status, pagination header, body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub link_header: Option<String>,
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Cookie-authenticated transport over reqwest. The session cookie is
/// borrowed from an existing browser login; no credential refresh exists.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    session_cookie: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, session_cookie: impl Into<String>) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::BaseUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            session_cookie: session_cookie.into(),
        })
    }

    fn resolve(&self, path_and_query: &str) -> Result<Url, ClientError> {
        if path_and_query.starts_with("http://") || path_and_query.starts_with("https://") {
            Url::parse(path_and_query)
                .map_err(|e| ClientError::BaseUrl(format!("{path_and_query}: {e}")))
        } else {
            self.base_url
                .join(path_and_query)
                .map_err(|e| ClientError::BaseUrl(format!("{path_and_query}: {e}")))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path_and_query: &str) -> Result<TransportResponse, ClientError> {
        let url = self.resolve(path_and_query)?;

        let mut request = self.client.get(url);
        if !self.session_cookie.is_empty() {
            request = request.header(COOKIE, &self.session_cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let link_header = response
            .headers()
            .get("link")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(TransportResponse {
            status,
            link_header,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_response_is_success() {
        let response = TransportResponse {
            status: 200,
            link_header: None,
            body: String::new(),
        };
        assert!(response.is_success());

        let response = TransportResponse {
            status: 401,
            link_header: None,
            body: String::new(),
        };
        assert!(!response.is_success());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = HttpTransport::new("not a url", "");
        assert!(matches!(result, Err(ClientError::BaseUrl(_))));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let transport = HttpTransport::new("https://canvas.example.edu", "").unwrap();

        let url = transport.resolve("/api/v1/courses?per_page=100").unwrap();
        assert_eq!(url.host_str(), Some("canvas.example.edu"));
        assert_eq!(url.path(), "/api/v1/courses");

        let url = transport
            .resolve("https://other.example.edu/api/v1/courses?page=2")
            .unwrap();
        assert_eq!(url.host_str(), Some("other.example.edu"));
    }
}
