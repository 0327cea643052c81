//! Callback URL resolution.

use http::{HeaderMap, Uri, header::HOST};
use std::fmt;

const DEFAULT_SCHEME: &str = "http";
const FALLBACK_HOST: &str = "localhost";

/// Where a request claims to come from: the URI scheme (often absent for
/// origin-form requests) and the host the client addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: Option<String>,
    pub host: String,
}

impl RequestOrigin {
    pub fn new(scheme: Option<&str>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.map(str::to_string),
            host: host.into(),
        }
    }

    /// Reads the scheme from the URI and the host from the `Host` header,
    /// falling back to the URI authority.
    pub fn from_parts(uri: &Uri, headers: &HeaderMap) -> Self {
        let host = headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|authority| authority.to_string()))
            .unwrap_or_else(|| FALLBACK_HOST.to_string());

        Self {
            scheme: uri.scheme_str().map(str::to_string),
            host,
        }
    }
}

/// How a redirect URL was obtained, for the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectSource {
    Override,
    Request,
}

impl fmt::Display for RedirectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectSource::Override => write!(f, "using the configured redirect URL"),
            RedirectSource::Request => write!(f, "building the redirect URL from the request"),
        }
    }
}

/// Computes the callback URL registered with the provider.
#[derive(Debug, Clone)]
pub struct RedirectUrlResolver {
    override_url: Option<String>,
    callback_path: String,
}

impl RedirectUrlResolver {
    pub fn new(callback_path: impl Into<String>) -> Self {
        Self {
            override_url: None,
            callback_path: callback_path.into(),
        }
    }

    /// An empty override is ignored.
    pub fn with_override(mut self, override_url: Option<String>) -> Self {
        self.override_url = override_url.filter(|url| !url.is_empty());
        self
    }

    pub fn resolve(&self, origin: &RequestOrigin) -> (String, RedirectSource) {
        if let Some(url) = &self.override_url {
            return (url.clone(), RedirectSource::Override);
        }

        let scheme = origin
            .scheme
            .as_deref()
            .filter(|scheme| !scheme.is_empty())
            .unwrap_or(DEFAULT_SCHEME);

        (
            format!("{}://{}{}", scheme, origin.host, self.callback_path),
            RedirectSource::Request,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_override_wins_over_request() {
        let resolver = RedirectUrlResolver::new("/auth/callback")
            .with_override(Some("https://books.example.com/cb".to_string()));

        let origin = RequestOrigin::new(Some("http"), "internal:9000");
        let (url, source) = resolver.resolve(&origin);

        assert_eq!(url, "https://books.example.com/cb");
        assert_eq!(source, RedirectSource::Override);
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let resolver = RedirectUrlResolver::new("/auth/callback").with_override(Some(String::new()));

        let (url, source) = resolver.resolve(&RequestOrigin::new(None, "localhost:8080"));

        assert_eq!(url, "http://localhost:8080/auth/callback");
        assert_eq!(source, RedirectSource::Request);
    }

    #[test]
    fn test_missing_scheme_defaults_to_http() {
        let resolver = RedirectUrlResolver::new("/auth/callback");

        let (url, _) = resolver.resolve(&RequestOrigin::new(None, "books.example.com"));
        assert_eq!(url, "http://books.example.com/auth/callback");

        let (url, _) = resolver.resolve(&RequestOrigin::new(Some("https"), "books.example.com"));
        assert_eq!(url, "https://books.example.com/auth/callback");
    }

    #[test]
    fn test_origin_from_origin_form_request() {
        let uri: Uri = "/auth/connect".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("localhost:8080"));

        let origin = RequestOrigin::from_parts(&uri, &headers);

        assert_eq!(origin.scheme, None);
        assert_eq!(origin.host, "localhost:8080");
    }

    #[test]
    fn test_origin_from_absolute_uri_without_host_header() {
        let uri: Uri = "https://books.example.com/auth/connect".parse().unwrap();

        let origin = RequestOrigin::from_parts(&uri, &HeaderMap::new());

        assert_eq!(origin.scheme.as_deref(), Some("https"));
        assert_eq!(origin.host, "books.example.com");
    }
}
