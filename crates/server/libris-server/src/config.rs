use clap::Parser;
use std::time::Duration;

/// Serve your Google Books library as JSON or CSV
#[derive(Debug, Clone, Parser)]
#[command(name = "libris-server")]
#[command(about = "Serve your Google Books library as JSON or CSV")]
pub struct Config {
    /// OAuth2 client ID of this application
    #[arg(long, env = "CLIENT_ID")]
    pub client_id: String,

    /// OAuth2 client secret of this application
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Callback URL registered with the provider. When unset it is built
    /// from each request's scheme and Host header.
    #[arg(long, env = "REDIRECT_URL")]
    pub redirect_url: Option<String>,

    /// Base64 key (at least 64 bytes) protecting the session cookie.
    /// A random key is used when unset, so sessions end on restart.
    #[arg(long, env = "SESSION_KEY", hide_env_values = true)]
    pub session_key: Option<String>,

    /// Mark the session cookie Secure (HTTPS only)
    #[arg(long, env = "SECURE_COOKIES")]
    pub secure_cookies: bool,

    /// Timeout for calls to Google, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from([
            "libris-server",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
        ])
        .unwrap();

        assert_eq!(config.client_id, "id");
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "libris-server",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
            "--host",
            "127.0.0.1",
            "--port",
            "3000",
            "--redirect-url",
            "https://books.example.com/auth/callback",
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(
            config.redirect_url.as_deref(),
            Some("https://books.example.com/auth/callback")
        );
    }
}
