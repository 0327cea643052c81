//! Session storage in a private cookie.
//!
//! [`CookieSession`] is an axum extractor that decodes the typed
//! [`AuthSession`] from an encrypted, authenticated cookie. Changes only reach
//! the browser through [`CookieSession::save`], whose returned jar has to be
//! part of the handler's response: a handler that drops it loses its writes.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use base64::{Engine, engine::general_purpose::STANDARD};
use libris_oauth2::{AuthSession, SessionKey};
use std::convert::Infallible;
use thiserror::Error;
use tracing::{debug, warn};

pub const SESSION_COOKIE: &str = "libris_session";

#[derive(Debug, Error)]
pub enum SessionKeyError {
    #[error("Session key is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Session key must be at least 64 bytes, got {0}")]
    TooShort(usize),
}

/// Decodes a base64 signing/encryption key of at least 64 bytes.
pub fn session_key_from_base64(encoded: &str) -> Result<Key, SessionKeyError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Key::try_from(bytes.as_slice()).map_err(|_| SessionKeyError::TooShort(bytes.len()))
}

/// Cookie attributes shared by every session cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookieConfig {
    pub secure: bool,
}

/// The caller's session, loaded from its cookie.
pub struct CookieSession {
    jar: PrivateCookieJar,
    data: AuthSession,
    cookie_config: SessionCookieConfig,
}

impl<S> FromRequestParts<S> for CookieSession
where
    S: Send + Sync,
    Key: FromRef<S>,
    SessionCookieConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self::from_jar(jar, SessionCookieConfig::from_ref(state)))
    }
}

impl CookieSession {
    /// Reads the session out of `jar`. A missing cookie, or one that fails
    /// decryption, gives an empty session.
    pub fn from_jar(jar: PrivateCookieJar, cookie_config: SessionCookieConfig) -> Self {
        let data = match jar.get(SESSION_COOKIE) {
            Some(cookie) => serde_json::from_str(cookie.value()).unwrap_or_else(|e| {
                warn!("Discarding undecodable session cookie: {}", e);
                AuthSession::default()
            }),
            None => AuthSession::default(),
        };

        Self {
            jar,
            data,
            cookie_config,
        }
    }

    pub fn get(&self, key: SessionKey) -> Option<&str> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: SessionKey, value: impl Into<String>) {
        self.data.set(key, value);
    }

    pub fn delete(&mut self, key: SessionKey) {
        self.data.delete(key);
    }

    pub fn data(&self) -> &AuthSession {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut AuthSession {
        &mut self.data
    }

    /// Writes the session into the cookie jar. Return the jar from the
    /// handler, before or alongside the body.
    pub fn save(self) -> PrivateCookieJar {
        if self.data.is_empty() {
            debug!("Session empty; removing cookie");
            return self.jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
        }

        // Serializing two optional strings cannot fail.
        let value = serde_json::to_string(&self.data).unwrap_or_default();

        let cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_config.secure);

        self.jar.add(cookie)
    }
}
