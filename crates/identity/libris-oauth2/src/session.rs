//! Typed session contents.

use serde::{Deserialize, Serialize};

/// Keys of the session's key-value view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    /// Pending anti-forgery token of an in-flight connect.
    State,
    /// Bearer token granted by the provider.
    AccessToken,
}

/// Everything the flow keeps between requests.
///
/// Only the access token string is kept; expiry and refresh data from the
/// token response are dropped, so a rejected token means connecting again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(
        default,
        rename = "accessToken",
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SessionKey) -> Option<&str> {
        match key {
            SessionKey::State => self.state.as_deref(),
            SessionKey::AccessToken => self.access_token.as_deref(),
        }
    }

    pub fn set(&mut self, key: SessionKey, value: impl Into<String>) {
        let value = Some(value.into());
        match key {
            SessionKey::State => self.state = value,
            SessionKey::AccessToken => self.access_token = value,
        }
    }

    pub fn delete(&mut self, key: SessionKey) {
        match key {
            SessionKey::State => self.state = None,
            SessionKey::AccessToken => self.access_token = None,
        }
    }

    /// Reads the pending state and removes it in the same step.
    pub fn take_state(&mut self) -> Option<String> {
        self.state.take()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.access_token.is_none()
    }

    pub fn clear(&mut self) {
        self.state = None;
        self.access_token = None;
    }
}
