//! OAuth2 protocol types.

use serde::{Deserialize, Serialize};

/// Query parameters the provider sends back to the callback endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    pub fn state(&self) -> Option<&str> {
        non_empty(&self.state)
    }

    pub fn code(&self) -> Option<&str> {
        non_empty(&self.code)
    }

    /// Provider error, with its description appended when one was sent.
    pub fn error_message(&self) -> Option<String> {
        let error = non_empty(&self.error)?;
        match non_empty(&self.error_description) {
            Some(description) => Some(format!("{}: {}", error, description)),
            None => Some(error.to_string()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// OAuth2 token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_count_as_missing() {
        let params = CallbackParams {
            state: Some(String::new()),
            code: Some(String::new()),
            error: Some(String::new()),
            error_description: Some("ignored".to_string()),
        };

        assert_eq!(params.state(), None);
        assert_eq!(params.code(), None);
        assert_eq!(params.error_message(), None);
    }

    #[test]
    fn test_error_message_includes_description() {
        let params = CallbackParams {
            error: Some("access_denied".to_string()),
            error_description: Some("The user said no".to_string()),
            ..Default::default()
        };

        assert_eq!(
            params.error_message().as_deref(),
            Some("access_denied: The user said no")
        );
    }

    #[test]
    fn test_token_response_deserialize_minimal() {
        let json = r#"{ "access_token": "tok_xyz" }"#;

        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "tok_xyz");
        assert_eq!(token.refresh_token, None);
    }
}
