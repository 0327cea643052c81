//! Mapping of flow and books failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use libris_books::BooksError;
use libris_oauth2::AuthError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Books(#[from] BooksError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(err) => match err {
                AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
                AuthError::InvalidState { .. } => StatusCode::BAD_REQUEST,
                AuthError::CallbackError(_) => StatusCode::UNAUTHORIZED,
                AuthError::MissingCode => StatusCode::BAD_REQUEST,
                AuthError::ExchangeFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthError::RevokeFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Books(err) => match err {
                BooksError::TokenRejected => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// What the client gets to read. Provider bodies, state values and tokens
    /// stay in the server log.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Auth(err) => match err {
                AuthError::Unauthorized => {
                    "User not authorized. Use the connect endpoint.".to_string()
                }
                AuthError::InvalidState { .. } => "Invalid state parameter.".to_string(),
                AuthError::CallbackError(message) => {
                    format!("Callback received error: {}", message)
                }
                AuthError::MissingCode => "Code not found.".to_string(),
                AuthError::ExchangeFailed(_) => "Problem with token exchange.".to_string(),
                AuthError::RevokeFailed(_) => {
                    "Failed to revoke token for the current user.".to_string()
                }
                AuthError::Configuration(_) => "Internal server error.".to_string(),
            },
            AppError::Books(err) => match err {
                BooksError::TokenRejected => {
                    "Access token was rejected. Use the connect endpoint.".to_string()
                }
                BooksError::EncodeJson(_) | BooksError::EncodeCsv(_) => {
                    "Couldn't encode the books.".to_string()
                }
                BooksError::Request(_) | BooksError::Status { .. } => {
                    "Couldn't load the user's volumes.".to_string()
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(status = status.as_u16(), error = %self, "Request failed");

        (status, self.client_message()).into_response()
    }
}
