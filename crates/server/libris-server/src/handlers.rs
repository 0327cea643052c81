//! Request handlers. Each one loads the session from its cookie, drives the
//! auth flow, and hands the saved jar back with the response whenever the
//! session changed.

use crate::error::AppError;
use crate::routes;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Uri, header};
use axum::response::{IntoResponse, Redirect, Response};
use libris_books::{BookFormat, BooksError, encode_csv, encode_json, negotiate};
use libris_oauth2::{
    CallbackParams, ConnectOutcome, DisconnectOutcome, RequestOrigin, SessionKey,
};
use libris_session::CookieSession;
use tracing::{info, warn};

/// `GET /auth/resource`: the caller's Google Books library as JSON or CSV.
pub async fn books(
    State(state): State<AppState>,
    mut session: CookieSession,
    headers: HeaderMap,
) -> Response {
    let access_token = match state.auth.ensure_authenticated(session.data()) {
        Ok(token) => token.to_string(),
        Err(e) => return AppError::from(e).into_response(),
    };

    let books = match state.books.list_books(&access_token).await {
        Ok(books) => books,
        Err(BooksError::TokenRejected) => {
            warn!("Books API rejected the access token; dropping it from the session");
            session.delete(SessionKey::AccessToken);
            return (session.save(), AppError::from(BooksError::TokenRejected)).into_response();
        }
        Err(e) => return AppError::from(e).into_response(),
    };

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let format = negotiate(accept);

    let body = match format {
        BookFormat::Json => encode_json(&books),
        BookFormat::Csv => encode_csv(&books),
    };

    match body {
        Ok(body) => {
            info!(count = books.len(), ?format, "Returning books");
            ([(header::CONTENT_TYPE, format.content_type())], body).into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// `GET /auth/connect`: starts the OAuth2 flow unless already connected.
pub async fn connect(
    State(state): State<AppState>,
    mut session: CookieSession,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let origin = RequestOrigin::from_parts(&uri, &headers);

    match state.auth.begin_connect(session.data_mut(), &origin) {
        Ok(ConnectOutcome::AlreadyConnected) => "Connected!".into_response(),
        Ok(ConnectOutcome::Redirect { authorization_url }) => {
            (session.save(), Redirect::temporary(&authorization_url)).into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// `GET /auth/disconnect`: revokes the token and forgets the session.
pub async fn disconnect(State(state): State<AppState>, mut session: CookieSession) -> Response {
    match state.auth.disconnect(session.data_mut()).await {
        Ok(DisconnectOutcome::Disconnected) => {
            (session.save(), "User disconnected!").into_response()
        }
        Ok(DisconnectOutcome::NotConnected) => {
            "User wasn't connected. Nothing was done.".into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// `GET /auth/callback`: the provider's redirect target.
///
/// The session is saved on failure too, so a consumed state cannot be
/// replayed. That includes a query string that does not parse.
pub async fn callback(
    State(state): State<AppState>,
    mut session: CookieSession,
    query: Result<Query<CallbackParams>, QueryRejection>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!("Rejecting callback: {}", rejection);
            let error = state.auth.reject_callback(session.data_mut());
            return (session.save(), AppError::from(error)).into_response();
        }
    };

    let origin = RequestOrigin::from_parts(&uri, &headers);
    let result = state
        .auth
        .handle_callback(session.data_mut(), &params, &origin)
        .await;
    let jar = session.save();

    match result {
        Ok(()) => (jar, Redirect::temporary(routes::CONNECT)).into_response(),
        Err(e) => (jar, AppError::from(e)).into_response(),
    }
}
