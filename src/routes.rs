//! HTTP surface: four routes over a shared [`UserStore`].
//!
//! | Method | Path          | Success                          |
//! |--------|---------------|----------------------------------|
//! | GET    | `/users`      | 200, bare JSON array of users    |
//! | GET    | `/users/{id}` | 200, the user                    |
//! | POST   | `/users`      | 201, the stored user with its ID |
//! | DELETE | `/users/{id}` | 200, the remaining users         |
//!
//! The two not-found bodies differ on purpose: a missing user on GET answers
//! with an all-zero user record, on DELETE with the JSON string
//! `"User not found"`. Existing clients depend on both shapes.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use thiserror::Error;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::Error;
use crate::model::User;
use crate::store::UserStore;

/// Body of the DELETE not-found response.
pub const USER_NOT_FOUND: &str = "User not found";

/// Request-level failures, rendered as plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer.
    #[error("Invalid ID format")]
    InvalidId,

    /// The POST body is not a JSON user record.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The mutation happened in memory but the file could not be rewritten.
    #[error("Error writing to file: {0}")]
    Persist(#[from] Error),

    /// The blocking task serving the request panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidId | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Persist(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }

        (status, self.to_string()).into_response()
    }
}

/// Build the router with request tracing attached.
pub fn router(store: Arc<UserStore>) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(store)
}

// Reads wait on the store lock, which writers hold across the file rewrite,
// so they run off the async workers too.
async fn list_users(State(store): State<Arc<UserStore>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = blocking(move || store.list()).await?;
    Ok(Json(users))
}

async fn get_user(
    State(store): State<Arc<UserStore>>,
    Path(raw): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw)?;
    let found = blocking(move || store.get(id)).await?;
    let response = match found {
        Some(user) => Json(user).into_response(),
        None => (StatusCode::NOT_FOUND, Json(User::default())).into_response(),
    };
    Ok(response)
}

async fn create_user(
    State(store): State<Arc<UserStore>>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    // Decoded from raw bytes so a missing Content-Type is not a rejection.
    let user: User =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let created = blocking(move || store.create(user)).await??;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_user(
    State(store): State<Arc<UserStore>>,
    Path(raw): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw)?;
    let remaining = blocking(move || store.remove(id)).await??;
    let response = match remaining {
        Some(users) => Json(users).into_response(),
        None => (StatusCode::NOT_FOUND, Json(USER_NOT_FOUND)).into_response(),
    };
    Ok(response)
}

async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::InvalidId)
}
