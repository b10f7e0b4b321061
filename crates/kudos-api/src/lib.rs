pub mod auth;
pub mod feedback;
pub mod pages;
pub mod password;
pub mod routes;
pub mod session;
pub mod users;

use axum::http::StatusCode;

/// Map an unexpected database failure to a 500, leaving a trace of the cause.
pub(crate) fn internal_error(err: anyhow::Error) -> StatusCode {
    tracing::error!("internal error: {:#}", err);
    StatusCode::INTERNAL_SERVER_ERROR
}
