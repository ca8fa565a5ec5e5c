//! Error responses for page handlers.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use log::error;

use super::views;

/// Any failure while serving a page. Rendered as a generic 500 page; the
/// details only go to the log.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(views::render_error_page()),
        )
            .into_response()
    }
}
