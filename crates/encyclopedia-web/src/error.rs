use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tokio::task::JoinError;
use tracing::{error, warn};

use encyclopedia_core::EntryError;

use crate::pages;

/// Failure of a page handler
///
/// Expected outcomes (missing entry, empty collection) become ordinary pages
/// or redirects. Storage failures become a generic 500 page; the details only
/// go to the log.
#[derive(Debug)]
pub enum PageError {
    Entry(EntryError),
    Task(JoinError),
}

impl From<EntryError> for PageError {
    fn from(err: EntryError) -> Self {
        PageError::Entry(err)
    }
}

impl From<JoinError> for PageError {
    fn from(err: JoinError) -> Self {
        PageError::Task(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Entry(EntryError::NotFound { title }) => not_found_response(&title),
            PageError::Entry(EntryError::EmptyCollection) => Redirect::to("/").into_response(),
            PageError::Entry(err @ EntryError::AlreadyExists { .. }) => {
                message_response(StatusCode::CONFLICT, &err.to_string())
            }
            PageError::Entry(err @ EntryError::Invalid(_)) => {
                message_response(StatusCode::BAD_REQUEST, &err.to_string())
            }
            PageError::Entry(EntryError::StorageUnavailable(err)) => {
                if err.is_recoverable() {
                    warn!("storage unavailable: {err}");
                } else {
                    error!("storage unavailable: {err}");
                }
                if let Some(hint) = err.recovery_suggestion() {
                    warn!("{hint}");
                }
                internal_error_response()
            }
            PageError::Task(err) => {
                error!("request task failed: {err}");
                internal_error_response()
            }
        }
    }
}

pub fn not_found_response(title: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found(title))).into_response()
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Html(pages::message("Error", message))).into_response()
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::message(
            "Something went wrong",
            "The encyclopedia could not complete this request. Please try again later.",
        )),
    )
        .into_response()
}
