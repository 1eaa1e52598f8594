//! Defines the app level error type and conversions to JSON responses and alerts.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;
use serde_json::json;

use crate::{alert::Alert, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month name could not be resolved to a calendar month.
    ///
    /// Month names are matched case-insensitively against the full English
    /// names, e.g. "March" or "march". Abbreviations and numbers are rejected.
    #[error("\"{0}\" is not a valid month name")]
    InvalidMonth(String),

    /// The page number or page size was not a positive integer.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// The seed source could not be reached, returned a non-success status,
    /// or returned data that is not a well-formed list of transactions.
    ///
    /// The stored transactions are left untouched when this error occurs.
    #[error("could not fetch seed data: {0}")]
    UpstreamFetchFailed(String),

    /// The backing store could not complete the operation.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("the transaction store is unavailable: {0}")]
    StoreUnavailable(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::StoreUnavailable(value.to_string())
    }
}

impl Error {
    /// The HTTP status code that distinguishes this error for API clients.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPagination(_) => StatusCode::BAD_REQUEST,
            Error::UpstreamFetchFailed(_) => StatusCode::BAD_GATEWAY,
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// A message that is safe to show to the client.
    ///
    /// Details of upstream and store failures stay in the server logs.
    fn public_message(&self) -> String {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPagination(_) | Error::NotFound => {
                self.to_string()
            }
            Error::UpstreamFetchFailed(_) => "Failed to initialize database".to_owned(),
            Error::StoreUnavailable(_) => "Failed to retrieve transactions".to_owned(),
        }
    }

    /// Render the error as an alert banner for the dashboard.
    pub(crate) fn into_alert(self) -> Markup {
        match self {
            Error::InvalidMonth(month) => Alert::error(
                "Unknown month",
                &format!("\"{month}\" is not a month. Pick a month from the list."),
            )
            .into_html(),
            Error::InvalidPagination(reason) => Alert::error(
                "Invalid page",
                &format!("{reason}. Go back to the first page and try again."),
            )
            .into_html(),
            Error::UpstreamFetchFailed(_) => Alert::error(
                "Could not load transactions",
                "The seed source could not be reached. Try again later.",
            )
            .into_html(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_html()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            error => {
                if matches!(
                    error,
                    Error::UpstreamFetchFailed(_) | Error::StoreUnavailable(_)
                ) {
                    tracing::error!("{error}");
                }

                (
                    error.status_code(),
                    Json(json!({ "error": error.public_message() })),
                )
                    .into_response()
            }
        }
    }
}
