//! Okozukai is a web app for keeping a simple allowance ledger: dated income
//! and spending entries with optional memos, and the running balance they add
//! up to.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod endpoints;
mod entry;
mod html;
mod not_found;
mod routing;
mod slot;
#[cfg(test)]
mod test_utils;
mod timezone;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use routing::build_router;

use crate::{
    alert::error_alert,
    html::{error_view, render},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount field could not be parsed as a number.
    ///
    /// Callers should pass in the raw form input that failed to parse.
    #[error("could not parse \"{0}\" as an amount")]
    InvalidAmount(String),

    /// The amount parsed to NaN or an infinity.
    ///
    /// Entries record real money, so only finite amounts are allowed into
    /// the ledger.
    #[error("the amount must be a finite number")]
    NonFiniteAmount,

    /// The date field could not be parsed as a date and time.
    ///
    /// Callers should pass in the raw date string and the original parse
    /// error as a string.
    #[error("could not parse \"{0}\" as a date and time: {1}")]
    InvalidDate(String, String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., the entry ID) are correct and that the resource has been
    /// created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an entry that is not in the ledger.
    #[error("tried to update an entry that is not in the ledger")]
    UpdateMissingEntry,

    /// Tried to delete an entry that is not in the ledger.
    #[error("tried to delete an entry that is not in the ledger")]
    DeleteMissingEntry,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// The stored entry list could not be serialized or deserialized as JSON.
    #[error("could not read or write the stored entry list: {0}")]
    EntrySerialization(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_view(
                    "Server Error",
                    "500",
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings \
                        and ensure the timezone has been set to a valid, canonical timezone string."
                    ),
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Server Error",
                        "500",
                        "Sorry, something went wrong.",
                        "Try again later or check the server logs.",
                    ),
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidAmount(raw) => render(
                StatusCode::BAD_REQUEST,
                error_alert(
                    "Invalid amount",
                    &format!(
                        "\"{raw}\" could not be read as a number. Enter income as a positive \
                        number and spending as a negative number."
                    ),
                ),
            ),
            Error::NonFiniteAmount => render(
                StatusCode::BAD_REQUEST,
                error_alert("Invalid amount", "The amount must be a finite number."),
            ),
            Error::InvalidDate(raw, _) => render(
                StatusCode::BAD_REQUEST,
                error_alert(
                    "Invalid date",
                    &format!("\"{raw}\" could not be read as a date and time."),
                ),
            ),
            Error::UpdateMissingEntry => render(
                StatusCode::NOT_FOUND,
                error_alert("Could not update entry", "The entry could not be found."),
            ),
            Error::DeleteMissingEntry => render(
                StatusCode::NOT_FOUND,
                error_alert(
                    "Could not delete entry",
                    "The entry could not be found. \
                    Try refreshing the page to see if the entry has already been deleted.",
                ),
            ),
            Error::InvalidTimezone(timezone) => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_alert(
                    "Invalid timezone settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings \
                        and ensure the timezone has been set to a valid, canonical timezone string."
                    ),
                ),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_alert(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        }
    }
}
