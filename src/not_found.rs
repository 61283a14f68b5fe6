//! The 404 not found page.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// A route handler that renders the 404 not found page.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a response containing the 404 not found page.
pub fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Sorry, that page does not exist.",
            "Check the address, or head back to the ledger.",
        ),
    )
}
