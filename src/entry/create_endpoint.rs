//! Defines the endpoint for creating a new entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that tolerates the optional memo field
// being absent from the submitted data.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Flash,
    entry::{core::add_entry, form::EntryForm},
    timezone::get_local_offset,
};

/// The state needed to create an entry.
#[derive(Debug, Clone)]
pub struct CreateEntryState {
    /// The database connection holding the persisted entry list.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new entry, redirects to the entries view on
/// success.
pub async fn create_entry_endpoint(
    State(state): State<CreateEntryState>,
    Form(form): Form<EntryForm>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezone(state.local_timezone).into_alert_response();
    };

    let draft = match form.into_draft(local_offset) {
        Ok(draft) => draft,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLock.into_alert_response();
        }
    };

    if let Err(error) = add_entry(draft, &connection) {
        tracing::error!("could not create entry: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(Flash::Created.redirect_url()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
