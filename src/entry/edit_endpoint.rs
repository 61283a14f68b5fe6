//! Defines the endpoint for updating an existing entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Flash,
    entry::{
        core::{Entry, EntryId, update_entry},
        form::EntryForm,
    },
    timezone::get_local_offset,
};

/// The state needed to update an entry.
#[derive(Debug, Clone)]
pub struct EditEntryState {
    /// The database connection holding the persisted entry list.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for updating the entry with the ID in the path, redirects
/// to the entries view on success.
///
/// The ID itself is never changed by an update.
pub async fn edit_entry_endpoint(
    State(state): State<EditEntryState>,
    Path(entry_id): Path<EntryId>,
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

    let entry = Entry {
        id: entry_id,
        date: draft.date,
        amount: draft.amount,
        memo: draft.memo,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLock.into_alert_response();
        }
    };

    if let Err(error) = update_entry(entry, &connection) {
        tracing::error!("could not update entry {entry_id}: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(Flash::Updated.redirect_url()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
