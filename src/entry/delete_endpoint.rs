//! Defines the endpoint for deleting an entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Flash,
    entry::core::{EntryId, remove_entry},
};

/// The state needed to delete an entry.
#[derive(Debug, Clone)]
pub struct DeleteEntryState {
    /// The database connection holding the persisted entry list.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an entry, redirects to the entries view on
/// success.
///
/// Removal itself is idempotent; deleting an entry that is already gone
/// responds with a not-found alert so a stale page learns the entry no
/// longer exists.
pub async fn delete_entry_endpoint(
    State(state): State<DeleteEntryState>,
    Path(entry_id): Path<EntryId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLock.into_alert_response();
        }
    };

    match remove_entry(entry_id, &connection) {
        Ok(0) => Error::DeleteMissingEntry.into_alert_response(),
        Ok(_) => (
            HxRedirect(Flash::Deleted.redirect_url()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not delete entry {entry_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        entry::core::{Entry, EntryDraft, EntryId, add_entry, list_entries},
        test_utils::assert_hx_redirect,
    };

    use super::{DeleteEntryState, delete_entry_endpoint};

    fn get_test_state() -> DeleteEntryState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DeleteEntryState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn add_test_entry(state: &DeleteEntryState) -> Entry {
        let connection = state.db_connection.lock().unwrap();
        add_entry(
            EntryDraft::new(datetime!(2024-01-01 10:00 UTC), 3000.0, "お年玉".to_owned())
                .unwrap(),
            &connection,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn deletes_entry_and_redirects() {
        let state = get_test_state();
        let entry = add_test_entry(&state);

        let response = delete_entry_endpoint(State(state.clone()), Path(entry.id))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/entries?alert=deleted");

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(list_entries(&connection).unwrap(), []);
    }

    #[tokio::test]
    async fn deleting_unknown_entry_is_not_found_and_changes_nothing() {
        let state = get_test_state();
        let entry = add_test_entry(&state);

        let response = delete_entry_endpoint(State(state.clone()), Path(EntryId::new()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(list_entries(&connection).unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn deleting_twice_leaves_ledger_unchanged() {
        let state = get_test_state();
        let entry = add_test_entry(&state);

        delete_entry_endpoint(State(state.clone()), Path(entry.id))
            .await
            .into_response();
        let second_response = delete_entry_endpoint(State(state.clone()), Path(entry.id))
            .await
            .into_response();

        assert_eq!(second_response.status(), StatusCode::NOT_FOUND);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(list_entries(&connection).unwrap(), []);
    }
}
