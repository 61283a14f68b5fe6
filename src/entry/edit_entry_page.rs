//! Defines the route handler for the page for editing an existing entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    entry::{
        core::{Entry, EntryId, get_entry},
        form::{EntryFormDefaults, entry_form_fields, form_date_value},
    },
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, yen_input_styles,
    },
    timezone::get_local_offset,
};

fn edit_entry_view(entry: &Entry, date_value: String) -> Markup {
    let edit_entry_route = format_endpoint(endpoints::EDIT_ENTRY_VIEW, entry.id);

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(edit_entry_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Entry" }

                (entry_form_fields(&EntryFormDefaults {
                    date_value,
                    amount: Some(entry.amount),
                    memo: Some(&entry.memo),
                }))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Save Entry"
                }

                p class="text-center"
                {
                    a href=(endpoints::ENTRIES_VIEW) class=(LINK_STYLE) { "Cancel" }
                }
            }
        }
    };

    base("Edit Entry", &[yen_input_styles()], &content)
}

/// The state needed for the edit entry page.
#[derive(Debug, Clone)]
pub struct EditEntryPageState {
    /// The database connection holding the persisted entry list.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for editing an entry, pre-filled from the stored entry
/// with the date truncated to minute precision in local time.
pub async fn get_edit_entry_page(
    State(state): State<EditEntryPageState>,
    Path(entry_id): Path<EntryId>,
) -> Result<Response, Error> {
    let entry = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLock)?;

        get_entry(entry_id, &connection)?
    };

    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezone(state.local_timezone)
    })?;

    let date_value = form_date_value(entry.date, local_offset);

    Ok(edit_entry_view(&entry, date_value).into_response())
}
