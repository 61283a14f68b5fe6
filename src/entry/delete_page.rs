//! Defines the route handler for the page asking the user to confirm
//! deleting an entry.
//!
//! Only one delete is ever pending: opening this page for another entry
//! replaces the pending one, and both Cancel and Confirm lead back to the
//! entries page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    entry::core::{Entry, EntryId, get_entry},
    html::{
        BUTTON_DANGER_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, format_signed_yen,
    },
    timezone::get_local_offset,
};

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

fn delete_entry_view(entry: &Entry, local_offset: UtcOffset) -> Markup {
    let delete_entry_route = format_endpoint(endpoints::ENTRY_API, entry.id);
    let date_text = entry
        .date
        .to_offset(local_offset)
        .format(DISPLAY_DATE_FORMAT)
        // The format only reads fields every date-time has.
        .expect("formatting a date-time with the display format cannot fail");

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Delete this entry?" }

                div class="rounded bg-white dark:bg-gray-800 border border-gray-200 \
                    dark:border-gray-700 p-4 space-y-1"
                {
                    p class="text-lg font-bold" { (format_signed_yen(entry.amount)) }

                    p class="text-sm text-gray-500 dark:text-gray-400" { (date_text) }

                    @if !entry.memo.is_empty() {
                        p class="text-sm break-words" { (entry.memo) }
                    }
                }

                p { "This cannot be undone." }

                button
                    hx-delete=(delete_entry_route)
                    hx-target-error="#alert-container"
                    id="confirm-delete-button"
                    tabindex="0"
                    class=(BUTTON_DANGER_STYLE)
                {
                    "Delete Entry"
                }

                p class="text-center"
                {
                    a href=(endpoints::ENTRIES_VIEW) class=(LINK_STYLE) { "Cancel" }
                }
            }
        }
    };

    base("Delete Entry", &[], &content)
}

/// The state needed for the delete confirmation page.
#[derive(Debug, Clone)]
pub struct DeleteEntryPageState {
    /// The database connection holding the persisted entry list.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DeleteEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the confirmation page shown before an entry is deleted.
pub async fn get_delete_entry_page(
    State(state): State<DeleteEntryPageState>,
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

    Ok(delete_entry_view(&entry, local_offset).into_response())
}
