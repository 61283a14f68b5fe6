//! Defines the route handler for the page that lists entries and shows the
//! current balance.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    alert::{Flash, flash_banner},
    endpoints::{self, format_endpoint},
    entry::core::{Entry, balance, list_entries, sorted_for_display},
    html::{
        BADGE_INCOME_STYLE, BADGE_SPENDING_STYLE, ENTRY_CARD_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base, format_signed_yen, format_yen,
    },
    timezone::get_local_offset,
};

/// The max number of graphemes to display for a memo in the entry list before
/// truncating and displaying an ellipsis.
const MAX_MEMO_GRAPHEMES: usize = 64;

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

fn truncated_memo(memo: &str) -> String {
    let graphemes: Vec<&str> = memo.graphemes(true).collect();

    if graphemes.len() <= MAX_MEMO_GRAPHEMES {
        memo.to_owned()
    } else {
        format!("{}…", graphemes[..MAX_MEMO_GRAPHEMES].concat())
    }
}

fn entry_list_item(entry: &Entry, local_offset: UtcOffset) -> Markup {
    let is_income = entry.amount > 0.0;
    let badge = if is_income { "Income" } else { "Spending" };
    let badge_style = if is_income {
        BADGE_INCOME_STYLE
    } else {
        BADGE_SPENDING_STYLE
    };
    let date_text = entry
        .date
        .to_offset(local_offset)
        .format(DISPLAY_DATE_FORMAT)
        // The format only reads fields every date-time has.
        .expect("formatting a date-time with the display format cannot fail");

    html! {
        li class=(ENTRY_CARD_STYLE) data-entry-id=(entry.id)
        {
            div class="min-w-0"
            {
                span class=(badge_style) { (badge) }

                p class={ "text-lg font-bold " (amount_class(entry.amount)) }
                {
                    (format_signed_yen(entry.amount))
                }

                p class="text-sm text-gray-500 dark:text-gray-400" { (date_text) }

                @if !entry.memo.is_empty() {
                    p class="text-sm mt-1 break-words" { (truncated_memo(&entry.memo)) }
                }
            }

            div class="flex gap-3 items-start shrink-0"
            {
                a
                    href=(format_endpoint(endpoints::EDIT_ENTRY_VIEW, entry.id))
                    class=(LINK_STYLE)
                {
                    "Edit"
                }

                a
                    href=(format_endpoint(endpoints::DELETE_ENTRY_VIEW, entry.id))
                    class="text-red-600 hover:text-red-500 dark:text-red-500 \
                        dark:hover:text-red-400 underline"
                {
                    "Delete"
                }
            }
        }
    }
}

fn empty_state() -> Markup {
    html! {
        div class="text-center py-16 px-4"
        {
            h3 class="text-2xl font-bold mb-2" { "No entries yet" }

            p class="text-gray-500 dark:text-gray-400"
            {
                "Add your first entry to start your allowance book."
            }
        }
    }
}

fn entries_view(entries: Vec<Entry>, local_offset: UtcOffset, flash: Option<Flash>) -> Markup {
    let current_balance = balance(&entries);
    let sorted_entries = sorted_for_display(entries);

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl space-y-4"
            {
                @if let Some(flash) = flash {
                    (flash_banner(flash))
                }

                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Okozukai" }

                    a href=(endpoints::NEW_ENTRY_VIEW) class=(LINK_STYLE) { "New Entry" }
                }

                section
                    class="rounded bg-blue-600 dark:bg-blue-700 text-white \
                        text-center p-6 shadow"
                {
                    p class="text-sm font-medium opacity-80" { "Current balance" }

                    p id="balance" class="text-4xl font-bold" { (format_yen(current_balance)) }
                }

                @if sorted_entries.is_empty() {
                    (empty_state())
                } @else {
                    ul class="space-y-3"
                    {
                        @for entry in &sorted_entries {
                            (entry_list_item(entry, local_offset))
                        }
                    }
                }
            }
        }
    };

    base("Entries", &[], &content)
}

/// The query parameters accepted by the entries page.
#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    /// The flash message to show, set by the redirect after a mutation.
    pub alert: Option<String>,
}

/// The state needed for the entries page.
#[derive(Debug, Clone)]
pub struct EntriesViewState {
    /// The database connection holding the persisted entry list.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for EntriesViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page listing all entries, newest first, with the current
/// balance.
pub async fn get_entries_page(
    State(state): State<EntriesViewState>,
    Query(query): Query<EntriesQuery>,
) -> Result<Response, Error> {
    let entries = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLock)?;

        list_entries(&connection)?
    };

    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezone(state.local_timezone)
    })?;

    let flash = query.alert.as_deref().and_then(Flash::from_query_value);

    Ok(entries_view(entries, local_offset, flash).into_response())
}
