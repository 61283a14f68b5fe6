//! Defines the route handler for the page for creating a new entry.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    entry::form::{EntryFormDefaults, entry_form_fields, form_date_value},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, yen_input_styles,
    },
    timezone::local_now,
};

fn new_entry_view(date_value: String) -> Markup {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::ENTRIES_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Entry" }

                (entry_form_fields(&EntryFormDefaults {
                    date_value,
                    amount: None,
                    memo: None,
                }))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Add Entry"
                }

                p class="text-center"
                {
                    a href=(endpoints::ENTRIES_VIEW) class=(LINK_STYLE) { "Cancel" }
                }
            }
        }
    };

    base("New Entry", &[yen_input_styles()], &content)
}

/// The state needed for the new entry page.
#[derive(Debug, Clone)]
pub struct NewEntryPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating an entry, with the date defaulting to the
/// current local time at minute precision.
pub async fn get_new_entry_page(
    State(state): State<NewEntryPageState>,
) -> Result<Response, Error> {
    let now = local_now(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezone(state.local_timezone)
    })?;

    let date_value = form_date_value(now, now.offset());

    Ok(new_entry_view(date_value).into_response())
}
