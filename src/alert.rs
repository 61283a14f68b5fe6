//! Alert messages: success banners shown after a mutation and error alerts
//! swapped into the page's alert container by htmx.

use maud::{Markup, html};

use crate::endpoints;

/// The success notification carried across the redirect that follows a
/// mutation, as the `alert` query parameter on the entries page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flash {
    /// An entry was created.
    Created,
    /// An entry was updated.
    Updated,
    /// An entry was deleted.
    Deleted,
}

impl Flash {
    /// The value used for the `alert` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Flash::Created => "created",
            Flash::Updated => "updated",
            Flash::Deleted => "deleted",
        }
    }

    /// Parse the `alert` query parameter. Unknown values are ignored so a
    /// hand-edited URL cannot produce a nonsense banner.
    pub fn from_query_value(value: &str) -> Option<Flash> {
        match value {
            "created" => Some(Flash::Created),
            "updated" => Some(Flash::Updated),
            "deleted" => Some(Flash::Deleted),
            _ => None,
        }
    }

    /// The entries page URL carrying this flash message.
    pub fn redirect_url(self) -> String {
        format!("{}?alert={}", endpoints::ENTRIES_VIEW, self.as_query_value())
    }

    fn message(self) -> &'static str {
        match self {
            Flash::Created => "Entry added.",
            Flash::Updated => "Entry updated.",
            Flash::Deleted => "Entry deleted.",
        }
    }
}

/// A success banner rendered at the top of the entries page.
pub fn flash_banner(flash: Flash) -> Markup {
    html! {
        div
            class="w-full max-w-2xl mb-4 px-4 py-3 rounded border \
                border-green-300 bg-green-50 text-green-800 text-sm \
                dark:bg-green-900/30 dark:border-green-800 dark:text-green-300"
            role="status"
        {
            (flash.message())
        }
    }
}

/// An error alert fragment with a bold `message` and explanatory `details`.
///
/// Endpoints respond with this fragment and an error status code; the form's
/// `hx-target-error` attribute swaps it into the page's alert container.
pub fn error_alert(message: &str, details: &str) -> Markup {
    html! {
        div
            class="block w-full px-4 py-3 rounded border border-red-300 \
                bg-red-50 text-red-800 text-sm shadow-lg \
                dark:bg-red-900 dark:border-red-800 dark:text-red-200"
            role="alert"
        {
            p class="font-semibold" { (message) }

            @if !details.is_empty() {
                p { (details) }
            }
        }
    }
}
