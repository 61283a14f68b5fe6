//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/entries/{entry_id}/edit', use
//! [format_endpoint].

/// The root route which redirects to the entries page.
pub const ROOT: &str = "/";
/// The page for displaying the entry list and balance.
pub const ENTRIES_VIEW: &str = "/entries";
/// The page for creating a new entry.
pub const NEW_ENTRY_VIEW: &str = "/entries/new";
/// The page for editing an existing entry.
pub const EDIT_ENTRY_VIEW: &str = "/entries/{entry_id}/edit";
/// The page asking the user to confirm deleting an entry.
pub const DELETE_ENTRY_VIEW: &str = "/entries/{entry_id}/delete";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an entry.
pub const ENTRIES_API: &str = "/api/entries";
/// The route to delete a single entry.
pub const ENTRY_API: &str = "/api/entries/{entry_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/entries/{entry_id}/edit',
/// '{entry_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
