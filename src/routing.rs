//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    entry::{
        create_entry_endpoint, delete_entry_endpoint, edit_entry_endpoint, get_delete_entry_page,
        get_edit_entry_page, get_entries_page, get_new_entry_page,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::ENTRIES_VIEW, get(get_entries_page))
        .route(endpoints::NEW_ENTRY_VIEW, get(get_new_entry_page))
        .route(
            endpoints::EDIT_ENTRY_VIEW,
            get(get_edit_entry_page).put(edit_entry_endpoint),
        )
        .route(endpoints::DELETE_ENTRY_VIEW, get(get_delete_entry_page))
        .route(endpoints::ENTRIES_API, post(create_entry_endpoint))
        .route(endpoints::ENTRY_API, delete(delete_entry_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the entries page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::ENTRIES_VIEW)
}
