//! Entry management for the allowance ledger.
//!
//! This module contains everything related to entries:
//! - The `Entry` model, drafts, and the ledger operations over the persisted
//!   entry list
//! - The shared entry form and its server-side parsing
//! - View handlers for the entries page and the create/edit/delete flows

mod core;
mod create_endpoint;
mod delete_endpoint;
mod delete_page;
mod edit_endpoint;
mod edit_entry_page;
mod entries_page;
mod form;
mod new_entry_page;

pub use core::EntryId;
pub use create_endpoint::create_entry_endpoint;
pub use delete_endpoint::delete_entry_endpoint;
pub use delete_page::get_delete_entry_page;
pub use edit_endpoint::edit_entry_endpoint;
pub use edit_entry_page::get_edit_entry_page;
pub use entries_page::get_entries_page;
pub use new_entry_page::get_new_entry_page;
