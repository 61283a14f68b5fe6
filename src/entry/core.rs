//! Defines the core data model and ledger operations for entries.
//!
//! The ledger persists its entries as a single JSON array stored in a
//! key-value slot, so every mutation reads the full list, applies one change,
//! and writes the full list back before returning.

use std::fmt;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, slot};

/// The slot key under which the full entry list is stored.
pub const ENTRIES_SLOT_KEY: &str = "allowance-entries";

// ============================================================================
// MODELS
// ============================================================================

/// The unique identifier of an entry.
///
/// Assigned when the entry is created and never changed or reused afterwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generate a fresh, unique entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One ledger record: when money moved, how much, and an optional note about
/// what for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The ID of the entry.
    pub id: EntryId,
    /// When the money moved, normalized to UTC. Stored as an RFC 3339 string.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The amount of money received (positive) or spent (negative).
    pub amount: f64,
    /// A free-text note about the entry. May be empty.
    pub memo: String,
}

/// A validated, not-yet-stored entry.
///
/// Use [EntryDraft::new] to construct one; it rejects non-finite amounts so
/// NaN and infinities can never reach the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    /// When the money moved, normalized to UTC.
    pub date: OffsetDateTime,
    /// The amount of money received (positive) or spent (negative).
    pub amount: f64,
    /// A free-text note about the entry. May be empty.
    pub memo: String,
}

impl EntryDraft {
    /// Create a draft entry.
    ///
    /// # Errors
    /// Returns [Error::NonFiniteAmount] if `amount` is NaN or infinite.
    pub fn new(date: OffsetDateTime, amount: f64, memo: String) -> Result<Self, Error> {
        if !amount.is_finite() {
            return Err(Error::NonFiniteAmount);
        }

        Ok(Self { date, amount, memo })
    }
}

// ============================================================================
// LEDGER OPERATIONS
// ============================================================================

fn load_entries(connection: &Connection) -> Result<Vec<Entry>, Error> {
    match slot::read_slot(ENTRIES_SLOT_KEY, connection)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|error| Error::EntrySerialization(error.to_string())),
        None => Ok(Vec::new()),
    }
}

fn store_entries(entries: &[Entry], connection: &Connection) -> Result<(), Error> {
    let raw = serde_json::to_string(entries)
        .map_err(|error| Error::EntrySerialization(error.to_string()))?;

    slot::write_slot(ENTRIES_SLOT_KEY, &raw, connection)
}

/// Retrieve all entries in the ledger, in stored order (newest first).
///
/// Display ordering is a view concern, see [sorted_for_display].
///
/// # Errors
/// This function will return a:
/// - [Error::EntrySerialization] if the stored list cannot be parsed,
/// - or [Error::SqlError] if there is an SQL error.
pub fn list_entries(connection: &Connection) -> Result<Vec<Entry>, Error> {
    load_entries(connection)
}

/// Retrieve a single entry by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a stored entry,
/// - or any error of [list_entries].
pub fn get_entry(id: EntryId, connection: &Connection) -> Result<Entry, Error> {
    load_entries(connection)?
        .into_iter()
        .find(|entry| entry.id == id)
        .ok_or(Error::NotFound)
}

/// Create a new entry from `draft` and persist it.
///
/// The entry is assigned a fresh ID and prepended to the stored list. The
/// full list is written back to the store before this function returns.
///
/// # Errors
/// This function will return a:
/// - [Error::NonFiniteAmount] if the draft's amount is NaN or infinite,
/// - or any error of [list_entries].
pub fn add_entry(draft: EntryDraft, connection: &Connection) -> Result<Entry, Error> {
    // Re-check even though `EntryDraft::new` already validated: a corrupted
    // amount must never be written into the slot.
    if !draft.amount.is_finite() {
        return Err(Error::NonFiniteAmount);
    }

    let entry = Entry {
        id: EntryId::new(),
        date: draft.date,
        amount: draft.amount,
        memo: draft.memo,
    };

    let mut entries = load_entries(connection)?;
    entries.insert(0, entry.clone());
    store_entries(&entries, connection)?;

    Ok(entry)
}

/// Replace the stored entry whose ID matches `entry.id`.
///
/// All fields except the ID may change. The full list is written back to the
/// store before this function returns.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingEntry] if no stored entry has the given ID (the
///   store is left untouched),
/// - [Error::NonFiniteAmount] if the replacement amount is NaN or infinite,
/// - or any error of [list_entries].
pub fn update_entry(entry: Entry, connection: &Connection) -> Result<Entry, Error> {
    if !entry.amount.is_finite() {
        return Err(Error::NonFiniteAmount);
    }

    let mut entries = load_entries(connection)?;

    let position = entries
        .iter()
        .position(|stored| stored.id == entry.id)
        .ok_or(Error::UpdateMissingEntry)?;

    entries[position] = entry.clone();
    store_entries(&entries, connection)?;

    Ok(entry)
}

/// Delete the entry with the matching `id`, returning how many entries were
/// removed.
///
/// Deleting an unknown ID is a no-op and returns `Ok(0)`, so the operation is
/// idempotent. When an entry was removed, the full list is written back to
/// the store before this function returns.
///
/// # Errors
/// This function will return any error of [list_entries].
pub fn remove_entry(id: EntryId, connection: &Connection) -> Result<usize, Error> {
    let mut entries = load_entries(connection)?;

    let count_before = entries.len();
    entries.retain(|entry| entry.id != id);
    let removed = count_before - entries.len();

    if removed > 0 {
        store_entries(&entries, connection)?;
    }

    Ok(removed)
}

/// The sum of all stored entries' amounts. `0.0` when the ledger is empty.
///
/// # Errors
/// This function will return any error of [list_entries].
pub fn total_balance(connection: &Connection) -> Result<f64, Error> {
    Ok(balance(&load_entries(connection)?))
}

/// The sum of `entries`' amounts. `0.0` for an empty slice.
pub fn balance(entries: &[Entry]) -> f64 {
    entries.iter().map(|entry| entry.amount).sum()
}

/// Order `entries` for display: date descending, ties keeping their stored
/// order. The stored list itself is never re-ordered.
pub fn sorted_for_display(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod ledger_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{Error, db::initialize};

    use super::{
        EntryDraft, add_entry, balance, get_entry, list_entries, remove_entry,
        sorted_for_display, total_balance, update_entry,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn draft(date: time::OffsetDateTime, amount: f64, memo: &str) -> EntryDraft {
        EntryDraft::new(date, amount, memo.to_owned()).unwrap()
    }

    #[test]
    fn add_returns_created_entry() {
        let conn = get_test_connection();
        let date = datetime!(2024-01-01 10:00 UTC);

        let entry = add_entry(draft(date, 3000.0, "お年玉"), &conn).unwrap();

        assert_eq!(entry.date, date);
        assert_eq!(entry.amount, 3000.0);
        assert_eq!(entry.memo, "お年玉");
        assert_eq!(get_entry(entry.id, &conn), Ok(entry));
    }

    #[test]
    fn add_assigns_unique_ids() {
        let conn = get_test_connection();
        let date = datetime!(2024-01-01 10:00 UTC);
        let want_count = 20;

        for i in 0..want_count {
            add_entry(draft(date, i as f64, ""), &conn).unwrap();
        }

        let entries = list_entries(&conn).unwrap();
        let ids: HashSet<_> = entries.iter().map(|entry| entry.id).collect();
        assert_eq!(entries.len(), want_count);
        assert_eq!(ids.len(), want_count);
    }

    #[test]
    fn add_rejects_non_finite_amounts() {
        let conn = get_test_connection();
        let date = datetime!(2024-01-01 10:00 UTC);

        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                EntryDraft::new(date, amount, String::new()),
                Err(Error::NonFiniteAmount)
            );
        }

        assert_eq!(list_entries(&conn).unwrap(), []);
    }

    #[test]
    fn list_length_tracks_adds_and_removes() {
        let conn = get_test_connection();
        let date = datetime!(2024-02-03 09:30 UTC);

        let first = add_entry(draft(date, 100.0, ""), &conn).unwrap();
        add_entry(draft(date, 200.0, ""), &conn).unwrap();
        add_entry(draft(date, 300.0, ""), &conn).unwrap();
        remove_entry(first.id, &conn).unwrap();

        assert_eq!(list_entries(&conn).unwrap().len(), 2);
    }

    #[test]
    fn balance_is_exact_sum() {
        let conn = get_test_connection();
        let date = datetime!(2024-01-01 10:00 UTC);
        assert_eq!(total_balance(&conn).unwrap(), 0.0);

        add_entry(draft(date, 3000.0, "お年玉"), &conn).unwrap();
        assert_eq!(total_balance(&conn).unwrap(), 3000.0);

        add_entry(draft(date, -500.0, "お菓子"), &conn).unwrap();
        assert_eq!(total_balance(&conn).unwrap(), 2500.0);
    }

    #[test]
    fn add_then_remove_restores_prior_balance() {
        let conn = get_test_connection();
        let date = datetime!(2024-01-01 10:00 UTC);
        add_entry(draft(date, 1234.0, ""), &conn).unwrap();
        let balance_before = total_balance(&conn).unwrap();

        let entry = add_entry(draft(date, -321.0, ""), &conn).unwrap();
        remove_entry(entry.id, &conn).unwrap();

        assert_eq!(total_balance(&conn).unwrap(), balance_before);
    }

    #[test]
    fn update_replaces_all_fields_except_id() {
        let conn = get_test_connection();
        let entry = add_entry(
            draft(datetime!(2024-01-01 10:00 UTC), 3000.0, "お年玉"),
            &conn,
        )
        .unwrap();

        let mut updated = entry.clone();
        updated.date = datetime!(2024-01-02 09:00 UTC);
        updated.amount = 2800.0;
        updated.memo = "お年玉（数え直し）".to_owned();
        update_entry(updated.clone(), &conn).unwrap();

        assert_eq!(get_entry(entry.id, &conn), Ok(updated));
        assert_eq!(list_entries(&conn).unwrap().len(), 1);
    }

    #[test]
    fn update_missing_entry_leaves_ledger_unchanged() {
        let conn = get_test_connection();
        let entry = add_entry(
            draft(datetime!(2024-01-01 10:00 UTC), 3000.0, ""),
            &conn,
        )
        .unwrap();

        let mut phantom = entry.clone();
        phantom.id = super::EntryId::new();
        phantom.amount = 9999.0;
        let result = update_entry(phantom, &conn);

        assert_eq!(result, Err(Error::UpdateMissingEntry));
        assert_eq!(list_entries(&conn).unwrap(), vec![entry]);
        assert_eq!(total_balance(&conn).unwrap(), 3000.0);
    }

    #[test]
    fn remove_missing_entry_is_idempotent() {
        let conn = get_test_connection();
        let entry = add_entry(
            draft(datetime!(2024-01-01 10:00 UTC), 3000.0, ""),
            &conn,
        )
        .unwrap();

        assert_eq!(remove_entry(entry.id, &conn), Ok(1));
        assert_eq!(remove_entry(entry.id, &conn), Ok(0));

        assert_eq!(list_entries(&conn).unwrap(), []);
        assert_eq!(total_balance(&conn).unwrap(), 0.0);
    }

    #[test]
    fn sort_is_date_descending_and_stable() {
        let conn = get_test_connection();
        let tied_date = datetime!(2024-03-01 12:00 UTC);
        add_entry(draft(datetime!(2024-01-01 10:00 UTC), 1.0, "oldest"), &conn).unwrap();
        add_entry(draft(tied_date, 2.0, "tie first"), &conn).unwrap();
        add_entry(draft(tied_date, 3.0, "tie second"), &conn).unwrap();
        add_entry(draft(datetime!(2024-05-05 08:00 UTC), 4.0, "newest"), &conn).unwrap();

        let sorted = sorted_for_display(list_entries(&conn).unwrap());

        let memos: Vec<&str> = sorted.iter().map(|entry| entry.memo.as_str()).collect();
        // Ties keep their stored order: the list is newest-prepended, so the
        // entry added last comes first.
        assert_eq!(memos, ["newest", "tie second", "tie first", "oldest"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let conn = get_test_connection();
        add_entry(draft(datetime!(2024-01-01 10:00 UTC), 3000.0, "お年玉"), &conn).unwrap();
        add_entry(draft(datetime!(2024-01-02 09:00 UTC), -500.0, "お菓子"), &conn).unwrap();
        add_entry(draft(datetime!(2024-01-02 09:00 UTC), -120.0, "ジュース"), &conn).unwrap();

        let sorted_once = sorted_for_display(list_entries(&conn).unwrap());
        let sorted_twice = sorted_for_display(sorted_once.clone());

        assert_eq!(sorted_once, sorted_twice);
    }

    #[test]
    fn lifecycle_scenario() {
        let conn = get_test_connection();

        let otoshidama = add_entry(
            draft(datetime!(2024-01-01 10:00 UTC), 3000.0, "お年玉"),
            &conn,
        )
        .unwrap();
        assert_eq!(total_balance(&conn).unwrap(), 3000.0);

        add_entry(
            draft(datetime!(2024-01-02 09:00 UTC), -500.0, "お菓子"),
            &conn,
        )
        .unwrap();
        assert_eq!(total_balance(&conn).unwrap(), 2500.0);

        let sorted = sorted_for_display(list_entries(&conn).unwrap());
        assert_eq!(sorted[0].amount, -500.0);
        assert_eq!(sorted[1].amount, 3000.0);

        remove_entry(otoshidama.id, &conn).unwrap();
        assert_eq!(total_balance(&conn).unwrap(), -500.0);
    }

    #[test]
    fn zero_amount_is_permitted() {
        let conn = get_test_connection();

        let entry = add_entry(
            draft(datetime!(2024-01-01 10:00 UTC), 0.0, "プラマイゼロ"),
            &conn,
        )
        .unwrap();

        assert_eq!(entry.amount, 0.0);
        assert_eq!(total_balance(&conn).unwrap(), 0.0);
    }

    #[test]
    fn balance_of_empty_slice_is_zero() {
        assert_eq!(balance(&[]), 0.0);
    }
}
