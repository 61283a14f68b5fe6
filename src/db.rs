//! Database initialization for the application.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, slot::create_slot_table};

/// Create the tables used by the application if they do not already exist.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is some other
/// SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_slot_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
