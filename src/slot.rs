//! A key-value slot store backed by SQLite.
//!
//! The ledger persists its full entry list as a single value under a fixed
//! key. The slot store only supports reading the current value and replacing
//! it wholesale, so there is never a partially written list to recover from.

use rusqlite::Connection;

use crate::Error;

/// Create the slot table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_slot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS slot (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Read the current value stored under `key`, or `None` if the key has never
/// been written.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn read_slot(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    let value = connection
        .prepare("SELECT value FROM slot WHERE key = :key")?
        .query_row(&[(":key", &key)], |row| row.get(0));

    match value {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Replace the value stored under `key`, creating the slot if it does not
/// exist yet.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn write_slot(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO slot (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}

#[cfg(test)]
mod slot_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    use super::{read_slot, write_slot};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn read_missing_key_returns_none() {
        let conn = get_test_connection();

        let value = read_slot("nothing-here", &conn).expect("Could not read slot");

        assert_eq!(value, None);
    }

    #[test]
    fn read_returns_last_written_value() {
        let conn = get_test_connection();

        write_slot("greeting", "hello", &conn).expect("Could not write slot");

        let value = read_slot("greeting", &conn).expect("Could not read slot");

        assert_eq!(value, Some("hello".to_owned()));
    }

    #[test]
    fn write_replaces_existing_value() {
        let conn = get_test_connection();
        write_slot("greeting", "hello", &conn).expect("Could not write slot");

        write_slot("greeting", "goodbye", &conn).expect("Could not write slot");

        let value = read_slot("greeting", &conn).expect("Could not read slot");
        assert_eq!(value, Some("goodbye".to_owned()));
    }

    #[test]
    fn slots_are_independent() {
        let conn = get_test_connection();

        write_slot("left", "1", &conn).expect("Could not write slot");
        write_slot("right", "2", &conn).expect("Could not write slot");

        assert_eq!(read_slot("left", &conn).unwrap(), Some("1".to_owned()));
        assert_eq!(read_slot("right", &conn).unwrap(), Some("2".to_owned()));
    }
}
