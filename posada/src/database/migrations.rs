//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_ACTIVE_SLOT_INDEX, CREATE_DATE_INDEX, CREATE_GUESTS_TABLE, CREATE_GUEST_INDEX,
    CREATE_HOTELS_TABLE, CREATE_METADATA_TABLE, CREATE_RESERVATIONS_TABLE, CREATE_ROOMS_TABLE,
    CREATE_ROOM_HOTEL_INDEX, CREATE_STATUS_INDEX, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, and metadata for a fresh database inside a
/// single transaction so a half-created schema is never left behind.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use posada::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(CREATE_METADATA_TABLE, [])?;
    tx.execute(CREATE_HOTELS_TABLE, [])?;
    tx.execute(CREATE_ROOMS_TABLE, [])?;
    tx.execute(CREATE_GUESTS_TABLE, [])?;
    tx.execute(CREATE_RESERVATIONS_TABLE, [])?;

    tx.execute(CREATE_ACTIVE_SLOT_INDEX, [])?;
    tx.execute(CREATE_DATE_INDEX, [])?;
    tx.execute(CREATE_STATUS_INDEX, [])?;
    tx.execute(CREATE_GUEST_INDEX, [])?;
    tx.execute(CREATE_ROOM_HOTEL_INDEX, [])?;

    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    tx.commit()?;
    log::debug!("initialized database schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (both of which mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value.parse::<i32>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(ref sqlite_err, _))
            if sqlite_err.code == rusqlite::ErrorCode::Unknown =>
        {
            // No metadata table yet.
            Ok(0)
        }
        Err(rusqlite::Error::FromSqlConversionFailure(..)) => Err(Error::DatabaseCorruption {
            details: "schema version is not a number".into(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized. A database written by another schema
/// version is refused.
///
/// # Errors
///
/// Returns an error if:
/// - The schema version differs from [`CURRENT_SCHEMA_VERSION`]
/// - Schema initialization fails
/// - Database queries fail
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION.unsigned_abs(),
            found: version.unsigned_abs(),
        });
    }

    Ok(())
}
