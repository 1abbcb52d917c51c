//! Database operations for guests.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::guest::{Guest, GuestId, GuestInput};

use super::connection::Database;
use super::operations::{systemtime_to_unix_secs, unix_secs_to_systemtime};
use super::transaction::is_unique_violation;

const GUEST_COLUMNS: &str = "id, name, email, phone, created_at";

fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        created_at: unix_secs_to_systemtime(row.get(4)?),
    })
}

impl Database {
    /// Inserts a guest and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the email is already on file, or a
    /// database error if the insert fails.
    pub fn insert_guest(conn: &Connection, input: &GuestInput) -> Result<GuestId> {
        let created_secs = systemtime_to_unix_secs(SystemTime::now())?;
        match conn.execute(
            "INSERT INTO guests (name, email, phone, created_at) VALUES (?, ?, ?, ?)",
            params![input.name(), input.email(), input.phone(), created_secs],
        ) {
            Ok(_) => Ok(GuestId::new(conn.last_insert_rowid())),
            Err(e) if is_unique_violation(&e) => Err(Error::validation(
                "email",
                format!("a guest with email {} already exists", input.email()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrites the name and phone of a guest.
    ///
    /// # Errors
    ///
    /// Returns an error if the guest does not exist or the update fails.
    pub fn update_guest_contact(
        conn: &Connection,
        id: GuestId,
        name: &str,
        phone: &str,
    ) -> Result<()> {
        let updated = conn.execute(
            "UPDATE guests SET name = ?, phone = ? WHERE id = ?",
            params![name, phone, id],
        )?;
        if updated == 0 {
            return Err(Error::not_found(format!("guest {id}")));
        }
        Ok(())
    }

    /// Retrieves a guest.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest(conn: &Connection, id: GuestId) -> Result<Option<Guest>> {
        let sql = format!("SELECT {GUEST_COLUMNS} FROM guests WHERE id = ?");
        Ok(conn.query_row(&sql, [id], row_to_guest).optional()?)
    }

    /// Retrieves a guest, failing with [`Error::NotFound`] if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the guest does not exist or the query fails.
    pub fn require_guest(conn: &Connection, id: GuestId) -> Result<Guest> {
        Self::get_guest(conn, id)?.ok_or_else(|| Error::not_found(format!("guest {id}")))
    }

    /// Finds a guest by email. The lookup is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_guest_by_email(conn: &Connection, email: &str) -> Result<Option<Guest>> {
        let sql = format!("SELECT {GUEST_COLUMNS} FROM guests WHERE email = ?");
        let normalized = email.trim().to_lowercase();
        Ok(conn.query_row(&sql, [normalized], row_to_guest).optional()?)
    }

    /// Lists all guests ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_guests(conn: &Connection) -> Result<Vec<Guest>> {
        let sql = format!("SELECT {GUEST_COLUMNS} FROM guests ORDER BY name COLLATE NOCASE, id");
        let mut stmt = conn.prepare(&sql)?;
        let guests = stmt
            .query_map([], row_to_guest)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(guests)
    }
}
