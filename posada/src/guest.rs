//! The guest directory.
//!
//! Guests are identified by their contact email. A booking made with an
//! email already on file reuses that guest and refreshes the name and
//! phone in place when they differ.

use std::time::SystemTime;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::catalog::{check_text, unix_seconds};
use crate::database::Database;
use crate::error::Result;
use crate::ids::row_id;
use crate::reservation::ValidationError;

row_id!(
    /// Identifier of a guest.
    GuestId
);

/// Maximum length of a guest name.
pub const MAX_GUEST_NAME_LEN: usize = 100;

/// Maximum length of a phone number.
pub const MAX_PHONE_LEN: usize = 15;

/// Maximum length of an email address.
pub const MAX_EMAIL_LEN: usize = 254;

/// A persisted guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guest {
    /// Row id.
    pub id: GuestId,
    /// Display name.
    pub name: String,
    /// Normalized (lowercase) email, unique across guests.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Creation timestamp.
    #[serde(serialize_with = "unix_seconds::serialize")]
    pub created_at: SystemTime,
}

/// Guest contact details supplied with a booking.
///
/// # Examples
///
/// ```
/// use posada::GuestInput;
///
/// let input = GuestInput::new("Ana Ruiz", " Ana@Example.COM ", "555-0101").unwrap();
/// assert_eq!(input.email(), "ana@example.com");
///
/// assert!(GuestInput::new("Ana", "not-an-email", "555").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInput {
    name: String,
    email: String,
    phone: String,
}

impl GuestInput {
    /// Validates and normalizes guest details.
    ///
    /// The name and phone are trimmed. The email is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty or longer than [`MAX_GUEST_NAME_LEN`]
    /// - The email is not of the form `local@domain.tld`
    /// - The phone is empty or longer than [`MAX_PHONE_LEN`]
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        phone: impl AsRef<str>,
    ) -> std::result::Result<Self, ValidationError> {
        let name = name.as_ref().trim().to_string();
        let phone = phone.as_ref().trim().to_string();
        let email = normalize_email(email.as_ref())?;

        check_text("name", &name, MAX_GUEST_NAME_LEN)?;
        check_text("phone", &phone, MAX_PHONE_LEN)?;

        Ok(Self { name, email, phone })
    }

    /// Returns the guest name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the phone.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

fn normalize_email(raw: &str) -> std::result::Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    let invalid = |message: &str| ValidationError {
        field: "email".into(),
        message: message.into(),
    };

    if email.is_empty() {
        return Err(invalid("email must be non-empty"));
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(invalid("email is too long"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("email must not contain whitespace"));
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid("email must contain exactly one '@'"));
    };
    if local.is_empty() {
        return Err(invalid("email is missing the part before '@'"));
    }
    let has_dotted_domain =
        domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
    if !has_dotted_domain {
        return Err(invalid("email domain must look like 'example.com'"));
    }

    Ok(email)
}

/// What [`resolve_guest`] did to the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestResolution {
    /// A new guest was inserted.
    Created,
    /// An existing guest had its name or phone refreshed.
    Updated,
    /// An existing guest matched exactly.
    Unchanged,
}

/// Finds the guest with the input's email, creating or refreshing it.
///
/// Runs on whatever connection or transaction the caller holds.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub fn resolve_guest(conn: &Connection, input: &GuestInput) -> Result<(GuestId, GuestResolution)> {
    match Database::find_guest_by_email(conn, input.email())? {
        None => {
            let id = Database::insert_guest(conn, input)?;
            log::debug!("created guest {id} for {}", input.email());
            Ok((id, GuestResolution::Created))
        }
        Some(existing) if existing.name == input.name() && existing.phone == input.phone() => {
            Ok((existing.id, GuestResolution::Unchanged))
        }
        Some(existing) => {
            Database::update_guest_contact(conn, existing.id, input.name(), input.phone())?;
            log::debug!("refreshed contact details of guest {}", existing.id);
            Ok((existing.id, GuestResolution::Updated))
        }
    }
}
