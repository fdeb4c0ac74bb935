//! The contact document and its identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique, stable identifier for a contact document.
///
/// Internally represented as a UUID v4. Unlike the contact name, it never
/// changes for the lifetime of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Creates a new random contact ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook_core::ContactId;
    ///
    /// let id = ContactId::new();
    /// assert_ne!(id, ContactId::new());
    /// ```
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a contact ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ContactId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for ContactId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The mutable fields of a contact: everything but its identity.
///
/// This is the payload of both insert and update; an update replaces all
/// three fields at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    /// Human-chosen name, unique across all contacts.
    pub name: String,
    /// Indonesian mobile number.
    pub phone: String,
    /// Email address.
    pub email: String,
}

impl ContactFields {
    /// Creates a new set of contact fields.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// A stored contact document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable identity assigned on insert.
    pub id: ContactId,
    /// Human-chosen name, unique across all contacts.
    pub name: String,
    /// Indonesian mobile number.
    pub phone: String,
    /// Email address.
    pub email: String,
}

impl Contact {
    /// Builds a contact document from an identity and its fields.
    pub fn from_fields(id: ContactId, fields: ContactFields) -> Self {
        Self {
            id,
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
        }
    }

    /// Returns a copy of the mutable fields.
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }

    /// Replaces the mutable fields, keeping the identity.
    pub fn apply(&mut self, fields: ContactFields) {
        self.name = fields.name;
        self.phone = fields.phone;
        self.email = fields.email;
    }
}
