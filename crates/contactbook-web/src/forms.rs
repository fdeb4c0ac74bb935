//! Typed form bodies, one per write endpoint.
//!
//! Missing fields deserialize as empty strings so that an incomplete form is
//! reported through the validation rules instead of a transport error.

use contactbook_core::ContactFields;
use serde::{Deserialize, Serialize};

/// Body of `POST /contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    /// Submitted name.
    pub name: String,
    /// Submitted phone number.
    pub phone: String,
    /// Submitted email address.
    pub email: String,
}

impl ContactForm {
    /// The contact fields to validate and store.
    pub fn to_fields(&self) -> ContactFields {
        ContactFields::new(&self.name, &self.phone, &self.email)
    }
}

/// Body of `DELETE /contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeleteForm {
    /// Name of the contact to remove.
    pub name: String,
}

/// Body of `PUT /contact`.
///
/// Also used as the edit form's context, so a rejected submission is echoed
/// back exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateForm {
    /// Identity of the contact being edited.
    pub id: String,
    /// The contact's name before this edit.
    #[serde(rename = "oldName")]
    pub old_name: String,
    /// Submitted name.
    pub name: String,
    /// Submitted phone number.
    pub phone: String,
    /// Submitted email address.
    pub email: String,
}

impl UpdateForm {
    /// The contact fields to validate and store.
    pub fn to_fields(&self) -> ContactFields {
        ContactFields::new(&self.name, &self.phone, &self.email)
    }
}

impl From<&contactbook_core::Contact> for UpdateForm {
    fn from(contact: &contactbook_core::Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            old_name: contact.name.clone(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        }
    }
}
