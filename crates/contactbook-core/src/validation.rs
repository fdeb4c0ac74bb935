//! Validation rules applied before a contact is inserted or updated.
//!
//! Each rule runs independently and every failure is collected, so a form can
//! show all of its problems at once. Field order in the result is always
//! name, email, phone.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{ContactFields, ContactStore, Result};

/// Maximum length of an email local part (before the `@`).
const EMAIL_MAX_LOCAL_LEN: usize = 64;

/// Maximum total length of an email address.
const EMAIL_MAX_LEN: usize = 254;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+([A-Za-z]{2,}|xn--[A-Za-z0-9-]+)$"#,
    )
    .expect("Invalid email regex")
});

// Indonesian mobile numbers: 0 / 62 / +62 prefix, an 8xx operator code, then
// the subscriber number.
static PHONE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\+?62|0)8(1[123456789]|2[1238]|3[1238]|5[12356789]|7[78]|9[56789]|8[123456789])([\s?|\d]{5,11})$",
    )
    .expect("Invalid phone regex")
});

// ============================================================================
// Error collection
// ============================================================================

/// A contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// The contact name.
    Name,
    /// The email address.
    Email,
    /// The phone number.
    Phone,
}

impl Field {
    /// Form field name as submitted by the browser.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field the rule checked.
    pub field: Field,
    /// Message shown next to the form.
    pub message: String,
}

/// Every rule failure for one submission. Empty means the write may proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Creates an empty error list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`.
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns `true` when no rule failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any rule on `field` failed.
    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Iterates over the failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Message for a missing name.
pub const NAME_REQUIRED: &str = "Name is required!";
/// Message for a name already used by another contact.
pub const NAME_TAKEN: &str = "Name is already registered!";
/// Message for a malformed email address.
pub const EMAIL_INVALID: &str = "Invalid email!";
/// Message for a phone number that is not an Indonesian mobile number.
pub const PHONE_INVALID: &str = "Invalid phone number!";

/// How the name-uniqueness rule treats an existing contact with the
/// submitted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck<'a> {
    /// Adding a contact: any existing contact with the name is a duplicate.
    Create,
    /// Editing the contact previously called `old_name`: keeping that name is
    /// not a duplicate of itself.
    Rename {
        /// The record's name before this edit.
        old_name: &'a str,
    },
}

impl NameCheck<'_> {
    /// Decide whether `submitted` collides, given whether the store already
    /// holds a contact with that name.
    pub fn is_duplicate(&self, submitted: &str, name_in_use: bool) -> bool {
        match self {
            NameCheck::Create => name_in_use,
            NameCheck::Rename { old_name } => name_in_use && submitted != *old_name,
        }
    }
}

/// Checks an email address against the standard address grammar.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN {
        return false;
    }
    match email.rsplit_once('@') {
        Some((local, _)) if local.len() <= EMAIL_MAX_LOCAL_LEN => EMAIL_RE.is_match(email),
        _ => false,
    }
}

/// Checks a phone number against the Indonesian mobile-number grammar.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_ID_RE.is_match(phone)
}

/// Runs every rule against `fields`, consulting `store` for the name check.
///
/// Store failures during the name lookup are returned as errors; rule
/// failures are returned in the [`ValidationErrors`] list.
pub async fn validate_contact<S>(
    store: &S,
    fields: &ContactFields,
    check: NameCheck<'_>,
) -> Result<ValidationErrors>
where
    S: ContactStore + ?Sized,
{
    let mut errors = ValidationErrors::new();

    if fields.name.trim().is_empty() {
        errors.push(Field::Name, NAME_REQUIRED);
    } else {
        let name_in_use = store.find_by_name(&fields.name).await?.is_some();
        if check.is_duplicate(&fields.name, name_in_use) {
            errors.push(Field::Name, NAME_TAKEN);
        }
    }

    if !is_valid_email(&fields.email) {
        errors.push(Field::Email, EMAIL_INVALID);
    }

    if !is_valid_phone(&fields.phone) {
        errors.push(Field::Phone, PHONE_INVALID);
    }

    Ok(errors)
}
