//! Storage abstraction for contact documents.

use async_trait::async_trait;

use crate::{Contact, ContactFields, ContactId, Result};

/// A document store holding one collection of [`Contact`] records.
///
/// Every mutating call takes effect immediately; there is no batching and no
/// transaction spanning more than one call. Implementations must keep names
/// unique and report a write that would break that with
/// [`Error::DuplicateName`](crate::Error::DuplicateName).
#[async_trait]
pub trait ContactStore: Send + Sync + 'static {
    /// All contacts, in the store's natural (insertion) order.
    async fn list_all(&self) -> Result<Vec<Contact>>;

    /// Look up a contact by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Contact>>;

    /// Look up a contact by identity.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>>;

    /// Insert a new contact, assigning it a fresh identity.
    async fn insert(&self, fields: ContactFields) -> Result<Contact>;

    /// Replace the mutable fields of the contact with `id`.
    ///
    /// Returns `false` when no contact has that identity.
    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<bool>;

    /// Remove the contact called `name`.
    ///
    /// Returns `false` when no contact has that name.
    async fn delete_by_name(&self, name: &str) -> Result<bool>;
}
