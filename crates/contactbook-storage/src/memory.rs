//! In-memory contact store.

use async_trait::async_trait;
use contactbook_core::{Contact, ContactFields, ContactId, ContactStore, Error, Result};
use tokio::sync::RwLock;

/// Contact store that keeps every document in process memory.
///
/// Documents are kept in insertion order. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `contacts`.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RwLock::new(contacts),
        }
    }

    /// Number of stored contacts.
    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    /// Returns `true` when the store holds no contacts.
    pub async fn is_empty(&self) -> bool {
        self.contacts.read().await.is_empty()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Contact>> {
        Ok(self.contacts.read().await.clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.name == name).cloned())
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, fields: ContactFields) -> Result<Contact> {
        let mut contacts = self.contacts.write().await;
        if contacts.iter().any(|c| c.name == fields.name) {
            return Err(Error::duplicate_name(fields.name));
        }
        let contact = Contact::from_fields(ContactId::new(), fields);
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<bool> {
        let mut contacts = self.contacts.write().await;
        let Some(index) = contacts.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        if contacts.iter().any(|c| c.id != id && c.name == fields.name) {
            return Err(Error::duplicate_name(fields.name));
        }
        contacts[index].apply(fields);
        Ok(true)
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let mut contacts = self.contacts.write().await;
        match contacts.iter().position(|c| c.name == name) {
            Some(index) => {
                contacts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
