//! Durable contact store backed by an embedded `redb` database.
//!
//! Documents live in the `contacts` table as JSON keyed by contact id. The
//! `contacts_by_name` table is a unique index from name to id; every write
//! updates both tables in one transaction.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use contactbook_core::{Contact, ContactFields, ContactId, ContactStore, Error, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

const CONTACTS: TableDefinition<&str, &str> = TableDefinition::new("contacts");
const CONTACTS_BY_NAME: TableDefinition<&str, &str> = TableDefinition::new("contacts_by_name");

/// Contact store persisted to a single `redb` file.
///
/// Cheap to clone (Arc internals). Listing returns documents in id order.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) the database at `path` and make sure both tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(db_err)?;

        let txn = db.begin_write().map_err(db_err)?;
        txn.open_table(CONTACTS).map_err(db_err)?;
        txn.open_table(CONTACTS_BY_NAME).map_err(db_err)?;
        txn.commit().map_err(db_err)?;

        tracing::debug!(path = %path.display(), "Opened contact database");
        Ok(Self { db: Arc::new(db) })
    }

    /// Run a blocking database operation off the async runtime.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || op(&db))
            .await
            .map_err(|e| Error::storage_with_source("storage task failed", e))?
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

fn db_err<E: Into<redb::Error>>(err: E) -> Error {
    let err: redb::Error = err.into();
    Error::storage_with_source(err.to_string(), err)
}

fn decode(json: &str) -> Result<Contact> {
    Ok(serde_json::from_str(json)?)
}

#[async_trait]
impl ContactStore for RedbStore {
    async fn list_all(&self) -> Result<Vec<Contact>> {
        self.run(|db| {
            let txn = db.begin_read().map_err(db_err)?;
            let table = txn.open_table(CONTACTS).map_err(db_err)?;
            let mut contacts = Vec::new();
            for entry in table.iter().map_err(db_err)? {
                let (_id, doc) = entry.map_err(db_err)?;
                contacts.push(decode(doc.value())?);
            }
            Ok(contacts)
        })
        .await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Contact>> {
        let name = name.to_string();
        self.run(move |db| {
            let txn = db.begin_read().map_err(db_err)?;
            let index = txn.open_table(CONTACTS_BY_NAME).map_err(db_err)?;
            let Some(id) = index
                .get(name.as_str())
                .map_err(db_err)?
                .map(|g| g.value().to_string())
            else {
                return Ok(None);
            };
            let table = txn.open_table(CONTACTS).map_err(db_err)?;
            let doc = table.get(id.as_str()).map_err(db_err)?;
            doc.map(|g| decode(g.value())).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        self.run(move |db| {
            let txn = db.begin_read().map_err(db_err)?;
            let table = txn.open_table(CONTACTS).map_err(db_err)?;
            let key = id.to_string();
            let doc = table.get(key.as_str()).map_err(db_err)?;
            doc.map(|g| decode(g.value())).transpose()
        })
        .await
    }

    async fn insert(&self, fields: ContactFields) -> Result<Contact> {
        self.run(move |db| {
            let contact = Contact::from_fields(ContactId::new(), fields);
            let key = contact.id.to_string();
            let doc = serde_json::to_string(&contact)?;

            let txn = db.begin_write().map_err(db_err)?;
            {
                let mut index = txn.open_table(CONTACTS_BY_NAME).map_err(db_err)?;
                if index.get(contact.name.as_str()).map_err(db_err)?.is_some() {
                    return Err(Error::duplicate_name(contact.name));
                }
                index
                    .insert(contact.name.as_str(), key.as_str())
                    .map_err(db_err)?;

                let mut table = txn.open_table(CONTACTS).map_err(db_err)?;
                table.insert(key.as_str(), doc.as_str()).map_err(db_err)?;
            }
            txn.commit().map_err(db_err)?;
            Ok(contact)
        })
        .await
    }

    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<bool> {
        self.run(move |db| {
            let key = id.to_string();
            let txn = db.begin_write().map_err(db_err)?;
            {
                let mut table = txn.open_table(CONTACTS).map_err(db_err)?;
                let existing = table
                    .get(key.as_str())
                    .map_err(db_err)?
                    .map(|g| decode(g.value()))
                    .transpose()?;
                let Some(mut contact) = existing else {
                    return Ok(false);
                };

                let mut index = txn.open_table(CONTACTS_BY_NAME).map_err(db_err)?;
                let holder = index
                    .get(fields.name.as_str())
                    .map_err(db_err)?
                    .map(|g| g.value().to_string());
                if holder.is_some_and(|holder| holder != key) {
                    return Err(Error::duplicate_name(fields.name));
                }

                index.remove(contact.name.as_str()).map_err(db_err)?;
                contact.apply(fields);
                index
                    .insert(contact.name.as_str(), key.as_str())
                    .map_err(db_err)?;

                let doc = serde_json::to_string(&contact)?;
                table.insert(key.as_str(), doc.as_str()).map_err(db_err)?;
            }
            txn.commit().map_err(db_err)?;
            Ok(true)
        })
        .await
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let name = name.to_string();
        self.run(move |db| {
            let txn = db.begin_write().map_err(db_err)?;
            {
                let mut index = txn.open_table(CONTACTS_BY_NAME).map_err(db_err)?;
                let Some(id) = index
                    .remove(name.as_str())
                    .map_err(db_err)?
                    .map(|g| g.value().to_string())
                else {
                    return Ok(false);
                };
                let mut table = txn.open_table(CONTACTS).map_err(db_err)?;
                table.remove(id.as_str()).map_err(db_err)?;
            }
            txn.commit().map_err(db_err)?;
            Ok(true)
        })
        .await
    }
}
