//! Integration tests for storage failures and the durable backend.

use std::sync::Arc;

use async_trait::async_trait;
use contactbook_core::{Contact, ContactFields, ContactId, ContactStore, Error, Result};
use contactbook_storage::RedbStore;
use contactbook_web::error::SERVER_ERROR_MESSAGE;
use contactbook_web::handlers::MSG_CREATED;
use http::StatusCode;

use crate::common::{TestApp, alice};

/// A store whose backend is always down.
struct FailingStore;

fn unavailable() -> Error {
    Error::storage("backend unavailable")
}

#[async_trait]
impl ContactStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Contact>> {
        Err(unavailable())
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<Contact>> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: ContactId) -> Result<Option<Contact>> {
        Err(unavailable())
    }

    async fn insert(&self, _fields: ContactFields) -> Result<Contact> {
        Err(unavailable())
    }

    async fn update_by_id(&self, _id: ContactId, _fields: ContactFields) -> Result<bool> {
        Err(unavailable())
    }

    async fn delete_by_name(&self, _name: &str) -> Result<bool> {
        Err(unavailable())
    }
}

#[tokio::test]
async fn test_list_failure_is_server_error() {
    let mut app = TestApp::with_store(Arc::new(FailingStore));

    let resp = app.get("/contact").await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, SERVER_ERROR_MESSAGE);
    assert!(!resp.body.contains("backend unavailable"));
}

#[tokio::test]
async fn test_create_failure_is_server_error() {
    let mut app = TestApp::with_store(Arc::new(FailingStore));

    let resp = app
        .submit(
            "POST",
            "/contact",
            &[("name", "Alice"), ("phone", "081234567890"), ("email", "a@x.com")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, SERVER_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_delete_and_detail_failures_are_server_errors() {
    let mut app = TestApp::with_store(Arc::new(FailingStore));

    let delete = app.submit("DELETE", "/contact", &[("name", "Alice")]).await;
    assert_eq!(delete.status, StatusCode::INTERNAL_SERVER_ERROR);

    let detail = app.get("/contact/Alice").await;
    assert_eq!(detail.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_static_pages_survive_store_failure() {
    let mut app = TestApp::with_store(Arc::new(FailingStore));

    assert_eq!(app.get("/").await.status, StatusCode::OK);
    assert_eq!(app.get("/about").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_redb_backed_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.redb");

    {
        let store = Arc::new(RedbStore::open(&path).unwrap());
        store.insert(alice()).await.unwrap();
        let mut app = TestApp::with_store(store);

        let created = app
            .submit(
                "POST",
                "/contact",
                &[("name", "Budi"), ("phone", "+6285712345678"), ("email", "budi@x.com")],
            )
            .await;
        assert_eq!(created.status, StatusCode::SEE_OTHER);
        assert!(app.get("/contact").await.body.contains(MSG_CREATED));

        let dup = app
            .submit(
                "POST",
                "/contact",
                &[("name", "Budi"), ("phone", "081234567890"), ("email", "b2@x.com")],
            )
            .await;
        assert_eq!(dup.status, StatusCode::OK);

        let deleted = app.submit("DELETE", "/contact", &[("name", "Alice")]).await;
        assert_eq!(deleted.status, StatusCode::SEE_OTHER);
    }

    let reopened = RedbStore::open(&path).unwrap();
    let names: Vec<String> = reopened
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Budi"]);
}
