//! Integration tests for the delete-contact workflow.

use contactbook_core::ContactFields;
use contactbook_web::handlers::MSG_DELETED;
use http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_delete_removes_only_named_contact() {
    let mut app = TestApp::new();
    app.seed().await;

    let resp = app.submit("DELETE", "/contact", &[("name", "Alice")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/contact"));
    assert_eq!(app.names().await, vec!["Bob"]);

    let list = app.get("/contact").await;
    assert!(list.body.contains(MSG_DELETED));
    assert!(!app.get("/contact").await.body.contains(MSG_DELETED));
}

#[tokio::test]
async fn test_delete_via_method_override() {
    let mut app = TestApp::new();
    app.seed().await;

    let resp = app
        .submit("POST", "/contact?_method=DELETE", &[("name", "Bob")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(app.names().await, vec!["Alice"]);
}

#[tokio::test]
async fn test_delete_unknown_name_is_not_found() {
    let mut app = TestApp::new();
    app.seed().await;

    let resp = app.submit("DELETE", "/contact", &[("name", "Nobody")]).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(app.names().await, vec!["Alice", "Bob"]);
    assert!(!app.get("/contact").await.body.contains(MSG_DELETED));
}

#[tokio::test]
async fn test_delete_name_with_spaces() {
    let mut app = TestApp::new();
    app.store
        .insert(ContactFields::new(
            "Budi Santoso",
            "081312345678",
            "budi@x.com",
        ))
        .await
        .unwrap();

    let resp = app
        .submit("DELETE", "/contact", &[("name", "Budi Santoso")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(app.names().await.is_empty());
}
