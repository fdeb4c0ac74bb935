//! Integration tests for static pages, listings, and lookups.

use contactbook_core::ContactFields;
use contactbook_web::handlers::MSG_CREATED;
use http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_home_and_about() {
    let mut app = TestApp::new();

    let home = app.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("data-view=\"index\""));

    let about = app.get("/about").await;
    assert_eq!(about.status, StatusCode::OK);
    assert!(about.body.contains("<title>About</title>"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut app = TestApp::new();

    let resp = app.get("/no/such/page").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("data-view=\"not-found\""));
}

#[tokio::test]
async fn test_empty_list() {
    let mut app = TestApp::new();

    let resp = app.get("/contact").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("No contacts yet."));
}

#[tokio::test]
async fn test_list_shows_every_contact() {
    let mut app = TestApp::new();
    app.seed().await;

    let resp = app.get("/contact").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("href=\"/contact/Alice\""));
    assert!(resp.body.contains("href=\"/contact/Bob\""));
    assert!(resp.body.contains("081298765432"));
}

#[tokio::test]
async fn test_add_form_is_empty() {
    let mut app = TestApp::new();

    let resp = app.get("/contact/add").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("action=\"/contact\""));
    assert!(!resp.body.contains("class=\"errors\""));
}

#[tokio::test]
async fn test_detail_page() {
    let mut app = TestApp::new();
    app.seed().await;

    let resp = app.get("/contact/Bob").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<dd>b@x.com</dd>"));
    assert!(resp.body.contains("action=\"/contact?_method=DELETE\""));
}

#[tokio::test]
async fn test_detail_decodes_path_segment() {
    let mut app = TestApp::new();
    app.store
        .insert(ContactFields::new(
            "Budi Santoso",
            "081312345678",
            "budi@x.com",
        ))
        .await
        .unwrap();

    let resp = app.get("/contact/Budi%20Santoso").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<h1>Budi Santoso</h1>"));
    assert!(resp.body.contains("href=\"/contact/edit/Budi%20Santoso\""));
}

#[tokio::test]
async fn test_detail_unknown_name_is_not_found() {
    let mut app = TestApp::new();
    app.seed().await;

    let resp = app.get("/contact/Nobody").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("No contact named &#39;Nobody&#39;."));
}

#[tokio::test]
async fn test_not_found_page_consumes_flash() {
    let mut app = TestApp::new();
    app.seed().await;

    app.submit("DELETE", "/contact", &[("name", "Alice")]).await;
    let miss = app.get("/contact/Alice").await;
    assert_eq!(miss.status, StatusCode::NOT_FOUND);
    assert!(miss.body.contains("class=\"flash\""));

    let list = app.get("/contact").await;
    assert!(!list.body.contains("class=\"flash\""));
}

#[tokio::test]
async fn test_tampered_session_cookie_starts_fresh_session() {
    let mut app = TestApp::new();
    app.submit(
        "POST",
        "/contact",
        &[("name", "Alice"), ("phone", "081234567890"), ("email", "a@x.com")],
    )
    .await;

    // Same session id, signature swapped for garbage
    let cookie = app.cookie().unwrap().to_string();
    let (id, _signature) = cookie.rsplit_once('.').unwrap();
    let forged = format!("{id}.{}", "0".repeat(64));

    let mut attacker = app.other_browser();
    let req = http::Request::get("/contact")
        .header(http::header::COOKIE, forged)
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = attacker.send(req).await;
    assert!(!resp.body.contains(MSG_CREATED));
    assert_ne!(attacker.cookie(), Some(cookie.as_str()));

    let mine = app.get("/contact").await;
    assert!(mine.body.contains(MSG_CREATED));
}
