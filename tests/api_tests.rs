//! End-to-end tests against a running server.
//!
//! Run with: cargo test -- --ignored

use reqwest::{redirect::Policy, Client, StatusCode};

const BASE_URL: &str = "http://localhost:8080";

/// Client that does not follow redirects, so redirect targets are
/// observable.
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Create an author and return the redirect target (the canonical URL).
async fn create_author(client: &Client, first_name: &str, family_name: &str) -> String {
    let response = client
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[("first_name", first_name), ("family_name", family_name)])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    response
        .headers()
        .get("location")
        .expect("No redirect location")
        .to_str()
        .unwrap()
        .to_string()
}

/// Create a book for the given author URL and return the redirect target.
async fn create_book(client: &Client, title: &str, author_url: &str) -> String {
    let author_id = author_url.rsplit('/').next().unwrap();
    let response = client
        .post(format!("{}/catalog/book/create", BASE_URL))
        .form(&[
            ("title", title),
            ("author", author_id),
            ("summary", "A test summary"),
            ("isbn", "9780000000000"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    response
        .headers()
        .get("location")
        .expect("No redirect location")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_home_page_shows_counts() {
    let response = client()
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Books:"));
    assert!(body.contains("Authors:"));
}

#[tokio::test]
#[ignore]
async fn test_author_create_is_dedup_idempotent() {
    let client = client();

    let first = create_author(&client, "Dedup", "Probe").await;
    let second = create_author(&client, "Dedup", "Probe").await;

    // The second submission resolves to the first record.
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore]
async fn test_detail_of_nonexistent_author_is_404() {
    let response = client()
        .get(format!(
            "{}/catalog/author/11111111-2222-3333-4444-555555555555",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_invalid_author_submission_rerenders_form() {
    let response = client()
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[("first_name", ""), ("family_name", "Orphan")])
        .send()
        .await
        .expect("Failed to send request");

    // Validation failure re-renders the form, it does not redirect.
    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("First name must be specified."));
    assert!(body.contains("Orphan"));
}

#[tokio::test]
#[ignore]
async fn test_invalid_date_is_rejected() {
    let response = client()
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[
            ("first_name", "Undated"),
            ("family_name", "Probe"),
            ("date_of_birth", "not-a-date"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Invalid date of birth."));
}

#[tokio::test]
#[ignore]
async fn test_book_create_without_genre_stores_empty_list() {
    let client = client();

    let author_url = create_author(&client, "Genreless", "Writer").await;
    let book_url = create_book(&client, "A Book With No Genre", &author_url).await;
    assert!(book_url.starts_with("/catalog/book/"));

    let response = client
        .get(format!("{}{}", BASE_URL, book_url))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_author_delete_blocked_by_books() {
    let client = client();

    let author_url = create_author(&client, "Blocked", "Novelist").await;
    create_book(&client, "The Blocking Novel", &author_url).await;

    let response = client
        .post(format!("{}{}/delete", BASE_URL, author_url))
        .send()
        .await
        .expect("Failed to send request");

    // A blocked delete re-renders the confirmation view.
    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("The Blocking Novel"));

    // The author is still there.
    let response = client
        .get(format!("{}{}", BASE_URL, author_url))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_book_delete_without_copies_succeeds() {
    let client = client();

    let author_url = create_author(&client, "Deletable", "Scribe").await;
    let book_url = create_book(&client, "The Deletable Tome", &author_url).await;

    let response = client
        .post(format!("{}{}/delete", BASE_URL, book_url))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());

    let response = client
        .get(format!("{}{}", BASE_URL, book_url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_bookinstance_lifecycle() {
    let client = client();

    let author_url = create_author(&client, "Copied", "Chronicler").await;
    let book_url = create_book(&client, "The Copied Chronicle", &author_url).await;
    let book_id = book_url.rsplit('/').next().unwrap();

    // Empty due_back and default status are accepted.
    let response = client
        .post(format!("{}/catalog/bookinstance/create", BASE_URL))
        .form(&[
            ("book", book_id),
            ("imprint", "First Edition, 2024"),
            ("status", "Maintenance"),
            ("due_back", ""),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    let instance_url = response
        .headers()
        .get("location")
        .expect("No redirect location")
        .to_str()
        .unwrap()
        .to_string();

    // Instance deletes are unconditional.
    let response = client
        .post(format!("{}{}/delete", BASE_URL, instance_url))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_redirection());

    let response = client
        .get(format!("{}{}", BASE_URL, instance_url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_update_of_nonexistent_book_is_404() {
    let response = client()
        .post(format!(
            "{}/catalog/book/11111111-2222-3333-4444-555555555555/update",
            BASE_URL
        ))
        .form(&[
            ("title", "Ghost Update"),
            ("author", "11111111-2222-3333-4444-555555555555"),
            ("summary", "S"),
            ("isbn", "123"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
