//! API integration tests
//!
//! These run against a live server with a clean database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so tests can be re-run against the same database
fn unique() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos()
}

async fn register_admin(client: &Client, email: &str) -> Value {
    let response = client
        .post(format!("{}/admin/register", BASE_URL))
        .json(&json!({
            "full_name": "Test Admin",
            "email": email,
            "password": "Secret1",
            "phone": "0123456789",
            "age": 35
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

async fn get_auth_token(client: &Client) -> String {
    let email = format!("auth{}@test.org", unique());
    register_admin(client, &email).await;

    let response = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "Secret1"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["access_token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_admin_register_and_login() {
    let client = Client::new();
    let email = format!("admin{}@test.org", unique());

    let body = register_admin(&client, &email).await;
    assert!(body["id"].is_number());
    assert_eq!(body["status"], "active");
    assert_eq!(body["role"], "admin");
    // Hash is never exposed
    assert!(body.get("password").is_none());

    let response = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({ "email": email, "password": "Secret1" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Login successful");
    assert!(body["access_token"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_conflicts() {
    let client = Client::new();
    let email = format!("dup{}@test.org", unique());

    register_admin(&client, &email).await;

    let response = client
        .post(format!("{}/admin/register", BASE_URL))
        .json(&json!({
            "full_name": "Another Name",
            "email": email,
            "password": "Other99",
            "phone": "999999",
            "age": 50
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_login_failures_are_indistinguishable() {
    let client = Client::new();
    let email = format!("leak{}@test.org", unique());
    register_admin(&client, &email).await;

    let wrong_password = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({ "email": email, "password": "WrongPass" }))
        .send()
        .await
        .expect("Failed to send request");

    let unknown_email = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({ "email": "nobody@test.org", "password": "Secret1" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_email.status(), 401);

    let a: Value = wrong_password.json().await.expect("parse");
    let b: Value = unknown_email.json().await.expect("parse");
    assert_eq!(a["message"], b["message"]);
}

#[tokio::test]
#[ignore]
async fn test_invalid_registration_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/admin/register", BASE_URL))
        .json(&json!({
            "full_name": "X",
            "email": "not-an-email",
            "password": "123",
            "phone": "abc",
            "age": 99
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_librarian_registration_gets_six_digit_id_and_full_name() {
    let client = Client::new();
    let email = format!("ann{}@x.com", unique());

    let response = client
        .post(format!("{}/librarian/register", BASE_URL))
        .json(&json!({
            "first_name": "Ann",
            "last_name": "Lee",
            "email": email,
            "password": "Secret1",
            "phone": "12345",
            "age": 30,
            "designation": "Clerk",
            "is_active": true
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No librarian id");
    assert!((100_000..=999_999).contains(&id));
    assert_eq!(body["full_name"], "Ann Lee");
    assert_eq!(body["designation"], "Clerk");

    // Same email again conflicts
    let response = client
        .post(format!("{}/librarian/register", BASE_URL))
        .json(&json!({
            "first_name": "Bea",
            "last_name": "Orr",
            "email": email,
            "password": "Secret2",
            "phone": "54321",
            "age": 40
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_supervisor_assignment() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let admin = register_admin(&client, &format!("sup{}@test.org", unique())).await;
    let admin_id = admin["id"].as_i64().expect("admin id");

    let response = client
        .post(format!("{}/librarian/register", BASE_URL))
        .json(&json!({
            "first_name": "Lib",
            "last_name": "One",
            "email": format!("lib{}@test.org", unique()),
            "password": "Secret1",
            "phone": "11111",
            "age": 25
        }))
        .send()
        .await
        .expect("Failed to send request");
    let librarian: Value = response.json().await.expect("parse");
    let librarian_id = librarian["id"].as_i64().expect("librarian id");

    // Assigning to a missing admin is a 404
    let response = client
        .put(format!(
            "{}/librarian/{}/supervisor/999999999",
            BASE_URL, librarian_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Assigning to an existing admin succeeds
    let response = client
        .put(format!(
            "{}/librarian/{}/supervisor/{}",
            BASE_URL, librarian_id, admin_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("parse");
    assert_eq!(body["supervisor"]["id"].as_i64(), Some(admin_id));

    // Deleting the admin leaves the librarian with a null supervisor
    let response = client
        .delete(format!("{}/admin/{}", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/librarian/{}", BASE_URL, librarian_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("parse");
    assert!(body["supervisor"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_profile_upsert_merges_fields() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let admin = register_admin(&client, &format!("prof{}@test.org", unique())).await;
    let admin_id = admin["id"].as_i64().expect("admin id");

    // First upsert creates the profile
    let response = client
        .put(format!("{}/admin/{}/profile", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "address": "12 Main St", "bio": "First bio" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Second upsert with only bio keeps the address
    let response = client
        .put(format!("{}/admin/{}/profile", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "bio": "Updated bio" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/admin/{}/profile", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("parse");
    assert_eq!(body["address"], "12 Main St");
    assert_eq!(body["bio"], "Updated bio");
}

#[tokio::test]
#[ignore]
async fn test_change_status_persists() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let admin = register_admin(&client, &format!("status{}@test.org", unique())).await;
    let admin_id = admin["id"].as_i64().expect("admin id");

    let response = client
        .patch(format!("{}/admin/{}/status", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "inactive" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("parse");
    assert_eq!(body["status"], "inactive");

    // The flip survives a fresh read
    let response = client
        .get(format!("{}/admin/{}", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("parse");
    assert_eq!(body["status"], "inactive");
}

#[tokio::test]
#[ignore]
async fn test_change_status_missing_admin_is_404() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .patch(format!("{}/admin/999999999/status", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "inactive" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_change_active_persists() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/librarian/register", BASE_URL))
        .json(&json!({
            "first_name": "Tom",
            "last_name": "Fry",
            "email": format!("active{}@test.org", unique()),
            "password": "Secret1",
            "phone": "22222",
            "age": 28
        }))
        .send()
        .await
        .expect("Failed to send request");
    let librarian: Value = response.json().await.expect("parse");
    assert_eq!(librarian["is_active"], true);
    let librarian_id = librarian["id"].as_i64().expect("librarian id");

    let response = client
        .patch(format!("{}/librarian/{}/active", BASE_URL, librarian_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "is_active": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("parse");
    assert_eq!(body["is_active"], false);

    let response = client
        .get(format!("{}/librarian/{}", BASE_URL, librarian_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("parse");
    assert_eq!(body["is_active"], false);
}

#[tokio::test]
#[ignore]
async fn test_change_active_missing_librarian_is_404() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .patch(format!("{}/librarian/999999999/active", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "is_active": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_older_than_is_strictly_exclusive() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let at_threshold = format!("sixty{}@test.org", unique());
    let above_threshold = format!("sixtyone{}@test.org", unique());

    for (email, age) in [(&at_threshold, 60), (&above_threshold, 61)] {
        let response = client
            .post(format!("{}/admin/register", BASE_URL))
            .json(&json!({
                "full_name": "Age Case",
                "email": email,
                "password": "Secret1",
                "phone": "3333333",
                "age": age
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/admin/older-than/60", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("parse");
    let emails: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|a| a["email"].as_str())
        .collect();

    // Strictly older only: 61 matches, exactly 60 does not
    assert!(emails.contains(&above_threshold.as_str()));
    assert!(!emails.contains(&at_threshold.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_update_email_uniqueness() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let taken = format!("taken{}@test.org", unique());
    register_admin(&client, &taken).await;

    let admin = register_admin(&client, &format!("upd{}@test.org", unique())).await;
    let admin_id = admin["id"].as_i64().expect("admin id");

    // Changing to a taken email is rejected
    let response = client
        .put(format!("{}/admin/{}", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "email": taken }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Changing to an unused email succeeds
    let fresh = format!("fresh{}@test.org", unique());
    let response = client
        .put(format!("{}/admin/{}", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "email": fresh }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("parse");
    assert_eq!(body["email"], fresh);
}

#[tokio::test]
#[ignore]
async fn test_search_returns_empty_list_for_no_matches() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!(
            "{}/librarian/search?name=zzz-no-such-name",
            BASE_URL
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("parse");
    assert_eq!(body.as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_get_missing_entities_is_404() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    for path in [
        format!("{}/admin/999999999", BASE_URL),
        format!("{}/librarian/999999999", BASE_URL),
    ] {
        let response = client
            .get(path)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 404);
    }
}
