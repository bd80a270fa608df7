mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use agency_api::auth;
use agency_api::database::manager::DatabaseManager;
use agency_api::database::models::User;
use agency_api::routes;
use agency_api::services::notify::MailError;
use agency_api::services::{Mailer, OutboundEmail};
use agency_api::state::AppState;

// End-to-end content API behavior against a real database. Every test here
// no-ops when the environment provides no DATABASE_URL.

#[tokio::test]
async fn cms_upsert_merges_and_reads_back() -> Result<()> {
    common::init();
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let app = common::app();
    let token = common::admin_token();
    let section = format!("about_{}", Uuid::new_v4().simple());

    // First write creates the section
    let response = app
        .clone()
        .oneshot(common::authed_json_request(
            "POST",
            &format!("/cms?section={}", section),
            &token,
            json!({ "title": "About us", "description": "Original" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Second write merges: supplied fields win, others are untouched
    let response = app
        .clone()
        .oneshot(common::authed_json_request(
            "PUT",
            &format!("/cms?section={}", section),
            &token,
            json!({ "description": "Rewritten", "stats": [{ "label": "projects", "value": 120 }] }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::get_request(&format!("/cms?section={}", section)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["title"], "About us");
    assert_eq!(body["data"]["description"], "Rewritten");
    assert_eq!(body["data"]["stats"][0]["label"], "projects");

    Ok(())
}

#[tokio::test]
async fn unknown_cms_section_reads_as_empty_object() -> Result<()> {
    common::init();
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let section = format!("never_written_{}", Uuid::new_v4().simple());
    let response = common::app()
        .oneshot(common::get_request(&format!("/cms?section={}", section)))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"], json!({}));

    Ok(())
}

#[tokio::test]
async fn contact_lifecycle_create_list_delete() -> Result<()> {
    common::init();
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let app = common::app();
    let token = common::admin_token();
    let marker = Uuid::new_v4().simple().to_string();

    let first = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/contact",
            json!({
                "name": format!("First {}", marker),
                "email": "first@example.com",
                "message": "We need a site",
            }),
        ))
        .await?;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_id = common::body_json(first).await["data"]["id"].as_str().unwrap().to_string();

    let second = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/contact",
            json!({
                "name": format!("Second {}", marker),
                "email": "second@example.com",
                "phone": "+1 555 0100",
                "message": "Quote please",
            }),
        ))
        .await?;
    assert_eq!(second.status(), StatusCode::CREATED);
    let second_id = common::body_json(second).await["data"]["id"].as_str().unwrap().to_string();

    // Admin inbox is newest-first: the later lead sorts before the earlier one
    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/contact", &token))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let ids: Vec<&str> =
        body["data"].as_array().unwrap().iter().filter_map(|c| c["id"].as_str()).collect();
    let first_pos = ids.iter().position(|id| *id == first_id).expect("first lead listed");
    let second_pos = ids.iter().position(|id| *id == second_id).expect("second lead listed");
    assert!(second_pos < first_pos, "newest lead should sort first");

    // Delete both; a second delete of the same id is a 404
    for id in [&first_id, &second_id] {
        let response = app
            .clone()
            .oneshot(common::authed_request("DELETE", &format!("/contact?id={}", id), &token))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app
        .clone()
        .oneshot(common::authed_request("DELETE", &format!("/contact?id={}", first_id), &token))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn team_visibility_and_partial_update() -> Result<()> {
    common::init();
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let app = common::app();
    let token = common::admin_token();

    let hidden = app
        .clone()
        .oneshot(common::authed_json_request(
            "POST",
            "/team",
            &token,
            json!({
                "name": "Hidden Member",
                "role": "Designer",
                "image": "hidden.png",
                "active": false,
            }),
        ))
        .await?;
    assert_eq!(hidden.status(), StatusCode::CREATED);
    let hidden_id = common::body_json(hidden).await["data"]["id"].as_str().unwrap().to_string();

    // Anonymous roster never contains an inactive member
    let response = app.clone().oneshot(common::get_request("/team")).await?;
    let body = common::body_json(response).await;
    for member in body["data"].as_array().unwrap() {
        assert_eq!(member["active"], true);
        assert_ne!(member["id"], hidden_id.as_str());
    }

    // Admin roster does
    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/team", &token))
        .await?;
    let body = common::body_json(response).await;
    let listed: Vec<&str> =
        body["data"].as_array().unwrap().iter().filter_map(|m| m["id"].as_str()).collect();
    assert!(listed.contains(&hidden_id.as_str()));

    // Partial update leaves unsupplied fields alone
    let response = app
        .clone()
        .oneshot(common::authed_json_request(
            "PUT",
            &format!("/team?id={}", hidden_id),
            &token,
            json!({ "bio": "Ten years of product design" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["name"], "Hidden Member");
    assert_eq!(body["data"]["bio"], "Ten years of product design");
    assert_eq!(body["data"]["active"], false);

    // Deleting a random id is a 404 and changes nothing
    let before = app
        .clone()
        .oneshot(common::authed_request("GET", "/team", &token))
        .await?;
    let before_count = common::body_json(before).await["data"].as_array().unwrap().len();

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "DELETE",
            &format!("/team?id={}", Uuid::new_v4()),
            &token,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let after = app
        .clone()
        .oneshot(common::authed_request("GET", "/team", &token))
        .await?;
    let after_count = common::body_json(after).await["data"].as_array().unwrap().len();
    assert_eq!(before_count, after_count);

    // Cleanup
    let response = app
        .clone()
        .oneshot(common::authed_request("DELETE", &format!("/team?id={}", hidden_id), &token))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn pricing_coercion_and_visibility() -> Result<()> {
    common::init();
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let app = common::app();
    let token = common::admin_token();

    let created = app
        .clone()
        .oneshot(common::authed_json_request(
            "POST",
            "/pricing",
            &token,
            json!({
                "title": "Draft Plan",
                "price": 49,
                "features": ["One page", "Contact form"],
                "status": "inactive",
            }),
        ))
        .await?;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = common::body_json(created).await;
    let plan_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["price"], "49", "numeric price is stored as text");

    // Inactive plans are admin-only
    let response = app.clone().oneshot(common::get_request("/pricing")).await?;
    let public_body = common::body_json(response).await;
    let public: Vec<&str> = public_body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert!(!public.contains(&plan_id.as_str()));

    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/pricing", &token))
        .await?;
    let all_body = common::body_json(response).await;
    let all: Vec<&str> = all_body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert!(all.contains(&plan_id.as_str()));

    // Cleanup
    let response = app
        .clone()
        .oneshot(common::authed_request("DELETE", &format!("/pricing?id={}", plan_id), &token))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn contact_creation_dispatches_admin_notification() -> Result<()> {
    common::init();
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let mailer = Arc::new(RecordingMailer::default());
    let app = routes::app(AppState::new().with_mailer(mailer.clone()));

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/contact",
            json!({
                "name": "Grace",
                "email": "grace@example.com",
                "message": "Interested in a redesign",
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The dispatch is detached from the response path; give it a moment
    let mut delivered = Vec::new();
    for _ in 0..40 {
        delivered = mailer.sent.lock().unwrap().clone();
        if !delivered.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(delivered.len(), 1, "exactly one notification per lead");
    assert_eq!(delivered[0].to, "leads@example.com");
    assert!(delivered[0].html.contains("Grace"));

    Ok(())
}

#[tokio::test]
async fn login_issues_usable_sessions_only_for_valid_admin_credentials() -> Result<()> {
    common::init();
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let app = common::app();
    let pool = DatabaseManager::new().pool().await?;

    let admin_email = format!("admin_{}@example.com", Uuid::new_v4().simple());
    let hash = auth::hash_password("correct-password").expect("hash");
    User::insert(&pool, &admin_email, &hash, auth::ROLE_ADMIN).await?.expect("fresh admin");

    let plain_email = format!("user_{}@example.com", Uuid::new_v4().simple());
    User::insert(&pool, &plain_email, &hash, "user").await?.expect("fresh user");

    // Wrong password, unknown email, and non-admin accounts all fail the same way
    let failures = [
        json!({ "email": admin_email, "password": "wrong-password" }),
        json!({ "email": format!("nobody_{}@example.com", Uuid::new_v4().simple()), "password": "correct-password" }),
        json!({ "email": plain_email, "password": "correct-password" }),
    ];
    for payload in failures {
        let response = app
            .clone()
            .oneshot(common::json_request("POST", "/auth/login", payload))
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = common::body_json(response).await;
        assert_eq!(body["message"], "Invalid email or password");
    }

    // Correct credentials produce a token the admin tier accepts
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/auth/login",
            json!({ "email": admin_email, "password": "correct-password" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let token = body["data"]["token"].as_str().expect("token").to_string();
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/contact", &token))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
