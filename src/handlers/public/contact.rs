use axum::extract::State;
use axum::Json;
use serde_json::Value;
use std::collections::HashMap;

use crate::config;
use crate::database::models::{contact::NewContact, Contact};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::notify;
use crate::state::AppState;

/// POST /contact - public contact-form submission.
///
/// On success the admin notification is dispatched on a detached task; the
/// response never waits on (or reports) delivery.
pub async fn contact_post(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Contact> {
    let new = validate_contact(&payload)?;

    let pool = state.db.pool().await?;
    let contact = Contact::insert(&pool, &new).await?;

    dispatch_notification(&state, &contact);

    Ok(ApiResponse::created(contact))
}

/// Inline required-field check: name, email and message must be present and
/// non-empty; phone is optional.
fn validate_contact(payload: &Value) -> Result<NewContact, ApiError> {
    let mut field_errors = HashMap::new();

    for field in ["name", "email", "message"] {
        let present = payload
            .get(field)
            .and_then(Value::as_str)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);
        if !present {
            field_errors.insert(field.to_string(), "This field is required".to_string());
        }
    }

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Missing required fields", Some(field_errors)));
    }

    Ok(NewContact {
        name: payload["name"].as_str().unwrap_or_default().trim().to_string(),
        email: payload["email"].as_str().unwrap_or_default().trim().to_string(),
        phone: payload
            .get("phone")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        message: payload["message"].as_str().unwrap_or_default().trim().to_string(),
    })
}

/// Fire-and-forget side-channel: at-most-once, failures logged and swallowed.
fn dispatch_notification(state: &AppState, contact: &Contact) {
    let Some(admin_address) = config::config().mail.admin_address.clone() else {
        tracing::debug!("no admin notification address configured, skipping");
        return;
    };
    if !state.mailer.is_configured() {
        tracing::debug!("mail provider not configured, skipping notification");
        return;
    }

    let email = notify::contact_notification(&admin_address, contact);
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        if let Err(e) = mailer.send(email).await {
            tracing::warn!("contact notification failed: {}", e);
        }
    });
}
