use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::auth::{self, Claims, ROLE_ADMIN};
use crate::config;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /auth/login - validate credentials and issue a session token.
///
/// Every failure mode (unknown email, wrong password, non-admin account) gets
/// the same message so the response does not reveal which check failed.
pub async fn login_post(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Value> {
    let email = required_str(&payload, "email")?;
    let password = required_str(&payload, "password")?;

    let pool = state.db.pool().await?;

    let user = User::find_by_email(&pool, email).await?.ok_or_else(login_rejected)?;

    if user.role != ROLE_ADMIN {
        return Err(login_rejected());
    }

    if !auth::verify_password(password, &user.password_hash) {
        return Err(login_rejected());
    }

    let claims = Claims::new(user.id, user.email.clone(), user.role.clone());
    let token = auth::generate_token(claims).map_err(|e| {
        tracing::error!("session token generation failed: {}", e);
        ApiError::internal_server_error("Could not establish session")
    })?;

    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": {
            "id": user.id,
            "email": user.email,
            "role": user.role,
        },
        "expires_in": expires_in,
    })))
}

fn login_rejected() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}

fn required_str<'a>(payload: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            let mut field_errors = std::collections::HashMap::new();
            field_errors.insert(field.to_string(), "This field is required".to_string());
            ApiError::validation_error("Missing required fields", Some(field_errors))
        })
}
