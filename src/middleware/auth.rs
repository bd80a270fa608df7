use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Admin context extracted from a validated session token
#[derive(Clone, Debug)]
pub struct AdminSession {
    pub user_id: uuid::Uuid,
    pub email: String,
}

impl From<Claims> for AdminSession {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub, email: claims.email }
    }
}

/// The single authorization policy point: every mutation route is layered with
/// this. A missing, invalid, or non-admin token is rejected with 401 before the
/// handler (and therefore the data layer) is ever reached.
pub async fn admin_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::validate_token(&token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired session"))?;

    if !claims.is_admin() {
        return Err(ApiError::unauthorized("Admin session required"));
    }

    request.extensions_mut().insert(AdminSession::from(claims));

    Ok(next.run(request).await)
}

/// Non-failing variant for routes that are public but admin-aware (the team
/// roster). Anything short of a valid admin token reads as anonymous.
pub fn maybe_admin(headers: &HeaderMap) -> Option<AdminSession> {
    let token = extract_bearer_token(headers).ok()?;
    let claims = auth::validate_token(&token).ok()?;
    claims.is_admin().then(|| AdminSession::from(claims))
}

/// Extract bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty session token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
