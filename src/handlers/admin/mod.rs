// Admin endpoints. Every route in this tier sits behind
// `middleware::auth::admin_auth_middleware`; handlers can assume the caller
// holds an admin session.
pub mod cms;
pub mod contacts;
pub mod pricing;
pub mod team;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Identifier-addressed operations take `?id=<uuid>`.
pub(crate) fn require_id(query: &IdQuery) -> Result<Uuid, ApiError> {
    let raw = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing id parameter"))?;

    raw.parse().map_err(|_| ApiError::bad_request("Invalid id parameter"))
}
