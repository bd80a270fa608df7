use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};
use std::collections::HashMap;

use super::{require_id, IdQuery};
use crate::database::models::team::{NewTeamMember, TeamMemberPatch};
use crate::database::models::TeamMember;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /team - add a roster member.
pub async fn team_post(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<TeamMember> {
    require_fields(&payload, &["name", "role", "image"])?;
    let new: NewTeamMember = serde_json::from_value(payload)
        .map_err(|e| ApiError::invalid_json(e.to_string()))?;

    let pool = state.db.pool().await?;
    let member = TeamMember::insert(&pool, &new).await?;

    Ok(ApiResponse::created(member))
}

/// PUT /team?id= - partial update; absent fields stay as they are.
pub async fn team_put(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(payload): Json<Value>,
) -> ApiResult<TeamMember> {
    let id = require_id(&query)?;
    let patch: TeamMemberPatch = serde_json::from_value(payload)
        .map_err(|e| ApiError::invalid_json(e.to_string()))?;

    let pool = state.db.pool().await?;
    let member = TeamMember::update(&pool, id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Team member not found"))?;

    Ok(ApiResponse::success(member))
}

/// DELETE /team?id=
pub async fn team_delete(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Value> {
    let id = require_id(&query)?;

    let pool = state.db.pool().await?;
    if !TeamMember::delete(&pool, id).await? {
        return Err(ApiError::not_found("Team member not found"));
    }

    Ok(ApiResponse::success(json!({ "deleted": id })))
}

/// Inline presence check shared by the create handlers in this tier.
pub(crate) fn require_fields(payload: &Value, fields: &[&str]) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    for field in fields {
        let present = match payload.get(*field) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        if !present {
            field_errors.insert(field.to_string(), "This field is required".to_string());
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Missing required fields", Some(field_errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_check_flags_each_missing_field() {
        let err = require_fields(&json!({ "name": "Ada" }), &["name", "role", "image"]).unwrap_err();
        let body = err.to_json();
        assert!(body["field_errors"].get("role").is_some());
        assert!(body["field_errors"].get("image").is_some());
        assert!(body["field_errors"].get("name").is_none());
    }

    #[test]
    fn non_string_values_count_as_present() {
        assert!(require_fields(&json!({ "features": ["a"] }), &["features"]).is_ok());
    }
}
