use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;

use crate::database::models::CmsSection;
use crate::error::ApiError;
use crate::handlers::public::cms::{require_section, SectionQuery};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST|PUT /cms?section=key - create-or-merge a page section.
///
/// The body is the fields document; supplied fields overwrite stored ones and
/// everything else is left in place. First write creates the section.
pub async fn cms_upsert(
    State(state): State<AppState>,
    Query(query): Query<SectionQuery>,
    Json(payload): Json<Value>,
) -> ApiResult<CmsSection> {
    let section = require_section(&query)?;

    if !payload.is_object() {
        return Err(ApiError::invalid_json("Expected a JSON object of section fields"));
    }

    let pool = state.db.pool().await?;
    let stored = CmsSection::upsert(&pool, section, &payload).await?;

    Ok(ApiResponse::success(stored))
}
