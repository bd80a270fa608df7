use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::database::models::CmsSection;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SectionQuery {
    pub section: Option<String>,
}

/// GET /cms?section=key - public read of a page section.
///
/// A section that has never been written returns an empty object; absence is
/// not an error for readers.
pub async fn cms_get(
    State(state): State<AppState>,
    Query(query): Query<SectionQuery>,
) -> ApiResult<Value> {
    let section = require_section(&query)?;

    let pool = state.db.pool().await?;
    let fields = CmsSection::fetch_fields(&pool, section).await?;

    Ok(ApiResponse::success(fields))
}

pub(crate) fn require_section(query: &SectionQuery) -> Result<&str, ApiError> {
    query
        .section
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing section parameter"))
}
