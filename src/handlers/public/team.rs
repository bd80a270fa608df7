use axum::extract::State;
use axum::http::HeaderMap;

use crate::database::models::TeamMember;
use crate::middleware::auth::maybe_admin;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /team - roster in display order.
///
/// Anonymous callers see active members only; a valid admin bearer sees the
/// full roster including hidden entries.
pub async fn team_get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<TeamMember>> {
    let include_inactive = maybe_admin(&headers).is_some();

    let pool = state.db.pool().await?;
    let members = TeamMember::list(&pool, include_inactive).await?;

    Ok(ApiResponse::success(members))
}
