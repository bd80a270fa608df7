use axum::extract::State;
use axum::http::HeaderMap;

use crate::database::models::PricingPlan;
use crate::middleware::auth::maybe_admin;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /pricing - plans for the pricing page.
///
/// Anonymous callers see active plans only; an admin bearer sees inactive
/// drafts as well.
pub async fn pricing_get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<PricingPlan>> {
    let include_inactive = maybe_admin(&headers).is_some();

    let pool = state.db.pool().await?;
    let plans = PricingPlan::list(&pool, include_inactive).await?;

    Ok(ApiResponse::success(plans))
}
