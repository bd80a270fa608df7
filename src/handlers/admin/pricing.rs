use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

use super::team::require_fields;
use super::{require_id, IdQuery};
use crate::database::models::pricing::{NewPricingPlan, PricingPlanPatch};
use crate::database::models::PricingPlan;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /pricing - add a plan. `price` may arrive as JSON text or number.
pub async fn pricing_post(
    State(state): State<AppState>,
    Json(mut payload): Json<Value>,
) -> ApiResult<PricingPlan> {
    coerce_price(&mut payload);
    require_fields(&payload, &["title", "price", "features"])?;
    let new: NewPricingPlan = serde_json::from_value(payload)
        .map_err(|e| ApiError::invalid_json(e.to_string()))?;

    let pool = state.db.pool().await?;
    let plan = PricingPlan::insert(&pool, &new).await?;

    Ok(ApiResponse::created(plan))
}

/// PUT /pricing?id= - partial update; absent fields stay as they are.
pub async fn pricing_put(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(mut payload): Json<Value>,
) -> ApiResult<PricingPlan> {
    let id = require_id(&query)?;
    coerce_price(&mut payload);
    let patch: PricingPlanPatch = serde_json::from_value(payload)
        .map_err(|e| ApiError::invalid_json(e.to_string()))?;

    let pool = state.db.pool().await?;
    let plan = PricingPlan::update(&pool, id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Pricing plan not found"))?;

    Ok(ApiResponse::success(plan))
}

/// DELETE /pricing?id=
pub async fn pricing_delete(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Value> {
    let id = require_id(&query)?;

    let pool = state.db.pool().await?;
    if !PricingPlan::delete(&pool, id).await? {
        return Err(ApiError::not_found("Pricing plan not found"));
    }

    Ok(ApiResponse::success(json!({ "deleted": id })))
}

/// Plans are priced as display text; numeric input is kept by stringifying it.
fn coerce_price(payload: &mut Value) {
    if let Some(price) = payload.get_mut("price") {
        if let Value::Number(n) = price {
            *price = Value::String(n.to_string());
        }
    }
}
