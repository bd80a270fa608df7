use axum::extract::{Query, State};
use serde_json::{json, Value};

use super::{require_id, IdQuery};
use crate::database::models::Contact;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /contact - lead inbox, newest first.
pub async fn contacts_get(State(state): State<AppState>) -> ApiResult<Vec<Contact>> {
    let pool = state.db.pool().await?;
    let contacts = Contact::list(&pool).await?;
    Ok(ApiResponse::success(contacts))
}

/// DELETE /contact?id= - discard a reviewed lead.
pub async fn contacts_delete(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Value> {
    let id = require_id(&query)?;

    let pool = state.db.pool().await?;
    if !Contact::delete(&pool, id).await? {
        return Err(ApiError::not_found("Contact not found"));
    }

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
