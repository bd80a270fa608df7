use axum::extract::State;

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::BlogPost;
use crate::state::AppState;

/// GET /blog - posts from the external blog-listing collaborator.
pub async fn blog_get(State(state): State<AppState>) -> ApiResult<Vec<BlogPost>> {
    let posts = state.blog.list_posts().await?;
    Ok(ApiResponse::success(posts))
}
