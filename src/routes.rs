use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::auth::admin_auth_middleware;
use crate::state::AppState;

/// Full application router: public tier merged with the admin tier, which is
/// gated as a whole by the admin session layer.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(admin_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use crate::handlers::public::{auth, blog, cms, contact, pricing, sitemap, team};

    Router::new()
        .route("/auth/login", post(auth::login_post))
        .route("/contact", post(contact::contact_post))
        .route("/cms", get(cms::cms_get))
        .route("/team", get(team::team_get))
        .route("/pricing", get(pricing::pricing_get))
        .route("/blog", get(blog::blog_get))
        .route("/sitemap.xml", get(sitemap::sitemap_get))
}

fn admin_routes() -> Router<AppState> {
    use crate::handlers::admin::{cms, contacts, pricing, team};

    Router::new()
        .route("/contact", get(contacts::contacts_get).delete(contacts::contacts_delete))
        .route("/team", post(team::team_post).put(team::team_put).delete(team::team_delete))
        .route(
            "/pricing",
            post(pricing::pricing_post).put(pricing::pricing_put).delete(pricing::pricing_delete),
        )
        .route("/cms", post(cms::cms_upsert).put(cms::cms_upsert))
        .route_layer(middleware::from_fn(admin_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Agency API",
            "version": version,
            "description": "Content and lead management API for the agency marketing site",
            "endpoints": {
                "home": "/ (public)",
                "login": "/auth/login (public - session issuance)",
                "cms": "GET /cms?section= (public), POST|PUT /cms?section= (admin)",
                "contact": "POST /contact (public), GET|DELETE /contact (admin)",
                "team": "GET /team (public, filtered), POST|PUT|DELETE /team (admin)",
                "pricing": "GET /pricing (public), POST|PUT|DELETE /pricing (admin)",
                "blog": "GET /blog (public)",
                "sitemap": "GET /sitemap.xml (public)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
