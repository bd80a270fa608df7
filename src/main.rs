use agency_api::{config, routes, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Agency API in {:?} mode", config.environment);

    // The connection string is the one piece of configuration the process
    // cannot run without.
    if config.database.url.is_none() {
        tracing::error!("DATABASE_URL is not set; refusing to start");
        std::process::exit(1);
    }

    let app = routes::app(AppState::new());

    // Allow tests or deployments to override port via env
    let port = std::env::var("AGENCY_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Agency API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
