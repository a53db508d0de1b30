pub mod config;
pub mod db;
pub mod routes;
pub mod store;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::Config;

/// Run the web server until it fails or the process is stopped.
pub async fn run(config: Config) -> Result<(), String> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting vitals serve on {}", config.listen_addr);

    // Database pool
    let pool = db::Pool::new(config.clone());

    // Table bootstrap is best effort: the server still answers validation
    // errors and health checks while the database is down.
    match pool.get().await {
        Ok(client) => match store::bootstrap(&client).await {
            Ok(()) => tracing::info!("Database initialized"),
            Err(e) => tracing::error!("Database initialization failed: {}", e),
        },
        Err(e) => tracing::error!("Database connection failed: {}", e),
    }

    // Build router
    let mut app = routes::build_router(pool);

    // Serve static files if configured
    if let Some(ref static_dir) = config.static_dir {
        tracing::info!("Serving static files from {}", static_dir);
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.listen_addr))?;

    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {e}"))
}
