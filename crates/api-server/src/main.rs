use anyhow::Context;
use api_server::router;
use application::UserApp;
use config::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!("🚀 Starting User Registry API Server");
    config.log_summary();

    let user_app = Arc::new(UserApp::from_config(&config)?);
    let app = router(user_app);

    // Run the server
    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {bind_address}"))?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   POST   /api/users        - Create user");
    info!("   GET    /api/users        - List all users");
    info!("   GET    /api/users/count  - Count users");
    info!("   GET    /api/users/:id    - Get user");
    info!("   PUT    /api/users/:id    - Update user (partial)");
    info!("   DELETE /api/users/:id    - Delete user");
    info!("   GET    /health           - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 API Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
