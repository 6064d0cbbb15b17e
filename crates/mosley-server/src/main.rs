use tracing_subscriber::EnvFilter;

use mosley_server::build_app;
use mosley_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    let json_logs = std::env::var("MOSLEY_LOG_FORMAT").is_ok_and(|f| f == "json");
    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    if json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = ServerConfig::load();
    config.validate();
    let listen_addr = config.listen_addr.clone();

    let (app, _state) = match build_app(config) {
        Ok(built) => built,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load tournament");
            std::process::exit(1);
        },
    };

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {listen_addr}: {e}"));

    tracing::info!("Mosley Open scorekeeper listening on {listen_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
