mod routes;

use dogwalk_client::config::AuthConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Non-fatal: the client falls back to its guard policy.
    let auth = AuthConfig::from_env();
    match auth.validate() {
        Ok(()) => tracing::info!(url = %auth.url, "auth service configured"),
        Err(e) => tracing::warn!(
            error = %e,
            key = %auth.redacted_key(),
            mode = ?auth.guard_mode(),
            "auth service misconfigured"
        ),
    }

    let app = routes::leptos_app().expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "dogwalk listening");
    axum::serve(listener, app).await.expect("server failed");
}
