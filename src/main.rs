use status_service::{
    assets::DirAssets, build_router, config::Config, docs::ApiDocs, metrics::RequestCounter,
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,status_service=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let docs = match &config.swagger_file {
        Some(path) => {
            info!(path = %path.display(), "Loading OpenAPI document");
            ApiDocs::from_file(path)?
        }
        None => ApiDocs::bundled()?,
    };

    let counter = RequestCounter::with_process_metrics()?;
    let assets = DirAssets::new(&config.static_dir);
    info!(dir = %config.static_dir.display(), "Static files served from");

    let state = AppState::new(counter, config.build.clone(), docs, assets);
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Backend running from http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
