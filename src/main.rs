mod app;
mod auth;
mod config;
mod error;
mod health;
mod state;
mod views;
mod visits;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "visit_tracker=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;

    // A failed schema setup leaves the server up so /health can explain what is wrong.
    match app_state.store.ensure_schema().await {
        Ok(()) => tracing::info!("visit store initialised"),
        Err(e) => tracing::error!(error = %e, "visit store initialisation failed; continuing"),
    }

    let app = app::build_app(app_state.clone());
    app::serve(app, app_state).await
}
