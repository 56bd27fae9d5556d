use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    routing::get,
    Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    error::AppError,
    state::AppState,
    views::{HomeTemplate, Page},
    visits::{repo_types::UNKNOWN_IP, services::handle_visit},
};

pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}

#[instrument(skip(state, peer))]
pub async fn home(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Result<Page<HomeTemplate>, AppError> {
    let ip = peer
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string());

    let summary = handle_visit(state.store.as_ref(), &ip).await?;
    info!(total = summary.total_visits, %ip, "visit recorded");

    Ok(Page(HomeTemplate::new(
        &summary,
        state.config.port,
        OffsetDateTime::now_utc(),
    )))
}
