use serde::Serialize;
use tracing::error;

use crate::{
    error::AppError,
    visits::{repo::VisitStore, repo_types::VisitRecord},
};

/// Size of the recent window shown on the home page.
pub const RECENT_WINDOW: i64 = 5;

#[derive(Debug, Serialize)]
pub struct VisitSummary {
    pub total_visits: i64,
    pub recent: Vec<VisitRecord>,
}

/// Records one home-page hit, then reads the totals back.
///
/// The insert completes before either read is issued, so both the count and
/// the recent window include this request's own record.
pub async fn handle_visit(store: &dyn VisitStore, ip_address: &str) -> Result<VisitSummary, AppError> {
    let inserted = store.insert_visit(ip_address).await.map_err(|e| {
        error!(error = %e, ip = %ip_address, "insert visit failed");
        e
    })?;

    let total_visits = store.count_visits().await.map_err(|e| {
        error!(error = %e, visit_id = inserted.id, "count visits failed");
        e
    })?;

    let recent = store.recent_visits(RECENT_WINDOW).await.map_err(|e| {
        error!(error = %e, visit_id = inserted.id, "recent visits failed");
        e
    })?;

    Ok(VisitSummary { total_visits, recent })
}
