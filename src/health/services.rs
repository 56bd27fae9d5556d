use std::time::Instant;

use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use crate::visits::repo::VisitStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

/// Result of a liveness probe. Failures are data here, never an `Err`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>, // seconds since startup
    pub database: DatabaseStatus,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub db_time: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}

pub async fn check_health(store: &dyn VisitStore, started_at: Instant) -> HealthReport {
    let timestamp = OffsetDateTime::now_utc();
    match store.now().await {
        Ok(db_time) => HealthReport {
            status: HealthStatus::Ok,
            timestamp,
            uptime: Some(started_at.elapsed().as_secs_f64()),
            database: DatabaseStatus::Connected,
            db_time: Some(db_time),
            error: None,
        },
        Err(e) => {
            warn!(error = %e, "health check failed");
            HealthReport {
                status: HealthStatus::Error,
                timestamp,
                uptime: None,
                database: DatabaseStatus::Disconnected,
                db_time: None,
                error: Some(e.to_string()),
            }
        }
    }
}
