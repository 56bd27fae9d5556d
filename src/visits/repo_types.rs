use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Address stored when the peer address of a request is not known.
pub const UNKNOWN_IP: &str = "unknown";

/// One home-page hit, as persisted by the visit store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct VisitRecord {
    pub id: i64,                     // assigned by the store
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,   // assigned by the store at insert time
    pub ip_address: String,          // peer address or UNKNOWN_IP
}
