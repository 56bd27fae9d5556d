use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    error::StoreError,
    visits::{repo::VisitStore, repo_types::VisitRecord},
};

/// In-process visit store used by tests. `set_offline(true)` makes every call fail.
#[derive(Default)]
pub struct MemoryVisitStore {
    rows: Mutex<Vec<VisitRecord>>,
    schema_creations: Mutex<u32>,
    offline: AtomicBool,
}

impl MemoryVisitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// How many times `ensure_schema` actually had to create the relation.
    pub fn schema_creations(&self) -> u32 {
        *self.schema_creations.lock().unwrap()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Offline("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl VisitStore for MemoryVisitStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.check()?;
        let mut created = self.schema_creations.lock().unwrap();
        if *created == 0 {
            *created = 1;
        }
        Ok(())
    }

    async fn insert_visit(&self, ip_address: &str) -> Result<VisitRecord, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        // keep timestamps non-decreasing even if the wall clock steps back
        let now = OffsetDateTime::now_utc();
        let timestamp = rows.last().map_or(now, |last| last.timestamp.max(now));
        let record = VisitRecord {
            id: rows.len() as i64 + 1,
            timestamp,
            ip_address: ip_address.to_string(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn count_visits(&self) -> Result<i64, StoreError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, StoreError> {
        self.check()?;
        let limit = usize::try_from(limit)
            .map_err(|_| StoreError::Invalid(format!("negative limit {limit}")))?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn now(&self) -> Result<OffsetDateTime, StoreError> {
        self.check()?;
        Ok(OffsetDateTime::now_utc())
    }
}
