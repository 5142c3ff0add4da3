// Health check service implementation

use crate::db::DbPool;

pub struct HealthChecker<'a> {
    pool: &'a DbPool,
}

impl<'a> HealthChecker<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// The process is up as long as it can answer
    pub fn check(&self) -> bool {
        true
    }

    /// Ready once the database answers a ping
    pub async fn check_ready(&self) -> bool {
        match self.pool.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Readiness check failed: {}", e);
                false
            }
        }
    }
}
