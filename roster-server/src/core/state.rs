use std::sync::Arc;
use std::time::Instant;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::EmployeeRepository;

/// Shared state injected into every handler
///
/// Cheap to clone: the config is behind an `Arc` and `DbService` wraps a pool handle.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        Self {
            config: Arc::new(config),
            db,
            started_at: Instant::now(),
        }
    }

    /// Open the configured database and build the state around it
    pub async fn initialize(config: Config) -> Result<Self> {
        let db = DbService::new(&config.database_url, config.database_max_connections).await?;
        Ok(Self::new(config, db))
    }

    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.db.pool.clone())
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
