//! Roster Server - employee records service
//!
//! # Module layout
//!
//! ```text
//! roster-server/src/
//! ├── core/          # configuration, state, startup errors, server
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── api/           # HTTP routes and handlers
//! ├── middleware/    # request logging
//! ├── seed.rs        # synthetic data for development
//! └── utils/         # logging setup
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod seed;
pub mod utils;

pub use crate::core::{Config, Environment, Server, ServerError, ServerState};
pub use db::DbService;
pub use db::repository::{EmployeeRepository, RepoError, RepoResult};
pub use seed::{SeedOutcome, generate_seed_data, generate_seed_data_with_rng};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and read the configuration
///
/// Logging is not up yet at this point, so problems are returned, not logged.
pub fn load_config() -> crate::core::Result<Config> {
    // a missing .env file is normal outside development
    let _ = dotenvy::dotenv();
    Config::from_env()
}

/// Install the tracing subscriber described by `config`
pub fn setup_logging(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
}

/// Run startup seeding if the configuration asks for it
pub async fn seed_on_startup(state: &ServerState) -> crate::core::Result<Option<SeedOutcome>> {
    if !state.config.seed_on_startup {
        return Ok(None);
    }
    let outcome = generate_seed_data(&state.employees(), state.config.seed_count)
        .await
        .map_err(|e| ServerError::Seed(e.to_string()))?;
    Ok(Some(outcome))
}
