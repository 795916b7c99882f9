use crate::core::Config;
use crate::db::DbService;
use crate::services::EmployeeService;
use crate::utils::AppError;

/// Shared application state
///
/// Cheap to clone: every field is a handle around the same connection pool.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub employees: EmployeeService,
}

impl ServerState {
    /// Open the configured database, apply migrations and build services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// Build state around an already opened database (tests, embedders)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let employees = EmployeeService::new(db.pool.clone());
        Self {
            config,
            db,
            employees,
        }
    }
}
