use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state - shared by all request handlers
///
/// Cloning is cheap: the database service wraps a pooled connection handle.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Ensures the working directory structure exists, then opens the
    /// database (running migrations).
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("booking.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self {
            config: config.clone(),
            db,
        })
    }
}
