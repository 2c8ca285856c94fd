use anyhow::{Context, Result};
use students_core::telemetry::init_tracing;
use students_core::{DynamoStudentStore, StudentHandlers, load_config};
use tracing::info;

/// Path of a YAML config file bundled with the function, if any.
pub const CONFIG_PATH_ENV_VAR: &str = "STUDENTS_CONFIG_PATH";

pub type LambdaHandlers = StudentHandlers<DynamoStudentStore>;

/// Cold-start setup shared by both functions: tracing, configuration and a
/// DynamoDB client that every invocation of this instance reuses.
pub async fn bootstrap() -> Result<LambdaHandlers> {
    init_tracing();

    let config_path = std::env::var(CONFIG_PATH_ENV_VAR).ok();
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    info!(
        "Using table '{}' in {} (page limit: {:?})",
        config.table_name, config.region, config.scan_page_limit
    );

    let store = DynamoStudentStore::from_config(&config).await;
    Ok(StudentHandlers::from_config(store, &config))
}
