use core_config::{AppInfo, FromEnv, app_info, env_optional, env_parse, server::ServerConfig};
use std::path::PathBuf;
use std::time::Duration;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Lot catalog JSON file; the bundled seed catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let catalog_path = env_optional("PARKING_CATALOG_PATH").map(PathBuf::from);
        let shutdown_timeout = Duration::from_secs(env_parse("SHUTDOWN_TIMEOUT_SECS", 30u64)?);

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            catalog_path,
            shutdown_timeout,
        })
    }
}
