use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_stats::StatsClientConfig;

pub use core_config::Environment;

/// Configuration of the main service
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Where views are recorded and read back
    pub stats: StatsClientConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let stats = StatsClientConfig::from_env()?; // STATS_SERVER_URL=http://localhost:9090

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            stats,
        })
    }
}
