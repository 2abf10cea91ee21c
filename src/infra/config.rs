use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub log_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub allow_origins: Vec<String>,
    pub address: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Seconds of inactivity after which a session is gone.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: i64,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_true")]
    pub cookie_http_only: bool,
    /// Seconds between sweeps of expired sessions.
    #[serde(default = "default_purge_interval")]
    pub purge_interval: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub db: Option<DatabaseConfig>,
    pub logger: LoggerConfig,
    pub application: ApplicationConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
}

/// One year.
pub const MAX_IDLE_TIMEOUT: i64 = 31_536_000;

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_cookie_name() -> String {
    "app_session".to_string()
}

fn default_idle_timeout() -> i64 {
    3_600
}

fn default_true() -> bool {
    true
}

fn default_purge_interval() -> u64 {
    300
}

impl AppConfig {
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<AppConfig> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<AppConfig> {
        let config: AppConfig = toml::from_str(contents)?;
        if config.storage.backend == StorageBackend::Postgres && config.db.is_none() {
            anyhow::bail!("`[db]` section is required for the postgres storage backend");
        }
        if config.session.idle_timeout <= 0 {
            anyhow::bail!("`session.idle_timeout` must be positive");
        }
        if config.session.idle_timeout > MAX_IDLE_TIMEOUT {
            anyhow::bail!("`session.idle_timeout` must not exceed {} seconds", MAX_IDLE_TIMEOUT);
        }
        if config.session.purge_interval == 0 {
            anyhow::bail!("`session.purge_interval` must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MINIMAL: &str = r#"
        [application]
        allow_origins = ["*"]
        address = "127.0.0.1:5000"

        [logger]
        log_path = "./logs"

        [storage]
        backend = "memory"

        [session]
    "#;

    #[test]
    fn test_session_defaults() {
        let config = AppConfig::from_toml(MINIMAL).unwrap();

        assert_eq!(config.session.cookie_name, "app_session");
        assert_eq!(config.session.idle_timeout, 3_600);
        assert!(!config.session.cookie_secure);
        assert!(config.session.cookie_http_only);
        assert_eq!(config.application.static_dir, "public");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_postgres_requires_db_section() {
        let contents = MINIMAL.replace("\"memory\"", "\"postgres\"");
        assert!(AppConfig::from_toml(&contents).is_err());

        let with_db = format!("{}\n[db]\nurl = \"postgres://localhost/bakery\"\nmax_connections = 5\n", contents);
        let config = AppConfig::from_toml(&with_db).unwrap();
        assert_eq!(config.db.unwrap().max_connections, 5);
    }

    #[rstest]
    #[case("idle_timeout = 0")]
    #[case("idle_timeout = -5")]
    #[case("idle_timeout = 31536001")]
    #[case("idle_timeout = 9223372036854776")]
    #[case("purge_interval = 0")]
    fn test_rejects_out_of_range_session_values(#[case] line: &str) {
        let contents = MINIMAL.replace("[session]", &format!("[session]\n{}", line));
        assert!(AppConfig::from_toml(&contents).is_err(), "`{}` should be rejected", line);
    }

    #[test]
    fn test_accepts_maximum_idle_timeout() {
        let contents = MINIMAL.replace("[session]", "[session]\nidle_timeout = 31536000");
        let config = AppConfig::from_toml(&contents).unwrap();
        assert_eq!(config.session.idle_timeout, MAX_IDLE_TIMEOUT);
    }
}
