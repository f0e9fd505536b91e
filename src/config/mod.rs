use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, resolve_in};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_replay_interval")]
    pub replay_interval_ms: u64,
    #[serde(default = "default_remote_device")]
    pub remote_device_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_replay_interval() -> u64 {
    1000
}
fn default_remote_device() -> String {
    "openBrd".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            replay_interval_ms: default_replay_interval(),
            remote_device_name: default_remote_device(),
            log_level: default_log_level(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("openbrd")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".openbrd")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("openbrd.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("openbrd.sqlite")
    }

    pub fn replay_interval(&self) -> Duration {
        Duration::from_millis(self.replay_interval_ms.max(1))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => resolve_in(&dir, &name),
            None => Self::database_file(),
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&Self::with_database(db_path.clone()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
