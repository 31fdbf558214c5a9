// Application state module
// Immutable runtime state shared by all connections

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use super::types::Config;

/// Application state
///
/// The serving root is canonicalized once at startup and never changes for
/// the lifetime of the process.
pub struct AppState {
    pub config: Config,
    /// Canonical serving root directory
    pub root: PathBuf,

    // Cached config value for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Create `AppState` from loaded configuration.
    ///
    /// Fails if the configured serving root does not exist or is not a
    /// directory.
    pub fn new(config: &Config) -> io::Result<Self> {
        let root = Path::new(&config.server.root).canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::other(format!(
                "serving root is not a directory: {}",
                root.display()
            )));
        }

        Ok(Self {
            config: config.clone(),
            root,
            cached_access_log: AtomicBool::new(config.logging.access_log),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, RoutesConfig, ServerConfig};

    fn test_config(root: &str) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
                root: root.to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
                access_log_format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            routes: RoutesConfig::default(),
        }
    }

    #[test]
    fn state_canonicalizes_root() {
        let state = AppState::new(&test_config(".")).unwrap();
        assert!(state.root.is_absolute());
        assert!(state.root.is_dir());
    }

    #[test]
    fn state_rejects_missing_root() {
        assert!(AppState::new(&test_config("/nonexistent/devserver-root")).is_err());
    }
}
