//! Runtime configuration.

use std::path::PathBuf;

/// Configuration resolved from environment variables and command-line flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root directory of stored fingerprints
    pub data_dir: PathBuf,
    /// Root directory of result tables
    pub results_dir: PathBuf,
    /// Debug mode: verbose logging plus region preview output
    pub debug: bool,
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("VIDPRINT_DATA_DIR")
                .unwrap_or_else(|_| "histogram_data".to_string())
                .into(),
            results_dir: std::env::var("VIDPRINT_RESULTS_DIR")
                .unwrap_or_else(|_| "results".to_string())
                .into(),
            debug: false,
        }
    }

    /// Apply command-line overrides on top of the environment defaults.
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        results_dir: Option<PathBuf>,
        debug: bool,
    ) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = results_dir {
            self.results_dir = dir;
        }
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = AppConfig {
            data_dir: "histogram_data".into(),
            results_dir: "results".into(),
            debug: false,
        }
        .with_overrides(Some("fingerprints".into()), None, true);

        assert_eq!(config.data_dir, PathBuf::from("fingerprints"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert!(config.debug);
    }
}
