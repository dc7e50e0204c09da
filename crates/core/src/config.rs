//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables.

use crate::constants::{
    ASSESSMENTS_DIR_NAME, DEFAULT_DATA_DIR, DEFAULT_PORT, MASTER_CSV_FILENAME, REPORTS_DIR_NAME,
};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(data_dir: PathBuf) -> CoreResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput("data_dir cannot be empty".into()));
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn assessments_dir(&self) -> PathBuf {
        self.data_dir.join(ASSESSMENTS_DIR_NAME)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join(REPORTS_DIR_NAME)
    }

    pub fn master_csv_path(&self) -> PathBuf {
        self.data_dir.join(MASTER_CSV_FILENAME)
    }
}

/// Parse the listening port from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PORT`].
pub fn port_from_env_value(value: Option<String>) -> CoreResult<u16> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_PORT),
        Some(v) => v
            .parse::<u16>()
            .map_err(|e| CoreError::InvalidInput(format!("invalid port '{}': {}", v, e))),
    }
}

/// Resolve the data directory from an optional string value, defaulting to `data`.
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset_or_blank() {
        assert_eq!(port_from_env_value(None).unwrap(), 5000);
        assert_eq!(port_from_env_value(Some("  ".into())).unwrap(), 5000);
    }

    #[test]
    fn port_parses_container_value() {
        assert_eq!(port_from_env_value(Some("8080".into())).unwrap(), 8080);
    }

    #[test]
    fn port_rejects_garbage() {
        let err = port_from_env_value(Some("eighty".into())).expect_err("should fail");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("eighty")));
    }

    #[test]
    fn data_dir_defaults_to_relative_data() {
        assert_eq!(data_dir_from_env_value(None), PathBuf::from("data"));
        assert_eq!(
            data_dir_from_env_value(Some("/var/lib/rhc".into())),
            PathBuf::from("/var/lib/rhc")
        );
    }

    #[test]
    fn config_derives_storage_paths() {
        let cfg = CoreConfig::new(PathBuf::from("data")).unwrap();
        assert_eq!(cfg.assessments_dir(), PathBuf::from("data/assessments"));
        assert_eq!(cfg.reports_dir(), PathBuf::from("data/reports"));
        assert_eq!(cfg.master_csv_path(), PathBuf::from("data/all_assessments.csv"));
    }

    #[test]
    fn config_rejects_empty_data_dir() {
        assert!(CoreConfig::new(PathBuf::new()).is_err());
    }
}
