use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_TYPING_INDICATOR_MS;
use crate::models::CurrencyFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Core settings, loadable from a camelCase JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    /// Conversation dataset, relative to `data_dir` unless absolute.
    /// The bundled sample is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_file: Option<PathBuf>,
    pub currency: CurrencyFormat,
    pub typing_indicator_ms: u64,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            fixture_file: None,
            currency: CurrencyFormat::default(),
            typing_indicator_ms: DEFAULT_TYPING_INDICATOR_MS,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn fixture_path(&self) -> Option<PathBuf> {
        self.fixture_file.as_ref().map(|file| {
            if file.is_absolute() {
                file.clone()
            } else {
                self.data_dir.join(file)
            }
        })
    }

    pub fn typing_indicator(&self) -> Duration {
        Duration::from_millis(self.typing_indicator_ms)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new("relist_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grouping;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_minimal() {
        let config: CoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.fixture_path(), None);
        assert_eq!(config.typing_indicator(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_config_full() {
        let json = r#"{
            "dataDir": "/srv/relist",
            "fixtureFile": "threads.json",
            "currency": {"symbol": "$", "grouping": "western"},
            "typingIndicatorMs": 250
        }"#;
        let config: CoreConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.fixture_path(),
            Some(PathBuf::from("/srv/relist/threads.json"))
        );
        assert_eq!(config.currency.grouping, Grouping::Western);
        assert_eq!(config.typing_indicator_ms, 250);
    }

    #[test]
    fn test_absolute_fixture_path_wins() {
        let mut config = CoreConfig::new("data");
        config.fixture_file = Some(PathBuf::from("/tmp/other.json"));
        assert_eq!(config.fixture_path(), Some(PathBuf::from("/tmp/other.json")));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            CoreConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(CoreConfig::load(&bad), Err(ConfigError::Parse { .. })));

        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{"typingIndicatorMs": 10}"#).unwrap();
        assert_eq!(CoreConfig::load(&good).unwrap().typing_indicator_ms, 10);
    }
}
