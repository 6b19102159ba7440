//! Runtime configuration for the demo binary and for building queues.

use std::fs;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Result};
use crate::core::queue::CircularQueue;

/// Configuration loaded from a JSON document. Missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Initial buffer length; `None` means the default capacity
    pub initial_capacity: Option<isize>,
    pub log_level: String,
    /// Where the demo appends its NDJSON journal, if anywhere
    pub journal_path: Option<String>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: None,
            log_level: "info".into(),
            journal_path: None,
        }
    }
}

impl QueueConfig {
    pub fn from_json_str(text: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build an empty queue, rejecting a negative configured capacity
    pub fn build_queue<T>(&self) -> Result<CircularQueue<T>> {
        match self.initial_capacity {
            Some(capacity) => CircularQueue::with_capacity(capacity),
            None => Ok(CircularQueue::new()),
        }
    }

    pub fn level_filter(&self) -> std::result::Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::QueueError;

    #[test]
    fn empty_document_uses_defaults() {
        let config = QueueConfig::from_json_str("{}").unwrap();
        assert_eq!(config, QueueConfig::default());
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(config.build_queue::<u8>().unwrap().capacity(), 4);
    }

    #[test]
    fn negative_capacity_is_rejected_when_building() {
        let config = QueueConfig::from_json_str(r#"{"initial_capacity": -1}"#).unwrap();
        assert!(matches!(
            config.build_queue::<u8>(),
            Err(QueueError::InvalidArgument(_))
        ));
    }

    #[test]
    fn bad_level_is_reported() {
        let config = QueueConfig::from_json_str(r#"{"log_level": "loud"}"#).unwrap();
        assert!(matches!(config.level_filter(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            QueueConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
