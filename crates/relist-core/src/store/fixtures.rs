use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Conversation;

const BUNDLED_CONVERSATIONS: &str = include_str!("../../fixtures/conversations.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate thread id in dataset: {0}")]
    DuplicateThread(String),
}

/// Static, read-only conversation dataset the store is populated from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

impl Dataset {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self { conversations }
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.check_unique_ids()?;
        Ok(dataset)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&contents)?;
        tracing::debug!(
            path = %path.display(),
            threads = dataset.conversations.len(),
            "loaded conversation dataset"
        );
        Ok(dataset)
    }

    /// Sample dataset compiled into the crate.
    pub fn bundled() -> Result<Self, FixtureError> {
        Self::from_json(BUNDLED_CONVERSATIONS)
    }

    fn check_unique_ids(&self) -> Result<(), FixtureError> {
        let mut seen = HashSet::new();
        for thread in &self.conversations {
            if !seen.insert(thread.thread_id.as_str()) {
                return Err(FixtureError::DuplicateThread(thread.thread_id.clone()));
            }
        }
        Ok(())
    }
}
