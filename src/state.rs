//! Persisted notification state
//!
//! A tiny JSON record remembering which day was last notified and the
//! timestamp of that day's root message.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NotificationState {
    #[serde(default)]
    pub(crate) date: Option<String>,
    #[serde(default, rename = "thread_ts")]
    pub(crate) thread_id: Option<String>,
}

impl NotificationState {
    pub(crate) fn new(date: impl Into<String>, thread_id: Option<String>) -> Self {
        Self {
            date: Some(date.into()),
            thread_id: thread_id.filter(|ts| !ts.is_empty()),
        }
    }

    /// Thread id, treating an empty string the same as absent.
    pub(crate) fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref().filter(|ts| !ts.is_empty())
    }
}

/// JSON file holding a single `NotificationState`.
#[derive(Debug, Clone)]
pub(crate) struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty state; an unreadable or malformed one is an error.
    pub(crate) fn load(&self) -> Result<NotificationState, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(NotificationState::default());
            }
            Err(source) => {
                return Err(AppError::StateRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| AppError::StateParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the state file via a temporary sibling and a rename.
    pub(crate) fn save(&self, state: &NotificationState) -> Result<(), AppError> {
        let write_err = |source: std::io::Error| AppError::StateWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string(state).map_err(|e| write_err(e.into()))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
