//! Scheduling parameter settings, optionally backed by a JSON file.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use stepcards_core::{Parameters, ParameterSource, SchedulerError, StoreError};
use thiserror::Error;

use crate::services::storage::write_atomic;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read parameters: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed parameters file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SchedulerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Holds the parameters in effect and writes edits back to disk.
pub struct SettingsService {
    current: RwLock<Parameters>,
    path: Option<PathBuf>,
}

impl SettingsService {
    /// Settings held in memory only.
    pub fn in_memory(params: Parameters) -> Result<Self, SettingsError> {
        params
            .validate()
            .map_err(SchedulerError::InvalidParameters)?;
        Ok(Self {
            current: RwLock::new(params),
            path: None,
        })
    }

    /// Load parameters from `path`, or use the defaults if it does not exist.
    ///
    /// A file that fails to parse or validate is an error; it is never
    /// replaced with defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let params = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let params: Parameters = serde_json::from_str(&raw)?;
            params.validate().map_err(SchedulerError::InvalidParameters)?;
            tracing::info!("Loaded scheduling parameters from {}", path.display());
            params
        } else {
            tracing::info!(
                "Parameters file {} not found, using defaults",
                path.display()
            );
            Parameters::default()
        };

        Ok(Self {
            current: RwLock::new(params),
            path: Some(path),
        })
    }

    /// Replace the parameters after validating them.
    ///
    /// Invalid parameters are rejected as a whole and nothing changes.
    pub fn replace(&self, params: Parameters) -> Result<Parameters, SettingsError> {
        params.validate().map_err(SchedulerError::InvalidParameters)?;

        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(&params)?;
            write_atomic(path, &json)?;
        }
        *current = params.clone();

        tracing::info!(
            learning_steps = ?params.learning_steps,
            relearning_steps = ?params.relearning_steps,
            "Scheduling parameters updated"
        );
        Ok(params)
    }
}

impl ParameterSource for SettingsService {
    fn current(&self) -> Parameters {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
