//! Config store adapter (`config.json`).
//!
//! # Responsibility
//! - Persist the class/parallel taxonomy as pretty-printed JSON.
//!
//! # Invariants
//! - A missing file is not an error: defaults apply.
//! - `load_or_default` logs and falls back instead of failing.

use crate::model::config::LibraryConfig;
use crate::repo::paths::LibraryPaths;
use crate::repo::{read_if_present, write_atomic, RepoError, RepoResult};
use log::{error, info};
use std::path::PathBuf;

/// JSON-backed config store.
#[derive(Debug)]
pub struct ConfigRepository {
    path: PathBuf,
}

impl ConfigRepository {
    pub fn new(paths: &LibraryPaths) -> Self {
        Self {
            path: paths.config_path(),
        }
    }

    /// Loads the config; a missing file yields the defaults.
    ///
    /// # Errors
    /// - I/O failures other than absence, and malformed JSON.
    pub fn load(&self) -> RepoResult<LibraryConfig> {
        let Some(contents) = read_if_present(&self.path)? else {
            return Ok(LibraryConfig::default());
        };
        serde_json::from_str(&contents)
            .map_err(|err| RepoError::malformed(&self.path, err.to_string()))
    }

    /// Loads the config, substituting the defaults on any failure.
    pub fn load_or_default(&self) -> LibraryConfig {
        match self.load() {
            Ok(config) => config,
            Err(err) => {
                error!("event=config_load module=repo status=error error={err}");
                LibraryConfig::default()
            }
        }
    }

    /// Overwrites the config file atomically.
    pub fn save(&self, config: &LibraryConfig) -> RepoResult<()> {
        let body = serde_json::to_string_pretty(config)
            .map_err(|err| RepoError::malformed(&self.path, err.to_string()))?;
        match write_atomic(&self.path, &body) {
            Ok(()) => {
                info!(
                    "event=config_save module=repo status=ok classes={} parallels={}",
                    config.classes.len(),
                    config.parallels.len()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=config_save module=repo status=error error={err}");
                Err(err)
            }
        }
    }
}
