//! Application state for the VR benefit engine API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::PipelineConfig;

/// Shared application state.
///
/// Holds the loaded configuration, the directory the source extracts are
/// read from and, optionally, the SQLite database results are published to.
#[derive(Clone)]
pub struct AppState {
    config: Arc<PipelineConfig>,
    source_dir: Arc<PathBuf>,
    store_path: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new<P: AsRef<Path>>(config: PipelineConfig, source_dir: P) -> Self {
        Self {
            config: Arc::new(config),
            source_dir: Arc::new(source_dir.as_ref().to_path_buf()),
            store_path: None,
        }
    }

    /// Sets the SQLite database that `publish` requests write to.
    pub fn with_store<P: AsRef<Path>>(mut self, store_path: P) -> Self {
        self.store_path = Some(Arc::new(store_path.as_ref().to_path_buf()));
        self
    }

    /// Returns the shared configuration handle.
    pub fn config_handle(&self) -> Arc<PipelineConfig> {
        Arc::clone(&self.config)
    }

    /// Returns the source extract directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the SQLite database path, if publishing is enabled.
    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref().map(PathBuf::as_path)
    }
}
