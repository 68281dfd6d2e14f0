//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Planner;
use crate::{
    error::{IoResultExt, PlannerError, Result},
    store,
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    plan_path: Option<PathBuf>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self { plan_path: None }
    }

    /// Sets a custom snapshot file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/furrow/plan.json` or `~/.local/share/furrow/plan.json`
    pub fn with_plan_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.plan_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured planner instance.
    ///
    /// An existing snapshot is loaded once so a malformed file is reported
    /// here rather than on the first operation.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::XdgDirectory` if no default path can be found
    /// Returns `PlannerError::FileSystem` if the snapshot directory cannot be created
    /// Returns `PlannerError::Serialization` or `PlannerError::InvalidInput`
    /// if an existing snapshot is malformed
    pub async fn build(self) -> Result<Planner> {
        let plan_path = match self.plan_path {
            Some(path) => path,
            None => Self::default_plan_path()?,
        };

        if let Some(parent) = plan_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).fs_context(parent)?;
        }

        let check_path = plan_path.clone();
        task::spawn_blocking(move || store::load_plan(&check_path).map(|_| ()))
            .await
            .map_err(|e| PlannerError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        Ok(Planner::new(plan_path))
    }

    /// Returns the default snapshot path following XDG Base Directory
    /// specification.
    fn default_plan_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("furrow")
            .place_data_file("plan.json")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
