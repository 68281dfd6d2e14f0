//! High-level async API over a plan snapshot file.
//!
//! The [`Planner`] is the consuming layer around the pure engine: it loads
//! the snapshot, runs an engine operation, applies the returned mutations
//! atomically and writes the snapshot back.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Planner     │    │     Engine      │    │      Store      │
//! │ (async, one     │───▶│ (pure functions │───▶│ (JSON snapshot, │
//! │  writer a time) │    │  over a Plan)   │    │  atomic write)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Planner`] instances
//! - [`plan_ops`]: Whole-plan queries and the repair sweep
//! - [`planting_ops`]: Bed placement, date moves and footage edits
//! - [`sequence_ops`]: Succession sequence operations
//!
//! File I/O runs on tokio's blocking pool. Edits hold a per-planner lock
//! from load to save, so two edits never interleave.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use furrow_core::{params::AssignBed, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_plan_path(Some("farm.json"))
//!     .build()
//!     .await?;
//!
//! let edit = planner
//!     .assign_bed(&AssignBed {
//!         planting_id: "P1".to_string(),
//!         bed: "J2".to_string(),
//!         allow_partial: false,
//!     })
//!     .await?;
//! println!("{edit}");
//!
//! let analysis = planner.analyze().await?;
//! println!("{analysis}");
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use log::debug;
use tokio::{sync::Mutex, task};

use crate::{
    display::Repairs,
    edits::PlantingEdit,
    error::{PlannerError, Result},
    models::Plan,
    mutations::PlanMutation,
    sequence::SequenceEdit,
    store,
};

pub mod builder;
pub mod plan_ops;
pub mod planting_ops;
pub mod sequence_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface over one plan snapshot file.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) plan_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

/// Engine results that carry mutations to write back.
pub(crate) trait Mutating {
    fn mutations(&self) -> Vec<PlanMutation>;
}

impl Mutating for SequenceEdit {
    fn mutations(&self) -> Vec<PlanMutation> {
        self.mutations.clone()
    }
}

impl Mutating for PlantingEdit {
    fn mutations(&self) -> Vec<PlanMutation> {
        self.mutations.clone()
    }
}

impl Mutating for Repairs {
    fn mutations(&self) -> Vec<PlanMutation> {
        self.to_mutations()
    }
}

fn join_error(e: task::JoinError) -> PlannerError {
    PlannerError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

impl Planner {
    /// Creates a planner over the given snapshot file.
    pub(crate) fn new(plan_path: PathBuf) -> Self {
        Self {
            plan_path,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the snapshot this planner reads and writes.
    pub fn plan_path(&self) -> &std::path::Path {
        &self.plan_path
    }

    /// Runs a read-only operation against a freshly loaded snapshot.
    pub(crate) async fn read<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Plan) -> Result<T> + Send + 'static,
    {
        let plan_path = self.plan_path.clone();
        task::spawn_blocking(move || {
            let plan = store::load_plan(&plan_path)?;
            op(&plan)
        })
        .await
        .map_err(join_error)?
    }

    /// Computes an edit and, when `apply` is set, writes its mutations back.
    ///
    /// The mutations are applied to the loaded snapshot as one batch; a
    /// failure leaves the file untouched.
    pub(crate) async fn edit<T, F>(&self, apply: bool, op: F) -> Result<T>
    where
        T: Mutating + Send + 'static,
        F: FnOnce(&Plan) -> Result<T> + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let plan_path = self.plan_path.clone();
        task::spawn_blocking(move || {
            let mut plan = store::load_plan(&plan_path)?;
            let edit = op(&plan)?;
            let mutations = edit.mutations();
            if apply && !mutations.is_empty() {
                plan.apply(&mutations)?;
                store::save_plan(&plan_path, &plan)?;
                debug!("wrote {} mutation(s) to {}", mutations.len(), plan_path.display());
            }
            Ok(edit)
        })
        .await
        .map_err(join_error)?
    }

    /// Replaces the snapshot with `plan`.
    pub async fn save_plan(&self, plan: Plan) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let plan_path = self.plan_path.clone();
        task::spawn_blocking(move || store::save_plan(&plan_path, &plan))
            .await
            .map_err(join_error)?
    }
}
