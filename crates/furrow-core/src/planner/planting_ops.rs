//! Planting operations for the Planner.

use super::Planner;
use crate::{
    edits::{self, PlantingEdit},
    error::Result,
    models::Planting,
    params::{AssignBed, MovePlanting, SetFeetNeeded},
};

impl Planner {
    /// Retrieves a planting by its ID.
    pub async fn planting(&self, id: &str) -> Result<Planting> {
        let id = id.to_string();
        self.read(move |plan| plan.planting(&id).cloned()).await
    }

    /// Places a planting on a bed and saves the change.
    pub async fn assign_bed(&self, params: &AssignBed) -> Result<PlantingEdit> {
        let params = params.clone();
        self.edit(true, move |plan| edits::assign_bed(plan, &params))
            .await
    }

    /// Moves a planting, or its whole sequence when it is an anchor.
    pub async fn move_planting(&self, params: &MovePlanting) -> Result<PlantingEdit> {
        let params = params.clone();
        self.edit(true, move |plan| edits::move_planting(plan, &params))
            .await
    }

    /// Changes a planting's footage requirement.
    pub async fn set_feet_needed(&self, params: &SetFeetNeeded) -> Result<PlantingEdit> {
        let params = params.clone();
        self.edit(true, move |plan| edits::set_feet_needed(plan, &params))
            .await
    }
}
