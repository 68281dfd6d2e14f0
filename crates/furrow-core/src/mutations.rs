//! Field-level plan mutations.
//!
//! Engine operations never modify a plan; they return a list of
//! [`PlanMutation`]s for the storage layer to apply. [`Plan::apply`] is the
//! in-memory reference application used by the CLI and by tests.

use jiff::civil::Date;
use serde::Serialize;

use crate::{
    error::{EntityKind, PlannerError, Result},
    models::{Plan, Planting, Sequence, SequenceMembership},
};

/// A single field change on a planting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum PlantingChange {
    FieldStartDate(Date),
    EndDate(Date),
    Resource(Option<String>),
    FeetNeeded(u32),
    /// Set or clear sequence membership
    Sequence(Option<SequenceMembership>),
}

/// A change to a plan snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PlanMutation {
    CreatePlanting {
        planting: Planting,
    },
    DeletePlanting {
        id: String,
    },
    UpdatePlanting {
        id: String,
        changes: Vec<PlantingChange>,
    },
    CreateSequence {
        sequence: Sequence,
    },
    UpdateSequenceOffset {
        id: String,
        offset_days: u32,
    },
    DeleteSequence {
        id: String,
    },
}

impl PlanMutation {
    /// Shorthand for a date move that keeps the planting's duration.
    pub(crate) fn redate(planting: &Planting, start: Date, end: Date) -> Self {
        PlanMutation::UpdatePlanting {
            id: planting.id.clone(),
            changes: vec![
                PlantingChange::FieldStartDate(start),
                PlantingChange::EndDate(end),
            ],
        }
    }
}

impl PlantingChange {
    fn apply_to(&self, planting: &mut Planting) {
        match self {
            PlantingChange::FieldStartDate(date) => planting.field_start_date = *date,
            PlantingChange::EndDate(date) => planting.end_date = *date,
            PlantingChange::Resource(bed) => planting.resource = bed.clone(),
            PlantingChange::FeetNeeded(feet) => planting.feet_needed = *feet,
            PlantingChange::Sequence(membership) => planting.sequence = membership.clone(),
        }
    }
}

impl Plan {
    /// Applies a batch of mutations atomically.
    ///
    /// The batch is applied to a copy and the result re-validated; on any
    /// error the plan is left exactly as it was.
    pub fn apply(&mut self, mutations: &[PlanMutation]) -> Result<()> {
        let mut next = self.clone();
        for mutation in mutations {
            next.apply_one(mutation)?;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply_one(&mut self, mutation: &PlanMutation) -> Result<()> {
        match mutation {
            PlanMutation::CreatePlanting { planting } => {
                if self.find_planting(&planting.id).is_some() {
                    return Err(PlannerError::invalid_input("id")
                        .with_reason(format!("planting '{}' already exists", planting.id)));
                }
                self.plantings.push(planting.clone());
            }
            PlanMutation::DeletePlanting { id } => {
                let index = self.planting_index(id)?;
                self.plantings.remove(index);
            }
            PlanMutation::UpdatePlanting { id, changes } => {
                let index = self.planting_index(id)?;
                for change in changes {
                    change.apply_to(&mut self.plantings[index]);
                }
            }
            PlanMutation::CreateSequence { sequence } => {
                if self.sequence(&sequence.id).is_ok() {
                    return Err(PlannerError::invalid_input("id")
                        .with_reason(format!("sequence '{}' already exists", sequence.id)));
                }
                self.sequences.push(sequence.clone());
            }
            PlanMutation::UpdateSequenceOffset { id, offset_days } => {
                let sequence = self
                    .sequences
                    .iter_mut()
                    .find(|s| &s.id == id)
                    .ok_or_else(|| PlannerError::not_found(EntityKind::Sequence, id.as_str()))?;
                sequence.offset_days = *offset_days;
            }
            PlanMutation::DeleteSequence { id } => {
                self.sequence(id)?;
                self.sequences.retain(|s| &s.id != id);
            }
        }
        Ok(())
    }

    fn planting_index(&self, id: &str) -> Result<usize> {
        self.plantings
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PlannerError::not_found(EntityKind::Planting, id))
    }
}
