//! Sequence operations for the Planner.
//!
//! Each edit loads the snapshot, runs the matching [`crate::sequence`]
//! operation and saves the result. Corrupted sequences surface as
//! [`crate::PlannerError::CorruptedSequence`] and are left untouched.

use super::Planner;
use crate::{
    error::Result,
    params::{
        AddToSequence, CreateSequence, DeleteSequence, MoveAnchor, ReorderSlots, UpdateOffset,
    },
    sequence::{self, SequenceEdit, SequenceSummary},
};

impl Planner {
    /// Describes one sequence, including any structural issues.
    pub async fn show_sequence(&self, sequence_id: &str) -> Result<SequenceSummary> {
        let sequence_id = sequence_id.to_string();
        self.read(move |plan| sequence::summarize(plan, &sequence_id))
            .await
    }

    /// Describes every sequence of the plan.
    pub async fn list_sequences(&self) -> Result<Vec<SequenceSummary>> {
        self.read(|plan| {
            plan.sequences
                .iter()
                .map(|s| sequence::summarize(plan, &s.id))
                .collect()
        })
        .await
    }

    pub async fn create_sequence(&self, params: &CreateSequence) -> Result<SequenceEdit> {
        let params = params.clone();
        self.edit(true, move |plan| sequence::create_from_planting(plan, &params))
            .await
    }

    pub async fn update_offset(&self, params: &UpdateOffset) -> Result<SequenceEdit> {
        let params = params.clone();
        self.edit(true, move |plan| sequence::update_offset(plan, &params))
            .await
    }

    pub async fn move_anchor(&self, params: &MoveAnchor) -> Result<SequenceEdit> {
        let params = params.clone();
        self.edit(true, move |plan| sequence::move_anchor(plan, &params))
            .await
    }

    pub async fn reorder_slots(&self, params: &ReorderSlots) -> Result<SequenceEdit> {
        let params = params.clone();
        self.edit(true, move |plan| sequence::reorder_slots(plan, &params))
            .await
    }

    /// Removes one planting from its sequence.
    pub async fn unlink(&self, planting_id: &str) -> Result<SequenceEdit> {
        let planting_id = planting_id.to_string();
        self.edit(true, move |plan| sequence::unlink(plan, &planting_id))
            .await
    }

    /// Appends a new member after the highest slot.
    pub async fn add_slot(&self, sequence_id: &str) -> Result<SequenceEdit> {
        let sequence_id = sequence_id.to_string();
        self.edit(true, move |plan| sequence::add_slot(plan, &sequence_id))
            .await
    }

    /// Adds an existing planting to a sequence.
    pub async fn add_to_sequence(&self, params: &AddToSequence) -> Result<SequenceEdit> {
        let params = params.clone();
        self.edit(true, move |plan| sequence::add_planting(plan, &params))
            .await
    }

    pub async fn delete_sequence(&self, params: &DeleteSequence) -> Result<SequenceEdit> {
        let params = params.clone();
        self.edit(true, move |plan| sequence::delete_sequence(plan, &params))
            .await
    }
}
