//! Recovery for sequences with broken slot assignments.
//!
//! The repair policy keeps exactly one member per field start date and
//! renumbers the survivors `0..N` in date order. When several members share
//! a date the survivor is chosen by, in order:
//!
//! 1. having a bed assigned,
//! 2. the larger footage requirement,
//! 3. the lowest ID.
//!
//! This decides which historical data survives, so the ranking must not
//! change silently. Repair is the only component that deletes plantings, and
//! only through an explicit [`RepairPlan`] the caller applies.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use jiff::civil::Date;
use log::{debug, info};
use serde::Serialize;

use crate::{
    error::Result,
    models::{Plan, Planting, SequenceMembership},
    mutations::{PlanMutation, PlantingChange},
};

/// A surviving member moving to a new slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotReassignment {
    pub id: String,
    pub new_slot: u32,
}

/// Everything needed to bring one sequence back to a valid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairPlan {
    pub sequence_id: String,
    /// Survivors in date order; a survivor's index is its final slot
    pub keep: Vec<String>,
    /// Members losing to a better member on the same date
    pub delete: Vec<String>,
    /// Survivors whose slot changes
    pub slot_reassignments: Vec<SlotReassignment>,
    /// The sequence has no members left and its record should go
    pub remove_sequence: bool,
}

impl RepairPlan {
    /// True when the sequence is already valid.
    pub fn is_noop(&self) -> bool {
        self.delete.is_empty() && self.slot_reassignments.is_empty() && !self.remove_sequence
    }

    /// Deletions first, then slot updates.
    pub fn to_mutations(&self) -> Vec<PlanMutation> {
        let deletions = self
            .delete
            .iter()
            .map(|id| PlanMutation::DeletePlanting { id: id.clone() });
        let updates = self
            .slot_reassignments
            .iter()
            .map(|r| PlanMutation::UpdatePlanting {
                id: r.id.clone(),
                changes: vec![PlantingChange::Sequence(Some(SequenceMembership {
                    sequence_id: self.sequence_id.clone(),
                    slot: r.new_slot,
                }))],
            });

        let mut mutations: Vec<PlanMutation> = deletions.chain(updates).collect();
        if self.remove_sequence {
            mutations.push(PlanMutation::DeleteSequence {
                id: self.sequence_id.clone(),
            });
        }
        mutations
    }
}

/// Survivor ranking; `Less` means `a` is kept over `b`.
fn survivor_order(a: &Planting, b: &Planting) -> Ordering {
    b.has_bed()
        .cmp(&a.has_bed())
        .then_with(|| b.feet_needed.cmp(&a.feet_needed))
        .then_with(|| a.id.cmp(&b.id))
}

/// Computes the repair for one sequence from its members. Pure; the caller
/// applies the result.
pub fn repair(sequence_id: &str, members: &[&Planting]) -> RepairPlan {
    let mut by_date: BTreeMap<Date, Vec<&Planting>> = BTreeMap::new();
    for &member in members {
        by_date.entry(member.field_start_date).or_default().push(member);
    }

    let mut keep = Vec::with_capacity(by_date.len());
    let mut delete = Vec::new();
    let mut slot_reassignments = Vec::new();
    for (slot, (date, mut same_day)) in (0u32..).zip(by_date) {
        same_day.sort_by(|a, b| survivor_order(a, b));
        let survivor = same_day[0];
        for loser in &same_day[1..] {
            info!(
                "sequence {sequence_id}: deleting {} (slot {:?}); {} is kept for {date}",
                loser.id,
                loser.slot(),
                survivor.id
            );
            delete.push(loser.id.clone());
        }
        if survivor.slot() != Some(slot) {
            debug!(
                "sequence {sequence_id}: {} moves from slot {:?} to {slot}",
                survivor.id,
                survivor.slot()
            );
            slot_reassignments.push(SlotReassignment {
                id: survivor.id.clone(),
                new_slot: slot,
            });
        }
        keep.push(survivor.id.clone());
    }

    if members.is_empty() {
        info!("sequence {sequence_id} has no members; removing it");
    }
    RepairPlan {
        sequence_id: sequence_id.to_string(),
        keep,
        delete,
        slot_reassignments,
        remove_sequence: members.is_empty(),
    }
}

/// Repair for one sequence of a plan.
pub fn repair_sequence(plan: &Plan, sequence_id: &str) -> Result<RepairPlan> {
    plan.sequence(sequence_id)?;
    Ok(repair(sequence_id, &plan.sequence_members(sequence_id)))
}

/// Runs the repair over every sequence, returning only the ones that need
/// changes.
pub fn repair_plan(plan: &Plan) -> Vec<RepairPlan> {
    plan.sequences
        .iter()
        .map(|s| repair(&s.id, &plan.sequence_members(&s.id)))
        .filter(|r| !r.is_noop())
        .collect()
}
