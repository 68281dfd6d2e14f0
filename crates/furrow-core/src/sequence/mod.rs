//! Succession sequence operations.
//!
//! A sequence's members hold slots `0..N`; slot 0 is the anchor and every
//! other slot is dated `anchor + slot * offset_days`. Locked members (those
//! with recorded actual dates) never move: they become the base for the
//! members after them.
//!
//! Every operation reads a [`Plan`] snapshot and returns a [`SequenceEdit`]
//! holding the mutations to apply. Operations refuse to touch a sequence
//! whose slots are structurally broken and point the caller at
//! [`crate::repair`] instead.
//!
//! # Examples
//!
//! ```rust
//! use furrow_core::{models::{BedAssignment, Plan}, params::CreateSequence, sequence};
//!
//! let mut plan: Plan = serde_json::from_str(r#"{
//!     "plantings": [{ "id": "P1", "configId": "radish", "resource": "A1",
//!                     "fieldStartDate": "2025-04-01", "endDate": "2025-05-01" }],
//!     "resourceGroups": [{ "id": "a", "name": "Row A", "beds": ["A1", "A2"] }]
//! }"#).unwrap();
//!
//! let edit = sequence::create_from_planting(&plan, &CreateSequence {
//!     planting_id: "P1".to_string(),
//!     count: 3,
//!     offset_days: 14,
//!     bed_assignment: BedAssignment::Same,
//!     name: None,
//! }).unwrap();
//! plan.apply(&edit.mutations).unwrap();
//!
//! let dates: Vec<String> = plan
//!     .sequence_members(&edit.sequence_id)
//!     .iter()
//!     .map(|p| p.field_start_date.to_string())
//!     .collect();
//! assert_eq!(dates, ["2025-04-01", "2025-04-15", "2025-04-29"]);
//! ```

use std::collections::{BTreeMap, BTreeSet, HashSet};

use jiff::civil::Date;
use log::{debug, warn};
use serde::Serialize;

use crate::{
    dates::{self, DateRange},
    error::{PlannerError, Result},
    models::{BedAssignment, Plan, Planting, Sequence, SequenceIssue, SequenceMembership},
    mutations::{PlanMutation, PlantingChange},
    params::{
        AddToSequence, CreateSequence, DeleteMode, DeleteSequence, MoveAnchor, ReorderSlots,
        UpdateOffset,
    },
};

mod schedule;


pub use schedule::slot_date;
use schedule::{group_redates, schedule, schedule_mutations, Placement};

/// The outcome of a sequence operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceEdit {
    pub sequence_id: String,
    /// IDs of plantings the edit creates
    pub created: Vec<String>,
    pub mutations: Vec<PlanMutation>,
}

/// Structural problems of a sequence's current slot assignment.
///
/// Gaps left by unlinking a member are not problems.
pub fn diagnose(plan: &Plan, sequence_id: &str) -> Result<Vec<SequenceIssue>> {
    plan.sequence(sequence_id)?;
    Ok(diagnose_members(&plan.sequence_members(sequence_id)))
}

/// Structural problems of a set of members.
pub fn diagnose_members(members: &[&Planting]) -> Vec<SequenceIssue> {
    let mut by_slot: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    let mut by_date: BTreeMap<Date, Vec<String>> = BTreeMap::new();
    for member in members {
        if let Some(slot) = member.slot() {
            by_slot.entry(slot).or_default().push(member.id.clone());
        }
        by_date
            .entry(member.field_start_date)
            .or_default()
            .push(member.id.clone());
    }

    let mut issues = Vec::new();
    if !by_slot.contains_key(&0) {
        issues.push(SequenceIssue::MissingAnchor);
    }
    for (slot, planting_ids) in by_slot {
        if planting_ids.len() > 1 {
            issues.push(SequenceIssue::DuplicateSlot { slot, planting_ids });
        }
    }
    for (date, planting_ids) in by_date {
        if planting_ids.len() > 1 {
            issues.push(SequenceIssue::DuplicateDate { date, planting_ids });
        }
    }

    let mut ordered = members.to_vec();
    ordered.sort_by(|a, b| a.slot().cmp(&b.slot()).then_with(|| a.id.cmp(&b.id)));
    let mut latest: Option<Date> = None;
    for member in ordered {
        if latest.is_some_and(|l| member.field_start_date < l) {
            issues.push(SequenceIssue::OutOfDateOrder {
                planting_id: member.id.clone(),
                slot: member.slot().unwrap_or_default(),
            });
        }
        latest = latest.max(Some(member.field_start_date));
    }

    issues
}

/// A sequence and its members, refusing corrupted sequences.
fn checked_members<'a>(plan: &'a Plan, sequence_id: &str) -> Result<(&'a Sequence, Vec<&'a Planting>)> {
    let sequence = plan.sequence(sequence_id)?;
    let members = plan.sequence_members(sequence_id);
    let issues = diagnose_members(&members);
    if !issues.is_empty() {
        warn!(
            "refusing to edit sequence {sequence_id}: {} structural issue(s)",
            issues.len()
        );
        return Err(PlannerError::CorruptedSequence {
            sequence_id: sequence_id.to_string(),
            issues,
        });
    }
    Ok((sequence, members))
}

fn slot_of(member: &Planting) -> u32 {
    member.slot().unwrap_or_default()
}

fn positive_offset(offset_days: u32) -> Result<()> {
    if offset_days == 0 {
        return Err(PlannerError::invalid_input("offsetDays")
            .with_reason("offset between slots must be at least one day"));
    }
    Ok(())
}

fn unsequenced<'a>(plan: &'a Plan, planting_id: &str) -> Result<&'a Planting> {
    let planting = plan.planting(planting_id)?;
    if let Some(existing) = planting.sequence_id() {
        return Err(PlannerError::invalid_input("plantingId").with_reason(format!(
            "planting '{planting_id}' already belongs to sequence '{existing}'"
        )));
    }
    Ok(planting)
}

/// First `S<n>` not used by the plan.
fn next_sequence_id(plan: &Plan) -> String {
    let mut n = plan.sequences.len() + 1;
    loop {
        let candidate = format!("S{n}");
        if plan.sequence(&candidate).is_err() {
            return candidate;
        }
        n += 1;
    }
}

/// `base`, or `base-2`, `base-3`, … when taken.
fn fresh_planting_id(plan: &Plan, taken: &mut HashSet<String>, base: &str) -> String {
    let mut candidate = base.to_string();
    let mut n = 2;
    while plan.find_planting(&candidate).is_some() || taken.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

/// A new member copied from `template`, moved to `range`.
fn new_member(
    template: &Planting,
    id: String,
    range: DateRange,
    resource: Option<String>,
    membership: SequenceMembership,
) -> Planting {
    Planting {
        group_id: id.clone(),
        id,
        config_id: template.config_id.clone(),
        crop: template.crop.clone(),
        field_start_date: range.start,
        end_date: range.end,
        resource,
        feet_needed: template.feet_needed,
        sequence: Some(membership),
        is_locked: false,
    }
}

/// Makes a planting slot 0 of a new sequence and creates `count - 1`
/// followers dated `anchor + slot * offset_days`.
pub fn create_from_planting(plan: &Plan, params: &CreateSequence) -> Result<SequenceEdit> {
    let anchor = unsequenced(plan, &params.planting_id)?;
    positive_offset(params.offset_days)?;
    if params.count == 0 {
        return Err(PlannerError::invalid_input("count")
            .with_reason("a sequence needs at least one member"));
    }

    let sequence = Sequence {
        id: next_sequence_id(plan),
        name: params.name.clone(),
        offset_days: params.offset_days,
    };
    let membership = |slot| SequenceMembership {
        sequence_id: sequence.id.clone(),
        slot,
    };

    let mut mutations = vec![
        PlanMutation::CreateSequence {
            sequence: sequence.clone(),
        },
        PlanMutation::UpdatePlanting {
            id: anchor.id.clone(),
            changes: vec![PlantingChange::Sequence(Some(membership(0)))],
        },
    ];

    let resource = match params.bed_assignment {
        BedAssignment::Same => anchor.resource.clone(),
        BedAssignment::Unassigned => None,
    };
    let mut taken = HashSet::new();
    let mut created = Vec::new();
    for slot in 1..params.count {
        let start = slot_date(anchor.field_start_date, slot, params.offset_days)?;
        let range = anchor
            .range()
            .shifted(dates::days_between(anchor.field_start_date, start)?)?;
        let id = fresh_planting_id(plan, &mut taken, &format!("{}-s{slot}", anchor.id));
        created.push(id.clone());
        mutations.push(PlanMutation::CreatePlanting {
            planting: new_member(anchor, id, range, resource.clone(), membership(slot)),
        });
    }

    debug!(
        "created sequence {} from {} with {} member(s) every {} day(s)",
        sequence.id, anchor.id, params.count, params.offset_days
    );
    Ok(SequenceEdit {
        sequence_id: sequence.id,
        created,
        mutations,
    })
}

/// Changes the spacing and re-dates every unlocked member.
pub fn update_offset(plan: &Plan, params: &UpdateOffset) -> Result<SequenceEdit> {
    positive_offset(params.offset_days)?;
    let (_, members) = checked_members(plan, &params.sequence_id)?;
    let anchor_date = members[0].field_start_date;

    let placements: Vec<Placement> = members
        .iter()
        .map(|&planting| Placement {
            planting,
            slot: slot_of(planting),
        })
        .collect();
    let scheduled = schedule(&placements, anchor_date, params.offset_days)?;

    let mut mutations = vec![PlanMutation::UpdateSequenceOffset {
        id: params.sequence_id.clone(),
        offset_days: params.offset_days,
    }];
    mutations.extend(schedule_mutations(plan, &params.sequence_id, &scheduled));
    Ok(SequenceEdit {
        sequence_id: params.sequence_id.clone(),
        created: Vec::new(),
        mutations,
    })
}

/// Moves slot 0 to a new date; unlocked followers move with it.
pub fn move_anchor(plan: &Plan, params: &MoveAnchor) -> Result<SequenceEdit> {
    let (sequence, members) = checked_members(plan, &params.sequence_id)?;
    let anchor = members[0];
    if anchor.is_locked {
        return Err(PlannerError::invalid_input("anchorDate").with_reason(format!(
            "anchor '{}' has actual dates recorded and cannot move",
            anchor.id
        )));
    }

    let placements: Vec<Placement> = members
        .iter()
        .map(|&planting| Placement {
            planting,
            slot: slot_of(planting),
        })
        .collect();
    let scheduled = schedule(&placements, params.anchor_date, sequence.offset_days)?;
    Ok(SequenceEdit {
        sequence_id: params.sequence_id.clone(),
        created: Vec::new(),
        mutations: schedule_mutations(plan, &params.sequence_id, &scheduled),
    })
}

/// Applies an explicit slot permutation and re-dates unlocked members to
/// match their new slots.
///
/// The permutation must name every member once and use exactly the slots
/// `0..N`; anything else is rejected before any mutation is produced.
pub fn reorder_slots(plan: &Plan, params: &ReorderSlots) -> Result<SequenceEdit> {
    let (sequence, members) = checked_members(plan, &params.sequence_id)?;
    let anchor_date = members[0].field_start_date;

    let by_id: BTreeMap<&str, &Planting> = members.iter().map(|p| (p.id.as_str(), *p)).collect();
    let mut seen_ids = BTreeSet::new();
    let mut seen_slots = BTreeSet::new();
    let mut placements = Vec::with_capacity(params.assignments.len());
    for assignment in &params.assignments {
        let planting = *by_id.get(assignment.planting_id.as_str()).ok_or_else(|| {
            PlannerError::invalid_input("assignments").with_reason(format!(
                "planting '{}' is not a member of sequence '{}'",
                assignment.planting_id, params.sequence_id
            ))
        })?;
        if !seen_ids.insert(assignment.planting_id.as_str()) {
            return Err(PlannerError::invalid_input("assignments").with_reason(format!(
                "planting '{}' is assigned twice",
                assignment.planting_id
            )));
        }
        if !seen_slots.insert(assignment.slot) {
            return Err(PlannerError::invalid_input("assignments")
                .with_reason(format!("slot {} is assigned twice", assignment.slot)));
        }
        placements.push(Placement {
            planting,
            slot: assignment.slot,
        });
    }

    if seen_ids.len() != members.len() {
        return Err(PlannerError::invalid_input("assignments").with_reason(format!(
            "{} of {} members assigned",
            seen_ids.len(),
            members.len()
        )));
    }
    let expected: BTreeSet<u32> = (0..members.len() as u32).collect();
    if seen_slots != expected {
        return Err(PlannerError::invalid_input("assignments").with_reason(format!(
            "slots must be exactly 0..{}",
            members.len()
        )));
    }

    let scheduled = schedule(&placements, anchor_date, sequence.offset_days)?;
    Ok(SequenceEdit {
        sequence_id: params.sequence_id.clone(),
        created: Vec::new(),
        mutations: schedule_mutations(plan, &params.sequence_id, &scheduled),
    })
}

/// Removes one planting from its sequence; it keeps its current dates.
///
/// Remaining members keep their slots, gaps included. Unlinking the anchor
/// is the one exception to plain unlinking: every remaining slot shifts down
/// so the earliest remaining member becomes slot 0 and the sequence keeps an
/// anchor. Unlinking the last member deletes the sequence.
pub fn unlink(plan: &Plan, planting_id: &str) -> Result<SequenceEdit> {
    let planting = plan.planting(planting_id)?;
    let sequence_id = planting.sequence_id().ok_or_else(|| {
        PlannerError::invalid_input("plantingId")
            .with_reason(format!("planting '{planting_id}' is not in a sequence"))
    })?;
    let (_, members) = checked_members(plan, sequence_id)?;

    let mut mutations = vec![PlanMutation::UpdatePlanting {
        id: planting.id.clone(),
        changes: vec![PlantingChange::Sequence(None)],
    }];
    let remaining: Vec<&Planting> = members
        .into_iter()
        .filter(|m| m.id != planting.id)
        .collect();

    if remaining.is_empty() {
        mutations.push(PlanMutation::DeleteSequence {
            id: sequence_id.to_string(),
        });
    } else if slot_of(planting) == 0 {
        let base = slot_of(remaining[0]);
        for member in &remaining {
            mutations.push(PlanMutation::UpdatePlanting {
                id: member.id.clone(),
                changes: vec![PlantingChange::Sequence(Some(SequenceMembership {
                    sequence_id: sequence_id.to_string(),
                    slot: slot_of(member) - base,
                }))],
            });
        }
    }

    Ok(SequenceEdit {
        sequence_id: sequence_id.to_string(),
        created: Vec::new(),
        mutations,
    })
}

/// Appends a new member one offset after the highest slot.
///
/// The new planting copies crop, footage, duration and bed from the member
/// in the highest slot.
pub fn add_slot(plan: &Plan, sequence_id: &str) -> Result<SequenceEdit> {
    let (sequence, members) = checked_members(plan, sequence_id)?;
    let (last, anchor) = match (members.last(), members.first()) {
        (Some(last), Some(anchor)) => (*last, *anchor),
        _ => return Err(PlannerError::invalid_input("sequenceId").with_reason("empty sequence")),
    };

    let slot = slot_of(last) + 1;
    let range = last.range().shifted(i64::from(sequence.offset_days))?;
    let mut taken = HashSet::new();
    let id = fresh_planting_id(plan, &mut taken, &format!("{}-s{slot}", anchor.id));
    let planting = new_member(
        last,
        id.clone(),
        range,
        last.resource.clone(),
        SequenceMembership {
            sequence_id: sequence_id.to_string(),
            slot,
        },
    );

    Ok(SequenceEdit {
        sequence_id: sequence_id.to_string(),
        created: vec![id],
        mutations: vec![PlanMutation::CreatePlanting { planting }],
    })
}

/// Adds an existing standalone planting after the highest slot.
///
/// An unlocked planting is re-dated one offset after the current last
/// member, keeping its duration; a locked one keeps its dates and must start
/// after the current last member.
pub fn add_planting(plan: &Plan, params: &AddToSequence) -> Result<SequenceEdit> {
    let planting = unsequenced(plan, &params.planting_id)?;
    let (sequence, members) = checked_members(plan, &params.sequence_id)?;
    let Some(last) = members.last() else {
        return Err(PlannerError::invalid_input("sequenceId").with_reason("empty sequence"));
    };

    let slot = slot_of(last) + 1;
    let mut changes = vec![PlantingChange::Sequence(Some(SequenceMembership {
        sequence_id: params.sequence_id.clone(),
        slot,
    }))];
    let mut sibling_rows = Vec::new();
    if planting.is_locked {
        if planting.field_start_date <= last.field_start_date {
            return Err(PlannerError::invalid_input("plantingId").with_reason(format!(
                "locked planting '{}' starts {} which is not after the last member on {}",
                planting.id, planting.field_start_date, last.field_start_date
            )));
        }
    } else {
        let start = dates::add_days(last.field_start_date, i64::from(sequence.offset_days))?;
        let range = planting
            .range()
            .shifted(dates::days_between(planting.field_start_date, start)?)?;
        if range.start != planting.field_start_date {
            changes.push(PlantingChange::FieldStartDate(range.start));
            changes.push(PlantingChange::EndDate(range.end));
            sibling_rows = group_redates(plan, planting, range);
        }
    }

    let mut mutations = vec![PlanMutation::UpdatePlanting {
        id: planting.id.clone(),
        changes,
    }];
    mutations.extend(sibling_rows);
    Ok(SequenceEdit {
        sequence_id: params.sequence_id.clone(),
        created: Vec::new(),
        mutations,
    })
}

/// Deletes a sequence, unlinking or deleting its members.
///
/// This is an explicit grower action, so it works on corrupted sequences too.
pub fn delete_sequence(plan: &Plan, params: &DeleteSequence) -> Result<SequenceEdit> {
    plan.sequence(&params.sequence_id)?;
    let mut mutations: Vec<PlanMutation> = plan
        .sequence_members(&params.sequence_id)
        .into_iter()
        .map(|member| match params.mode {
            DeleteMode::Unlink => PlanMutation::UpdatePlanting {
                id: member.id.clone(),
                changes: vec![PlantingChange::Sequence(None)],
            },
            DeleteMode::DeletePlantings => PlanMutation::DeletePlanting {
                id: member.id.clone(),
            },
        })
        .collect();
    mutations.push(PlanMutation::DeleteSequence {
        id: params.sequence_id.clone(),
    });
    Ok(SequenceEdit {
        sequence_id: params.sequence_id.clone(),
        created: Vec::new(),
        mutations,
    })
}

/// A read-only view of a sequence for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceSummary {
    pub sequence: Sequence,
    pub anchor_date: Option<Date>,
    pub members: Vec<Planting>,
    pub issues: Vec<SequenceIssue>,
}

/// Describes a sequence, corrupted or not.
pub fn summarize(plan: &Plan, sequence_id: &str) -> Result<SequenceSummary> {
    let sequence = plan.sequence(sequence_id)?.clone();
    let members = plan.sequence_members(sequence_id);
    let issues = diagnose_members(&members);
    let anchor_date = members
        .iter()
        .find(|m| m.slot() == Some(0))
        .map(|m| m.field_start_date);
    Ok(SequenceSummary {
        sequence,
        anchor_date,
        members: members.into_iter().cloned().collect(),
        issues,
    })
}
