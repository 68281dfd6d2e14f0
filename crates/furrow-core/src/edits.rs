//! Single-planting edits: bed placement, date moves and footage changes.

use log::debug;
use serde::Serialize;

use crate::{
    dates,
    error::{PlannerError, Result},
    models::Plan,
    mutations::{PlanMutation, PlantingChange},
    params::{AssignBed, MoveAnchor, MovePlanting, SetFeetNeeded},
    sequence,
    span::{resolve_span, span_for_planting, BedSpan},
};

/// The outcome of a planting edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingEdit {
    pub planting_id: String,
    /// The planting's span after the edit; `None` when unassigned
    pub span: Option<BedSpan>,
    pub mutations: Vec<PlanMutation>,
}

/// Places a planting starting at `bed`.
///
/// A span that runs out of row beds fails with
/// [`PlannerError::IncompleteSpan`] unless `allow_partial` is set. When the
/// plan defines resource groups the bed must belong to one of them.
pub fn assign_bed(plan: &Plan, params: &AssignBed) -> Result<PlantingEdit> {
    let planting = plan.planting(&params.planting_id)?;
    if !plan.resource_groups.is_empty() {
        plan.bed(&params.bed)?;
    }

    let span = resolve_span(
        planting.feet_needed,
        &params.bed,
        &plan.resource_groups,
        &plan.bed_sizing,
    );
    if !span.is_complete && !params.allow_partial {
        return Err(PlannerError::IncompleteSpan {
            planting_id: planting.id.clone(),
            feet_needed: span.feet_needed,
            feet_available: span.feet_available,
        });
    }

    let mutations = if planting.resource.as_deref() == Some(params.bed.as_str()) {
        Vec::new()
    } else {
        vec![PlanMutation::UpdatePlanting {
            id: planting.id.clone(),
            changes: vec![PlantingChange::Resource(Some(params.bed.clone()))],
        }]
    };
    Ok(PlantingEdit {
        planting_id: planting.id.clone(),
        span: Some(span),
        mutations,
    })
}

/// Moves a planting to a new field start date, keeping its duration.
///
/// Every row sharing the planting's `group_id` moves with it. A sequence
/// anchor moves its whole sequence; other sequence members cannot be moved
/// on their own.
pub fn move_planting(plan: &Plan, params: &MovePlanting) -> Result<PlantingEdit> {
    let planting = plan.planting(&params.planting_id)?;
    let span = span_for_planting(plan, planting);

    if let Some(membership) = &planting.sequence {
        if membership.slot != 0 {
            return Err(PlannerError::invalid_input("plantingId").with_reason(format!(
                "planting '{}' is slot {} of sequence '{}'; move the anchor or reorder the sequence",
                planting.id, membership.slot, membership.sequence_id
            )));
        }
        let edit = sequence::move_anchor(
            plan,
            &MoveAnchor {
                sequence_id: membership.sequence_id.clone(),
                anchor_date: params.field_start_date,
            },
        )?;
        return Ok(PlantingEdit {
            planting_id: planting.id.clone(),
            span,
            mutations: edit.mutations,
        });
    }

    let delta = dates::days_between(planting.field_start_date, params.field_start_date)?;
    let mut mutations = Vec::new();
    if delta != 0 {
        for row in plan.group_rows(&planting.group_id) {
            let range = row.range().shifted(delta)?;
            mutations.push(PlanMutation::redate(row, range.start, range.end));
        }
    }
    debug!(
        "moving {} by {delta} day(s) touches {} row(s)",
        planting.id,
        mutations.len()
    );
    Ok(PlantingEdit {
        planting_id: planting.id.clone(),
        span,
        mutations,
    })
}

/// Changes a planting's footage requirement and reports the resulting span.
///
/// An incomplete span is reported, not refused.
pub fn set_feet_needed(plan: &Plan, params: &SetFeetNeeded) -> Result<PlantingEdit> {
    let planting = plan.planting(&params.planting_id)?;
    if params.feet_needed == 0 {
        return Err(PlannerError::invalid_input("feetNeeded")
            .with_reason("footage requirement must be positive"));
    }

    let span = planting.resource.as_deref().map(|bed| {
        resolve_span(
            params.feet_needed,
            bed,
            &plan.resource_groups,
            &plan.bed_sizing,
        )
    });
    let mutations = if planting.feet_needed == params.feet_needed {
        Vec::new()
    } else {
        vec![PlanMutation::UpdatePlanting {
            id: planting.id.clone(),
            changes: vec![PlantingChange::FeetNeeded(params.feet_needed)],
        }]
    };
    Ok(PlantingEdit {
        planting_id: planting.id.clone(),
        span,
        mutations,
    })
}
