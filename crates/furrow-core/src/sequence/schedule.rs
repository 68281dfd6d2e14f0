//! Slot dating with locked members acting as fixed anchors.

use jiff::civil::Date;

use crate::{
    dates::{self, DateRange},
    error::{PlannerError, Result},
    models::{Plan, Planting, SequenceMembership},
    mutations::{PlanMutation, PlantingChange},
};

/// Field start date of `slot` in a sequence anchored at `anchor`.
pub fn slot_date(anchor: Date, slot: u32, offset_days: u32) -> Result<Date> {
    dates::add_days(anchor, i64::from(slot) * i64::from(offset_days))
}

/// A member at its (possibly new) slot.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Placement<'a> {
    pub planting: &'a Planting,
    pub slot: u32,
}

/// A member at its slot with the dates it will have.
#[derive(Debug, Clone)]
pub(crate) struct Scheduled<'a> {
    pub planting: &'a Planting,
    pub slot: u32,
    pub range: DateRange,
}

/// Dates every placement from `anchor`, walking slots in order.
///
/// Unlocked members land on `base + (slot - base_slot) * offset_days`. Each
/// locked member keeps its own dates and becomes the base for the members
/// after it, until the next locked member takes over. Fails when the result
/// would not be strictly ascending by slot.
pub(crate) fn schedule<'a>(
    placements: &[Placement<'a>],
    anchor: Date,
    offset_days: u32,
) -> Result<Vec<Scheduled<'a>>> {
    let mut ordered = placements.to_vec();
    ordered.sort_by_key(|p| p.slot);

    let mut base_date = anchor;
    let mut base_slot = 0;
    let mut scheduled = Vec::with_capacity(ordered.len());
    for Placement { planting, slot } in ordered {
        let range = if planting.is_locked {
            base_date = planting.field_start_date;
            base_slot = slot;
            planting.range()
        } else {
            let start = slot_date(base_date, slot - base_slot, offset_days)?;
            let delta = dates::days_between(planting.field_start_date, start)?;
            planting.range().shifted(delta)?
        };
        scheduled.push(Scheduled {
            planting,
            slot,
            range,
        });
    }

    for pair in scheduled.windows(2) {
        let (earlier, later) = (&pair[0], &pair[1]);
        if later.range.start <= earlier.range.start {
            return Err(PlannerError::invalid_input("slot").with_reason(format!(
                "slot {} ({}) would start on {}, not after slot {} ({}) on {}",
                later.slot,
                later.planting.id,
                later.range.start,
                earlier.slot,
                earlier.planting.id,
                earlier.range.start
            )));
        }
    }

    Ok(scheduled)
}

/// Mutations bringing each member to its scheduled slot and dates.
///
/// A member whose dates change takes the other rows of its group along.
pub(crate) fn schedule_mutations(
    plan: &Plan,
    sequence_id: &str,
    scheduled: &[Scheduled<'_>],
) -> Vec<PlanMutation> {
    let mut mutations = Vec::new();
    for s in scheduled {
        let mut changes = Vec::new();
        if s.planting.slot() != Some(s.slot) {
            changes.push(PlantingChange::Sequence(Some(SequenceMembership {
                sequence_id: sequence_id.to_string(),
                slot: s.slot,
            })));
        }
        if s.range.start != s.planting.field_start_date {
            changes.push(PlantingChange::FieldStartDate(s.range.start));
        }
        if s.range.end != s.planting.end_date {
            changes.push(PlantingChange::EndDate(s.range.end));
        }
        if !changes.is_empty() {
            mutations.push(PlanMutation::UpdatePlanting {
                id: s.planting.id.clone(),
                changes,
            });
        }
        mutations.extend(group_redates(plan, s.planting, s.range));
    }
    mutations
}

/// Re-dates the other rows of `planting`'s group to `range`.
pub(crate) fn group_redates(plan: &Plan, planting: &Planting, range: DateRange) -> Vec<PlanMutation> {
    plan.group_rows(&planting.group_id)
        .into_iter()
        .filter(|row| row.id != planting.id && row.range() != range)
        .map(|row| PlanMutation::redate(row, range.start, range.end))
        .collect()
}
