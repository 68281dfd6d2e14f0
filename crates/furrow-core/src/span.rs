//! Bed span resolution.
//!
//! A planting that needs more footage than its starting bed provides spills
//! into the following beds of the same row, left to right, until the
//! requirement is met or the row runs out. Allocation is greedy and never
//! crosses rows or groups: the grower picks the starting bed, the resolver
//! only reports the consequences.

use log::debug;
use serde::Serialize;

use crate::models::{Bed, BedSizing, Plan, Planting, ResourceGroup};

/// Footage taken from one bed of a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanSegment {
    pub bed: String,
    pub feet_used: u32,
    pub bed_capacity_ft: u32,
}

/// The beds one placement occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedSpan {
    pub start_bed: String,
    pub feet_needed: u32,
    /// Beds in row order, starting with `start_bed`
    pub segments: Vec<SpanSegment>,
    /// Whether the walked beds can hold the full requirement
    pub is_complete: bool,
    /// Total capacity of the beds walked
    pub feet_available: u32,
}

impl BedSpan {
    fn single(bed: &Bed, feet_needed: u32, feet_used: u32, is_complete: bool) -> Self {
        Self {
            start_bed: bed.name.clone(),
            feet_needed,
            segments: vec![SpanSegment {
                bed: bed.name.clone(),
                feet_used,
                bed_capacity_ft: bed.capacity_feet,
            }],
            is_complete,
            feet_available: bed.capacity_feet,
        }
    }

    /// Names of the occupied beds in order.
    pub fn beds(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.bed.as_str())
    }

    pub fn feet_used(&self) -> u32 {
        self.segments.iter().map(|s| s.feet_used).sum()
    }

    /// Footage that could not be placed.
    pub fn shortfall(&self) -> u32 {
        self.feet_needed.saturating_sub(self.feet_available)
    }
}

/// Computes which beds a placement of `feet_needed` starting at `start_bed`
/// occupies.
///
/// A zero requirement or an empty group list yields the starting bed alone.
/// A bed outside every group also yields itself alone, complete only when
/// the requirement fits its capacity. Running out of row beds is reported
/// through `is_complete`, never as an error.
pub fn resolve_span(
    feet_needed: u32,
    start_bed: &str,
    groups: &[ResourceGroup],
    sizing: &BedSizing,
) -> BedSpan {
    let start = Bed::parse(start_bed, sizing);

    if feet_needed == 0 || groups.is_empty() {
        return BedSpan::single(&start, feet_needed, start.capacity_feet, true);
    }

    let Some(group) = groups.iter().find(|g| g.contains(start_bed)) else {
        debug!("bed {start_bed} is not in any resource group; using it alone");
        return BedSpan::single(
            &start,
            feet_needed,
            feet_needed.min(start.capacity_feet),
            feet_needed <= start.capacity_feet,
        );
    };

    let row_beds = group.row_beds(&start.row, sizing);
    let first = row_beds
        .iter()
        .position(|b| b.name == start.name)
        .unwrap_or_default();

    let mut segments = Vec::new();
    let mut remaining = feet_needed;
    let mut feet_available = 0u32;
    for bed in &row_beds[first..] {
        if remaining == 0 {
            break;
        }
        let feet_used = remaining.min(bed.capacity_feet);
        segments.push(SpanSegment {
            bed: bed.name.clone(),
            feet_used,
            bed_capacity_ft: bed.capacity_feet,
        });
        remaining -= feet_used;
        feet_available += bed.capacity_feet;
    }

    let span = BedSpan {
        start_bed: start.name,
        feet_needed,
        segments,
        is_complete: feet_available >= feet_needed,
        feet_available,
    };
    debug!(
        "span from {} for {}ft covers {} bed(s), complete={}",
        span.start_bed,
        feet_needed,
        span.segments.len(),
        span.is_complete
    );
    span
}

/// Span of an assigned planting within `plan`, or `None` when unassigned.
pub fn span_for_planting(plan: &Plan, planting: &Planting) -> Option<BedSpan> {
    planting.resource.as_deref().map(|bed| {
        resolve_span(
            planting.feet_needed,
            bed,
            &plan.resource_groups,
            &plan.bed_sizing,
        )
    })
}
