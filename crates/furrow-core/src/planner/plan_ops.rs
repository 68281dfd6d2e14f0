//! Whole-plan operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    analysis::{self, LaneReport, PlanAnalysis},
    display::Repairs,
    error::Result,
    models::Plan,
    params::{Repair, SpanQuery},
    repair,
    span::{resolve_span, BedSpan},
};

impl Planner {
    /// Loads the current snapshot.
    pub async fn load(&self) -> Result<Plan> {
        self.read(|plan| Ok(plan.clone())).await
    }

    /// Spans, lanes, overlaps and sequence health of the whole plan.
    pub async fn analyze(&self) -> Result<PlanAnalysis> {
        self.read(|plan| Ok(analysis::analyze(plan))).await
    }

    /// Resolves a span without placing anything.
    pub async fn bed_span(&self, params: &SpanQuery) -> Result<BedSpan> {
        let params = params.clone();
        self.read(move |plan| {
            Ok(resolve_span(
                params.feet_needed,
                &params.bed,
                &plan.resource_groups,
                &plan.bed_sizing,
            ))
        })
        .await
    }

    /// The stacked lane of one bed.
    pub async fn lane(&self, bed: &str) -> Result<LaneReport> {
        let bed = bed.to_string();
        self.read(move |plan| analysis::lane(plan, &bed)).await
    }

    /// Computes the repair for one sequence or all of them, writing it back
    /// only when `apply` is set.
    pub async fn repair(&self, params: &Repair) -> Result<Repairs> {
        let params = params.clone();
        self.edit(params.apply, move |plan| {
            let repairs = match &params.sequence_id {
                Some(id) => {
                    let repair = repair::repair_sequence(plan, id)?;
                    if repair.is_noop() {
                        Vec::new()
                    } else {
                        vec![repair]
                    }
                }
                None => repair::repair_plan(plan),
            };
            if params.apply {
                let deleted: usize = repairs.iter().map(|r| r.delete.len()).sum();
                info!(
                    "applying repair to {} sequence(s), deleting {deleted} planting(s)",
                    repairs.len()
                );
            }
            Ok(Repairs(repairs))
        })
        .await
    }
}
