//! Whole-plan analysis: spans, lane stacking, overlaps and sequence health.
//!
//! A planting assigned to a bed occupies every bed of its span, so it
//! appears in each of those lanes. Multi-row plantings share a `group_id`;
//! a lane holds at most one entry per group.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::Serialize;

use crate::{
    dates::DateRange,
    error::{EntityKind, PlannerError, Result},
    models::{Plan, Planting, SequenceIssue},
    overlap::{find_overlap_pairs, OverlapPair},
    sequence::diagnose_members,
    span::{span_for_planting, BedSpan},
    stacking::stack_lane,
};

/// Spans of every assigned planting and the lanes they occupy.
#[derive(Debug, Clone, Default)]
pub struct Occupancy<'a> {
    /// Planting ID to its span
    pub spans: BTreeMap<String, BedSpan>,
    /// Bed name to the plantings occupying it
    pub lanes: BTreeMap<String, Vec<&'a Planting>>,
}

/// Resolves every assigned planting's span and fills the lanes.
pub fn occupancy(plan: &Plan) -> Occupancy<'_> {
    let mut result = Occupancy::default();
    for planting in &plan.plantings {
        let Some(span) = span_for_planting(plan, planting) else {
            continue;
        };
        for bed in span.beds() {
            let lane = result.lanes.entry(bed.to_string()).or_default();
            if !lane.iter().any(|p| p.group_id == planting.group_id) {
                lane.push(planting);
            }
        }
        result.spans.insert(planting.id.clone(), span);
    }
    result
}

/// One planting as drawn in a lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneEntry {
    pub planting_id: String,
    pub label: String,
    pub range: DateRange,
    pub row: usize,
    /// Shares at least one day with another group in this lane
    pub overlaps: bool,
}

/// A stacked lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneReport {
    pub bed: String,
    /// Entries ordered by start date, then ID
    pub entries: Vec<LaneEntry>,
    pub row_count: usize,
}

fn lane_report(bed: &str, plantings: &[&Planting], overlapping: &BTreeSet<String>) -> LaneReport {
    let layout = stack_lane(plantings);
    let mut ordered = plantings.to_vec();
    ordered.sort_by(|a, b| {
        a.field_start_date
            .cmp(&b.field_start_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    let entries = ordered
        .into_iter()
        .map(|p| LaneEntry {
            planting_id: p.id.clone(),
            label: p.label().to_string(),
            range: p.range(),
            row: layout.row_of(&p.id).unwrap_or_default(),
            overlaps: overlapping.contains(&p.id),
        })
        .collect();
    LaneReport {
        bed: bed.to_string(),
        entries,
        row_count: layout.row_count,
    }
}

/// Everything the timeline needs about a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAnalysis {
    pub spans: BTreeMap<String, BedSpan>,
    /// Plantings whose span ran out of row beds
    pub incomplete: Vec<String>,
    pub lanes: BTreeMap<String, LaneReport>,
    /// IDs of every planting in at least one overlap
    pub overlaps: BTreeSet<String>,
    pub overlap_pairs: Vec<OverlapPair>,
    /// Sequence ID to its structural issues; healthy sequences are omitted
    pub sequence_issues: BTreeMap<String, Vec<SequenceIssue>>,
}

impl PlanAnalysis {
    /// No overlaps, no incomplete spans and no broken sequences.
    pub fn is_clean(&self) -> bool {
        self.incomplete.is_empty() && self.overlaps.is_empty() && self.sequence_issues.is_empty()
    }
}

/// Analyzes a whole plan.
pub fn analyze(plan: &Plan) -> PlanAnalysis {
    let Occupancy { spans, lanes } = occupancy(plan);
    let overlap_pairs = find_overlap_pairs(&lanes);
    let overlaps: BTreeSet<String> = overlap_pairs
        .iter()
        .flat_map(|pair| [pair.first.clone(), pair.second.clone()])
        .collect();

    let lanes = lanes
        .iter()
        .map(|(bed, plantings)| (bed.clone(), lane_report(bed, plantings, &overlaps)))
        .collect();
    let incomplete = spans
        .iter()
        .filter(|(_, span)| !span.is_complete)
        .map(|(id, _)| id.clone())
        .collect();
    let sequence_issues = plan
        .sequences
        .iter()
        .filter_map(|s| {
            let issues = diagnose_members(&plan.sequence_members(&s.id));
            (!issues.is_empty()).then(|| (s.id.clone(), issues))
        })
        .collect();

    let analysis = PlanAnalysis {
        spans,
        incomplete,
        lanes,
        overlaps,
        overlap_pairs,
        sequence_issues,
    };
    debug!(
        "analyzed {} planting(s): {} lane(s), {} overlap pair(s), {} incomplete span(s)",
        plan.plantings.len(),
        analysis.lanes.len(),
        analysis.overlap_pairs.len(),
        analysis.incomplete.len()
    );
    analysis
}

/// The stacked lane of one bed.
///
/// A bed outside every resource group is only known through the plantings
/// on it.
pub fn lane(plan: &Plan, bed: &str) -> Result<LaneReport> {
    let Occupancy { lanes, .. } = occupancy(plan);
    let plantings = lanes.get(bed).cloned().unwrap_or_default();
    if plantings.is_empty() && plan.group_of_bed(bed).is_none() {
        return Err(PlannerError::not_found(EntityKind::Bed, bed));
    }

    let lane_map = BTreeMap::from([(bed, plantings)]);
    let overlapping = crate::overlap::find_overlaps(&lane_map);
    Ok(lane_report(bed, &lane_map[bed], &overlapping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{in_sequence, on_bed, plan, planting, sequence};

    #[test]
    fn test_span_fills_every_lane() {
        let mut wide = on_bed(planting("W", "2025-04-01", "2025-05-01"), "J2");
        wide.feet_needed = 50;
        let plan = plan(vec![wide], vec![]);
        let occupied = occupancy(&plan);
        let beds: Vec<&str> = occupied.lanes.keys().map(String::as_str).collect();
        assert_eq!(beds, vec!["J2", "J3", "J4"]);
        assert_eq!(occupied.spans["W"].feet_used(), 50);
    }

    #[test]
    fn test_group_rows_count_once_per_lane() {
        let mut first = on_bed(planting("G-1", "2025-04-01", "2025-05-01"), "J1");
        first.group_id = "G".into();
        first.feet_needed = 40;
        let mut second = on_bed(planting("G-2", "2025-04-01", "2025-05-01"), "J2");
        second.group_id = "G".into();
        second.feet_needed = 20;
        let plan = plan(vec![first, second], vec![]);

        let analysis = analyze(&plan);
        assert_eq!(analysis.lanes["J2"].entries.len(), 1);
        assert_eq!(analysis.lanes["J2"].entries[0].planting_id, "G-1");
        assert!(analysis.overlaps.is_empty());
    }

    #[test]
    fn test_analyze_reports_conflicts() {
        let mut long = on_bed(planting("L", "2025-04-01", "2025-05-01"), "J4");
        long.feet_needed = 60;
        let plan = plan(
            vec![
                on_bed(planting("A", "2025-04-01", "2025-04-30"), "A1"),
                on_bed(planting("B", "2025-04-30", "2025-05-30"), "A1"),
                on_bed(planting("C", "2025-06-01", "2025-06-30"), "A1"),
                long,
                in_sequence(planting("S-a", "2025-04-01", "2025-05-01"), "S1", 1),
            ],
            vec![sequence("S1", 7)],
        );
        let analysis = analyze(&plan);

        assert_eq!(
            analysis.overlaps.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(analysis.lanes["A1"].row_count, 2);
        let rows: Vec<usize> = analysis.lanes["A1"].entries.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![0, 1, 0]);
        assert_eq!(analysis.incomplete, vec!["L"]);
        assert_eq!(
            analysis.sequence_issues["S1"],
            vec![SequenceIssue::MissingAnchor]
        );
        assert!(!analysis.is_clean());
    }

    #[test]
    fn test_lane_lookup() {
        let plan = plan(
            vec![
                on_bed(planting("A", "2025-04-01", "2025-04-30"), "A1"),
                on_bed(planting("Z", "2025-04-01", "2025-04-30"), "Z9"),
            ],
            vec![],
        );
        assert_eq!(lane(&plan, "A1").unwrap().entries.len(), 1);
        assert!(lane(&plan, "A2").unwrap().entries.is_empty());
        assert_eq!(lane(&plan, "Z9").unwrap().entries.len(), 1);
        assert!(matches!(
            lane(&plan, "Q1"),
            Err(PlannerError::NotFound { .. })
        ));
    }
}
