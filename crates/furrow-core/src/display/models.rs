//! Display implementations for models and engine results.
//!
//! All output is markdown for the terminal renderer.

use std::fmt;

use super::{collections::Mutations, dates::Season};
use crate::{
    analysis::{LaneReport, PlanAnalysis},
    edits::PlantingEdit,
    models::{Planting, Sequence},
    mutations::{PlanMutation, PlantingChange},
    repair::RepairPlan,
    sequence::{SequenceEdit, SequenceSummary},
    span::BedSpan,
};

impl fmt::Display for Planting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.id, self.label())?;
        writeln!(f)?;
        writeln!(f, "- Dates: {}", Season(&self.range()))?;
        match &self.resource {
            Some(bed) => writeln!(f, "- Bed: {bed}, {}ft needed", self.feet_needed)?,
            None => writeln!(f, "- Bed: unassigned, {}ft needed", self.feet_needed)?,
        }
        if let Some(membership) = &self.sequence {
            writeln!(
                f,
                "- Sequence: {} slot {}",
                membership.sequence_id, membership.slot
            )?;
        }
        if self.group_id != self.id {
            writeln!(f, "- Group: {}", self.group_id)?;
        }
        if self.is_locked {
            writeln!(f, "- Locked: actual dates recorded")?;
        }
        Ok(())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({name}) every {} days", self.id, self.offset_days),
            None => write!(f, "{} every {} days", self.id, self.offset_days),
        }
    }
}

impl fmt::Display for BedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span from **{}** for {}ft: ", self.start_bed, self.feet_needed)?;
        if self.is_complete {
            writeln!(f, "complete across {} bed(s)", self.segments.len())?;
        } else {
            writeln!(
                f,
                "**incomplete**, {}ft available ({}ft short)",
                self.feet_available,
                self.shortfall()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "| Bed | Used | Capacity |")?;
        writeln!(f, "|:-|-:|-:|")?;
        for segment in &self.segments {
            writeln!(
                f,
                "| {} | {}ft | {}ft |",
                segment.bed, segment.feet_used, segment.bed_capacity_ft
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for LaneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Lane {} ({} row(s))", self.bed, self.row_count)?;
        writeln!(f)?;
        if self.entries.is_empty() {
            return writeln!(f, "No plantings on this bed.");
        }
        writeln!(f, "| Row | Planting | Dates | Overlap |")?;
        writeln!(f, "|-:|:-|:-|:-:|")?;
        for entry in &self.entries {
            writeln!(
                f,
                "| {} | {} ({}) | {} | {} |",
                entry.row,
                entry.planting_id,
                entry.label,
                Season(&entry.range),
                if entry.overlaps { "⚠" } else { "" }
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SequenceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Sequence {}", self.sequence)?;
        writeln!(f)?;
        match self.anchor_date {
            Some(date) => writeln!(f, "- Anchor: {date}")?,
            None => writeln!(f, "- Anchor: missing")?,
        }
        writeln!(f, "- Members: {}", self.members.len())?;
        writeln!(f)?;

        if !self.members.is_empty() {
            writeln!(f, "| Slot | Planting | Dates | Bed | Locked |")?;
            writeln!(f, "|-:|:-|:-|:-|:-:|")?;
            for member in &self.members {
                writeln!(
                    f,
                    "| {} | {} ({}) | {} | {} | {} |",
                    member.slot().unwrap_or_default(),
                    member.id,
                    member.label(),
                    Season(&member.range()),
                    member.resource.as_deref().unwrap_or("-"),
                    if member.is_locked { "yes" } else { "" }
                )?;
            }
        }

        if !self.issues.is_empty() {
            writeln!(f, "\n## Issues")?;
            writeln!(f)?;
            for issue in &self.issues {
                writeln!(f, "- {issue}")?;
            }
            writeln!(f)?;
            writeln!(
                f,
                "Run `furrow repair --sequence {}` to fix this sequence.",
                self.sequence.id
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan check")?;
        writeln!(f)?;
        writeln!(f, "- Lanes in use: {}", self.lanes.len())?;
        writeln!(f, "- Overlapping plantings: {}", self.overlaps.len())?;
        writeln!(f, "- Incomplete spans: {}", self.incomplete.len())?;
        writeln!(f, "- Sequences with issues: {}", self.sequence_issues.len())?;

        if self.is_clean() {
            return writeln!(f, "\nNo conflicts found.");
        }

        if !self.overlap_pairs.is_empty() {
            writeln!(f, "\n## Overlaps")?;
            writeln!(f)?;
            for pair in &self.overlap_pairs {
                writeln!(f, "- **{}**: {} and {}", pair.resource, pair.first, pair.second)?;
            }
        }
        if !self.incomplete.is_empty() {
            writeln!(f, "\n## Incomplete spans")?;
            writeln!(f)?;
            for id in &self.incomplete {
                if let Some(span) = self.spans.get(id) {
                    writeln!(
                        f,
                        "- {id}: needs {}ft from {}, {}ft available",
                        span.feet_needed, span.start_bed, span.feet_available
                    )?;
                }
            }
        }
        if !self.sequence_issues.is_empty() {
            writeln!(f, "\n## Sequence issues")?;
            for (sequence_id, issues) in &self.sequence_issues {
                writeln!(f, "\n### {sequence_id}")?;
                writeln!(f)?;
                for issue in issues {
                    writeln!(f, "- {issue}")?;
                }
            }
            writeln!(f, "\nRun `furrow repair` to fix broken sequences.")?;
        }
        Ok(())
    }
}

impl fmt::Display for PlantingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantingChange::FieldStartDate(date) => write!(f, "start → {date}"),
            PlantingChange::EndDate(date) => write!(f, "end → {date}"),
            PlantingChange::Resource(Some(bed)) => write!(f, "bed → {bed}"),
            PlantingChange::Resource(None) => write!(f, "bed cleared"),
            PlantingChange::FeetNeeded(feet) => write!(f, "feet → {feet}"),
            PlantingChange::Sequence(Some(m)) => write!(f, "slot → {} #{}", m.sequence_id, m.slot),
            PlantingChange::Sequence(None) => write!(f, "left sequence"),
        }
    }
}

impl fmt::Display for PlanMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanMutation::CreatePlanting { planting } => {
                write!(f, "create **{}** {}", planting.id, Season(&planting.range()))?;
                if let Some(bed) = &planting.resource {
                    write!(f, " on {bed}")?;
                }
                Ok(())
            }
            PlanMutation::DeletePlanting { id } => write!(f, "delete **{id}**"),
            PlanMutation::UpdatePlanting { id, changes } => {
                let changes: Vec<String> = changes.iter().map(ToString::to_string).collect();
                write!(f, "update **{id}**: {}", changes.join(", "))
            }
            PlanMutation::CreateSequence { sequence } => write!(f, "create sequence {sequence}"),
            PlanMutation::UpdateSequenceOffset { id, offset_days } => {
                write!(f, "sequence {id} offset → {offset_days} days")
            }
            PlanMutation::DeleteSequence { id } => write!(f, "delete sequence {id}"),
        }
    }
}

impl fmt::Display for SequenceEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Sequence {}", self.sequence_id)?;
        writeln!(f)?;
        if !self.created.is_empty() {
            writeln!(f, "New plantings: {}", self.created.join(", "))?;
            writeln!(f)?;
        }
        write!(f, "{}", Mutations(&self.mutations))
    }
}

impl fmt::Display for PlantingEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Planting {}", self.planting_id)?;
        writeln!(f)?;
        if let Some(span) = &self.span {
            writeln!(f, "{span}")?;
        }
        write!(f, "{}", Mutations(&self.mutations))
    }
}

impl fmt::Display for RepairPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Sequence {}", self.sequence_id)?;
        writeln!(f)?;
        if self.remove_sequence {
            return writeln!(f, "- No members left; the sequence record is removed");
        }
        writeln!(f, "- Keep in slot order: {}", self.keep.join(", "))?;
        if !self.delete.is_empty() {
            writeln!(f, "- Delete: {}", self.delete.join(", "))?;
        }
        if !self.slot_reassignments.is_empty() {
            let moves: Vec<String> = self
                .slot_reassignments
                .iter()
                .map(|r| format!("{} → {}", r.id, r.new_slot))
                .collect();
            writeln!(f, "- New slots: {}", moves.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::analyze,
        fixtures::{field_groups, in_sequence, on_bed, plan, planting, sequence},
        models::BedSizing,
        repair::repair_sequence,
        sequence::summarize,
        span::resolve_span,
    };

    #[test]
    fn test_span_display() {
        let span = resolve_span(120, "J2", &field_groups(), &BedSizing::default());
        let output = span.to_string();
        assert!(output.contains("**incomplete**, 80ft available (40ft short)"));
        assert!(output.contains("| J5 | 20ft | 20ft |"));
    }

    #[test]
    fn test_planting_display() {
        let p = in_sequence(on_bed(planting("P1", "2025-04-01", "2025-05-01"), "A1"), "S1", 2);
        let output = p.to_string();
        assert!(output.starts_with("### P1 (P1)"));
        assert!(output.contains("- Bed: A1, 50ft needed"));
        assert!(output.contains("- Sequence: S1 slot 2"));
        assert!(!output.contains("Locked"));
    }

    #[test]
    fn test_summary_points_at_repair() {
        let plan = plan(
            vec![in_sequence(planting("P1", "2025-04-01", "2025-05-01"), "S1", 3)],
            vec![sequence("S1", 7)],
        );
        let output = summarize(&plan, "S1").unwrap().to_string();
        assert!(output.contains("- Anchor: missing"));
        assert!(output.contains("furrow repair --sequence S1"));

        let repair = repair_sequence(&plan, "S1").unwrap().to_string();
        assert!(repair.contains("- New slots: P1 → 0"));
    }

    #[test]
    fn test_clean_analysis() {
        let plan = plan(vec![on_bed(planting("P1", "2025-04-01", "2025-05-01"), "A1")], vec![]);
        let output = analyze(&plan).to_string();
        assert!(output.contains("No conflicts found."));
    }

    #[test]
    fn test_mutation_display() {
        let mutation = PlanMutation::UpdatePlanting {
            id: "P1".into(),
            changes: vec![
                PlantingChange::Resource(Some("A2".into())),
                PlantingChange::FeetNeeded(40),
            ],
        };
        assert_eq!(mutation.to_string(), "update **P1**: bed → A2, feet → 40");
    }
}
