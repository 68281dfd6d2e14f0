//! Plan snapshot: the validated unit every engine component reads.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Bed, BedSizing, Planting, PlantingRecord, ResourceGroup, Sequence};
use crate::error::{EntityKind, PlannerError, Result};

/// An immutable, fully materialized plan.
///
/// Construct through [`Plan::new`] or deserialization; both run the same
/// validation so malformed documents are rejected before any engine code sees
/// them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "PlanRecord", into = "PlanRecord")]
pub struct Plan {
    pub plantings: Vec<Planting>,
    pub resource_groups: Vec<ResourceGroup>,
    pub sequences: Vec<Sequence>,
    pub bed_sizing: BedSizing,
}

impl Plan {
    /// Creates a validated plan.
    pub fn new(
        plantings: Vec<Planting>,
        resource_groups: Vec<ResourceGroup>,
        sequences: Vec<Sequence>,
        bed_sizing: BedSizing,
    ) -> Result<Self> {
        let plan = Self {
            plantings,
            resource_groups,
            sequences,
            bed_sizing,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Checks every snapshot-level invariant.
    ///
    /// Slot uniqueness is not checked; corrupted sequences stay loadable so
    /// they can be repaired.
    pub fn validate(&self) -> Result<()> {
        let mut planting_ids = HashSet::new();
        for planting in &self.plantings {
            if !planting_ids.insert(planting.id.as_str()) {
                return Err(duplicate("plantings", &planting.id));
            }
            if planting.feet_needed == 0 {
                return Err(PlannerError::invalid_input("feetNeeded")
                    .with_reason(format!("planting '{}' needs a positive footage", planting.id)));
            }
            if planting.end_date < planting.field_start_date {
                return Err(PlannerError::invalid_input("endDate").with_reason(format!(
                    "planting '{}' ends before it starts",
                    planting.id
                )));
            }
        }

        let mut sequence_ids = HashSet::new();
        for sequence in &self.sequences {
            if !sequence_ids.insert(sequence.id.as_str()) {
                return Err(duplicate("sequences", &sequence.id));
            }
            if sequence.offset_days == 0 {
                return Err(PlannerError::invalid_input("offsetDays")
                    .with_reason(format!("sequence '{}' has a zero offset", sequence.id)));
            }
        }
        for planting in &self.plantings {
            if let Some(sequence_id) = planting.sequence_id() {
                if !sequence_ids.contains(sequence_id) {
                    return Err(PlannerError::invalid_input("sequenceId").with_reason(format!(
                        "planting '{}' references unknown sequence '{sequence_id}'",
                        planting.id
                    )));
                }
            }
        }

        let mut group_ids = HashSet::new();
        let mut bed_names = HashSet::new();
        for group in &self.resource_groups {
            if !group_ids.insert(group.id.as_str()) {
                return Err(duplicate("resourceGroups", &group.id));
            }
            for bed in &group.beds {
                if !bed_names.insert(bed.as_str()) {
                    return Err(duplicate("beds", bed));
                }
            }
        }

        let mut group_dates = HashMap::new();
        for planting in &self.plantings {
            let range = planting.range();
            if let Some(existing) = group_dates.insert(planting.group_id.as_str(), range) {
                if existing != range {
                    return Err(PlannerError::invalid_input("groupId").with_reason(format!(
                        "rows of group '{}' disagree on dates ({existing} vs {range})",
                        planting.group_id
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn find_planting(&self, id: &str) -> Option<&Planting> {
        self.plantings.iter().find(|p| p.id == id)
    }

    pub fn planting(&self, id: &str) -> Result<&Planting> {
        self.find_planting(id)
            .ok_or_else(|| PlannerError::not_found(EntityKind::Planting, id))
    }

    pub fn sequence(&self, id: &str) -> Result<&Sequence> {
        self.sequences
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| PlannerError::not_found(EntityKind::Sequence, id))
    }

    pub fn resource_group(&self, id: &str) -> Result<&ResourceGroup> {
        self.resource_groups
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| PlannerError::not_found(EntityKind::ResourceGroup, id))
    }

    /// The group that owns `bed`, if any.
    pub fn group_of_bed(&self, bed: &str) -> Option<&ResourceGroup> {
        self.resource_groups.iter().find(|g| g.contains(bed))
    }

    /// A known bed, parsed with this plan's sizing.
    pub fn bed(&self, name: &str) -> Result<Bed> {
        self.group_of_bed(name)
            .map(|_| Bed::parse(name, &self.bed_sizing))
            .ok_or_else(|| PlannerError::not_found(EntityKind::Bed, name))
    }

    /// Members of a sequence ordered by slot, then ID.
    pub fn sequence_members(&self, sequence_id: &str) -> Vec<&Planting> {
        let mut members: Vec<&Planting> = self
            .plantings
            .iter()
            .filter(|p| p.sequence_id() == Some(sequence_id))
            .collect();
        members.sort_by(|a, b| a.slot().cmp(&b.slot()).then_with(|| a.id.cmp(&b.id)));
        members
    }

    /// All rows sharing `group_id`.
    pub fn group_rows(&self, group_id: &str) -> Vec<&Planting> {
        self.plantings
            .iter()
            .filter(|p| p.group_id == group_id)
            .collect()
    }
}

fn duplicate(field: &str, id: &str) -> PlannerError {
    PlannerError::invalid_input(field).with_reason(format!("duplicate id '{id}'"))
}

/// Serialized form of a [`Plan`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    #[serde(default)]
    pub plantings: Vec<PlantingRecord>,
    #[serde(default)]
    pub resource_groups: Vec<ResourceGroup>,
    #[serde(default)]
    pub sequences: Vec<Sequence>,
    #[serde(default)]
    pub bed_sizing: BedSizing,
}

impl TryFrom<PlanRecord> for Plan {
    type Error = PlannerError;

    fn try_from(record: PlanRecord) -> Result<Self> {
        let sizing = record.bed_sizing;
        let plantings = record
            .plantings
            .into_iter()
            .map(|r| {
                let default_feet = r
                    .resource
                    .as_deref()
                    .map_or(sizing.standard_feet, |bed| sizing.capacity_for_bed(bed));
                Planting::from_record(r, default_feet)
            })
            .collect::<Result<Vec<_>>>()?;
        Plan::new(plantings, record.resource_groups, record.sequences, sizing)
    }
}

impl From<Plan> for PlanRecord {
    fn from(plan: Plan) -> Self {
        Self {
            plantings: plan.plantings.into_iter().map(Into::into).collect(),
            resource_groups: plan.resource_groups,
            sequences: plan.sequences,
            bed_sizing: plan.bed_sizing,
        }
    }
}
