//! Planting model and its wire record.

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};

use super::bed::STANDARD_BED_FEET;
use crate::{
    dates::{self, DateRange},
    error::{PlannerError, Result},
};

/// A planting's place in a succession sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceMembership {
    pub sequence_id: String,
    pub slot: u32,
}

/// One crop instance on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlantingRecord", into = "PlantingRecord")]
pub struct Planting {
    /// Unique identifier for the planting
    pub id: String,

    /// Crop configuration this planting was made from
    pub config_id: String,

    /// Human readable crop label
    pub crop: Option<String>,

    /// First day in the field
    pub field_start_date: Date,

    /// Last day of harvest
    pub end_date: Date,

    /// Starting bed; `None` when unassigned
    pub resource: Option<String>,

    /// Footage requirement, always positive
    pub feet_needed: u32,

    /// Shared by every bed row of one logical planting
    pub group_id: String,

    pub sequence: Option<SequenceMembership>,

    /// Set once actual dates are recorded
    pub is_locked: bool,
}

impl Planting {
    /// Builds a planting from its wire record, defaulting a missing footage
    /// requirement to `default_feet`.
    pub fn from_record(record: PlantingRecord, default_feet: u32) -> Result<Self> {
        let feet_needed = record.feet_needed.unwrap_or(default_feet);
        if feet_needed == 0 {
            return Err(PlannerError::invalid_input("feetNeeded")
                .with_reason(format!("planting '{}' needs a positive footage", record.id)));
        }
        if record.id.trim().is_empty() {
            return Err(PlannerError::invalid_input("id").with_reason("planting id is empty"));
        }
        DateRange::new(record.field_start_date, record.end_date)?;

        let sequence = match (record.sequence_id, record.sequence_slot) {
            (Some(sequence_id), Some(slot)) => Some(SequenceMembership { sequence_id, slot }),
            (None, None) => None,
            (Some(sequence_id), None) => {
                return Err(PlannerError::invalid_input("sequenceSlot").with_reason(format!(
                    "planting '{}' belongs to sequence '{sequence_id}' without a slot",
                    record.id
                )))
            }
            (None, Some(_)) => {
                return Err(PlannerError::invalid_input("sequenceId").with_reason(format!(
                    "planting '{}' has a slot but no sequence",
                    record.id
                )))
            }
        };

        Ok(Self {
            group_id: record.group_id.unwrap_or_else(|| record.id.clone()),
            id: record.id,
            config_id: record.config_id,
            crop: record.crop,
            field_start_date: record.field_start_date,
            end_date: record.end_date,
            resource: record.resource,
            feet_needed,
            sequence,
            is_locked: record.is_locked,
        })
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.field_start_date,
            end: self.end_date,
        }
    }

    pub fn sequence_id(&self) -> Option<&str> {
        self.sequence.as_ref().map(|m| m.sequence_id.as_str())
    }

    pub fn slot(&self) -> Option<u32> {
        self.sequence.as_ref().map(|m| m.slot)
    }

    pub fn has_bed(&self) -> bool {
        self.resource.is_some()
    }

    /// Days between field start and end of harvest.
    pub fn span_days(&self) -> Result<i64> {
        dates::days_between(self.field_start_date, self.end_date)
    }

    /// Label used in listings: the crop name when known, else the ID.
    pub fn label(&self) -> &str {
        self.crop.as_deref().unwrap_or(&self.id)
    }
}

impl TryFrom<PlantingRecord> for Planting {
    type Error = PlannerError;

    fn try_from(record: PlantingRecord) -> Result<Self> {
        Planting::from_record(record, STANDARD_BED_FEET)
    }
}

/// Serialized form of a [`Planting`] as stored in plan documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingRecord {
    pub id: String,
    #[serde(alias = "specId")]
    pub config_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    pub field_start_date: Date,
    pub end_date: Date,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feet_needed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_slot: Option<u32>,
    #[serde(default)]
    pub is_locked: bool,
}

impl From<Planting> for PlantingRecord {
    fn from(planting: Planting) -> Self {
        let (sequence_id, sequence_slot) = match planting.sequence {
            Some(m) => (Some(m.sequence_id), Some(m.slot)),
            None => (None, None),
        };
        Self {
            id: planting.id,
            config_id: planting.config_id,
            crop: planting.crop,
            field_start_date: planting.field_start_date,
            end_date: planting.end_date,
            resource: planting.resource,
            feet_needed: Some(planting.feet_needed),
            group_id: Some(planting.group_id),
            sequence_id,
            sequence_slot,
            is_locked: planting.is_locked,
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
