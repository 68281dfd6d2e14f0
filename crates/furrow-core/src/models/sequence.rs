//! Succession sequence model and its structural diagnostics.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A succession group: plantings of one crop staggered by `offset_days`.
///
/// The anchor date is slot 0's field start date and is not stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Days between consecutive slots
    pub offset_days: u32,
}

/// Where new sequence members are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedAssignment {
    /// Same bed as the anchor
    #[default]
    Same,
    /// Left for the grower to place
    Unassigned,
}

/// A violation of the sequence slot invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SequenceIssue {
    /// No member holds slot 0
    MissingAnchor,
    /// Several members hold the same slot
    DuplicateSlot { slot: u32, planting_ids: Vec<String> },
    /// Several members start on the same day
    DuplicateDate { date: Date, planting_ids: Vec<String> },
    /// A member starts before a member with a lower slot
    OutOfDateOrder { planting_id: String, slot: u32 },
}

impl fmt::Display for SequenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceIssue::MissingAnchor => write!(f, "no member holds slot 0"),
            SequenceIssue::DuplicateSlot { slot, planting_ids } => {
                write!(f, "slot {slot} held by {}", planting_ids.join(", "))
            }
            SequenceIssue::DuplicateDate { date, planting_ids } => {
                write!(f, "{date} used by {}", planting_ids.join(", "))
            }
            SequenceIssue::OutOfDateOrder { planting_id, slot } => {
                write!(f, "slot {slot} ({planting_id}) is out of date order")
            }
        }
    }
}
