//! Parameter structures for furrow operations
//!
//! Shared parameter structures used by the engine functions, the async
//! [`crate::Planner`] facade and the CLI. They carry no framework-specific
//! derives beyond serde, so any interface layer can wrap them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │     Engine      │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (pure functions)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers define their own argument structs and convert into these
//! with `From` implementations.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::BedAssignment;

/// Parameters for resolving a bed span without touching any planting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanQuery {
    /// Bed the placement starts at
    pub bed: String,
    /// Footage to place
    pub feet_needed: u32,
}

/// Parameters for placing a planting on a bed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBed {
    pub planting_id: String,
    /// Starting bed
    pub bed: String,
    /// Accept a placement that runs out of row beds
    #[serde(default)]
    pub allow_partial: bool,
}

/// Parameters for moving a planting to a new field start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlanting {
    pub planting_id: String,
    pub field_start_date: Date,
}

/// Parameters for changing a planting's footage requirement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFeetNeeded {
    pub planting_id: String,
    pub feet_needed: u32,
}

/// Parameters for turning a planting into the anchor of a new sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSequence {
    /// Planting that becomes slot 0
    pub planting_id: String,
    /// Total number of members including the anchor
    pub count: u32,
    /// Days between consecutive slots
    pub offset_days: u32,
    /// Where the new members go
    #[serde(default)]
    pub bed_assignment: BedAssignment,
    /// Optional display name
    pub name: Option<String>,
}

/// Parameters for changing the spacing of a sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOffset {
    pub sequence_id: String,
    pub offset_days: u32,
}

/// Parameters for moving a sequence's anchor date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveAnchor {
    pub sequence_id: String,
    pub anchor_date: Date,
}

/// One entry of an explicit slot permutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignment {
    pub planting_id: String,
    pub slot: u32,
}

/// Parameters for reordering a sequence.
///
/// `assignments` must name every member exactly once and use each slot of
/// `0..N` exactly once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSlots {
    pub sequence_id: String,
    pub assignments: Vec<SlotAssignment>,
}

/// Parameters for adding an existing planting to a sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToSequence {
    pub sequence_id: String,
    pub planting_id: String,
}

/// What happens to members when a sequence is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeleteMode {
    /// Members stay on the plan as standalone plantings
    #[default]
    Unlink,
    /// Members are deleted with the sequence
    DeletePlantings,
}

/// Parameters for deleting a sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSequence {
    pub sequence_id: String,
    #[serde(default)]
    pub mode: DeleteMode,
}

/// Parameters for the repair sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repair {
    /// Restrict the sweep to one sequence
    pub sequence_id: Option<String>,
    /// Write the result back instead of only reporting it
    #[serde(default)]
    pub apply: bool,
}
