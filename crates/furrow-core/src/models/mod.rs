//! Data models for plans, plantings, beds and sequences.
//!
//! Every model that arrives from a plan document goes through a validating
//! conversion from its wire record ([`PlantingRecord`], [`PlanRecord`]), so
//! the engine only ever sees well-formed data. Display implementations live
//! in [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use furrow_core::models::Plan;
//!
//! let plan: Plan = serde_json::from_str(r#"{
//!     "plantings": [{
//!         "id": "P1",
//!         "specId": "lettuce-head",
//!         "fieldStartDate": "2025-04-01",
//!         "endDate": "2025-05-20",
//!         "resource": "J2"
//!     }],
//!     "resourceGroups": [{ "id": "row-j", "name": "Row J", "beds": ["J1", "J2", "J3"] }]
//! }"#).unwrap();
//!
//! // Row J beds are short, so the footage defaults to 20ft.
//! assert_eq!(plan.planting("P1").unwrap().feet_needed, 20);
//! ```

pub mod bed;
pub mod plan;
pub mod planting;
pub mod sequence;

#[cfg(test)]
mod tests;

pub use bed::{bed_number, bed_row, Bed, BedSizing, ResourceGroup, SHORT_BED_FEET, STANDARD_BED_FEET};
pub use plan::{Plan, PlanRecord};
pub use planting::{Planting, PlantingRecord, SequenceMembership};
pub use sequence::{BedAssignment, Sequence, SequenceIssue};
