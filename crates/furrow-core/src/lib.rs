//! Core library for the Furrow succession planner.
//!
//! This crate holds the planning engine for a market-garden crop plan: it
//! places plantings on beds, stacks the plantings sharing a bed into display
//! rows, flags overlaps, keeps succession sequences evenly spaced and
//! repairs sequences whose slots were corrupted.
//!
//! # Engine
//!
//! - [`span`]: which beds a placement occupies when it needs more footage
//!   than one bed holds
//! - [`overlap`]: plantings sharing a bed on at least one day
//! - [`stacking`]: display rows for a bed's timeline lane
//! - [`sequence`]: succession sequence operations
//! - [`repair`]: recovery for sequences with broken slots
//! - [`edits`] and [`analysis`]: single-planting edits and whole-plan checks
//!
//! Engine functions are pure: they read a [`Plan`] snapshot and return
//! [`PlanMutation`]s. [`Plan::apply`] applies a batch atomically, and the
//! async [`Planner`] wraps load, apply and save around a snapshot file.
//!
//! # Quick Start
//!
//! ```rust
//! use furrow_core::{analysis, models::Plan, span};
//!
//! let plan: Plan = serde_json::from_str(r#"{
//!     "plantings": [
//!         { "id": "P1", "configId": "lettuce", "resource": "J2", "feetNeeded": 40,
//!           "fieldStartDate": "2025-04-01", "endDate": "2025-05-15" },
//!         { "id": "P2", "configId": "radish", "resource": "J3",
//!           "fieldStartDate": "2025-05-10", "endDate": "2025-06-01" }
//!     ],
//!     "resourceGroups": [
//!         { "id": "row-j", "name": "Row J", "beds": ["J1", "J2", "J3", "J4"] }
//!     ]
//! }"#).unwrap();
//!
//! // 40ft starting on a 20ft bed spills into J3.
//! let p1 = plan.planting("P1").unwrap();
//! let placed = span::span_for_planting(&plan, p1).unwrap();
//! assert_eq!(placed.beds().collect::<Vec<_>>(), ["J2", "J3"]);
//!
//! // P1 on J3 overlaps P2 from May 10 to May 15.
//! let report = analysis::analyze(&plan);
//! assert!(report.overlaps.contains("P1") && report.overlaps.contains("P2"));
//! ```

pub mod analysis;
pub mod dates;
pub mod display;
pub mod edits;
pub mod error;
pub mod models;
pub mod mutations;
pub mod overlap;
pub mod params;
pub mod planner;
pub mod repair;
pub mod sequence;
pub mod span;
pub mod stacking;
pub mod store;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use analysis::{LaneReport, PlanAnalysis};
pub use dates::DateRange;
pub use display::{EditResult, Mutations, OperationStatus, Repairs};
pub use edits::PlantingEdit;
pub use error::{EntityKind, PlannerError, Result};
pub use models::{
    BedAssignment, BedSizing, Plan, Planting, ResourceGroup, Sequence, SequenceIssue,
};
pub use mutations::{PlanMutation, PlantingChange};
pub use planner::{Planner, PlannerBuilder};
pub use repair::RepairPlan;
pub use sequence::{SequenceEdit, SequenceSummary};
pub use span::BedSpan;
pub use stacking::LaneLayout;
