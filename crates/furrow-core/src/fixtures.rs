//! Shared builders for unit tests.

use jiff::civil::Date;

use crate::models::{BedSizing, Plan, Planting, ResourceGroup, Sequence, SequenceMembership};

pub(crate) fn day(s: &str) -> Date {
    s.parse().expect("valid test date")
}

pub(crate) fn planting(id: &str, start: &str, end: &str) -> Planting {
    Planting {
        id: id.to_string(),
        config_id: "cfg-lettuce".to_string(),
        crop: None,
        field_start_date: day(start),
        end_date: day(end),
        resource: None,
        feet_needed: 50,
        group_id: id.to_string(),
        sequence: None,
        is_locked: false,
    }
}

pub(crate) fn on_bed(mut planting: Planting, bed: &str) -> Planting {
    planting.resource = Some(bed.to_string());
    planting
}

pub(crate) fn in_sequence(mut planting: Planting, sequence_id: &str, slot: u32) -> Planting {
    planting.sequence = Some(SequenceMembership {
        sequence_id: sequence_id.to_string(),
        slot,
    });
    planting
}

pub(crate) fn locked(mut planting: Planting) -> Planting {
    planting.is_locked = true;
    planting
}

pub(crate) fn group(id: &str, beds: &[&str]) -> ResourceGroup {
    ResourceGroup {
        id: id.to_string(),
        name: format!("Row {id}"),
        display_order: 0,
        beds: beds.iter().map(ToString::to_string).collect(),
    }
}

pub(crate) fn sequence(id: &str, offset_days: u32) -> Sequence {
    Sequence {
        id: id.to_string(),
        name: None,
        offset_days,
    }
}

/// Rows A (50ft) and J (20ft), five beds each.
pub(crate) fn field_groups() -> Vec<ResourceGroup> {
    vec![
        group("row-a", &["A1", "A2", "A3", "A4", "A5"]),
        group("row-j", &["J1", "J2", "J3", "J4", "J5"]),
    ]
}

pub(crate) fn plan(plantings: Vec<Planting>, sequences: Vec<Sequence>) -> Plan {
    Plan::new(plantings, field_groups(), sequences, BedSizing::default()).expect("valid test plan")
}
