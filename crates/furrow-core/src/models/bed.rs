//! Beds, bed sizing and resource groups.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Footage of a bed in a standard row.
pub const STANDARD_BED_FEET: u32 = 50;

/// Footage of a bed in a short row.
pub const SHORT_BED_FEET: u32 = 20;

/// Maps a row identifier to the footage of every bed in that row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BedSizing {
    pub standard_feet: u32,
    pub short_feet: u32,
    /// Rows whose beds are short
    pub short_rows: BTreeSet<String>,
}

impl Default for BedSizing {
    fn default() -> Self {
        Self {
            standard_feet: STANDARD_BED_FEET,
            short_feet: SHORT_BED_FEET,
            short_rows: BTreeSet::from(["J".to_string()]),
        }
    }
}

impl BedSizing {
    /// Capacity of every bed in `row`.
    pub fn capacity_for_row(&self, row: &str) -> u32 {
        if self.short_rows.contains(row) {
            self.short_feet
        } else {
            self.standard_feet
        }
    }

    /// Capacity of the bed called `name`.
    pub fn capacity_for_bed(&self, name: &str) -> u32 {
        self.capacity_for_row(bed_row(name))
    }
}

/// The row prefix of a bed name: its leading alphabetic characters.
///
/// `"J2"` belongs to row `"J"`, `"GH12"` to row `"GH"`.
pub fn bed_row(name: &str) -> &str {
    let end = name
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map_or(name.len(), |(i, _)| i);
    &name[..end]
}

/// The numeric suffix of a bed name, if it has one.
pub fn bed_number(name: &str) -> Option<u32> {
    let prefix_len = name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    name[prefix_len..].parse().ok()
}

/// A physical growing bed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bed {
    pub name: String,
    pub row: String,
    pub number: Option<u32>,
    pub capacity_feet: u32,
}

impl Bed {
    /// Parses a bed name, deriving row and capacity. Never fails: a name with
    /// no alphabetic prefix belongs to the empty row.
    pub fn parse(name: &str, sizing: &BedSizing) -> Self {
        let row = bed_row(name);
        Self {
            name: name.to_string(),
            row: row.to_string(),
            number: bed_number(name),
            capacity_feet: sizing.capacity_for_row(row),
        }
    }
}

/// An ordered collection of beds: a field row or a greenhouse section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_order: u32,
    /// Bed names in display order
    #[serde(default)]
    pub beds: Vec<String>,
}

impl ResourceGroup {
    pub fn contains(&self, bed: &str) -> bool {
        self.beds.iter().any(|b| b == bed)
    }

    /// Beds of this group that share `row`, ordered by numeric suffix.
    pub fn row_beds(&self, row: &str, sizing: &BedSizing) -> Vec<Bed> {
        let mut beds: Vec<Bed> = self
            .beds
            .iter()
            .filter(|name| bed_row(name) == row)
            .map(|name| Bed::parse(name, sizing))
            .collect();
        beds.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));
        beds
    }
}
