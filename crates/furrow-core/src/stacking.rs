//! Display-row assignment for plantings sharing a resource lane.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::Serialize;

use crate::models::Planting;

/// Row assignment for one lane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneLayout {
    /// Planting ID to 0-based display row
    pub rows: BTreeMap<String, usize>,
    /// Number of rows in use; the lane's height in rows
    pub row_count: usize,
}

impl LaneLayout {
    pub fn row_of(&self, planting_id: &str) -> Option<usize> {
        self.rows.get(planting_id).copied()
    }

    /// Planting IDs on each row, in row order.
    ///
    /// Entries pointing past `row_count` are left out.
    pub fn by_row(&self) -> Vec<Vec<&str>> {
        let mut rows = vec![Vec::new(); self.row_count];
        for (id, &row) in &self.rows {
            if let Some(ids) = rows.get_mut(row) {
                ids.push(id.as_str());
            }
        }
        rows
    }
}

/// Assigns each planting the lowest display row that is free on its start
/// day, processing plantings by start date (ties by ID).
///
/// A row is free when the planting last placed on it ends strictly before the
/// new one starts. Greedy earliest-start-first coloring of an interval graph
/// uses exactly as many rows as the peak number of simultaneously active
/// plantings.
pub fn stack_lane(plantings: &[&Planting]) -> LaneLayout {
    let mut ordered = plantings.to_vec();
    ordered.sort_by(|a, b| {
        a.field_start_date
            .cmp(&b.field_start_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut row_ends: Vec<Date> = Vec::new();
    let mut rows = BTreeMap::new();
    for planting in ordered {
        let row = match row_ends
            .iter()
            .position(|&end| end < planting.field_start_date)
        {
            Some(row) => {
                row_ends[row] = planting.end_date;
                row
            }
            None => {
                row_ends.push(planting.end_date);
                row_ends.len() - 1
            }
        };
        rows.insert(planting.id.clone(), row);
    }

    LaneLayout {
        rows,
        row_count: row_ends.len(),
    }
}
