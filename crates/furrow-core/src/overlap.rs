//! Temporal overlap detection within resource lanes.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::Planting;

/// Two plantings from different groups sharing a lane on at least one day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct OverlapPair {
    pub resource: String,
    pub first: String,
    pub second: String,
}

/// IDs of every planting that shares at least one day with a planting of a
/// different `group_id` in the same lane.
pub fn find_overlaps<K: AsRef<str>>(lanes: &BTreeMap<K, Vec<&Planting>>) -> BTreeSet<String> {
    find_overlap_pairs(lanes)
        .into_iter()
        .flat_map(|pair| [pair.first, pair.second])
        .collect()
}

/// Every overlapping pair, with `first < second` by ID.
///
/// Each lane is swept in start order while keeping the plantings still
/// active on the current start day, so only genuinely concurrent plantings
/// are compared.
pub fn find_overlap_pairs<K: AsRef<str>>(lanes: &BTreeMap<K, Vec<&Planting>>) -> Vec<OverlapPair> {
    let mut pairs = Vec::new();
    for (resource, plantings) in lanes {
        let mut ordered = plantings.clone();
        ordered.sort_by(|a, b| {
            a.field_start_date
                .cmp(&b.field_start_date)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut active: Vec<&Planting> = Vec::new();
        for current in ordered {
            active.retain(|p| p.end_date >= current.field_start_date);
            for &other in &active {
                if other.group_id == current.group_id {
                    continue;
                }
                let (first, second) = if other.id <= current.id {
                    (other, current)
                } else {
                    (current, other)
                };
                pairs.push(OverlapPair {
                    resource: resource.as_ref().to_string(),
                    first: first.id.clone(),
                    second: second.id.clone(),
                });
            }
            active.push(current);
        }
    }
    pairs.sort();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::planting;

    fn lanes<'a>(entries: &[(&'a str, Vec<&'a Planting>)]) -> BTreeMap<&'a str, Vec<&'a Planting>> {
        entries.iter().cloned().collect()
    }

    /// Reference answer by comparing every pair.
    fn brute_force(lanes: &BTreeMap<&str, Vec<&Planting>>) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        for plantings in lanes.values() {
            for (i, a) in plantings.iter().enumerate() {
                for b in &plantings[i + 1..] {
                    if a.group_id != b.group_id && a.range().overlaps(&b.range()) {
                        ids.insert(a.id.clone());
                        ids.insert(b.id.clone());
                    }
                }
            }
        }
        ids
    }

    #[test]
    fn test_detects_overlap_symmetrically() {
        let a = planting("A", "2025-01-01", "2025-01-10");
        let b = planting("B", "2025-01-05", "2025-01-15");
        let c = planting("C", "2025-01-20", "2025-01-25");
        let found = find_overlaps(&lanes(&[("A1", vec![&c, &b, &a])]));
        assert_eq!(found, BTreeSet::from(["A".to_string(), "B".to_string()]));
    }

    #[test]
    fn test_shared_boundary_day_counts() {
        let a = planting("A", "2025-01-01", "2025-01-10");
        let b = planting("B", "2025-01-10", "2025-01-15");
        assert_eq!(find_overlaps(&lanes(&[("A1", vec![&a, &b])])).len(), 2);
    }

    #[test]
    fn test_same_group_never_overlaps() {
        let a = planting("A", "2025-01-01", "2025-01-10");
        let mut b = planting("B", "2025-01-01", "2025-01-10");
        b.group_id = "A".to_string();
        assert!(find_overlaps(&lanes(&[("A1", vec![&a, &b])])).is_empty());
    }

    #[test]
    fn test_lanes_are_independent() {
        let a = planting("A", "2025-01-01", "2025-01-10");
        let b = planting("B", "2025-01-05", "2025-01-15");
        assert!(find_overlaps(&lanes(&[("A1", vec![&a]), ("A2", vec![&b])])).is_empty());
    }

    #[test]
    fn test_pairs_carry_lane_and_ordered_ids() {
        let a = planting("A", "2025-01-05", "2025-01-10");
        let b = planting("B", "2025-01-01", "2025-01-15");
        let pairs = find_overlap_pairs(&lanes(&[("J2", vec![&a, &b])]));
        assert_eq!(
            pairs,
            vec![OverlapPair {
                resource: "J2".into(),
                first: "A".into(),
                second: "B".into()
            }]
        );
    }

    #[test]
    fn test_long_planting_overlaps_later_short_ones() {
        let long = planting("L", "2025-01-01", "2025-03-01");
        let x = planting("X", "2025-01-02", "2025-01-03");
        let y = planting("Y", "2025-02-01", "2025-02-02");
        let pairs = find_overlap_pairs(&lanes(&[("A1", vec![&long, &x, &y])]));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_sweep_matches_pairwise() {
        let specs = [
            ("P0", "2025-03-01", "2025-04-10"),
            ("P1", "2025-03-15", "2025-03-20"),
            ("P2", "2025-04-10", "2025-05-01"),
            ("P3", "2025-05-02", "2025-05-30"),
            ("P4", "2025-05-30", "2025-06-15"),
            ("P5", "2025-07-01", "2025-07-10"),
            ("P6", "2025-02-01", "2025-08-01"),
            ("P7", "2025-06-16", "2025-06-30"),
        ];
        let plantings: Vec<Planting> = specs
            .iter()
            .map(|(id, s, e)| planting(id, s, e))
            .collect();
        for skip in 0..plantings.len() {
            let lane: Vec<&Planting> = plantings
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, p)| p)
                .collect();
            let lane_map = lanes(&[("A1", lane)]);
            assert_eq!(find_overlaps(&lane_map), brute_force(&lane_map));
        }
    }
}
