//! Tests for the planner module.

use tempfile::TempDir;

use super::*;
use crate::{
    fixtures::{day, in_sequence, on_bed, plan, planting, sequence},
    params::{AssignBed, CreateSequence, MovePlanting, Repair, SpanQuery, UpdateOffset},
};

/// Helper function to create a test planner over a seeded snapshot
async fn create_test_planner(seed: Plan) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let plan_path = temp_dir.path().join("plan.json");
    store::save_plan(&plan_path, &seed).expect("Failed to seed plan");
    let planner = PlannerBuilder::new()
        .with_plan_path(Some(&plan_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

fn corrupted() -> Plan {
    plan(
        vec![
            in_sequence(on_bed(planting("a", "2025-05-01", "2025-06-01"), "A1"), "S1", 4),
            in_sequence(planting("b", "2025-05-01", "2025-06-01"), "S1", 5),
            in_sequence(planting("c", "2025-05-08", "2025-06-08"), "S1", 6),
        ],
        vec![sequence("S1", 7)],
    )
}

#[tokio::test]
async fn test_edits_are_saved() {
    let seed = plan(vec![planting("P1", "2025-04-01", "2025-05-01")], vec![]);
    let (_temp_dir, planner) = create_test_planner(seed).await;

    planner
        .assign_bed(&AssignBed {
            planting_id: "P1".into(),
            bed: "A1".into(),
            allow_partial: false,
        })
        .await
        .expect("Failed to assign bed");
    let edit = planner
        .create_sequence(&CreateSequence {
            planting_id: "P1".into(),
            count: 3,
            offset_days: 7,
            ..Default::default()
        })
        .await
        .expect("Failed to create sequence");

    let saved = planner.load().await.expect("Failed to load plan");
    assert_eq!(saved.plantings.len(), 3);
    assert_eq!(saved.sequence_members(&edit.sequence_id).len(), 3);
    assert_eq!(
        saved.planting("P1-s2").unwrap().resource.as_deref(),
        Some("A1")
    );
}

#[tokio::test]
async fn test_failed_edit_leaves_snapshot_untouched() {
    let (_temp_dir, planner) = create_test_planner(corrupted()).await;
    let before = planner.load().await.unwrap();

    let err = planner
        .update_offset(&UpdateOffset {
            sequence_id: "S1".into(),
            offset_days: 3,
        })
        .await
        .unwrap_err();
    assert!(err.needs_repair());
    assert_eq!(planner.load().await.unwrap(), before);
}

#[tokio::test]
async fn test_repair_dry_run_then_apply() {
    let (_temp_dir, planner) = create_test_planner(corrupted()).await;

    let dry_run = planner.repair(&Repair::default()).await.unwrap();
    assert_eq!(dry_run.len(), 1);
    assert_eq!(planner.load().await.unwrap().plantings.len(), 3);

    let applied = planner
        .repair(&Repair {
            sequence_id: Some("S1".into()),
            apply: true,
        })
        .await
        .unwrap();
    assert_eq!(applied.iter().next().unwrap().delete, vec!["b"]);

    let summary = planner.show_sequence("S1").await.unwrap();
    assert!(summary.issues.is_empty());
    assert_eq!(summary.anchor_date, Some(day("2025-05-01")));
    assert!(planner.repair(&Repair::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_queries() {
    let seed = plan(
        vec![
            on_bed(planting("A", "2025-04-01", "2025-04-30"), "A1"),
            on_bed(planting("B", "2025-04-15", "2025-05-15"), "A1"),
        ],
        vec![],
    );
    let (_temp_dir, planner) = create_test_planner(seed).await;

    let span = planner
        .bed_span(&SpanQuery {
            bed: "J2".into(),
            feet_needed: 120,
        })
        .await
        .unwrap();
    assert_eq!(span.feet_available, 80);

    let lane = planner.lane("A1").await.unwrap();
    assert_eq!(lane.row_count, 2);
    assert!(lane.entries.iter().all(|e| e.overlaps));

    let analysis = planner.analyze().await.unwrap();
    assert_eq!(analysis.overlap_pairs.len(), 1);
}

#[tokio::test]
async fn test_move_planting_persists() {
    let seed = plan(vec![planting("P1", "2025-04-01", "2025-05-01")], vec![]);
    let (_temp_dir, planner) = create_test_planner(seed).await;

    planner
        .move_planting(&MovePlanting {
            planting_id: "P1".into(),
            field_start_date: day("2025-03-01"),
        })
        .await
        .unwrap();
    let moved = planner.planting("P1").await.unwrap();
    assert_eq!(moved.field_start_date, day("2025-03-01"));
    assert_eq!(moved.end_date, day("2025-03-31"));
}

#[tokio::test]
async fn test_missing_snapshot_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let planner = PlannerBuilder::new()
        .with_plan_path(Some(temp_dir.path().join("new").join("plan.json")))
        .build()
        .await
        .unwrap();
    assert!(planner.load().await.unwrap().plantings.is_empty());
    assert!(planner.list_sequences().await.unwrap().is_empty());
}
