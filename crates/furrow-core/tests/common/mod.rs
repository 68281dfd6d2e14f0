use std::path::PathBuf;

use furrow_core::PlannerBuilder;
use tempfile::TempDir;

/// A small farm: rows A (50ft beds) and J (20ft beds), one lettuce planting
/// on A1 and an unassigned radish planting.
pub const FARM: &str = r#"{
    "plantings": [
        { "id": "lettuce", "configId": "lettuce-head", "crop": "Lettuce",
          "fieldStartDate": "2025-04-01", "endDate": "2025-05-20", "resource": "A1" },
        { "id": "radish", "configId": "radish-french", "crop": "Radish",
          "fieldStartDate": "2025-04-10", "endDate": "2025-05-10", "resource": "" }
    ],
    "resourceGroups": [
        { "id": "row-a", "name": "Row A", "displayOrder": 1, "beds": ["A1", "A2", "A3"] },
        { "id": "row-j", "name": "Row J", "displayOrder": 2, "beds": ["J1", "J2", "J3", "J4", "J5"] }
    ]
}"#;

/// Writes `snapshot` into a fresh directory and returns its path.
pub fn write_snapshot(snapshot: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let plan_path = temp_dir.path().join("plan.json");
    std::fs::write(&plan_path, snapshot).expect("Failed to write snapshot");
    (temp_dir, plan_path)
}

/// Helper function to create a test planner over `snapshot`
pub async fn create_test_planner(snapshot: &str) -> (TempDir, furrow_core::Planner) {
    let (temp_dir, plan_path) = write_snapshot(snapshot);
    let planner = PlannerBuilder::new()
        .with_plan_path(Some(&plan_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
