//! Plan snapshot files.
//!
//! A snapshot is the JSON form of a [`Plan`]. Writes go to a sibling
//! temporary file that is renamed over the target, so readers never see a
//! half-written snapshot.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    error::{IoResultExt, Result},
    models::Plan,
};

/// Reads and validates a snapshot. A missing file is an empty plan.
pub fn load_plan(path: &Path) -> Result<Plan> {
    if !path.exists() {
        debug!("no snapshot at {}; starting from an empty plan", path.display());
        return Ok(Plan::default());
    }
    let file = File::open(path).fs_context(path)?;
    let plan: Plan = serde_json::from_reader(BufReader::new(file))?;
    debug!(
        "loaded {} planting(s) and {} sequence(s) from {}",
        plan.plantings.len(),
        plan.sequences.len(),
        path.display()
    );
    Ok(plan)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "plan.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validates and writes a snapshot atomically.
pub fn save_plan(path: &Path, plan: &Plan) -> Result<()> {
    plan.validate()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).fs_context(parent)?;
    }

    let temp = temp_path(path);
    {
        let file = File::create(&temp).fs_context(&temp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, plan)?;
        writer.write_all(b"\n").fs_context(&temp)?;
        let file = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .fs_context(&temp)?;
        file.sync_all().fs_context(&temp)?;
    }
    fs::rename(&temp, path).fs_context(path)?;
    debug!("saved snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::fixtures::{in_sequence, on_bed, plan, planting, sequence};

    #[test]
    fn test_missing_file_is_empty_plan() {
        let dir = TempDir::new().unwrap();
        let plan = load_plan(&dir.path().join("absent.json")).unwrap();
        assert!(plan.plantings.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("plan.json");
        let original = plan(
            vec![
                in_sequence(on_bed(planting("P0", "2025-04-01", "2025-05-01"), "J1"), "S1", 0),
                planting("X", "2025-06-01", "2025-07-01"),
            ],
            vec![sequence("S1", 7)],
        );
        save_plan(&path, &original).unwrap();
        assert!(!temp_path(&path).exists());
        assert_eq!(load_plan(&path).unwrap(), original);
    }

    #[test]
    fn test_invalid_snapshot_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(
            &path,
            r#"{"plantings": [{"id": "P1", "configId": "c", "fieldStartDate": "2025-05-01", "endDate": "2025-04-01"}]}"#,
        )
        .unwrap();
        assert!(load_plan(&path).is_err());
    }
}
