// ── Report emission ──
//
// Flattens frozen aggregate mappings into fixed-schema rows and writes
// them to CSV sinks. Row field order is the column order; renames pin the
// exact header names consumers depend on. Files are written to a
// temporary path in the destination directory and persisted on success,
// so a failed write never leaves a truncated file behind looking
// complete.

pub mod bssid;
pub mod clients;
pub mod health;
pub mod wireless;

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::error::CoreError;

/// Write rows to `{dir}/{prefix}_{YYYYMMDD-HHMMSS}.csv`, creating the
/// directory if absent.
///
/// Returns `Ok(None)` without touching the filesystem when there is
/// nothing to write; callers surface that as a "nothing to report" line
/// rather than an empty file.
pub fn write_csv<R: Serialize>(
    rows: &[R],
    dir: &Path,
    prefix: &str,
) -> Result<Option<PathBuf>, CoreError> {
    if rows.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "{prefix}_{}.csv",
        Local::now().format("%Y%m%d-%H%M%S")
    ));

    let tmp = tempfile::NamedTempFile::new_in(dir)?;
    let mut writer = csv::Writer::from_writer(tmp);
    for row in rows {
        writer.serialize(row)?;
    }
    let tmp = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV writer flush failed: {e}")))?;
    tmp.persist(&path).map_err(|e| CoreError::Io(e.error))?;

    Ok(Some(path))
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::clients::ClientRow;
    use super::write_csv;

    fn sample_rows() -> Vec<ClientRow> {
        vec![
            ClientRow {
                network: "HQ".into(),
                device_name: "sw-floor1".into(),
                switch_port: "12".into(),
                client_mac: "aa:bb:cc:00:11:22".into(),
                ip: "10.0.0.5".into(),
                status: "Online".into(),
                last_seen: "2024-05-01T12:00:00Z".into(),
            },
            ClientRow {
                network: "HQ".into(),
                device_name: "sw-floor2".into(),
                switch_port: String::new(),
                client_mac: "aa:bb:cc:00:11:33".into(),
                ip: String::new(),
                status: "Offline".into(),
                last_seen: "2024-05-01T09:30:00Z".into(),
            },
        ]
    }

    #[test]
    fn csv_round_trip_preserves_rows_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let rows = sample_rows();

        let path = write_csv(&rows, dir.path(), "report").unwrap().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        // Header plus one line per row.
        assert_eq!(text.lines().count(), rows.len() + 1);
        assert_eq!(
            text.lines().next().unwrap(),
            "network,device_name,switch_port,client_mac,ip,status,last_seen"
        );

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let parsed: Vec<ClientRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn empty_report_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("output");

        let rows: Vec<ClientRow> = Vec::new();
        let path = write_csv(&rows, &target, "report").unwrap();

        assert!(path.is_none());
        assert!(!target.exists(), "empty report must not create the directory");
    }

    #[test]
    fn filename_uses_prefix_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_csv(&sample_rows(), dir.path(), "alerts")
            .unwrap()
            .unwrap();
        let name = path.file_name().unwrap().to_string_lossy();

        assert!(name.starts_with("alerts_"));
        assert!(name.ends_with(".csv"));
        // alerts_YYYYMMDD-HHMMSS.csv
        assert_eq!(name.len(), "alerts_".len() + 15 + ".csv".len());
    }
}
