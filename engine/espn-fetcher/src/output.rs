//! Report artifacts on disk

use anyhow::{Context, Result};
use league_report::Report;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE: &str = "report.json";
pub const SUBJECT_FILE: &str = "subject.txt";

/// Paths written by [`write_report`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub report: PathBuf,
    pub subject: PathBuf,
}

/// Write `report.json` (pretty JSON) and `subject.txt` into `dir`, creating it if needed.
pub fn write_report(dir: &Path, report: &Report) -> Result<ReportArtifacts> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {:?}", dir))?;

    let artifacts = ReportArtifacts {
        report: dir.join(REPORT_FILE),
        subject: dir.join(SUBJECT_FILE),
    };

    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(&artifacts.report, json)
        .with_context(|| format!("Failed to write {:?}", artifacts.report))?;
    fs::write(&artifacts.subject, &report.subject)
        .with_context(|| format!("Failed to write {:?}", artifacts.subject))?;

    info!("Wrote {:?} and {:?}", artifacts.report, artifacts.subject);
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_report::{build_report, LeaguePayload};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn report() -> Report {
        let scoreboard = json!({
            "teams": [{"id": 1, "name": "Hawks"}, {"id": 2, "name": "Owls"}],
            "schedule": [
                {
                    "matchupPeriodId": 1,
                    "home": {"teamId": 1, "totalPoints": 101.5},
                    "away": {"teamId": 2, "totalPoints": 99.0},
                },
            ],
        });
        build_report(1, &LeaguePayload::new(scoreboard), &BTreeMap::new())
    }

    #[test]
    fn test_write_report_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let report = report();

        let artifacts = write_report(&out, &report).unwrap();
        assert_eq!(
            fs::read_to_string(&artifacts.subject).unwrap(),
            "Fantasy Week 1 Results & Notes"
        );

        let written = fs::read_to_string(&artifacts.report).unwrap();
        let written: Report = serde_json::from_str(&written).unwrap();
        assert_eq!(written, report);
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SUBJECT_FILE), "stale").unwrap();

        write_report(dir.path(), &report()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(SUBJECT_FILE)).unwrap(),
            "Fantasy Week 1 Results & Notes"
        );
    }
}
