//! Run aggregation and reporting

use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tabular::{Row, Table};

use crate::error::Result;
use crate::executor::ScenarioResult;
use crate::logging::RunLogger;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    pub fn from_results(results: Vec<ScenarioResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self { total: results.len(), passed, failed: results.len() - passed, results }
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn print(&self, logger: &RunLogger) {
        logger.header("RUN SUMMARY");
        logger.info(&format!("Total scenarios: {}", self.total));
        logger.success(&format!("Passed: {}", self.passed));
        logger.error(&format!("Failed: {}", self.failed));

        if !self.all_passed() {
            logger.subheader("Failed scenarios");
            let mut table = Table::new("{:<}  {:<}");
            table.add_row(Row::new().with_cell("Scenario").with_cell("Reason"));
            table.add_row(Row::new().with_cell("--------").with_cell("------"));
            for result in self.failures() {
                table.add_row(
                    Row::new()
                        .with_cell(&result.scenario)
                        .with_cell(result.reason.as_deref().unwrap_or("-")),
                );
            }
            for line in table.to_string().lines() {
                logger.plain(line);
            }
            logger.warn(&format!(
                "{} scenario(s) diverged from the declared policy.",
                self.failed
            ));
        } else {
            logger.success("All scenarios passed. The policy behaves as declared.");
        }
    }
}

/// Persistable record of one full run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub target_url: String,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(target_url: &str, summary: RunSummary) -> Self {
        Self { generated_at: Utc::now().to_rfc3339(), target_url: target_url.to_string(), summary }
    }

    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            execution_id: "00000000-0000-0000-0000-000000000000".to_string(),
            scenario: name.to_string(),
            passed,
            observed_status: if passed { Some(200) } else { None },
            expected_status: 200,
            reason: (!passed).then(|| "status mismatch: NO_RESPONSE != 200".to_string()),
        }
    }

    #[test]
    fn summary_counts_in_execution_order() {
        let summary = RunSummary::from_results(vec![
            result("a", true),
            result("b", false),
            result("c", true),
        ]);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_passed());
        assert_eq!(summary.failures().count(), 1);
        assert_eq!(summary.results[1].scenario, "b");
    }

    #[test]
    fn empty_run_counts_as_all_passed() {
        let summary = RunSummary::from_results(Vec::new());
        assert!(summary.all_passed());
        assert_eq!(summary.total, 0);
    }

    #[tokio::test]
    async fn report_serializes_results_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let summary = RunSummary::from_results(vec![result("a", true), result("b", false)]);
        let report = RunReport::new("http://localhost:3000", summary);
        report.save_to_file(&path).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["target_url"], "http://localhost:3000");
        assert_eq!(parsed["summary"]["failed"], 1);
        assert_eq!(parsed["summary"]["results"][1]["reason"], "status mismatch: NO_RESPONSE != 200");
    }
}
