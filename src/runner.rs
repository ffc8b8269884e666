//! Run orchestration
//!
//! Owns the registries, the executor and the logger for one process run.
//! Scenarios execute strictly in declaration order, one at a time, with a
//! courtesy pause between them. Each scenario gets exactly one attempt.

use tokio::time::sleep;

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::executor::{ScenarioExecutor, ScenarioResult};
use crate::logging::RunLogger;
use crate::report::{RunReport, RunSummary};
use crate::scenarios::ScenarioRegistry;
use crate::subjects::SubjectRegistry;

pub struct Runner {
    config: HarnessConfig,
    subjects: SubjectRegistry,
    scenarios: ScenarioRegistry,
    executor: ScenarioExecutor,
    logger: RunLogger,
}

impl Runner {
    /// Wires the registries together and validates every subject reference
    /// before anything is executed.
    pub async fn new(config: HarnessConfig) -> Result<Self> {
        let logger = RunLogger::create(&config.log_file);
        let subjects = SubjectRegistry::builtin();
        let scenarios = ScenarioRegistry::builtin(&config);
        scenarios.validate(&subjects)?;

        let executor = ScenarioExecutor::new(&config, &logger).await?;

        Ok(Self { config, subjects, scenarios, executor, logger })
    }

    pub fn logger(&self) -> &RunLogger {
        &self.logger
    }

    pub fn scenarios(&self) -> &ScenarioRegistry {
        &self.scenarios
    }

    pub async fn run_all(&self) -> Result<RunSummary> {
        self.logger.header("ACCOUNT POLICY EXERCISE SUITE");
        self.logger.info(&format!("Target: {}", self.config.base_url));
        self.logger.info(&format!("Scenarios: {}", self.scenarios.len()));

        let mut results = Vec::with_capacity(self.scenarios.len());
        for scenario in self.scenarios.iter() {
            let result = self.executor.execute(scenario, &self.subjects, &self.logger).await?;
            results.push(result);
            sleep(self.config.pause()).await;
        }

        let summary = RunSummary::from_results(results);
        summary.print(&self.logger);

        if let Some(path) = &self.config.report_file {
            RunReport::new(&self.config.base_url, summary.clone()).save_to_file(path).await?;
            self.logger.info(&format!("Report saved to {}", path.display()));
        }

        Ok(summary)
    }

    /// Runs the first scenario whose name contains `query`. A miss is not an
    /// error; the known names are listed as a diagnostic aid.
    pub async fn run_one(&self, query: &str) -> Result<Option<ScenarioResult>> {
        match self.scenarios.find_by_name_substring(query) {
            Some(scenario) => {
                self.logger.header(&format!("RUNNING SCENARIO: {}", scenario.name));
                let result = self.executor.execute(scenario, &self.subjects, &self.logger).await?;
                Ok(Some(result))
            }
            None => {
                self.logger.error(&format!("No scenario name contains '{query}'"));
                self.logger.info("Available scenarios:");
                for scenario in self.scenarios.iter() {
                    self.logger.info(&format!("- {}", scenario.name));
                }
                Ok(None)
            }
        }
    }

    pub fn list(&self) {
        self.logger.header("AVAILABLE SCENARIOS");
        for (index, scenario) in self.scenarios.iter().enumerate() {
            self.logger.plain(&format!("{}. {}", index + 1, scenario.name));
            self.logger.info(&format!("   {}", scenario.description));
        }
    }
}
