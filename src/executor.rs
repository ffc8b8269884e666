//! Scenario execution
//!
//! Turns one scenario into a credential and a single HTTP request, then
//! classifies the observed status against the expectation. Transport
//! failures are captured as a sentinel status and compared like any other
//! outcome; only a broken subject reference is a hard error.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::HarnessConfig;
use crate::credentials::CredentialSynthesizer;
use crate::error::{HarnessError, Result};
use crate::logging::RunLogger;
use crate::scenarios::Scenario;
use crate::subjects::SubjectRegistry;

/// Rendered in place of a status code when the target never answered.
pub const NO_RESPONSE: &str = "NO_RESPONSE";

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub execution_id: String,
    pub scenario: String,
    pub passed: bool,
    /// Observed HTTP status; `None` when the transport failed outright.
    pub observed_status: Option<u16>,
    pub expected_status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub struct ScenarioExecutor {
    base_url: String,
    client: Client,
    synthesizer: CredentialSynthesizer,
}

impl ScenarioExecutor {
    /// Builds the HTTP client and probes the target once. An unreachable
    /// target is only a warning; the run proceeds and records failures.
    pub async fn new(config: &HarnessConfig, logger: &RunLogger) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        match client.get(&config.base_url).send().await {
            Ok(response) => {
                debug!("target {} answered probe with {}", config.base_url, response.status());
                logger.info(&format!("Target reachable: {}", config.base_url));
            }
            Err(err) => {
                warn!("target probe failed: {err}");
                logger.warn(&format!("Target {} not reachable: {err}", config.base_url));
            }
        }

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
            synthesizer: CredentialSynthesizer::new(config.signing_secret.clone()),
        })
    }

    pub async fn execute(
        &self,
        scenario: &Scenario,
        subjects: &SubjectRegistry,
        logger: &RunLogger,
    ) -> Result<ScenarioResult> {
        let subject = subjects.resolve(&scenario.subject).ok_or_else(|| {
            HarnessError::UnknownSubject {
                subject: scenario.subject.clone(),
                scenario: scenario.name.clone(),
            }
        })?;
        let execution_id = Uuid::new_v4().to_string();

        logger.subheader(&format!("Testing: {}", scenario.name));
        logger.info(&format!("Description: {}", scenario.description));
        logger.info(&format!("Subject: {} ({})", subject.name, subject.roles.join(", ")));
        logger.info(&format!("Request: {} {}", scenario.method, scenario.endpoint));
        if let Some(body) = &scenario.body {
            logger.info(&format!("Payload: {body}"));
        }

        let token = self.synthesizer.synthesize(subject, &scenario.overrides)?;
        let url = format!("{}{}", self.base_url, scenario.endpoint);
        debug!(%execution_id, "{} {url}", scenario.method);

        let mut request = match scenario.method.to_uppercase().as_str() {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            "PATCH" => self.client.patch(&url),
            other => {
                return Err(HarnessError::Configuration(format!(
                    "unsupported HTTP method '{other}' in scenario '{}'",
                    scenario.name
                )))
            }
        };
        request = request.header("Authorization", format!("Bearer {token}"));
        if let Some(body) = &scenario.body {
            request = request.json(body);
        }

        let (observed, response_body) = match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                (Some(status), body)
            }
            Err(err) => {
                warn!(%execution_id, "transport failure: {err}");
                (None, err.to_string())
            }
        };

        Ok(self.classify(scenario, execution_id, observed, &response_body, logger))
    }

    fn classify(
        &self,
        scenario: &Scenario,
        execution_id: String,
        observed: Option<u16>,
        response_body: &str,
        logger: &RunLogger,
    ) -> ScenarioResult {
        let observed_label =
            observed.map_or_else(|| NO_RESPONSE.to_string(), |status| status.to_string());

        let passed = observed == Some(scenario.expected_status);
        let reason = if passed {
            if scenario.expected_status >= 400 {
                logger.success(&format!("PASSED - status {observed_label} (expected rejection)"));
            } else {
                logger.success(&format!("PASSED - status {observed_label}"));
            }
            logger.info(&format!("Response: {response_body}"));
            None
        } else {
            logger.error(&format!(
                "FAILED - expected {}, got {observed_label}",
                scenario.expected_status
            ));
            logger.error(&format!("Response: {response_body}"));
            Some(format!("status mismatch: {observed_label} != {}", scenario.expected_status))
        };

        ScenarioResult {
            execution_id,
            scenario: scenario.name.clone(),
            passed,
            observed_status: observed,
            expected_status: scenario.expected_status,
            reason,
        }
    }
}
