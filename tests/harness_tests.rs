//! End-to-end harness tests
//!
//! These run against an unreachable target on purpose: transport failures
//! must be captured as a sentinel outcome and compared like any other
//! status, never raised. Tests that need a live policy service live in the
//! deployment's own pipeline, not here.

use authz_exercises::{
    HarnessConfig, HarnessError, RunLogger, Runner, Scenario, ScenarioExecutor, SubjectRegistry,
    NO_RESPONSE,
};

/// Port 9 (discard) is reliably refused on loopback.
fn offline_config(dir: &tempfile::TempDir) -> HarnessConfig {
    HarnessConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        pause_ms: 0,
        log_file: dir.path().join("run.log"),
        report_file: Some(dir.path().join("report.json")),
        ..Default::default()
    }
}

#[tokio::test]
async fn transport_failure_becomes_a_failed_result_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Runner::new(offline_config(&dir)).await.unwrap();

    let result = runner.run_one("client role").await.unwrap().expect("scenario exists");
    assert!(!result.passed);
    assert_eq!(result.observed_status, None);
    assert_eq!(result.expected_status, 200);
    assert!(result.reason.as_deref().unwrap().contains(NO_RESPONSE));
}

#[tokio::test]
async fn expected_rejection_requires_the_exact_status_not_any_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Runner::new(offline_config(&dir)).await.unwrap();

    // The tampered-signature scenario expects 401. No response at all is
    // still a mismatch, not a pass.
    let result = runner.run_one("tampered").await.unwrap().expect("scenario exists");
    assert!(!result.passed);
    assert_eq!(result.expected_status, 401);
    assert!(result.reason.as_deref().unwrap().contains("401"));
}

#[tokio::test]
async fn run_one_with_unknown_query_returns_none_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Runner::new(offline_config(&dir)).await.unwrap();

    let outcome = runner.run_one("nonexistent-name").await.unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn run_all_preserves_declaration_order_and_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = offline_config(&dir);
    let runner = Runner::new(config.clone()).await.unwrap();

    let summary = runner.run_all().await.unwrap();
    assert_eq!(summary.total, 18);
    assert_eq!(summary.passed, 0);
    assert_eq!(summary.failed, 18);
    assert_eq!(summary.results[0].scenario, "READ Account - Client Role");
    assert_eq!(
        summary.results.last().unwrap().scenario,
        "READ Account - Tampered Signature (Should Fail)"
    );

    let log = std::fs::read_to_string(&config.log_file).unwrap();
    assert!(log.contains("RUN SUMMARY"));
    assert!(log.contains("FAILED - expected 200, got NO_RESPONSE"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(config.report_file.unwrap()).unwrap())
            .unwrap();
    assert_eq!(report["summary"]["total"], 18);
    assert_eq!(report["target_url"], "http://127.0.0.1:9");
}

#[tokio::test]
async fn unresolved_subject_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = offline_config(&dir);
    let logger = RunLogger::console_only();
    let executor = ScenarioExecutor::new(&config, &logger).await.unwrap();

    let ghost = Scenario::new(
        "READ Account - Ghost Role",
        "GET",
        "/accounts/acc001",
        "ghost",
        200,
        "",
    );
    let err = executor.execute(&ghost, &SubjectRegistry::builtin(), &logger).await.unwrap_err();
    assert!(matches!(err, HarnessError::UnknownSubject { ref subject, .. } if subject == "ghost"));
}

#[tokio::test]
async fn unsupported_method_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = offline_config(&dir);
    let logger = RunLogger::console_only();
    let executor = ScenarioExecutor::new(&config, &logger).await.unwrap();

    let bad = Scenario::new("TRACE probe", "TRACE", "/accounts/acc001", "client", 200, "");
    let err = executor.execute(&bad, &SubjectRegistry::builtin(), &logger).await.unwrap_err();
    assert!(matches!(err, HarnessError::Configuration(_)));
}
