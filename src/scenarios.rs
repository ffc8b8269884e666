//! Declarative scenario table
//!
//! Each scenario describes one request against the account policy and the
//! status code a correctly configured service must answer with. Expected
//! rejections (401/403) are pass conditions, not failures.

use serde_json::{json, Value};

use crate::config::HarnessConfig;
use crate::credentials::TokenOverrides;
use crate::error::{HarnessError, Result};
use crate::subjects::SubjectRegistry;

/// Transfers above this amount are denied to ordinary clients. The boundary
/// value itself is still permitted.
pub const CLIENT_TRANSFER_CEILING: u64 = 100_000_000;

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub method: String,
    pub endpoint: String,
    pub subject: String,
    pub body: Option<Value>,
    pub overrides: TokenOverrides,
    pub expected_status: u16,
    pub description: String,
}

impl Scenario {
    pub fn new(
        name: &str,
        method: &str,
        endpoint: &str,
        subject: &str,
        expected_status: u16,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            subject: subject.to_string(),
            body: None,
            overrides: TokenOverrides::default(),
            expected_status,
            description: description.to_string(),
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_overrides(mut self, overrides: TokenOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
}

impl ScenarioRegistry {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// The fixed exercise suite for the account policy: read access for every
    /// role, the update/create role restrictions, the transfer amount
    /// ceiling with its boundary, and the two credential-level negatives.
    pub fn builtin(config: &HarnessConfig) -> Self {
        let transfer = |amount: u64| json!({ "amount": amount });

        let scenarios = vec![
            Scenario::new(
                "READ Account - Client Role",
                "GET",
                "/accounts/acc001",
                "client",
                200,
                "Clients can read their account; read is open to every role",
            ),
            Scenario::new(
                "READ Account - Teller Role",
                "GET",
                "/accounts/acc001",
                "teller",
                200,
                "Tellers can read accounts",
            ),
            Scenario::new(
                "READ Account - Supervisor Role",
                "GET",
                "/accounts/acc001",
                "supervisor",
                200,
                "Supervisors can read accounts",
            ),
            Scenario::new(
                "READ Account - Admin Role",
                "GET",
                "/accounts/acc001",
                "admin",
                200,
                "Admins can read accounts",
            ),
            Scenario::new(
                "UPDATE Account - Client Role (Should Fail)",
                "PATCH",
                "/accounts/acc001",
                "client",
                403,
                "Updates are restricted to tellers and admins",
            ),
            Scenario::new(
                "UPDATE Account - Teller Role",
                "PATCH",
                "/accounts/acc001",
                "teller",
                200,
                "Tellers can update accounts",
            ),
            Scenario::new(
                "UPDATE Account - Admin Role",
                "PATCH",
                "/accounts/acc001",
                "admin",
                200,
                "Admins can update accounts",
            ),
            Scenario::new(
                "CREATE Account - Client Role (Should Fail)",
                "POST",
                "/accounts/new",
                "client",
                403,
                "Account creation is restricted to admins",
            ),
            Scenario::new(
                "CREATE Account - Teller Role (Should Fail)",
                "POST",
                "/accounts/new",
                "teller",
                403,
                "Account creation is restricted to admins",
            ),
            Scenario::new(
                "CREATE Account - Admin Role",
                "POST",
                "/accounts/new",
                "admin",
                200,
                "Admins can create accounts",
            ),
            Scenario::new(
                "TRANSFER - Client with Small Amount",
                "POST",
                "/accounts/acc001/transfer",
                "client",
                200,
                "Clients can transfer amounts below the ceiling",
            )
            .with_body(transfer(50_000_000)),
            Scenario::new(
                "TRANSFER - Client with Large Amount (Should Fail)",
                "POST",
                "/accounts/acc001/transfer",
                "client",
                403,
                "Clients cannot transfer amounts above the ceiling",
            )
            .with_body(transfer(150_000_000)),
            Scenario::new(
                "TRANSFER - Client with Exact Limit",
                "POST",
                "/accounts/acc001/transfer",
                "client",
                200,
                "The ceiling is inclusive; transferring exactly the limit is allowed",
            )
            .with_body(transfer(CLIENT_TRANSFER_CEILING)),
            Scenario::new(
                "TRANSFER - VIP Client with Large Amount",
                "POST",
                "/accounts/acc002/transfer",
                "vip_client",
                200,
                "VIP clients are exempt from the transfer ceiling",
            )
            .with_body(transfer(1_500_000_000)),
            Scenario::new(
                "TRANSFER - Teller Role (Should Fail)",
                "POST",
                "/accounts/acc001/transfer",
                "teller",
                403,
                "Only client roles can transfer",
            )
            .with_body(transfer(50_000_000)),
            Scenario::new(
                "TRANSFER - Admin Role (Should Fail)",
                "POST",
                "/accounts/acc001/transfer",
                "admin",
                403,
                "Only client roles can transfer",
            )
            .with_body(transfer(50_000_000)),
            Scenario::new(
                "READ Account - Expired Token (Should Fail)",
                "GET",
                "/accounts/acc001",
                "client",
                401,
                "A token whose validity window has elapsed must be rejected",
            )
            .with_overrides(TokenOverrides {
                expires_in: Some("-10s".to_string()),
                ..Default::default()
            }),
            Scenario::new(
                "READ Account - Tampered Signature (Should Fail)",
                "GET",
                "/accounts/acc001",
                "client",
                401,
                "A token signed with the wrong key must be rejected",
            )
            .with_overrides(TokenOverrides {
                secret: Some(config.tamper_secret.clone()),
                ..Default::default()
            }),
        ];

        Self { scenarios }
    }

    /// Every subject reference must resolve before anything executes; a miss
    /// is a defect in the table, not in the service under test.
    pub fn validate(&self, subjects: &SubjectRegistry) -> Result<()> {
        for scenario in &self.scenarios {
            if subjects.resolve(&scenario.subject).is_none() {
                return Err(HarnessError::UnknownSubject {
                    subject: scenario.subject.clone(),
                    scenario: scenario.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Case-insensitive substring match over scenario names, first hit wins.
    pub fn find_by_name_substring(&self, query: &str) -> Option<&Scenario> {
        let needle = query.to_lowercase();
        self.scenarios.iter().find(|s| s.name.to_lowercase().contains(&needle))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ScenarioRegistry {
        ScenarioRegistry::builtin(&HarnessConfig::default())
    }

    #[test]
    fn builtin_table_references_only_known_subjects() {
        assert!(registry().validate(&SubjectRegistry::builtin()).is_ok());
    }

    #[test]
    fn builtin_table_covers_the_policy_surface() {
        let registry = registry();
        assert_eq!(registry.len(), 18);

        // Read is open to every role.
        let reads =
            registry.iter().filter(|s| s.method == "GET" && s.expected_status == 200).count();
        assert_eq!(reads, 4);

        // Both credential negatives expect an authentication rejection.
        let unauthenticated = registry.iter().filter(|s| s.expected_status == 401).count();
        assert_eq!(unauthenticated, 2);
    }

    #[test]
    fn transfer_ceiling_boundary_is_inclusive() {
        let registry = registry();

        let exact = registry.find_by_name_substring("exact limit").unwrap();
        assert_eq!(exact.expected_status, 200);
        assert_eq!(exact.body.as_ref().unwrap()["amount"], CLIENT_TRANSFER_CEILING);

        let above = registry.find_by_name_substring("large amount (should fail)").unwrap();
        assert_eq!(above.expected_status, 403);
        assert!(above.body.as_ref().unwrap()["amount"].as_u64().unwrap() > CLIENT_TRANSFER_CEILING);
    }

    #[test]
    fn lookup_is_case_insensitive_and_first_match_wins() {
        let registry = registry();

        let hit = registry.find_by_name_substring("EXPIRED").unwrap();
        assert_eq!(hit.name, "READ Account - Expired Token (Should Fail)");

        // "READ Account" prefixes four scenarios; declaration order decides.
        let first = registry.find_by_name_substring("read account").unwrap();
        assert_eq!(first.name, "READ Account - Client Role");

        assert!(registry.find_by_name_substring("nonexistent-name").is_none());
    }

    #[test]
    fn validation_rejects_unknown_subject_references() {
        let registry = ScenarioRegistry::new(vec![Scenario::new(
            "READ Account - Ghost Role",
            "GET",
            "/accounts/acc001",
            "ghost",
            200,
            "",
        )]);

        let err = registry.validate(&SubjectRegistry::builtin()).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::UnknownSubject { ref subject, .. } if subject == "ghost"
        ));
    }

    #[test]
    fn negative_scenarios_carry_credential_overrides() {
        let registry = registry();

        let expired = registry.find_by_name_substring("expired token").unwrap();
        assert_eq!(expired.overrides.expires_in.as_deref(), Some("-10s"));

        let tampered = registry.find_by_name_substring("tampered signature").unwrap();
        assert!(tampered.overrides.secret.is_some());
    }
}
