//! Test identities the scenarios act as.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Normal,
    Vip,
}

/// A named test identity with its role set and account binding. Defined once
/// at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub sub: String,
    pub name: String,
    pub roles: Vec<String>,
    pub account_id: String,
    pub account_type: AccountType,
}

pub struct SubjectRegistry {
    subjects: Vec<(String, Subject)>,
}

impl SubjectRegistry {
    /// The identity table the scenario suite is written against: one subject
    /// per role the account policy distinguishes.
    pub fn builtin() -> Self {
        let subjects = vec![
            (
                "client".to_string(),
                subject("mb000001", "Nguyen Van Anh", &["client"], "acc001", AccountType::Normal),
            ),
            (
                "vip_client".to_string(),
                subject("mb000002", "Dao Van Binh", &["vip_client"], "acc002", AccountType::Vip),
            ),
            (
                "teller".to_string(),
                subject("teller001", "Teller User", &["teller"], "acc001", AccountType::Normal),
            ),
            (
                "supervisor".to_string(),
                subject(
                    "supervisor001",
                    "Supervisor User",
                    &["supervisor"],
                    "acc001",
                    AccountType::Normal,
                ),
            ),
            (
                "admin".to_string(),
                subject("admin001", "Admin User", &["admin"], "acc001", AccountType::Normal),
            ),
        ];

        Self { subjects }
    }

    pub fn resolve(&self, key: &str) -> Option<&Subject> {
        self.subjects.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

fn subject(
    sub: &str,
    name: &str,
    roles: &[&str],
    account_id: &str,
    account_type: AccountType,
) -> Subject {
    Subject {
        sub: sub.to_string(),
        name: name.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        account_id: account_id.to_string(),
        account_type,
    }
}
