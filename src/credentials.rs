//! Credential synthesis
//!
//! Builds the signed bearer tokens the scenarios present to the service
//! under test. Overrides let a scenario sign with the wrong key or backdate
//! the validity window to provoke a rejection.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::subjects::{AccountType, Subject};

/// Per-scenario deviations from normal signing.
#[derive(Debug, Clone, Default)]
pub struct TokenOverrides {
    /// Sign with this key instead of the configured one.
    pub secret: Option<String>,
    /// Relative expiry directive, e.g. `"15m"` or `"-10s"`. Negative values
    /// produce a token that is already expired.
    pub expires_in: Option<String>,
}

impl TokenOverrides {
    pub fn is_empty(&self) -> bool {
        self.secret.is_none() && self.expires_in.is_none()
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    sub: &'a str,
    name: &'a str,
    roles: &'a [String],
    account_id: &'a str,
    account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

pub struct CredentialSynthesizer {
    default_secret: String,
}

impl CredentialSynthesizer {
    pub fn new(default_secret: impl Into<String>) -> Self {
        Self { default_secret: default_secret.into() }
    }

    /// Signs the subject's claims into an HS256 token. Tokens carry no `exp`
    /// unless the overrides request one.
    pub fn synthesize(&self, subject: &Subject, overrides: &TokenOverrides) -> Result<String> {
        let exp = match &overrides.expires_in {
            Some(directive) => {
                Some((Utc::now() + parse_expiry_directive(directive)?).timestamp())
            }
            None => None,
        };

        let claims = Claims {
            sub: &subject.sub,
            name: &subject.name,
            roles: &subject.roles,
            account_id: &subject.account_id,
            account_type: subject.account_type,
            exp,
        };

        let secret = overrides.secret.as_deref().unwrap_or(&self.default_secret);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;

        Ok(token)
    }
}

/// Parses `[-]<n><s|m|h|d>` relative expiry directives.
pub fn parse_expiry_directive(raw: &str) -> Result<Duration> {
    fn bad(raw: &str) -> HarnessError {
        HarnessError::BadDuration(raw.to_string())
    }

    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let unit = rest.chars().next_back().ok_or_else(|| bad(raw))?;
    let value: i64 =
        rest[..rest.len() - unit.len_utf8()].parse().map_err(|_| bad(raw))?;

    let seconds = match unit {
        's' => value,
        'm' => value * 60,
        'h' => value * 3_600,
        'd' => value * 86_400,
        _ => return Err(bad(raw)),
    };

    Ok(Duration::seconds(if negative { -seconds } else { seconds }))
}
