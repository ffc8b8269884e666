//! Authorization Policy Exercise Harness
//!
//! Drives a running banking-style API with signed bearer tokens and compares
//! the observed HTTP status codes against a declarative scenario table
//! covering role restrictions, the transfer amount ceiling, and
//! credential-level negatives (expired and tampered tokens).

pub mod config;
pub mod credentials;
pub mod error;
pub mod executor;
pub mod logging;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod subjects;

pub use config::HarnessConfig;
pub use credentials::{CredentialSynthesizer, TokenOverrides};
pub use error::{HarnessError, Result};
pub use executor::{ScenarioExecutor, ScenarioResult, NO_RESPONSE};
pub use logging::RunLogger;
pub use report::{RunReport, RunSummary};
pub use runner::Runner;
pub use scenarios::{Scenario, ScenarioRegistry, CLIENT_TRANSFER_CEILING};
pub use subjects::{AccountType, Subject, SubjectRegistry};
