//! Identity and deployment directory
//!
//! Stand-in for the engine's identity, living-application and process
//! definition stores. Loaded once at startup from a YAML file:
//!
//! ```yaml
//! users:
//!   - username: walter.bates
//!     password_sha256: "5e88...42d8"
//!     tenant_id: 1
//!     user_id: 4
//!     profiles: [User]
//!     permissions: [custompage_helloWorld]
//! applications:
//!   - id: "1"
//!     token: hr-portal
//!     profile: User
//!     pages: [helloWorld]
//! processes:
//!   - id: 2
//!     name: Support Ticket
//!     inputs:
//!       - { name: summary, type: TEXT }
//!       - { name: priority, type: INTEGER, optional: true }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::TenantId;

fn default_tenant() -> TenantId {
    1
}

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
    #[serde(default)]
    pub processes: Vec<ProcessRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Hex-encoded SHA-256 digest of the password.
    pub password_sha256: String,
    #[serde(default = "default_tenant")]
    pub tenant_id: TenantId,
    pub user_id: u64,
    #[serde(default)]
    pub profiles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl UserRecord {
    /// Plain (not constant-time) digest comparison; demo directory only.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password_sha256
            .eq_ignore_ascii_case(&password_digest(password))
    }
}

/// A living application: a set of pages exposed to one profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub token: String,
    #[serde(default = "default_tenant")]
    pub tenant_id: TenantId,
    pub profile: String,
    #[serde(default)]
    pub pages: Vec<String>,
}

impl ApplicationRecord {
    pub fn contains_page(&self, page_name: &str) -> bool {
        self.pages.iter().any(|p| p == page_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRecord {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_tenant")]
    pub tenant_id: TenantId,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub inputs: Vec<ContractInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractInput {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputType {
    Text,
    Integer,
    Decimal,
    Boolean,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Decimal => "DECIMAL",
            Self::Boolean => "BOOLEAN",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Decimal => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

impl ProcessRecord {
    /// Check `inputs` against the process contract.
    /// Returns one explanation per violated input; empty means valid.
    pub fn contract_violations(&self, inputs: &Map<String, Value>) -> Vec<String> {
        let mut explanations = Vec::new();
        for input in &self.inputs {
            match inputs.get(&input.name) {
                None | Some(Value::Null) if input.optional => {}
                None | Some(Value::Null) => {
                    explanations.push(format!("Expected input [{}] is missing", input.name));
                }
                Some(value) if !input.input_type.accepts(value) => {
                    explanations.push(format!(
                        "Input [{}] has wrong type: expected {}",
                        input.name,
                        input.input_type.as_str()
                    ));
                }
                Some(_) => {}
            }
        }
        explanations
    }
}

impl Directory {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read directory file {}", path.display()))?;
        Self::from_yaml(&raw)
            .with_context(|| format!("failed to parse directory file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn user(&self, tenant_id: TenantId, username: &str) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|u| u.tenant_id == tenant_id && u.username == username)
    }

    pub fn application(&self, tenant_id: TenantId, id: &str) -> Option<&ApplicationRecord> {
        self.applications
            .iter()
            .find(|a| a.tenant_id == tenant_id && a.id == id)
    }

    pub fn process(&self, tenant_id: TenantId, id: u64) -> Option<&ProcessRecord> {
        self.processes
            .iter()
            .find(|p| p.tenant_id == tenant_id && p.id == id)
    }
}

/// Hex SHA-256 digest used for stored passwords.
///
/// Unsalted and fast: this directory backs demos and tests, it is not
/// credential storage. Do not reuse it for real accounts.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"
users:
  - username: walter.bates
    password_sha256: "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
    user_id: 4
    profiles: [User]
    permissions: [custompage_helloWorld]
  - username: helen.kelly
    password_sha256: "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
    tenant_id: 2
    user_id: 7
applications:
  - id: "1"
    token: hr-portal
    profile: User
    pages: [helloWorld]
processes:
  - id: 2
    name: Support Ticket
    inputs:
      - { name: summary, type: TEXT }
      - { name: priority, type: INTEGER, optional: true }
  - id: 3
    name: Archived
    enabled: false
"#;

    fn sample() -> Directory {
        Directory::from_yaml(SAMPLE).unwrap()
    }

    #[test]
    fn parses_sample_with_defaults() {
        let dir = sample();
        assert_eq!(dir.users.len(), 2);
        assert_eq!(dir.users[0].tenant_id, 1);
        assert_eq!(dir.processes[0].version, "1.0");
        assert!(dir.processes[0].enabled);
        assert!(!dir.processes[1].enabled);
        assert_eq!(dir.processes[0].inputs[0].input_type, InputType::Text);
    }

    #[test]
    fn lookups_are_tenant_scoped() {
        let dir = sample();
        assert!(dir.user(1, "walter.bates").is_some());
        assert!(dir.user(2, "walter.bates").is_none());
        assert!(dir.user(2, "helen.kelly").is_some());
        assert!(dir.application(1, "1").is_some());
        assert!(dir.application(2, "1").is_none());
        assert!(dir.process(1, 2).is_some());
        assert!(dir.process(2, 2).is_none());
    }

    #[test]
    fn password_digest_matches_stored_hash() {
        let dir = sample();
        let walter = dir.user(1, "walter.bates").unwrap();
        assert!(walter.password_matches("password"));
        assert!(!walter.password_matches("Password"));
    }

    #[test]
    fn contract_accepts_valid_inputs() {
        let dir = sample();
        let process = dir.process(1, 2).unwrap();
        let inputs = json!({ "summary": "printer on fire", "priority": 2 });
        assert!(process
            .contract_violations(inputs.as_object().unwrap())
            .is_empty());
    }

    #[test]
    fn contract_reports_missing_and_mistyped_inputs() {
        let dir = sample();
        let process = dir.process(1, 2).unwrap();

        let missing = json!({});
        assert_eq!(
            process.contract_violations(missing.as_object().unwrap()),
            vec!["Expected input [summary] is missing".to_string()]
        );

        let mistyped = json!({ "summary": 12, "priority": "high" });
        assert_eq!(
            process.contract_violations(mistyped.as_object().unwrap()),
            vec![
                "Input [summary] has wrong type: expected TEXT".to_string(),
                "Input [priority] has wrong type: expected INTEGER".to_string(),
            ]
        );
    }

    #[test]
    fn optional_input_may_be_null() {
        let dir = sample();
        let process = dir.process(1, 2).unwrap();
        let inputs = json!({ "summary": "ok", "priority": null });
        assert!(process
            .contract_violations(inputs.as_object().unwrap())
            .is_empty());
    }
}
