use crate::utils::secret::SecretString;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Status code the registrar uses for "command completed successfully".
pub const SUCCESS_CODE: i64 = 1000;

/// `account.logout` answers with this instead of `SUCCESS_CODE`.
pub const SESSION_ENDED_CODE: i64 = 1500;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Authenticated registrar session. Consumed when the session is closed.
#[derive(Debug)]
pub struct Session {
    token: SecretString,
}

impl Session {
    pub fn new(token: impl Into<SecretString>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Contact handle as the registrar returns it. Kept as raw JSON so it is
/// sent back unchanged, whether it came as a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(serde_json::Value);

impl ContactId {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountDefaults {
    #[serde(rename = "defaultRegistrant")]
    pub registrant: ContactId,
    #[serde(rename = "defaultAdmin")]
    pub admin: ContactId,
    #[serde(rename = "defaultTech")]
    pub tech: ContactId,
    #[serde(rename = "defaultBilling")]
    pub billing: ContactId,
}

pub type CandidateDomain = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nameservers {
    pub primary: String,
    pub secondary: String,
}

impl Nameservers {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    pub fn as_list(&self) -> [&str; 2] {
        [&self.primary, &self.secondary]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    pub domain: String,
    pub registrant: ContactId,
    pub admin: ContactId,
    pub tech: ContactId,
    pub billing: ContactId,
    pub nameservers: Nameservers,
}

impl PurchaseRequest {
    pub fn new(domain: &str, defaults: &AccountDefaults, nameservers: &Nameservers) -> Self {
        Self {
            domain: domain.to_string(),
            registrant: defaults.registrant.clone(),
            admin: defaults.admin.clone(),
            tech: defaults.tech.clone(),
            billing: defaults.billing.clone(),
            nameservers: nameservers.clone(),
        }
    }

    /// `domain.create` parameters.
    pub fn to_params(&self) -> serde_json::Value {
        serde_json::json!({
            "domain": self.domain,
            "registrant": self.registrant,
            "admin": self.admin,
            "tech": self.tech,
            "billing": self.billing,
            "ns": self.nameservers.as_list(),
        })
    }
}

/// One entry of the `domain.check` result list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DomainAvailability {
    pub domain: String,
    #[serde(deserialize_with = "flag_from_bool_or_int")]
    pub avail: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DomainCheckData {
    #[serde(default)]
    pub domain: Vec<DomainAvailability>,
}

// The registrar sends availability as either `true`/`false` or `1`/`0`.
fn flag_from_bool_or_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

/// Status envelope shared by every registrar reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "Command completed successfully".to_string(),
            data: Some(data),
        }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub checked: usize,
    pub available: usize,
    pub purchased: usize,
    pub purchase_failed: usize,
    pub check_failed: usize,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            checked: 0,
            available: 0,
            purchased: 0,
            purchase_failed: 0,
            check_failed: 0,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock length of the run; zero until `finish` is called.
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .map_or(Duration::zero(), |finished| finished - self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_accepts_int_and_bool() {
        let data: DomainCheckData = serde_json::from_value(serde_json::json!({
            "domain": [
                {"domain": "a.example", "avail": 1, "status": "free"},
                {"domain": "b.example", "avail": false}
            ]
        }))
        .unwrap();
        assert!(data.domain[0].avail);
        assert!(!data.domain[1].avail);
    }

    #[test]
    fn test_purchase_params_keep_contact_ids_verbatim() {
        let defaults: AccountDefaults = serde_json::from_value(serde_json::json!({
            "defaultRegistrant": 101,
            "defaultAdmin": "102",
            "defaultTech": 103,
            "defaultBilling": 104,
            "email": "owner@example.com"
        }))
        .unwrap();
        let ns = Nameservers::new("ns.inwx.de", "ns2.inwx.de");
        let request = PurchaseRequest::new("new.example", &defaults, &ns);

        assert_eq!(
            request.to_params(),
            serde_json::json!({
                "domain": "new.example",
                "registrant": 101,
                "admin": "102",
                "tech": 103,
                "billing": 104,
                "ns": ["ns.inwx.de", "ns2.inwx.de"]
            })
        );
        assert_eq!(request.admin.to_string(), "102");
    }

    #[test]
    fn test_elapsed_is_measured_between_start_and_finish() {
        let mut summary = RunSummary::start();
        assert_eq!(summary.elapsed(), Duration::zero());

        summary.finish();
        let finished = summary.finished_at.unwrap();
        assert!(finished >= summary.started_at);
        assert_eq!(summary.elapsed(), finished - summary.started_at);
    }
}
