use crate::adapters::inwx::{LIVE_API_URL, OTE_API_URL};
use crate::core::runner::{CheckFailurePolicy, RunSettings};
use crate::domain::model::{Credentials, Nameservers};
use crate::utils::error::Result;
use crate::utils::secret::SecretString;
use crate::utils::validation::{
    validate_at_least, validate_path, validate_required, validate_url, Validate,
};
use clap::Parser;
use std::time::Duration;

/// Every option can also come from the environment or a `.env` file.
/// Required values are optional here so that a missing one surfaces as a
/// configuration error from `validate` instead of a clap usage error.
#[derive(Debug, Clone, Parser)]
#[command(name = "domain-buyer", version)]
#[command(about = "Check candidate domains at INWX and buy the ones that are free")]
pub struct CliConfig {
    #[arg(long, env = "INWX_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "INWX_PASSWORD", hide_env_values = true)]
    pub password: Option<SecretString>,

    #[arg(long, env = "INWX_NS1", help = "Primary nameserver for purchased domains")]
    pub ns1: Option<String>,

    #[arg(long, env = "INWX_NS2", help = "Secondary nameserver for purchased domains")]
    pub ns2: Option<String>,

    #[arg(long, env = "DOMAINS_FILE", default_value = "domains.txt")]
    pub domains_file: String,

    #[arg(long, env = "LOG_FILE", default_value = "log.txt")]
    pub log_file: String,

    #[arg(long, env = "INWX_API_URL", default_value = LIVE_API_URL)]
    pub api_url: String,

    #[arg(long, help = "Use the OTE test environment instead of --api-url")]
    pub ote: bool,

    #[arg(long, env = "INWX_LANG", default_value = "en")]
    pub lang: String,

    #[arg(long, env = "INWX_TIMEOUT_SECS", help = "Per-request timeout; none by default")]
    pub timeout_secs: Option<u64>,

    #[arg(long, value_enum, default_value_t = CheckFailurePolicy::Abort)]
    pub on_check_error: CheckFailurePolicy,

    #[arg(long, help = "Only check availability, never purchase")]
    pub check_only: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn endpoint(&self) -> &str {
        if self.ote {
            OTE_API_URL
        } else {
            &self.api_url
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let username = validate_required("username", self.username.as_deref())?;
        let password = validate_required(
            "password",
            self.password.as_ref().map(SecretString::expose_secret),
        )?;
        Ok(Credentials::new(username, password))
    }

    pub fn nameservers(&self) -> Result<Nameservers> {
        let primary = validate_required("ns1", self.ns1.as_deref())?;
        let secondary = validate_required("ns2", self.ns2.as_deref())?;
        Ok(Nameservers::new(primary, secondary))
    }

    pub fn run_settings(&self) -> Result<RunSettings> {
        Ok(RunSettings {
            credentials: self.credentials()?,
            nameservers: self.nameservers()?,
            on_check_error: self.on_check_error,
            check_only: self.check_only,
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.credentials()?;
        self.nameservers()?;
        validate_url("api_url", self.endpoint())?;
        validate_path("domains_file", &self.domains_file)?;
        validate_path("log_file", &self.log_file)?;
        if let Some(secs) = self.timeout_secs {
            validate_at_least("timeout_secs", secs, 1)?;
        }
        Ok(())
    }
}
