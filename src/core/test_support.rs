//! In-memory registrar and log capture shared by the core unit tests.

use crate::domain::model::{
    AccountDefaults, ApiResponse, CandidateDomain, ContactId, Credentials, DomainAvailability,
    DomainCheckData, PurchaseRequest, Session,
};
use crate::domain::ports::{DomainSource, RegistrarApi};
use crate::utils::error::{BuyerError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    AccountInfo,
    Check(String),
    Create(String),
    Logout,
}

pub fn default_contacts() -> AccountDefaults {
    AccountDefaults {
        registrant: ContactId::new(1),
        admin: ContactId::new(2),
        tech: ContactId::new(3),
        billing: ContactId::new(4),
    }
}

/// Unknown domains are reported as taken.
#[derive(Default)]
pub struct FakeRegistrar {
    login_code: Option<i64>,
    account_code: Option<i64>,
    available: Vec<String>,
    check_failures: HashMap<String, i64>,
    purchase_rejections: HashMap<String, i64>,
    create_call_fails: bool,
    calls: Mutex<Vec<Call>>,
    requests: Mutex<Vec<PurchaseRequest>>,
}

impl FakeRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login_code(mut self, code: i64) -> Self {
        self.login_code = Some(code);
        self
    }

    pub fn with_account_code(mut self, code: i64) -> Self {
        self.account_code = Some(code);
        self
    }

    pub fn available(mut self, domain: &str) -> Self {
        self.available.push(domain.to_string());
        self
    }

    pub fn failing_check(mut self, domain: &str, code: i64) -> Self {
        self.check_failures.insert(domain.to_string(), code);
        self
    }

    pub fn rejecting_purchase(mut self, domain: &str, code: i64) -> Self {
        self.purchase_rejections.insert(domain.to_string(), code);
        self
    }

    pub fn failing_create_call(mut self) -> Self {
        self.create_call_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn purchase_requests(&self) -> Vec<PurchaseRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RegistrarApi for FakeRegistrar {
    async fn login(&self, credentials: &Credentials) -> Result<ApiResponse<Session>> {
        self.record(Call::Login(credentials.username.clone()));
        Ok(match self.login_code {
            Some(code) => ApiResponse::failure(code, "Authentication error"),
            None => ApiResponse::success(Session::new("fake-session")),
        })
    }

    async fn account_info(&self, _session: &Session) -> Result<ApiResponse<AccountDefaults>> {
        self.record(Call::AccountInfo);
        Ok(match self.account_code {
            Some(code) => ApiResponse::failure(code, "Account info unavailable"),
            None => ApiResponse::success(default_contacts()),
        })
    }

    async fn check_domain(
        &self,
        _session: &Session,
        domain: &str,
    ) -> Result<ApiResponse<DomainCheckData>> {
        self.record(Call::Check(domain.to_string()));
        if let Some(code) = self.check_failures.get(domain) {
            return Ok(ApiResponse::failure(*code, "Parameter value syntax error"));
        }
        Ok(ApiResponse::success(DomainCheckData {
            domain: vec![DomainAvailability {
                domain: domain.to_string(),
                avail: self.available.iter().any(|d| d == domain),
            }],
        }))
    }

    async fn create_domain(
        &self,
        _session: &Session,
        request: &PurchaseRequest,
    ) -> Result<ApiResponse<()>> {
        self.record(Call::Create(request.domain.clone()));
        self.requests.lock().unwrap().push(request.clone());
        if self.create_call_fails {
            return Err(BuyerError::protocol("domain.create", "connection reset"));
        }
        Ok(match self.purchase_rejections.get(&request.domain) {
            Some(code) => ApiResponse::failure(*code, "Object exists"),
            None => ApiResponse::success(()),
        })
    }

    async fn logout(&self, _session: Session) -> Result<ApiResponse<()>> {
        self.record(Call::Logout);
        Ok(ApiResponse::success(()))
    }
}

pub struct StaticDomains(pub Vec<CandidateDomain>);

impl StaticDomains {
    pub fn of(domains: &[&str]) -> Self {
        Self(domains.iter().map(|d| d.to_string()).collect())
    }
}

impl DomainSource for StaticDomains {
    async fn candidates(&self) -> Result<Vec<CandidateDomain>> {
        Ok(self.0.clone())
    }
}

/// Collects formatted log lines for the current thread while the guard
/// returned by `install` is alive.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of entries at `level` ("INFO", "WARN", "ERROR").
    pub fn count(&self, level: &str) -> usize {
        let marker = format!(" {} ", level);
        self.contents()
            .lines()
            .filter(|line| line.contains(&marker))
            .count()
    }
}
