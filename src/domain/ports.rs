use crate::domain::model::{
    AccountDefaults, ApiResponse, CandidateDomain, Credentials, DomainCheckData, PurchaseRequest,
    Session,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The registrar operations a run needs.
///
/// `Err` is reserved for transport or decoding failures. A reply the
/// registrar rejected comes back as `Ok` with a non-success code, and the
/// caller decides whether that is fatal.
#[async_trait]
pub trait RegistrarApi: Send + Sync {
    /// `data` carries the session only when the code is success.
    async fn login(&self, credentials: &Credentials) -> Result<ApiResponse<Session>>;

    async fn account_info(&self, session: &Session) -> Result<ApiResponse<AccountDefaults>>;

    async fn check_domain(
        &self,
        session: &Session,
        domain: &str,
    ) -> Result<ApiResponse<DomainCheckData>>;

    async fn create_domain(
        &self,
        session: &Session,
        request: &PurchaseRequest,
    ) -> Result<ApiResponse<()>>;

    async fn logout(&self, session: Session) -> Result<ApiResponse<()>>;
}

/// Source of the ordered candidate list.
pub trait DomainSource: Send + Sync {
    fn candidates(&self) -> impl std::future::Future<Output = Result<Vec<CandidateDomain>>> + Send;
}
