//! One function per remote step of a run. Each takes the registrar and the
//! session explicitly, so any `RegistrarApi` can stand in for INWX.

use crate::domain::model::{
    AccountDefaults, Credentials, PurchaseRequest, Session, SESSION_ENDED_CODE,
};
use crate::domain::ports::RegistrarApi;
use crate::utils::error::{BuyerError, Result};

pub async fn login<A: RegistrarApi + ?Sized>(api: &A, credentials: &Credentials) -> Result<Session> {
    let response = api.login(credentials).await?;
    if !response.is_success() {
        let err = BuyerError::AuthenticationError {
            code: response.code,
            message: response.message,
        };
        tracing::error!("{}", err);
        return Err(err);
    }

    let session = response
        .data
        .ok_or_else(|| BuyerError::protocol("account.login", "success reply without a session"))?;
    tracing::info!("Login successful.");
    Ok(session)
}

pub async fn get_account_info<A: RegistrarApi + ?Sized>(
    api: &A,
    session: &Session,
) -> Result<AccountDefaults> {
    let response = api.account_info(session).await?;
    if !response.is_success() {
        let err = BuyerError::AccountInfoError {
            code: response.code,
            message: response.message,
        };
        tracing::error!("{}", err);
        return Err(err);
    }

    let defaults = response
        .data
        .ok_or_else(|| BuyerError::protocol("account.info", "success reply without account data"))?;
    tracing::info!("Account info retrieved successfully.");
    tracing::debug!(
        "Defaults: registrant={}, admin={}, tech={}, billing={}",
        defaults.registrant,
        defaults.admin,
        defaults.tech,
        defaults.billing
    );
    Ok(defaults)
}

/// Availability of exactly one domain, read from the first result entry.
pub async fn is_domain_free<A: RegistrarApi + ?Sized>(
    api: &A,
    session: &Session,
    domain: &str,
) -> Result<bool> {
    let response = api.check_domain(session, domain).await?;
    if !response.is_success() {
        let err = BuyerError::DomainCheckError {
            domain: domain.to_string(),
            code: response.code,
            message: response.message,
        };
        tracing::error!("{}", err);
        return Err(err);
    }

    let available = response
        .data
        .and_then(|data| data.domain.into_iter().next())
        .map(|entry| entry.avail)
        .ok_or_else(|| BuyerError::protocol("domain.check", "no per-domain result"))?;

    if available {
        tracing::info!("Domain {} is available.", domain);
    } else {
        tracing::info!("Domain {} is not available.", domain);
    }
    Ok(available)
}

/// Never fails: a rejected or interrupted purchase is logged and reported
/// as `false` so the batch can move on.
pub async fn buy_domain<A: RegistrarApi + ?Sized>(
    api: &A,
    session: &Session,
    request: &PurchaseRequest,
) -> bool {
    match api.create_domain(session, request).await {
        Ok(response) if response.is_success() => {
            tracing::info!("Domain {} purchased successfully.", request.domain);
            true
        }
        Ok(response) => {
            let rejection = BuyerError::PurchaseRejected {
                domain: request.domain.clone(),
                code: response.code,
                message: response.message,
            };
            tracing::error!("{}", rejection);
            false
        }
        Err(e) => {
            tracing::error!("Failed to purchase domain {}. {}", request.domain, e);
            false
        }
    }
}

/// Releases the session. A non-success logout code is only a warning: by
/// the time we log out every candidate has been handled.
pub async fn close_session<A: RegistrarApi + ?Sized>(api: &A, session: Session) -> Result<()> {
    let response = api.logout(session).await?;
    if response.is_success() || response.code == SESSION_ENDED_CODE {
        tracing::info!("Logout successful.");
    } else {
        tracing::warn!(
            "Logout returned code {}, message: {}",
            response.code,
            response.message
        );
    }
    Ok(())
}
