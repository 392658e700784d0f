use crate::core::stages;
use crate::domain::model::{Credentials, Nameservers, PurchaseRequest, RunSummary};
use crate::domain::ports::{DomainSource, RegistrarApi};
use crate::utils::error::{BuyerError, Result};
use crate::utils::validation::validate_domain_name;
use clap::ValueEnum;

/// Where a run is. `Failed` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Authenticated,
    DefaultsLoaded,
    Processing,
    Closed,
    Failed,
}

/// What to do when the registrar rejects an availability check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CheckFailurePolicy {
    /// Stop the batch; the session is not closed.
    #[default]
    Abort,
    /// Log, count, and continue with the next candidate.
    Skip,
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub credentials: Credentials,
    pub nameservers: Nameservers,
    pub on_check_error: CheckFailurePolicy,
    pub check_only: bool,
}

pub struct DomainBuyer<A: RegistrarApi, S: DomainSource> {
    api: A,
    source: S,
    settings: RunSettings,
    state: RunState,
}

impl<A: RegistrarApi, S: DomainSource> DomainBuyer<A, S> {
    pub fn new(api: A, source: S, settings: RunSettings) -> Self {
        Self {
            api,
            source,
            settings,
            state: RunState::Init,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::start();

        match self.drive(&mut summary).await {
            Ok(()) => {
                summary.finish();
                tracing::info!(
                    "Run finished in {} ms: {} checked, {} available, {} purchased, {} purchase failures, {} check failures",
                    summary.elapsed().num_milliseconds(),
                    summary.checked,
                    summary.available,
                    summary.purchased,
                    summary.purchase_failed,
                    summary.check_failed
                );
                Ok(summary)
            }
            Err(e) => {
                self.transition(RunState::Failed);
                // Remote rejections were already logged where they happened.
                if !logged_at_origin(&e) {
                    tracing::error!("An error occurred: {}", e);
                }
                Err(e)
            }
        }
    }

    async fn drive(&mut self, summary: &mut RunSummary) -> Result<()> {
        let session = stages::login(&self.api, &self.settings.credentials).await?;
        self.transition(RunState::Authenticated);

        // On failure the session is dropped without a logout call.
        let defaults = stages::get_account_info(&self.api, &session).await?;
        self.transition(RunState::DefaultsLoaded);

        let candidates = self.source.candidates().await?;
        self.transition(RunState::Processing);
        tracing::info!("Processing {} candidate domains", candidates.len());

        for domain in &candidates {
            if let Err(e) = validate_domain_name(domain) {
                tracing::warn!("Checking {:?} anyway: {}", domain, e);
            }

            let free = match stages::is_domain_free(&self.api, &session, domain).await {
                Ok(free) => free,
                Err(e) if self.settings.on_check_error == CheckFailurePolicy::Skip => {
                    if !logged_at_origin(&e) {
                        tracing::error!("Domain check for {} failed: {}", domain, e);
                    }
                    tracing::warn!("Skipping {}", domain);
                    summary.check_failed += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            summary.checked += 1;

            if !free {
                continue;
            }
            summary.available += 1;

            if self.settings.check_only {
                tracing::info!("Check-only mode, not purchasing {}", domain);
                continue;
            }

            let request = PurchaseRequest::new(domain, &defaults, &self.settings.nameservers);
            if stages::buy_domain(&self.api, &session, &request).await {
                summary.purchased += 1;
            } else {
                summary.purchase_failed += 1;
            }
        }

        stages::close_session(&self.api, session).await?;
        self.transition(RunState::Closed);
        Ok(())
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!("Run state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

fn logged_at_origin(err: &BuyerError) -> bool {
    matches!(
        err,
        BuyerError::AuthenticationError { .. }
            | BuyerError::AccountInfoError { .. }
            | BuyerError::DomainCheckError { .. }
    )
}
