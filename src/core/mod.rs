pub mod runner;
pub mod stages;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{
    AccountDefaults, ApiResponse, Credentials, Nameservers, PurchaseRequest, RunSummary, Session,
};
pub use crate::domain::ports::{DomainSource, RegistrarApi};
pub use crate::utils::error::Result;
