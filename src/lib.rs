pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{domain_list::LocalDomainList, inwx::InwxClient};
pub use crate::config::CliConfig;
pub use crate::core::runner::{CheckFailurePolicy, DomainBuyer, RunSettings, RunState};
pub use crate::utils::error::{BuyerError, Result};
