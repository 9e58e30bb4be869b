pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::ExchangeConfig;

pub use adapters::http::HttpAdCatalog;
pub use adapters::local::{ExchangeState, LocalStateStorage};
pub use adapters::memory::{MemoryCatalog, MemoryProposalStore};
pub use crate::core::catalog::AdService;
pub use crate::core::exchange::ExchangeService;
pub use domain::model::{
    Ad, AdDraft, AdFilter, AdId, Category, Condition, Direction, ExchangeProposal, ProposalId,
    ProposalStatus, UserId,
};
pub use domain::ports::{AdCatalog, AdRepository, ProposalStore};
pub use utils::error::{ExchangeError, Result};
