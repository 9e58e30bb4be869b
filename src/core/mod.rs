pub mod access;
pub mod catalog;
pub mod exchange;
pub mod validator;

pub use crate::domain::model::{
    Ad, AdId, Direction, ExchangeProposal, ProposalId, ProposalStatus, UserId,
};
pub use crate::domain::ports::{AdCatalog, AdRepository, ProposalStore};
pub use crate::utils::error::Result;
