use crate::domain::model::{AdId, ProposalId, ProposalStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Ad {id} not found")]
    AdNotFound { id: AdId },

    #[error("Cannot propose exchanging an ad for itself")]
    SelfProposal,

    #[error("Cannot propose an exchange between two ads of the same owner")]
    SameOwner,

    #[error("Acting user does not own the sender ad")]
    Forbidden,

    #[error("A proposal for this ad pair already exists")]
    DuplicatePair,

    #[error("Proposal {id} not found")]
    NotFound { id: ProposalId },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ProposalStatus,
        to: ProposalStatus,
    },

    #[error("Backing service unavailable: {message}")]
    Unavailable { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Catalog request failed: {0}")]
    CatalogRequestError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl ExchangeError {
    /// Domain rejections are caller-facing and recoverable; everything else is
    /// infrastructure and may warrant retries at the transport layer.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ExchangeError::AdNotFound { .. }
                | ExchangeError::SelfProposal
                | ExchangeError::SameOwner
                | ExchangeError::Forbidden
                | ExchangeError::DuplicatePair
                | ExchangeError::NotFound { .. }
                | ExchangeError::InvalidTransition { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
