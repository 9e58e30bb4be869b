use crate::domain::model::{
    Ad, AdDraft, AdFilter, AdId, Direction, ExchangeProposal, ProposalDraft, ProposalId,
    ProposalStatus, UserId,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read side of the ad catalog. This is all the proposal lifecycle ever needs.
#[async_trait]
pub trait AdCatalog: Send + Sync {
    async fn ad_by_id(&self, id: AdId) -> Result<Option<Ad>>;
    async fn ads_by_owner(&self, owner: UserId) -> Result<Vec<Ad>>;
    async fn browse(&self, filter: &AdFilter) -> Result<Vec<Ad>>;
}

/// Full catalog surface; only backends that own the data implement this.
#[async_trait]
pub trait AdRepository: AdCatalog {
    async fn insert_ad(&self, owner: UserId, draft: AdDraft) -> Result<Ad>;
    /// Replaces the editable fields, keeping owner and created_at. `AdNotFound` if absent.
    async fn replace_ad(&self, id: AdId, draft: AdDraft) -> Result<Ad>;
    async fn delete_ad(&self, id: AdId) -> Result<()>;
}

#[async_trait]
pub trait ProposalStore: Send + Sync {
    /// True iff a proposal with this exact ordered pair exists, regardless of status.
    async fn exists_by_pair(&self, sender: AdId, receiver: AdId) -> Result<bool>;
    /// Pair check and insert are one atomic step; `DuplicatePair` on conflict.
    async fn insert(&self, draft: ProposalDraft) -> Result<ExchangeProposal>;
    async fn proposal_by_id(&self, id: ProposalId) -> Result<Option<ExchangeProposal>>;
    /// Conditional update: only a pending proposal moves, and only to a terminal status.
    async fn update_status(&self, id: ProposalId, status: ProposalStatus) -> Result<()>;
    async fn list_by_filter(
        &self,
        direction: Direction,
        user: UserId,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<ExchangeProposal>>;
}
