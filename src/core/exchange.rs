use crate::core::{access, validator};
use crate::domain::model::{
    AdId, Direction, ExchangeProposal, ProposalDraft, ProposalId, ProposalStatus, UserId,
};
use crate::domain::ports::{AdCatalog, ProposalStore};
use crate::utils::error::{ExchangeError, Result};

/// Orchestrates the proposal lifecycle over an ad catalog and a proposal store.
///
/// The service holds no state of its own; every call reads fresh state through
/// the ports, and the store is responsible for the atomic parts.
pub struct ExchangeService<C: AdCatalog, S: ProposalStore> {
    catalog: C,
    store: S,
}

impl<C: AdCatalog, S: ProposalStore> ExchangeService<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self { catalog, store }
    }

    pub async fn create_proposal(
        &self,
        acting: UserId,
        sender_ad: AdId,
        receiver_ad: AdId,
        comment: Option<String>,
    ) -> Result<ProposalId> {
        tracing::debug!(
            "user {} proposing exchange: ad {} -> ad {}",
            acting,
            sender_ad,
            receiver_ad
        );

        let sender = self
            .catalog
            .ad_by_id(sender_ad)
            .await?
            .ok_or(ExchangeError::AdNotFound { id: sender_ad })?;
        let receiver = self
            .catalog
            .ad_by_id(receiver_ad)
            .await?
            .ok_or(ExchangeError::AdNotFound { id: receiver_ad })?;

        access::ensure_sender_owned(acting, &sender)?;
        validator::validate_pair(&sender, &receiver)?;

        let proposal = self
            .store
            .insert(ProposalDraft {
                sender_ad,
                receiver_ad,
                sender_owner: sender.owner,
                receiver_owner: receiver.owner,
                comment,
            })
            .await?;

        tracing::info!(
            "proposal {} created: ad {} -> ad {}",
            proposal.id,
            sender_ad,
            receiver_ad
        );
        Ok(proposal.id)
    }

    pub async fn update_status(
        &self,
        acting: UserId,
        id: ProposalId,
        decision: ProposalStatus,
    ) -> Result<()> {
        let proposal = self
            .store
            .proposal_by_id(id)
            .await?
            .ok_or(ExchangeError::NotFound { id })?;

        // Authorization runs against the catalog's current view of the receiver ad,
        // not the snapshot taken at creation. A vanished ad hides the proposal.
        let receiver = self
            .catalog
            .ad_by_id(proposal.receiver_ad)
            .await?
            .ok_or(ExchangeError::NotFound { id })?;

        access::ensure_receiver_owned(acting, id, &receiver)?;

        self.store.update_status(id, decision).await?;
        tracing::info!("proposal {} marked {}", id, decision);
        Ok(())
    }

    pub async fn list_proposals(
        &self,
        acting: UserId,
        direction: Direction,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<ExchangeProposal>> {
        self.store.list_by_filter(direction, acting, status).await
    }
}
