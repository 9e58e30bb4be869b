use crate::domain::model::{
    Ad, AdDraft, AdFilter, AdId, Direction, ExchangeProposal, ProposalDraft, ProposalId,
    ProposalStatus, UserId,
};
use crate::domain::ports::{AdCatalog, AdRepository, ProposalStore};
use crate::utils::error::{ExchangeError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory ad catalog. Clones share the same underlying state.
#[derive(Clone)]
pub struct MemoryCatalog {
    inner: Arc<Mutex<CatalogInner>>,
}

struct CatalogInner {
    ads: HashMap<AdId, Ad>,
    next_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub ads: Vec<Ad>,
    pub next_id: u64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::from_snapshot(CatalogSnapshot::default())
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let next_id = snapshot
            .next_id
            .max(snapshot.ads.iter().map(|ad| ad.id.0 + 1).max().unwrap_or(1))
            .max(1);
        let ads = snapshot.ads.into_iter().map(|ad| (ad.id, ad)).collect();
        Self {
            inner: Arc::new(Mutex::new(CatalogInner { ads, next_id })),
        }
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        let inner = self.inner.lock().await;
        let mut ads: Vec<Ad> = inner.ads.values().cloned().collect();
        ads.sort_by_key(|ad| ad.id);
        CatalogSnapshot {
            ads,
            next_id: inner.next_id,
        }
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(ads: &mut [Ad]) {
    ads.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl AdCatalog for MemoryCatalog {
    async fn ad_by_id(&self, id: AdId) -> Result<Option<Ad>> {
        let inner = self.inner.lock().await;
        Ok(inner.ads.get(&id).cloned())
    }

    async fn ads_by_owner(&self, owner: UserId) -> Result<Vec<Ad>> {
        let inner = self.inner.lock().await;
        let mut ads: Vec<Ad> = inner
            .ads
            .values()
            .filter(|ad| ad.owner == owner)
            .cloned()
            .collect();
        newest_first(&mut ads);
        Ok(ads)
    }

    async fn browse(&self, filter: &AdFilter) -> Result<Vec<Ad>> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let inner = self.inner.lock().await;
        let mut ads: Vec<Ad> = inner
            .ads
            .values()
            .filter(|ad| filter.category.map_or(true, |c| ad.category == c))
            .filter(|ad| filter.condition.map_or(true, |c| ad.condition == c))
            .filter(|ad| {
                needle.as_ref().map_or(true, |needle| {
                    ad.title.to_lowercase().contains(needle)
                        || ad.description.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect();
        newest_first(&mut ads);
        Ok(ads)
    }
}

#[async_trait]
impl AdRepository for MemoryCatalog {
    async fn insert_ad(&self, owner: UserId, draft: AdDraft) -> Result<Ad> {
        let mut inner = self.inner.lock().await;
        let id = AdId(inner.next_id);
        inner.next_id += 1;
        let ad = Ad {
            id,
            owner,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            condition: draft.condition,
            image_url: draft.image_url,
            created_at: Utc::now(),
        };
        inner.ads.insert(id, ad.clone());
        Ok(ad)
    }

    async fn replace_ad(&self, id: AdId, draft: AdDraft) -> Result<Ad> {
        let mut inner = self.inner.lock().await;
        let ad = inner
            .ads
            .get_mut(&id)
            .ok_or(ExchangeError::AdNotFound { id })?;
        ad.title = draft.title;
        ad.description = draft.description;
        ad.category = draft.category;
        ad.condition = draft.condition;
        ad.image_url = draft.image_url;
        Ok(ad.clone())
    }

    async fn delete_ad(&self, id: AdId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .ads
            .remove(&id)
            .map(|_| ())
            .ok_or(ExchangeError::AdNotFound { id })
    }
}

/// In-memory proposal store. The single lock makes the pair-check-and-insert and
/// the status check-and-set atomic with respect to concurrent calls.
#[derive(Clone)]
pub struct MemoryProposalStore {
    inner: Arc<Mutex<StoreInner>>,
}

struct StoreInner {
    proposals: HashMap<ProposalId, ExchangeProposal>,
    pairs: HashSet<(AdId, AdId)>,
    next_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalSnapshot {
    pub proposals: Vec<ExchangeProposal>,
    pub next_id: u64,
}

impl MemoryProposalStore {
    pub fn new() -> Self {
        Self::from_snapshot(ProposalSnapshot::default())
    }

    pub fn from_snapshot(snapshot: ProposalSnapshot) -> Self {
        let next_id = snapshot
            .next_id
            .max(
                snapshot
                    .proposals
                    .iter()
                    .map(|p| p.id.0 + 1)
                    .max()
                    .unwrap_or(1),
            )
            .max(1);
        let pairs = snapshot
            .proposals
            .iter()
            .map(|p| (p.sender_ad, p.receiver_ad))
            .collect();
        let proposals = snapshot
            .proposals
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                proposals,
                pairs,
                next_id,
            })),
        }
    }

    pub async fn snapshot(&self) -> ProposalSnapshot {
        let inner = self.inner.lock().await;
        let mut proposals: Vec<ExchangeProposal> = inner.proposals.values().cloned().collect();
        proposals.sort_by_key(|p| p.id);
        ProposalSnapshot {
            proposals,
            next_id: inner.next_id,
        }
    }
}

impl Default for MemoryProposalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProposalStore for MemoryProposalStore {
    async fn exists_by_pair(&self, sender: AdId, receiver: AdId) -> Result<bool> {
        let inner = self.inner.lock().await;
        Ok(inner.pairs.contains(&(sender, receiver)))
    }

    async fn insert(&self, draft: ProposalDraft) -> Result<ExchangeProposal> {
        let mut inner = self.inner.lock().await;

        let pair = (draft.sender_ad, draft.receiver_ad);
        if inner.pairs.contains(&pair) {
            return Err(ExchangeError::DuplicatePair);
        }

        let id = ProposalId(inner.next_id);
        inner.next_id += 1;
        let proposal = ExchangeProposal {
            id,
            sender_ad: draft.sender_ad,
            receiver_ad: draft.receiver_ad,
            sender_owner: draft.sender_owner,
            receiver_owner: draft.receiver_owner,
            comment: draft.comment,
            status: ProposalStatus::Pending,
            created_at: Utc::now(),
        };
        inner.pairs.insert(pair);
        inner.proposals.insert(id, proposal.clone());
        Ok(proposal)
    }

    async fn proposal_by_id(&self, id: ProposalId) -> Result<Option<ExchangeProposal>> {
        let inner = self.inner.lock().await;
        Ok(inner.proposals.get(&id).cloned())
    }

    async fn update_status(&self, id: ProposalId, status: ProposalStatus) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let proposal = inner
            .proposals
            .get_mut(&id)
            .ok_or(ExchangeError::NotFound { id })?;

        if proposal.status.is_terminal() || !status.is_terminal() {
            return Err(ExchangeError::InvalidTransition {
                from: proposal.status,
                to: status,
            });
        }

        proposal.status = status;
        Ok(())
    }

    async fn list_by_filter(
        &self,
        direction: Direction,
        user: UserId,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<ExchangeProposal>> {
        let inner = self.inner.lock().await;
        let mut proposals: Vec<ExchangeProposal> = inner
            .proposals
            .values()
            .filter(|p| match direction {
                Direction::Sent => p.sender_owner == user,
                Direction::Received => p.receiver_owner == user,
            })
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        proposals.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(proposals)
    }
}
