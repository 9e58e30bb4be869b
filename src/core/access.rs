use crate::domain::model::{Ad, ProposalId, UserId};
use crate::utils::error::{ExchangeError, Result};

/// Creation policy: only the owner of the sender ad may propose from it.
pub fn ensure_sender_owned(acting: UserId, sender: &Ad) -> Result<()> {
    if sender.owner != acting {
        tracing::debug!(
            "user {} tried to send from ad {} owned by {}",
            acting,
            sender.id,
            sender.owner
        );
        return Err(ExchangeError::Forbidden);
    }
    Ok(())
}

/// Transition policy: only the owner of the receiver ad may decide a proposal.
///
/// Non-owners get `NotFound`, never `Forbidden`; a proposal they cannot act on
/// is indistinguishable from one that does not exist.
pub fn ensure_receiver_owned(acting: UserId, proposal: ProposalId, receiver: &Ad) -> Result<()> {
    if receiver.owner != acting {
        tracing::debug!(
            "user {} cannot decide proposal {} aimed at ad {} of user {}",
            acting,
            proposal,
            receiver.id,
            receiver.owner
        );
        return Err(ExchangeError::NotFound { id: proposal });
    }
    Ok(())
}
