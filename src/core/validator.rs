use crate::domain::model::Ad;
use crate::utils::error::{ExchangeError, Result};

/// Decides whether a (sender, receiver) ad pair is admissible for a proposal.
///
/// Pure function of its inputs. The checks run in a fixed order and short-circuit
/// on the first failure, so callers always see the same error for the same pair.
pub fn validate_pair(sender: &Ad, receiver: &Ad) -> Result<()> {
    if sender.id == receiver.id {
        return Err(ExchangeError::SelfProposal);
    }

    if sender.owner == receiver.owner {
        return Err(ExchangeError::SameOwner);
    }

    Ok(())
}
