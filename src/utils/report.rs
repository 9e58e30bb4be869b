use crate::domain::model::ExchangeProposal;
use crate::utils::error::Result;
use std::io::Write;

/// Writes a proposal listing as CSV, one row per proposal, header first.
pub fn write_proposals_csv<W: Write>(proposals: &[ExchangeProposal], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "id",
        "sender_ad",
        "receiver_ad",
        "status",
        "comment",
        "created_at",
    ])?;

    for proposal in proposals {
        writer.write_record([
            proposal.id.to_string(),
            proposal.sender_ad.to_string(),
            proposal.receiver_ad.to_string(),
            proposal.status.as_str().to_string(),
            proposal.comment.clone().unwrap_or_default(),
            proposal.created_at.to_rfc3339(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AdId, ProposalId, ProposalStatus, UserId};
    use chrono::Utc;

    fn proposal(id: u64, status: ProposalStatus, comment: Option<&str>) -> ExchangeProposal {
        ExchangeProposal {
            id: ProposalId(id),
            sender_ad: AdId(10),
            receiver_ad: AdId(20),
            sender_owner: UserId(1),
            receiver_owner: UserId(2),
            comment: comment.map(str::to_string),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_proposal() {
        let proposals = vec![
            proposal(1, ProposalStatus::Pending, Some("swap?")),
            proposal(2, ProposalStatus::Accepted, None),
        ];

        let mut buffer = Vec::new();
        write_proposals_csv(&proposals, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id,sender_ad,receiver_ad,status,comment,created_at"
        );
        assert!(lines[1].starts_with("1,10,20,pending,swap?,"));
        assert!(lines[2].starts_with("2,10,20,accepted,,"));
    }

    #[test]
    fn test_csv_empty_listing_is_header_only() {
        let mut buffer = Vec::new();
        write_proposals_csv(&[], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
