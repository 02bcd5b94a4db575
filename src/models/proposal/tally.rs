//! Pure vote aggregation. Nothing in here touches the store.

use std::cmp::Ordering;

use super::types::*;
use crate::errors::LedgerError;

/// Coerce a stored weight to a number.
///
/// Accepts finite, non-negative numbers and strings that parse as one after
/// trimming. Everything else is rejected rather than folded into the totals.
pub fn parse_weight(proposal_id: i64, raw: &RawWeight) -> Result<f64, LedgerError> {
    let parsed = match raw {
        RawWeight::Number(n) => Some(*n),
        RawWeight::Text(s) => s.trim().parse::<f64>().ok(),
    };

    match parsed {
        // `+ 0.0` folds a parsed "-0" into positive zero.
        Some(w) if w.is_finite() && w >= 0.0 => Ok(w + 0.0),
        _ => Err(LedgerError::InvalidWeight {
            proposal_id,
            value: raw.to_string(),
        }),
    }
}

/// Reduce a proposal's votes into per-choice weight sums.
///
/// Fails on the first vote whose weight cannot be coerced; no partial tally
/// is returned.
pub fn tally_votes(votes: &[Vote]) -> Result<VoteTally, LedgerError> {
    let mut tally = VoteTally::default();

    for vote in votes {
        let weight = parse_weight(vote.proposal_id, &vote.weight)?;
        *tally.vote_counts.entry(vote.choice.clone()).or_insert(0.0) += weight;
        tally.vote_count += 1;
    }

    // Summed from the per-choice map so the total matches it exactly. Seeded
    // with positive zero: an empty f64 `sum()` yields -0.0.
    tally.total_weight = tally.vote_counts.values().fold(0.0, |acc, w| acc + *w);
    Ok(tally)
}

impl TryFrom<ProposalWithVotes> for TalliedProposal {
    type Error = LedgerError;

    fn try_from(row: ProposalWithVotes) -> Result<Self, Self::Error> {
        let tally = tally_votes(&row.votes)?;
        Ok(TalliedProposal {
            proposal: row.proposal,
            tally,
        })
    }
}

impl TalliedProposal {
    /// Choice with the most weight behind it. Ties go to the
    /// lexicographically smallest label.
    pub fn leading_choice(&self) -> Option<&str> {
        self.tally
            .vote_counts
            .iter()
            .fold(
                None,
                |best: Option<(&String, f64)>, (choice, &weight)| match best {
                    Some((_, best_weight)) if weight <= best_weight => best,
                    _ => Some((choice, weight)),
                },
            )
            .map(|(choice, _)| choice.as_str())
    }
}

/// Newest proposal first; equal timestamps fall back to the higher id.
pub fn newest_first(a: &TalliedProposal, b: &TalliedProposal) -> Ordering {
    b.proposal
        .created_at
        .cmp(&a.proposal.created_at)
        .then_with(|| b.proposal.id.cmp(&a.proposal.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn vote(choice: &str, weight: impl Into<RawWeight>) -> Vote {
        Vote {
            proposal_id: 1,
            choice: choice.to_string(),
            weight: weight.into(),
        }
    }

    fn tallied(id: i64, day: u32, votes: &[Vote]) -> TalliedProposal {
        TalliedProposal {
            proposal: Proposal {
                id,
                title: String::new(),
                body: String::new(),
                status: "open".to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
            },
            tally: tally_votes(votes).unwrap(),
        }
    }

    #[test]
    fn test_parse_weight_accepts_numbers_and_numeric_text() {
        assert_eq!(parse_weight(1, &RawWeight::Number(3.0)).unwrap(), 3.0);
        assert_eq!(parse_weight(1, &"2".into()).unwrap(), 2.0);
        assert_eq!(parse_weight(1, &" 2.5 ".into()).unwrap(), 2.5);
        assert_eq!(parse_weight(1, &"0".into()).unwrap(), 0.0);
        assert_eq!(parse_weight(1, &"1e3".into()).unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_weight_rejects_garbage() {
        for bad in ["", "   ", "abc", "3 votes", "NaN", "inf", "-1"] {
            let err = parse_weight(7, &bad.into()).unwrap_err();
            match err {
                LedgerError::InvalidWeight { proposal_id, value } => {
                    assert_eq!(proposal_id, 7);
                    assert_eq!(value, bad);
                }
                other => panic!("expected InvalidWeight for {bad:?}, got {other:?}"),
            }
        }
        assert!(parse_weight(1, &RawWeight::Number(f64::NAN)).is_err());
        assert!(parse_weight(1, &RawWeight::Number(-0.5)).is_err());
    }

    #[test]
    fn test_tally_example() {
        let tally = tally_votes(&[vote("yes", 3.0), vote("yes", "2"), vote("no", 1.0)]).unwrap();

        assert_eq!(tally.vote_counts.len(), 2);
        assert_eq!(tally.vote_counts["yes"], 5.0);
        assert_eq!(tally.vote_counts["no"], 1.0);
        assert_eq!(tally.total_weight, 6.0);
        assert_eq!(tally.vote_count, 3);
    }

    #[test]
    fn test_tally_empty() {
        let tally = tally_votes(&[]).unwrap();
        assert!(tally.vote_counts.is_empty());
        assert_eq!(tally.total_weight, 0.0);
        assert!(!tally.total_weight.is_sign_negative());
        assert_eq!(tally.vote_count, 0);

        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"voteCounts":{},"totalWeight":0.0,"voteCount":0}"#);
    }

    #[test]
    fn test_negative_zero_weight_is_positive_zero() {
        let w = parse_weight(1, &"-0".into()).unwrap();
        assert!(!w.is_sign_negative());
        assert!(!parse_weight(1, &RawWeight::Number(-0.0)).unwrap().is_sign_negative());

        let tally = tally_votes(&[vote("abstain", "-0"), vote("abstain", -0.0)]).unwrap();
        assert!(!tally.vote_counts["abstain"].is_sign_negative());
        assert!(!tally.total_weight.is_sign_negative());
        assert_eq!(tally.vote_count, 2);

        let json = serde_json::to_string(&tally).unwrap();
        assert!(!json.contains("-0"), "negative zero leaked: {json}");
    }

    #[test]
    fn test_zero_weight_votes_still_counted() {
        let tally = tally_votes(&[vote("abstain", 0.0), vote("yes", "4")]).unwrap();
        assert_eq!(tally.vote_count, 2);
        assert_eq!(tally.vote_counts["abstain"], 0.0);
        assert_eq!(tally.total_weight, 4.0);
    }

    #[test]
    fn test_total_matches_sum_of_choices_with_fractions() {
        let votes = [
            vote("a", 0.1),
            vote("b", 0.2),
            vote("a", 0.3),
            vote("c", "0.7"),
            vote("b", 1.1),
        ];
        let tally = tally_votes(&votes).unwrap();
        let sum: f64 = tally.vote_counts.values().sum();
        assert_eq!(tally.total_weight, sum);
        assert_eq!(tally.vote_count, 5);
    }

    #[test]
    fn test_invalid_weight_fails_whole_tally() {
        let err = tally_votes(&[vote("yes", 1.0), vote("no", "lots")]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidWeight { .. }));
    }

    #[test]
    fn test_leading_choice() {
        let p = tallied(1, 1, &[vote("yes", 3.0), vote("no", 5.0)]);
        assert_eq!(p.leading_choice(), Some("no"));

        let tie = tallied(2, 1, &[vote("yes", 2.0), vote("no", 2.0)]);
        assert_eq!(tie.leading_choice(), Some("no"));

        let empty = tallied(3, 1, &[]);
        assert_eq!(empty.leading_choice(), None);
    }

    #[test]
    fn test_newest_first_orders_by_timestamp_then_id() {
        let mut items = vec![
            tallied(1, 1, &[]),
            tallied(2, 5, &[]),
            tallied(3, 5, &[]),
            tallied(4, 3, &[]),
        ];
        items.sort_by(newest_first);
        let ids: Vec<i64> = items.iter().map(|p| p.proposal.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_serialized_shape() {
        let p = tallied(9, 2, &[vote("yes", 3.0), vote("no", 1.0)]);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["status"], "open");
        assert_eq!(json["voteCounts"]["yes"], 3.0);
        assert_eq!(json["totalWeight"], 4.0);
        assert_eq!(json["voteCount"], 2);

        let empty = serde_json::to_value(tallied(10, 2, &[])).unwrap();
        assert_eq!(empty["voteCounts"], serde_json::json!({}));
        assert_eq!(empty["totalWeight"], 0.0);
        assert_eq!(empty["voteCount"], 0);
    }
}
