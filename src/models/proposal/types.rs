use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Governance proposal as stored. Descriptive fields and status are passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Vote weight as it arrives from the store. Upstream writers are not
/// consistent, so a weight may be a number or a numeric-looking string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawWeight {
    Number(f64),
    Text(String),
}

impl fmt::Display for RawWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawWeight::Number(n) => write!(f, "{n}"),
            RawWeight::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for RawWeight {
    fn from(n: f64) -> Self {
        RawWeight::Number(n)
    }
}

impl From<&str> for RawWeight {
    fn from(s: &str) -> Self {
        RawWeight::Text(s.to_string())
    }
}

/// One ballot cast against a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: i64,
    pub choice: String,
    pub weight: RawWeight,
}

/// A proposal together with every vote cast on it (one row of the join).
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalWithVotes {
    pub proposal: Proposal,
    pub votes: Vec<Vote>,
}

/// Weighted aggregate of a proposal's votes.
///
/// `total_weight` is always the sum of `vote_counts`; `vote_count` is the
/// number of ballots regardless of their weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub vote_counts: BTreeMap<String, f64>,
    pub total_weight: f64,
    pub vote_count: u64,
}

/// Proposal with its tally, shaped for display. Built per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalliedProposal {
    #[serde(flatten)]
    pub proposal: Proposal,
    #[serde(flatten)]
    pub tally: VoteTally,
}
