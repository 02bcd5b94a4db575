use crate::errors::LedgerError;
use crate::store::LedgerStore;
use super::tally::newest_first;
use super::types::*;

/// Every known proposal with its vote tally, newest first.
///
/// One store round trip. A proposal without votes is still listed with an
/// empty tally. Any store failure or unusable weight fails the whole listing.
pub async fn list_tallied_proposals<S: LedgerStore>(
    store: &S,
) -> Result<Vec<TalliedProposal>, LedgerError> {
    let rows = store.fetch_proposals_with_votes().await?;

    let mut tallied = rows
        .into_iter()
        .map(TalliedProposal::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    tallied.sort_by(newest_first);

    Ok(tallied)
}

/// A single proposal with its tally, or `None` if no such proposal exists.
pub async fn find_tallied_proposal<S: LedgerStore>(
    store: &S,
    id: i64,
) -> Result<Option<TalliedProposal>, LedgerError> {
    store
        .fetch_proposal_with_votes(id)
        .await?
        .map(TalliedProposal::try_from)
        .transpose()
}
