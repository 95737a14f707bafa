//! Concurrent first-match-wins aggregation over candidate windows.
//!
//! Every candidate gets its own tokio task. Tasks that find an address try to
//! deposit it into a capacity-1 channel; once it holds a value every later
//! deposit is dropped on the floor. Nothing is cancelled early: the aggregator
//! waits for all tasks, then takes whatever sits in the slot. With several
//! valid windows the winner is whichever finished first, not necessarily the
//! leftmost.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{Semaphore, mpsc, mpsc::error::TrySendError};
use tokio::task::JoinHandle;

use crate::matcher::CandidateMatcher;
use crate::types::{AddressMatch, Candidate};

/// Run the matcher over every candidate with unbounded fan-out.
///
/// Must be called from within a tokio runtime.
pub async fn extract_address(
    candidates: Vec<Candidate>,
    matcher: Arc<CandidateMatcher>,
) -> Option<AddressMatch> {
    dispatch(candidates, matcher, None).await
}

/// Like [`extract_address`], but at most `max_in_flight` matchers run at the
/// same time. Every candidate is still processed; only CPU concurrency is
/// capped, so the winning window can differ from the unbounded mode.
pub async fn extract_address_bounded(
    candidates: Vec<Candidate>,
    matcher: Arc<CandidateMatcher>,
    max_in_flight: usize,
) -> Option<AddressMatch> {
    let gate = Arc::new(Semaphore::new(max_in_flight.max(1)));
    dispatch(candidates, matcher, Some(gate)).await
}

async fn dispatch(
    candidates: Vec<Candidate>,
    matcher: Arc<CandidateMatcher>,
    gate: Option<Arc<Semaphore>>,
) -> Option<AddressMatch> {
    let total = candidates.len();
    let (slot_tx, mut slot_rx) = mpsc::channel::<(usize, AddressMatch)>(1);

    let workers: Vec<JoinHandle<()>> = candidates
        .into_iter()
        .map(|candidate| {
            let matcher = Arc::clone(&matcher);
            let slot = slot_tx.clone();
            let gate = gate.clone();
            tokio::spawn(async move {
                let _permit = match gate {
                    Some(gate) => gate.acquire_owned().await.ok(),
                    None => None,
                };
                let Some(found) = matcher.match_address(candidate.as_str()) else {
                    return;
                };
                // Non-blocking: a full slot means another window already won.
                if let Err(TrySendError::Full((window, late))) =
                    slot.try_send((candidate.index(), found))
                {
                    tracing::trace!(window, address = %late, "result slot taken; dropping");
                }
            })
        })
        .collect();
    drop(slot_tx);

    // Completion barrier: every unit runs to the end.
    for outcome in join_all(workers).await {
        if let Err(e) = outcome {
            tracing::warn!(error = %e, "candidate worker did not complete");
        }
    }

    match slot_rx.try_recv() {
        Ok((window, address)) => {
            tracing::debug!(window, candidates = total, address = %address, "address found");
            Some(address)
        }
        Err(_) => {
            tracing::debug!(candidates = total, "no address found");
            None
        }
    }
}
