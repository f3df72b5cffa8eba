// ── Result aggregator ──
//
// Folds the dispatcher's completion stream into a frozen key -> result
// mapping. This is a pure identity merge: no joins, no statistics. Any
// derived computation belongs to the report emitters.

use std::pin::pin;

use futures_util::stream::{Stream, StreamExt};
use indexmap::IndexMap;
use indexmap::map::Entry;
use tokio_util::sync::CancellationToken;

use crate::dispatch::{DispatchKey, Failure, ResourceResult};
use crate::error::CoreError;

/// Frozen mapping from sub-resource key to terminal result.
///
/// Built only by [`collect`]; there are no mutators, so once a report is
/// handed to an emitter it reflects a single consistent snapshot of the
/// batch. Iteration order is arrival order and carries no meaning;
/// emitters re-sort deterministically.
#[derive(Debug)]
pub struct AggregatedReport<K, T> {
    entries: IndexMap<K, ResourceResult<T>>,
}

impl<K: DispatchKey, T> AggregatedReport<K, T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&ResourceResult<T>> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &ResourceResult<T>)> {
        self.entries.iter()
    }

    /// Keys whose requests succeeded, with their payloads. An empty
    /// payload is still a success; see [`Self::failures`] for the
    /// complement.
    pub fn successes(&self) -> impl Iterator<Item = (&K, &T)> {
        self.entries
            .iter()
            .filter_map(|(k, r)| r.success().map(|v| (k, v)))
    }

    /// Keys whose requests failed after the transport gave up.
    pub fn failures(&self) -> impl Iterator<Item = (&K, &Failure)> {
        self.entries
            .iter()
            .filter_map(|(k, r)| r.failure().map(|f| (k, f)))
    }
}

/// Consume a dispatch stream to exhaustion and freeze the mapping.
///
/// Every dispatched key ends up with exactly one terminal entry. A
/// duplicate key fails fast: it means the resolver produced a non-unique
/// batch, which would otherwise silently drop a result. If `cancel` fired
/// while consuming, the partial mapping is discarded and
/// [`CoreError::Cancelled`] is returned instead.
pub async fn collect<K, T, S>(
    stream: S,
    cancel: &CancellationToken,
) -> Result<AggregatedReport<K, T>, CoreError>
where
    K: DispatchKey,
    S: Stream<Item = (K, ResourceResult<T>)>,
{
    let mut entries: IndexMap<K, ResourceResult<T>> = IndexMap::new();
    let mut stream = pin!(stream);

    while let Some((key, result)) = stream.next().await {
        match entries.entry(key) {
            Entry::Occupied(slot) => {
                return Err(CoreError::DuplicateKey {
                    key: slot.key().to_string(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(result);
            }
        }
    }

    if cancel.is_cancelled() {
        return Err(CoreError::Cancelled);
    }

    Ok(AggregatedReport { entries })
}

// ── Tests ────────────────────────────────────────────────────────────
