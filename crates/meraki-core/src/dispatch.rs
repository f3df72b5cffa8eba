// ── Fan-out dispatcher ──
//
// Issues one request per sub-resource key, bounded by a concurrency
// ceiling, and yields (key, result) pairs in completion order. A failing
// key never aborts its siblings: request errors are captured as tagged
// per-key results, not propagated. Retry and rate-limit discipline belong
// to the transport underneath, so each key is at most one logical request
// here regardless of how many attempts the transport makes.

use std::fmt;
use std::future::Future;
use std::hash::Hash;

use async_stream::stream;
use futures_util::StreamExt;
use futures_util::stream::{FuturesUnordered, Stream};
use tokio_util::sync::CancellationToken;

// ── Keys ─────────────────────────────────────────────────────────────

/// Requirements on a sub-resource key: comparable for merge, printable
/// for diagnostics, and movable into the per-key request task.
pub trait DispatchKey: Clone + Eq + Hash + fmt::Display + Send + 'static {}

impl<K: Clone + Eq + Hash + fmt::Display + Send + 'static> DispatchKey for K {}

/// One network as the unit of concurrent work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkKey(pub String);

impl fmt::Display for NetworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One (network, radio band) pair as the unit of concurrent work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BandKey {
    pub network_id: String,
    pub band: Band,
}

impl fmt::Display for BandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}GHz", self.network_id, self.band)
    }
}

/// One device serial as the unit of concurrent work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialKey(pub String);

impl fmt::Display for SerialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Wireless radio bands the Dashboard reports on.
///
/// Ordering follows frequency so sorted output reads 2.4, 5, 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum Band {
    #[strum(serialize = "2.4")]
    Ghz2_4,
    #[strum(serialize = "5")]
    Ghz5,
    #[strum(serialize = "6")]
    Ghz6,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Ghz2_4, Band::Ghz5, Band::Ghz6];
}

// ── Per-key results ──────────────────────────────────────────────────

/// Terminal outcome of one dispatched request. Immutable once produced.
#[derive(Debug, Clone)]
pub enum ResourceResult<T> {
    Success(T),
    Failure(Failure),
}

impl<T> ResourceResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f),
        }
    }
}

/// Why one key's request failed.
#[derive(Debug, Clone)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The transport's 429 retry budget ran out.
    RateLimit,
    /// The Dashboard returned a non-retryable error status.
    Api,
    /// Connection-level failure (DNS, refused, timeout).
    Transport,
    /// The response body did not decode.
    Decode,
}

impl From<meraki_api::Error> for Failure {
    fn from(err: meraki_api::Error) -> Self {
        let kind = match &err {
            meraki_api::Error::RateLimitExhausted { .. } => FailureKind::RateLimit,
            meraki_api::Error::Api { .. } | meraki_api::Error::InvalidApiKey => FailureKind::Api,
            meraki_api::Error::Deserialization { .. } => FailureKind::Decode,
            meraki_api::Error::Transport(_)
            | meraki_api::Error::InvalidUrl(_)
            | meraki_api::Error::LimiterClosed => FailureKind::Transport,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────

/// Fan `request_fn` out over `keys`, at most `max_concurrency` in flight,
/// yielding `(key, result)` pairs as they complete.
///
/// Emission order carries no relation to submission order; excess keys
/// queue until a slot frees. When `cancel` fires, in-flight requests are
/// abandoned and the stream ends immediately; [`crate::collect`] turns
/// that into a terminal cancellation instead of a partial result.
pub fn dispatch<K, T, F, Fut>(
    keys: Vec<K>,
    max_concurrency: usize,
    cancel: CancellationToken,
    request_fn: F,
) -> impl Stream<Item = (K, ResourceResult<T>)>
where
    K: DispatchKey,
    T: Send + 'static,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, meraki_api::Error>>,
{
    stream! {
        let limit = max_concurrency.max(1);
        let mut pending = keys.into_iter();
        let mut in_flight = FuturesUnordered::new();

        loop {
            while in_flight.len() < limit {
                let Some(key) = pending.next() else { break };
                let fut = request_fn(key.clone());
                in_flight.push(async move {
                    let result = match fut.await {
                        Ok(payload) => ResourceResult::Success(payload),
                        Err(err) => {
                            tracing::debug!(key = %key, error = %err, "sub-resource request failed");
                            ResourceResult::Failure(Failure::from(err))
                        }
                    };
                    (key, result)
                });
            }

            if in_flight.is_empty() {
                break;
            }

            tokio::select! {
                // Cancellation wins over ready completions.
                biased;
                () = cancel.cancelled() => break,
                Some(item) = in_flight.next() => yield item,
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use futures_util::StreamExt;
    use tokio_util::sync::CancellationToken;

    use super::{Band, BandKey, FailureKind, ResourceResult, dispatch};

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("key-{i}")).collect()
    }

    #[tokio::test]
    async fn every_key_gets_exactly_one_terminal_result() {
        let stream = dispatch(keys(12), 4, CancellationToken::new(), |key| async move {
            Ok::<_, meraki_api::Error>(key.len())
        });
        let results: Vec<_> = stream.collect().await;

        assert_eq!(results.len(), 12);
        let mut seen: Vec<_> = results.iter().map(|(k, _)| k.clone()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 12, "keys must be unique in the output");
        assert!(results.iter().all(|(_, r)| r.is_success()));
    }

    #[tokio::test]
    async fn concurrency_ceiling_is_never_exceeded() {
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for ceiling in [1_usize, 3, 8] {
            current.store(0, Ordering::SeqCst);
            peak.store(0, Ordering::SeqCst);

            let stream = dispatch(keys(20), ceiling, CancellationToken::new(), |key| {
                let current = Arc::clone(&current);
                let peak = Arc::clone(&peak);
                async move {
                    let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    current.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, meraki_api::Error>(key)
                }
            });
            let results: Vec<_> = stream.collect().await;

            assert_eq!(results.len(), 20);
            assert!(
                peak.load(Ordering::SeqCst) <= ceiling,
                "peak {} exceeded ceiling {ceiling}",
                peak.load(Ordering::SeqCst)
            );
        }
    }

    #[tokio::test]
    async fn one_failing_key_does_not_abort_siblings() {
        let stream = dispatch(
            vec!["k1".to_owned(), "k2".to_owned(), "k3".to_owned()],
            3,
            CancellationToken::new(),
            |key| async move {
                if key == "k2" {
                    Err(meraki_api::Error::RateLimitExhausted { retries: 100 })
                } else {
                    Ok(key)
                }
            },
        );
        let results: Vec<_> = stream.collect().await;

        assert_eq!(results.len(), 3);
        for (key, result) in &results {
            match result {
                ResourceResult::Failure(f) => {
                    assert_eq!(key, "k2");
                    assert_eq!(f.kind, FailureKind::RateLimit);
                }
                ResourceResult::Success(v) => assert_eq!(key, v),
            }
        }
    }

    #[tokio::test]
    async fn cancelled_batch_stops_yielding() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let stream = dispatch(keys(5), 2, cancel, |key| async move {
            Ok::<_, meraki_api::Error>(key)
        });
        let results: Vec<_> = stream.collect().await;

        assert!(results.is_empty());
    }

    #[test]
    fn band_key_display_and_order() {
        let key = BandKey {
            network_id: "N_1".into(),
            band: Band::Ghz5,
        };
        assert_eq!(key.to_string(), "N_1:5GHz");
        assert!(Band::Ghz2_4 < Band::Ghz5 && Band::Ghz5 < Band::Ghz6);
        assert_eq!(Band::Ghz2_4.to_string(), "2.4");
    }
}
