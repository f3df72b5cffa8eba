// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with Dashboard-specific URL construction, error
// body parsing, Link-header pagination, and the rate-limit discipline: a
// global semaphore caps outstanding requests across all callers, and 429
// responses are retried in place (honoring Retry-After) up to a bounded
// budget. Endpoint groups (organizations, networks, etc.) are implemented
// as inherent methods in separate files to keep this module focused on
// transport mechanics.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Page size requested from list endpoints; the Dashboard truncates larger
/// values to its own maximum.
const PER_PAGE: u32 = 1000;

/// Fallback wait when a 429 response carries no Retry-After header.
const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(1);

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Meraki Dashboard API.
///
/// Cheap to clone: the HTTP pool and the request limiter are shared, so
/// every clone draws from the same concurrency ceiling and retry budget
/// configuration. This is what makes the limiter *global*: fan-out code
/// can hand a clone to each task without multiplying the ceiling.
#[derive(Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
    limiter: Arc<Semaphore>,
    max_concurrent_requests: usize,
    maximum_retries: u32,
}

impl DashboardClient {
    /// Create a new client from a `TransportConfig` and API key.
    pub fn new(transport: &TransportConfig, api_key: &SecretString) -> Result<Self, Error> {
        let http = transport.build_client(api_key)?;
        Ok(Self::from_reqwest(http, transport))
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(http: reqwest::Client, transport: &TransportConfig) -> Self {
        let ceiling = transport.max_concurrent_requests.max(1);
        Self {
            http,
            base_url: transport.base_url.clone(),
            limiter: Arc::new(Semaphore::new(ceiling)),
            max_concurrent_requests: ceiling,
            maximum_retries: transport.maximum_retries,
        }
    }

    /// The Dashboard base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// How many requests may be outstanding simultaneously.
    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative endpoint path (e.g. `"organizations"`) onto the
    /// base URL. The base always ends with `/`, so joining works.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Rate-limited send ────────────────────────────────────────────

    /// Send a request under the global limiter, retrying 429 responses.
    ///
    /// The permit is held across retries: a rate-limited request keeps its
    /// concurrency slot while it waits, so the ceiling counts logical
    /// requests, not attempts.
    async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Error> {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| Error::LimiterClosed)?;

        let mut attempt: u32 = 0;
        loop {
            let this_attempt = req.try_clone().ok_or_else(|| Error::Api {
                status: 0,
                message: "request body is not replayable".into(),
            })?;
            let resp = this_attempt.send().await.map_err(Error::Transport)?;

            if resp.status() != reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Ok(resp);
            }

            attempt += 1;
            if attempt > self.maximum_retries {
                return Err(Error::RateLimitExhausted {
                    retries: self.maximum_retries,
                });
            }

            let wait = retry_after(resp.headers()).unwrap_or(DEFAULT_RATE_LIMIT_WAIT);
            debug!(attempt, wait_secs = wait.as_secs(), "rate limited, waiting");
            tokio::time::sleep(wait).await;
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// Send a GET request for a single resource or non-paginated list.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.get_with_params(path, &[]).await
    }

    /// Send a GET request with query parameters.
    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.send_with_retry(self.http.get(url).query(params)).await?;
        self.handle_response(resp).await
    }

    /// Send a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.send_with_retry(self.http.put(url).json(body)).await?;
        self.handle_response(resp).await
    }

    // ── Pagination ───────────────────────────────────────────────────

    /// Collect every page of a list endpoint into a single `Vec<T>`.
    ///
    /// The Dashboard paginates via the `Link` response header; this walks
    /// `rel=next` links until none remains. Query parameters apply to the
    /// first request only; continuation URLs carry their own.
    pub(crate) async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let first = self.url(path)?;
        debug!("GET {first} params={params:?} (paginated)");

        let mut all = Vec::new();
        let mut next = Some(
            self.http
                .get(first)
                .query(&[("perPage", PER_PAGE.to_string())])
                .query(params),
        );

        while let Some(req) = next.take() {
            let resp = self.send_with_retry(req).await?;
            next = next_page(resp.headers()).map(|url| self.http.get(url));
            let items: Vec<T> = self.handle_response(resp).await?;
            all.extend(items);
        }

        Ok(all)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(Error::Transport)?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(parse_error(status, resp).await)
        }
    }
}

// ── Header helpers ───────────────────────────────────────────────────

/// Extract the `rel=next` URL from a `Link` header, if present.
fn next_page(headers: &HeaderMap) -> Option<Url> {
    let link = headers.get(reqwest::header::LINK)?.to_str().ok()?;
    let raw = parse_link_next(link)?;
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("unparseable rel=next link {raw:?}: {e}");
            None
        }
    }
}

/// Parse a Link header value and return the `rel=next` target, if any.
///
/// Accepts both `rel=next` and `rel="next"` parameter forms.
fn parse_link_next(value: &str) -> Option<&str> {
    for segment in value.split(',') {
        let mut parts = segment.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|p| {
            let p = p.trim();
            p == "rel=next" || p == "rel=\"next\""
        });
        if is_next {
            return target
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'));
        }
    }
    None
}

/// Parse a `Retry-After` header into a wait duration.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let secs: u64 = headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    Some(Duration::from_secs(secs))
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::InvalidApiKey;
    }

    let raw = resp.text().await.unwrap_or_default();

    if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
        if !err.errors.is_empty() {
            return Error::Api {
                status: status.as_u16(),
                message: err.errors.join("; "),
            };
        }
    }

    Error::Api {
        status: status.as_u16(),
        message: if raw.is_empty() {
            status.to_string()
        } else {
            raw
        },
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::parse_link_next;

    #[test]
    fn link_header_next_plain() {
        let value = "<https://api.meraki.com/api/v1/organizations?startingAfter=abc&perPage=1000>; rel=next";
        assert_eq!(
            parse_link_next(value),
            Some("https://api.meraki.com/api/v1/organizations?startingAfter=abc&perPage=1000")
        );
    }

    #[test]
    fn link_header_next_quoted_among_others() {
        let value = "<https://x/first>; rel=\"first\", <https://x/next>; rel=\"next\", <https://x/last>; rel=\"last\"";
        assert_eq!(parse_link_next(value), Some("https://x/next"));
    }

    #[test]
    fn link_header_without_next() {
        let value = "<https://x/first>; rel=first, <https://x/prev>; rel=prev";
        assert_eq!(parse_link_next(value), None);
    }
}
