use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::Result;

/// Responses are memoized per path for this long; near-simultaneous polls
/// from the host's characteristic-refresh cycle share one device round-trip.
const CACHE_TTL: Duration = Duration::from_secs(60);

struct CacheEntry {
    body: String,
    fetched_at: Instant,
}

/// HTTP transport for one wireless LAN adapter, with a short-lived response
/// cache keyed by request path. Each client owns its cache; managing several
/// units means several independent clients.
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: String,
    cache: HashMap<String, CacheEntry>,
}

impl DeviceClient {
    pub fn new(host: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: format!("http://{host}"),
            cache: HashMap::new(),
        }
    }

    /// GET `http://<host><path>` and return the raw body.
    ///
    /// With `use_cache` a body fetched for this exact path within the last
    /// 60 seconds is returned without network I/O. Every successful fetch,
    /// cached or not, refreshes the entry; failures never populate it.
    /// No retries: a transport failure is terminal for this call.
    pub async fn get(&mut self, path: &str, use_cache: bool) -> Result<String> {
        if use_cache
            && let Some(entry) = self.cache.get(path)
            && entry.fetched_at.elapsed() < CACHE_TTL
        {
            trace!(path, "cache hit");
            return Ok(entry.body.clone());
        }

        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        self.cache.insert(
            path.to_string(),
            CacheEntry {
                body: body.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(body)
    }

    /// Drop the memoized body for a path so the next read refetches.
    pub fn invalidate(&mut self, path: &str) {
        self.cache.remove(path);
    }

    #[cfg(test)]
    pub(crate) fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
