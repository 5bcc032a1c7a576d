//! API key discovery.
//!
//! The search endpoint is only reachable through a key that HowLongToBeat
//! embeds in its `_app-*.js` bundle. The key is scraped from that bundle, so
//! this module is the first thing to adapt whenever the site ships a new
//! bundle layout.

use std::{fmt, sync::Arc};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use soup::prelude::*;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use url::Url;

use crate::{logging::KeyDiscoveryEvent, Status};

use super::backend::Transport;

/// Opaque key authorizing search requests. Either an endpoint path
/// (`/api/find/...`) or a bare token.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        ApiKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the search endpoint addressed by this key.
    pub fn endpoint(&self, origin: &str) -> String {
        let origin = origin.trim_end_matches('/');
        match self.0.starts_with('/') {
            true => format!("{origin}{}", self.0),
            false => format!("{origin}{SEARCH_PATH}{}", self.0),
        }
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holds the discovered key. Clones share the same slot, so one discovery can
/// serve several clients.
#[derive(Clone, Default, Debug)]
pub struct KeyCache {
    key: Arc<Mutex<Option<ApiKey>>>,
}

impl KeyCache {
    pub fn new() -> Self {
        KeyCache::default()
    }

    pub fn with_key(key: ApiKey) -> Self {
        KeyCache {
            key: Arc::new(Mutex::new(Some(key))),
        }
    }

    pub async fn get(&self) -> Option<ApiKey> {
        self.key.lock().await.clone()
    }

    /// Returns the cached key, running discovery if the cache is empty.
    pub async fn get_or_discover(
        &self,
        transport: &dyn Transport,
        origin: &str,
    ) -> Result<ApiKey, Status> {
        let mut slot = self.key.lock().await;
        if let Some(key) = &*slot {
            return Ok(key.clone());
        }

        let key = discover_key(transport, origin).await?;
        *slot = Some(key.clone());
        Ok(key)
    }

    /// Replaces `stale` with a freshly discovered key.
    ///
    /// If another holder of the cache already replaced `stale`, that key is
    /// returned without a new discovery. On failure the cache is left empty.
    pub async fn rediscover(
        &self,
        transport: &dyn Transport,
        origin: &str,
        stale: &ApiKey,
    ) -> Result<ApiKey, Status> {
        let mut slot = self.key.lock().await;
        if let Some(key) = &*slot {
            if key != stale {
                return Ok(key.clone());
            }
        }

        *slot = None;
        let key = discover_key(transport, origin).await?;
        *slot = Some(key.clone());
        Ok(key)
    }
}

/// Scrapes the site's front page and main bundle for the search API key.
#[instrument(level = "trace", skip(transport))]
pub async fn discover_key(transport: &dyn Transport, origin: &str) -> Result<ApiKey, Status> {
    let result = discover(transport, origin).await;
    KeyDiscoveryEvent::discover(origin, &result);
    result
}

async fn discover(transport: &dyn Transport, origin: &str) -> Result<ApiKey, Status> {
    let html = transport.get(origin).await.map_err(|status| {
        warn!("Failed to fetch front page: {status}");
        Status::key_not_found(format!("failed to fetch '{origin}': {status}"))
    })?;

    for url in app_script_urls(&html, origin) {
        let script = transport.get(&url).await.map_err(|status| {
            warn!("Failed to fetch script: {status}");
            Status::key_not_found(format!("failed to fetch '{url}': {status}"))
        })?;

        if let Some(key) = extract_key(&script) {
            info!("Discovered API key '{key}' in {url}");
            return Ok(key);
        }
    }

    Err(Status::key_not_found(format!(
        "no API key found in the '_app-' bundles of {origin}"
    )))
}

/// Returns the absolute urls of the `_app-` bundles referenced by `html`.
pub fn app_script_urls(html: &str, origin: &str) -> Vec<String> {
    let soup = Soup::new(html);
    soup.tag("script")
        .find_all()
        .filter_map(|script| script.get("src"))
        .filter(|src| src.contains(APP_BUNDLE_MARKER))
        .filter_map(|src| match resolve_url(origin, &src) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Skipping script '{src}': {e}");
                None
            }
        })
        .collect()
}

fn resolve_url(origin: &str, src: &str) -> Result<String, url::ParseError> {
    Ok(Url::parse(origin)?.join(src)?.to_string())
}

/// Extracts the API key from the body of an `_app-` bundle.
///
/// Two layouts are recognized, tried in order:
/// * `users: { id: "<key>" }`, where the key is used as is;
/// * `/api/find/` followed by `.concat("...")` calls, where the fragments are
///   joined into the endpoint path.
pub fn extract_key(script: &str) -> Option<ApiKey> {
    lazy_static! {
        static ref USER_ID_RE: Regex =
            Regex::new(r#"users\s*:\s*\{\s*id\s*:\s*"(?P<key>[^"]+)""#).unwrap();
        static ref CONCAT_RE: Regex = Regex::new(r#"/api/find/(?:\.concat\("[^"]*"\))*"#).unwrap();
        static ref PUNCTUATION_RE: Regex = Regex::new(r#"["()\[\]']"#).unwrap();
    }

    if let Some(key) = USER_ID_RE
        .captures(script)
        .and_then(|cap| cap.name("key").map(|key| key.as_str().to_owned()))
    {
        return Some(ApiKey::new(key));
    }

    CONCAT_RE.find(script).map(|path| {
        ApiKey::new(
            path.as_str()
                .split(".concat")
                .map(|part| PUNCTUATION_RE.replace_all(part, ""))
                .collect::<String>(),
        )
    })
}

const APP_BUNDLE_MARKER: &str = "_app-";
const SEARCH_PATH: &str = "/api/search/";
