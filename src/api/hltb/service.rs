use scraper::Html;
use tracing::{info, instrument, warn};

use crate::{
    documents::{GameDetail, GameSearchResult, Pagination, SearchResults},
    logging::{DetailEvent, HltbCounters, SearchEvent},
    Status,
};

use super::{
    backend::{ReqwestTransport, Transport},
    docs::{SearchRequest, SearchResponse},
    extract, hltb_scrape,
    key::{ApiKey, KeyCache},
};

/// Client for the HowLongToBeat website.
///
/// Construction discovers the search API key (unless the injected cache
/// already holds one), so a successfully built client is always able to
/// search.
pub struct HowLongToBeat {
    transport: Box<dyn Transport>,
    cache: KeyCache,
    origin: String,
}

impl HowLongToBeat {
    /// Returns a client using the default `reqwest` transport and its own key
    /// cache.
    pub async fn new() -> Result<Self, Status> {
        HowLongToBeat::with_transport(Box::new(ReqwestTransport::new()?), KeyCache::new()).await
    }

    pub async fn with_transport(
        transport: Box<dyn Transport>,
        cache: KeyCache,
    ) -> Result<Self, Status> {
        HowLongToBeat::with_origin(transport, cache, HLTB_ORIGIN).await
    }

    /// Returns a client talking to `origin` instead of the public site.
    pub async fn with_origin(
        transport: Box<dyn Transport>,
        cache: KeyCache,
        origin: &str,
    ) -> Result<Self, Status> {
        let origin = origin.trim_end_matches('/').to_owned();
        if let Err(status) = cache.get_or_discover(transport.as_ref(), &origin).await {
            HltbCounters::key_discovery_fail(&status);
            return Err(status);
        }

        Ok(HowLongToBeat {
            transport,
            cache,
            origin,
        })
    }

    pub fn cache(&self) -> &KeyCache {
        &self.cache
    }

    /// Searches games matching `query`. `page` is 1-based.
    ///
    /// A not-found answer from the search endpoint means the key went stale:
    /// the key is rediscovered and the search retried once.
    #[instrument(level = "trace", skip(self))]
    pub async fn search(&self, query: &str, page: u64) -> Result<SearchResults, Status> {
        if page == 0 {
            return Err(Status::invalid_argument("search pages start at 1"));
        }

        let mut key = self
            .cache
            .get_or_discover(self.transport.as_ref(), &self.origin)
            .await?;

        let mut attempt = 0;
        let result = loop {
            match self.post_search(query, page, &key).await {
                Err(Status::NotFound(msg)) if attempt < MAX_KEY_RETRIES => {
                    warn!("Search endpoint rejected key '{key}': {msg}");
                    HltbCounters::stale_key(&key);
                    attempt += 1;
                    let fresh = self
                        .cache
                        .rediscover(self.transport.as_ref(), &self.origin, &key)
                        .await;
                    key = match fresh {
                        Ok(fresh) => fresh,
                        Err(status) => {
                            warn!("Key rediscovery failed: {status}");
                            break Err(Status::NotFound(msg));
                        }
                    };
                }
                result => break result,
            }
        };

        SearchEvent::search(query, page, &result);
        result
    }

    /// Walks every result page of `query`, one request after the other.
    #[instrument(level = "trace", skip(self))]
    pub async fn search_all(&self, query: &str) -> Result<Vec<GameSearchResult>, Status> {
        let mut games = vec![];
        let mut page = 1;
        loop {
            let resp = self.search(query, page).await?;
            let done = resp.is_last_page() || resp.results.is_empty();
            games.extend(resp.results);
            if done {
                break;
            }
            page += 1;
        }

        info!("Found {} games matching '{query}'", games.len());
        Ok(games)
    }

    /// Returns the full record of the game with `id` by scraping its detail
    /// page.
    #[instrument(level = "trace", skip(self))]
    pub async fn get(&self, id: u64) -> Result<GameDetail, Status> {
        let url = format!("{}{GAME_PATH}{id}", self.origin);
        let result = self.get_detail(&url).await;
        DetailEvent::get(id, &result);
        result
    }

    async fn post_search(
        &self,
        query: &str,
        page: u64,
        key: &ApiKey,
    ) -> Result<SearchResults, Status> {
        let body = serde_json::to_string(&SearchRequest::new(query, page, key))?;
        let text = self
            .transport
            .post_json(&key.endpoint(&self.origin), body)
            .await?;

        let resp = serde_json::from_str::<SearchResponse>(&text).map_err(|e| {
            Status::malformed_response(format!("Failed to parse search response: {e}"))
        })?;

        Ok(SearchResults {
            results: resp.data.iter().map(extract::extract_search_result).collect(),
            pagination: Pagination {
                total_results: resp.count,
                current_page: page,
                last_page: resp.page_total,
            },
        })
    }

    async fn get_detail(&self, url: &str) -> Result<GameDetail, Status> {
        let text = self.transport.get(url).await?;
        let document = Html::parse_document(&text);

        let record = hltb_scrape::extract_game_record(&document)?;
        let mut game_detail = extract::extract_detail(&record, &self.origin);
        game_detail.merge(hltb_scrape::extract_markup(&document));

        Ok(game_detail)
    }
}

pub const HLTB_ORIGIN: &str = "https://howlongtobeat.com";
const GAME_PATH: &str = "/game?id=";
const MAX_KEY_RETRIES: u32 = 1;
