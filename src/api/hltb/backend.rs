use async_trait::async_trait;
use reqwest::{header, Client, ClientBuilder};
use tracing::{error, instrument};

use crate::Status;

/// HTTP surface used by the HowLongToBeat client.
///
/// Implementations return the response body on success. A 404 response must be
/// reported as `Status::NotFound` since that is how a stale API key shows up.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, Status>;

    /// Sends `body` as a JSON document.
    async fn post_json(&self, url: &str, body: String) -> Result<String, Status>;
}

/// Default transport backed by `reqwest`.
///
/// HowLongToBeat rejects requests that do not look like they come from a
/// browser, so a user agent and referer are always sent.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, Status> {
        let mut request_headers = header::HeaderMap::new();
        request_headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );
        request_headers.insert(
            header::REFERER,
            header::HeaderValue::from_static(REFERER),
        );
        request_headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US;en"),
        );

        let client = ClientBuilder::new()
            .default_headers(request_headers)
            .cookie_store(true)
            .build()?;

        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(level = "trace", skip(self))]
    async fn get(&self, url: &str) -> Result<String, Status> {
        let resp = self.client.get(url).send().await?;
        let resp = resp.error_for_status().map_err(|e| {
            error!("GET {url} failed: {e}");
            Status::from(e)
        })?;
        Ok(resp.text().await?)
    }

    #[instrument(level = "trace", skip(self, body))]
    async fn post_json(&self, url: &str, body: String) -> Result<String, Status> {
        let resp = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let resp = resp.error_for_status().map_err(|e| {
            error!("POST {url} failed: {e}");
            Status::from(e)
        })?;
        Ok(resp.text().await?)
    }
}

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REFERER: &str = "https://howlongtobeat.com/";
