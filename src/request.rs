use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::parse::{parse_page, ReviewPage};
use crate::{info_time, Error, Result, PAGE_SIZE, REQUEST_TIMEOUT_SECS, STEAM_STORE_URL};

/// Anything that can hand out one page of reviews for an app at a given cursor.
///
/// `SteamClient` is the real thing; tests plug in scripted sources.
pub trait PageSource: Send + Sync {
    fn request_page(&self, app_id: u32, cursor: &str) -> impl Future<Output = Result<ReviewPage>> + Send;
}

/// Talks to the Steam store `appreviews` endpoint.
#[derive(Debug, Clone)]
pub struct SteamClient {
    // Client uses Arc so we can clone cheaply
    client: Client,
    base_url: String,
}

impl SteamClient {
    /// Client for the public Steam store.
    pub fn new() -> Result<Self> {
        Self::with_base_url(STEAM_STORE_URL)
    }

    /// Points the client at a different host, e.g. a local mirror.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(SteamClient { client, base_url })
    }
}

impl PageSource for SteamClient {
    /// Requests a single page and decodes it.
    /// A non-success HTTP status is an error, a `success != 1` body is not.
    async fn request_page(&self, app_id: u32, cursor: &str) -> Result<ReviewPage> {
        info_time!("Requesting app {app_id} at cursor {cursor}");

        let res = self
            .client
            .get(format!("{}/appreviews/{app_id}", self.base_url))
            .query(&[("json", 1), ("num_per_page", PAGE_SIZE)])
            .query(&[("filter", "all"), ("cursor", cursor)])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                app_id,
                status: status.as_u16(),
            });
        }

        let body = res.text().await?;
        parse_page(&body)
    }
}
