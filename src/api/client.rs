//! reqwestによるAPIクライアント

use super::VisitApi;
use crate::config::Config;
use crate::error::{AdminError, Result};
use async_trait::async_trait;
use heritage_common::export::FetchedImage;
use heritage_common::{Envelope, VisitDetail, VisitSummary};
use reqwest::{Client, Response};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// HTTP実装
pub struct HttpVisitApi {
    client: Client,
    base_url: String,
    proxy_url: String,
}

impl HttpVisitApi {
    pub fn new(base_url: &str, proxy_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        debug!("API client: base={}, proxy={}", base_url, proxy_url);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            proxy_url: proxy_url.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url, &config.proxy_url(), config.timeout_seconds)
    }

    fn visits_url(&self) -> String {
        format!("{}/api/visits", self.base_url)
    }

    fn visit_url(&self, id: i64) -> String {
        format!("{}/api/visits/{}", self.base_url, id)
    }
}

/// 2xx以外をAPIエラーに変換
async fn check_status(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("{} failed: status={} body={}", action, status, body);
    Err(AdminError::Api {
        status: status.as_u16(),
        message: format!("Failed to {}", action),
    })
}

#[async_trait]
impl VisitApi for HttpVisitApi {
    #[instrument(skip(self))]
    async fn list_visits(&self) -> Result<Vec<VisitSummary>> {
        let response = self.client.get(self.visits_url()).send().await?;
        let response = check_status(response, "fetch visits").await?;
        let envelope: Envelope<Vec<VisitSummary>> = response.json().await?;
        info!("fetched {} visits", envelope.data.len());
        Ok(envelope.data)
    }

    #[instrument(skip(self))]
    async fn get_visit(&self, id: i64) -> Result<Option<VisitDetail>> {
        let url = format!("{}/", self.visits_url());
        let response = self
            .client
            .get(url)
            .query(&[("filters[id]", id.to_string()), ("populate", "*".to_string())])
            .send()
            .await?;
        let response = check_status(response, "fetch visit").await?;
        let envelope: Envelope<Option<Vec<VisitDetail>>> = response.json().await?;
        Ok(envelope.data.and_then(|mut items| {
            if items.is_empty() {
                None
            } else {
                Some(items.swap_remove(0))
            }
        }))
    }

    #[instrument(skip(self))]
    async fn set_confirmation(&self, id: i64, confirmed: bool) -> Result<VisitSummary> {
        let body = json!({ "data": { "Confirmation": confirmed } });
        let response = self
            .client
            .put(self.visit_url(id))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response, "update confirmation").await?;
        let envelope: Envelope<VisitSummary> = response.json().await?;
        info!("visit #{} confirmation -> {}", id, confirmed);
        Ok(envelope.data)
    }

    #[instrument(skip(self))]
    async fn delete_visit(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.visit_url(id))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        check_status(response, "delete visit").await?;
        info!("visit #{} deleted", id);
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn fetch_image(&self, url: &str, token: &str) -> Result<FetchedImage> {
        let response = self
            .client
            .get(&self.proxy_url)
            .query(&[("url", url)])
            .bearer_auth(token)
            .send()
            .await?;
        let response = check_status(response, "fetch image").await?;
        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();
        debug!("fetched image {} ({} bytes, {})", url, bytes.len(), mime);
        Ok(FetchedImage { bytes, mime })
    }
}
