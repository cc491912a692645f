use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::{error::FetchError, model::CityQuery, payload::RawPayload};

use super::WeatherDataSource;

pub const DEFAULT_BASE_URL: &str = "https://wttr.in";

#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
    http: Client,
}

impl WttrProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url).map_err(|e| anyhow!("Invalid weather service URL '{base_url}': {e}"))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wttr-lookup/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// `<base>/<city>?format=j1`, with the city percent-encoded as one path segment.
    pub fn request_url(&self, city: &CityQuery) -> String {
        format!("{}/{}?format=j1", self.base_url, urlencoding::encode(city.as_str()))
    }
}

#[async_trait]
impl WeatherDataSource for WttrProvider {
    async fn fetch_current_conditions(&self, city: &CityQuery) -> Result<RawPayload, FetchError> {
        let url = self.request_url(city);
        tracing::debug!(%url, "requesting current conditions");

        let res = self.http.get(&url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
