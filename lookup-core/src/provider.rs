use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, error::FetchError, model::CityQuery, payload::RawPayload};

pub mod wttr;

pub use wttr::WttrProvider;

/// Source of raw current-condition reports.
#[async_trait]
pub trait WeatherDataSource: Send + Sync + Debug {
    async fn fetch_current_conditions(&self, city: &CityQuery) -> Result<RawPayload, FetchError>;
}

/// Construct the wttr.in data source from config.
pub fn data_source_from_config(config: &Config) -> anyhow::Result<WttrProvider> {
    WttrProvider::new(&config.base_url, config.request_timeout())
}
