use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LookupError;

/// A trimmed, non-empty city name. The only way to reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupError::EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Message shown for every fetch failure, whatever the cause.
    pub fn not_found_message(&self) -> String {
        format!("City '{}' not found. Please try again!", self.0)
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized result of one successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_label: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub feels_like_c: f64,
    pub condition_text: String,
    pub humidity_pct: f64,
    pub wind_kmh: f64,
    pub visibility_km: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub cloud_cover_pct: Option<f64>,
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherSnapshot {
    /// Rough UV exposure guess; wttr.in's current block carries no UV reading we trust.
    pub fn uv_exposure(&self) -> Option<UvExposure> {
        self.cloud_cover_pct.map(UvExposure::from_cloud_cover)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UvExposure {
    Low,
    Moderate,
    High,
}

impl UvExposure {
    pub fn from_cloud_cover(pct: f64) -> Self {
        if pct > 50.0 {
            UvExposure::Low
        } else if pct > 20.0 {
            UvExposure::Moderate
        } else {
            UvExposure::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UvExposure::Low => "Low",
            UvExposure::Moderate => "Moderate",
            UvExposure::High => "High",
        }
    }
}

/// Lookup state as seen by the renderer. Only the controller writes it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Ready(WeatherSnapshot),
    Failed(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Ready(_) => "ready",
            UiState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the "shake" feedback should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTarget {
    Input,
    Container,
}
