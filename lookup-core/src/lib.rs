//! Core library for the `wttr` city weather lookup.
//!
//! This crate defines:
//! - The lookup controller and its UI state machine
//! - The wttr.in data source and report normalization
//! - The renderer boundary, icon mapping and text export
//! - Configuration & theme persistence
//!
//! It is used by `wttr-lookup`, but any front end that implements
//! [`ViewRenderer`] can drive it.

pub mod config;
pub mod controller;
pub mod error;
pub mod icon;
pub mod model;
pub mod payload;
pub mod provider;
pub mod render;

pub use config::{Config, FileSettingsStore, SettingsStore};
pub use controller::WeatherLookupController;
pub use error::{FetchError, LookupError};
pub use icon::{WeatherIcon, icon_for_condition};
pub use model::{CityQuery, FeedbackTarget, ThemePreference, UiState, UvExposure, WeatherSnapshot};
pub use payload::RawPayload;
pub use provider::{WeatherDataSource, WttrProvider};
pub use render::{ViewRenderer, export_snapshot_as_text, short_summary};
