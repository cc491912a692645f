use crate::model::{FeedbackTarget, ThemePreference, WeatherSnapshot};

/// Presentation boundary. Implementations only observe state; they never drive it.
pub trait ViewRenderer: Send + Sync {
    fn on_loading(&self);
    fn on_ready(&self, snapshot: &WeatherSnapshot);
    fn on_failed(&self, message: &str);

    /// Visual nudge after a rejected or failed query.
    fn shake(&self, _target: FeedbackTarget) {}

    fn render_quick_access_cities(&self, cities: &[String]);
    fn apply_theme(&self, pref: ThemePreference);
}

/// Multi-line text used by "copy summary".
pub fn export_snapshot_as_text(snapshot: &WeatherSnapshot) -> String {
    format!(
        "Weather in {}: {}°C / {}°F, {}\nHumidity: {}%\nWind: {} km/h",
        snapshot.city_label,
        snapshot.temperature_c,
        snapshot.temperature_f,
        snapshot.condition_text,
        snapshot.humidity_pct,
        snapshot.wind_kmh,
    )
}

/// One-line variant.
pub fn short_summary(snapshot: &WeatherSnapshot) -> String {
    format!(
        "Weather in {}: {}°C, {}",
        snapshot.city_label, snapshot.temperature_c, snapshot.condition_text
    )
}
