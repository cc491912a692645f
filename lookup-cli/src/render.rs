use crossterm::style::{Color, Stylize};
use std::sync::atomic::{AtomicBool, Ordering};

use wttr_lookup_core::{
    FeedbackTarget, ThemePreference, ViewRenderer, WeatherSnapshot, icon_for_condition,
};

/// Renders lookup state to the terminal. Results go to stdout, progress and
/// errors to stderr.
#[derive(Debug)]
pub struct TerminalRenderer {
    dark: AtomicBool,
    quiet: bool,
}

impl TerminalRenderer {
    pub fn new(theme: ThemePreference) -> Self {
        Self {
            dark: AtomicBool::new(theme == ThemePreference::Dark),
            quiet: false,
        }
    }

    /// Skip the weather card; the caller prints its own output.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn accent(&self) -> Color {
        if self.dark.load(Ordering::Relaxed) { Color::Yellow } else { Color::Blue }
    }
}

/// Plain-text lines of the weather card, header first.
pub fn card_lines(snapshot: &WeatherSnapshot) -> Vec<String> {
    let icon = icon_for_condition(&snapshot.condition_text);

    let mut place = vec![snapshot.city_label.as_str()];
    place.extend(snapshot.region.as_deref());
    place.extend(snapshot.country.as_deref());

    let mut lines = vec![
        format!("{}  {}", icon.emoji(), place.join(", ")),
        format!(
            "{}°C / {}°F  {}",
            snapshot.temperature_c, snapshot.temperature_f, snapshot.condition_text
        ),
        format!(
            "Feels like {}°C · Humidity {}% · Wind {} km/h",
            snapshot.feels_like_c, snapshot.humidity_pct, snapshot.wind_kmh
        ),
    ];

    let mut extras = Vec::new();
    if let Some(v) = snapshot.visibility_km {
        extras.push(format!("Visibility {v:.1} km"));
    }
    if let Some(p) = snapshot.pressure_hpa {
        extras.push(format!("Pressure {p} hPa"));
    }
    if let Some(uv) = snapshot.uv_exposure() {
        extras.push(format!("UV {}", uv.as_str()));
    }
    if !extras.is_empty() {
        lines.push(extras.join(" · "));
    }

    if let Some(observed) = snapshot.observed_at {
        lines.push(format!("Observed {}", observed.format("%Y-%m-%d %H:%M")));
    }

    lines
}

impl ViewRenderer for TerminalRenderer {
    fn on_loading(&self) {
        eprintln!("{}", "Fetching weather…".dim());
    }

    fn on_ready(&self, snapshot: &WeatherSnapshot) {
        if self.quiet {
            return;
        }

        let accent = self.accent();
        let mut lines = card_lines(snapshot).into_iter();
        if let Some(header) = lines.next() {
            println!("{}", header.bold().with(accent));
        }
        for line in lines {
            println!("   {line}");
        }
    }

    fn on_failed(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    fn shake(&self, target: FeedbackTarget) {
        if target == FeedbackTarget::Input {
            eprint!("\x07");
        }
    }

    fn render_quick_access_cities(&self, cities: &[String]) {
        if cities.is_empty() {
            return;
        }
        println!("{} {}", "Popular:".bold(), cities.join(" · ").with(self.accent()));
    }

    fn apply_theme(&self, pref: ThemePreference) {
        self.dark.store(pref == ThemePreference::Dark, Ordering::Relaxed);
        eprintln!("{} {}", "Theme:".dim(), pref.as_str().with(self.accent()));
    }
}
