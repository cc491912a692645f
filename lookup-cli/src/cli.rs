use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::{process::ExitCode, sync::Arc};

use wttr_lookup_core::{
    Config, FileSettingsStore, SettingsStore, ThemePreference, UiState, WeatherIcon,
    WeatherLookupController, WeatherSnapshot, export_snapshot_as_text, icon_for_condition,
    provider::data_source_from_config, short_summary,
};

use crate::{interactive, render::TerminalRenderer};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wttr", version, about = "Current weather for any city, via wttr.in")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up current weather for a city.
    Show {
        /// City name; multiple words are joined, e.g. `wttr show new york`.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the copyable text summary instead of the card.
        #[arg(long, conflicts_with_all = ["json", "short"])]
        summary: bool,

        /// Print a one-line summary instead of the card.
        #[arg(long, conflicts_with = "json")]
        short: bool,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Pick cities from a menu and look them up one after another (default).
    Interactive,

    /// Show or change the color theme.
    Theme {
        /// New theme; prints the current one when omitted.
        action: Option<ThemeAction>,
    },

    /// List the quick-access cities.
    Cities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

impl ThemeAction {
    fn apply(self, current: ThemePreference) -> ThemePreference {
        match self {
            ThemeAction::Light => ThemePreference::Light,
            ThemeAction::Dark => ThemePreference::Dark,
            ThemeAction::Toggle => current.toggle(),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;
        let store = FileSettingsStore::at_default_location()?;
        let theme = store.load()?;
        tracing::debug!(%theme, path = %store.path().display(), "settings loaded");

        match self.command.unwrap_or(Command::Interactive) {
            Command::Show { city, summary, short, json } => {
                let format = if json {
                    OutputFormat::Json
                } else if summary {
                    OutputFormat::Summary
                } else if short {
                    OutputFormat::Short
                } else {
                    OutputFormat::Card
                };
                show(&config, theme, &city.join(" "), format).await
            }
            Command::Interactive => {
                interactive::run(&config, &store, theme).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Theme { action } => {
                match action {
                    None => println!("{theme}"),
                    Some(action) => {
                        let next = action.apply(theme);
                        store.save(next).context("Failed to save theme")?;
                        println!("Theme set to {next}");
                    }
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Cities => {
                for city in &config.quick_cities {
                    println!("{city}");
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Card,
    Summary,
    Short,
    Json,
}

/// `--json` body: the snapshot plus the icon picked for its condition.
#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    snapshot: &'a WeatherSnapshot,
    icon: WeatherIcon,
    icon_url: &'static str,
}

impl<'a> ShowOutput<'a> {
    fn new(snapshot: &'a WeatherSnapshot) -> Self {
        let icon = icon_for_condition(&snapshot.condition_text);
        Self { snapshot, icon, icon_url: icon.png_url() }
    }
}

async fn show(
    config: &Config,
    theme: ThemePreference,
    city: &str,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let source = data_source_from_config(config)?;
    let renderer = TerminalRenderer::new(theme).quiet(format != OutputFormat::Card);
    let controller = WeatherLookupController::new(Arc::new(source), Arc::new(renderer))
        .with_timeout(config.request_timeout());

    controller.submit_query(city).await;

    match controller.state() {
        UiState::Ready(snapshot) => {
            match format {
                OutputFormat::Card => {}
                OutputFormat::Summary => println!("{}", export_snapshot_as_text(&snapshot)),
                OutputFormat::Short => println!("{}", short_summary(&snapshot)),
                OutputFormat::Json => {
                    let out = serde_json::to_string_pretty(&ShowOutput::new(&snapshot))
                        .context("Failed to serialize weather snapshot")?;
                    println!("{out}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_joins_city_words() {
        let cli = Cli::try_parse_from(["wttr", "show", "new", "york", "--json"]).unwrap();
        match cli.command {
            Some(Command::Show { city, summary, short, json }) => {
                assert_eq!(city.join(" "), "new york");
                assert!(!summary);
                assert!(!short);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["wttr", "show"]).is_err());
    }

    #[test]
    fn summary_conflicts_with_json() {
        assert!(Cli::try_parse_from(["wttr", "show", "Paris", "--summary", "--json"]).is_err());
    }

    #[test]
    fn short_flag_parses_and_conflicts() {
        let cli = Cli::try_parse_from(["wttr", "show", "Paris", "--short"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show { short: true, .. })));

        assert!(Cli::try_parse_from(["wttr", "show", "Paris", "--short", "--json"]).is_err());
        assert!(Cli::try_parse_from(["wttr", "show", "Paris", "--short", "--summary"]).is_err());
    }

    #[test]
    fn json_output_carries_icon() {
        let payload = serde_json::json!({
            "current_condition": [{
                "temp_C": "18", "humidity": "60", "windspeedKmph": "10",
                "weatherDesc": [{ "value": "Light rain" }]
            }],
            "nearest_area": [{ "areaName": [{ "value": "Paris" }] }]
        });
        let snapshot = WeatherSnapshot::from_payload(&payload).unwrap();

        let value = serde_json::to_value(ShowOutput::new(&snapshot)).unwrap();
        assert_eq!(value["city_label"], "Paris");
        assert_eq!(value["temperature_c"], 18.0);
        assert_eq!(value["icon"], "rain");
        assert_eq!(value["icon_url"], "https://wttr.in/png/rain.png");
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["wttr"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn theme_actions() {
        assert_eq!(ThemeAction::Toggle.apply(ThemePreference::Light), ThemePreference::Dark);
        assert_eq!(ThemeAction::Toggle.apply(ThemePreference::Dark), ThemePreference::Light);
        assert_eq!(ThemeAction::Light.apply(ThemePreference::Dark), ThemePreference::Light);

        let cli = Cli::try_parse_from(["wttr", "theme", "toggle"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Theme { action: Some(ThemeAction::Toggle) })
        ));
    }
}
