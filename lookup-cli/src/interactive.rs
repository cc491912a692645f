use anyhow::Context;
use inquire::{InquireError, Select, Text, error::InquireResult};
use std::{fmt, sync::Arc};

use wttr_lookup_core::{
    Config, SettingsStore, ThemePreference, UiState, ViewRenderer, WeatherLookupController,
    export_snapshot_as_text, provider::data_source_from_config, short_summary,
};

use crate::render::TerminalRenderer;

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuItem {
    City(String),
    Search,
    Summary,
    ShortSummary,
    ToggleTheme,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::City(name) => f.write_str(name),
            MenuItem::Search => f.write_str("Search another city…"),
            MenuItem::Summary => f.write_str("Show copyable summary"),
            MenuItem::ShortSummary => f.write_str("Show one-line summary"),
            MenuItem::ToggleTheme => f.write_str("Toggle theme"),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

fn menu(cities: &[String], has_result: bool) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = cities.iter().cloned().map(MenuItem::City).collect();
    items.push(MenuItem::Search);
    if has_result {
        items.push(MenuItem::Summary);
        items.push(MenuItem::ShortSummary);
    }
    items.push(MenuItem::ToggleTheme);
    items.push(MenuItem::Quit);
    items
}

/// Run a terminal prompt off the async worker threads.
async fn prompt<T, F>(ask: F) -> anyhow::Result<InquireResult<T>>
where
    T: Send + 'static,
    F: FnOnce() -> InquireResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(ask).await.context("Prompt task panicked")
}

/// Menu loop until the user quits or cancels a prompt.
pub async fn run(config: &Config, store: &dyn SettingsStore, mut theme: ThemePreference) -> anyhow::Result<()> {
    let source = data_source_from_config(config)?;
    let renderer = Arc::new(TerminalRenderer::new(theme));
    let controller = WeatherLookupController::new(Arc::new(source), renderer.clone())
        .with_timeout(config.request_timeout());

    controller.show_quick_access(&config.quick_cities);

    loop {
        let has_result = matches!(controller.state(), UiState::Ready(_));
        let items = menu(&config.quick_cities, has_result);
        let choice = prompt(move || Select::new("Weather for:", items).prompt()).await?;

        let item = match choice {
            Ok(item) => item,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read menu selection"),
        };

        match item {
            MenuItem::City(city) => controller.submit_query(&city).await,
            MenuItem::Search => match prompt(|| Text::new("City name:").prompt()).await? {
                Ok(raw) => controller.submit_query(&raw).await,
                Err(InquireError::OperationCanceled) => continue,
                Err(InquireError::OperationInterrupted) => break,
                Err(e) => return Err(e).context("Failed to read city name"),
            },
            MenuItem::Summary => {
                if let UiState::Ready(snapshot) = controller.state() {
                    println!("{}", export_snapshot_as_text(&snapshot));
                }
            }
            MenuItem::ShortSummary => {
                if let UiState::Ready(snapshot) = controller.state() {
                    println!("{}", short_summary(&snapshot));
                }
            }
            MenuItem::ToggleTheme => {
                theme = theme.toggle();
                store.save(theme).context("Failed to save theme")?;
                renderer.apply_theme(theme);
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}
