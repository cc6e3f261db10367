use anyhow::Context;
use std::path::Path;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, DashboardState, FileStore, LookupOptions, TemperatureUnit, lookup, provider_from_config,
};
use tracing::debug;

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and the daily forecast for a city.
    Show {
        /// City name, e.g. "Paris" or "Paris,FR".
        city: String,

        /// Number of forecast days (defaults to the configured value).
        #[arg(long)]
        days: Option<usize>,

        /// Display unit for this call only: C or F.
        #[arg(long)]
        unit: Option<String>,
    },

    /// List recent searches.
    History {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// Set the display unit, or toggle it when no unit is given.
    Unit {
        /// C or F.
        unit: Option<String>,
    },

    /// Toggle dark mode.
    DarkMode,

    /// Forget all saved history, favorites and preferences.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    List,
    Add { city: String },
    Remove { city: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        // These two must work even when the state file is unreadable.
        match self.command {
            Command::Configure => return configure(),
            Command::Reset => {
                let store = FileStore::reset(FileStore::default_path()?)?;
                println!("Cleared saved state at {}", store.path().display());
                return Ok(());
            }
            _ => {}
        }

        let (mut store, state) = open_state(&FileStore::default_path()?)?;

        let next = match self.command {
            Command::Configure | Command::Reset => unreachable!("handled before opening state"),
            Command::Show { city, days, unit } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;

                let mut options = LookupOptions::from(&config);
                if let Some(days) = days {
                    options.days = days;
                }
                let unit = match unit {
                    Some(u) => TemperatureUnit::try_from(u.as_str())?,
                    None => state.unit,
                };

                let found = lookup(provider.as_ref(), &city, &state, &options).await?;

                let favorite = found.state.is_favorite(found.current.city.as_deref().unwrap_or(city.as_str()));
                println!("{}", display::current_card(&found.current, unit, favorite));
                if !found.daily.is_empty() {
                    println!();
                    println!("{}-Day Forecast", found.daily.len());
                    for day in &found.daily {
                        println!("{}", display::daily_row(day, unit));
                    }
                }

                found.state
            }
            Command::History { clear } => {
                if clear {
                    println!("Search history cleared.");
                    state.clear_history()
                } else {
                    print_list("Recent searches", &state.history);
                    return Ok(());
                }
            }
            Command::Favorites { action } => match action.unwrap_or(FavoritesAction::List) {
                FavoritesAction::List => {
                    print_list("Favorites", &state.favorites);
                    return Ok(());
                }
                FavoritesAction::Add { city } => state.add_favorite(&city),
                FavoritesAction::Remove { city } => state.remove_favorite(&city),
            },
            Command::Unit { unit } => {
                let next = match unit {
                    Some(u) => state.with_unit(TemperatureUnit::try_from(u.as_str())?),
                    None => state.toggle_unit(),
                };
                println!("Temperatures now shown in °{}.", next.unit);
                next
            }
            Command::DarkMode => {
                let next = state.toggle_dark_mode();
                println!("Dark mode {}.", if next.dark_mode { "on" } else { "off" });
                next
            }
        };

        next.save(&mut store).context("Failed to save dashboard state")
    }
}

fn open_state(path: &Path) -> anyhow::Result<(FileStore, DashboardState)> {
    let store = FileStore::open(path)?;
    let state = DashboardState::load(&store).with_context(|| {
        format!(
            "Saved state in {} is unreadable.\n\
             Hint: run `forecast reset` to start over.",
            path.display()
        )
    })?;
    debug!(path = %path.display(), "loaded dashboard state");
    Ok((store, state))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        println!("{title}: none");
        return;
    }

    println!("{title}:");
    for (i, item) in items.iter().enumerate() {
        println!("{:>2}. {item}", i + 1);
    }
}
