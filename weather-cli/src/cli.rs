use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use tracing::debug;
use zipweather_core::{
    Config, DefaultLocation, FileSettingsStore, Outcome, ThemeController, WeatherApp,
    WeatherError, input::sanitize_zip_input,
};

use crate::output::print_lines;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "NWS forecast lookup by U.S. ZIP code")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the forecast for a ZIP code, or for the default location when omitted.
    Show {
        /// 5-digit U.S. ZIP code; non-digit characters are ignored.
        zip: Option<String>,
    },

    /// Show the default location, then prompt for ZIP codes until an empty line.
    Interactive,

    /// Show or toggle the light/dark theme.
    Theme {
        /// Flip the theme and remember the choice.
        #[arg(long)]
        toggle: bool,
    },

    /// Interactively set the User-Agent and the default location.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Show { zip: None }) {
            Command::Show { zip } => show(zip).await,
            Command::Interactive => interactive().await,
            Command::Theme { toggle } => theme(toggle),
            Command::Configure => configure(),
        }
    }
}

async fn show(zip: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let themes = ThemeController::load(FileSettingsStore::open()?);
    let app = WeatherApp::from_config(&config)?;

    let result = match zip {
        Some(raw) => app.handle_search(&sanitize_zip_input(&raw)).await,
        None => app.load_default().await,
    };
    log_outcome(&result);

    print_lines(&app.render(Local::now().date_naive()), themes.style());
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut themes = ThemeController::load(FileSettingsStore::open()?);
    let app = WeatherApp::from_config(&config)?;

    log_outcome(&app.load_default().await);
    print_lines(&app.render(Local::now().date_naive()), themes.style());

    loop {
        let style = themes.style();
        let answer = Text::new("ZIP code:")
            .with_help_message(&format!(
                "empty line or Esc to quit, 't' to {}",
                style.tooltip.to_lowercase()
            ))
            .prompt();

        let raw = match answer {
            Ok(raw) => raw,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            break;
        }
        if trimmed.eq_ignore_ascii_case("t") {
            themes.toggle()?;
        } else {
            log_outcome(&app.handle_search(&sanitize_zip_input(trimmed)).await);
        }

        println!();
        print_lines(&app.render(Local::now().date_naive()), themes.style());
    }

    Ok(())
}

/// Failures are already part of the rendered view; only record them.
fn log_outcome(result: &Result<Outcome, WeatherError>) {
    match result {
        Ok(outcome) => debug!(?outcome, "lookup finished"),
        Err(err) => debug!(kind = %err.kind(), "lookup failed"),
    }
}

fn theme(toggle: bool) -> anyhow::Result<()> {
    let mut themes = ThemeController::load(FileSettingsStore::open()?);
    if toggle {
        themes.toggle()?;
    }

    let style = themes.style();
    println!("Theme: {} ({})", themes.theme(), style.tooltip);
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let current = config.default_location();

    let user_agent = Text::new("User-Agent (include contact info for the NWS):")
        .with_default(config.user_agent())
        .prompt()?;
    let latitude = CustomType::<f64>::new("Default latitude:")
        .with_default(current.latitude)
        .with_error_message("Please enter a number")
        .prompt()?;
    let longitude = CustomType::<f64>::new("Default longitude:")
        .with_default(current.longitude)
        .with_error_message("Please enter a number")
        .prompt()?;
    let label = Text::new("Label shown when the location name can't be looked up:")
        .with_default(&current.label)
        .prompt()?;

    config.user_agent = Some(user_agent.trim().to_string());
    config.default_location = Some(DefaultLocation { latitude, longitude, label });
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_optional_zip() {
        let cli = Cli::try_parse_from(["weather", "show", "78155"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Show { zip: Some(ref z) }) if z == "78155"));

        let cli = Cli::try_parse_from(["weather"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn log_outcome_records_both_results() {
        log_outcome(&Ok(Outcome::Stale));
        log_outcome(&Err(WeatherError::retrieval()));
    }

    #[test]
    fn theme_toggle_flag() {
        let cli = Cli::try_parse_from(["weather", "theme", "--toggle"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Theme { toggle: true })));
    }
}
