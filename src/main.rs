use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, fs::File, io, path::Path, sync::mpsc, sync::Mutex};
use tracing_subscriber::EnvFilter;

mod app;
mod cities;
mod cli;
mod config;
mod error;
mod openmeteo;
mod system_theme;
mod theme;
mod ui;
mod units;
mod weather;

use crate::app::{run_app, App};
use crate::cities::CityRegistry;
use crate::cli::Args;
use crate::config::Config;
use crate::openmeteo::ForecastLoader;
use crate::theme::ThemeManager;
use crate::units::temperature::Unit;

/// Stdout belongs to the TUI, so logs go to a file or nowhere.
fn init_logging(path: Option<&Path>) {
    let Some(path) = path else { return };
    if let Some(dir) = path.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = File::options().create(true).append(true).open(path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let mut cities = CityRegistry::default();
    if args.list_cities {
        for city in cities.cities() {
            println!("{}", city.label());
        }
        return Ok(());
    }
    if let Some(name) = args.city.as_deref().or(config.city.as_deref()) {
        let index = cities.position(name)?;
        cities.select(index)?;
    }

    init_logging(config.log_path().as_deref());

    let unit = if args.fahrenheit {
        Unit::Fahrenheit
    } else {
        config.unit
    };
    let hint_file = config.theme_hint_file.as_deref();
    let theme = ThemeManager::new(
        args.theme.or(config.theme),
        system_theme::prefers_dark(hint_file),
    );
    let loader = ForecastLoader::new(&config.base_url, &config.user_agent)?;

    let (tx, rx) = mpsc::channel();
    if let Some(path) = config.theme_hint_file.clone() {
        system_theme::watch(path, config.theme_poll_interval(), tx.clone());
    }

    tracing::info!(city = cities.current().name, "starting");

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let app = App::new(cities, unit, theme);
    let res = run_app(&mut terminal, app, loader, tx, rx);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "ui loop failed");
        println!("{:?}", err)
    }

    Ok(())
}
