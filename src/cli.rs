use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

use crate::theme::Mode;

const ABOUT: &str = "Multi-day weather dashboard TUI";

const LONG_ABOUT: &str = "
TUI for browsing a multi-day forecast sourced from Open-Meteo.

Pick a city (e.g. Calgary, London, Tokyo) on the command line or cycle through them with Tab. Use
--list-cities to see every available city. Settings can also be stored in
~/.config/wxdash/config.toml.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "City to show first (e.g. Calgary, \"New York\")")]
    pub city: Option<String>,

    #[arg(long, help = "Start with temperatures in Fahrenheit")]
    pub fahrenheit: bool,

    #[arg(long, value_enum, help = "Start in the given theme instead of following the system")]
    pub theme: Option<Mode>,

    #[arg(long, value_name = "PATH", help = "Config file to use")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the available cities and exit")]
    pub list_cities: bool,
}

#[test]
fn test_args() {
    let args = Args::parse_from(["wxdash", "Tokyo", "--fahrenheit", "--theme", "dark"]);
    assert_eq!(args.city.as_deref(), Some("Tokyo"));
    assert!(args.fahrenheit);
    assert_eq!(args.theme, Some(Mode::Dark));
    assert!(!args.list_cities);
}
