use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, layout::Position, layout::Rect, Terminal};

use crate::cities::{City, CityRegistry};
use crate::error::FetchError;
use crate::openmeteo::ForecastLoader;
use crate::theme::ThemeManager;
use crate::ui;
use crate::units::temperature::Unit;
use crate::weather::DailyForecast;

pub const LOADING_TEXT: &str = "Loading forecast...";
pub const FAILED_TEXT: &str = "Failed to load weather data";

#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    Loaded {
        city: &'static str,
        result: Result<Vec<DailyForecast>, FetchError>,
    },
    SystemTheme(bool),
}

/// Side effects requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch(City),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Hidden,
    Loading,
    Error(String),
}

/// What the main card is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCard {
    Loading,
    Failed,
    Day,
}

/// All UI state for one session. The renderer reads it, the event handlers
/// mutate it; nothing else is shared.
#[derive(Debug, Clone)]
pub struct App {
    pub cities: CityRegistry,
    pub unit: Unit,
    pub selected_day: usize,
    pub theme: ThemeManager,
    pub forecast: Vec<DailyForecast>,
    /// City shown in the title, refreshed on each successful load.
    pub city_label: String,
    pub status: Status,
    pub main: MainCard,
    pub unit_enabled: bool,
    pub viewport: Rect,
}

impl App {
    pub fn new(cities: CityRegistry, unit: Unit, theme: ThemeManager) -> Self {
        let city_label = cities.current().label();
        Self {
            cities,
            unit,
            selected_day: 0,
            theme,
            forecast: Vec::new(),
            city_label,
            status: Status::Hidden,
            main: MainCard::Loading,
            unit_enabled: false,
            viewport: Rect::default(),
        }
    }

    pub fn start(&mut self) -> Vec<Command> {
        vec![self.begin_load()]
    }

    pub fn handle(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Input(Event::Key(key)) => self.on_key(key),
            AppEvent::Input(Event::Mouse(mouse)) => self.on_mouse(mouse),
            AppEvent::Input(Event::Resize(w, h)) => {
                self.viewport = Rect::new(0, 0, w, h);
                vec![]
            }
            AppEvent::Input(_) => vec![],
            AppEvent::Loaded { city, result } => {
                self.on_loaded(city, result);
                vec![]
            }
            AppEvent::SystemTheme(dark) => {
                self.theme.on_system_change(dark);
                vec![]
            }
        }
    }

    fn begin_load(&mut self) -> Command {
        self.status = Status::Loading;
        self.unit_enabled = false;
        self.main = MainCard::Loading;
        Command::Fetch(self.cities.current().clone())
    }

    /// Applied in arrival order; a slow response for a previously selected
    /// city still replaces the forecast.
    fn on_loaded(&mut self, city: &str, result: Result<Vec<DailyForecast>, FetchError>) {
        match result {
            Ok(days) => {
                self.forecast = days;
                self.selected_day = 0;
                self.city_label = self.cities.current().label();
                self.status = Status::Hidden;
                self.unit_enabled = true;
                self.main = MainCard::Day;
            }
            Err(err) => {
                tracing::error!(city, error = %err, "forecast load failed");
                self.status = Status::Error(format!("Error: {err}"));
                self.main = MainCard::Failed;
            }
        }
    }

    pub fn toggle_unit(&mut self) {
        if !self.unit_enabled {
            return;
        }
        self.unit = self.unit.toggled();
        tracing::debug!(unit = self.unit.symbol(), "unit toggled");
    }

    pub fn select_day(&mut self, index: usize) {
        if index >= self.forecast.len() {
            return;
        }
        self.selected_day = index;
        self.main = MainCard::Day;
        tracing::debug!(day = index, "day selected");
    }

    pub fn select_city(&mut self, index: usize) -> Vec<Command> {
        match self.cities.select(index) {
            Ok(city) => {
                tracing::debug!(city = city.name, "city selected");
                vec![self.begin_load()]
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring city selection");
                vec![]
            }
        }
    }

    pub fn current_day(&self) -> Option<&DailyForecast> {
        self.forecast.get(self.selected_day)
    }

    fn on_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return vec![Command::Quit],
            KeyCode::Char('u') => self.toggle_unit(),
            KeyCode::Char('t') => self.theme.toggle(),
            KeyCode::Char('r') => return vec![self.begin_load()],
            KeyCode::Tab | KeyCode::Char('c') => return self.select_city(self.cities.next_index()),
            KeyCode::BackTab | KeyCode::Char('C') => {
                return self.select_city(self.cities.prev_index())
            }
            KeyCode::Left => self.select_day(self.selected_day.saturating_sub(1)),
            KeyCode::Right => self.select_day(self.selected_day + 1),
            KeyCode::Char(c @ '1'..='9') => self.select_day(c as usize - '1' as usize),
            _ => {}
        }
        vec![]
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> Vec<Command> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let pos = Position::new(mouse.column, mouse.row);
        let areas = ui::Areas::new(self.viewport);

        if areas.theme_button.contains(pos) {
            self.theme.toggle();
        } else if areas.unit_button.contains(pos) {
            self.toggle_unit();
        } else if areas.city_selector.contains(pos) {
            return self.select_city(self.cities.next_index());
        } else if let Some(index) = ui::mini_card_areas(areas.strip, self.forecast.len())
            .iter()
            .position(|r| r.contains(pos))
        {
            self.select_day(index);
        }
        vec![]
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    loader: ForecastLoader,
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
) -> io::Result<()> {
    spawn_input(tx.clone());

    let size = terminal.size()?;
    app.viewport = Rect::new(0, 0, size.width, size.height);

    let mut commands = app.start();
    loop {
        for command in commands.drain(..) {
            match command {
                Command::Quit => return Ok(()),
                Command::Fetch(city) => spawn_fetch(loader.clone(), city, tx.clone()),
            }
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        let Ok(event) = rx.recv() else {
            return Ok(());
        };
        commands = app.handle(event);
    }
}

fn spawn_input(tx: Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(AppEvent::Input(ev)).is_err() {
                    return;
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "terminal input failed");
                return;
            }
        }
    });
}

/// Overlapping fetches are neither serialized nor cancelled.
fn spawn_fetch(loader: ForecastLoader, city: City, tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let result = loader.load(&city);
        let _ = tx.send(AppEvent::Loaded {
            city: city.name,
            result,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::Condition;
    use crossterm::event::KeyModifiers;

    fn day(label: &str, temp_c: i32, condition: Condition) -> DailyForecast {
        DailyForecast {
            day: label.to_string(),
            temp_c,
            temp_f: crate::units::temperature::whole_c2f(temp_c),
            condition,
        }
    }

    fn week() -> Vec<DailyForecast> {
        vec![
            day("Mon", 5, Condition::Sunny),
            day("Tue", -1, Condition::Rain),
            day("Wed", 12, Condition::Snow),
        ]
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn click(column: u16, row: u16) -> AppEvent {
        AppEvent::Input(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn loaded(result: Result<Vec<DailyForecast>, FetchError>) -> AppEvent {
        AppEvent::Loaded {
            city: "Calgary",
            result,
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(
            CityRegistry::default(),
            Unit::Celsius,
            ThemeManager::new(None, false),
        );
        app.viewport = Rect::new(0, 0, 80, 30);
        assert_eq!(app.start().len(), 1);
        app.handle(loaded(Ok(week())));
        app
    }

    #[test]
    fn test_start_requests_current_city() {
        let mut app = App::new(
            CityRegistry::default(),
            Unit::Celsius,
            ThemeManager::new(None, false),
        );
        let commands = app.start();
        assert!(matches!(&commands[..], [Command::Fetch(c)] if c.name == "Calgary"));
        assert_eq!(app.status, Status::Loading);
        assert_eq!(app.main, MainCard::Loading);
        assert!(!app.unit_enabled);
    }

    #[test]
    fn test_load_resets_selected_day() {
        let mut app = loaded_app();
        app.select_day(2);
        assert_eq!(app.selected_day, 2);

        app.handle(key(KeyCode::Char('r')));
        app.handle(loaded(Ok(week())));
        assert_eq!(app.selected_day, 0);
        assert_eq!(app.status, Status::Hidden);
        assert!(app.unit_enabled);
    }

    #[test]
    fn test_unit_toggle_keeps_selection() {
        let mut app = loaded_app();
        app.select_day(1);
        let commands = app.handle(key(KeyCode::Char('u')));
        assert!(commands.is_empty());
        assert_eq!(app.unit, Unit::Fahrenheit);
        assert_eq!(app.selected_day, 1);
        assert_eq!(app.cities.selected_index(), 0);
        assert_eq!(app.current_day().map(|d| d.temperature(app.unit)), Some(30));
    }

    #[test]
    fn test_unit_toggle_disabled_while_loading() {
        let mut app = loaded_app();
        app.handle(key(KeyCode::Tab));
        app.handle(key(KeyCode::Char('u')));
        assert_eq!(app.unit, Unit::Celsius);
    }

    #[test]
    fn test_day_selection() {
        let mut app = loaded_app();
        app.handle(key(KeyCode::Char('3')));
        assert_eq!(app.selected_day, 2);
        app.handle(key(KeyCode::Right));
        assert_eq!(app.selected_day, 2);
        app.handle(key(KeyCode::Left));
        assert_eq!(app.selected_day, 1);
        app.handle(key(KeyCode::Char('9')));
        assert_eq!(app.selected_day, 1);
    }

    #[test]
    fn test_city_selection_refetches() {
        let mut app = loaded_app();
        let commands = app.handle(key(KeyCode::Tab));
        assert!(matches!(&commands[..], [Command::Fetch(c)] if c.name == "New York"));
        assert_eq!(app.cities.selected_index(), 1);
        assert_eq!(app.status, Status::Loading);

        let commands = app.handle(key(KeyCode::BackTab));
        assert!(matches!(&commands[..], [Command::Fetch(c)] if c.name == "Calgary"));
        assert!(app.select_city(99).is_empty());
    }

    #[test]
    fn test_http_error_keeps_forecast() {
        let mut app = loaded_app();
        app.handle(key(KeyCode::Char('r')));
        app.handle(loaded(Err(FetchError::Status(500))));
        assert_eq!(app.status, Status::Error("Error: HTTP 500".to_string()));
        assert_eq!(app.main, MainCard::Failed);
        assert_eq!(app.forecast, week());
        assert!(!app.unit_enabled);
    }

    #[test]
    fn test_last_resolved_wins() {
        let mut app = loaded_app();
        app.handle(key(KeyCode::Tab));
        app.handle(key(KeyCode::Tab));
        app.handle(loaded(Ok(vec![day("Thu", 30, Condition::Thunderstorm)])));
        app.handle(loaded(Ok(week())));
        assert_eq!(app.forecast, week());
        assert_eq!(app.city_label, "🇬🇧 London");
    }

    #[test]
    fn test_system_theme_after_toggle() {
        let mut app = loaded_app();
        app.handle(AppEvent::SystemTheme(true));
        assert!(app.theme.is_dark());
        app.handle(key(KeyCode::Char('t')));
        assert!(!app.theme.is_dark());
        app.handle(AppEvent::SystemTheme(true));
        assert!(!app.theme.is_dark());
    }

    #[test]
    fn test_click_mini_card() {
        let mut app = loaded_app();
        let areas = ui::Areas::new(app.viewport);
        let cards = ui::mini_card_areas(areas.strip, app.forecast.len());
        let target = cards[2];
        let commands = app.handle(click(target.x + 1, target.y + 1));
        assert!(commands.is_empty());
        assert_eq!(app.selected_day, 2);
    }

    #[test]
    fn test_click_header_buttons() {
        let mut app = loaded_app();
        let areas = ui::Areas::new(app.viewport);

        app.handle(click(areas.unit_button.x + 1, areas.unit_button.y + 1));
        assert_eq!(app.unit, Unit::Fahrenheit);

        app.handle(click(areas.theme_button.x + 1, areas.theme_button.y + 1));
        assert!(app.theme.user_overridden());

        let commands = app.handle(click(areas.city_selector.x + 1, areas.city_selector.y + 1));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_quit() {
        let mut app = loaded_app();
        assert_eq!(app.handle(key(KeyCode::Char('q'))), vec![Command::Quit]);
    }
}
