use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, MainCard, Status, FAILED_TEXT, LOADING_TEXT};
use crate::theme::Palette;
use crate::units::temperature::Unit;
use crate::weather::{icon_for, style_class_for, DailyForecast};

const HELP: &str = " q quit  u unit  t theme  ←/→ 1-9 day  Tab/S-Tab city  r reload";

/// Screen regions. Drawing and mouse hit-testing both go through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub theme_button: Rect,
    pub city_selector: Rect,
    pub unit_button: Rect,
    pub status: Rect,
    pub main: Rect,
    pub strip: Rect,
    pub help: Rect,
}

impl Areas {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(7),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(26),
                Constraint::Min(20),
                Constraint::Length(8),
            ])
            .split(rows[0]);

        Self {
            theme_button: header[0],
            city_selector: header[1],
            unit_button: header[2],
            status: rows[1],
            main: rows[2],
            strip: rows[3],
            help: rows[4],
        }
    }
}

/// One equal-width slot per forecast day.
pub fn mini_card_areas(strip: Rect, n: usize) -> Vec<Rect> {
    if n == 0 {
        return vec![];
    }
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, n as u32); n])
        .split(strip)
        .to_vec()
}

fn button(palette: &Palette, enabled: bool) -> Block<'static> {
    let color = if enabled { palette.border } else { palette.dim };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .border_type(BorderType::Rounded)
}

fn temperature(day: &DailyForecast, unit: Unit) -> String {
    format!("{}{}", day.temperature(unit), unit.symbol())
}

pub fn render_main(
    day: Option<&DailyForecast>,
    card: MainCard,
    unit: Unit,
    title: &str,
    palette: &Palette,
) -> Paragraph<'static> {
    let (cond, lines) = match (card, day) {
        (MainCard::Day, Some(day)) => (
            Some(day.condition),
            vec![
                Line::from(""),
                Line::from(Span::raw(day.condition.icon())),
                Line::from(Span::styled(
                    temperature(day, unit),
                    Style::default()
                        .fg(palette.fg)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::raw(day.condition.text())),
                Line::from(Span::styled(day.day.clone(), Style::default().fg(palette.dim))),
            ],
        ),
        (MainCard::Loading, _) => (None, placeholder(LOADING_TEXT)),
        _ => (None, placeholder(FAILED_TEXT)),
    };

    let accent = palette.card(style_class_for(cond));
    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {title} "),
                Style::default().fg(palette.accent),
            ))
            .title_alignment(Alignment::Left)
            .border_style(Style::default().fg(accent))
            .border_type(BorderType::Rounded),
    )
}

fn placeholder(text: &'static str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(icon_for(None)),
        Line::from(""),
        Line::from(text),
    ]
}

/// One compact card per day; exactly the selected one is marked active.
pub fn render_mini(
    forecast: &[DailyForecast],
    selected: usize,
    unit: Unit,
    palette: &Palette,
) -> Vec<Paragraph<'static>> {
    forecast
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let active = i == selected;
            let (border, marker) = if active {
                (
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                    "▸ ",
                )
            } else {
                (Style::default().fg(palette.border), "")
            };
            Paragraph::new(vec![
                Line::from(day.condition.icon()),
                Line::from(format!("{marker}{}", day.day)),
                Line::from(format!("{}°", day.temperature(unit))),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .border_type(if active {
                        BorderType::Thick
                    } else {
                        BorderType::Rounded
                    }),
            )
        })
        .collect()
}

fn status_line(status: &Status, palette: &Palette) -> Paragraph<'static> {
    match status {
        Status::Hidden => Paragraph::new(""),
        Status::Loading => Paragraph::new(Span::styled(
            " Loading…",
            Style::default().fg(palette.accent),
        )),
        Status::Error(msg) => Paragraph::new(Span::styled(
            format!(" {msg}"),
            Style::default().fg(palette.error),
        )),
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.theme.palette();
    let areas = Areas::new(f.area());

    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        f.area(),
    );

    let theme_button = Paragraph::new(format!(
        "{} {}",
        app.theme.toggle_icon(),
        app.theme.toggle_tooltip()
    ))
    .block(button(&palette, true));
    f.render_widget(theme_button, areas.theme_button);

    let city = app.cities.current();
    let selector = Paragraph::new(Line::from(vec![
        Span::raw("‹ "),
        Span::styled(city.label(), Style::default().fg(palette.accent)),
        Span::raw(" › "),
        Span::styled(
            format!("({}/{})", app.cities.selected_index() + 1, app.cities.len()),
            Style::default().fg(palette.dim),
        ),
    ]))
    .block(button(&palette, true).title(" City "));
    f.render_widget(selector, areas.city_selector);

    // Shows the unit a press switches to.
    let unit_button = Paragraph::new(app.unit.toggled().symbol())
        .alignment(Alignment::Center)
        .style(if app.unit_enabled {
            Style::default()
        } else {
            Style::default().fg(palette.dim)
        })
        .block(button(&palette, app.unit_enabled));
    f.render_widget(unit_button, areas.unit_button);

    f.render_widget(status_line(&app.status, &palette), areas.status);

    let main = render_main(
        app.current_day(),
        app.main,
        app.unit,
        &app.city_label,
        &palette,
    );
    f.render_widget(main, areas.main);

    let cards = render_mini(&app.forecast, app.selected_day, app.unit, &palette);
    for (card, rect) in cards
        .into_iter()
        .zip(mini_card_areas(areas.strip, app.forecast.len()))
    {
        f.render_widget(card, rect);
    }

    f.render_widget(
        Paragraph::new(Span::styled(HELP, Style::default().fg(palette.dim))),
        areas.help,
    );
}
