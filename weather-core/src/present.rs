//! View state for one screen and the pure functions that turn it into display lines.

use chrono::{Duration, NaiveDate};

use crate::{
    error::MSG_NO_DATA,
    model::{DailySummary, HourlyEntry},
};

const UNKNOWN_LOCATION: &str = "Unknown Location";
const PLACEHOLDER: &str = "--";

const DAILY_HEADERS: [&str; 5] = ["Date", "High/Low", "Precip", "Wind", "Conditions"];
const HOURLY_HEADERS: [&str; 5] = ["Time", "Temp", "Precip", "Wind", "Conditions"];

/// Everything the screen shows. Only the [`Presenter`] mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
    /// Cleaned location banner text.
    pub location: Option<String>,
    pub daily: Vec<DailySummary>,
    pub hourly: Vec<HourlyEntry>,
    pub daily_visible: bool,
    pub hourly_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Banner,
    Loading,
    Error,
    Heading,
    TableHeader,
    Row,
    Blank,
}

/// A single display instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Presenter {
    state: ViewState,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn show_loading(&mut self, show: bool) {
        self.state.loading = show;
    }

    /// Show `message` and hide both forecast sections.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.state.error = Some(message.into());
        self.state.daily_visible = false;
        self.state.hourly_visible = false;
    }

    /// Clears the banner only; sections come back with the next successful fetch.
    pub fn hide_error(&mut self) {
        self.state.error = None;
    }

    pub fn display_location(&mut self, name: Option<&str>) {
        self.state.location = Some(clean_location_name(name));
    }

    pub fn display_daily(&mut self, daily: Vec<DailySummary>) {
        if daily.is_empty() {
            self.state.daily.clear();
            self.show_error(MSG_NO_DATA);
            return;
        }
        self.state.daily = daily;
        self.state.daily_visible = true;
    }

    /// Hidden when empty, and while an error is showing.
    pub fn display_hourly(&mut self, hourly: Vec<HourlyEntry>) {
        self.state.hourly_visible = !hourly.is_empty() && self.state.error.is_none();
        self.state.hourly = hourly;
    }

    pub fn render(&self, today: NaiveDate) -> Vec<Line> {
        render(&self.state, today)
    }
}

/// Reduce a Nominatim display name like "City, County, State, Country" to "City, State".
pub fn clean_location_name(name: Option<&str>) -> String {
    let Some(name) = name else {
        return UNKNOWN_LOCATION.to_string();
    };

    let parts: Vec<&str> = name.split(',').collect();
    if parts.len() >= 3 {
        format!("{}, {}", parts[0].trim(), parts[2].trim())
    } else {
        name.to_string()
    }
}

pub fn display_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.checked_add_signed(Duration::days(1)) {
        "Tomorrow".to_string()
    } else {
        date.format("%a, %b %-d").to_string()
    }
}

pub fn temperature_display(high: &str, low: &str) -> String {
    match (high.is_empty(), low.is_empty()) {
        (false, false) => format!("{high}/{low}"),
        (false, true) => high.to_string(),
        (true, false) => low.to_string(),
        (true, true) => PLACEHOLDER.to_string(),
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { PLACEHOLDER } else { value }
}

pub fn render(state: &ViewState, today: NaiveDate) -> Vec<Line> {
    let mut lines = vec![Line::new(LineKind::Title, today.format("%A, %B %-d, %Y").to_string())];

    if let Some(location) = &state.location {
        lines.push(Line::new(LineKind::Banner, format!("Showing weather for {location}")));
    }

    if state.loading {
        lines.push(Line::new(LineKind::Loading, "Loading weather data..."));
        return lines;
    }

    if let Some(error) = &state.error {
        lines.push(Line::new(LineKind::Error, error.as_str()));
        return lines;
    }

    if state.daily_visible {
        let rows: Vec<[String; 5]> = state
            .daily
            .iter()
            .map(|day| {
                [
                    display_date(day.date, today),
                    temperature_display(&day.high, &day.low),
                    or_placeholder(&day.precipitation).to_string(),
                    or_placeholder(&day.wind).to_string(),
                    or_placeholder(&day.description).to_string(),
                ]
            })
            .collect();
        push_table(&mut lines, "Daily forecast", DAILY_HEADERS, &rows);
    }

    if state.hourly_visible {
        let rows: Vec<[String; 5]> = state
            .hourly
            .iter()
            .map(|hour| {
                [
                    hour.time.clone(),
                    hour.temperature.clone(),
                    hour.precipitation.clone(),
                    hour.wind.clone(),
                    hour.description.clone(),
                ]
            })
            .collect();
        push_table(&mut lines, "Hourly forecast", HOURLY_HEADERS, &rows);
    }

    lines
}

fn push_table(lines: &mut Vec<Line>, heading: &str, headers: [&str; 5], rows: &[[String; 5]]) {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    lines.push(Line::new(LineKind::Blank, ""));
    lines.push(Line::new(LineKind::Heading, heading));
    lines.push(Line::new(LineKind::TableHeader, format_row(&headers, &widths)));
    for row in rows {
        lines.push(Line::new(LineKind::Row, format_row(row, &widths)));
    }
}

fn format_row<S: AsRef<str>>(cells: &[S; 5], widths: &[usize; 5]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}
