//! Normalizes raw NWS periods into daily rows and a capped hourly list.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::model::{DailySummary, Forecast, ForecastBundle, HourlyEntry, RawPeriod};

pub const MAX_DAYS: usize = 10;
pub const MAX_HOURS: usize = 24;

/// Placeholder for empty hourly cells.
const BLANK: &str = " ";

pub fn aggregate(bundle: &ForecastBundle) -> Forecast {
    Forecast {
        daily: to_daily(&bundle.daily),
        hourly: to_hourly(&bundle.hourly),
    }
}

/// Merge day and night periods into one row per UTC calendar date.
///
/// Night periods set `low`, day periods set `high`. Precipitation, wind and
/// description are overwritten by any later period of the same date that
/// carries a non-empty value. Rows keep first-seen order, capped at [`MAX_DAYS`].
pub fn to_daily(periods: &[RawPeriod]) -> Vec<DailySummary> {
    let mut rows: Vec<DailySummary> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for period in periods {
        let key = period.start_time.naive_utc().date();
        let slot = *index.entry(key).or_insert_with(|| {
            rows.push(DailySummary::empty(key));
            rows.len() - 1
        });
        let row = &mut rows[slot];

        let temp = format!("{}°", period.temperature);
        if period.is_night() {
            row.low = temp;
        } else {
            row.high = temp;
        }

        if let Some(precip) = precipitation_percent(period) {
            row.precipitation = precip;
        }
        if let Some(wind) = non_empty(period.wind_speed.as_deref()) {
            row.wind = wind.to_string();
        }
        if let Some(desc) = non_empty(period.short_forecast.as_deref()) {
            row.description = desc.to_string();
        }
    }

    rows.truncate(MAX_DAYS);
    rows
}

/// Format the first [`MAX_HOURS`] periods, in provider order.
pub fn to_hourly(periods: &[RawPeriod]) -> Vec<HourlyEntry> {
    periods
        .iter()
        .take(MAX_HOURS)
        .map(|period| HourlyEntry {
            time: period.start_time.format("%A, %H:%M").to_string(),
            temperature: format!("{}{}", period.temperature, period.temperature_unit),
            precipitation: precipitation_percent(period).unwrap_or_else(|| BLANK.to_string()),
            wind: non_empty(period.wind_speed.as_deref()).unwrap_or(BLANK).to_string(),
            description: non_empty(period.short_forecast.as_deref()).unwrap_or(BLANK).to_string(),
        })
        .collect()
}

/// `"<v>%"` for a positive probability; zero and absent both count as nothing.
fn precipitation_percent(period: &RawPeriod) -> Option<String> {
    period.precipitation().filter(|v| *v > 0).map(|v| format!("{v}%"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
