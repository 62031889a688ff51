use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// A point on the map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Copy rounded to two decimal places; the NWS points API rejects finer precision.
    pub fn rounded(&self) -> Self {
        Self {
            latitude: round2(self.latitude),
            longitude: round2(self.longitude),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A resolved search location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub coordinates: Coordinates,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitativeValue {
    #[serde(default)]
    pub value: Option<i64>,
}

/// One forecast slice as the NWS returns it, either a ~12h day/night period or a single hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPeriod {
    pub start_time: DateTime<FixedOffset>,
    pub temperature: i64,
    #[serde(default)]
    pub temperature_unit: String,
    #[serde(default)]
    pub wind_speed: Option<String>,
    #[serde(default)]
    pub probability_of_precipitation: Option<QuantitativeValue>,
    #[serde(default)]
    pub short_forecast: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl RawPeriod {
    /// Precipitation probability, if the provider sent one.
    pub fn precipitation(&self) -> Option<i64> {
        self.probability_of_precipitation.as_ref().and_then(|p| p.value)
    }

    pub fn is_night(&self) -> bool {
        self.name.to_lowercase().contains("night")
    }
}

/// Raw output of one forecast fetch: the day/night list and the hourly list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastBundle {
    pub daily: Vec<RawPeriod>,
    pub hourly: Vec<RawPeriod>,
}

/// One calendar-date row. Every field but `date` is a display string and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub high: String,
    pub low: String,
    pub precipitation: String,
    pub wind: String,
    pub description: String,
}

impl DailySummary {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            high: String::new(),
            low: String::new(),
            precipitation: String::new(),
            wind: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time: String,
    pub temperature: String,
    pub precipitation: String,
    pub wind: String,
    pub description: String,
}

/// Normalized result of one fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forecast {
    pub daily: Vec<DailySummary>,
    pub hourly: Vec<HourlyEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_two_decimals() {
        let c = Coordinates::new(29.500749, -98.128094).rounded();
        assert_eq!(c.latitude, 29.5);
        assert_eq!(c.longitude, -98.13);
        assert_eq!(format!("{},{}", c.latitude, c.longitude), "29.5,-98.13");
    }

    #[test]
    fn period_parses_nws_shape() {
        let json = serde_json::json!({
            "number": 1,
            "name": "Tonight",
            "startTime": "2024-05-06T18:00:00-05:00",
            "isDaytime": false,
            "temperature": 68,
            "temperatureUnit": "F",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": null },
            "windSpeed": "5 mph",
            "shortForecast": "Mostly Clear"
        });

        let period: RawPeriod = serde_json::from_value(json).expect("period should parse");
        assert!(period.is_night());
        assert_eq!(period.precipitation(), None);
        assert_eq!(period.temperature_unit, "F");
        assert_eq!(period.wind_speed.as_deref(), Some("5 mph"));
    }

    #[test]
    fn night_detection_is_case_insensitive() {
        let json = serde_json::json!({
            "name": "Monday NIGHT",
            "startTime": "2024-05-06T18:00:00-05:00",
            "temperature": 60
        });
        let period: RawPeriod = serde_json::from_value(json).expect("period should parse");
        assert!(period.is_night());
        assert!(period.short_forecast.is_none());
    }
}
