use thiserror::Error;

/// What went wrong during a lookup. Callers branch on this, never on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or empty ZIP; handled before any request is made.
    Validation,
    /// The geocoder returned zero matches.
    NotFound,
    /// The geocoding call failed or returned a non-success status.
    GeocodingService,
    /// The forecast provider has no grid point for the location.
    OutOfCoverage,
    /// Any other forecast failure, including one branch of the fan-out failing.
    Retrieval,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not-found",
            ErrorKind::GeocodingService => "geocoding-service",
            ErrorKind::OutOfCoverage => "out-of-coverage",
            ErrorKind::Retrieval => "retrieval",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MSG_EMPTY_ZIP: &str = "Please enter a ZIP code";
pub const MSG_INVALID_ZIP: &str = "Please enter a valid 5-digit ZIP code";
pub const MSG_NOT_FOUND: &str = "ZIP code not found. Please check and try again.";
pub const MSG_GEOCODING: &str = "Unable to find location for this ZIP code. Please try again.";
pub const MSG_OUT_OF_COVERAGE: &str = "Weather data not available for this location. \
     The National Weather Service only covers the United States.";
pub const MSG_RETRIEVAL: &str = "Unable to retrieve weather data. Please try again later.";
pub const MSG_NO_DATA: &str = "No weather data available for this location";
pub const MSG_DEFAULT_LOAD: &str =
    "Failed to load default weather data. Please try entering a ZIP code.";

/// A user-facing failure: a kind to match on plus the message shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WeatherError {
    kind: ErrorKind,
    message: String,
}

impl WeatherError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound, MSG_NOT_FOUND)
    }

    pub fn geocoding_service() -> Self {
        Self::new(ErrorKind::GeocodingService, MSG_GEOCODING)
    }

    pub fn out_of_coverage() -> Self {
        Self::new(ErrorKind::OutOfCoverage, MSG_OUT_OF_COVERAGE)
    }

    pub fn retrieval() -> Self {
        Self::new(ErrorKind::Retrieval, MSG_RETRIEVAL)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
