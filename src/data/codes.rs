//! Category Codes Module
//! Fixed code -> label lookup tables for `season` and `weather`.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecodeError {
    #[error("Unknown season code: {code}")]
    UnknownSeason { code: f64 },
    #[error("Unknown weather code: {code}")]
    UnknownWeather { code: f64 },
}

/// What to do with a code that has no entry in its lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RecodePolicy {
    /// Fail the run with a `RecodeError`
    #[default]
    Strict,
    /// Map to the `Unknown` category and keep going
    Lenient,
}

/// Season category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    Unknown,
}

const SEASON_CODES: [(i64, Season); 4] = [
    (0, Season::Spring),
    (1, Season::Summer),
    (2, Season::Autumn),
    (3, Season::Winter),
];

impl Season {
    /// Look up a source code. Non-integral or unmapped codes yield `None`.
    pub fn from_code(code: f64) -> Option<Self> {
        let key = integral_code(code)?;
        SEASON_CODES
            .iter()
            .find(|(c, _)| *c == key)
            .map(|(_, season)| *season)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
            Season::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Weather category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Weather {
    #[serde(rename = "Clear")]
    Clear,
    #[serde(rename = "Scattered clouds")]
    ScatteredClouds,
    #[serde(rename = "Broken clouds")]
    BrokenClouds,
    #[serde(rename = "Cloudy")]
    Cloudy,
    #[serde(rename = "Rain")]
    Rain,
    #[serde(rename = "Rain with thunderstorm")]
    RainWithThunderstorm,
    #[serde(rename = "Snowfall")]
    Snowfall,
    #[serde(rename = "Unknown")]
    Unknown,
}

const WEATHER_CODES: [(i64, Weather); 7] = [
    (1, Weather::Clear),
    (2, Weather::ScatteredClouds),
    (3, Weather::BrokenClouds),
    (4, Weather::Cloudy),
    (7, Weather::Rain),
    (10, Weather::RainWithThunderstorm),
    (26, Weather::Snowfall),
];

impl Weather {
    /// Look up a source code. Non-integral or unmapped codes yield `None`.
    pub fn from_code(code: f64) -> Option<Self> {
        let key = integral_code(code)?;
        WEATHER_CODES
            .iter()
            .find(|(c, _)| *c == key)
            .map(|(_, weather)| *weather)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::ScatteredClouds => "Scattered clouds",
            Weather::BrokenClouds => "Broken clouds",
            Weather::Cloudy => "Cloudy",
            Weather::Rain => "Rain",
            Weather::RainWithThunderstorm => "Rain with thunderstorm",
            Weather::Snowfall => "Snowfall",
            Weather::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

fn integral_code(code: f64) -> Option<i64> {
    if code.is_finite() && code.fract() == 0.0 {
        Some(code as i64)
    } else {
        None
    }
}

/// Applies a `RecodePolicy` to raw season/weather codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recoder {
    policy: RecodePolicy,
}

impl Recoder {
    pub fn new(policy: RecodePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RecodePolicy {
        self.policy
    }

    pub fn season(&self, code: f64) -> Result<Season, RecodeError> {
        match (Season::from_code(code), self.policy) {
            (Some(season), _) => Ok(season),
            (None, RecodePolicy::Strict) => Err(RecodeError::UnknownSeason { code }),
            (None, RecodePolicy::Lenient) => {
                warn!(code, "Season code has no label, using Unknown");
                Ok(Season::Unknown)
            }
        }
    }

    pub fn weather(&self, code: f64) -> Result<Weather, RecodeError> {
        match (Weather::from_code(code), self.policy) {
            (Some(weather), _) => Ok(weather),
            (None, RecodePolicy::Strict) => Err(RecodeError::UnknownWeather { code }),
            (None, RecodePolicy::Lenient) => {
                warn!(code, "Weather code has no label, using Unknown");
                Ok(Weather::Unknown)
            }
        }
    }
}
