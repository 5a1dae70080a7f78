//! Column Schema Module
//! Source header names, semantic names and the fixed rename table.

/// Source header names that must be present in the input file.
pub const SOURCE_COLUMNS: [&str; 10] = [
    "timestamp",
    "cnt",
    "t1",
    "t2",
    "hum",
    "wind_speed",
    "weather_code",
    "is_holiday",
    "is_weekend",
    "season",
];

pub const TIME: &str = "time";
pub const COUNT: &str = "count";
pub const TEMP_REAL: &str = "temp_real_C";
pub const TEMP_FEELS_LIKE: &str = "temp_feels_like_C";
pub const HUMIDITY: &str = "humidity_percent";
pub const WIND_SPEED: &str = "wind_speed_kph";
pub const WEATHER: &str = "weather";
pub const IS_HOLIDAY: &str = "is_holiday";
pub const IS_WEEKEND: &str = "is_weekend";
pub const SEASON: &str = "season";

pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY_OF_WEEK: &str = "dayofweek";
pub const HOUR: &str = "hour";

/// Source name -> semantic name.
pub const RENAME_MAP: [(&str, &str); 10] = [
    ("timestamp", TIME),
    ("cnt", COUNT),
    ("t1", TEMP_REAL),
    ("t2", TEMP_FEELS_LIKE),
    ("hum", HUMIDITY),
    ("wind_speed", WIND_SPEED),
    ("weather_code", WEATHER),
    ("is_holiday", IS_HOLIDAY),
    ("is_weekend", IS_WEEKEND),
    ("season", SEASON),
];

/// Column order of the hand-off frame.
pub const OUTPUT_COLUMNS: [&str; 14] = [
    TIME,
    COUNT,
    TEMP_REAL,
    TEMP_FEELS_LIKE,
    HUMIDITY,
    WIND_SPEED,
    WEATHER,
    IS_HOLIDAY,
    IS_WEEKEND,
    SEASON,
    YEAR,
    MONTH,
    DAY_OF_WEEK,
    HOUR,
];

/// Map a source column name to its semantic name.
/// Columns outside the rename table pass through unchanged.
pub fn semantic_name(source: &str) -> &str {
    RENAME_MAP
        .iter()
        .find(|(from, _)| *from == source)
        .map(|(_, to)| *to)
        .unwrap_or(source)
}
