//! Numeric columns of the analysis frame.

use crate::data::schema;

/// A numeric (or numerically coded) column of the analysis frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    Count,
    TempReal,
    TempFeelsLike,
    Humidity,
    WindSpeed,
    IsHoliday,
    IsWeekend,
    Year,
    Month,
    DayOfWeek,
    Hour,
}

/// Columns summarised by `describe`.
pub const DESCRIBE_COLUMNS: [NumericColumn; 11] = [
    NumericColumn::Count,
    NumericColumn::TempReal,
    NumericColumn::TempFeelsLike,
    NumericColumn::Humidity,
    NumericColumn::WindSpeed,
    NumericColumn::IsHoliday,
    NumericColumn::IsWeekend,
    NumericColumn::Year,
    NumericColumn::Month,
    NumericColumn::DayOfWeek,
    NumericColumn::Hour,
];

/// Columns in the correlation matrix, in display order.
pub const CORRELATION_COLUMNS: [NumericColumn; 8] = [
    NumericColumn::Count,
    NumericColumn::TempReal,
    NumericColumn::Month,
    NumericColumn::DayOfWeek,
    NumericColumn::Hour,
    NumericColumn::TempFeelsLike,
    NumericColumn::Humidity,
    NumericColumn::WindSpeed,
];

/// Weather variables plotted against rentals.
pub const WEATHER_VARIABLES: [NumericColumn; 4] = [
    NumericColumn::TempReal,
    NumericColumn::TempFeelsLike,
    NumericColumn::Humidity,
    NumericColumn::WindSpeed,
];

impl NumericColumn {
    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::Count => schema::COUNT,
            NumericColumn::TempReal => schema::TEMP_REAL,
            NumericColumn::TempFeelsLike => schema::TEMP_FEELS_LIKE,
            NumericColumn::Humidity => schema::HUMIDITY,
            NumericColumn::WindSpeed => schema::WIND_SPEED,
            NumericColumn::IsHoliday => schema::IS_HOLIDAY,
            NumericColumn::IsWeekend => schema::IS_WEEKEND,
            NumericColumn::Year => schema::YEAR,
            NumericColumn::Month => schema::MONTH,
            NumericColumn::DayOfWeek => schema::DAY_OF_WEEK,
            NumericColumn::Hour => schema::HOUR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_match_schema() {
        assert_eq!(NumericColumn::TempReal.name(), "temp_real_C");
        assert_eq!(NumericColumn::DayOfWeek.name(), "dayofweek");
    }

    #[test]
    fn test_every_column_is_in_the_frame() {
        for column in DESCRIBE_COLUMNS {
            assert!(schema::OUTPUT_COLUMNS.contains(&column.name()), "{column:?}");
        }
    }

    #[test]
    fn test_correlation_columns_start_with_count() {
        assert_eq!(CORRELATION_COLUMNS[0], NumericColumn::Count);
        assert!(!WEATHER_VARIABLES.contains(&NumericColumn::Count));
    }
}
