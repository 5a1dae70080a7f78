//! Bike-Share Record Module
//! Typed rows of the cleaned table and the polars hand-off frame.

use crate::data::codes::{Season, Weather};
use crate::data::features::CalendarParts;
use crate::data::schema;
use chrono::NaiveDateTime;
use polars::prelude::*;

/// One hourly observation after cleaning.
///
/// The calendar columns are computed from `time` on access, so they can
/// never drift from it.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeRecord {
    time: NaiveDateTime,
    pub count: u32,
    pub temp_real_c: f64,
    pub temp_feels_like_c: f64,
    /// Fraction in [0, 1]
    pub humidity: f64,
    pub wind_speed_kph: f64,
    pub weather: Weather,
    pub is_holiday: bool,
    pub is_weekend: bool,
    pub season: Season,
}

impl BikeRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        time: NaiveDateTime,
        count: u32,
        temp_real_c: f64,
        temp_feels_like_c: f64,
        humidity: f64,
        wind_speed_kph: f64,
        weather: Weather,
        is_holiday: bool,
        is_weekend: bool,
        season: Season,
    ) -> Self {
        Self {
            time,
            count,
            temp_real_c,
            temp_feels_like_c,
            humidity,
            wind_speed_kph,
            weather,
            is_holiday,
            is_weekend,
            season,
        }
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn calendar(&self) -> CalendarParts {
        CalendarParts::from_timestamp(&self.time)
    }

    pub fn year(&self) -> i32 {
        self.calendar().year
    }

    pub fn month(&self) -> u32 {
        self.calendar().month
    }

    pub fn dayofweek(&self) -> u32 {
        self.calendar().dayofweek
    }

    pub fn hour(&self) -> u32 {
        self.calendar().hour
    }
}

/// The cleaned table: one owner, loaded once.
#[derive(Debug, Clone, Default)]
pub struct BikeTable {
    records: Vec<BikeRecord>,
}

impl BikeTable {
    pub fn new(records: Vec<BikeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BikeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Build the polars frame handed to reporting: the semantic columns plus
    /// the four calendar columns, with `season` and `weather` categorical.
    /// Columns come out in `schema::OUTPUT_COLUMNS` order.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rows = &self.records;
        let calendar: Vec<CalendarParts> = rows.iter().map(BikeRecord::calendar).collect();
        let categorical = DataType::Categorical(None, CategoricalOrdering::Physical);

        let times = rows.iter().map(|r| r.time);
        let weather: Vec<&str> = rows.iter().map(|r| r.weather.as_str()).collect();
        let season: Vec<&str> = rows.iter().map(|r| r.season.as_str()).collect();

        let df = DataFrame::new(vec![
            Column::from(
                DatetimeChunked::from_naive_datetime(
                    schema::TIME.into(),
                    times,
                    TimeUnit::Milliseconds,
                )
                .into_series(),
            ),
            Column::new(
                schema::COUNT.into(),
                rows.iter().map(|r| r.count).collect::<Vec<u32>>(),
            ),
            Column::new(
                schema::TEMP_REAL.into(),
                rows.iter().map(|r| r.temp_real_c).collect::<Vec<f64>>(),
            ),
            Column::new(
                schema::TEMP_FEELS_LIKE.into(),
                rows.iter().map(|r| r.temp_feels_like_c).collect::<Vec<f64>>(),
            ),
            Column::new(
                schema::HUMIDITY.into(),
                rows.iter().map(|r| r.humidity).collect::<Vec<f64>>(),
            ),
            Column::new(
                schema::WIND_SPEED.into(),
                rows.iter().map(|r| r.wind_speed_kph).collect::<Vec<f64>>(),
            ),
            Column::new(schema::WEATHER.into(), weather).cast(&categorical)?,
            Column::new(
                schema::IS_HOLIDAY.into(),
                rows.iter().map(|r| r.is_holiday).collect::<Vec<bool>>(),
            ),
            Column::new(
                schema::IS_WEEKEND.into(),
                rows.iter().map(|r| r.is_weekend).collect::<Vec<bool>>(),
            ),
            Column::new(schema::SEASON.into(), season).cast(&categorical)?,
            Column::new(
                schema::YEAR.into(),
                calendar.iter().map(|c| c.year).collect::<Vec<i32>>(),
            ),
            Column::new(
                schema::MONTH.into(),
                calendar.iter().map(|c| c.month as i32).collect::<Vec<i32>>(),
            ),
            Column::new(
                schema::DAY_OF_WEEK.into(),
                calendar.iter().map(|c| c.dayofweek as i32).collect::<Vec<i32>>(),
            ),
            Column::new(
                schema::HOUR.into(),
                calendar.iter().map(|c| c.hour as i32).collect::<Vec<i32>>(),
            ),
        ])?;
        df.select(schema::OUTPUT_COLUMNS)
    }
}

impl FromIterator<BikeRecord> for BikeTable {
    fn from_iter<I: IntoIterator<Item = BikeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
