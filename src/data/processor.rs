//! Data Processor Module
//! Handles data cleaning: rename, humidity rescale, recode and typed extraction.

use crate::data::codes::{RecodeError, Recoder};
use crate::data::features::{parse_timestamp, TimestampError};
use crate::data::record::{BikeRecord, BikeTable};
use crate::data::schema::{self, semantic_name};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Invalid value in {column} at row {row}: {value}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Row {row}: {source}")]
    Timestamp {
        row: usize,
        #[source]
        source: TimestampError,
    },
    #[error("Row {row}: {source}")]
    Recode {
        row: usize,
        #[source]
        source: RecodeError,
    },
}

/// Unit of the `humidity_percent` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityScale {
    /// Source values, 0-100
    Percent,
    /// Rescaled values, 0-1
    Fraction,
}

/// A renamed frame moving through the cleaning steps.
///
/// Tracks whether humidity has been rescaled so the division by 100 runs
/// exactly once.
#[derive(Debug, Clone)]
pub struct CleanFrame {
    df: DataFrame,
    humidity: HumidityScale,
}

impl CleanFrame {
    /// Rename the source columns and start tracking the frame.
    pub fn new(mut df: DataFrame) -> Result<Self, ProcessorError> {
        DataProcessor::rename_columns(&mut df)?;
        Ok(Self {
            df,
            humidity: HumidityScale::Percent,
        })
    }

    /// Divide `humidity_percent` by 100 and check every value lands in [0, 1].
    pub fn rescale_humidity(&mut self) -> Result<(), ProcessorError> {
        if self.humidity == HumidityScale::Fraction {
            return Err(ProcessorError::InvariantViolation(format!(
                "{} has already been rescaled to a fraction",
                schema::HUMIDITY
            )));
        }

        let scaled: Vec<Option<f64>> = float_column(&self.df, schema::HUMIDITY)?
            .into_iter()
            .map(|v| v.map(|h| h / 100.0))
            .collect();

        let out_of_range = scaled
            .iter()
            .enumerate()
            .find_map(|(row, v)| v.filter(|h| !(0.0..=1.0).contains(h)).map(|h| (row, h)));
        if let Some((row, value)) = out_of_range {
            return Err(ProcessorError::InvariantViolation(format!(
                "{} at row {} is {} after rescaling, expected [0, 1]",
                schema::HUMIDITY,
                row,
                value
            )));
        }

        self.df
            .with_column(Column::new(schema::HUMIDITY.into(), scaled))?;
        self.humidity = HumidityScale::Fraction;
        debug!(rows = self.df.height(), "Rescaled humidity to fraction");
        Ok(())
    }

    /// Convert the frame into typed records, recoding categories and parsing
    /// timestamps.
    pub fn into_table(self, recoder: &Recoder) -> Result<BikeTable, ProcessorError> {
        if self.humidity != HumidityScale::Fraction {
            return Err(ProcessorError::InvariantViolation(format!(
                "{} must be rescaled before extraction",
                schema::HUMIDITY
            )));
        }

        let df = &self.df;
        let times = string_column(df, schema::TIME)?;
        let counts = float_column(df, schema::COUNT)?;
        let temp_real = float_column(df, schema::TEMP_REAL)?;
        let temp_feels = float_column(df, schema::TEMP_FEELS_LIKE)?;
        let humidity = float_column(df, schema::HUMIDITY)?;
        let wind = float_column(df, schema::WIND_SPEED)?;
        let weather = float_column(df, schema::WEATHER)?;
        let holiday = float_column(df, schema::IS_HOLIDAY)?;
        let weekend = float_column(df, schema::IS_WEEKEND)?;
        let season = float_column(df, schema::SEASON)?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let time = times[row].as_deref().ok_or_else(|| ProcessorError::InvalidValue {
                column: schema::TIME.to_string(),
                row,
                value: "null".to_string(),
            })?;
            let time =
                parse_timestamp(time).map_err(|source| ProcessorError::Timestamp { row, source })?;

            let wind_speed = required(schema::WIND_SPEED, row, wind[row])?;
            if wind_speed < 0.0 {
                return Err(invalid(schema::WIND_SPEED, row, wind_speed));
            }

            let weather = recoder
                .weather(required(schema::WEATHER, row, weather[row])?)
                .map_err(|source| ProcessorError::Recode { row, source })?;
            let season = recoder
                .season(required(schema::SEASON, row, season[row])?)
                .map_err(|source| ProcessorError::Recode { row, source })?;

            records.push(BikeRecord::new(
                time,
                rental_count(row, required(schema::COUNT, row, counts[row])?)?,
                required(schema::TEMP_REAL, row, temp_real[row])?,
                required(schema::TEMP_FEELS_LIKE, row, temp_feels[row])?,
                required(schema::HUMIDITY, row, humidity[row])?,
                wind_speed,
                weather,
                flag(schema::IS_HOLIDAY, row, required(schema::IS_HOLIDAY, row, holiday[row])?)?,
                flag(schema::IS_WEEKEND, row, required(schema::IS_WEEKEND, row, weekend[row])?)?,
                season,
            ));
        }

        Ok(BikeTable::new(records))
    }
}

/// Runs the cleaning steps in order.
pub struct DataProcessor {
    recoder: Recoder,
}

impl DataProcessor {
    pub fn new(recoder: Recoder) -> Self {
        Self { recoder }
    }

    /// Apply the fixed rename table. Columns outside it are left alone.
    pub fn rename_columns(df: &mut DataFrame) -> Result<(), ProcessorError> {
        let renames: Vec<(String, String)> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter_map(|from| {
                let to = semantic_name(&from).to_string();
                (to != from).then_some((from, to))
            })
            .collect();

        for (from, to) in renames {
            debug!(from = %from, to = %to, "Renaming column");
            df.rename(&from, to.into())?;
        }
        Ok(())
    }

    /// Rename, rescale humidity once, recode and extract typed records.
    pub fn process(&self, df: DataFrame) -> Result<BikeTable, ProcessorError> {
        let mut frame = CleanFrame::new(df)?;
        frame.rescale_humidity()?;
        let table = frame.into_table(&self.recoder)?;

        info!(
            rows = table.len(),
            policy = ?self.recoder.policy(),
            "Cleaned bike-share table"
        );
        Ok(table)
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
    let column = df
        .column(name)
        .map_err(|_| ProcessorError::MissingColumn(name.to_string()))?;
    let values = column.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = values.f64()?.into_iter().collect();
    Ok(values)
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessorError> {
    let column = df
        .column(name)
        .map_err(|_| ProcessorError::MissingColumn(name.to_string()))?;
    let values = column.cast(&DataType::String)?;
    let values: Vec<Option<String>> = values
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

fn invalid(column: &str, row: usize, value: f64) -> ProcessorError {
    ProcessorError::InvalidValue {
        column: column.to_string(),
        row,
        value: value.to_string(),
    }
}

fn required(column: &str, row: usize, value: Option<f64>) -> Result<f64, ProcessorError> {
    value
        .filter(|v| !v.is_nan())
        .ok_or_else(|| ProcessorError::InvalidValue {
            column: column.to_string(),
            row,
            value: "null".to_string(),
        })
}

fn rental_count(row: usize, value: f64) -> Result<u32, ProcessorError> {
    if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(invalid(schema::COUNT, row, value))
    }
}

fn flag(column: &str, row: usize, value: f64) -> Result<bool, ProcessorError> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(invalid(column, row, value))
    }
}
