//! Analysis Report Module
//! Collects the statistics for a cleaned table and renders them as text or JSON.

use crate::data::{BikeTable, Season, Weather};
use crate::stats::columns::{CORRELATION_COLUMNS, DESCRIBE_COLUMNS, WEATHER_VARIABLES};
use crate::stats::grouping::{
    rentals_by, rentals_by_split, value_counts, GroupAggregate, SplitAggregate, ValueCount,
};
use crate::stats::{ColumnSummary, CorrelationMatrix, StatsCalculator, Trend};
use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::Serialize;
use std::fmt::{self, Display};

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Everything the analysis reports about one table.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub rows: usize,
    pub first_time: Option<NaiveDateTime>,
    pub last_time: Option<NaiveDateTime>,
    pub summary: Vec<ColumnSummary>,
    pub weather_counts: Vec<ValueCount<Weather>>,
    pub season_counts: Vec<ValueCount<Season>>,
    pub correlations: CorrelationMatrix,
    pub rentals_by_year: Vec<GroupAggregate<i32>>,
    pub rentals_by_hour: Vec<GroupAggregate<u32>>,
    pub rentals_by_dayofweek: Vec<GroupAggregate<u32>>,
    pub rentals_by_weather: Vec<GroupAggregate<Weather>>,
    pub rentals_by_season: Vec<GroupAggregate<Season>>,
    pub weekend_share: Vec<ValueCount<bool>>,
    pub hourly_by_holiday: Vec<SplitAggregate<bool, u32>>,
    pub hourly_by_weekend: Vec<SplitAggregate<bool, u32>>,
    pub hourly_by_season: Vec<SplitAggregate<Season, u32>>,
    pub daily_by_season: Vec<SplitAggregate<Season, u32>>,
    pub rental_trends: Vec<Trend>,
}

impl Report {
    /// Numeric statistics read the hand-off frame; grouped aggregates walk
    /// the typed records.
    pub fn build(table: &BikeTable) -> PolarsResult<Self> {
        let df = table.to_dataframe()?;
        let records = table.records();

        Ok(Self {
            rows: table.len(),
            first_time: records.iter().map(|r| r.time()).min(),
            last_time: records.iter().map(|r| r.time()).max(),
            summary: StatsCalculator::describe(&df, &DESCRIBE_COLUMNS)?,
            weather_counts: value_counts(records, |r| r.weather),
            season_counts: value_counts(records, |r| r.season),
            correlations: StatsCalculator::correlation_matrix(&df, &CORRELATION_COLUMNS)?,
            rentals_by_year: rentals_by(records, |r| r.year()),
            rentals_by_hour: rentals_by(records, |r| r.hour()),
            rentals_by_dayofweek: rentals_by(records, |r| r.dayofweek()),
            rentals_by_weather: rentals_by(records, |r| r.weather),
            rentals_by_season: rentals_by(records, |r| r.season),
            weekend_share: value_counts(records, |r| r.is_weekend),
            hourly_by_holiday: rentals_by_split(records, |r| r.is_holiday, |r| r.hour()),
            hourly_by_weekend: rentals_by_split(records, |r| r.is_weekend, |r| r.hour()),
            hourly_by_season: rentals_by_split(records, |r| r.season, |r| r.hour()),
            daily_by_season: rentals_by_split(records, |r| r.season, |r| r.dayofweek()),
            rental_trends: StatsCalculator::rental_trends(&df, &WEATHER_VARIABLES)?,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Display for Report {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(out, "London bike shares: {} hourly records", self.rows)?;
        if let (Some(first), Some(last)) = (self.first_time, self.last_time) {
            writeln!(out, "Period: {first} .. {last}")?;
        }

        section(out, "Summary statistics")?;
        writeln!(
            out,
            "{:<20} {:>7} {:>10} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        for s in &self.summary {
            writeln!(
                out,
                "{:<20} {:>7} {:>10.3} {:>10.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3}",
                s.column, s.count, s.mean, s.std, s.min, s.p25, s.median, s.p75, s.max
            )?;
        }

        section(out, "Weather conditions")?;
        write_counts(out, &self.weather_counts)?;
        section(out, "Seasons")?;
        write_counts(out, &self.season_counts)?;

        section(out, "Correlation matrix (Pearson r)")?;
        write!(out, "{:<20}", "")?;
        for name in &self.correlations.columns {
            write!(out, " {:>8}", abbreviate(name))?;
        }
        writeln!(out)?;
        for (name, row) in self.correlations.columns.iter().zip(&self.correlations.r) {
            write!(out, "{name:<20}")?;
            for r in row {
                match r {
                    Some(r) => write!(out, " {r:>8.2}")?,
                    None => write!(out, " {:>8}", "-")?,
                }
            }
            writeln!(out)?;
        }

        section(out, "Total rentals by year")?;
        write_totals(out, &self.rentals_by_year, |k| k.to_string())?;
        section(out, "Total rentals by hour")?;
        write_totals(out, &self.rentals_by_hour, |k| format!("{k:02}:00"))?;
        section(out, "Total rentals by day of week")?;
        write_totals(out, &self.rentals_by_dayofweek, day_name)?;
        section(out, "Total rentals by weather")?;
        write_totals(out, &self.rentals_by_weather, |k| k.to_string())?;

        section(out, "Mean rentals by season")?;
        for g in &self.rentals_by_season {
            writeln!(out, "{:<24} {:>10.1}", g.key, g.mean)?;
        }

        section(out, "Weekend vs weekday records")?;
        for c in &self.weekend_share {
            let label = if c.key { "weekend" } else { "weekday" };
            writeln!(out, "{:<24} {:>9.1}%", label, c.share * 100.0)?;
        }

        section(out, "Mean rentals by hour")?;
        write_split(out, "holiday", &self.hourly_by_holiday)?;
        write_split(out, "weekend", &self.hourly_by_weekend)?;
        write_split(out, "season", &self.hourly_by_season)?;

        section(out, "Mean rentals by day of week and season")?;
        for part in &self.daily_by_season {
            write!(out, "{:<8}", part.split)?;
            for g in &part.groups {
                write!(out, " {}={:.0}", day_name(&g.key), g.mean)?;
            }
            writeln!(out)?;
        }

        section(out, "Rentals vs weather (least squares)")?;
        for t in &self.rental_trends {
            writeln!(
                out,
                "{:<20} slope {:>10.2}  intercept {:>10.2}  r {:>6.3}",
                t.column, t.slope, t.intercept, t.r
            )?;
        }

        Ok(())
    }
}

fn section(out: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "== {title}")
}

fn write_counts<K: Display>(
    out: &mut fmt::Formatter<'_>,
    counts: &[ValueCount<K>],
) -> fmt::Result {
    for c in counts {
        writeln!(
            out,
            "{:<24} {:>7} {:>6.1}%",
            c.key.to_string(),
            c.records,
            c.share * 100.0
        )?;
    }
    Ok(())
}

fn write_totals<K, F>(
    out: &mut fmt::Formatter<'_>,
    groups: &[GroupAggregate<K>],
    label: F,
) -> fmt::Result
where
    F: Fn(&K) -> String,
{
    for g in groups {
        writeln!(out, "{:<24} {:>10}", label(&g.key), g.total)?;
    }
    Ok(())
}

fn write_split<S: Display>(
    out: &mut fmt::Formatter<'_>,
    name: &str,
    parts: &[SplitAggregate<S, u32>],
) -> fmt::Result {
    for part in parts {
        write!(out, "{name}={:<8}", part.split.to_string())?;
        for g in &part.groups {
            write!(out, " {:02}h={:.0}", g.key, g.mean)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn day_name(day: &u32) -> String {
    DAY_NAMES
        .get(*day as usize)
        .map(|d| d.to_string())
        .unwrap_or_else(|| day.to_string())
}

fn abbreviate(name: &str) -> String {
    name.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{test_record, BikeRecord};
    use pretty_assertions::assert_eq;

    fn table() -> BikeTable {
        let mut weekend = test_record("2015-01-04 08:00:00", 120, Weather::Cloudy, Season::Winter);
        weekend.is_weekend = true;
        let mut warm = test_record("2015-07-06 17:00:00", 3200, Weather::Clear, Season::Summer);
        warm.temp_real_c = 24.0;
        warm.humidity = 0.4;
        let records: Vec<BikeRecord> = vec![
            weekend,
            test_record("2015-01-05 08:00:00", 1800, Weather::Clear, Season::Winter),
            warm,
            test_record("2016-03-01 12:00:00", 700, Weather::Rain, Season::Spring),
        ];
        BikeTable::new(records)
    }

    #[test]
    fn test_build_report() {
        let report = Report::build(&table()).unwrap();
        assert_eq!(report.rows, 4);
        assert_eq!(report.summary.len(), DESCRIBE_COLUMNS.len());
        assert_eq!(report.correlations.columns.len(), CORRELATION_COLUMNS.len());
        assert_eq!(report.rentals_by_year.len(), 2);
        assert_eq!(report.rentals_by_year[0].total, 5120);
        assert_eq!(report.weekend_share.len(), 2);
        assert_eq!(report.weather_counts[0].key, Weather::Clear);
        assert_eq!(
            report.first_time.map(|t| t.to_string()),
            Some("2015-01-04 08:00:00".to_string())
        );
        assert_eq!(report.hourly_by_season.len(), 3);
    }

    #[test]
    fn test_summary_reads_flag_and_calendar_columns() {
        let report = Report::build(&table()).unwrap();
        let weekend = report
            .summary
            .iter()
            .find(|s| s.column == "is_weekend")
            .unwrap();
        assert_eq!(weekend.count, 4);
        assert_eq!(weekend.max, 1.0);
        assert_eq!(weekend.mean, 0.25);

        let year = report.summary.iter().find(|s| s.column == "year").unwrap();
        assert_eq!((year.min, year.max), (2015.0, 2016.0));
    }

    #[test]
    fn test_render_text_sections() {
        let text = Report::build(&table()).unwrap().to_string();
        assert!(text.starts_with("London bike shares: 4 hourly records"));
        assert!(text.contains("== Correlation matrix (Pearson r)"));
        assert!(text.contains("Broken clouds") || text.contains("Clear"));
        assert!(text.contains("Sun"));
        assert!(text.contains("winter"));
    }

    #[test]
    fn test_json_uses_labels() {
        let json = Report::build(&table()).unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"], 4);
        assert_eq!(value["weather_counts"][0]["key"], "Clear");
        assert_eq!(value["rentals_by_season"][0]["key"], "spring");
        assert_eq!(value["summary"][0]["column"], "count");
    }

    #[test]
    fn test_empty_table_report() {
        let report = Report::build(&BikeTable::default()).unwrap();
        assert_eq!(report.rows, 0);
        assert!(report.rental_trends.is_empty());
        assert!(report.summary[0].mean.is_nan());
        assert!(report.to_string().contains("0 hourly records"));
    }
}
