//! Pipeline orchestration
//!
//! Loader -> cleaning/recoding -> calendar features -> report.

use crate::config::PipelineConfig;
use crate::data::{BikeTable, DataLoader, DataProcessor, Recoder};
use crate::report::Report;
use anyhow::{Context, Result};
use tracing::{debug, info_span};

/// Load and clean the configured CSV.
pub fn load_table(config: &PipelineConfig) -> Result<BikeTable> {
    let _span = info_span!("load_table", input = %config.input.display()).entered();

    let mut loader = DataLoader::new();
    loader
        .load_csv(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;
    debug!(rows = loader.row_count(), columns = ?loader.columns(), "Source frame");

    let processor = DataProcessor::new(Recoder::new(config.recode_policy));
    let table = processor
        .process(loader.into_dataframe()?)
        .context("cleaning bike-share records")?;
    Ok(table)
}

/// Run the whole pipeline and build the report.
pub fn run(config: &PipelineConfig) -> Result<Report> {
    let table = load_table(config)?;
    let _span = info_span!("report", rows = table.len()).entered();

    let report = Report::build(&table).context("building report")?;
    debug!(
        summaries = report.summary.len(),
        trends = report.rental_trends.len(),
        "Report built"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{csv_with_rows, write_fixture, SAMPLE_CSV};
    use crate::data::processor::ProcessorError;
    use crate::data::{RecodePolicy, Weather};
    use pretty_assertions::assert_eq;

    fn config_for(path: std::path::PathBuf, recode_policy: RecodePolicy) -> PipelineConfig {
        PipelineConfig {
            input: path,
            recode_policy,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_sample() {
        let path = write_fixture("pipeline_sample.csv", SAMPLE_CSV);
        let report = run(&config_for(path.clone(), RecodePolicy::Strict)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(report.rows, 8);
        assert_eq!(report.rentals_by_year.len(), 2);
        let total: u64 = report.rentals_by_hour.iter().map(|g| g.total).sum();
        assert_eq!(total, 182 + 138 + 134 + 72 + 47 + 4500 + 5200 + 900);
        let count = &report.summary[0];
        assert_eq!(count.column, "count");
        assert_eq!(count.count, 8);
        assert_eq!(count.max, 5200.0);
    }

    #[test]
    fn test_unknown_weather_code_fails_strict_run() {
        let csv = csv_with_rows(&["2015-01-04 00:00:00,182,3.0,2.0,93.0,6.0,99.0,0.0,1.0,3.0"]);
        let path = write_fixture("pipeline_unknown_strict.csv", &csv);
        let err = load_table(&config_for(path.clone(), RecodePolicy::Strict)).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        let processor_err = err.downcast_ref::<ProcessorError>().unwrap();
        assert!(matches!(processor_err, ProcessorError::Recode { row: 0, .. }));
    }

    #[test]
    fn test_unknown_weather_code_lenient_run() {
        let csv = csv_with_rows(&[
            "2015-01-04 00:00:00,182,3.0,2.0,93.0,6.0,99.0,0.0,1.0,3.0",
            "2015-01-04 01:00:00,138,3.0,2.5,93.0,5.0,1.0,0.0,1.0,3.0",
        ]);
        let path = write_fixture("pipeline_unknown_lenient.csv", &csv);
        let table = load_table(&config_for(path.clone(), RecodePolicy::Lenient)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.records()[0].weather, Weather::Unknown);
        assert_eq!(table.records()[1].weather, Weather::Clear);
    }

    #[test]
    fn test_missing_file() {
        let config = config_for(
            std::env::temp_dir().join("bikeshare_insights_absent.csv"),
            RecodePolicy::Strict,
        );
        assert!(run(&config).is_err());
    }
}
