//! Statistics Calculator Module
//! Descriptive statistics, Pearson correlations and least-squares trends
//! over the numeric columns of the analysis frame.

use crate::stats::columns::NumericColumn;
use polars::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Summary of one numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Pairwise Pearson correlations. `None` where a column has no variance.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub r: Vec<Vec<Option<f64>>>,
    pub p_values: Vec<Vec<Option<f64>>>,
}

/// Least-squares line of rentals against one variable.
#[derive(Debug, Clone, Serialize)]
pub struct Trend {
    pub column: String,
    pub slope: f64,
    pub intercept: f64,
    pub r: f64,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            f64::NAN
        };

        ColumnSummary {
            column: String::new(),
            count: n,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Non-null values of a column, cast to Float64.
    pub fn get_values(df: &DataFrame, column: NumericColumn) -> PolarsResult<Vec<f64>> {
        let values = df.column(column.name())?.cast(&DataType::Float64)?;
        let values: Vec<f64> = values.f64()?.into_iter().flatten().collect();
        Ok(values)
    }

    /// Summaries for each column, in the given order.
    pub fn describe(df: &DataFrame, columns: &[NumericColumn]) -> PolarsResult<Vec<ColumnSummary>> {
        columns
            .iter()
            .map(|column| {
                let mut summary = Self::compute_descriptive_stats(&Self::get_values(df, *column)?);
                summary.column = column.name().to_string();
                Ok(summary)
            })
            .collect()
    }

    /// Pearson correlation coefficient.
    pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        let n = x.len();
        if n < 2 || n != y.len() {
            return None;
        }

        let mean_x = x.iter().sum::<f64>() / n as f64;
        let mean_y = y.iter().sum::<f64>() / n as f64;

        let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
        for (a, b) in x.iter().zip(y) {
            let dx = a - mean_x;
            let dy = b - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        if var_x == 0.0 || var_y == 0.0 {
            return None;
        }
        Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
    }

    /// Two-tailed p-value of a correlation using the t-distribution.
    pub fn correlation_p_value(r: f64, n: usize) -> Option<f64> {
        if n < 3 {
            return None;
        }
        if (1.0 - r.abs()) < f64::EPSILON {
            return Some(0.0);
        }

        let df = (n - 2) as f64;
        let t = r * (df / (1.0 - r * r)).sqrt();
        StudentsT::new(0.0, 1.0, df)
            .ok()
            .map(|dist| 2.0 * (1.0 - dist.cdf(t.abs())))
    }

    /// Correlation matrix over the given columns.
    pub fn correlation_matrix(
        df: &DataFrame,
        columns: &[NumericColumn],
    ) -> PolarsResult<CorrelationMatrix> {
        let values = columns
            .iter()
            .map(|c| Self::get_values(df, *c))
            .collect::<PolarsResult<Vec<Vec<f64>>>>()?;
        let n = df.height();

        let mut r = vec![vec![None; columns.len()]; columns.len()];
        let mut p_values = vec![vec![None; columns.len()]; columns.len()];
        for i in 0..columns.len() {
            for j in i..columns.len() {
                let coefficient = Self::pearson(&values[i], &values[j]);
                let p = coefficient.and_then(|c| Self::correlation_p_value(c, n));
                r[i][j] = coefficient;
                r[j][i] = coefficient;
                p_values[i][j] = p;
                p_values[j][i] = p;
            }
        }

        Ok(CorrelationMatrix {
            columns: columns.iter().map(|c| c.name().to_string()).collect(),
            r,
            p_values,
        })
    }

    /// Ordinary least-squares fit of `y = slope * x + intercept`.
    pub fn linear_trend(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
        let n = x.len();
        if n < 2 || n != y.len() {
            return None;
        }

        let mean_x = x.iter().sum::<f64>() / n as f64;
        let mean_y = y.iter().sum::<f64>() / n as f64;
        let sxx: f64 = x.iter().map(|a| (a - mean_x).powi(2)).sum();
        if sxx == 0.0 {
            return None;
        }
        let sxy: f64 = x
            .iter()
            .zip(y)
            .map(|(a, b)| (a - mean_x) * (b - mean_y))
            .sum();

        let slope = sxy / sxx;
        Some((slope, mean_y - slope * mean_x))
    }

    /// Rentals trend against each weather variable.
    pub fn rental_trends(df: &DataFrame, variables: &[NumericColumn]) -> PolarsResult<Vec<Trend>> {
        let rentals = Self::get_values(df, NumericColumn::Count)?;
        let mut trends = Vec::new();
        for column in variables {
            let x = Self::get_values(df, *column)?;
            if let Some((slope, intercept)) = Self::linear_trend(&x, &rentals) {
                trends.push(Trend {
                    column: column.name().to_string(),
                    slope,
                    intercept,
                    r: Self::pearson(&x, &rentals).unwrap_or(f64::NAN),
                });
            }
        }
        Ok(trends)
    }
}
