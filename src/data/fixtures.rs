//! Shared CSV fixtures for unit tests.

use std::fs;
use std::path::PathBuf;

/// First rows of `london_merged.csv` plus a few summer and holiday hours.
pub const SAMPLE_CSV: &str = "\
timestamp,cnt,t1,t2,hum,wind_speed,weather_code,is_holiday,is_weekend,season
2015-01-04 00:00:00,182,3.0,2.0,93.0,6.0,3.0,0.0,1.0,3.0
2015-01-04 01:00:00,138,3.0,2.5,93.0,5.0,1.0,0.0,1.0,3.0
2015-01-04 02:00:00,134,2.5,2.5,96.5,0.0,1.0,0.0,1.0,3.0
2015-01-04 03:00:00,72,2.0,2.0,100.0,0.0,1.0,0.0,1.0,3.0
2015-01-04 04:00:00,47,2.0,0.0,93.0,6.5,1.0,0.0,1.0,3.0
2015-07-06 08:00:00,4500,18.0,18.0,60.0,15.0,2.0,0.0,0.0,1.0
2015-07-06 17:00:00,5200,22.0,22.0,45.0,20.0,1.0,0.0,0.0,1.0
2016-12-26 12:00:00,900,8.0,6.0,80.0,10.0,7.0,1.0,0.0,3.0
";

pub const HEADER: &str =
    "timestamp,cnt,t1,t2,hum,wind_speed,weather_code,is_holiday,is_weekend,season\n";

/// Write `contents` to a per-process file in the temp dir.
pub fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "bikeshare_insights_{}_{}",
        std::process::id(),
        name
    ));
    fs::write(&path, contents).unwrap();
    path
}

/// A header plus the given data lines.
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut csv = HEADER.to_string();
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}
