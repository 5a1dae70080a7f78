//! Grouped rental aggregates (totals, means, shares).

use crate::data::BikeRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rentals aggregated over one group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate<K> {
    pub key: K,
    pub records: usize,
    pub total: u64,
    pub mean: f64,
}

/// Number of records per key and their share of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount<K> {
    pub key: K,
    pub records: usize,
    pub share: f64,
}

/// Aggregates per key, computed separately for each value of a split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitAggregate<S, K> {
    pub split: S,
    pub groups: Vec<GroupAggregate<K>>,
}

/// Sum and mean of rentals per key, ordered by key.
pub fn rentals_by<K, F>(records: &[BikeRecord], key: F) -> Vec<GroupAggregate<K>>
where
    K: Ord + Copy,
    F: Fn(&BikeRecord) -> K,
{
    let mut groups: BTreeMap<K, (usize, u64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key(record)).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u64::from(record.count);
    }

    groups
        .into_iter()
        .map(|(key, (n, total))| GroupAggregate {
            key,
            records: n,
            total,
            mean: total as f64 / n as f64,
        })
        .collect()
}

/// `rentals_by` for each value of `split`, ordered by split value.
pub fn rentals_by_split<S, K, FS, FK>(
    records: &[BikeRecord],
    split: FS,
    key: FK,
) -> Vec<SplitAggregate<S, K>>
where
    S: Ord + Copy,
    K: Ord + Copy,
    FS: Fn(&BikeRecord) -> S,
    FK: Fn(&BikeRecord) -> K,
{
    let mut parts: BTreeMap<S, Vec<BikeRecord>> = BTreeMap::new();
    for record in records {
        parts.entry(split(record)).or_default().push(record.clone());
    }

    parts
        .into_iter()
        .map(|(split, part)| SplitAggregate {
            split,
            groups: rentals_by(&part, &key),
        })
        .collect()
}

/// Record counts per key, most frequent first (ties by key).
pub fn value_counts<K, F>(records: &[BikeRecord], key: F) -> Vec<ValueCount<K>>
where
    K: Ord + Copy,
    F: Fn(&BikeRecord) -> K,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }

    let total = records.len();
    let mut result: Vec<ValueCount<K>> = counts
        .into_iter()
        .map(|(key, n)| ValueCount {
            key,
            records: n,
            share: n as f64 / total as f64,
        })
        .collect();
    result.sort_by(|a, b| b.records.cmp(&a.records).then(a.key.cmp(&b.key)));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{test_record, Season, Weather};
    use pretty_assertions::assert_eq;

    fn records() -> Vec<BikeRecord> {
        let mut holiday = test_record("2016-12-26 08:00:00", 300, Weather::Rain, Season::Winter);
        holiday.is_holiday = true;
        vec![
            test_record("2015-01-04 08:00:00", 100, Weather::Clear, Season::Winter),
            test_record("2015-01-05 08:00:00", 500, Weather::Clear, Season::Winter),
            test_record("2015-07-06 17:00:00", 900, Weather::BrokenClouds, Season::Summer),
            holiday,
        ]
    }

    #[test]
    fn test_rentals_by_hour() {
        let groups = rentals_by(&records(), |r| r.hour());
        assert_eq!(
            groups,
            vec![
                GroupAggregate {
                    key: 8,
                    records: 3,
                    total: 900,
                    mean: 300.0
                },
                GroupAggregate {
                    key: 17,
                    records: 1,
                    total: 900,
                    mean: 900.0
                },
            ]
        );
    }

    #[test]
    fn test_rentals_by_year_and_season() {
        let years = rentals_by(&records(), |r| r.year());
        assert_eq!(years.iter().map(|g| g.key).collect::<Vec<_>>(), vec![2015, 2016]);
        assert_eq!(years[0].total, 1500);

        let seasons = rentals_by(&records(), |r| r.season);
        assert_eq!(seasons[0].key, Season::Summer);
        assert_eq!(seasons[1].key, Season::Winter);
        assert_eq!(seasons[1].mean, 300.0);
    }

    #[test]
    fn test_split_by_holiday() {
        let split = rentals_by_split(&records(), |r| r.is_holiday, |r| r.hour());
        assert_eq!(split.len(), 2);
        assert!(!split[0].split);
        assert_eq!(split[0].groups.len(), 2);
        assert!(split[1].split);
        assert_eq!(split[1].groups[0].total, 300);
    }

    #[test]
    fn test_value_counts_order_and_share() {
        let counts = value_counts(&records(), |r| r.weather);
        assert_eq!(counts[0].key, Weather::Clear);
        assert_eq!(counts[0].records, 2);
        assert_eq!(counts[0].share, 0.5);
        assert_eq!(counts.iter().map(|c| c.records).sum::<usize>(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(rentals_by(&[], |r| r.hour()).is_empty());
        assert!(value_counts(&[], |r| r.season).is_empty());
    }
}
