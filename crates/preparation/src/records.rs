use crate::error::PreparationError;
use chrono::{Datelike, NaiveDate};
use core_types::{Observation, ReturnSeries};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

/// One row of a long-format table: a value of one security on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRecord {
    pub date: NaiveDate,
    pub security: String,
    pub value: f64,
}

impl SecurityRecord {
    pub fn new(date: NaiveDate, security: impl Into<String>, value: f64) -> Self {
        Self {
            date,
            security: security.into(),
            value,
        }
    }
}

/// A record of one security, narrowed to `f32` and labelled with its quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedRow {
    pub date: NaiveDate,
    pub security: String,
    pub value: f32,
    pub year: i32,
    pub quarter: u32,
    /// e.g. `"Q3 2023"`.
    pub quarter_year: String,
}

/// Anything that sits on a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for SecurityRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for PreparedRow {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Observation {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// Distinct security names in order of first appearance, at most `limit` of them.
pub fn unique_securities(records: &[SecurityRecord], limit: Option<usize>) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.security.as_str())
        .filter(|s| seen.insert(*s))
        .take(limit.unwrap_or(usize::MAX))
        .map(str::to_string)
        .collect()
}

/// The records of `security`, narrowed and labelled with their quarter.
///
/// An unknown security yields no rows.
pub fn prepare_security(records: &[SecurityRecord], security: &str) -> Vec<PreparedRow> {
    records
        .iter()
        .filter(|r| r.security == security)
        .map(|r| {
            let year = r.date.year();
            let quarter = quarter_of(r.date);
            PreparedRow {
                date: r.date,
                security: r.security.clone(),
                value: r.value as f32,
                year,
                quarter,
                quarter_year: format!("Q{quarter} {year}"),
            }
        })
        .collect()
}

/// [`prepare_security`] for each of `securities`, keyed by security name.
pub fn prepare_securities(
    records: &[SecurityRecord],
    securities: &[String],
) -> BTreeMap<String, Vec<PreparedRow>> {
    securities
        .iter()
        .map(|s| (s.clone(), prepare_security(records, s)))
        .collect()
}

/// The records of `security` as a return series, keeping full `f64` precision.
pub fn to_return_series(
    records: &[SecurityRecord],
    security: &str,
) -> Result<ReturnSeries, PreparationError> {
    let observations: Vec<Observation> = records
        .iter()
        .filter(|r| r.security == security)
        .map(|r| Observation::new(r.date, r.value))
        .collect();

    if observations.is_empty() {
        return Err(PreparationError::UnknownSecurity(security.to_string()));
    }

    Ok(ReturnSeries::new(security, observations)?)
}

/// Keeps the rows dated on the latest date present in their calendar quarter,
/// in their original order, then optionally keeps only the positions in `range`.
///
/// A range reaching past the end is clamped.
pub fn last_day_each_quarter<T: Dated + Clone>(rows: &[T], range: Option<Range<usize>>) -> Vec<T> {
    let mut last_dates: BTreeMap<(i32, u32), NaiveDate> = BTreeMap::new();
    for row in rows {
        let date = row.date();
        let entry = last_dates.entry((date.year(), quarter_of(date))).or_insert(date);
        if date > *entry {
            *entry = date;
        }
    }

    let filtered: Vec<T> = rows
        .iter()
        .filter(|row| {
            let date = row.date();
            last_dates.get(&(date.year(), quarter_of(date))) == Some(&date)
        })
        .cloned()
        .collect();

    match range {
        Some(range) => {
            let end = range.end.min(filtered.len());
            let start = range.start.min(end);
            filtered[start..end].to_vec()
        }
        None => filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[fixture]
    fn records() -> Vec<SecurityRecord> {
        vec![
            SecurityRecord::new(date(2023, 1, 31), "CPI", 6.4),
            SecurityRecord::new(date(2023, 1, 31), "Core CPI", 5.6),
            SecurityRecord::new(date(2023, 2, 28), "CPI", 6.0),
            SecurityRecord::new(date(2023, 2, 28), "Core CPI", 5.5),
            SecurityRecord::new(date(2023, 3, 31), "CPI", 5.0),
            SecurityRecord::new(date(2023, 3, 31), "Core CPI", 5.6),
            SecurityRecord::new(date(2023, 4, 30), "CPI", 4.9),
            SecurityRecord::new(date(2023, 4, 30), "PPI", 2.3),
            SecurityRecord::new(date(2023, 6, 30), "CPI", 3.0),
            SecurityRecord::new(date(2023, 7, 31), "CPI", 3.2),
        ]
    }

    #[rstest]
    fn test_unique_securities_keeps_first_appearance(records: Vec<SecurityRecord>) {
        assert_eq!(unique_securities(&records, None), vec!["CPI", "Core CPI", "PPI"]);
        assert_eq!(unique_securities(&records, Some(2)), vec!["CPI", "Core CPI"]);
    }

    #[rstest]
    fn test_prepare_security_labels_quarters(records: Vec<SecurityRecord>) {
        let rows = prepare_security(&records, "CPI");
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.security == "CPI"));

        assert_eq!(rows[0].quarter_year, "Q1 2023");
        assert_eq!(rows[3].quarter, 2);
        assert_eq!(rows[5].quarter_year, "Q3 2023");
        assert_eq!(rows[0].value, 6.4f32);
    }

    #[rstest]
    fn test_prepare_unknown_security_is_empty(records: Vec<SecurityRecord>) {
        assert!(prepare_security(&records, "GDP").is_empty());
    }

    #[rstest]
    fn test_prepare_securities(records: Vec<SecurityRecord>) {
        let securities = unique_securities(&records, None);
        let prepared = prepare_securities(&records, &securities);
        assert_eq!(prepared.len(), 3);
        assert_eq!(prepared["Core CPI"].len(), 3);
        assert_eq!(prepared["PPI"][0].quarter_year, "Q2 2023");
    }

    #[rstest]
    fn test_to_return_series(records: Vec<SecurityRecord>) {
        let series = to_return_series(&records, "Core CPI").unwrap();
        assert_eq!(series.name(), "Core CPI");
        assert_eq!(series.values(), &[5.6, 5.5, 5.6]);

        let err = to_return_series(&records, "GDP").unwrap_err();
        assert_eq!(err, PreparationError::UnknownSecurity("GDP".to_string()));
    }

    #[rstest]
    fn test_last_day_each_quarter(records: Vec<SecurityRecord>) {
        let rows = last_day_each_quarter(&records, None);
        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2023, 3, 31),
                date(2023, 3, 31),
                date(2023, 6, 30),
                date(2023, 7, 31),
            ]
        );
    }

    #[rstest]
    #[case(0..2, 2)]
    #[case(1..3, 2)]
    #[case(3..10, 1)]
    #[case(5..8, 0)]
    fn test_last_day_each_quarter_range(
        records: Vec<SecurityRecord>,
        #[case] range: Range<usize>,
        #[case] expected: usize,
    ) {
        assert_eq!(last_day_each_quarter(&records, Some(range)).len(), expected);
    }

    #[rstest]
    fn test_last_day_each_quarter_on_series_observations(records: Vec<SecurityRecord>) {
        let series = to_return_series(&records, "CPI").unwrap();
        let observations: Vec<Observation> = series.observations().collect();
        let quarter_ends = last_day_each_quarter(&observations, Some(1..3));
        assert_eq!(
            quarter_ends,
            vec![
                Observation::new(date(2023, 6, 30), 3.0),
                Observation::new(date(2023, 7, 31), 3.2),
            ]
        );
    }

    #[rstest]
    fn test_last_day_each_quarter_on_prepared_rows(records: Vec<SecurityRecord>) {
        let rows = prepare_security(&records, "CPI");
        let quarter_ends = last_day_each_quarter(&rows, None);
        let labels: Vec<_> = quarter_ends.iter().map(|r| r.quarter_year.as_str()).collect();
        assert_eq!(labels, vec!["Q1 2023", "Q2 2023", "Q3 2023"]);
    }
}
