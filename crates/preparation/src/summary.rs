use crate::error::PreparationError;
use crate::records::{PreparedRow, SecurityRecord, prepare_security, to_return_series};
use analytics::returns::{annualized_return_between_dates, mean, z_score};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The single summary value computed for each security by [`process_securities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryCalculation {
    ZScore,
    Mean,
    /// Annualized cumulative return over `start..end`, taken at the last record.
    AnnualizedReturn { start: NaiveDate, end: NaiveDate },
    /// Always zero.
    #[default]
    None,
}

impl fmt::Display for SummaryCalculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SummaryCalculation::ZScore => "z-score",
            SummaryCalculation::Mean => "mean",
            SummaryCalculation::AnnualizedReturn { .. } => "annualized return",
            SummaryCalculation::None => "none",
        };
        f.write_str(label)
    }
}

/// Per-security summaries plus the prepared rows, ready for a chart with a
/// small value table next to each panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedSecurities {
    pub calculation: SummaryCalculation,
    pub values: BTreeMap<String, f64>,
    /// `values` formatted with two decimals.
    pub formatted: BTreeMap<String, String>,
    pub prepared: BTreeMap<String, Vec<PreparedRow>>,
}

/// Computes `calculation` for every security in `securities` and prepares its rows.
///
/// Every requested security must have at least one record. The z-score and mean
/// use the record values in input order, repeated dates included; only the
/// annualized return builds a dated [`ReturnSeries`](core_types::ReturnSeries).
pub fn process_securities(
    records: &[SecurityRecord],
    securities: &[String],
    calculation: SummaryCalculation,
) -> Result<ProcessedSecurities, PreparationError> {
    let mut values = BTreeMap::new();
    let mut formatted = BTreeMap::new();
    let mut prepared = BTreeMap::new();

    for security in securities {
        let security_values: Vec<f64> = records
            .iter()
            .filter(|r| &r.security == security)
            .map(|r| r.value)
            .collect();
        if security_values.is_empty() {
            return Err(PreparationError::UnknownSecurity(security.clone()));
        }

        let value = match calculation {
            SummaryCalculation::ZScore => z_score(&security_values),
            SummaryCalculation::Mean => mean(&security_values),
            SummaryCalculation::AnnualizedReturn { start, end } => {
                let series = to_return_series(records, security)?;
                annualized_return_between_dates(&series, start, end)
                    .last()
                    .copied()
                    .unwrap_or(f64::NAN)
            }
            SummaryCalculation::None => 0.0,
        };

        tracing::debug!(security = security.as_str(), %calculation, value, "Processed security");

        formatted.insert(security.clone(), format!("{value:.2}"));
        values.insert(security.clone(), value);
        prepared.insert(security.clone(), prepare_security(records, security));
    }

    Ok(ProcessedSecurities {
        calculation,
        values,
        formatted,
        prepared,
    })
}
