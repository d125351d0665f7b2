use chrono::NaiveDate;
use core_types::Periodicity;
use serde::{Deserialize, Serialize};

/// The scalar statistics of one span of returns.
///
/// Any field may be NaN when the span is degenerate (single sample, zero
/// volatility, NaN inputs). Callers check `is_finite` before charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatistics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
}

impl ReturnStatistics {
    /// All four statistics undefined.
    pub fn undefined() -> Self {
        Self {
            total_return: f64::NAN,
            annualized_return: f64::NAN,
            volatility: f64::NAN,
            sharpe_ratio: f64::NAN,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.total_return.is_finite()
            && self.annualized_return.is_finite()
            && self.volatility.is_finite()
            && self.sharpe_ratio.is_finite()
    }
}

/// Full-period analytics of one series.
///
/// The scalar statistics are held once; [`AnalyticsResult::rows`] repeats them
/// on every row for consumers that need a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsResult {
    pub name: String,
    pub periodicity: Periodicity,
    pub risk_free_rate: f64,
    pub dates: Vec<NaiveDate>,
    pub cumulative_return: Vec<f64>,
    pub statistics: ReturnStatistics,
}

/// One row of the table view of an [`AnalyticsResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRow {
    pub date: NaiveDate,
    pub cumulative_return: f64,
    pub annualized_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
}

impl AnalyticsResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Table view with the scalar statistics broadcast to every row.
    pub fn rows(&self) -> Vec<AnalyticsRow> {
        let stats = self.statistics;
        self.dates
            .iter()
            .zip(&self.cumulative_return)
            .map(|(&date, &cumulative_return)| AnalyticsRow {
                date,
                cumulative_return,
                annualized_return: stats.annualized_return,
                volatility: stats.volatility,
                sharpe_ratio: stats.sharpe_ratio,
            })
            .collect()
    }
}

/// Trailing-window analytics of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingAnalyticsResult {
    pub name: String,
    pub periodicity: Periodicity,
    pub risk_free_rate: f64,
    /// Number of periods in each window.
    pub window_length: usize,
    pub dates: Vec<NaiveDate>,
    /// Full-series running compounded return.
    pub cumulative_return: Vec<f64>,
    /// `None` until the window has filled.
    pub rolling: Vec<Option<ReturnStatistics>>,
}

/// One row of the table view of a [`RollingAnalyticsResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingRow {
    pub date: NaiveDate,
    pub cumulative_return: f64,
    pub rolling_cumulative_return: Option<f64>,
    pub annualized_return: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
}

impl RollingAnalyticsResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of leading rows with no windowed statistics.
    pub fn warm_up_rows(&self) -> usize {
        self.rolling.iter().take_while(|s| s.is_none()).count()
    }

    pub fn rows(&self) -> Vec<RollingRow> {
        self.dates
            .iter()
            .zip(&self.cumulative_return)
            .zip(&self.rolling)
            .map(|((&date, &cumulative_return), window)| RollingRow {
                date,
                cumulative_return,
                rolling_cumulative_return: window.map(|s| s.total_return),
                annualized_return: window.map(|s| s.annualized_return),
                volatility: window.map(|s| s.volatility),
                sharpe_ratio: window.map(|s| s.sharpe_ratio),
            })
            .collect()
    }
}
