use crate::error::AnalyticsError;
use crate::report::{AnalyticsResult, RollingAnalyticsResult};
use crate::rolling::compute_rolling_statistics;
use crate::statistics::compute_statistics;
use core_types::{Periodicity, ReturnSeries, WindowMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A trailing window expressed in years, plus the rule turning it into periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWindow {
    pub years: u32,
    #[serde(default)]
    pub mode: WindowMode,
}

impl RollingWindow {
    pub fn new(years: u32, mode: WindowMode) -> Self {
        Self { years, mode }
    }
}

/// A stateless calculator for the returns analytics of one or many instruments.
///
/// It only remembers the periodicity of the series it will be given and the
/// annual risk-free rate; every call computes a fresh result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsEngine {
    periodicity: Periodicity,
    risk_free_rate: f64,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(Periodicity::Daily, 0.0)
    }
}

impl AnalyticsEngine {
    pub fn new(periodicity: Periodicity, risk_free_rate: f64) -> Self {
        Self {
            periodicity,
            risk_free_rate,
        }
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Full-period statistics of one series.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AnalyticsResult`, or `AnalyticsError::NotEnoughData`
    /// for an empty series.
    #[tracing::instrument(name = "analytics_calculate", skip(self, series), fields(series = series.name()))]
    pub fn calculate(&self, series: &ReturnSeries) -> Result<AnalyticsResult, AnalyticsError> {
        compute_statistics(series, self.periodicity, self.risk_free_rate)
    }

    /// Trailing-window statistics of one series.
    #[tracing::instrument(name = "analytics_rolling", skip(self, series), fields(series = series.name()))]
    pub fn calculate_rolling(
        &self,
        series: &ReturnSeries,
        window: RollingWindow,
    ) -> Result<RollingAnalyticsResult, AnalyticsError> {
        compute_rolling_statistics(
            series,
            window.years,
            self.periodicity,
            self.risk_free_rate,
            window.mode,
        )
    }

    /// Full-period statistics for every instrument of a keyed mapping.
    ///
    /// Fails on the first instrument that cannot be analyzed.
    pub fn calculate_all(
        &self,
        instruments: &BTreeMap<String, ReturnSeries>,
    ) -> Result<BTreeMap<String, AnalyticsResult>, AnalyticsError> {
        instruments
            .iter()
            .map(|(name, series)| Ok((name.clone(), self.calculate(series)?)))
            .collect()
    }

    /// Trailing-window statistics for every instrument of a keyed mapping.
    pub fn calculate_rolling_all(
        &self,
        instruments: &BTreeMap<String, ReturnSeries>,
        window: RollingWindow,
    ) -> Result<BTreeMap<String, RollingAnalyticsResult>, AnalyticsError> {
        instruments
            .iter()
            .map(|(name, series)| Ok((name.clone(), self.calculate_rolling(series, window)?)))
            .collect()
    }
}
