use crate::error::AnalyticsError;
use crate::report::{ReturnStatistics, RollingAnalyticsResult};
use crate::returns::{cumulative_returns, window_total_return};
use crate::statistics::span_statistics;
use core_types::{Periodicity, ReturnSeries, WindowMode};

/// Trailing-window statistics of a series.
///
/// The window spans `mode.window_length(years, periodicity)` periods. Each row
/// from `window_length - 1` onwards gets the compounded, annualized return,
/// volatility and Sharpe ratio of the window ending on it; earlier rows get
/// `None`. A window containing a NaN period yields NaN statistics.
pub fn compute_rolling_statistics(
    series: &ReturnSeries,
    years: u32,
    periodicity: Periodicity,
    risk_free_rate: f64,
    mode: WindowMode,
) -> Result<RollingAnalyticsResult, AnalyticsError> {
    let window_length = mode.window_length(years, periodicity);
    if window_length == 0 {
        return Err(AnalyticsError::InvalidWindow(format!(
            "a window of {years} years holds no periods"
        )));
    }

    let values = series.values();
    let periods_per_year = periodicity.periods_per_year();

    if window_length > values.len() {
        tracing::warn!(
            series = series.name(),
            window_length,
            len = values.len(),
            "Rolling window is longer than the series, every row is undefined"
        );
    }

    let rolling = (0..values.len())
        .map(|i| {
            let start = (i + 1).checked_sub(window_length)?;
            let window = &values[start..=i];

            if window.iter().any(|r| r.is_nan()) {
                return Some(ReturnStatistics::undefined());
            }

            let total_return = window_total_return(window);
            Some(span_statistics(window, total_return, periods_per_year, risk_free_rate))
        })
        .collect();

    tracing::debug!(
        series = series.name(),
        %periodicity,
        %mode,
        years,
        window_length,
        "Computed rolling statistics"
    );

    Ok(RollingAnalyticsResult {
        name: series.name().to_string(),
        periodicity,
        risk_free_rate,
        window_length,
        dates: series.dates().to_vec(),
        cumulative_return: cumulative_returns(values),
        rolling,
    })
}
