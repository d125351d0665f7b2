use crate::error::AnalyticsError;
use crate::report::{AnalyticsResult, ReturnStatistics};
use crate::returns::{cumulative_returns, is_zero_spread, sample_std};
use core_types::{Periodicity, ReturnSeries};

/// Annualized return, volatility and Sharpe ratio of one span of returns whose
/// compounded return is already known.
pub(crate) fn span_statistics(
    values: &[f64],
    total_return: f64,
    periods_per_year: u32,
    risk_free_rate: f64,
) -> ReturnStatistics {
    let factor = periods_per_year as f64;
    let n = values.len() as f64;

    let annualized_return = (1.0 + total_return).powf(factor / n) - 1.0;
    let std = sample_std(values);
    let volatility = std * factor.sqrt();

    // Zero volatility would give +/-inf; report it as undefined like a single sample.
    let sharpe_ratio = if std.is_nan() || is_zero_spread(std, values) {
        f64::NAN
    } else {
        (annualized_return - risk_free_rate) / volatility
    };

    ReturnStatistics {
        total_return,
        annualized_return,
        volatility,
        sharpe_ratio,
    }
}

/// Full-period statistics of a series.
///
/// `cumulative_return` varies per row; the annualized return, volatility and
/// Sharpe ratio are computed once from the whole series.
pub fn compute_statistics(
    series: &ReturnSeries,
    periodicity: Periodicity,
    risk_free_rate: f64,
) -> Result<AnalyticsResult, AnalyticsError> {
    if series.is_empty() {
        return Err(AnalyticsError::NotEnoughData(format!(
            "series '{}' has no observations",
            series.name()
        )));
    }

    let cumulative_return = cumulative_returns(series.values());
    let total_return = cumulative_return.last().copied().unwrap_or(f64::NAN);

    let statistics = span_statistics(
        series.values(),
        total_return,
        periodicity.periods_per_year(),
        risk_free_rate,
    );

    if !statistics.is_finite() {
        tracing::warn!(
            series = series.name(),
            len = series.len(),
            "Degenerate series, some statistics are undefined"
        );
    }

    tracing::debug!(
        series = series.name(),
        %periodicity,
        total_return = statistics.total_return,
        annualized_return = statistics.annualized_return,
        volatility = statistics.volatility,
        sharpe_ratio = statistics.sharpe_ratio,
        "Computed full-period statistics"
    );

    Ok(AnalyticsResult {
        name: series.name().to_string(),
        periodicity,
        risk_free_rate,
        dates: series.dates().to_vec(),
        cumulative_return,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use rstest::rstest;

    fn series(values: &[f64]) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len() as u64)
            .map(|i| start.checked_add_days(Days::new(i)).unwrap())
            .collect();
        ReturnSeries::from_parts("TEST", dates, values.to_vec()).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let err = compute_statistics(&series(&[]), Periodicity::Daily, 0.0).unwrap_err();
        assert!(matches!(err, AnalyticsError::NotEnoughData(_)));
    }

    #[test]
    fn test_single_sample() {
        let result = compute_statistics(&series(&[0.02]), Periodicity::Daily, 0.01).unwrap();
        assert_eq!(result.cumulative_return, vec![0.02]);
        assert!(result.statistics.volatility.is_nan());
        assert!(result.statistics.sharpe_ratio.is_nan());
        assert_close(result.statistics.annualized_return, 1.02f64.powi(252) - 1.0);
    }

    #[test]
    fn test_zero_volatility_gives_nan_sharpe() {
        let result = compute_statistics(&series(&[0.01; 6]), Periodicity::Monthly, 0.0).unwrap();
        assert!(result.statistics.volatility < f64::EPSILON);
        assert!(result.statistics.sharpe_ratio.is_nan());
        // six months at 1% compound to twelve months at 1%
        assert_close(result.statistics.annualized_return, 1.01f64.powi(12) - 1.0);
    }

    #[test]
    fn test_tiny_but_nonzero_volatility_keeps_sharpe_defined() {
        let result = compute_statistics(&series(&[0.0, 0.0, 1e-17]), Periodicity::Daily, 0.01).unwrap();
        assert!(result.statistics.volatility > 0.0);
        assert!(result.statistics.sharpe_ratio.is_finite());
        assert!(result.statistics.sharpe_ratio < 0.0);
    }

    #[rstest]
    #[case(Periodicity::Daily)]
    #[case(Periodicity::Weekly)]
    #[case(Periodicity::Monthly)]
    fn test_periodicity_scaling(#[case] periodicity: Periodicity) {
        let values = [0.01, -0.005, 0.02, 0.0, 0.012];
        let s = series(&values);
        let monthly = compute_statistics(&s, Periodicity::Monthly, 0.0).unwrap().statistics;
        let scaled = compute_statistics(&s, periodicity, 0.0).unwrap().statistics;

        let ratio = periodicity.periods_per_year() as f64 / 12.0;
        assert_close(scaled.volatility, monthly.volatility * ratio.sqrt());
        assert_close(
            (1.0 + scaled.annualized_return).ln(),
            (1.0 + monthly.annualized_return).ln() * ratio,
        );
        assert_close(scaled.total_return, monthly.total_return);
    }

    #[test]
    fn test_idempotent() {
        let s = series(&[0.01, 0.02, -0.01, 0.03]);
        let first = compute_statistics(&s, Periodicity::Daily, 0.03).unwrap();
        let second = compute_statistics(&s, Periodicity::Daily, 0.03).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.statistics.sharpe_ratio.to_bits(),
            second.statistics.sharpe_ratio.to_bits()
        );
    }

    #[test]
    fn test_scalars_broadcast_to_every_row() {
        let result =
            compute_statistics(&series(&[0.01, 0.02, -0.01, 0.03]), Periodicity::Daily, 0.03).unwrap();
        let rows = result.rows();
        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.annualized_return, result.statistics.annualized_return);
            assert_eq!(row.volatility, result.statistics.volatility);
            assert_eq!(row.sharpe_ratio, result.statistics.sharpe_ratio);
        }
    }

    #[test]
    fn test_nan_period_is_skipped_by_volatility() {
        let with_gap = compute_statistics(&series(&[0.01, f64::NAN, 0.03]), Periodicity::Daily, 0.0)
            .unwrap()
            .statistics;
        assert_close(with_gap.volatility, sample_std(&[0.01, 0.03]) * 252f64.sqrt());
        // the last row is defined, so is the total return
        assert_close(with_gap.total_return, 1.01 * 1.03 - 1.0);
    }
}
