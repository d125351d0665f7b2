//! Pinned baseline for a short daily series. Any change to these numbers is a
//! change in the published analytics.

use analytics::{AnalyticsEngine, RollingWindow, annualized_return_between_dates};
use chrono::{Months, NaiveDate};
use core_types::{Periodicity, ReturnSeries, WindowMode};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

fn spx() -> ReturnSeries {
    let dates = [3, 4, 5, 6]
        .into_iter()
        .map(|d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap())
        .collect();
    ReturnSeries::from_parts("SPX Index", dates, vec![0.01, 0.02, -0.01, 0.03]).unwrap()
}

#[test]
fn full_period_baseline() {
    let engine = AnalyticsEngine::new(Periodicity::Daily, 0.03);
    let result = engine.calculate(&spx()).unwrap();

    let expected_cumulative = [0.01, 0.0302, 0.019898, 0.05049494];
    for (actual, expected) in result.cumulative_return.iter().zip(expected_cumulative) {
        assert_close(*actual, expected);
    }

    assert_close(result.statistics.total_return, 0.05049494);
    assert_close(result.statistics.annualized_return, 21.275106307663346);
    assert_close(result.statistics.volatility, 0.2711088342345192);
    assert_close(result.statistics.sharpe_ratio, 78.36375515998692);
}

#[test]
fn rolling_baseline() {
    let values = vec![
        0.01, 0.02, -0.01, 0.03, 0.015, -0.02, 0.005, 0.012, -0.004, 0.022, 0.018, -0.011, 0.009,
    ];
    let dates = (0..values.len() as u32)
        .map(|i| NaiveDate::from_ymd_opt(2022, 1, 31).unwrap().checked_add_months(Months::new(i)).unwrap())
        .collect();
    let series = ReturnSeries::from_parts("FUND", dates, values).unwrap();

    let engine = AnalyticsEngine::new(Periodicity::Monthly, 0.02);
    let result = engine
        .calculate_rolling(&series, RollingWindow::new(1, WindowMode::LegacyMonthly))
        .unwrap();

    assert_eq!(result.window_length, 12);
    assert_eq!(result.warm_up_rows(), 11);

    let first = result.rolling[11].unwrap();
    assert_close(first.total_return, 0.08914815686632749);
    assert_close(first.annualized_return, 0.08914815686632749);
    assert_close(first.volatility, 0.05334195006150071);
    assert_close(first.sharpe_ratio, 1.296318503290618);

    let second = result.rolling[12].unwrap();
    assert_close(second.total_return, 0.08806979235457857);
    assert_close(second.volatility, 0.05329506202607926);
    assert_close(second.sharpe_ratio, 1.2772251268094872);
}

#[test]
fn legacy_window_on_daily_data_spans_twelve_periods() {
    let engine = AnalyticsEngine::new(Periodicity::Daily, 0.0);
    let legacy = engine
        .calculate_rolling(&spx(), RollingWindow::new(1, WindowMode::LegacyMonthly))
        .unwrap();
    assert_eq!(legacy.window_length, 12);
    assert!(legacy.rolling.iter().all(Option::is_none));
    assert_close(legacy.cumulative_return[3], 0.05049494);
}

#[test]
fn zero_day_range_is_nan() {
    let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let annualized = annualized_return_between_dates(&spx(), day, day);
    assert!(annualized.iter().all(|v| v.is_nan()));
}
