use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{Column, ReturnSeries, WideTable};

/// Running compounded return: `out[i] = (1 + r_0) * ... * (1 + r_i) - 1`.
///
/// A NaN period yields NaN at its own row and is skipped by the running
/// product, so later rows are still defined.
pub fn cumulative_returns(values: &[f64]) -> Vec<f64> {
    let mut growth = 1.0;
    values
        .iter()
        .map(|&r| {
            if r.is_nan() {
                f64::NAN
            } else {
                growth *= 1.0 + r;
                growth - 1.0
            }
        })
        .collect()
}

/// Compounded return over the whole slice, NaN when the slice holds a NaN or is empty.
pub(crate) fn window_total_return(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Arithmetic mean of the non-NaN values.
pub fn mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 { f64::NAN } else { sum / count as f64 }
}

/// Sample standard deviation (n - 1 denominator) of the non-NaN values.
///
/// NaN when fewer than two values are available.
pub fn sample_std(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.len() < 2 {
        return f64::NAN;
    }

    let m = finite.iter().sum::<f64>() / finite.len() as f64;
    let var = finite.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (finite.len() - 1) as f64;
    var.sqrt()
}

/// True when `std` is no larger than the rounding noise of `values`, i.e. the
/// non-NaN values are all equal. Relative to their magnitude, so tiny but
/// distinct values still count as spread.
pub(crate) fn is_zero_spread(std: f64, values: &[f64]) -> bool {
    let (scale, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0f64, 0usize), |(scale, count), v| (scale.max(v.abs()), count + 1));

    std <= scale * count as f64 * f64::EPSILON
}

/// How far the last value sits from the mean, in sample standard deviations.
///
/// NaN when there are fewer than two values or they are all equal.
pub fn z_score(values: &[f64]) -> f64 {
    let Some(&last) = values.last() else {
        return f64::NAN;
    };

    let std = sample_std(values);
    if std.is_nan() || is_zero_spread(std, values) {
        tracing::debug!(len = values.len(), "z-score undefined for this sample");
        return f64::NAN;
    }

    (last - mean(values)) / std
}

/// Annualizes every cumulative return of the series over the calendar span
/// `end - start`: `(1 + cumulative)^(365 / days) - 1`.
///
/// An empty span gives NaN for every row instead of dividing by zero.
pub fn annualized_return_between_dates(
    series: &ReturnSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<f64> {
    let days = (end - start).num_days();
    let cumulative = cumulative_returns(series.values());

    if days == 0 {
        tracing::warn!(series = series.name(), %start, %end, "Zero-day date range, annualized return is undefined");
        return vec![f64::NAN; cumulative.len()];
    }

    let exponent = 365.0 / days as f64;
    cumulative
        .into_iter()
        .map(|c| (1.0 + c).powf(exponent) - 1.0)
        .collect()
}

/// Applies [`cumulative_returns`] to every column of a wide table.
pub fn cumulative_table(table: &WideTable) -> Result<WideTable, AnalyticsError> {
    let columns = table
        .columns()
        .iter()
        .map(|c| Column {
            name: c.name.clone(),
            values: cumulative_returns(&c.values),
        })
        .collect();

    Ok(WideTable::new(table.dates().to_vec(), columns)?)
}
