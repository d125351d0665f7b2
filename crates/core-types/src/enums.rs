use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The elementary step between two observations of a return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Periodicity {
    /// Number of periods in one year, used to annualize returns and volatility.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Periodicity::Daily => 252,
            Periodicity::Weekly => 52,
            Periodicity::Monthly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Daily => "daily",
            Periodicity::Weekly => "weekly",
            Periodicity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Periodicity::Daily),
            "weekly" => Ok(Periodicity::Weekly),
            "monthly" => Ok(Periodicity::Monthly),
            other => Err(CoreError::InvalidInput(
                "periodicity".to_string(),
                format!("'{other}' is not one of daily, weekly, monthly"),
            )),
        }
    }
}

/// How a rolling window expressed in years is converted into a number of periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowMode {
    /// `years * 12`, whatever the periodicity of the series.
    ///
    /// A one year window over daily returns therefore spans 12 days, not 252.
    /// Kept as the default so existing reports keep their numbers.
    #[default]
    LegacyMonthly,
    /// `years * periods_per_year(periodicity)`.
    PeriodicityAware,
}

impl WindowMode {
    /// Number of periods covered by a window of `years` years.
    pub fn window_length(&self, years: u32, periodicity: Periodicity) -> usize {
        let per_year = match self {
            WindowMode::LegacyMonthly => 12,
            WindowMode::PeriodicityAware => periodicity.periods_per_year(),
        };
        years as usize * per_year as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowMode::LegacyMonthly => "legacy-monthly",
            WindowMode::PeriodicityAware => "periodicity-aware",
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "legacy-monthly" => Ok(WindowMode::LegacyMonthly),
            "periodicity-aware" | "aware" => Ok(WindowMode::PeriodicityAware),
            other => Err(CoreError::InvalidInput(
                "window mode".to_string(),
                format!("'{other}' is not one of legacy-monthly, periodicity-aware"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Periodicity::Daily, 252)]
    #[case(Periodicity::Weekly, 52)]
    #[case(Periodicity::Monthly, 12)]
    fn test_periods_per_year(#[case] periodicity: Periodicity, #[case] expected: u32) {
        assert_eq!(periodicity.periods_per_year(), expected);
    }

    #[rstest]
    #[case("daily", Periodicity::Daily)]
    #[case(" Weekly ", Periodicity::Weekly)]
    #[case("MONTHLY", Periodicity::Monthly)]
    fn test_periodicity_from_str(#[case] input: &str, #[case] expected: Periodicity) {
        assert_eq!(input.parse::<Periodicity>().unwrap(), expected);
    }

    #[test]
    fn test_periodicity_from_str_rejects_unknown() {
        let err = "hourly".parse::<Periodicity>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "periodicity"));
    }

    #[rstest]
    #[case(WindowMode::LegacyMonthly, Periodicity::Daily, 1, 12)]
    #[case(WindowMode::LegacyMonthly, Periodicity::Weekly, 2, 24)]
    #[case(WindowMode::LegacyMonthly, Periodicity::Monthly, 3, 36)]
    #[case(WindowMode::PeriodicityAware, Periodicity::Daily, 1, 252)]
    #[case(WindowMode::PeriodicityAware, Periodicity::Weekly, 2, 104)]
    #[case(WindowMode::PeriodicityAware, Periodicity::Monthly, 3, 36)]
    fn test_window_length(
        #[case] mode: WindowMode,
        #[case] periodicity: Periodicity,
        #[case] years: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(mode.window_length(years, periodicity), expected);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Periodicity::Weekly).unwrap(), "\"weekly\"");
        assert_eq!(
            serde_json::to_string(&WindowMode::PeriodicityAware).unwrap(),
            "\"periodicity-aware\""
        );
        let mode: WindowMode = serde_json::from_str("\"legacy-monthly\"").unwrap();
        assert_eq!(mode, WindowMode::LegacyMonthly);
    }
}
