use crate::error::ConfigError;
use core_types::{Periodicity, WindowMode};
use serde::{Deserialize, Serialize};

/// The root configuration structure for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Spacing of the return series being analyzed.
    pub periodicity: Periodicity,
    /// Annual risk-free rate as a fraction (0.03 for 3%).
    pub risk_free_rate: f64,
    pub rolling: RollingSettings,
}

/// Parameters of the trailing-window statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingSettings {
    /// Window length in years.
    pub years: u32,
    /// How years are turned into a number of periods.
    #[serde(default)]
    pub mode: WindowMode,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            periodicity: Periodicity::Daily,
            risk_free_rate: 0.0,
            rolling: RollingSettings::default(),
        }
    }
}

impl Default for RollingSettings {
    fn default() -> Self {
        Self {
            years: 1,
            mode: WindowMode::LegacyMonthly,
        }
    }
}

impl AnalysisSettings {
    /// Checks the values serde cannot: a usable rate and a non-empty window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "risk_free_rate must be a finite number, got {}",
                self.risk_free_rate
            )));
        }

        if self.rolling.years == 0 {
            return Err(ConfigError::ValidationError(
                "rolling.years must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
