use core_types::WideTable;
use serde::Serialize;
use thousands::Separable;

const PERCENT_KEYWORDS: [&str; 15] = [
    "ΔDay", "ΔWTD", "ΔMTD", "ΔQTD", "ΔYTD", "Δ1Yr", "Δ3Yr", "Δ5Yr", "Yield", "Earn Yld", "Div Yld",
    "ROE", "Margins", "Margin", "Last",
];

const MULTIPLE_KEYWORDS: [&str; 4] = ["Tr/PE", "Fwd P/E", "EV/EBITDA", "P/Book"];

/// How the values of a table column are rendered, picked from the column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueFormat {
    /// Fraction shown as a percentage, `0.0123` -> `1.23%`.
    Percent,
    /// Valuation multiple, `18.456` -> `18.46x`.
    Multiple,
    /// Whole dollars with thousands separators, `1234.9` -> `$1,234.00`.
    Dollars,
    /// Whole number with thousands separators.
    Level,
    /// Three decimals with thousands separators.
    Spot,
    /// Thousands separators, precision untouched.
    Grouped,
    Plain,
}

impl ValueFormat {
    /// The format of a column called `name`.
    ///
    /// A column named exactly `Last` holds a price level unless `last_as_percent`
    /// is set; any other name is matched by keyword, first match wins.
    pub fn for_column(name: &str, last_as_percent: bool) -> Self {
        if name == "Last" {
            return if last_as_percent { Self::Percent } else { Self::Grouped };
        }

        if PERCENT_KEYWORDS.iter().any(|k| name.contains(k)) {
            Self::Percent
        } else if MULTIPLE_KEYWORDS.iter().any(|k| name.contains(k)) {
            Self::Multiple
        } else if name.contains("Earnings") {
            Self::Dollars
        } else if name.contains("Level") {
            Self::Level
        } else if name.contains("Spot") {
            Self::Spot
        } else {
            Self::Plain
        }
    }

    /// Renders one value. NaN is passed through as `NaN` in every format.
    pub fn apply(self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }

        match self {
            Self::Percent => format!("{:.2}%", value * 100.0),
            Self::Multiple => format!("{value:.2}x"),
            Self::Dollars => format!("${}", format!("{:.2}", value.trunc()).separate_with_commas()),
            Self::Level => (value.trunc() as i64).separate_with_commas(),
            Self::Spot => format!("{value:.3}").separate_with_commas(),
            Self::Grouped => value.separate_with_commas(),
            Self::Plain => value.to_string(),
        }
    }
}

/// Renders every column of a market-summary table for display, each in the
/// [`ValueFormat`] its name calls for. Columns keep their table order.
pub fn format_table_values(table: &WideTable, last_as_percent: bool) -> Vec<(String, Vec<String>)> {
    table
        .columns()
        .iter()
        .map(|column| {
            let format = ValueFormat::for_column(&column.name, last_as_percent);
            tracing::trace!(column = column.name.as_str(), ?format, "Formatting column");
            let rendered = column.values.iter().map(|&v| format.apply(v)).collect();
            (column.name.clone(), rendered)
        })
        .collect()
}
