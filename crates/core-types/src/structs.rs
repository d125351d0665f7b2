use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single periodic return, e.g. `0.01` for a 1% gain over the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// The periodic returns of one instrument, ascending by date with no duplicate dates.
///
/// NaN values are accepted; the statistics built on top of the series skip them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    name: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Builds a series from unordered observations. They are sorted by date and a
    /// repeated date is rejected.
    pub fn new(name: impl Into<String>, mut observations: Vec<Observation>) -> Result<Self, CoreError> {
        observations.sort_by_key(|o| o.date);

        if let Some(pair) = observations.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(CoreError::DuplicateDate(pair[0].date));
        }

        let (dates, values): (Vec<_>, Vec<_>) = observations.into_iter().map(|o| (o.date, o.value)).unzip();

        Ok(Self {
            name: name.into(),
            dates,
            values,
        })
    }

    /// Builds a series from parallel date and value columns.
    pub fn from_parts(
        name: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> Result<Self, CoreError> {
        if dates.len() != values.len() {
            return Err(CoreError::ShapeMismatch(format!(
                "{} dates vs {} values",
                dates.len(),
                values.len()
            )));
        }

        let observations = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| Observation::new(date, value))
            .collect();

        Self::new(name, observations)
    }

    /// Extracts the column called `column` from a wide table. The column is
    /// always addressed by name, never by position.
    pub fn from_table(table: &WideTable, column: &str) -> Result<Self, CoreError> {
        let col = table.column(column)?;
        Self::from_parts(column, table.dates().to_vec(), col.values.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.dates
            .iter()
            .zip(&self.values)
            .map(|(&date, &value)| Observation::new(date, value))
    }
}

/// A named numeric column of a [`WideTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// A date column plus one numeric column per security, all of the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl WideTable {
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<Column>) -> Result<Self, CoreError> {
        for column in &columns {
            if column.values.len() != dates.len() {
                return Err(CoreError::ShapeMismatch(format!(
                    "column '{}' has {} values but the table has {} dates",
                    column.name,
                    column.values.len(),
                    dates.len()
                )));
            }
        }

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(CoreError::InvalidInput(
                    "table".to_string(),
                    format!("column '{}' appears more than once", column.name),
                ));
            }
        }

        Ok(Self { dates, columns })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Result<&Column, CoreError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CoreError::ColumnNotFound(name.to_string()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
