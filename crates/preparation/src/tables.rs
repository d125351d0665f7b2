use crate::error::PreparationError;
use core_types::{ReturnSeries, WideTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Splits a wide table into one series per column, keyed by column name.
pub fn split_columns(table: &WideTable) -> Result<BTreeMap<String, ReturnSeries>, PreparationError> {
    table
        .column_names()
        .map(|name| Ok((name.to_string(), ReturnSeries::from_table(table, name)?)))
        .collect()
}

/// Shape and missing-value counts of a wide table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableInfo {
    pub rows: usize,
    /// Value columns, not counting the date column.
    pub columns: usize,
    pub nan_counts: Vec<(String, usize)>,
}

pub fn describe(table: &WideTable) -> TableInfo {
    TableInfo {
        rows: table.len(),
        columns: table.columns().len(),
        nan_counts: table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.values.iter().filter(|v| v.is_nan()).count()))
            .collect(),
    }
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape of the dataset:")?;
        writeln!(f, "Columns: {}, Rows: {}", self.columns + 1, self.rows)?;
        writeln!(f)?;
        writeln!(f, "Missing values per column:")?;
        writeln!(f, "date: 0")?;
        for (name, count) in &self.nan_counts {
            writeln!(f, "{name}: {count}")?;
        }
        Ok(())
    }
}
