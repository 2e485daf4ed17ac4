//! Columnar view of the aggregated dataset.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::dataset::MiradorDataset;
use crate::error::Result;

/// The wide table as a string-typed Polars frame, one column per variable.
#[derive(Debug, Clone)]
pub struct MiradorFrame {
    pub data: DataFrame,
}

impl MiradorFrame {
    pub fn new(data: DataFrame) -> Self {
        Self { data }
    }

    pub fn from_dataset(dataset: &MiradorDataset) -> Result<Self> {
        let columns: Vec<Column> = dataset
            .variables()
            .iter()
            .enumerate()
            .map(|(idx, variable)| {
                let values: Vec<&str> = dataset
                    .rows()
                    .iter()
                    .map(|row| row.cells.get(idx).map_or("", String::as_str))
                    .collect();
                Series::new(variable.name.as_str().into(), values).into_column()
            })
            .collect();
        let data = DataFrame::new(columns)?;
        Ok(Self { data })
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Cell text at `row` of every column, in column order.
    pub fn row_values(&self, row: usize) -> Vec<String> {
        self.data
            .get_columns()
            .iter()
            .map(|column| any_to_string(column.get(row).unwrap_or(AnyValue::Null)))
            .collect()
    }
}

/// Renders a cell as text; nulls become empty.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}
