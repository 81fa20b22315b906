//! Tabular frame model.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DatasetError, Result};

/// Values of a single column, typed at parse time
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell_json(&self, row: usize) -> Value {
        match self {
            ColumnData::Numeric(v) => serde_json::Number::from_f64(v[row])
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ColumnData::Text(v) => Value::String(v[row].clone()),
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Ordered collection of equal-length named columns
///
/// Invariants: column names are unique, every column has `rows` values,
/// and a parsed frame holds at least one column and one row.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    rows: usize,
}

/// Upload response payload: headers, leading rows and overall shape
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Value>,
    pub shape: (usize, usize),
}

impl DataFrame {
    /// Assemble a frame from parsed columns, enforcing the invariants
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(DatasetError::EmptyFile);
        }

        let rows = columns[0].data.len();
        if rows == 0 {
            return Err(DatasetError::NoRows);
        }

        for (i, column) in columns.iter().enumerate() {
            if column.data.len() != rows {
                return Err(DatasetError::InvalidData(format!(
                    "column '{}' has {} values, expected {}",
                    column.name,
                    column.data.len(),
                    rows
                )));
            }
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(DatasetError::DuplicateColumn(column.name.clone()));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Parse a raw CSV payload into a frame
    pub fn from_csv_bytes(content: &[u8]) -> Result<Self> {
        crate::loader::from_csv_bytes(content)
    }

    /// (row count, column count)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))
    }

    pub fn is_numeric(&self, name: &str) -> Result<bool> {
        Ok(matches!(self.column(name)?.data, ColumnData::Numeric(_)))
    }

    /// Borrow a column's values as numeric data
    pub fn numeric_values(&self, name: &str) -> Result<&[f64]> {
        match &self.column(name)?.data {
            ColumnData::Numeric(values) => Ok(values),
            ColumnData::Text(_) => Err(DatasetError::NotNumeric(name.to_string())),
        }
    }

    /// Overwrite a numeric column in place; the new values must keep the
    /// frame's row count
    pub fn replace_numeric(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.rows {
            return Err(DatasetError::InvalidData(format!(
                "column '{}' replacement has {} values, expected {}",
                name,
                values.len(),
                self.rows
            )));
        }
        let rows = self.rows;
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))?;
        debug_assert_eq!(column.data.len(), rows);
        match &mut column.data {
            ColumnData::Numeric(existing) => {
                *existing = values;
                Ok(())
            }
            ColumnData::Text(_) => Err(DatasetError::NotNumeric(name.to_string())),
        }
    }

    /// Names of every column except the target
    pub fn feature_names(&self, target_col: &str) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.name != target_col)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Row-major matrix of all non-target columns; every feature column
    /// must be numeric
    pub fn feature_matrix(&self, target_col: &str) -> Result<Vec<Vec<f64>>> {
        let mut feature_cols: Vec<&[f64]> = Vec::new();
        for column in &self.columns {
            if column.name == target_col {
                continue;
            }
            match &column.data {
                ColumnData::Numeric(values) => feature_cols.push(values),
                ColumnData::Text(_) => {
                    return Err(DatasetError::NotNumeric(column.name.clone()))
                }
            }
        }

        let mut matrix = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            matrix.push(feature_cols.iter().map(|col| col[row]).collect());
        }
        Ok(matrix)
    }

    /// First `limit` rows as JSON records, plus headers and shape
    pub fn preview(&self, limit: usize) -> Preview {
        let shown = self.rows.min(limit);
        let mut rows = Vec::with_capacity(shown);
        for row in 0..shown {
            let mut record = Map::new();
            for column in &self.columns {
                record.insert(column.name.clone(), column.data.cell_json(row));
            }
            rows.push(Value::Object(record));
        }
        Preview {
            headers: self.headers(),
            rows,
            shape: self.shape(),
        }
    }
}
