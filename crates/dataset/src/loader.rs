//! CSV ingestion.
//!
//! Columns are typed by inference: a column whose every cell parses as a
//! float becomes numeric, anything else stays text. Empty cells keep a
//! column textual, so a target column of labels survives untouched.

use crate::error::{DatasetError, Result};
use crate::frame::{Column, ColumnData, DataFrame};

/// Parse a raw CSV payload into a [`DataFrame`]
pub fn from_csv_bytes(content: &[u8]) -> Result<DataFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DatasetError::EmptyFile);
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (i, field) in record.iter().enumerate() {
            cells[i].push(field.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column {
            name,
            data: infer_column(raw),
        })
        .collect();

    DataFrame::new(columns)
}

fn infer_column(raw: Vec<String>) -> ColumnData {
    let mut numbers = Vec::with_capacity(raw.len());
    for value in &raw {
        match value.parse::<f64>() {
            Ok(number) => numbers.push(number),
            Err(_) => return ColumnData::Text(raw),
        }
    }
    ColumnData::Numeric(numbers)
}
