//! Target label encoding.
//!
//! Classifiers want dense integer class ids; target columns arrive as
//! arbitrary numeric or text values. The encoder maps each distinct target
//! value to an id and keeps the vocabulary for reporting and plotting.

use std::collections::HashMap;

use dataset::ColumnData;

use crate::error::{Result, TrainError};

/// Maps distinct target values to dense class ids
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn the vocabulary from a target column. Numeric targets sort by
    /// value, text targets lexicographically, so ids are stable across
    /// calls on the same data.
    pub fn fit(column: &ColumnData) -> Self {
        let mut classes = match column {
            ColumnData::Numeric(values) => {
                let mut distinct: Vec<f64> = Vec::new();
                for &value in values {
                    let seen = distinct
                        .iter()
                        .any(|d| *d == value || (d.is_nan() && value.is_nan()));
                    if !seen {
                        distinct.push(value);
                    }
                }
                distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                distinct.into_iter().map(format_label).collect::<Vec<_>>()
            }
            ColumnData::Text(values) => {
                let mut distinct: Vec<String> = values.to_vec();
                distinct.sort();
                distinct.dedup();
                distinct
            }
        };
        classes.shrink_to_fit();
        Self { classes }
    }

    /// Encode a column against the fitted vocabulary
    pub fn transform(&self, column: &ColumnData) -> Result<Vec<i32>> {
        let index: HashMap<&str, i32> = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i as i32))
            .collect();

        let lookup = |label: String| {
            index.get(label.as_str()).copied().ok_or_else(|| {
                TrainError::InvalidData(format!("unseen target label '{label}'"))
            })
        };

        match column {
            ColumnData::Numeric(values) => {
                values.iter().map(|&v| lookup(format_label(v))).collect()
            }
            ColumnData::Text(values) => values.iter().map(|v| lookup(v.clone())).collect(),
        }
    }

    /// Fit on a column and encode it in one pass
    pub fn fit_transform(column: &ColumnData) -> Result<(Self, Vec<i32>)> {
        let encoder = Self::fit(column);
        let ids = encoder.transform(column)?;
        Ok((encoder, ids))
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Canonical display form of a numeric target value. Whole numbers drop the
/// fractional part so `1.0` and `1` encode to the same class.
fn format_label(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_targets_sort_by_value() {
        let column = ColumnData::Numeric(vec![2.0, 0.0, 1.0, 0.0, 2.0]);
        let (encoder, ids) = LabelEncoder::fit_transform(&column).unwrap();
        assert_eq!(encoder.classes(), &["0", "1", "2"]);
        assert_eq!(ids, vec![2, 0, 1, 0, 2]);
    }

    #[test]
    fn text_targets_sort_lexicographically() {
        let column = ColumnData::Text(vec![
            "yes".into(),
            "no".into(),
            "yes".into(),
            "maybe".into(),
        ]);
        let (encoder, ids) = LabelEncoder::fit_transform(&column).unwrap();
        assert_eq!(encoder.classes(), &["maybe", "no", "yes"]);
        assert_eq!(ids, vec![2, 1, 2, 0]);
    }

    #[test]
    fn whole_floats_collapse_to_integers() {
        let column = ColumnData::Numeric(vec![1.0, 0.0]);
        let encoder = LabelEncoder::fit(&column);
        assert_eq!(encoder.classes(), &["0", "1"]);
    }

    #[test]
    fn unseen_label_rejected() {
        let encoder = LabelEncoder::fit(&ColumnData::Numeric(vec![0.0, 1.0]));
        let result = encoder.transform(&ColumnData::Numeric(vec![2.0]));
        assert!(matches!(result, Err(TrainError::InvalidData(_))));
    }
}
