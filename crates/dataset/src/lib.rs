//! In-memory tabular dataset
//!
//! This crate holds the tabular data model shared by the workflow stages:
//!
//! - [`DataFrame`]: named columns of equal length, numeric or text
//! - [`loader`]: CSV ingestion with per-column type inference
//!
//! A frame is created by [`DataFrame::from_csv_bytes`], mutated in place by
//! preprocessing, and read by the split and train stages. Each new upload
//! replaces the previous frame wholesale.

mod error;
mod frame;
pub mod loader;

pub use error::{DatasetError, Result};
pub use frame::{Column, ColumnData, DataFrame, Preview};
