//! Weekly box-delinquency reconciliation pipeline
//!
//! Raw report files flow through filename metadata extraction, (unit,
//! date) grouping and report-date selection; per-unit set algebra over the
//! two most recent dates then produces block/unblock recommendations plus
//! a diagnostic view of the batch.

pub mod batch;
pub mod dates;
pub mod engine;
pub mod excel;
pub mod extract;
pub mod models;
pub mod registry;
pub mod similarity;
pub mod text;
