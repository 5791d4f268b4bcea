//! Result structures handed to the rendering adapter
//!
//! Serialized field names keep the wire contract the original rendering
//! consumed (`unidade`, `bloquear`, `desbloquear`, `datas`, `alerta`,
//! `_diag`); Rust-side names are English.

use serde::Serialize;

use super::dates::ReportDate;

/// The pair of report dates a reconciliation compared.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DatePair {
    #[serde(rename = "anterior")]
    pub previous: Option<ReportDate>,
    #[serde(rename = "atual")]
    pub current: Option<ReportDate>,
}

/// Recommendation for a single facility unit.
#[derive(Debug, Clone, Serialize)]
pub struct UnitReport {
    #[serde(rename = "unidade")]
    pub unit: String,
    /// Boxes newly delinquent past the threshold, sorted ascending
    #[serde(rename = "bloquear")]
    pub to_block: Vec<String>,
    /// Boxes previously delinquent and now absent from the current report
    #[serde(rename = "desbloquear")]
    pub to_unblock: Vec<String>,
    #[serde(rename = "datas")]
    pub dates: DatePair,
    /// Set when the comparison was inconclusive for this unit
    #[serde(rename = "alerta", skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

impl UnitReport {
    /// Result for a unit that cannot be compared: empty lists plus an alert.
    pub fn inconclusive(unit: impl Into<String>, dates: DatePair, alert: impl Into<String>) -> Self {
        UnitReport {
            unit: unit.into(),
            to_block: Vec::new(),
            to_unblock: Vec::new(),
            dates,
            alert: Some(alert.into()),
        }
    }
}

/// One `(unit, date)` bucket observed in the input.
#[derive(Debug, Clone, Serialize)]
pub struct BucketObservation {
    #[serde(rename = "unidade")]
    pub unit: Option<String>,
    #[serde(rename = "data")]
    pub date: Option<ReportDate>,
    #[serde(rename = "qtde")]
    pub file_count: usize,
}

/// Troubleshooting view over the whole batch: the selected date pair and
/// every bucket actually observed, including unrecognized ones.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    #[serde(rename = "anterior")]
    pub previous: Option<ReportDate>,
    #[serde(rename = "atual")]
    pub current: Option<ReportDate>,
    #[serde(rename = "detalhes")]
    pub files: Vec<BucketObservation>,
}

/// Full outcome of one reconciliation batch: one entry per registry unit,
/// in registry order, plus diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    #[serde(rename = "unidades")]
    pub units: Vec<UnitReport>,
    #[serde(rename = "_diag")]
    pub diagnostics: Diagnostics,
}
