//! Reconciliation engine
//!
//! Per unit, compares the box sets of the two most recent report dates:
//! boxes newly delinquent past the threshold get blocked, boxes that were
//! delinquent and have disappeared from the current report entirely get
//! unblocked. A unit missing data for either date is never compared.

use std::collections::BTreeSet;
use std::path::PathBuf;

use super::batch::{GroupedBatch, ReportFile, group_files};
use super::dates::{ReportDate, pick_pair};
use super::excel::{LoadError, load_box_set};
use super::models::{BatchReport, BucketObservation, DatePair, Diagnostics, UnitReport};
use super::registry::LocationRegistry;

/// Alert attached to a unit that misses reports for one of the two
/// selected dates. Wording is part of the rendering contract.
pub const INCONCLUSIVE_ALERT: &str =
    "Comparação inconclusiva: faltou planilha da data anterior ou atual para esta unidade.";

/// Run one full reconciliation batch.
///
/// Hard loader failures abort the whole batch: the caller gets the error
/// and no partial result.
pub fn process_batch(
    files: &[ReportFile],
    registry: &LocationRegistry,
    resolve_cutoff: f64,
    min_days: f64,
) -> Result<BatchReport, LoadError> {
    let grouped = group_files(files, registry, resolve_cutoff);

    let (previous, current) = match pick_pair(grouped.observed_dates()) {
        Some((previous, current)) => {
            log::info!("Comparing reports of {} against {}", current, previous);
            (Some(previous), Some(current))
        }
        None => {
            log::warn!("Fewer than two distinct report dates in the batch");
            (None, None)
        }
    };

    let diagnostics = Diagnostics {
        previous,
        current,
        files: grouped
            .observations()
            .map(|(unit, date, file_count)| BucketObservation {
                unit: unit.map(str::to_string),
                date,
                file_count,
            })
            .collect(),
    };

    let mut units = Vec::with_capacity(registry.len());
    for canonical in registry.canonical_names() {
        units.push(reconcile_unit(
            canonical, &grouped, previous, current, min_days,
        )?);
    }

    Ok(BatchReport { units, diagnostics })
}

/// Reconcile one unit against the selected date pair.
fn reconcile_unit(
    unit: &str,
    grouped: &GroupedBatch,
    previous: Option<ReportDate>,
    current: Option<ReportDate>,
    min_days: f64,
) -> Result<UnitReport, LoadError> {
    let dates = DatePair { previous, current };

    let previous_files = previous.map(|d| grouped.files_for(unit, d)).unwrap_or(&[]);
    let current_files = current.map(|d| grouped.files_for(unit, d)).unwrap_or(&[]);

    // Never recommend anything unless both checkpoints have data
    if previous_files.is_empty() || current_files.is_empty() {
        log::warn!("{}: missing reports for one of the selected dates", unit);
        return Ok(UnitReport::inconclusive(unit, dates, INCONCLUSIVE_ALERT));
    }

    let previous_delinquent = union_box_sets(previous_files, Some(min_days))?;
    let current_delinquent = union_box_sets(current_files, Some(min_days))?;
    let current_all = union_box_sets(current_files, None)?;

    // Newly delinquent past the threshold
    let to_block: Vec<String> = current_delinquent
        .difference(&previous_delinquent)
        .cloned()
        .collect();
    // Was delinquent, now gone from the current report entirely; merely
    // dropping below the threshold is not enough to unblock
    let to_unblock: Vec<String> = previous_delinquent
        .difference(&current_all)
        .cloned()
        .collect();

    log::debug!(
        "{}: {} to block, {} to unblock",
        unit,
        to_block.len(),
        to_unblock.len()
    );

    Ok(UnitReport {
        unit: unit.to_string(),
        to_block,
        to_unblock,
        dates,
        alert: None,
    })
}

/// Union of the box sets of several report files.
fn union_box_sets(paths: &[PathBuf], min_days: Option<f64>) -> Result<BTreeSet<String>, LoadError> {
    let mut all = BTreeSet::new();
    for path in paths {
        all.extend(load_box_set(path, min_days)?);
    }
    Ok(all)
}
