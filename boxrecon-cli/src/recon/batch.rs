//! Batch grouping of report files by unit and date

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::dates::ReportDate;
use super::extract::extract_metadata;
use super::registry::LocationRegistry;

/// Extensions accepted for report files.
pub const ALLOWED_EXTENSIONS: &[&str] = &["xlsx"];

/// One report file in a batch: where its bytes live plus the name it was
/// submitted under. Extraction always runs on the original name, never on
/// the storage path.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub path: PathBuf,
    pub original_name: String,
}

impl ReportFile {
    pub fn new(path: impl Into<PathBuf>, original_name: impl Into<String>) -> Self {
        ReportFile {
            path: path.into(),
            original_name: original_name.into(),
        }
    }
}

/// Whether a file name carries an accepted report extension.
pub fn is_allowed_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Report paths bucketed by `(unit, date)`.
///
/// `None` keys collect files whose name yielded no unit or no date; those
/// buckets are never read back during reconciliation but do show up in the
/// diagnostics. Arrival order is preserved within each bucket.
#[derive(Debug, Default)]
pub struct GroupedBatch {
    buckets: BTreeMap<Option<String>, BTreeMap<Option<ReportDate>, Vec<PathBuf>>>,
}

impl GroupedBatch {
    pub fn insert(&mut self, unit: Option<String>, date: Option<ReportDate>, path: PathBuf) {
        self.buckets
            .entry(unit)
            .or_default()
            .entry(date)
            .or_default()
            .push(path);
    }

    /// All distinct dates observed across every unit.
    pub fn observed_dates(&self) -> BTreeSet<ReportDate> {
        self.buckets
            .values()
            .flat_map(|dates| dates.keys())
            .filter_map(|date| *date)
            .collect()
    }

    /// Files for one `(unit, date)` bucket; empty when absent.
    pub fn files_for(&self, unit: &str, date: ReportDate) -> &[PathBuf] {
        self.buckets
            .get(&Some(unit.to_string()))
            .and_then(|dates| dates.get(&Some(date)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every `(unit, date, file count)` bucket, for diagnostics.
    pub fn observations(&self) -> impl Iterator<Item = (Option<&str>, Option<ReportDate>, usize)> {
        self.buckets.iter().flat_map(|(unit, dates)| {
            dates
                .iter()
                .map(move |(date, files)| (unit.as_deref(), *date, files.len()))
        })
    }
}

/// Bucket a batch of files by the metadata extracted from their names.
pub fn group_files(
    files: &[ReportFile],
    registry: &LocationRegistry,
    cutoff: f64,
) -> GroupedBatch {
    let mut grouped = GroupedBatch::default();
    for file in files {
        let meta = extract_metadata(&file.original_name, registry, cutoff);
        log::debug!(
            "{}: unit {:?}, date {:?}",
            file.original_name,
            meta.unit,
            meta.date.map(|d| d.to_string())
        );
        grouped.insert(meta.unit, meta.date, file.path.clone());
    }
    grouped
}
