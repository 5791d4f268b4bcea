//! Year-less report dates and selection of the comparison pair

use std::fmt;

use serde::{Serialize, Serializer};

/// A report date as carried in filenames: day and month, no year.
///
/// Ordering is month-major, matching how the comparison pair is picked.
/// With no year in the data, batches spanning a year boundary misorder
/// (a December report sorts after a January one); that limitation is part
/// of the filename convention and is deliberately not papered over here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportDate {
    // month before day so the derived ordering is month-major
    month: u8,
    day: u8,
}

impl ReportDate {
    pub fn new(day: u8, month: u8) -> Self {
        ReportDate { month, day }
    }

    /// Parse a `D.M` / `DD.MM` token. No range validation: the filename
    /// convention only guarantees one- or two-digit numbers.
    pub fn parse(token: &str) -> Option<Self> {
        let (day, month) = token.split_once('.')?;
        let day = day.trim().parse().ok()?;
        let month = month.trim().parse().ok()?;
        Some(ReportDate::new(day, month))
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}", self.day, self.month)
    }
}

impl Serialize for ReportDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Pick the two most recent distinct dates as `(previous, current)`.
///
/// Returns `None` when fewer than two distinct dates exist; the engine
/// then marks every unit inconclusive rather than comparing a date with
/// itself.
pub fn pick_pair(dates: impl IntoIterator<Item = ReportDate>) -> Option<(ReportDate, ReportDate)> {
    let mut ordered: Vec<ReportDate> = dates.into_iter().collect();
    ordered.sort_unstable();
    ordered.dedup();

    if ordered.len() < 2 {
        return None;
    }
    Some((ordered[ordered.len() - 2], ordered[ordered.len() - 1]))
}
