//! Filename metadata extraction
//!
//! Report filenames carry both pieces of metadata the pipeline needs, e.g.
//! "Cidade Nova 07.08.xlsx": a unit name (matched against the registry,
//! tolerating accents, separators and typos) and a `D.M`-style report date.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::dates::ReportDate;
use super::registry::LocationRegistry;
use super::text::normalize;

/// Matches "7.8", "07.8", "7.08", "27.08" and the like.
static DATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}\.\d{1,2})\b").expect("date pattern is valid"));

/// Unit and date recovered from one report filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub unit: Option<String>,
    pub date: Option<ReportDate>,
}

/// Extract `(unit, date)` from an original filename.
///
/// The first date-like token sets the date; every date token is removed
/// before the remainder is normalized and resolved against the registry
/// (exact substring first, fuzzy fallback at `cutoff`).
pub fn extract_metadata(
    filename: &str,
    registry: &LocationRegistry,
    cutoff: f64,
) -> FileMetadata {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let date = DATE_TOKEN
        .find(&stem)
        .and_then(|m| ReportDate::parse(m.as_str()));

    let without_dates = DATE_TOKEN.replace_all(&stem, "");
    let candidate = normalize(&without_dates);

    let unit = registry.resolve(&candidate, cutoff).map(str::to_string);

    FileMetadata { unit, date }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUTOFF: f64 = 0.75;

    fn extract(name: &str) -> FileMetadata {
        extract_metadata(name, &LocationRegistry::with_default_units(), CUTOFF)
    }

    #[test]
    fn test_full_filename() {
        let meta = extract("Cidade Nova 07.08.xlsx");
        assert_eq!(meta.unit.as_deref(), Some("Cidade Nova"));
        assert_eq!(meta.date, Some(ReportDate::new(7, 8)));
    }

    #[test]
    fn test_extension_invariance() {
        let lower = extract("Castelo 27.08.xlsx");
        let upper = extract("Castelo 27.08.XLSX");
        assert_eq!(lower, upper);
        assert_eq!(lower.date, Some(ReportDate::new(27, 8)));
    }

    #[test]
    fn test_separator_invariance() {
        let spaced = extract("Nova Cachoeirinha 07.08.xlsx");
        let underscored = extract("_nova_cachoeirinha_ 07.08.xlsx");
        assert_eq!(spaced, underscored);
        assert_eq!(spaced.unit.as_deref(), Some("Nova Cachoeirinha"));
    }

    #[test]
    fn test_underscore_glued_to_date_hides_it() {
        // '_' is a word character, so the \b before the token does not
        // match; the original convention separates the date with a space
        let meta = extract("nova_cachoeirinha_07.08.xlsx");
        assert_eq!(meta.unit.as_deref(), Some("Nova Cachoeirinha"));
        assert_eq!(meta.date, None);
    }

    #[test]
    fn test_fuzzy_unit_resolution() {
        let meta = extract("Cidde Nova 07.08.xlsx");
        assert_eq!(meta.unit.as_deref(), Some("Cidade Nova"));
        assert_eq!(meta.date, Some(ReportDate::new(7, 8)));
    }

    #[test]
    fn test_accented_and_cased_unit() {
        let meta = extract("BURITÍS 15.01.xlsx");
        assert_eq!(meta.unit.as_deref(), Some("Buritis"));
    }

    #[test]
    fn test_first_date_token_wins() {
        let meta = extract("Raja 07.08 27.08.xlsx");
        assert_eq!(meta.unit.as_deref(), Some("Raja"));
        assert_eq!(meta.date, Some(ReportDate::new(7, 8)));
    }

    #[test]
    fn test_unknown_unit() {
        let meta = extract("Deposito Central 07.08.xlsx");
        assert_eq!(meta.unit, None);
        assert_eq!(meta.date, Some(ReportDate::new(7, 8)));
    }

    #[test]
    fn test_missing_date() {
        let meta = extract("Castelo semana atual.xlsx");
        assert_eq!(meta.unit.as_deref(), Some("Castelo"));
        assert_eq!(meta.date, None);
    }

    #[test]
    fn test_single_digit_date_is_padded() {
        let meta = extract("Raja 7.8.xlsx");
        assert_eq!(meta.date.unwrap().to_string(), "07.08");
    }
}
