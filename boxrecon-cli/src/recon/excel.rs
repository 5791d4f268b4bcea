//! Spreadsheet loading for occupancy reports
//!
//! Reports are `.xlsx` files whose first sheet has a header row with two
//! required columns: the per-row delinquency day count and a delimited
//! list of box identifiers.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};

/// Column with the per-row delinquency day count.
pub const COL_DELINQUENT_DAYS: &str = "Dias Inadimplência";
/// Column with the delimited box identifiers.
pub const COL_BOXES: &str = "Boxes";

/// Hard failure while loading a report spreadsheet.
///
/// Either variant aborts the whole batch: a partially-loaded batch must
/// never produce block/unblock recommendations.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// Required columns are absent from the header row
    MissingColumns {
        path: PathBuf,
        columns: Vec<String>,
    },
    /// The file could not be opened or parsed as a spreadsheet
    Unreadable { path: PathBuf, message: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingColumns { path, columns } => {
                write!(
                    f,
                    "Planilha sem colunas obrigatórias: {} ({})",
                    columns.join(", "),
                    path.display()
                )
            }
            LoadError::Unreadable { path, message } => {
                write!(
                    f,
                    "Não foi possível ler a planilha {}: {}",
                    path.display(),
                    message
                )
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Read the box-identifier set from one report spreadsheet.
///
/// With `min_days`, only rows whose delinquency count is present and at
/// least the threshold contribute. Without it every row contributes and
/// the delinquency column is ignored, though it must still exist.
pub fn load_box_set(path: &Path, min_days: Option<f64>) -> Result<BTreeSet<String>, LoadError> {
    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| LoadError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::Unreadable {
            path: path.to_path_buf(),
            message: "arquivo sem abas".to_string(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);

    let days_col = find_column(header, COL_DELINQUENT_DAYS);
    let boxes_col = find_column(header, COL_BOXES);
    let (days_col, boxes_col) = match (days_col, boxes_col) {
        (Some(d), Some(b)) => (d, b),
        (d, b) => {
            let mut columns = Vec::new();
            if d.is_none() {
                columns.push(COL_DELINQUENT_DAYS.to_string());
            }
            if b.is_none() {
                columns.push(COL_BOXES.to_string());
            }
            return Err(LoadError::MissingColumns {
                path: path.to_path_buf(),
                columns,
            });
        }
    };

    let mut boxes = BTreeSet::new();
    for row in rows {
        if let Some(min) = min_days {
            // Non-numeric day counts are treated as missing and excluded
            match row.get(days_col).and_then(cell_to_days) {
                Some(days) if days >= min => {}
                _ => continue,
            }
        }
        if let Some(cell) = row.get(boxes_col) {
            for id in split_boxes(&cell_to_string(cell)) {
                boxes.insert(id);
            }
        }
    }

    log::debug!(
        "{}: {} boxes (min_days: {:?})",
        path.display(),
        boxes.len(),
        min_days
    );
    Ok(boxes)
}

/// Split a Boxes cell on `, / ; |` or line breaks; trim, uppercase, drop
/// empty tokens.
pub fn split_boxes(value: &str) -> Vec<String> {
    value
        .split([',', '/', ';', '|', '\n', '\r'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Index of the first header cell that matches `name` exactly.
fn find_column(header: &[Data], name: &str) -> Option<usize> {
    header.iter().position(|cell| match cell {
        Data::String(s) => s == name,
        _ => false,
    })
}

/// Coerce a delinquency cell to a day count.
fn cell_to_days(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String content of a box-list cell; numeric identifiers are kept.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    /// Cell value for the delinquency column in a fixture row.
    enum Days {
        Number(f64),
        Text(&'static str),
        Blank,
    }

    fn write_fixture(dir: &TempDir, name: &str, rows: &[(Days, &str)]) -> PathBuf {
        let path = dir.path().join(name);
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, COL_DELINQUENT_DAYS).unwrap();
        worksheet.write_string(0, 1, COL_BOXES).unwrap();
        for (i, (days, boxes)) in rows.iter().enumerate() {
            let row = (i + 1) as u32;
            match days {
                Days::Number(n) => {
                    worksheet.write_number(row, 0, *n).unwrap();
                }
                Days::Text(t) => {
                    worksheet.write_string(row, 0, *t).unwrap();
                }
                Days::Blank => {}
            }
            worksheet.write_string(row, 1, *boxes).unwrap();
        }
        workbook.save(&path).unwrap();
        path
    }

    fn set_of(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_boxes() {
        assert_eq!(
            split_boxes("A1, B2/C3;D4|E5"),
            vec!["A1", "B2", "C3", "D4", "E5"]
        );
    }

    #[test]
    fn test_split_boxes_trims_uppercases_and_drops_empties() {
        assert_eq!(split_boxes(" a1 ,, b2 \n c3 "), vec!["A1", "B2", "C3"]);
        assert_eq!(split_boxes(""), Vec::<String>::new());
    }

    #[test]
    fn test_threshold_mode_filters_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "Castelo 07.08.xlsx",
            &[
                (Days::Number(10.0), "A1, B2"),
                (Days::Number(5.0), "C3"),
                (Days::Number(4.0), "D4"),
                (Days::Text("n/d"), "E5"),
                (Days::Blank, "F6"),
            ],
        );

        let boxes = load_box_set(&path, Some(5.0)).unwrap();
        assert_eq!(boxes, set_of(&["A1", "B2", "C3"]));
    }

    #[test]
    fn test_unfiltered_mode_takes_every_row() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "Castelo 07.08.xlsx",
            &[
                (Days::Number(10.0), "A1"),
                (Days::Number(1.0), "B2"),
                (Days::Text("n/d"), "C3"),
            ],
        );

        let boxes = load_box_set(&path, None).unwrap();
        assert_eq!(boxes, set_of(&["A1", "B2", "C3"]));
    }

    #[test]
    fn test_missing_boxes_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Raja 07.08.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, COL_DELINQUENT_DAYS).unwrap();
        worksheet.write_string(0, 1, "Observações").unwrap();
        workbook.save(&path).unwrap();

        let err = load_box_set(&path, Some(5.0)).unwrap_err();
        match err {
            LoadError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec![COL_BOXES.to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_sheet_reports_both_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Raja 07.08.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        let err = load_box_set(&path, None).unwrap_err();
        match err {
            LoadError::MissingColumns { columns, .. } => {
                assert_eq!(
                    columns,
                    vec![COL_DELINQUENT_DAYS.to_string(), COL_BOXES.to_string()]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Buritis 07.08.xlsx");
        std::fs::write(&path, b"not a spreadsheet").unwrap();

        let err = load_box_set(&path, Some(5.0)).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
    }

    #[test]
    fn test_numeric_box_ids_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Castelo 07.08.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, COL_DELINQUENT_DAYS).unwrap();
        worksheet.write_string(0, 1, COL_BOXES).unwrap();
        worksheet.write_number(1, 0, 9.0).unwrap();
        worksheet.write_number(1, 1, 101.0).unwrap();
        workbook.save(&path).unwrap();

        let boxes = load_box_set(&path, Some(5.0)).unwrap();
        assert_eq!(boxes, set_of(&["101"]));
    }
}
