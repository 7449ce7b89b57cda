//! Upload ingest.
//!
//! Turns a user-supplied delimited file into a [`Dataset`]. The rules are
//! deliberately narrow:
//!
//! - **Strict text**: content that is not UTF-8 CSV is a `FileParse` error and
//!   the page stops there (no fallback to synthetic data)
//! - **Required columns** are matched by exact header name (after trimming
//!   whitespace and a BOM); extra columns are ignored
//! - **Numeric cells**: every row must carry numbers in the required columns
//! - **No range checks** on uploaded values

use std::collections::HashMap;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{
    COL_CONSUMPTION, COL_OCCUPANTS, COL_WASTE, Dataset, DatasetSource, REQUIRED_COLUMNS, WasteRow,
};
use crate::error::AppError;

/// Column positions of the required fields within a record.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    occupants: usize,
    consumption: usize,
    waste: usize,
}

/// Read a file from disk and parse it as an uploaded dataset.
pub fn load_dataset_file(path: &Path) -> Result<Dataset, AppError> {
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::file_parse(format!("Failed to read '{}': {e}", path.display()))
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_upload(&name, &bytes)
}

/// Parse uploaded bytes into a dataset.
///
/// `name` is only used to label the dataset source.
pub fn parse_upload(name: &str, bytes: &[u8]) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| AppError::file_parse(format!("Failed to read CSV headers: {e}")))?
        .clone();
    if headers.is_empty() || headers.iter().all(|h| normalize_header_name(h).is_empty()) {
        return Err(AppError::file_parse("No columns to parse from file."));
    }

    let header_map = build_header_map(&headers);
    let index = resolve_columns(&header_map)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AppError::file_parse(format!("CSV parse error: {e}")))?;
        // Header is line 1, so records without position info fall back to a
        // 1-based data line count.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);
        rows.push(parse_row(&record, index, line)?);
    }

    if rows.is_empty() {
        return Err(AppError::file_parse("File has a header but no data rows."));
    }

    tracing::info!(name, rows = rows.len(), "parsed uploaded dataset");

    Ok(Dataset {
        rows,
        source: DatasetSource::Uploaded {
            name: name.to_string(),
        },
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicate headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').trim().to_string()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<ColumnIndex, AppError> {
    for col in REQUIRED_COLUMNS {
        if !header_map.contains_key(col) {
            return Err(AppError::missing_column(col));
        }
    }
    Ok(ColumnIndex {
        occupants: header_map[COL_OCCUPANTS],
        consumption: header_map[COL_CONSUMPTION],
        waste: header_map[COL_WASTE],
    })
}

fn parse_row(record: &StringRecord, index: ColumnIndex, line: usize) -> Result<WasteRow, AppError> {
    let occupants_raw = get_cell(record, index.occupants, COL_OCCUPANTS, line)?;
    let occupants = parse_occupants(occupants_raw).ok_or_else(|| {
        cell_error(line, COL_OCCUPANTS, occupants_raw, "expected a whole number")
    })?;

    let consumption_raw = get_cell(record, index.consumption, COL_CONSUMPTION, line)?;
    let consumption = parse_real(consumption_raw)
        .ok_or_else(|| cell_error(line, COL_CONSUMPTION, consumption_raw, "expected a number"))?;

    let waste_raw = get_cell(record, index.waste, COL_WASTE, line)?;
    let waste = parse_real(waste_raw)
        .ok_or_else(|| cell_error(line, COL_WASTE, waste_raw, "expected a number"))?;

    Ok(WasteRow {
        occupants,
        consumption,
        waste,
    })
}

fn get_cell<'r>(record: &'r StringRecord, idx: usize, column: &str, line: usize) -> Result<&'r str, AppError> {
    record
        .get(idx)
        .ok_or_else(|| AppError::file_parse(format!("Line {line}: missing value for `{column}`.")))
}

fn cell_error(line: usize, column: &str, raw: &str, what: &str) -> AppError {
    AppError::file_parse(format!("Line {line}: invalid `{column}` value '{raw}' ({what})."))
}

/// Accept `3` as well as `3.0` (tables saved from float columns).
fn parse_occupants(s: &str) -> Option<u32> {
    if let Ok(v) = s.parse::<u32>() {
        return Some(v);
    }
    let v = parse_real(s)?;
    if v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
        Some(v as u32)
    } else {
        None
    }
}

fn parse_real(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const FIVE_ROWS: &str = "\
Jumlah Penghuni,Konsumsi Makanan (kg),Sampah (kg)
1,1.0,0.5
2,1.5,1.4
3,2.0,3.1
4,0.8,1.6
5,1.2,3.0
";

    #[test]
    fn parses_valid_table() {
        let ds = parse_upload("five.csv", FIVE_ROWS.as_bytes()).unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(
            ds.rows[2],
            WasteRow {
                occupants: 3,
                consumption: 2.0,
                waste: 3.1
            }
        );
        assert_eq!(
            ds.source,
            DatasetSource::Uploaded {
                name: "five.csv".to_string()
            }
        );
    }

    #[test]
    fn binary_content_is_a_parse_error() {
        let bytes: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\xff\xfe\x00";
        let err = parse_upload("image.png", bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileParse);
    }

    #[test]
    fn empty_content_is_a_parse_error() {
        let err = parse_upload("empty.csv", b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileParse);
    }

    #[test]
    fn header_only_is_a_parse_error() {
        let err = parse_upload(
            "head.csv",
            b"Jumlah Penghuni,Konsumsi Makanan (kg),Sampah (kg)\n",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileParse);
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let csv = "Jumlah Penghuni,Konsumsi Makanan (kg),Sampah (kg)\n1,1.0,0.5\n2,1.5\n";
        let err = parse_upload("ragged.csv", csv.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileParse);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "Jumlah Penghuni,Sampah (kg)\n1,0.5\n";
        let err = parse_upload("partial.csv", csv.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingColumn);
        assert!(err.to_string().contains(COL_CONSUMPTION));
    }

    #[test]
    fn non_numeric_cell_names_the_line() {
        let csv = "Jumlah Penghuni,Konsumsi Makanan (kg),Sampah (kg)\n1,1.0,0.5\n2,abc,1.0\n";
        let err = parse_upload("bad.csv", csv.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileParse);
        assert!(err.to_string().contains("Line 3"), "{err}");
        assert!(err.to_string().contains(COL_CONSUMPTION));
    }

    #[test]
    fn extra_columns_bom_and_float_occupants_are_accepted() {
        let csv = "\u{feff}Kota, Sampah (kg) ,Jumlah Penghuni,Konsumsi Makanan (kg)\n\
                   Bandung,2.5,4.0,1.1\n\
                   Medan,0.9,2,0.7\n";
        let ds = parse_upload("extra.csv", csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].occupants, 4);
        assert!((ds.rows[0].waste - 2.5).abs() < 1e-12);
        assert!((ds.rows[1].consumption - 0.7).abs() < 1e-12);
    }

    #[test]
    fn fractional_occupants_are_rejected() {
        assert_eq!(parse_occupants("2.5"), None);
        assert_eq!(parse_occupants("-1"), None);
        assert_eq!(parse_occupants("7"), Some(7));
        assert_eq!(parse_occupants("7.0"), Some(7));
    }

    #[test]
    fn unreadable_path_is_a_parse_error() {
        let path = std::env::temp_dir().join("household-waste-does-not-exist.csv");
        let err = load_dataset_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileParse);
    }
}
