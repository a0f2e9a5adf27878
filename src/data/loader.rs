use std::io::Read;
use std::path::Path;

use crate::error::BatchError;

use super::model::{BatchRow, BatchTable, CellValue};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load an uploaded CSV file. Only `.csv` uploads are accepted.
pub fn load_csv(path: &Path) -> Result<BatchTable, BatchError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" {
        return Err(BatchError::UnsupportedExtension(ext));
    }

    let file = std::fs::File::open(path).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file)
}

/// CSV layout: header row with column names, one sample per line.
/// Every row must have as many fields as the header.
pub fn parse_csv<R: Read>(input: R) -> Result<BatchTable, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cells = record.iter().map(CellValue::guess).collect();
        rows.push(BatchRow { line, cells });
    }

    log::debug!("Parsed {} CSV rows with columns {:?}", rows.len(), headers);
    Ok(BatchTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_typed_cells() {
        let table = parse_csv("abs_280,abs_320,site\n0.5,0.25,north\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["abs_280", "abs_320", "site"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[0].cells[0], CellValue::Float(0.5));
        assert_eq!(table.rows[0].cells[2], CellValue::Text("north".into()));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let err = parse_csv("abs_280,abs_320\n0.5,0.25,9\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BatchError::Parse(_)));
        assert!(err.to_string().starts_with("could not parse CSV"));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let err = parse_csv(&b"abs_280,abs_320,abs_400\n0.4,\xff,0.2\n"[..]).unwrap_err();
        assert!(matches!(err, BatchError::Parse(_)));
        assert!(err.to_string().starts_with("could not parse CSV"));
    }

    #[test]
    fn strips_byte_order_mark_from_header() {
        let table = parse_csv("\u{feff}abs_280,abs_320\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.column_index("abs_280"), Some(0));
    }

    #[test]
    fn rejects_non_csv_uploads() {
        let err = load_csv(Path::new("readings.xlsx")).unwrap_err();
        assert!(matches!(err, BatchError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, BatchError::Io { .. }));
    }
}
