use std::io::Write;
use std::path::Path;

use crate::error::ExportError;

use super::model::BatchTable;

/// File name proposed by the save dialog.
pub const DEFAULT_EXPORT_NAME: &str = "predicted_preservatives.csv";

/// Write the table as CSV: header row, no index column.
pub fn write_csv<W: Write>(table: &BatchTable, out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.cells.iter().map(|c| c.to_field()))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render the table to an in-memory CSV string.
#[cfg(test)]
pub fn to_csv_string(table: &BatchTable) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    // csv only ever writes the UTF-8 it was given.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Save the table to `path`, replacing any existing file.
pub fn save_csv(table: &BatchTable, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(table, std::io::BufWriter::new(file))
}
