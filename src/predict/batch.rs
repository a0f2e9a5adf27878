use std::fmt;
use std::path::Path;

use crate::data::features::{AbsorbanceReadings, FeatureVector, RATIO, REQUIRED_COLUMNS};
use crate::data::loader;
use crate::data::model::{BatchRow, BatchTable, CellValue};
use crate::error::BatchError;
use crate::regression::provider::ModelContext;

use super::safety::SafetyThresholds;

pub const BENZOATE_PPM: &str = "benzoate_ppm";
pub const SORBATE_PPM: &str = "sorbate_ppm";

/// Columns this module writes; stale copies in the input are overwritten.
const DERIVED_COLUMNS: [&str; 3] = [RATIO, BENZOATE_PPM, SORBATE_PPM];

// ---------------------------------------------------------------------------
// Dropped rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    /// Empty or NA cell.
    MissingValue { column: String },
    /// A required reading that is not a number.
    NonNumeric { column: String },
    /// `abs_320` is zero, or the quotient is NaN.
    UndefinedRatio,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingValue { column } => write!(f, "missing value in '{column}'"),
            DropReason::NonNumeric { column } => write!(f, "non-numeric value in '{column}'"),
            DropReason::UndefinedRatio => write!(f, "abs_280/abs_320 ratio undefined"),
        }
    }
}

/// A row excluded before prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    /// 1-based line number in the uploaded file.
    pub line: u64,
    pub reason: DropReason,
}

// ---------------------------------------------------------------------------
// Batch result
// ---------------------------------------------------------------------------

/// Outcome of a batch upload.
///
/// `table` holds the retained rows with every input column plus
/// `abs_280_320_ratio`, `benzoate_ppm` and `sorbate_ppm`; it is exactly what
/// gets exported. `unsafe_rows` is parallel to `table.rows` and is display-only.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPrediction {
    pub table: BatchTable,
    pub benzoate_ppm: Vec<f64>,
    pub sorbate_ppm: Vec<f64>,
    pub unsafe_rows: Vec<bool>,
    pub dropped: Vec<DroppedRow>,
}

impl BatchPrediction {
    pub fn unsafe_count(&self) -> usize {
        self.unsafe_rows.iter().filter(|&&u| u).count()
    }

    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        let mut s = format!("Batch predictions completed: {} rows", self.table.len());
        if !self.dropped.is_empty() {
            s.push_str(&format!(", {} dropped", self.dropped.len()));
        }
        if self.unsafe_count() > 0 {
            s.push_str(&format!(", {} above safety limits", self.unsafe_count()));
        }
        s
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Load `path` and run it through [`predict_batch`].
pub fn predict_file(
    models: &ModelContext,
    path: &Path,
    thresholds: &SafetyThresholds,
) -> Result<BatchPrediction, BatchError> {
    let table = loader::load_csv(path)?;
    log::info!("Loaded {} rows from {}", table.len(), path.display());
    predict_batch(models, table, thresholds)
}

/// Validate, derive, drop, predict and flag.
///
/// Returns before any model call when a required column is missing.
pub fn predict_batch(
    models: &ModelContext,
    mut table: BatchTable,
    thresholds: &SafetyThresholds,
) -> Result<BatchPrediction, BatchError> {
    let missing = table.missing_columns(&REQUIRED_COLUMNS);
    if !missing.is_empty() {
        return Err(BatchError::MissingColumns {
            required: REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect(),
            missing,
        });
    }

    let rows = std::mem::take(&mut table.rows);
    let columns = RowColumns::new(&table);
    let mut kept = Vec::with_capacity(rows.len());
    let mut features = Vec::with_capacity(rows.len());
    let mut dropped = Vec::new();

    for row in rows {
        match columns.features(&row) {
            Ok(fv) => {
                features.push(fv);
                kept.push(row);
            }
            Err(reason) => dropped.push(DroppedRow {
                line: row.line,
                reason,
            }),
        }
    }
    table.rows = kept;

    if !dropped.is_empty() {
        log::warn!("Dropped {} of {} rows", dropped.len(), dropped.len() + table.len());
        for d in &dropped {
            log::debug!("line {}: {}", d.line, d.reason);
        }
    }

    let benzoate_ppm = models.benzoate.predict_many(&features);
    let sorbate_ppm = models.sorbate.predict_many(&features);
    let unsafe_rows: Vec<bool> = benzoate_ppm
        .iter()
        .zip(&sorbate_ppm)
        .map(|(&b, &s)| thresholds.is_unsafe(b, s))
        .collect();

    table.set_column(RATIO, floats(features.iter().map(FeatureVector::ratio)));
    table.set_column(BENZOATE_PPM, floats(benzoate_ppm.iter().copied()));
    table.set_column(SORBATE_PPM, floats(sorbate_ppm.iter().copied()));

    log::info!(
        "Predicted {} rows ({} flagged unsafe)",
        table.len(),
        unsafe_rows.iter().filter(|&&u| u).count()
    );

    Ok(BatchPrediction {
        table,
        benzoate_ppm,
        sorbate_ppm,
        unsafe_rows,
        dropped,
    })
}

fn floats(values: impl Iterator<Item = f64>) -> Vec<CellValue> {
    values.map(CellValue::Float).collect()
}

/// Column positions resolved once per table.
struct RowColumns<'a> {
    headers: &'a [String],
    required: [usize; 3],
    /// Columns that will be overwritten, so their old cells don't count.
    derived: Vec<usize>,
}

impl<'a> RowColumns<'a> {
    /// Caller has already checked that the required columns exist.
    fn new(table: &'a BatchTable) -> Self {
        let position = |name: &str| table.column_index(name).unwrap_or(usize::MAX);
        Self {
            headers: &table.headers,
            required: REQUIRED_COLUMNS.map(position),
            derived: DERIVED_COLUMNS
                .iter()
                .filter_map(|name| table.column_index(name))
                .collect(),
        }
    }

    fn reading(&self, row: &BatchRow, slot: usize) -> Result<f64, DropReason> {
        let idx = self.required[slot];
        let column = REQUIRED_COLUMNS[slot].to_string();
        match &row.cells[idx] {
            CellValue::Missing => Err(DropReason::MissingValue { column }),
            cell => cell.as_f64().ok_or(DropReason::NonNumeric { column }),
        }
    }

    fn features(&self, row: &BatchRow) -> Result<FeatureVector, DropReason> {
        let readings = AbsorbanceReadings {
            abs_280: self.reading(row, 0)?,
            abs_320: self.reading(row, 1)?,
            abs_400: self.reading(row, 2)?,
        };
        let fv = FeatureVector::batch(readings).ok_or(DropReason::UndefinedRatio)?;

        if let Some(idx) =
            (0..row.cells.len()).find(|&i| row.cells[i].is_missing() && !self.derived.contains(&i))
        {
            return Err(DropReason::MissingValue {
                column: self.headers[idx].clone(),
            });
        }
        Ok(fv)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::export;
    use crate::data::loader::parse_csv;
    use crate::predict::testing::{context, RecordingRegressor};

    fn run(
        csv: &str,
        benzoate: &RecordingRegressor,
        sorbate: &RecordingRegressor,
    ) -> Result<BatchPrediction, BatchError> {
        let table = parse_csv(csv.as_bytes()).unwrap();
        predict_batch(&context(benzoate, sorbate), table, &SafetyThresholds::default())
    }

    #[test]
    fn zero_denominator_row_is_dropped_not_defaulted() {
        let (b, s) = (RecordingRegressor::ratio(), RecordingRegressor::constant(10.0));
        let out = run("abs_280,abs_320,abs_400\n0.5,0.0,0.3\n0.4,0.2,0.25\n", &b, &s).unwrap();

        assert_eq!(out.table.len(), 1);
        assert_eq!(
            out.dropped,
            vec![DroppedRow {
                line: 2,
                reason: DropReason::UndefinedRatio
            }]
        );
        assert_eq!(b.seen().len(), 1);
        assert_eq!(s.seen().len(), 1);
        assert_relative_eq!(out.benzoate_ppm[0], 2.0);

        let csv = export::to_csv_string(&out.table).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("abs_280,abs_320,abs_400,abs_280_320_ratio,benzoate_ppm,sorbate_ppm")
        );
        assert_eq!(lines.next(), Some("0.4,0.2,0.25,2,2,10"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn infinite_readings_with_nan_ratio_are_dropped() {
        let (b, s) = (RecordingRegressor::ratio(), RecordingRegressor::constant(10.0));
        let out = run("abs_280,abs_320,abs_400\ninf,inf,0.3\n0.4,0.2,0.25\n", &b, &s).unwrap();

        assert_eq!(out.table.len(), 1);
        assert_eq!(
            out.dropped,
            vec![DroppedRow {
                line: 2,
                reason: DropReason::UndefinedRatio
            }]
        );
        assert!(b.seen().iter().all(|x| x.iter().all(|v| !v.is_nan())));

        let csv = export::to_csv_string(&out.table).unwrap();
        assert!(!csv.contains("NaN"));
    }

    #[test]
    fn missing_required_columns_halt_before_any_prediction() {
        let (b, s) = (RecordingRegressor::constant(1.0), RecordingRegressor::constant(1.0));
        let err = run("abs_280,site\n0.5,north\n", &b, &s).unwrap_err();

        match &err {
            BatchError::MissingColumns { missing, .. } => {
                assert_eq!(missing, &vec!["abs_320".to_string(), "abs_400".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("abs_320, abs_400"));
        assert!(b.seen().is_empty());
        assert!(s.seen().is_empty());
    }

    #[test]
    fn rows_with_any_missing_cell_are_dropped_with_reason() {
        let (b, s) = (RecordingRegressor::constant(1.0), RecordingRegressor::constant(1.0));
        let csv = "id,abs_280,abs_320,abs_400,note\n\
                   1,0.4,0.2,0.25,ok\n\
                   2,0.4,,0.25,ok\n\
                   3,0.4,0.2,0.25,\n\
                   4,abc,0.2,0.25,ok\n\
                   5,0.3,0.1,NA,ok\n";
        let out = run(csv, &b, &s).unwrap();

        assert_eq!(out.table.len(), 1);
        assert_eq!(out.table.rows[0].cells[0], CellValue::Integer(1));
        let reasons: Vec<(u64, DropReason)> =
            out.dropped.iter().map(|d| (d.line, d.reason.clone())).collect();
        assert_eq!(
            reasons,
            vec![
                (3, DropReason::MissingValue { column: "abs_320".into() }),
                (4, DropReason::MissingValue { column: "note".into() }),
                (5, DropReason::NonNumeric { column: "abs_280".into() }),
                (6, DropReason::MissingValue { column: "abs_400".into() }),
            ]
        );
        assert!(out.summary().contains("4 dropped"));
    }

    #[test]
    fn passes_extra_columns_through_in_order() {
        let (b, s) = (RecordingRegressor::constant(1.0), RecordingRegressor::constant(2.0));
        let out = run("site,abs_400,abs_320,abs_280\nnorth,0.1,0.5,1.0\n", &b, &s).unwrap();

        assert_eq!(
            out.table.headers,
            vec!["site", "abs_400", "abs_320", "abs_280", RATIO, BENZOATE_PPM, SORBATE_PPM]
        );
        // Feature order is fixed regardless of column order in the file.
        assert_eq!(b.seen(), vec![vec![1.0, 0.5, 0.1, 2.0]]);
    }

    #[test]
    fn existing_derived_columns_are_overwritten() {
        let (b, s) = (RecordingRegressor::constant(7.0), RecordingRegressor::constant(8.0));
        let out = run("abs_280,abs_320,abs_400,benzoate_ppm\n0.4,0.2,0.25,\n", &b, &s).unwrap();

        assert!(out.dropped.is_empty());
        assert_eq!(out.table.headers.len(), 6);
        assert_eq!(out.table.rows[0].cells[3], CellValue::Float(7.0));
    }

    #[test]
    fn flags_rows_strictly_above_limits() {
        let (b, s) = (RecordingRegressor::scaled(100.0), RecordingRegressor::scaled(100.0));
        let csv = "abs_280,abs_320,abs_400\n1.5,1,0\n1.6,1,0\n2.5,1,0\n2.6,1,0\n";
        let out = run(csv, &b, &s).unwrap();

        // benzoate = sorbate = 100 * abs_280
        assert_eq!(out.unsafe_rows, vec![false, true, true, true]);
        assert_eq!(out.unsafe_count(), 3);
        // Flags never reach the exported table.
        assert_eq!(out.table.headers.len(), 6);
    }

    #[test]
    fn export_round_trips_through_parser() {
        let (b, s) = (RecordingRegressor::scaled(123.456), RecordingRegressor::ratio());
        let csv = "sample,abs_280,abs_320,abs_400\nA,0.42,0.35,0.28\nB,0.1,0.3,0.7\n";
        let out = run(csv, &b, &s).unwrap();

        let text = export::to_csv_string(&out.table).unwrap();
        let reparsed = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(reparsed.headers, out.table.headers);
        assert_eq!(reparsed.len(), out.table.len());

        for name in ["abs_280", "abs_320", "abs_400", RATIO, BENZOATE_PPM, SORBATE_PPM] {
            let before = out.table.numeric_column(name).unwrap();
            let after = reparsed.numeric_column(name).unwrap();
            for (x, y) in before.iter().zip(&after) {
                assert_relative_eq!(x.unwrap(), y.unwrap(), epsilon = 1e-12);
            }
        }
        assert_eq!(reparsed.rows[1].cells[0], CellValue::Text("B".into()));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let (b, s) = (RecordingRegressor::constant(1.0), RecordingRegressor::constant(1.0));
        let err = predict_file(
            &context(&b, &s),
            &dir.path().join("nope.csv"),
            &SafetyThresholds::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::Io { .. }));
    }
}
