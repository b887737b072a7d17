// ============================================================
// WORKBOOK READER
// ============================================================
// First worksheet of an Excel/ODS workbook as positional rows

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::domain::video::{CellValue, RawRow};

pub struct WorkbookReader;

impl WorkbookReader {
    pub fn read_file(path: &Path) -> Result<Vec<RawRow>> {
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            AppError::FileFormatError(format!("Failed to open workbook {}: {}", path.display(), e))
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::FileFormatError("No worksheet found".to_string()))?
            .map_err(|e| {
                AppError::FileFormatError(format!("Failed to read worksheet range: {}", e))
            })?;

        let rows = Self::rows_from_range(&range);
        tracing::debug!(path = %path.display(), rows = rows.len(), "Workbook decoded");

        Ok(rows)
    }

    /// Rows in sheet order; the header stays as row 0
    pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
        range
            .rows()
            .map(|row| row.iter().map(typed_cell).collect())
            .collect()
    }
}

/// Date cells keep their serial number so the date resolver sees what the sheet stored
fn typed_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::DateTime(value) => CellValue::Number(value.as_f64()),
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
            CellValue::Text(value.clone())
        }
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}
