mod csv_reader;
mod workbook_reader;

pub use csv_reader::CsvSheetReader;
pub use workbook_reader::WorkbookReader;

use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::domain::video::RawRow;

const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "xlsb", "ods"];
const CSV_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

/// Decode an export file into raw rows, picking the reader by extension
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    tracing::info!(path = %path.display(), format = %extension, "Decoding spreadsheet");

    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        WorkbookReader::read_file(path)
    } else if CSV_EXTENSIONS.contains(&extension.as_str()) {
        CsvSheetReader::new().read_file(path)
    } else {
        Err(AppError::FileFormatError(format!(
            "Unsupported file type '{}' for {}",
            extension,
            path.display()
        )))
    }
}
