// ============================================================
// CSV SHEET READER
// ============================================================
// Read CSV exports into loosely-typed rows, with encoding and delimiter detection

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::GB18030;
use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::domain::video::{CellValue, RawRow};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV reader producing positional rows, header included
pub struct CsvSheetReader {
    /// Delimiter character; `None` means detect from content
    delimiter: Option<u8>,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvSheetReader {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim: true,
        }
    }
}

impl CsvSheetReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn read_file(&self, path: &Path) -> Result<Vec<RawRow>> {
        let bytes = std::fs::read(path)?;
        let content = decode_bytes(&bytes);
        self.read_content(&content)
    }

    /// Parse CSV content; the header row is kept as row 0
    pub fn read_content(&self, content: &str) -> Result<Vec<RawRow>> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::FileFormatError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::typed_row(&record));
        }

        Ok(rows)
    }

    fn typed_row(record: &StringRecord) -> RawRow {
        record.iter().map(typed_cell).collect()
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe).
    /// Scores each candidate by its mean count per line over the first 10 lines,
    /// divided by 1 + the standard deviation. Counting compares whole chars, so multibyte
    /// text never aliases a delimiter byte.
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.chars().filter(|&c| c == char::from(delimiter)).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// UTF-8 (BOM stripped) when valid, otherwise GB18030, the usual encoding of Chinese exports
fn decode_bytes(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(content) = std::str::from_utf8(bytes) {
        return content.to_string();
    }

    let (content, _, had_errors) = GB18030.decode(bytes);
    if had_errors {
        tracing::warn!("CSV is neither valid UTF-8 nor GB18030; invalid bytes were replaced");
    }
    content.into_owned()
}

/// Numeric text becomes a number only when it prints back unchanged,
/// so 19-digit video IDs and zero-padded codes stay text
fn typed_cell(value: &str) -> CellValue {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() && number.to_string() == trimmed => {
            CellValue::Number(number)
        }
        _ => CellValue::Text(value.to_string()),
    }
}
