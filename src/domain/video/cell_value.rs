// ============================================================
// CELL VALUE
// ============================================================
// Loosely-typed spreadsheet cell as delivered by the decoder

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell from a decoded spreadsheet row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// Missing-or-empty check used for column defaults.
    /// Only an empty cell or empty text counts; `0` is a real value.
    pub fn is_absent(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Text form of the cell, `None` when absent
    pub fn as_text(&self) -> Option<String> {
        if self.is_absent() {
            None
        } else {
            Some(self.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}
