// ============================================================
// ROW NORMALIZER
// ============================================================
// Positional spreadsheet rows -> validated video records

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use crate::domain::error::{AppError, Result};
use crate::domain::video::{CellValue, PublishTime, RawRow, VideoRecord};

const DEFAULT_CREATOR_NAME: &str = "未知达人";
const DEFAULT_MEDIA_TYPE: &str = "视频";
const DEFAULT_DESCRIPTION: &str = "无描述";

/// Fixed column layout of the export
mod column {
    pub const CREATOR_UID: usize = 0;
    pub const DOUYIN_NUMBER: usize = 1;
    pub const CREATOR_NAME: usize = 2;
    pub const CREATOR_LINK: usize = 3;
    pub const FANS_COUNT: usize = 4;
    pub const CREATOR_BIO: usize = 5;
    pub const VIDEO_ID: usize = 6;
    pub const VIDEO_LINK: usize = 7;
    pub const MEDIA_TYPE: usize = 8;
    pub const DESCRIPTION: usize = 9;
    pub const LIKE_COUNT: usize = 10;
    pub const COLLECT_COUNT: usize = 11;
    pub const COMMENT_COUNT: usize = 12;
    pub const SHARE_COUNT: usize = 13;
    pub const PUBLISH_TIME: usize = 14;
}

/// Why a single cell fell back to its column default
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    Missing,
    NotANumber(String),
    Negative(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing => write!(f, "missing"),
            FieldError::NotANumber(raw) => write!(f, "not a number: {:?}", raw),
            FieldError::Negative(raw) => write!(f, "negative count: {:?}", raw),
        }
    }
}

/// Converts decoded rows into video records, defaulting instead of rejecting
pub struct RowNormalizer {
    clock: fn() -> DateTime<Utc>,
}

impl Default for RowNormalizer {
    fn default() -> Self {
        Self { clock: Utc::now }
    }
}

impl RowNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the clock used to fill a missing publish time
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Skip the header row and normalize every data row.
    /// Fails only when there is no data row at all.
    pub fn normalize(&self, rows: &[RawRow]) -> Result<Vec<VideoRecord>> {
        if rows.len() < 2 {
            return Err(AppError::InsufficientData(format!(
                "expected a header row and at least one data row, got {} row(s)",
                rows.len()
            )));
        }

        Ok(rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, row)| self.normalize_row(index, row))
            .collect())
    }

    fn normalize_row(&self, index: usize, row: &[CellValue]) -> VideoRecord {
        let text = |col: usize, default: &str| -> String {
            read_text(row.get(col)).unwrap_or_else(|_| default.to_string())
        };
        let count = |col: usize| -> u64 {
            read_count(row.get(col)).unwrap_or_else(|err| {
                if err != FieldError::Missing {
                    tracing::debug!(row = index, column = col, error = %err, "Count defaulted to 0");
                }
                0
            })
        };

        VideoRecord {
            creator_uid: text(column::CREATOR_UID, ""),
            douyin_number: text(column::DOUYIN_NUMBER, ""),
            creator_name: text(column::CREATOR_NAME, DEFAULT_CREATOR_NAME),
            creator_link: text(column::CREATOR_LINK, ""),
            fans_count: count(column::FANS_COUNT),
            creator_bio: text(column::CREATOR_BIO, ""),
            video_id: text(column::VIDEO_ID, ""),
            video_link: text(column::VIDEO_LINK, ""),
            media_type: text(column::MEDIA_TYPE, DEFAULT_MEDIA_TYPE),
            video_description: text(column::DESCRIPTION, DEFAULT_DESCRIPTION),
            like_count: count(column::LIKE_COUNT),
            collect_count: count(column::COLLECT_COUNT),
            comment_count: count(column::COMMENT_COUNT),
            share_count: count(column::SHARE_COUNT),
            publish_time: read_publish_time(row.get(column::PUBLISH_TIME)).unwrap_or_else(|_| {
                tracing::debug!(row = index, "Publish time missing, using current time");
                PublishTime::Text((self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true))
            }),
        }
    }
}

fn read_text(cell: Option<&CellValue>) -> std::result::Result<String, FieldError> {
    cell.and_then(CellValue::as_text).ok_or(FieldError::Missing)
}

fn read_publish_time(cell: Option<&CellValue>) -> std::result::Result<PublishTime, FieldError> {
    match cell {
        Some(CellValue::Number(days)) => Ok(PublishTime::Serial(*days)),
        Some(CellValue::Text(text)) if !text.is_empty() => Ok(PublishTime::Text(text.clone())),
        _ => Err(FieldError::Missing),
    }
}

/// Non-negative integer with leading-integer semantics:
/// `"12abc"` -> 12, `"3.9"` -> 3, `7.8` -> 7
fn read_count(cell: Option<&CellValue>) -> std::result::Result<u64, FieldError> {
    match cell {
        None | Some(CellValue::Empty) => Err(FieldError::Missing),
        Some(CellValue::Number(value)) => {
            if !value.is_finite() {
                Err(FieldError::NotANumber(value.to_string()))
            } else if value.trunc() < 0.0 {
                Err(FieldError::Negative(value.to_string()))
            } else {
                // `as` saturates at u64::MAX
                Ok(value.trunc() as u64)
            }
        }
        Some(CellValue::Text(text)) => parse_leading_integer(text),
    }
}

fn parse_leading_integer(text: &str) -> std::result::Result<u64, FieldError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Err(FieldError::Missing);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_run: Vec<u8> = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    if digit_run.is_empty() {
        return Err(FieldError::NotANumber(text.to_string()));
    }

    let value = digit_run.iter().fold(0u64, |acc, &digit| {
        acc.saturating_mul(10).saturating_add(u64::from(digit))
    });

    if negative && value > 0 {
        return Err(FieldError::Negative(text.to_string()));
    }
    Ok(value)
}
