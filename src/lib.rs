pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::{AnalyticsEngine, DatasetAnalysis, RowNormalizer};
pub use domain::error::{AppError, Result};
pub use domain::video::{AnalysisResult, AnalyzerConfig, CellValue, RawRow, VideoRecord};
