// ============================================================
// DATASET ANALYSIS USE CASE
// ============================================================
// Orchestrate decoding, normalization and analytics for one export file

use std::path::Path;
use std::time::Instant;

use super::analytics_engine::AnalyticsEngine;
use super::row_normalizer::RowNormalizer;
use crate::domain::error::{AppError, Result};
use crate::domain::video::{AnalysisResult, AnalyzerConfig, RawRow};
use crate::infrastructure::spreadsheet;

/// Export file -> AnalysisResult
pub struct DatasetAnalysis {
    normalizer: RowNormalizer,
    engine: AnalyticsEngine,
}

impl DatasetAnalysis {
    /// Validates `config` before building the engine
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid analyzer config: {}", e)))?;

        Ok(Self {
            normalizer: RowNormalizer::new(),
            engine: AnalyticsEngine::new(config),
        })
    }

    pub fn with_normalizer(mut self, normalizer: RowNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Decode, normalize and analyze a spreadsheet export
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisResult> {
        let start = Instant::now();

        let rows = spreadsheet::read_rows(path)?;
        let result = self.analyze_rows(&rows)?;

        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Dataset analyzed"
        );

        Ok(result)
    }

    /// Rows must include the header row
    pub fn analyze_rows(&self, rows: &[RawRow]) -> Result<AnalysisResult> {
        let records = self.normalizer.normalize(rows)?;
        Ok(self.engine.analyze(&records))
    }
}
