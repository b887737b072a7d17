use std::io::Write;
use std::path::PathBuf;

use crate::domain::error::Result;
use crate::domain::video::AnalysisResult;

/// Writes an AnalysisResult as JSON to a file or stdout
pub struct ReportWriter {
    output: Option<PathBuf>,
    pretty: bool,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self {
            output: None,
            pretty: true,
        }
    }
}

impl ReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write to `path` instead of stdout
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Pretty-print (default) or emit single-line JSON
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn render(&self, result: &AnalysisResult) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(json)
    }

    pub fn write(&self, result: &AnalysisResult) -> Result<()> {
        let json = self.render(result)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, json + "\n")?;
                tracing::info!(path = %path.display(), "Report written");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", json)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AnalyticsEngine;

    fn empty_result() -> AnalysisResult {
        AnalyticsEngine::default().analyze(&[])
    }

    #[test]
    fn test_compact_render_is_single_line() {
        let json = ReportWriter::new()
            .with_pretty(false)
            .render(&empty_result())
            .unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"totalVideos\":0"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        ReportWriter::new()
            .with_output(&path)
            .write(&empty_result())
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["totalVideos"], 0);
        assert!(value["paretoAnalysis"]["sankeyData"].is_object());
    }
}
