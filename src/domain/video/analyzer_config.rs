// ============================================================
// ANALYZER CONFIGURATION
// ============================================================
// Tunables for the analytics engine

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for the analytics engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Offset of the reporting time zone from UTC, in minutes (default: 480, China Standard Time).
    /// Hour-of-day, month and week buckets are computed in this zone.
    pub utc_offset_minutes: i32,

    /// Number of hashtags reported (default: 10)
    pub top_hashtag_limit: usize,

    /// Number of best posting hours reported (default: 3)
    pub best_hour_count: usize,

    /// Number of top-performing descriptions reported (default: 5)
    pub top_content_limit: usize,

    /// Characters kept from each top-performing description (default: 50)
    pub description_preview_chars: usize,

    /// Share of videos in the Pareto head, ranked by likes (default: 0.2)
    pub pareto_ratio: f64,

    /// Share of videos in the viral tier, ranked by engagement (default: 0.1)
    pub viral_tier_ratio: f64,

    /// Share of videos in the quality tier, after the viral tier (default: 0.2)
    pub quality_tier_ratio: f64,

    /// Number of keywords kept for the keyword cloud (default: 50)
    pub keyword_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 8 * 60,
            top_hashtag_limit: 10,
            best_hour_count: 3,
            top_content_limit: 5,
            description_preview_chars: 50,
            pareto_ratio: 0.2,
            viral_tier_ratio: 0.1,
            quality_tier_ratio: 0.2,
            keyword_limit: 50,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same defaults, bucketing dates in UTC
    pub fn utc() -> Self {
        Self {
            utc_offset_minutes: 0,
            ..Default::default()
        }
    }

    /// Reporting time zone as a chrono offset
    pub fn reporting_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err("utc_offset_minutes must be within +/-840".to_string());
        }
        if self.top_hashtag_limit == 0 {
            return Err("top_hashtag_limit must be > 0".to_string());
        }
        if self.best_hour_count == 0 {
            return Err("best_hour_count must be > 0".to_string());
        }
        if self.top_content_limit == 0 {
            return Err("top_content_limit must be > 0".to_string());
        }
        if self.keyword_limit == 0 {
            return Err("keyword_limit must be > 0".to_string());
        }
        for (name, ratio) in [
            ("pareto_ratio", self.pareto_ratio),
            ("viral_tier_ratio", self.viral_tier_ratio),
            ("quality_tier_ratio", self.quality_tier_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(format!("{} must be in (0.0, 1.0]", name));
            }
        }
        Ok(())
    }
}
