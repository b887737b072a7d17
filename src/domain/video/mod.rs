// ============================================================
// VIDEO DOMAIN LAYER
// ============================================================
// Core types and value objects for creator video analytics
// No I/O, no external state

mod analysis_result;
mod analyzer_config;
mod cell_value;
mod video_record;

pub use analysis_result::{
    AnalysisResult, ContentPerformance, EmojiUsage, EngagementRates, FanEngagement, FeatureBucket,
    HashtagStat, HourlyEngagement, KeywordCount, MentionStrategy, MetricPercentages, MetricTotals,
    MonthlyCount, MonthlyTrendPoint, OptimalPostTime, ParetoAnalysis, PostingFrequency, SankeyData,
    SankeyLink, SankeyNode, TierCounts, TitleLengthAnalysis, TopVideos, ViralContentFeatures,
    WeeklyCount,
};
pub use analyzer_config::AnalyzerConfig;
pub use cell_value::CellValue;
pub use video_record::{PublishTime, VideoRecord};

/// One decoded spreadsheet row: positional, loosely-typed cells.
pub type RawRow = Vec<CellValue>;
