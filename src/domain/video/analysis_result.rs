// ============================================================
// ANALYSIS RESULT
// ============================================================
// Immutable output of one analytics run

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::VideoRecord;

/// Per-metric engagement rate, in percent of fans x videos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRates {
    pub like_rate: f64,
    pub comment_rate: f64,
    pub share_rate: f64,
    pub collect_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagStat {
    /// Tag text without the leading `#`
    pub tag: String,
    pub count: usize,
    pub avg_likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyEngagement {
    /// `HH:00` label in the reporting time zone
    pub hour: String,
    /// Rounded mean engagement of videos published in this hour
    pub engagement: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalPostTime {
    pub best_hours: Vec<String>,
    /// Sorted by mean engagement, descending
    pub hourly_engagement: Vec<HourlyEngagement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanEngagement {
    pub active_fans: u64,
    /// 0..=100
    pub engagement_score: u32,
    /// 高 / 中 / 低
    pub viral_potential: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPerformance {
    pub avg_likes_per_video: u64,
    pub avg_comments_per_video: u64,
    pub avg_shares_per_video: u64,
    /// Truncated descriptions of the most liked videos
    pub top_performing_content: Vec<String>,
}

/// Aggregate for one classification bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureBucket {
    pub count: usize,
    pub avg_likes: u64,
    pub avg_engagement: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleLengthAnalysis {
    pub short: FeatureBucket,
    pub medium: FeatureBucket,
    pub long: FeatureBucket,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiUsage {
    pub no_emoji: FeatureBucket,
    pub with_emoji: FeatureBucket,
    pub high_emoji: FeatureBucket,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionStrategy {
    pub no_mention: FeatureBucket,
    pub user_mention: FeatureBucket,
    pub official_mention: FeatureBucket,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViralContentFeatures {
    pub title_length_analysis: TitleLengthAnalysis,
    pub emoji_usage: EmojiUsage,
    pub mention_strategy: MentionStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    /// `YYYY-MM`
    pub month: String,
    pub likes: u64,
    pub comments: u64,
    pub videos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCount {
    /// `YYYY-ww`
    pub week: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingFrequency {
    pub monthly: Vec<MonthlyCount>,
    pub weekly: Vec<WeeklyCount>,
    pub avg_per_month: u64,
    pub avg_per_week: u64,
}

/// Summed interaction metrics over a group of videos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTotals {
    pub likes: u64,
    pub collects: u64,
    pub comments: u64,
    pub shares: u64,
}

impl MetricTotals {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a VideoRecord>) -> Self {
        records.into_iter().fold(Self::default(), |acc, record| Self {
            likes: acc.likes.saturating_add(record.like_count),
            collects: acc.collects.saturating_add(record.collect_count),
            comments: acc.comments.saturating_add(record.comment_count),
            shares: acc.shares.saturating_add(record.share_count),
        })
    }

    pub fn engagement(&self) -> u64 {
        self.likes
            .saturating_add(self.collects)
            .saturating_add(self.comments)
            .saturating_add(self.shares)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricPercentages {
    pub likes: f64,
    pub collects: f64,
    pub comments: f64,
    pub shares: f64,
}

/// Pareto head: the most liked videos and their share of every metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopVideos {
    pub videos: Vec<VideoRecord>,
    pub total_likes: u64,
    pub total_collects: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub percentage: MetricPercentages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub name: String,
}

/// Directed, weighted edge between two node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyData {
    pub nodes: Vec<SankeyNode>,
    /// Never contains a zero-weight edge
    pub links: Vec<SankeyLink>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub viral: usize,
    pub quality: usize,
    pub normal: usize,
}

impl TierCounts {
    pub fn total(&self) -> usize {
        self.viral + self.quality + self.normal
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoAnalysis {
    pub top20_videos: TopVideos,
    pub tier_counts: TierCounts,
    pub sankey_data: SankeyData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub text: String,
    pub value: usize,
}

/// Full analytics output for one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_videos: usize,
    pub total_fans: u64,
    pub total_likes: u64,
    pub total_collects: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub avg_engagement_rate: f64,
    pub most_popular_video: Option<VideoRecord>,
    pub engagement_rates: EngagementRates,
    pub top_hashtags: Vec<HashtagStat>,
    pub optimal_post_time: OptimalPostTime,
    pub fan_engagement: FanEngagement,
    pub content_performance: ContentPerformance,
    pub viral_content_features: ViralContentFeatures,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    /// Keyed by media type, ordered by key
    pub media_type_distribution: BTreeMap<String, usize>,
    pub posting_frequency: PostingFrequency,
    pub pareto_analysis: ParetoAnalysis,
    pub keyword_cloud: Vec<KeywordCount>,
}

impl AnalysisResult {
    pub fn total_engagements(&self) -> u64 {
        self.total_likes
            .saturating_add(self.total_collects)
            .saturating_add(self.total_comments)
            .saturating_add(self.total_shares)
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        let hashtags = self
            .top_hashtags
            .iter()
            .take(5)
            .map(|h| format!("#{} ({})", h.tag, h.count))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Creator Analysis ({} videos, {} fans):\n\
             - Likes: {} | Collects: {} | Comments: {} | Shares: {}\n\
             - Avg engagement rate: {:.2}%\n\
             - Engagement score: {} ({})\n\
             - Best hours: {}\n\
             - Top hashtags: {}\n\
             - Top 20% share of likes: {:.1}%",
            self.total_videos,
            self.total_fans,
            self.total_likes,
            self.total_collects,
            self.total_comments,
            self.total_shares,
            self.avg_engagement_rate,
            self.fan_engagement.engagement_score,
            self.fan_engagement.viral_potential,
            if self.optimal_post_time.best_hours.is_empty() {
                "-".to_string()
            } else {
                self.optimal_post_time.best_hours.join(", ")
            },
            if hashtags.is_empty() { "-".to_string() } else { hashtags },
            self.pareto_analysis.top20_videos.percentage.likes,
        )
    }
}
