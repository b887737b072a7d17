// ============================================================
// ANALYTICS ENGINE
// ============================================================
// One pure pass from video records to an immutable AnalysisResult

use std::collections::BTreeMap;
use std::time::Instant;

use super::content_features::ViralFeatureClassifier;
use super::date_resolver::DateResolver;
use super::hashtag_analysis::HashtagAnalyzer;
use super::keyword_cloud::KeywordCloud;
use super::pareto_analysis::ParetoAnalyzer;
use super::posting_schedule::PostingScheduleAnalyzer;
use crate::domain::video::{
    AnalysisResult, AnalyzerConfig, ContentPerformance, EngagementRates, FanEngagement,
    MetricTotals, VideoRecord,
};
use crate::shared::stats::{round_to_u64, rounded_mean, safe_ratio};
use crate::shared::TextFeatures;

const MAX_ENGAGEMENT_SCORE: f64 = 100.0;
const HIGH_POTENTIAL_SCORE: f64 = 50.0;
const MEDIUM_POTENTIAL_SCORE: f64 = 20.0;

pub struct AnalyticsEngine {
    config: AnalyzerConfig,
    resolver: DateResolver,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyzerConfig) -> Self {
        let resolver = DateResolver::new(config.reporting_offset());
        Self { config, resolver }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run every aggregation over `records`; the slice is never reordered
    pub fn analyze(&self, records: &[VideoRecord]) -> AnalysisResult {
        let start = Instant::now();
        tracing::info!(records = records.len(), "Starting analysis");

        let total_videos = records.len();
        let total_fans = records.first().map(|r| r.fans_count).unwrap_or(0);
        let totals = MetricTotals::from_records(records);

        // Rates are per fan per video
        let audience = total_fans as f64 * total_videos as f64;
        let rate = |metric: u64| safe_ratio(metric as f64, audience) * 100.0;
        let avg_engagement_rate = rate(totals.engagement());

        let schedule = PostingScheduleAnalyzer::new(&self.resolver);

        let result = AnalysisResult {
            total_videos,
            total_fans,
            total_likes: totals.likes,
            total_collects: totals.collects,
            total_comments: totals.comments,
            total_shares: totals.shares,
            avg_engagement_rate,
            most_popular_video: most_popular(records).cloned(),
            engagement_rates: EngagementRates {
                like_rate: rate(totals.likes),
                comment_rate: rate(totals.comments),
                share_rate: rate(totals.shares),
                collect_rate: rate(totals.collects),
            },
            top_hashtags: HashtagAnalyzer::new(self.config.top_hashtag_limit).top_hashtags(records),
            optimal_post_time: schedule.optimal_post_time(records, self.config.best_hour_count),
            fan_engagement: fan_engagement(totals.engagement(), total_fans, avg_engagement_rate),
            content_performance: self.content_performance(records, &totals),
            viral_content_features: ViralFeatureClassifier::analyze(records),
            monthly_trend: schedule.monthly_trend(records),
            media_type_distribution: media_type_distribution(records),
            posting_frequency: schedule.posting_frequency(records),
            pareto_analysis: ParetoAnalyzer::new(
                self.config.pareto_ratio,
                self.config.viral_tier_ratio,
                self.config.quality_tier_ratio,
            )
            .analyze(records, &totals),
            keyword_cloud: KeywordCloud::new(self.config.keyword_limit).keywords(records),
        };

        tracing::info!(
            records = total_videos,
            hashtags = result.top_hashtags.len(),
            months = result.monthly_trend.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        result
    }

    fn content_performance(
        &self,
        records: &[VideoRecord],
        totals: &MetricTotals,
    ) -> ContentPerformance {
        let mut by_likes: Vec<&VideoRecord> = records.iter().collect();
        by_likes.sort_by(|a, b| b.like_count.cmp(&a.like_count));

        ContentPerformance {
            avg_likes_per_video: rounded_mean(totals.likes, records.len()),
            avg_comments_per_video: rounded_mean(totals.comments, records.len()),
            avg_shares_per_video: rounded_mean(totals.shares, records.len()),
            top_performing_content: by_likes
                .iter()
                .take(self.config.top_content_limit)
                .map(|r| {
                    TextFeatures::preview(&r.video_description, self.config.description_preview_chars)
                })
                .collect(),
        }
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// First record holding the maximum like count
fn most_popular(records: &[VideoRecord]) -> Option<&VideoRecord> {
    records.iter().fold(None, |best: Option<&VideoRecord>, record| match best {
        Some(current) if record.like_count <= current.like_count => Some(current),
        _ => Some(record),
    })
}

/// Tiers compare the unrounded score; only the reported score is rounded
fn fan_engagement(total_engagements: u64, total_fans: u64, avg_rate: f64) -> FanEngagement {
    let raw_score = (avg_rate * 10.0).min(MAX_ENGAGEMENT_SCORE);
    let viral_potential = if raw_score > HIGH_POTENTIAL_SCORE {
        "高"
    } else if raw_score > MEDIUM_POTENTIAL_SCORE {
        "中"
    } else {
        "低"
    };

    FanEngagement {
        active_fans: total_engagements.min(total_fans),
        engagement_score: round_to_u64(raw_score) as u32,
        viral_potential: viral_potential.to_string(),
    }
}

fn media_type_distribution(records: &[VideoRecord]) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for record in records {
        *distribution.entry(record.media_type.clone()).or_insert(0) += 1;
    }
    distribution
}
