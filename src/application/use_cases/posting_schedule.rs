// ============================================================
// POSTING SCHEDULE ANALYSIS
// ============================================================
// Every date-keyed aggregation: monthly trend, best hours, posting frequency.
// Records whose publish time cannot be resolved are skipped per pass.

use std::collections::BTreeMap;

use super::date_resolver::{hour_label, month_key, week_key, DateResolver};
use crate::domain::video::{
    HourlyEngagement, MonthlyCount, MonthlyTrendPoint, OptimalPostTime, PostingFrequency,
    VideoRecord, WeeklyCount,
};
use crate::shared::stats::{rounded_mean, FirstSeenTally};

#[derive(Debug, Default)]
struct MonthTotals {
    likes: u64,
    comments: u64,
    videos: usize,
}

#[derive(Debug, Default)]
struct HourTotals {
    engagement: u64,
    count: usize,
}

pub struct PostingScheduleAnalyzer<'a> {
    resolver: &'a DateResolver,
}

impl<'a> PostingScheduleAnalyzer<'a> {
    pub fn new(resolver: &'a DateResolver) -> Self {
        Self { resolver }
    }

    /// Likes, comments and video count per calendar month, oldest first
    pub fn monthly_trend(&self, records: &[VideoRecord]) -> Vec<MonthlyTrendPoint> {
        let mut months: BTreeMap<String, MonthTotals> = BTreeMap::new();

        for record in records {
            let Some(at) = self.resolver.resolve_or_skip(record, "monthly_trend") else {
                continue;
            };
            let totals = months.entry(month_key(&at)).or_default();
            totals.likes = totals.likes.saturating_add(record.like_count);
            totals.comments = totals.comments.saturating_add(record.comment_count);
            totals.videos += 1;
        }

        months
            .into_iter()
            .map(|(month, totals)| MonthlyTrendPoint {
                month,
                likes: totals.likes,
                comments: totals.comments,
                videos: totals.videos,
            })
            .collect()
    }

    /// Mean engagement per hour of day, best first
    pub fn optimal_post_time(
        &self,
        records: &[VideoRecord],
        best_hour_count: usize,
    ) -> OptimalPostTime {
        let mut hours: FirstSeenTally<HourTotals> = FirstSeenTally::new();

        for record in records {
            let Some(at) = self.resolver.resolve_or_skip(record, "optimal_post_time") else {
                continue;
            };
            let totals = hours.entry(&hour_label(&at));
            totals.engagement = totals.engagement.saturating_add(record.engagement());
            totals.count += 1;
        }

        let mut hourly_engagement: Vec<HourlyEngagement> = hours
            .into_entries()
            .into_iter()
            .map(|(hour, totals)| HourlyEngagement {
                hour,
                engagement: rounded_mean(totals.engagement, totals.count),
            })
            .collect();
        hourly_engagement.sort_by(|a, b| b.engagement.cmp(&a.engagement));

        let best_hours = hourly_engagement
            .iter()
            .take(best_hour_count)
            .map(|h| h.hour.clone())
            .collect();

        OptimalPostTime {
            best_hours,
            hourly_engagement,
        }
    }

    /// Video counts per month and per week, keys ascending.
    /// Averages divide the full record count by the number of buckets.
    pub fn posting_frequency(&self, records: &[VideoRecord]) -> PostingFrequency {
        let mut monthly: BTreeMap<String, usize> = BTreeMap::new();
        let mut weekly: BTreeMap<String, usize> = BTreeMap::new();

        for record in records {
            let Some(at) = self.resolver.resolve_or_skip(record, "posting_frequency") else {
                continue;
            };
            *monthly.entry(month_key(&at)).or_default() += 1;
            *weekly.entry(week_key(&at)).or_default() += 1;
        }

        let avg_per_month = rounded_mean(records.len() as u64, monthly.len());
        let avg_per_week = rounded_mean(records.len() as u64, weekly.len());

        PostingFrequency {
            monthly: monthly
                .into_iter()
                .map(|(month, count)| MonthlyCount { month, count })
                .collect(),
            weekly: weekly
                .into_iter()
                .map(|(week, count)| WeeklyCount { week, count })
                .collect(),
            avg_per_month,
            avg_per_week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::video::PublishTime;
    use chrono::FixedOffset;

    fn resolver() -> DateResolver {
        DateResolver::new(FixedOffset::east_opt(0).unwrap())
    }

    fn record(publish_time: PublishTime, likes: u64, comments: u64) -> VideoRecord {
        VideoRecord {
            like_count: likes,
            comment_count: comments,
            publish_time,
            ..Default::default()
        }
    }

    fn at(text: &str) -> PublishTime {
        PublishTime::Text(text.to_string())
    }

    #[test]
    fn test_monthly_trend_is_chronological() {
        let records = vec![
            record(at("2024-03-02T08:00:00Z"), 5, 1),
            record(at("2023-12-30T08:00:00Z"), 1, 0),
            record(at("2024-03-20T08:00:00Z"), 7, 2),
            record(PublishTime::Serial(45000.0), 4, 4),
        ];

        let resolver = resolver();
        let trend = PostingScheduleAnalyzer::new(&resolver).monthly_trend(&records);

        let months: Vec<&str> = trend.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["2023-03", "2023-12", "2024-03"]);
        assert_eq!(trend[2].likes, 12);
        assert_eq!(trend[2].comments, 3);
        assert_eq!(trend[2].videos, 2);
    }

    #[test]
    fn test_unresolvable_dates_are_skipped() {
        let records = vec![
            record(at("2024-01-01T08:00:00Z"), 1, 0),
            record(at("not a date"), 100, 0),
        ];

        let resolver = resolver();
        let analyzer = PostingScheduleAnalyzer::new(&resolver);

        let trend = analyzer.monthly_trend(&records);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].likes, 1);

        let frequency = analyzer.posting_frequency(&records);
        assert_eq!(frequency.monthly.len(), 1);
        // Both records count towards the average
        assert_eq!(frequency.avg_per_month, 2);
    }

    #[test]
    fn test_optimal_post_time_ranks_hours() {
        let records = vec![
            record(at("2024-01-01T08:15:00Z"), 10, 0),
            record(at("2024-01-02T08:45:00Z"), 20, 0),
            record(at("2024-01-03T20:00:00Z"), 100, 0),
            record(at("2024-01-04T12:00:00Z"), 1, 0),
            record(at("2024-01-05T23:00:00Z"), 0, 0),
        ];

        let resolver = resolver();
        let optimal = PostingScheduleAnalyzer::new(&resolver).optimal_post_time(&records, 3);

        assert_eq!(optimal.best_hours, vec!["20:00", "08:00", "12:00"]);
        assert_eq!(optimal.hourly_engagement.len(), 4);
        assert_eq!(optimal.hourly_engagement[1].engagement, 15);
    }

    #[test]
    fn test_posting_frequency_averages() {
        let records = vec![
            record(at("2024-01-01T08:00:00Z"), 0, 0),
            record(at("2024-01-02T08:00:00Z"), 0, 0),
            record(at("2024-01-09T08:00:00Z"), 0, 0),
            record(at("2024-02-01T08:00:00Z"), 0, 0),
        ];

        let resolver = resolver();
        let frequency = PostingScheduleAnalyzer::new(&resolver).posting_frequency(&records);

        assert_eq!(frequency.monthly.len(), 2);
        assert_eq!(frequency.monthly[0].count, 3);
        assert_eq!(frequency.weekly.len(), 3);
        assert_eq!(frequency.weekly[0].week, "2024-01");
        assert_eq!(frequency.avg_per_month, 2);
        assert_eq!(frequency.avg_per_week, 1);
    }

    #[test]
    fn test_week_buckets_keep_calendar_year() {
        let records = vec![
            record(at("2024-01-02T08:00:00Z"), 0, 0),
            record(at("2024-12-31T08:00:00Z"), 0, 0),
        ];

        let resolver = resolver();
        let frequency = PostingScheduleAnalyzer::new(&resolver).posting_frequency(&records);

        // 2024-12-31 sits in the week holding 1 January 2025, still keyed under 2024
        assert_eq!(frequency.monthly.len(), 2);
        assert_eq!(frequency.weekly.len(), 1);
        assert_eq!(frequency.weekly[0].week, "2024-01");
        assert_eq!(frequency.weekly[0].count, 2);
        assert_eq!(frequency.avg_per_week, 2);
    }

    #[test]
    fn test_no_dates_gives_zero_averages() {
        let records = vec![record(at("??"), 1, 1)];
        let resolver = resolver();
        let frequency = PostingScheduleAnalyzer::new(&resolver).posting_frequency(&records);
        assert_eq!(frequency.avg_per_month, 0);
        assert_eq!(frequency.avg_per_week, 0);
    }
}
