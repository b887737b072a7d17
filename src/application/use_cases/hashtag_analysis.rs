// ============================================================
// HASHTAG ANALYSIS
// ============================================================

use crate::domain::video::{HashtagStat, VideoRecord};
use crate::shared::stats::{rounded_mean, FirstSeenTally};
use crate::shared::TextFeatures;

#[derive(Debug, Default)]
struct TagTotals {
    count: usize,
    total_likes: u64,
}

pub struct HashtagAnalyzer {
    limit: usize,
}

impl HashtagAnalyzer {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Most frequent tags, count descending; ties keep first-seen order.
    /// A tag used twice in one description counts twice.
    pub fn top_hashtags(&self, records: &[VideoRecord]) -> Vec<HashtagStat> {
        let mut tally: FirstSeenTally<TagTotals> = FirstSeenTally::new();

        for record in records {
            for tag in TextFeatures::hashtags(&record.video_description) {
                let totals = tally.entry(tag);
                totals.count += 1;
                totals.total_likes = totals.total_likes.saturating_add(record.like_count);
            }
        }

        let mut stats: Vec<HashtagStat> = tally
            .into_entries()
            .into_iter()
            .map(|(tag, totals)| HashtagStat {
                tag,
                count: totals.count,
                avg_likes: rounded_mean(totals.total_likes, totals.count),
            })
            .collect();

        stats.sort_by(|a, b| b.count.cmp(&a.count));
        stats.truncate(self.limit);
        stats
    }
}
