// ============================================================
// PARETO / TIER ANALYSIS
// ============================================================
// 80/20 contribution of the most liked videos and the three-tier Sankey flow

use crate::domain::video::{
    MetricPercentages, MetricTotals, ParetoAnalysis, SankeyData, SankeyLink, SankeyNode,
    TierCounts, TopVideos, VideoRecord,
};
use crate::shared::stats::{ceil_share, percentage};

/// Node labels, in index order: root, three tiers, four metrics
static SANKEY_NODES: [&str; 8] = [
    "全部视频", "爆款视频", "优质视频", "普通视频", "点赞", "收藏", "评论", "分享",
];

const ROOT_NODE: usize = 0;
const TIER_NODES: [usize; 3] = [1, 2, 3];
const LIKES_NODE: usize = 4;
const COLLECTS_NODE: usize = 5;
const COMMENTS_NODE: usize = 6;
const SHARES_NODE: usize = 7;

pub struct ParetoAnalyzer {
    pareto_ratio: f64,
    viral_tier_ratio: f64,
    quality_tier_ratio: f64,
}

impl ParetoAnalyzer {
    pub fn new(pareto_ratio: f64, viral_tier_ratio: f64, quality_tier_ratio: f64) -> Self {
        Self {
            pareto_ratio,
            viral_tier_ratio,
            quality_tier_ratio,
        }
    }

    pub fn analyze(&self, records: &[VideoRecord], dataset: &MetricTotals) -> ParetoAnalysis {
        let (tier_counts, sankey_data) = self.tiers(records);
        ParetoAnalysis {
            top20_videos: self.top_videos(records, dataset),
            tier_counts,
            sankey_data,
        }
    }

    /// Head of a like-ranked copy and its share of each dataset total
    fn top_videos(&self, records: &[VideoRecord], dataset: &MetricTotals) -> TopVideos {
        let mut by_likes: Vec<&VideoRecord> = records.iter().collect();
        by_likes.sort_by(|a, b| b.like_count.cmp(&a.like_count));
        by_likes.truncate(ceil_share(records.len(), self.pareto_ratio));

        let head = MetricTotals::from_records(by_likes.iter().copied());

        TopVideos {
            videos: by_likes.into_iter().cloned().collect(),
            total_likes: head.likes,
            total_collects: head.collects,
            total_comments: head.comments,
            total_shares: head.shares,
            percentage: MetricPercentages {
                likes: percentage(head.likes, dataset.likes),
                collects: percentage(head.collects, dataset.collects),
                comments: percentage(head.comments, dataset.comments),
                shares: percentage(head.shares, dataset.shares),
            },
        }
    }

    /// viral = top ceil(N x 0.1) by engagement, quality = next ceil(N x 0.2), normal = rest
    fn tiers(&self, records: &[VideoRecord]) -> (TierCounts, SankeyData) {
        let mut by_engagement: Vec<&VideoRecord> = records.iter().collect();
        by_engagement.sort_by(|a, b| b.engagement().cmp(&a.engagement()));

        let total = by_engagement.len();
        let viral = ceil_share(total, self.viral_tier_ratio);
        let quality = ceil_share(total, self.quality_tier_ratio).min(total - viral);

        let (viral_videos, rest) = by_engagement.split_at(viral);
        let (quality_videos, normal_videos) = rest.split_at(quality);

        let tiers = [viral_videos, quality_videos, normal_videos];
        let counts = TierCounts {
            viral: viral_videos.len(),
            quality: quality_videos.len(),
            normal: normal_videos.len(),
        };

        (counts, build_sankey(&tiers))
    }
}

fn build_sankey(tiers: &[&[&VideoRecord]; 3]) -> SankeyData {
    let mut links = Vec::with_capacity(15);

    for (tier, node) in tiers.iter().zip(TIER_NODES) {
        links.push(SankeyLink {
            source: ROOT_NODE,
            target: node,
            value: tier.len() as u64,
        });
    }

    for (tier, node) in tiers.iter().zip(TIER_NODES) {
        let totals = MetricTotals::from_records(tier.iter().copied());
        for (target, value) in [
            (LIKES_NODE, totals.likes),
            (COLLECTS_NODE, totals.collects),
            (COMMENTS_NODE, totals.comments),
            (SHARES_NODE, totals.shares),
        ] {
            links.push(SankeyLink {
                source: node,
                target,
                value,
            });
        }
    }

    // Zero-weight edges cannot be drawn
    links.retain(|link| link.value > 0);

    SankeyData {
        nodes: SANKEY_NODES
            .iter()
            .map(|name| SankeyNode {
                name: name.to_string(),
            })
            .collect(),
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, likes: u64, comments: u64) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            like_count: likes,
            comment_count: comments,
            ..Default::default()
        }
    }

    fn analyzer() -> ParetoAnalyzer {
        ParetoAnalyzer::new(0.2, 0.1, 0.2)
    }

    #[test]
    fn test_top_twenty_percent_by_likes() {
        let records: Vec<VideoRecord> = (0..10).map(|i| record(&format!("v{}", i), i, 0)).collect();
        let dataset = MetricTotals::from_records(&records);

        let pareto = analyzer().analyze(&records, &dataset);
        let top = &pareto.top20_videos;

        let likes: Vec<u64> = top.videos.iter().map(|v| v.like_count).collect();
        assert_eq!(likes, vec![9, 8]);
        assert_eq!(top.total_likes, 17);
        assert!((top.percentage.likes - 17.0 / 45.0 * 100.0).abs() < 1e-9);
        // Dataset has no comments at all
        assert_eq!(top.percentage.comments, 0.0);
    }

    #[test]
    fn test_input_order_is_untouched() {
        let records: Vec<VideoRecord> = (0..5).map(|i| record(&format!("v{}", i), i, 0)).collect();
        let dataset = MetricTotals::from_records(&records);
        analyzer().analyze(&records, &dataset);

        let ids: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["v0", "v1", "v2", "v3", "v4"]);
    }

    #[test]
    fn test_tier_counts_cover_every_video() {
        for n in [1usize, 2, 3, 7, 10, 23] {
            let records: Vec<VideoRecord> =
                (0..n).map(|i| record("v", i as u64, 1)).collect();
            let dataset = MetricTotals::from_records(&records);
            let pareto = analyzer().analyze(&records, &dataset);
            assert_eq!(pareto.tier_counts.total(), n);
        }
    }

    #[test]
    fn test_tier_split_for_ten_videos() {
        let records: Vec<VideoRecord> = (0..10).map(|i| record("v", i, 0)).collect();
        let dataset = MetricTotals::from_records(&records);
        let pareto = analyzer().analyze(&records, &dataset);

        assert_eq!(
            pareto.tier_counts,
            TierCounts {
                viral: 1,
                quality: 2,
                normal: 7,
            }
        );
        let viral_likes = pareto
            .sankey_data
            .links
            .iter()
            .find(|l| l.source == 1 && l.target == LIKES_NODE)
            .map(|l| l.value);
        assert_eq!(viral_likes, Some(9));
    }

    #[test]
    fn test_sankey_omits_zero_edges() {
        // Single video: quality and normal tiers are empty, no collects or shares
        let records = vec![record("v", 10, 2)];
        let dataset = MetricTotals::from_records(&records);
        let sankey = analyzer().analyze(&records, &dataset).sankey_data;

        assert_eq!(sankey.nodes.len(), 8);
        assert_eq!(sankey.nodes[0].name, "全部视频");
        assert!(sankey.links.iter().all(|l| l.value > 0));
        assert_eq!(
            sankey.links,
            vec![
                SankeyLink {
                    source: 0,
                    target: 1,
                    value: 1,
                },
                SankeyLink {
                    source: 1,
                    target: 4,
                    value: 10,
                },
                SankeyLink {
                    source: 1,
                    target: 6,
                    value: 2,
                },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let pareto = analyzer().analyze(&[], &MetricTotals::default());
        assert!(pareto.top20_videos.videos.is_empty());
        assert_eq!(pareto.tier_counts.total(), 0);
        assert!(pareto.sankey_data.links.is_empty());
    }
}
