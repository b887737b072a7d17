// ============================================================
// VIRAL CONTENT FEATURES
// ============================================================
// Classify each description by title length, emoji usage and mention strategy

use crate::domain::video::{
    EmojiUsage, FeatureBucket, MentionStrategy, TitleLengthAnalysis, VideoRecord,
    ViralContentFeatures,
};
use crate::shared::stats::rounded_mean;
use crate::shared::TextFeatures;

const SHORT_TITLE_MAX_UNITS: usize = 15;
const MEDIUM_TITLE_MAX_UNITS: usize = 30;
const LIGHT_EMOJI_MAX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleLength {
    Short,
    Medium,
    Long,
}

impl TitleLength {
    /// Buckets on UTF-16 length, so each astral-plane emoji counts twice
    pub fn classify(description: &str) -> Self {
        match TextFeatures::utf16_len(description) {
            len if len <= SHORT_TITLE_MAX_UNITS => TitleLength::Short,
            len if len <= MEDIUM_TITLE_MAX_UNITS => TitleLength::Medium,
            _ => TitleLength::Long,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiLevel {
    None,
    Light,
    Heavy,
}

impl EmojiLevel {
    pub fn classify(description: &str) -> Self {
        match TextFeatures::emoji_count(description) {
            0 => EmojiLevel::None,
            count if count <= LIGHT_EMOJI_MAX => EmojiLevel::Light,
            _ => EmojiLevel::Heavy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKind {
    None,
    User,
    Official,
}

impl MentionKind {
    pub fn classify(description: &str) -> Self {
        let mentions = TextFeatures::mentions(description);
        if mentions.is_empty() {
            MentionKind::None
        } else if mentions.iter().any(|m| TextFeatures::is_official_mention(m)) {
            MentionKind::Official
        } else {
            MentionKind::User
        }
    }
}

/// Running totals for one bucket
#[derive(Debug, Clone, Copy, Default)]
struct BucketTotals {
    count: usize,
    total_likes: u64,
    total_engagement: u64,
}

impl BucketTotals {
    fn add(&mut self, record: &VideoRecord) {
        self.count += 1;
        self.total_likes = self.total_likes.saturating_add(record.like_count);
        self.total_engagement = self.total_engagement.saturating_add(record.engagement());
    }

    fn finish(&self) -> FeatureBucket {
        FeatureBucket {
            count: self.count,
            avg_likes: rounded_mean(self.total_likes, self.count),
            avg_engagement: rounded_mean(self.total_engagement, self.count),
        }
    }
}

pub struct ViralFeatureClassifier;

impl ViralFeatureClassifier {
    pub fn analyze(records: &[VideoRecord]) -> ViralContentFeatures {
        let mut title = [BucketTotals::default(); 3];
        let mut emoji = [BucketTotals::default(); 3];
        let mut mention = [BucketTotals::default(); 3];

        for record in records {
            let description = record.video_description.as_str();

            title[TitleLength::classify(description) as usize].add(record);
            emoji[EmojiLevel::classify(description) as usize].add(record);
            mention[MentionKind::classify(description) as usize].add(record);
        }

        ViralContentFeatures {
            title_length_analysis: TitleLengthAnalysis {
                short: title[TitleLength::Short as usize].finish(),
                medium: title[TitleLength::Medium as usize].finish(),
                long: title[TitleLength::Long as usize].finish(),
            },
            emoji_usage: EmojiUsage {
                no_emoji: emoji[EmojiLevel::None as usize].finish(),
                with_emoji: emoji[EmojiLevel::Light as usize].finish(),
                high_emoji: emoji[EmojiLevel::Heavy as usize].finish(),
            },
            mention_strategy: MentionStrategy {
                no_mention: mention[MentionKind::None as usize].finish(),
                user_mention: mention[MentionKind::User as usize].finish(),
                official_mention: mention[MentionKind::Official as usize].finish(),
            },
        }
    }
}
