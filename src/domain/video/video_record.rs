// ============================================================
// VIDEO RECORD
// ============================================================
// One analyzed video plus the creator context duplicated per row

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw publish time exactly as it came out of the spreadsheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublishTime {
    /// Spreadsheet serial day count (1899-12-30 epoch)
    Serial(f64),

    /// ISO-8601 date or date-time text
    Text(String),
}

impl Default for PublishTime {
    fn default() -> Self {
        PublishTime::Text(String::new())
    }
}

impl fmt::Display for PublishTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishTime::Serial(days) => write!(f, "{}", days),
            PublishTime::Text(text) => write!(f, "{}", text),
        }
    }
}

/// A single video row after normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(rename = "creatorUID")]
    pub creator_uid: String,
    pub douyin_number: String,
    pub creator_name: String,
    pub creator_link: String,

    /// Creator follower count; only the first record's value is used
    pub fans_count: u64,
    pub creator_bio: String,

    #[serde(rename = "videoID")]
    pub video_id: String,
    pub video_link: String,
    pub media_type: String,

    /// Free text; may carry #hashtags, @mentions and emoji
    pub video_description: String,

    pub like_count: u64,
    pub collect_count: u64,
    pub comment_count: u64,
    pub share_count: u64,

    pub publish_time: PublishTime,
}

impl VideoRecord {
    /// Combined interactions: likes + comments + shares + collects
    pub fn engagement(&self) -> u64 {
        self.like_count
            .saturating_add(self.comment_count)
            .saturating_add(self.share_count)
            .saturating_add(self.collect_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_sums_all_metrics() {
        let record = VideoRecord {
            like_count: 10,
            collect_count: 2,
            comment_count: 1,
            share_count: 4,
            ..Default::default()
        };
        assert_eq!(record.engagement(), 17);
    }

    #[test]
    fn test_serialized_field_names() {
        let record = VideoRecord {
            creator_uid: "u1".to_string(),
            video_id: "v1".to_string(),
            publish_time: PublishTime::Serial(45000.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["creatorUID"], "u1");
        assert_eq!(json["videoID"], "v1");
        assert_eq!(json["likeCount"], 0);
        assert_eq!(json["publishTime"], 45000.0);
    }
}
