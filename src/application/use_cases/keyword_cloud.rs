// ============================================================
// KEYWORD CLOUD
// ============================================================
// Word frequencies across all descriptions, with lightweight Chinese segmentation

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::domain::video::{KeywordCount, VideoRecord};
use crate::shared::stats::FirstSeenTally;

/// Anything that is not a CJK ideograph or ASCII alphanumeric
static NON_WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x{4e00}-\x{9fa5}a-zA-Z0-9]").unwrap());

/// Token patterns, applied in order over the cleaned text
static TOKEN_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"[\x{4e00}-\x{9fa5}]{2,4}").unwrap(),
        Regex::new(r"[a-zA-Z]{2,}").unwrap(),
        Regex::new(r"[0-9]{2,}").unwrap(),
        Regex::new(r"[\x{4e00}-\x{9fa5}]+[a-zA-Z0-9]+|[a-zA-Z0-9]+[\x{4e00}-\x{9fa5}]+").unwrap(),
    ]
});

static ANY_TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\x{4e00}-\x{9fa5}]{2,4}|[a-zA-Z]{2,}|[0-9]{2,}|[\x{4e00}-\x{9fa5}]+[a-zA-Z0-9]+|[a-zA-Z0-9]+[\x{4e00}-\x{9fa5}]+",
    )
    .unwrap()
});

static RESIDUAL_CJK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{4e00}-\x{9fa5}]{2,}").unwrap());

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
        "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这", "我们",
        "他", "来", "个", "那", "能", "对", "现在", "已经", "可以", "就是", "这个", "那个", "真的",
        "特别", "非常", "感觉", "觉得", "因为", "所以", "但是", "然后", "其实", "可能", "应该",
        "还是", "不是", "如果", "那么", "这样", "那样", "什么", "怎么", "为什么", "怎么样",
        "怎么办", "如何", "时候", "地方",
    ]
    .into_iter()
    .collect()
});

pub struct KeywordCloud {
    limit: usize,
}

impl KeywordCloud {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Most frequent keywords, count descending; ties keep first-seen order
    pub fn keywords(&self, records: &[VideoRecord]) -> Vec<KeywordCount> {
        let text = records
            .iter()
            .map(|r| r.video_description.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let mut tally: FirstSeenTally<usize> = FirstSeenTally::new();
        for token in segment(&text) {
            let word = token.to_lowercase();
            if word.chars().count() > 1 && !STOP_WORDS.contains(word.as_str()) {
                *tally.entry(&word) += 1;
            }
        }

        let mut keywords: Vec<KeywordCount> = tally
            .into_entries()
            .into_iter()
            .map(|(text, value)| KeywordCount { text, value })
            .collect();
        keywords.sort_by(|a, b| b.value.cmp(&a.value));
        keywords.truncate(self.limit);
        keywords
    }
}

/// Pattern tokens first, then 2/3-char sliding windows over CJK runs no pattern consumed.
/// Tokens may overlap; a word can be counted by more than one pattern.
pub fn segment(text: &str) -> Vec<String> {
    let clean = NON_WORD_PATTERN.replace_all(text, " ");

    let mut tokens: Vec<String> = TOKEN_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(&clean).map(|m| m.as_str().to_string()))
        .collect();

    let remaining = ANY_TOKEN_PATTERN.replace_all(&clean, " ");
    for run in RESIDUAL_CJK_PATTERN.find_iter(&remaining) {
        let chars: Vec<char> = run.as_str().chars().collect();
        for start in 0..chars.len().saturating_sub(1) {
            tokens.push(chars[start..start + 2].iter().collect());
            if start + 3 <= chars.len() {
                tokens.push(chars[start..start + 3].iter().collect());
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(description: &str) -> VideoRecord {
        VideoRecord {
            video_description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_segment_patterns() {
        let tokens = segment("美食探店 vlog 2024 a 1");
        assert!(tokens.contains(&"美食探店".to_string()));
        assert!(tokens.contains(&"vlog".to_string()));
        assert!(tokens.contains(&"2024".to_string()));
        assert!(!tokens.contains(&"a".to_string()));
        assert!(!tokens.contains(&"1".to_string()));
    }

    #[test]
    fn test_segment_mixed_tokens() {
        let tokens = segment("打卡abc");
        assert!(tokens.contains(&"打卡".to_string()));
        assert!(tokens.contains(&"abc".to_string()));
        assert!(tokens.contains(&"打卡abc".to_string()));
    }

    #[test]
    fn test_keywords_count_and_filter() {
        let records = vec![
            record("Vlog 日常 #vlog"),
            record("vlog 真的 日常"),
            record("测试 @someone"),
        ];

        let keywords = KeywordCloud::new(50).keywords(&records);
        assert_eq!(keywords[0].text, "vlog");
        assert_eq!(keywords[0].value, 3);
        assert_eq!(keywords[1].text, "日常");
        assert_eq!(keywords[1].value, 2);
        assert!(keywords.iter().all(|k| k.text != "真的"));
    }

    #[test]
    fn test_keyword_limit() {
        let description = (0..30)
            .map(|i| format!("w{}x", i))
            .collect::<Vec<_>>()
            .join(" ");
        let keywords = KeywordCloud::new(5).keywords(&[record(&description)]);
        assert_eq!(keywords.len(), 5);
    }
}
