//! Text feature extraction for video descriptions
//! Hashtags, @mentions, emoji counts and character-based truncation
//!
//! Word characters are ASCII `[A-Za-z0-9_]`, so `#美食` is not a hashtag.

use once_cell::sync::Lazy;
use regex::Regex;

static HASHTAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[A-Za-z0-9_]+").unwrap());

static MENTION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[A-Za-z0-9_]+").unwrap());

/// Emoticons, pictographs, transport, regional indicators, misc symbols, dingbats
static EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x1F1E0, 0x1F1FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
];

/// Substrings that mark a mention as an official account
static OFFICIAL_MARKERS: &[&str] = &["official", "douyin"];

/// Mentions shorter than this (including the `@`) count as official
const OFFICIAL_MAX_LEN: usize = 5;

pub struct TextFeatures;

impl TextFeatures {
    /// All hashtags in order of appearance, without the leading `#`
    pub fn hashtags(text: &str) -> Vec<&str> {
        HASHTAG_PATTERN
            .find_iter(text)
            .map(|m| &m.as_str()[1..])
            .collect()
    }

    /// All mention tokens in order of appearance, including the leading `@`
    pub fn mentions(text: &str) -> Vec<&str> {
        MENTION_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Heuristic, not an account check: short handles are assumed to be official
    pub fn is_official_mention(mention: &str) -> bool {
        let lower = mention.to_lowercase();
        OFFICIAL_MARKERS.iter().any(|marker| lower.contains(marker))
            || mention.chars().count() < OFFICIAL_MAX_LEN
    }

    pub fn emoji_count(text: &str) -> usize {
        text.chars().filter(|c| Self::is_emoji(*c)).count()
    }

    fn is_emoji(c: char) -> bool {
        let code = c as u32;
        EMOJI_RANGES
            .iter()
            .any(|&(start, end)| (start..=end).contains(&code))
    }

    /// Length in UTF-16 code units; astral-plane emoji count as 2
    pub fn utf16_len(text: &str) -> usize {
        text.encode_utf16().count()
    }

    /// First `max_chars` characters with `...` always appended
    pub fn preview(text: &str, max_chars: usize) -> String {
        let mut preview: String = text.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashtags_strip_marker() {
        assert_eq!(
            TextFeatures::hashtags("desc #fun and #Fun_2 #"),
            vec!["fun", "Fun_2"]
        );
    }

    #[test]
    fn test_hashtags_ignore_non_ascii_words() {
        assert!(TextFeatures::hashtags("#美食").is_empty());
        assert_eq!(TextFeatures::hashtags("#vlog日常"), vec!["vlog"]);
    }

    #[test]
    fn test_mentions_keep_marker() {
        assert_eq!(
            TextFeatures::mentions("测试@official_acct 内容 @bob"),
            vec!["@official_acct", "@bob"]
        );
    }

    #[test]
    fn test_official_mention_heuristic() {
        assert!(TextFeatures::is_official_mention("@official_acct"));
        assert!(TextFeatures::is_official_mention("@DouYinHelper"));
        assert!(TextFeatures::is_official_mention("@abc"));
        assert!(!TextFeatures::is_official_mention("@alice"));
    }

    #[test]
    fn test_emoji_count() {
        assert_eq!(TextFeatures::emoji_count("plain text"), 0);
        assert_eq!(TextFeatures::emoji_count("好吃😀🚀☀"), 3);
        assert_eq!(TextFeatures::emoji_count("✨✨✨✨"), 4);
    }

    #[test]
    fn test_utf16_len_counts_surrogate_pairs() {
        assert_eq!(TextFeatures::utf16_len("abc"), 3);
        assert_eq!(TextFeatures::utf16_len("字字"), 2);
        assert_eq!(TextFeatures::utf16_len("😀☀"), 3);
    }

    #[test]
    fn test_preview_counts_characters() {
        assert_eq!(TextFeatures::preview("短视频", 50), "短视频...");
        assert_eq!(TextFeatures::preview("abcdef", 3), "abc...");
    }
}
