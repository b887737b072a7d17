//! Numeric helpers shared by every aggregation pass.
//! Zero denominators always give 0, never NaN or infinity.

use std::collections::HashMap;

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0
pub fn percentage(part: u64, whole: u64) -> f64 {
    safe_ratio(part as f64, whole as f64) * 100.0
}

/// Mean rounded half up, or 0 for an empty group
pub fn rounded_mean(total: u64, count: usize) -> u64 {
    round_to_u64(safe_ratio(total as f64, count as f64))
}

/// Half-up rounding for non-negative values; negatives clamp to 0
pub fn round_to_u64(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value + 0.5).floor() as u64
    } else {
        0
    }
}

/// `ceil(len * ratio)`, capped at `len`
pub fn ceil_share(len: usize, ratio: f64) -> usize {
    let share = (len as f64 * ratio).ceil();
    if share.is_finite() && share > 0.0 {
        (share as usize).min(len)
    } else {
        0
    }
}

/// String-keyed accumulator that remembers first-seen order
#[derive(Debug)]
pub struct FirstSeenTally<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> FirstSeenTally<V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn entry(&mut self, key: &str) -> &mut V {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V: Default> Default for FirstSeenTally<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominator_gives_zero() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(rounded_mean(10, 0), 0);
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(rounded_mean(5, 2), 3);
        assert_eq!(rounded_mean(7, 3), 2);
        assert_eq!(round_to_u64(0.49), 0);
        assert_eq!(round_to_u64(-3.0), 0);
    }

    #[test]
    fn test_ceil_share() {
        assert_eq!(ceil_share(10, 0.2), 2);
        assert_eq!(ceil_share(1, 0.1), 1);
        assert_eq!(ceil_share(7, 0.2), 2);
        assert_eq!(ceil_share(0, 0.2), 0);
    }

    #[test]
    fn test_tally_keeps_first_seen_order() {
        let mut tally: FirstSeenTally<usize> = FirstSeenTally::new();
        *tally.entry("b") += 1;
        *tally.entry("a") += 1;
        *tally.entry("b") += 1;

        let entries = tally.into_entries();
        assert_eq!(entries, vec![("b".to_string(), 2), ("a".to_string(), 1)]);
    }
}
