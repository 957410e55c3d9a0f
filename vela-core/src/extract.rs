use regex::Regex;
use serde::{Deserialize, Serialize};

/// Candidate order identifier pulled out of free-form customer text.
///
/// Carried as a string end to end; no range, length, or leading-zero
/// validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// Derives an order identifier from customer text.
///
/// Two patterns, checked in order: an explicit `#`-prefixed digit run
/// anywhere in the text (first occurrence wins), otherwise the last
/// word-bounded digit run. The fallback is a heuristic, not a guarantee:
/// text with several numbers and no `#` silently picks the rightmost one.
pub struct OrderIdExtractor {
    hash_pattern: Regex,
    digits_pattern: Regex,
}

impl OrderIdExtractor {
    pub fn new() -> Self {
        Self {
            hash_pattern: Regex::new(r"#(\d+)").expect("hash pattern is valid"),
            digits_pattern: Regex::new(r"\b\d+\b").expect("digits pattern is valid"),
        }
    }

    pub fn extract(&self, text: &str) -> Option<ExtractedInfo> {
        if let Some(caps) = self.hash_pattern.captures(text) {
            let order_id = caps[1].to_string();
            tracing::debug!(order_id = %order_id, "found order number with # prefix");
            return Some(ExtractedInfo { order_id });
        }

        if let Some(found) = self.digits_pattern.find_iter(text).last() {
            let order_id = found.as_str().to_string();
            tracing::debug!(order_id = %order_id, "found standalone order number");
            return Some(ExtractedInfo { order_id });
        }

        tracing::debug!("no order number found in text");
        None
    }
}

impl Default for OrderIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}
