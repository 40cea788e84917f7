//! Text normalization shared by indexed names and queries.

use unicode_normalization::UnicodeNormalization;

/// Zero-width characters that Bengali input methods insert between conjuncts.
const ZERO_WIDTH: [char; 3] = ['\u{200c}', '\u{200d}', '\u{feff}'];

/// Normalize a name or query for comparison.
///
/// NFC-composes, drops zero-width joiners, lowercases Latin text, trims and collapses
/// internal whitespace to single spaces. Bengali has no case, so only composition and
/// whitespace affect it.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().filter(|c| !ZERO_WIDTH.contains(c)).collect();
    composed
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length in chars, which is what edit distances are measured in.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
