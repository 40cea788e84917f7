//! Name search over both scripts: substring, quick, prefix and typo-tolerant modes.

mod index;
pub mod normalize;
mod results;

pub use index::SearchIndex;
pub use normalize::normalize;
pub use results::{FuzzyHit, SearchHit, SearchOptions, SearchResults};

use serde::Deserialize;

/// Tuning knobs for search, loaded from the `[search]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Suggestions returned by autocomplete when no limit is given.
    pub autocomplete_limit: usize,
    /// Query characters per allowed edit in fuzzy search.
    pub fuzzy_chars_per_edit: usize,
    /// Upper bound on the fuzzy edit distance.
    pub fuzzy_max_edits: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            autocomplete_limit: 10,
            fuzzy_chars_per_edit: 4,
            fuzzy_max_edits: 3,
        }
    }
}

impl SearchConfig {
    /// Allowed edits for a query of `query_chars` characters: at least one, at most
    /// `fuzzy_max_edits`.
    pub fn fuzzy_threshold(&self, query_chars: usize) -> usize {
        let max_edits = self.fuzzy_max_edits.max(1);
        (query_chars / self.fuzzy_chars_per_edit.max(1)).clamp(1, max_edits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_threshold_scales_with_length() {
        let config = SearchConfig::default();
        assert_eq!(config.fuzzy_threshold(0), 1);
        assert_eq!(config.fuzzy_threshold(5), 1);
        assert_eq!(config.fuzzy_threshold(8), 2);
        assert_eq!(config.fuzzy_threshold(40), 3);
    }

    #[test]
    fn test_degenerate_config_still_allows_one_edit() {
        let config = SearchConfig {
            autocomplete_limit: 5,
            fuzzy_chars_per_edit: 0,
            fuzzy_max_edits: 0,
        };
        assert_eq!(config.fuzzy_threshold(12), 1);
    }
}
