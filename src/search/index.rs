//! Derived search indices and the four query modes.

use std::cmp::Ordering;
use std::ops::Range;

use hashbrown::HashMap;
use tracing::{debug, info};

use super::normalize::{char_len, normalize};
use super::{FuzzyHit, SearchConfig, SearchHit, SearchOptions, SearchResults};
use crate::models::{AdminEntity, AdminKind, Lang};
use crate::store::EntityStore;

/// Kind priority for quick search.
const QUICK_SEARCH_KINDS: [AdminKind; 3] =
    [AdminKind::Division, AdminKind::District, AdminKind::Upazila];

/// A normalized name plus its words, for token-level fuzzy matching.
#[derive(Debug, Clone)]
struct IndexedName {
    text: String,
    chars: usize,
    /// Words of multi-word names with their char lengths; empty for single words.
    tokens: Vec<(String, usize)>,
}

impl IndexedName {
    fn new(raw: &str) -> Self {
        let text = normalize(raw);
        let tokens: Vec<(String, usize)> = text
            .split(' ')
            .map(|t| (t.to_string(), char_len(t)))
            .collect();
        Self {
            chars: char_len(&text),
            tokens: if tokens.len() > 1 { tokens } else { Vec::new() },
            text,
        }
    }

    /// Smallest edit distance between the query and the whole name or any of its words,
    /// if within `max_edits`.
    fn distance(&self, query: &str, query_chars: usize, max_edits: usize) -> Option<usize> {
        std::iter::once((self.text.as_str(), self.chars))
            .chain(self.tokens.iter().map(|(t, n)| (t.as_str(), *n)))
            .filter(|(_, chars)| chars.abs_diff(query_chars) <= max_edits)
            .map(|(candidate, _)| strsim::osa_distance(query, candidate))
            .min()
            .filter(|d| *d <= max_edits)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    kind: AdminKind,
    id: u32,
    slug: String,
    name: String,
    bn_name: String,
    en: IndexedName,
    bn: IndexedName,
}

impl Entry {
    fn new<T: AdminEntity>(entity: &T) -> Self {
        Self {
            kind: T::KIND,
            id: entity.id(),
            slug: entity.slug().to_string(),
            name: entity.name().to_string(),
            bn_name: entity.bn_name().to_string(),
            en: IndexedName::new(entity.name()),
            bn: IndexedName::new(entity.bn_name()),
        }
    }

    fn indexed(&self, lang: Lang) -> &IndexedName {
        match lang {
            Lang::En => &self.en,
            Lang::Bn => &self.bn,
        }
    }

    /// Names to match against, English first.
    fn names(&self, script: Option<Lang>) -> impl Iterator<Item = (Lang, &IndexedName)> {
        [Lang::En, Lang::Bn]
            .into_iter()
            .filter(move |lang| script.map_or(true, |s| s == *lang))
            .map(move |lang| (lang, self.indexed(lang)))
    }

    fn contains(&self, query: &str, script: Option<Lang>) -> Option<Lang> {
        self.names(script)
            .find(|(_, name)| name.text.contains(query))
            .map(|(lang, _)| lang)
    }

    fn hit(&self, matched: Lang) -> SearchHit {
        SearchHit {
            kind: self.kind,
            id: self.id,
            slug: self.slug.clone(),
            name: self.name.clone(),
            bn_name: self.bn_name.clone(),
            matched,
        }
    }
}

/// Points at one name of one entry; sorted by name for prefix lookups.
#[derive(Debug, Clone, Copy)]
struct PrefixKey {
    entry: usize,
    lang: Lang,
}

/// Normalized name indices over every entity, built once alongside the store.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    config: SearchConfig,
    /// Entries grouped by kind (root first), each group in declaration order.
    entries: Vec<Entry>,
    by_kind: [Range<usize>; 4],
    /// Every English and Bengali name, sorted by normalized text.
    prefixes: Vec<PrefixKey>,
}

impl SearchIndex {
    pub fn build(store: &EntityStore, config: SearchConfig) -> Self {
        let mut entries = Vec::with_capacity(AdminKind::all().iter().map(|k| store.count(*k)).sum());
        let by_kind = [
            push_entries(&mut entries, store.divisions().rows()),
            push_entries(&mut entries, store.districts().rows()),
            push_entries(&mut entries, store.upazilas().rows()),
            push_entries(&mut entries, store.unions().rows()),
        ];

        let mut prefixes: Vec<PrefixKey> = (0..entries.len())
            .flat_map(|entry| {
                [Lang::En, Lang::Bn]
                    .into_iter()
                    .map(move |lang| PrefixKey { entry, lang })
            })
            .collect();
        prefixes.sort_by(|a, b| {
            let (ta, tb) = (
                &entries[a.entry].indexed(a.lang).text,
                &entries[b.entry].indexed(b.lang).text,
            );
            ta.cmp(tb)
        });

        info!(
            "Search index built: {} entries, {} names",
            entries.len(),
            prefixes.len()
        );

        Self {
            config,
            entries,
            by_kind,
            prefixes,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn entries_of(&self, kind: AdminKind) -> &[Entry] {
        &self.entries[self.by_kind[kind.depth()].clone()]
    }

    fn prefix_text(&self, key: &PrefixKey) -> &str {
        &self.entries[key.entry].indexed(key.lang).text
    }

    /// Case/script-insensitive containment match, grouped by kind.
    pub fn substring(&self, query: &str, options: &SearchOptions) -> SearchResults {
        let mut results = SearchResults::default();
        let Some(query) = prepare(query) else {
            return results;
        };

        for kind in unique_kinds(&options.kinds) {
            let limit = options.limit.unwrap_or(usize::MAX);
            let group = results.group_mut(kind);
            for entry in self.entries_of(kind) {
                if group.len() >= limit {
                    break;
                }
                if let Some(lang) = entry.contains(&query, options.script) {
                    group.push(entry.hit(lang));
                }
            }
        }

        debug!(
            "Substring search '{}' ({:?}): {} hits",
            query,
            options.script,
            results.total()
        );
        results
    }

    /// First containment match in the order division, district, upazila.
    pub fn quick(&self, query: &str) -> Option<SearchHit> {
        let query = prepare(query)?;
        QUICK_SEARCH_KINDS.iter().find_map(|kind| {
            self.entries_of(*kind)
                .iter()
                .find_map(|entry| entry.contains(&query, None).map(|lang| entry.hit(lang)))
        })
    }

    /// Prefix matches ordered by name length, then name, capped at `limit`.
    pub fn autocomplete(
        &self,
        query: &str,
        kinds: &[AdminKind],
        limit: Option<usize>,
    ) -> Vec<SearchHit> {
        let Some(query) = prepare(query) else {
            return Vec::new();
        };
        let limit = limit.unwrap_or(self.config.autocomplete_limit);

        let start = self
            .prefixes
            .partition_point(|key| self.prefix_text(key) < query.as_str());

        // Shortest matching name per entry.
        let mut best: HashMap<usize, PrefixKey> = HashMap::new();
        for key in &self.prefixes[start..] {
            let text = self.prefix_text(key);
            if !text.starts_with(query.as_str()) {
                break;
            }
            if !kinds.contains(&self.entries[key.entry].kind) {
                continue;
            }
            best.entry(key.entry)
                .and_modify(|current| {
                    if self.name_order(key, current) == Ordering::Less {
                        *current = *key;
                    }
                })
                .or_insert(*key);
        }

        let mut matches: Vec<PrefixKey> = best.into_values().collect();
        matches.sort_by(|a, b| self.name_order(a, b));
        matches.truncate(limit);

        debug!("Autocomplete '{}': {} suggestions", query, matches.len());
        matches
            .iter()
            .map(|key| self.entries[key.entry].hit(key.lang))
            .collect()
    }

    /// Typo-tolerant matching with a length-scaled edit-distance threshold.
    pub fn fuzzy(&self, query: &str, kinds: &[AdminKind]) -> Vec<FuzzyHit> {
        let Some(query) = prepare(query) else {
            return Vec::new();
        };
        let query_chars = char_len(&query);
        let max_edits = self.config.fuzzy_threshold(query_chars);

        let mut ranked: Vec<(usize, PrefixKey)> = Vec::new();
        for kind in unique_kinds(kinds) {
            let range = self.by_kind[kind.depth()].clone();
            for entry_pos in range {
                let entry = &self.entries[entry_pos];
                let best = entry
                    .names(None)
                    .filter_map(|(lang, name)| {
                        name.distance(&query, query_chars, max_edits)
                            .map(|d| (d, lang))
                    })
                    .min_by_key(|(d, _)| *d);
                if let Some((distance, lang)) = best {
                    ranked.push((
                        distance,
                        PrefixKey {
                            entry: entry_pos,
                            lang,
                        },
                    ));
                }
            }
        }

        ranked.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| self.name_order(a, b)));

        debug!(
            "Fuzzy search '{}' (max {} edits): {} hits",
            query,
            max_edits,
            ranked.len()
        );
        ranked
            .into_iter()
            .map(|(distance, key)| FuzzyHit {
                hit: self.entries[key.entry].hit(key.lang),
                distance,
            })
            .collect()
    }

    /// Shorter name first, then lexical, then kind (root first), then id.
    fn name_order(&self, a: &PrefixKey, b: &PrefixKey) -> Ordering {
        let (ea, eb) = (&self.entries[a.entry], &self.entries[b.entry]);
        let (na, nb) = (ea.indexed(a.lang), eb.indexed(b.lang));
        na.chars
            .cmp(&nb.chars)
            .then_with(|| na.text.cmp(&nb.text))
            .then_with(|| ea.kind.cmp(&eb.kind))
            .then_with(|| ea.id.cmp(&eb.id))
    }
}

fn push_entries<T: AdminEntity>(entries: &mut Vec<Entry>, rows: &[T]) -> Range<usize> {
    let start = entries.len();
    entries.extend(rows.iter().map(Entry::new));
    start..entries.len()
}

/// Normalized query, or `None` when nothing is left to match.
fn prepare(query: &str) -> Option<String> {
    let normalized = normalize(query);
    (!normalized.is_empty()).then_some(normalized)
}

fn unique_kinds(kinds: &[AdminKind]) -> Vec<AdminKind> {
    let mut unique = Vec::with_capacity(kinds.len());
    for kind in kinds {
        if !unique.contains(kind) {
            unique.push(*kind);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_raw;

    const DEFAULT_KINDS: [AdminKind; 3] =
        [AdminKind::Division, AdminKind::District, AdminKind::Upazila];

    fn index() -> SearchIndex {
        let store = EntityStore::load(&sample_raw()).unwrap();
        SearchIndex::build(&store, SearchConfig::default())
    }

    fn ids(hits: &[SearchHit]) -> Vec<(AdminKind, u32)> {
        hits.iter().map(|h| (h.kind, h.id)).collect()
    }

    #[test]
    fn test_substring_both_scripts() {
        let index = index();
        let results = index.substring("khulna", &SearchOptions::default());
        assert_eq!(ids(&results.divisions), vec![(AdminKind::Division, 3)]);
        assert_eq!(ids(&results.districts), vec![(AdminKind::District, 27)]);
        assert_eq!(results.divisions[0].matched, Lang::En);

        let bengali = index.substring("খুলনা", &SearchOptions::default());
        assert_eq!(bengali.divisions[0].id, 3);
        assert_eq!(bengali.divisions[0].matched, Lang::Bn);
    }

    #[test]
    fn test_substring_matches_inside_names() {
        let index = index();
        let results = index.substring("DHA", &SearchOptions::default());
        assert_eq!(
            ids(&results.upazilas),
            vec![(AdminKind::Upazila, 260), (AdminKind::Upazila, 301)]
        );
        assert!(results.unions.is_empty());
    }

    #[test]
    fn test_substring_script_restriction() {
        let index = index();
        let english_only = SearchOptions::default().script(Lang::En);
        assert!(index.substring("ঢাকা", &english_only).is_empty());

        let bengali_only = SearchOptions::default().script(Lang::Bn);
        assert_eq!(index.substring("ঢাকা", &bengali_only).total(), 2);
    }

    #[test]
    fn test_substring_limit_and_kinds() {
        let index = index();
        let options = SearchOptions::kinds(&[AdminKind::Union]).limit(2);
        let results = index.substring("a", &options);
        assert_eq!(results.unions.len(), 2);
        assert!(results.divisions.is_empty());
    }

    #[test]
    fn test_blank_query_is_empty_everywhere() {
        let index = index();
        assert!(index.substring("   ", &SearchOptions::default()).is_empty());
        assert!(index.quick("").is_none());
        assert!(index.autocomplete(" \t ", &DEFAULT_KINDS, None).is_empty());
        assert!(index.fuzzy("  ", &DEFAULT_KINDS).is_empty());
    }

    #[test]
    fn test_quick_search_priority() {
        let index = index();
        let hit = index.quick("  dhaka ").unwrap();
        assert_eq!((hit.kind, hit.id), (AdminKind::Division, 6));

        let hit = index.quick("savar").unwrap();
        assert_eq!((hit.kind, hit.id), (AdminKind::Upazila, 300));

        // Unions are not part of quick search.
        assert!(index.quick("ashulia").is_none());
    }

    #[test]
    fn test_autocomplete_prefix_only() {
        let index = index();
        let hits = index.autocomplete("Dha", &DEFAULT_KINDS, Some(10));
        assert_eq!(
            ids(&hits),
            vec![
                (AdminKind::Division, 6),
                (AdminKind::District, 47),
                (AdminKind::Upazila, 301),
            ]
        );
        // Madhabpur contains "dha" but does not start with it.
        assert!(hits.iter().all(|h| normalize(&h.name).starts_with("dha")));
    }

    #[test]
    fn test_autocomplete_limit() {
        let index = index();
        assert_eq!(index.autocomplete("d", &DEFAULT_KINDS, Some(2)).len(), 2);
        assert!(index.autocomplete("d", &DEFAULT_KINDS, Some(0)).is_empty());
    }

    #[test]
    fn test_autocomplete_bengali_prefix() {
        let index = index();
        let hits = index.autocomplete("গাজী", &DEFAULT_KINDS, None);
        assert_eq!(
            ids(&hits),
            vec![(AdminKind::District, 48), (AdminKind::Upazila, 310)]
        );
        assert!(hits.iter().all(|h| h.matched == Lang::Bn));
    }

    #[test]
    fn test_fuzzy_tolerates_transposition() {
        let index = index();
        let hits = index.fuzzy("Dahka", &DEFAULT_KINDS);
        let found: Vec<(AdminKind, u32)> = hits.iter().map(|h| (h.hit.kind, h.hit.id)).collect();
        assert_eq!(
            found,
            vec![(AdminKind::Division, 6), (AdminKind::District, 47)]
        );
        assert!(hits.iter().all(|h| h.distance == 1));
    }

    #[test]
    fn test_fuzzy_exact_match_ranks_first() {
        let index = index();
        let hits = index.fuzzy("Dhaka", &DEFAULT_KINDS);
        assert_eq!(hits[0].distance, 0);
        assert_eq!((hits[0].hit.kind, hits[0].hit.id), (AdminKind::Division, 6));
    }

    #[test]
    fn test_fuzzy_matches_words_of_multi_word_names() {
        let index = index();
        let hits = index.fuzzy("gazipur", &DEFAULT_KINDS);
        let found: Vec<(AdminKind, u32, usize)> = hits
            .iter()
            .map(|h| (h.hit.kind, h.hit.id, h.distance))
            .collect();
        // Equal distance: the shorter name wins.
        assert_eq!(
            found,
            vec![(AdminKind::District, 48, 0), (AdminKind::Upazila, 310, 0)]
        );
    }

    #[test]
    fn test_fuzzy_rejects_distant_names() {
        let index = index();
        assert!(index.fuzzy("Chittagong", &DEFAULT_KINDS).is_empty());
        assert!(index.fuzzy("xyz", &DEFAULT_KINDS).is_empty());
    }
}
