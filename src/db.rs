//! The shared, immutable address database.

use std::time::Instant;

use tracing::info;

use crate::error::DatasetError;
use crate::hierarchy::HierarchyIndex;
use crate::models::{AdminKind, Lang, RawDataset};
use crate::search::{FuzzyHit, SearchConfig, SearchHit, SearchIndex, SearchOptions, SearchResults};
use crate::stats::Counts;
use crate::store::EntityStore;

/// Kinds covered by the default search, quick search, autocomplete and fuzzy modes.
const NAMED_KINDS: [AdminKind; 3] = [AdminKind::Division, AdminKind::District, AdminKind::Upazila];

/// Every index over the dataset, built once and read concurrently without locks.
///
/// Lookups live in `lookup.rs`, postal resolution in `postal.rs` and counts in `stats.rs`,
/// all as inherent methods on this type.
#[derive(Debug, Clone)]
pub struct AddressDb {
    pub(crate) store: EntityStore,
    pub(crate) hierarchy: HierarchyIndex,
    pub(crate) search: SearchIndex,
    pub(crate) counts: Counts,
}

impl AddressDb {
    /// Validate `raw` and build all indices.
    pub fn build(raw: &RawDataset, search_config: SearchConfig) -> Result<Self, DatasetError> {
        let started = Instant::now();

        let store = EntityStore::load(raw)?;
        let hierarchy = HierarchyIndex::build(&store);
        let search = SearchIndex::build(&store, search_config);
        let counts = Counts::build(&store, &hierarchy);

        info!("Address database ready in {:?}", started.elapsed());
        Ok(Self {
            store,
            hierarchy,
            search,
            counts,
        })
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    pub fn search_index(&self) -> &SearchIndex {
        &self.search
    }

    /// Substring search over divisions, districts and upazilas in both scripts.
    pub fn search(&self, query: &str) -> SearchResults {
        self.search.substring(query, &SearchOptions::default())
    }

    pub fn search_with(&self, query: &str, options: &SearchOptions) -> SearchResults {
        self.search.substring(query, options)
    }

    pub fn search_divisions(&self, query: &str) -> Vec<SearchHit> {
        self.search_kind(query, AdminKind::Division)
    }

    pub fn search_districts(&self, query: &str) -> Vec<SearchHit> {
        self.search_kind(query, AdminKind::District)
    }

    pub fn search_upazilas(&self, query: &str) -> Vec<SearchHit> {
        self.search_kind(query, AdminKind::Upazila)
    }

    pub fn search_unions(&self, query: &str) -> Vec<SearchHit> {
        self.search_kind(query, AdminKind::Union)
    }

    fn search_kind(&self, query: &str, kind: AdminKind) -> Vec<SearchHit> {
        let mut results = self.search.substring(query, &SearchOptions::kinds(&[kind]));
        std::mem::take(results.group_mut(kind))
    }

    /// Substring search matching Bengali names only.
    pub fn search_bengali(&self, query: &str) -> SearchResults {
        self.search
            .substring(query, &SearchOptions::default().script(Lang::Bn))
    }

    /// Substring search matching English names only.
    pub fn search_english(&self, query: &str) -> SearchResults {
        self.search
            .substring(query, &SearchOptions::default().script(Lang::En))
    }

    pub fn quick_search(&self, query: &str) -> Option<SearchHit> {
        self.search.quick(query)
    }

    /// Prefix suggestions; `None` uses the configured default limit.
    pub fn autocomplete(&self, query: &str, limit: Option<usize>) -> Vec<SearchHit> {
        self.search.autocomplete(query, &NAMED_KINDS, limit)
    }

    pub fn fuzzy_search(&self, query: &str) -> Vec<FuzzyHit> {
        self.search.fuzzy(query, &NAMED_KINDS)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::testutil::{sample_db, sample_raw};

    #[test]
    fn test_khulna_in_both_scripts() {
        let db = sample_db();
        let bengali = db.search_bengali("খুলনা");
        assert!(bengali.divisions.iter().any(|h| h.id == 3));

        let english = db.search("KHULNA ");
        assert!(english.divisions.iter().any(|h| h.id == 3));
        assert!(db.search_english("খুলনা").is_empty());
    }

    #[test]
    fn test_search_unions_only_on_request() {
        let db = sample_db();
        assert!(db.search("ashulia").is_empty());
        let unions = db.search_unions("ashulia");
        assert_eq!(unions.len(), 1);
        assert_eq!((unions[0].kind, unions[0].id), (AdminKind::Union, 1));
    }

    #[test]
    fn test_single_kind_search() {
        let db = sample_db();
        assert_eq!(db.search_divisions("dhaka").len(), 1);
        assert_eq!(db.search_districts("dhaka").len(), 1);
        assert!(db.search_upazilas("dhaka").is_empty());
    }

    #[test]
    fn test_autocomplete_default_limit() {
        let db = sample_db();
        let hits = db.autocomplete("Dha", None);
        let ids: Vec<u32> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![6, 47, 301]);
    }

    #[test]
    fn test_load_is_idempotent() {
        let raw = sample_raw();
        let first = AddressDb::build(&raw, SearchConfig::default()).unwrap();
        let second = AddressDb::build(&raw, SearchConfig::default()).unwrap();

        for kind in AdminKind::all() {
            assert_eq!(first.store().all_of(*kind), second.store().all_of(*kind));
        }
        assert_eq!(first.stats(), second.stats());
        assert_eq!(first.search("a"), second.search("a"));
    }

    #[test]
    fn test_concurrent_readers() {
        let db = Arc::new(sample_db());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = Arc::clone(&db);
                thread::spawn(move || {
                    let hits = db.fuzzy_search("Dahka");
                    let address = db.full_address_of_union(1).unwrap().format_english();
                    (hits[0].hit.id, address)
                })
            })
            .collect();

        for handle in handles {
            let (id, address) = handle.join().unwrap();
            assert_eq!(id, 6);
            assert_eq!(address, "Ashulia, Savar, Dhaka, Dhaka");
        }
    }
}
