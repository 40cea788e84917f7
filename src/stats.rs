//! Entity totals and per-parent counts, cached when the database is built.

use hashbrown::HashMap;
use serde::Serialize;

use crate::db::AddressDb;
use crate::hierarchy::HierarchyIndex;
use crate::models::{AdminEntity, AdminKind};
use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_divisions: usize,
    pub total_districts: usize,
    pub total_upazilas: usize,
    pub total_unions: usize,
}

/// Counts below one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivisionStats {
    pub id: u32,
    pub name: String,
    pub bn_name: String,
    pub districts: usize,
    pub upazilas: usize,
    pub unions: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Counts {
    totals: Stats,
    /// Descendant count keyed by (ancestor kind, ancestor id, descendant kind).
    below: HashMap<(AdminKind, u32, AdminKind), usize>,
}

impl Counts {
    pub(crate) fn build(store: &EntityStore, hierarchy: &HierarchyIndex) -> Self {
        let totals = Stats {
            total_divisions: store.count(AdminKind::Division),
            total_districts: store.count(AdminKind::District),
            total_upazilas: store.count(AdminKind::Upazila),
            total_unions: store.count(AdminKind::Union),
        };

        let mut below = HashMap::new();
        for kind in AdminKind::all() {
            let targets: Vec<AdminKind> = AdminKind::all()
                .iter()
                .copied()
                .filter(|target| kind.is_above(*target))
                .collect();
            for entity in store.all_of(*kind) {
                for target in &targets {
                    let count = hierarchy
                        .descendants_of(*kind, entity.id(), *target)
                        .map_or(0, |ids| ids.len());
                    below.insert((*kind, entity.id(), *target), count);
                }
            }
        }

        Self { totals, below }
    }

    fn below(&self, kind: AdminKind, id: u32, target: AdminKind) -> usize {
        self.below.get(&(kind, id, target)).copied().unwrap_or(0)
    }
}

impl AddressDb {
    pub fn stats(&self) -> &Stats {
        &self.counts.totals
    }

    pub fn district_count(&self, division_id: u32) -> usize {
        self.counts
            .below(AdminKind::Division, division_id, AdminKind::District)
    }

    pub fn upazila_count(&self, district_id: u32) -> usize {
        self.counts
            .below(AdminKind::District, district_id, AdminKind::Upazila)
    }

    pub fn upazila_count_by_division(&self, division_id: u32) -> usize {
        self.counts
            .below(AdminKind::Division, division_id, AdminKind::Upazila)
    }

    pub fn union_count(&self, upazila_id: u32) -> usize {
        self.counts
            .below(AdminKind::Upazila, upazila_id, AdminKind::Union)
    }

    pub fn union_count_by_district(&self, district_id: u32) -> usize {
        self.counts
            .below(AdminKind::District, district_id, AdminKind::Union)
    }

    pub fn union_count_by_division(&self, division_id: u32) -> usize {
        self.counts
            .below(AdminKind::Division, division_id, AdminKind::Union)
    }

    /// Per-division counts in declaration order.
    pub fn division_breakdown(&self) -> Vec<DivisionStats> {
        self.store
            .divisions()
            .rows()
            .iter()
            .map(|division| DivisionStats {
                id: division.id(),
                name: division.name().to_string(),
                bn_name: division.bn_name().to_string(),
                districts: self.district_count(division.id()),
                upazilas: self.upazila_count_by_division(division.id()),
                unions: self.union_count_by_division(division.id()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::sample_db;

    #[test]
    fn test_totals() {
        let db = sample_db();
        let stats = db.stats();
        assert_eq!(stats.total_divisions, 8);
        assert_eq!(stats.total_districts, 13);
        assert_eq!(stats.total_upazilas, 19);
        assert_eq!(stats.total_unions, 8);
    }

    #[test]
    fn test_per_parent_counts() {
        let db = sample_db();
        assert_eq!(db.district_count(6), 2);
        assert_eq!(db.upazila_count(47), 4);
        assert_eq!(db.upazila_count_by_division(6), 6);
        assert_eq!(db.union_count(300), 3);
        assert_eq!(db.union_count(121), 0);
        assert_eq!(db.union_count_by_district(47), 5);
        assert_eq!(db.union_count_by_division(3), 1);
    }

    #[test]
    fn test_unknown_parent_counts_zero() {
        let db = sample_db();
        assert_eq!(db.district_count(9), 0);
        assert_eq!(db.upazila_count(2), 0);
        assert_eq!(db.union_count_by_division(42), 0);
    }

    #[test]
    fn test_division_breakdown_sums_to_totals() {
        let db = sample_db();
        let breakdown = db.division_breakdown();
        assert_eq!(breakdown.len(), 8);
        assert_eq!(breakdown[5].name, "Dhaka");
        assert_eq!(
            breakdown.iter().map(|d| d.districts).sum::<usize>(),
            db.stats().total_districts
        );
        assert_eq!(
            breakdown.iter().map(|d| d.unions).sum::<usize>(),
            db.stats().total_unions
        );
    }
}
