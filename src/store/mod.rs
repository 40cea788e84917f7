//! Entity store: validated, immutable collections of the four entity kinds.
//!
//! Built once from a [`RawDataset`]; every record is validated eagerly so no malformed state
//! is ever observable downstream.

mod table;
mod validate;

pub use table::Table;

use tracing::{info, warn};

use crate::error::DatasetError;
use crate::models::{
    AdminEntity, AdminKind, District, Division, EntityRef, RawDataset, Union, Upazila,
};

/// Canonical, deduplicated entity collections.
#[derive(Debug, Clone)]
pub struct EntityStore {
    divisions: Table<Division>,
    districts: Table<District>,
    upazilas: Table<Upazila>,
    unions: Table<Union>,
}

impl EntityStore {
    /// Validate a raw dataset and build the id/slug indices.
    pub fn load(raw: &RawDataset) -> Result<Self, DatasetError> {
        let divisions = Table::build(collect(&raw.divisions, validate::division)?)?;
        let districts = Table::build(collect(&raw.districts, validate::district)?)?;
        let upazilas = Table::build(collect(&raw.upazilas, validate::upazila)?)?;
        let unions = Table::build(collect(&raw.unions, validate::union)?)?;

        check_parents(&districts, |id| divisions.contains(id))?;
        check_parents(&upazilas, |id| districts.contains(id))?;
        check_parents(&unions, |id| upazilas.contains(id))?;

        let without_range = districts
            .rows()
            .iter()
            .filter(|d| d.postal_range.is_none())
            .count();
        if without_range > 0 {
            warn!("{} districts have no postal range", without_range);
        }

        info!(
            "Entity store loaded: {} divisions, {} districts, {} upazilas, {} unions",
            divisions.len(),
            districts.len(),
            upazilas.len(),
            unions.len()
        );

        Ok(Self {
            divisions,
            districts,
            upazilas,
            unions,
        })
    }

    pub fn divisions(&self) -> &Table<Division> {
        &self.divisions
    }

    pub fn districts(&self) -> &Table<District> {
        &self.districts
    }

    pub fn upazilas(&self) -> &Table<Upazila> {
        &self.upazilas
    }

    pub fn unions(&self) -> &Table<Union> {
        &self.unions
    }

    pub fn get_by_id(&self, kind: AdminKind, id: u32) -> Option<EntityRef<'_>> {
        match kind {
            AdminKind::Division => self.divisions.get(id).map(EntityRef::from),
            AdminKind::District => self.districts.get(id).map(EntityRef::from),
            AdminKind::Upazila => self.upazilas.get(id).map(EntityRef::from),
            AdminKind::Union => self.unions.get(id).map(EntityRef::from),
        }
    }

    pub fn get_by_slug(&self, kind: AdminKind, slug: &str) -> Option<EntityRef<'_>> {
        match kind {
            AdminKind::Division => self.divisions.get_by_slug(slug).map(EntityRef::from),
            AdminKind::District => self.districts.get_by_slug(slug).map(EntityRef::from),
            AdminKind::Upazila => self.upazilas.get_by_slug(slug).map(EntityRef::from),
            AdminKind::Union => self.unions.get_by_slug(slug).map(EntityRef::from),
        }
    }

    pub fn contains(&self, kind: AdminKind, id: u32) -> bool {
        match kind {
            AdminKind::Division => self.divisions.contains(id),
            AdminKind::District => self.districts.contains(id),
            AdminKind::Upazila => self.upazilas.contains(id),
            AdminKind::Union => self.unions.contains(id),
        }
    }

    /// Every entity of a kind, in dataset declaration order.
    pub fn all_of(&self, kind: AdminKind) -> Vec<EntityRef<'_>> {
        match kind {
            AdminKind::Division => refs(self.divisions.rows()),
            AdminKind::District => refs(self.districts.rows()),
            AdminKind::Upazila => refs(self.upazilas.rows()),
            AdminKind::Union => refs(self.unions.rows()),
        }
    }

    pub fn count(&self, kind: AdminKind) -> usize {
        match kind {
            AdminKind::Division => self.divisions.len(),
            AdminKind::District => self.districts.len(),
            AdminKind::Upazila => self.upazilas.len(),
            AdminKind::Union => self.unions.len(),
        }
    }
}

fn collect<R, T>(
    raws: &[R],
    build: fn(usize, &R) -> Result<T, DatasetError>,
) -> Result<Vec<T>, DatasetError> {
    raws.iter()
        .enumerate()
        .map(|(index, raw)| build(index, raw))
        .collect()
}

fn check_parents<T: AdminEntity>(
    table: &Table<T>,
    parent_exists: impl Fn(u32) -> bool,
) -> Result<(), DatasetError> {
    let Some(parent_kind) = T::KIND.parent() else {
        return Ok(());
    };
    for row in table.rows() {
        if let Some(parent_id) = row.parent_id() {
            if !parent_exists(parent_id) {
                return Err(DatasetError::DanglingParent {
                    kind: T::KIND,
                    id: row.id(),
                    parent_kind,
                    parent_id,
                });
            }
        }
    }
    Ok(())
}

fn refs<'a, T>(rows: &'a [T]) -> Vec<EntityRef<'a>>
where
    EntityRef<'a>: From<&'a T>,
{
    rows.iter().map(EntityRef::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_raw;

    #[test]
    fn test_round_trip_by_id_and_slug() {
        let store = EntityStore::load(&sample_raw()).unwrap();
        for kind in AdminKind::all() {
            for entity in store.all_of(*kind) {
                assert_eq!(store.get_by_id(*kind, entity.id()), Some(entity));
                assert_eq!(store.get_by_slug(*kind, entity.slug()), Some(entity));
            }
        }
    }

    #[test]
    fn test_declaration_order_preserved() {
        let store = EntityStore::load(&sample_raw()).unwrap();
        let ids: Vec<u32> = store
            .all_of(AdminKind::District)
            .iter()
            .map(|d| d.id())
            .collect();
        assert_eq!(ids[..3], [1, 8, 15]);
        assert_eq!(store.count(AdminKind::Division), 8);
    }

    #[test]
    fn test_unknown_keys_are_absent() {
        let store = EntityStore::load(&sample_raw()).unwrap();
        assert!(store.get_by_id(AdminKind::Division, 9).is_none());
        assert!(store.get_by_id(AdminKind::District, 2).is_none());
        assert!(store.get_by_slug(AdminKind::Upazila, "nowhere").is_none());
    }

    #[test]
    fn test_dangling_parent_rejected() {
        let mut raw = sample_raw();
        raw.unions[0].upazila_id = Some(crate::models::raw::RawId::Number(494));
        assert_eq!(
            EntityStore::load(&raw).unwrap_err(),
            DatasetError::DanglingParent {
                kind: AdminKind::Union,
                id: 1,
                parent_kind: AdminKind::Upazila,
                parent_id: 494,
            }
        );
    }

    #[test]
    fn test_duplicate_slug_across_records_rejected() {
        let mut raw = sample_raw();
        raw.upazilas[1].slug = raw.upazilas[0].slug.clone();
        assert!(matches!(
            EntityStore::load(&raw),
            Err(DatasetError::DuplicateSlug {
                kind: AdminKind::Upazila,
                ..
            })
        ));
    }

    #[test]
    fn test_same_slug_in_different_kinds_allowed() {
        // "dhaka" is both a division and a district slug.
        let store = EntityStore::load(&sample_raw()).unwrap();
        assert!(store.get_by_slug(AdminKind::Division, "dhaka").is_some());
        assert!(store.get_by_slug(AdminKind::District, "dhaka").is_some());
    }
}
