//! Entity lookups, hierarchy enumeration and relationship predicates.

use serde::Serialize;

use crate::db::AddressDb;
use crate::error::NotFoundError;
use crate::format::FullAddress;
use crate::models::{AdminEntity, AdminKind, District, Division, EntityRef, Lang, Union, Upazila};
use crate::search::normalize;
use crate::store::Table;

/// One entry of a select/dropdown list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption<'a> {
    pub id: u32,
    pub value: &'a str,
    pub label: &'a str,
    pub label_bn: &'a str,
}

impl<'a, T: AdminEntity> From<&'a T> for SelectOption<'a> {
    fn from(entity: &'a T) -> Self {
        Self {
            id: entity.id(),
            value: entity.slug(),
            label: entity.name(),
            label_bn: entity.bn_name(),
        }
    }
}

impl AddressDb {
    pub fn get(&self, kind: AdminKind, id: u32) -> Option<EntityRef<'_>> {
        self.store.get_by_id(kind, id)
    }

    pub fn get_by_slug(&self, kind: AdminKind, slug: &str) -> Option<EntityRef<'_>> {
        self.store.get_by_slug(kind, slug)
    }

    pub fn division(&self, id: u32) -> Option<&Division> {
        self.store.divisions().get(id)
    }

    pub fn district(&self, id: u32) -> Option<&District> {
        self.store.districts().get(id)
    }

    pub fn upazila(&self, id: u32) -> Option<&Upazila> {
        self.store.upazilas().get(id)
    }

    pub fn union(&self, id: u32) -> Option<&Union> {
        self.store.unions().get(id)
    }

    pub fn division_by_slug(&self, slug: &str) -> Option<&Division> {
        self.store.divisions().get_by_slug(slug)
    }

    pub fn district_by_slug(&self, slug: &str) -> Option<&District> {
        self.store.districts().get_by_slug(slug)
    }

    pub fn upazila_by_slug(&self, slug: &str) -> Option<&Upazila> {
        self.store.upazilas().get_by_slug(slug)
    }

    pub fn union_by_slug(&self, slug: &str) -> Option<&Union> {
        self.store.unions().get_by_slug(slug)
    }

    /// First division whose English or Bengali name equals `name` after normalization.
    pub fn division_by_name(&self, name: &str) -> Option<&Division> {
        find_by_name(self.store.divisions(), name)
    }

    pub fn district_by_name(&self, name: &str) -> Option<&District> {
        find_by_name(self.store.districts(), name)
    }

    pub fn upazila_by_name(&self, name: &str) -> Option<&Upazila> {
        find_by_name(self.store.upazilas(), name)
    }

    pub fn divisions(&self) -> &[Division] {
        self.store.divisions().rows()
    }

    pub fn districts(&self) -> &[District] {
        self.store.districts().rows()
    }

    pub fn upazilas(&self) -> &[Upazila] {
        self.store.upazilas().rows()
    }

    pub fn unions(&self) -> &[Union] {
        self.store.unions().rows()
    }

    // Enumeration. An unknown parent yields an empty list.

    pub fn districts_of_division(&self, division_id: u32) -> Vec<&District> {
        self.below(self.store.districts(), AdminKind::Division, division_id)
    }

    pub fn districts_of_division_slug(&self, slug: &str) -> Vec<&District> {
        self.division_by_slug(slug)
            .map(|division| self.districts_of_division(division.id))
            .unwrap_or_default()
    }

    pub fn upazilas_of_district(&self, district_id: u32) -> Vec<&Upazila> {
        self.below(self.store.upazilas(), AdminKind::District, district_id)
    }

    pub fn upazilas_of_division(&self, division_id: u32) -> Vec<&Upazila> {
        self.below(self.store.upazilas(), AdminKind::Division, division_id)
    }

    pub fn unions_of_upazila(&self, upazila_id: u32) -> Vec<&Union> {
        self.below(self.store.unions(), AdminKind::Upazila, upazila_id)
    }

    pub fn unions_of_district(&self, district_id: u32) -> Vec<&Union> {
        self.below(self.store.unions(), AdminKind::District, district_id)
    }

    pub fn unions_of_division(&self, division_id: u32) -> Vec<&Union> {
        self.below(self.store.unions(), AdminKind::Division, division_id)
    }

    fn below<'a, T: AdminEntity>(
        &self,
        table: &'a Table<T>,
        ancestor_kind: AdminKind,
        ancestor_id: u32,
    ) -> Vec<&'a T> {
        self.hierarchy
            .descendants_of(ancestor_kind, ancestor_id, T::KIND)
            .map(|ids| ids.iter().filter_map(|id| table.get(*id)).collect())
            .unwrap_or_default()
    }

    pub fn division_of_district(&self, district_id: u32) -> Option<&Division> {
        self.division(self.district(district_id)?.division_id)
    }

    pub fn district_of_upazila(&self, upazila_id: u32) -> Option<&District> {
        self.district(self.upazila(upazila_id)?.district_id)
    }

    pub fn upazila_of_union(&self, union_id: u32) -> Option<&Upazila> {
        self.upazila(self.union(union_id)?.upazila_id)
    }

    /// The id lies in the kind's declared range and the entity exists.
    pub fn is_valid(&self, kind: AdminKind, id: u32) -> bool {
        kind.id_range().contains(&id) && self.store.contains(kind, id)
    }

    pub fn is_valid_division(&self, id: u32) -> bool {
        self.is_valid(AdminKind::Division, id)
    }

    pub fn is_valid_district(&self, id: u32) -> bool {
        self.is_valid(AdminKind::District, id)
    }

    pub fn is_valid_upazila(&self, id: u32) -> bool {
        self.is_valid(AdminKind::Upazila, id)
    }

    pub fn is_valid_union(&self, id: u32) -> bool {
        self.is_valid(AdminKind::Union, id)
    }

    /// Whether `ancestor_id` lies on the path above the child. False for unknown ids and
    /// when `ancestor_kind` is not strictly above `child_kind`.
    pub fn is_descendant_of(
        &self,
        child_kind: AdminKind,
        child_id: u32,
        ancestor_kind: AdminKind,
        ancestor_id: u32,
    ) -> bool {
        self.hierarchy
            .ancestor_at(child_kind, child_id, ancestor_kind)
            .is_some_and(|id| id == ancestor_id)
    }

    pub fn is_district_in_division(&self, district_id: u32, division_id: u32) -> bool {
        self.is_descendant_of(AdminKind::District, district_id, AdminKind::Division, division_id)
    }

    pub fn is_upazila_in_district(&self, upazila_id: u32, district_id: u32) -> bool {
        self.is_descendant_of(AdminKind::Upazila, upazila_id, AdminKind::District, district_id)
    }

    pub fn is_upazila_in_division(&self, upazila_id: u32, division_id: u32) -> bool {
        self.is_descendant_of(AdminKind::Upazila, upazila_id, AdminKind::Division, division_id)
    }

    pub fn is_union_in_upazila(&self, union_id: u32, upazila_id: u32) -> bool {
        self.is_descendant_of(AdminKind::Union, union_id, AdminKind::Upazila, upazila_id)
    }

    pub fn is_union_in_district(&self, union_id: u32, district_id: u32) -> bool {
        self.is_descendant_of(AdminKind::Union, union_id, AdminKind::District, district_id)
    }

    pub fn is_union_in_division(&self, union_id: u32, division_id: u32) -> bool {
        self.is_descendant_of(AdminKind::Union, union_id, AdminKind::Division, division_id)
    }

    /// Resolve the path above an upazila.
    pub fn full_address(&self, upazila_id: u32) -> Result<FullAddress<'_>, NotFoundError> {
        let upazila = self.upazila(upazila_id).ok_or(NotFoundError {
            kind: AdminKind::Upazila,
            id: upazila_id,
        })?;
        let district = self.district(upazila.district_id).ok_or(NotFoundError {
            kind: AdminKind::District,
            id: upazila.district_id,
        })?;
        let division = self.division(district.division_id).ok_or(NotFoundError {
            kind: AdminKind::Division,
            id: district.division_id,
        })?;

        Ok(FullAddress {
            division,
            district,
            upazila,
            union: None,
        })
    }

    /// Resolve the path above a union, including the union itself.
    pub fn full_address_of_union(&self, union_id: u32) -> Result<FullAddress<'_>, NotFoundError> {
        let union = self.union(union_id).ok_or(NotFoundError {
            kind: AdminKind::Union,
            id: union_id,
        })?;
        Ok(FullAddress {
            union: Some(union),
            ..self.full_address(union.upazila_id)?
        })
    }

    pub fn division_options(&self) -> Vec<SelectOption<'_>> {
        self.divisions().iter().map(SelectOption::from).collect()
    }

    /// Districts of one division, or all districts for `None`.
    pub fn district_options(&self, division_id: Option<u32>) -> Vec<SelectOption<'_>> {
        match division_id {
            Some(id) => options(self.districts_of_division(id)),
            None => self.districts().iter().map(SelectOption::from).collect(),
        }
    }

    pub fn upazila_options(&self, district_id: Option<u32>) -> Vec<SelectOption<'_>> {
        match district_id {
            Some(id) => options(self.upazilas_of_district(id)),
            None => self.upazilas().iter().map(SelectOption::from).collect(),
        }
    }

    pub fn union_options(&self, upazila_id: Option<u32>) -> Vec<SelectOption<'_>> {
        match upazila_id {
            Some(id) => options(self.unions_of_upazila(id)),
            None => self.unions().iter().map(SelectOption::from).collect(),
        }
    }

    /// Every name of a kind in one script, in declaration order.
    pub fn names(&self, kind: AdminKind, lang: Lang) -> Vec<&str> {
        self.store
            .all_of(kind)
            .into_iter()
            .map(|entity| entity.name_in(lang))
            .collect()
    }
}

fn options<'a, T: AdminEntity>(entities: Vec<&'a T>) -> Vec<SelectOption<'a>> {
    entities.into_iter().map(SelectOption::from).collect()
}

fn find_by_name<'a, T: AdminEntity>(table: &'a Table<T>, name: &str) -> Option<&'a T> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    table
        .rows()
        .iter()
        .find(|row| normalize(row.name()) == wanted || normalize(row.bn_name()) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_db;

    fn ids<T: AdminEntity>(entities: &[&T]) -> Vec<u32> {
        entities.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_typed_lookups() {
        let db = sample_db();
        assert_eq!(db.division(6).map(|d| d.name.as_str()), Some("Dhaka"));
        assert_eq!(db.upazila_by_slug("gazipur-sadar").map(|u| u.id), Some(310));
        assert!(db.union(99).is_none());
        assert!(db.district_by_slug("Dhaka").is_none());
    }

    #[test]
    fn test_lookup_by_name_either_script() {
        let db = sample_db();
        assert_eq!(db.division_by_name("  dhaka").map(|d| d.id), Some(6));
        assert_eq!(db.district_by_name("খুলনা").map(|d| d.id), Some(27));
        assert_eq!(db.upazila_by_name("GAZIPUR   SADAR").map(|u| u.id), Some(310));
        assert!(db.upazila_by_name("gazipur").is_none());
        assert!(db.division_by_name(" ").is_none());
    }

    #[test]
    fn test_enumeration_every_level() {
        let db = sample_db();
        assert_eq!(ids(&db.districts_of_division(6)), vec![47, 48]);
        assert_eq!(ids(&db.districts_of_division_slug("khulna")), vec![27, 28]);
        assert_eq!(ids(&db.upazilas_of_district(27)), vec![120, 121]);
        assert_eq!(
            ids(&db.upazilas_of_division(6)),
            vec![300, 301, 302, 303, 310, 311]
        );
        assert_eq!(ids(&db.unions_of_upazila(300)), vec![1, 2, 3]);
        assert_eq!(ids(&db.unions_of_district(47)), vec![1, 2, 3, 4, 5]);
        assert_eq!(ids(&db.unions_of_division(8)), vec![8]);
    }

    #[test]
    fn test_enumeration_unknown_parent_is_empty() {
        let db = sample_db();
        assert!(db.districts_of_division(9).is_empty());
        assert!(db.districts_of_division_slug("nowhere").is_empty());
        assert!(db.unions_of_upazila(121).is_empty());
        assert!(db.unions_of_division(0).is_empty());
    }

    #[test]
    fn test_parent_accessors() {
        let db = sample_db();
        assert_eq!(db.division_of_district(64).map(|d| d.id), Some(8));
        assert_eq!(db.district_of_upazila(311).map(|d| d.id), Some(48));
        assert_eq!(db.upazila_of_union(8).map(|u| u.id), Some(480));
        assert!(db.upazila_of_union(100).is_none());
    }

    #[test]
    fn test_is_valid() {
        let db = sample_db();
        assert!(db.is_valid_division(8));
        assert!(!db.is_valid_division(9));
        assert!(!db.is_valid_division(0));
        // In range but absent from the dataset.
        assert!(!db.is_valid_district(2));
        assert!(db.is_valid_upazila(480));
        assert!(!db.is_valid_upazila(496));
        assert!(db.is_valid(AdminKind::Union, 8));
    }

    #[test]
    fn test_descendant_predicates() {
        let db = sample_db();
        assert!(db.is_district_in_division(47, 6));
        assert!(!db.is_district_in_division(47, 3));
        assert!(db.is_upazila_in_district(302, 47));
        assert!(db.is_upazila_in_division(311, 6));
        assert!(db.is_union_in_upazila(3, 300));
        assert!(db.is_union_in_district(6, 27));
        assert!(db.is_union_in_division(7, 1));
        assert!(!db.is_union_in_division(7, 6));
        assert!(!db.is_union_in_division(99, 6));
        // Kinds in the wrong order never match.
        assert!(!db.is_descendant_of(AdminKind::Division, 6, AdminKind::District, 47));
        assert!(!db.is_descendant_of(AdminKind::District, 47, AdminKind::District, 47));
    }

    #[test]
    fn test_full_address_not_found() {
        let db = sample_db();
        assert_eq!(
            db.full_address(494).unwrap_err(),
            NotFoundError {
                kind: AdminKind::Upazila,
                id: 494
            }
        );
        assert_eq!(
            db.full_address_of_union(4000).unwrap_err().to_string(),
            "union 4000 not found"
        );
    }

    #[test]
    fn test_full_address_paths() {
        let db = sample_db();
        let address = db.full_address(121).unwrap();
        assert_eq!(address.division.id, 3);
        assert_eq!(address.district.id, 27);
        assert!(address.union.is_none());

        let address = db.full_address_of_union(5).unwrap();
        assert_eq!(address.upazila.id, 302);
        assert_eq!(address.union.map(|u| u.id), Some(5));
    }

    #[test]
    fn test_options() {
        let db = sample_db();
        assert_eq!(db.division_options().len(), 8);
        let options = db.district_options(Some(6));
        assert_eq!(
            options[1],
            SelectOption {
                id: 48,
                value: "gazipur",
                label: "Gazipur",
                label_bn: "গাজীপুর",
            }
        );
        assert_eq!(db.upazila_options(None).len(), 19);
        assert!(db.union_options(Some(121)).is_empty());
    }

    #[test]
    fn test_names() {
        let db = sample_db();
        let names = db.names(AdminKind::Division, Lang::En);
        assert_eq!(names[0], "Chattagram");
        assert_eq!(names.len(), 8);
        assert_eq!(db.names(AdminKind::Division, Lang::Bn)[5], "ঢাকা");
    }
}
