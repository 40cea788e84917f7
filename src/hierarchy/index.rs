//! Parent/child index over the entity store.

use hashbrown::HashMap;
use tracing::info;

use crate::models::{AdminEntity, AdminKind};
use crate::store::{EntityStore, Table};

/// One parent → child link level (division→district, district→upazila, upazila→union).
#[derive(Debug, Clone, Default)]
struct Links {
    /// Child ids per parent id, in child declaration order. Every existing parent has an
    /// entry, possibly empty.
    children: HashMap<u32, Vec<u32>>,
    /// Parent id per child id.
    parent: HashMap<u32, u32>,
}

impl Links {
    fn build<P: AdminEntity, C: AdminEntity>(parents: &Table<P>, children: &Table<C>) -> Self {
        let mut links = Links {
            children: parents.rows().iter().map(|p| (p.id(), Vec::new())).collect(),
            parent: HashMap::with_capacity(children.len()),
        };

        for child in children.rows() {
            if let Some(parent_id) = child.parent_id() {
                links.parent.insert(child.id(), parent_id);
                links.children.entry(parent_id).or_default().push(child.id());
            }
        }

        links
    }
}

/// Bidirectional parent/child index, built once in O(N).
#[derive(Debug, Clone)]
pub struct HierarchyIndex {
    division_districts: Links,
    district_upazilas: Links,
    upazila_unions: Links,
}

impl HierarchyIndex {
    /// Build the index in one pass over the store.
    pub fn build(store: &EntityStore) -> Self {
        let index = Self {
            division_districts: Links::build(store.divisions(), store.districts()),
            district_upazilas: Links::build(store.districts(), store.upazilas()),
            upazila_unions: Links::build(store.upazilas(), store.unions()),
        };

        let childless = index
            .upazila_unions
            .children
            .values()
            .filter(|c| c.is_empty())
            .count();
        info!(
            "Hierarchy index built: {} parent links, {} upazilas without unions",
            index.division_districts.parent.len()
                + index.district_upazilas.parent.len()
                + index.upazila_unions.parent.len(),
            childless
        );

        index
    }

    /// Links whose parent level is `parent_kind`.
    fn links_below(&self, parent_kind: AdminKind) -> Option<&Links> {
        match parent_kind {
            AdminKind::Division => Some(&self.division_districts),
            AdminKind::District => Some(&self.district_upazilas),
            AdminKind::Upazila => Some(&self.upazila_unions),
            AdminKind::Union => None,
        }
    }

    /// Links whose child level is `child_kind`.
    fn links_above(&self, child_kind: AdminKind) -> Option<&Links> {
        self.links_below(child_kind.parent()?)
    }

    /// Direct child ids of a parent.
    ///
    /// `None` when the parent does not exist (or is a union, which has no child level);
    /// `Some(&[])` for an existing parent without children.
    pub fn children_of(&self, parent_kind: AdminKind, parent_id: u32) -> Option<&[u32]> {
        self.links_below(parent_kind)?
            .children
            .get(&parent_id)
            .map(Vec::as_slice)
    }

    pub fn parent_of(&self, child_kind: AdminKind, child_id: u32) -> Option<u32> {
        self.links_above(child_kind)?.parent.get(&child_id).copied()
    }

    /// Ancestors from the root down to the immediate parent.
    ///
    /// `None` for an unknown entity; `Some(vec![])` for a division.
    pub fn ancestors_of(&self, kind: AdminKind, id: u32) -> Option<Vec<(AdminKind, u32)>> {
        if kind == AdminKind::Division {
            return self
                .division_districts
                .children
                .contains_key(&id)
                .then(Vec::new);
        }

        let mut ancestors = Vec::with_capacity(kind.depth());
        let (mut current_kind, mut current_id) = (kind, id);
        while let Some(parent_kind) = current_kind.parent() {
            let parent_id = self.parent_of(current_kind, current_id)?;
            ancestors.push((parent_kind, parent_id));
            current_kind = parent_kind;
            current_id = parent_id;
        }
        ancestors.reverse();
        Some(ancestors)
    }

    /// The ancestor of `id` at level `ancestor_kind`.
    pub fn ancestor_at(
        &self,
        kind: AdminKind,
        id: u32,
        ancestor_kind: AdminKind,
    ) -> Option<u32> {
        if !ancestor_kind.is_above(kind) {
            return None;
        }
        let (mut current_kind, mut current_id) = (kind, id);
        while current_kind != ancestor_kind {
            current_id = self.parent_of(current_kind, current_id)?;
            current_kind = current_kind.parent()?;
        }
        Some(current_id)
    }

    /// All descendants of `id` at level `target_kind`, following each parent's child order.
    ///
    /// `None` when the entity is unknown or `target_kind` is not below `kind`.
    pub fn descendants_of(
        &self,
        kind: AdminKind,
        id: u32,
        target_kind: AdminKind,
    ) -> Option<Vec<u32>> {
        if !kind.is_above(target_kind) {
            return None;
        }

        let mut frontier = self.children_of(kind, id)?.to_vec();
        let mut level = kind.child()?;
        while level != target_kind {
            let links = self.links_below(level)?;
            frontier = frontier
                .iter()
                .filter_map(|parent| links.children.get(parent))
                .flatten()
                .copied()
                .collect();
            level = level.child()?;
        }
        Some(frontier)
    }
}
