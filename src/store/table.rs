//! Per-kind entity table with id and slug indices.

use hashbrown::HashMap;

use crate::error::DatasetError;
use crate::models::AdminEntity;

/// Entities of one kind in declaration order, indexed by id and slug.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
    by_id: HashMap<u32, usize>,
    by_slug: HashMap<String, usize>,
}

impl<T: AdminEntity> Table<T> {
    /// Build the indices, rejecting duplicate ids and slugs.
    pub fn build(rows: Vec<T>) -> Result<Self, DatasetError> {
        let mut by_id = HashMap::with_capacity(rows.len());
        let mut by_slug = HashMap::with_capacity(rows.len());

        for (pos, row) in rows.iter().enumerate() {
            if by_id.insert(row.id(), pos).is_some() {
                return Err(DatasetError::DuplicateId {
                    kind: T::KIND,
                    id: row.id(),
                });
            }
            if by_slug.insert(row.slug().to_string(), pos).is_some() {
                return Err(DatasetError::DuplicateSlug {
                    kind: T::KIND,
                    slug: row.slug().to_string(),
                });
            }
        }

        Ok(Self {
            rows,
            by_id,
            by_slug,
        })
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.by_id.get(&id).map(|&pos| &self.rows[pos])
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&T> {
        self.by_slug.get(slug).map(|&pos| &self.rows[pos])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Declaration position of an id.
    pub fn position(&self, id: u32) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// All rows in declaration order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdminKind, Division};

    fn division(id: u32, slug: &str) -> Division {
        Division {
            id,
            name: slug.to_string(),
            bn_name: slug.to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn test_lookup_by_id_and_slug() {
        let table = Table::build(vec![division(6, "dhaka"), division(3, "khulna")]).unwrap();
        assert_eq!(table.get(3).map(|d| d.slug.as_str()), Some("khulna"));
        assert_eq!(table.get_by_slug("dhaka").map(|d| d.id), Some(6));
        assert_eq!(table.position(3), Some(1));
        assert!(table.get(1).is_none());
        assert!(table.get_by_slug("Dhaka").is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Table::build(vec![division(6, "dhaka"), division(6, "dacca")]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::DuplicateId {
                kind: AdminKind::Division,
                id: 6
            }
        );
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = Table::build(vec![division(6, "dhaka"), division(7, "dhaka")]).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateSlug { .. }));
    }
}
