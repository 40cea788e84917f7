//! Error types for dataset loading and terminal lookups.

use thiserror::Error;

use crate::models::AdminKind;

/// Structural defect in the reference dataset, raised only while loading.
///
/// Record positions are zero-based indices into the kind's collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("{kind} record #{index} is missing required field '{field}'")]
    MissingField {
        kind: AdminKind,
        index: usize,
        field: &'static str,
    },

    #[error("{kind} record #{index} has a non-numeric '{field}'")]
    InvalidField {
        kind: AdminKind,
        index: usize,
        field: &'static str,
    },

    #[error("{kind} record #{index} has an empty '{field}'")]
    EmptyField {
        kind: AdminKind,
        index: usize,
        field: &'static str,
    },

    #[error("{kind} record #{index} has id {id} outside the declared range")]
    IdOutOfRange { kind: AdminKind, index: usize, id: u32 },

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: AdminKind, id: u32 },

    #[error("duplicate {kind} slug '{slug}'")]
    DuplicateSlug { kind: AdminKind, slug: String },

    #[error("{kind} {id} references nonexistent {parent_kind} {parent_id}")]
    DanglingParent {
        kind: AdminKind,
        id: u32,
        parent_kind: AdminKind,
        parent_id: u32,
    },

    #[error("{kind} {id} has invalid postal data: {reason}")]
    InvalidPostal {
        kind: AdminKind,
        id: u32,
        reason: String,
    },
}

/// A terminal lookup was given an id that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    pub kind: AdminKind,
    pub id: u32,
}
