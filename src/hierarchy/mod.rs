//! Structural index over the administrative hierarchy.
//!
//! Answers parent/child and ancestor/descendant questions without re-scanning the dataset.

mod index;

pub use index::HierarchyIndex;
