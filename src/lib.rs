//! bd-address - In-memory resolution and search over the Bangladesh administrative hierarchy.
//!
//! This library holds the shared types and indices used by the query server and the dataset
//! check binary. Build an [`AddressDb`] once from a [`RawDataset`] and query it from any
//! number of threads.

pub mod config;
pub mod dataset;
pub mod db;
pub mod error;
pub mod format;
pub mod hierarchy;
pub mod lookup;
pub mod models;
pub mod postal;
pub mod search;
pub mod stats;
pub mod store;

#[cfg(test)]
mod testutil;

pub use config::Config;
pub use dataset::load_dataset;
pub use db::AddressDb;
pub use error::{DatasetError, NotFoundError};
pub use format::{FormatOptions, FullAddress};
pub use hierarchy::HierarchyIndex;
pub use lookup::SelectOption;
pub use models::{
    AdminEntity, AdminKind, District, Division, EntityRef, Lang, PostalCode, PostalInfo,
    PostalRange, PostalResolution, RawDataset, Union, Upazila,
};
pub use search::{FuzzyHit, SearchConfig, SearchHit, SearchOptions, SearchResults};
pub use stats::{DivisionStats, Stats};
pub use store::EntityStore;
