//! Core data models for the address hierarchy.

pub mod admin;
pub mod entity;
pub mod postal;
pub mod raw;

pub use admin::{AdminKind, Lang};
pub use entity::{AdminEntity, District, Division, EntityRef, Union, Upazila};
pub use postal::{PostalCode, PostalInfo, PostalRange, PostalResolution};
pub use raw::{RawDataset, RawDistrict, RawDivision, RawUnion, RawUpazila};
