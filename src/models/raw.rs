//! Raw dataset records as they appear in the JSON fixture.
//!
//! Every field is optional here so that a missing field surfaces as a
//! [`DatasetError::MissingField`](crate::error::DatasetError) naming the record, instead of an
//! opaque deserialization failure. Validation into typed entities happens in
//! [`EntityStore::load`](crate::store::EntityStore::load).

use serde::{Deserialize, Serialize};

/// An id that may be written as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            RawId::Number(n) => u32::try_from(*n).ok(),
            RawId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A postal code written as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPostalCode {
    Number(u64),
    Text(String),
}

impl RawPostalCode {
    pub fn as_text(&self) -> String {
        match self {
            RawPostalCode::Number(n) => n.to_string(),
            RawPostalCode::Text(s) => s.clone(),
        }
    }
}

/// District postal range: `"1000-1999"`, a single code, or a `{from, to}` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPostalRange {
    Text(String),
    Code(u64),
    Bounds {
        #[serde(alias = "min", alias = "start")]
        from: RawPostalCode,
        #[serde(alias = "max", alias = "end")]
        to: RawPostalCode,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDivision {
    pub id: Option<RawId>,
    pub name: Option<String>,
    #[serde(alias = "bnName")]
    pub bn_name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDistrict {
    pub id: Option<RawId>,
    #[serde(alias = "divisionId")]
    pub division_id: Option<RawId>,
    pub name: Option<String>,
    #[serde(alias = "bnName")]
    pub bn_name: Option<String>,
    pub slug: Option<String>,
    #[serde(alias = "postalRange", alias = "post_code")]
    pub postal_range: Option<RawPostalRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUpazila {
    pub id: Option<RawId>,
    #[serde(alias = "districtId")]
    pub district_id: Option<RawId>,
    pub name: Option<String>,
    #[serde(alias = "bnName")]
    pub bn_name: Option<String>,
    pub slug: Option<String>,
    #[serde(alias = "postalCode", alias = "post_code")]
    pub postal_code: Option<RawPostalCode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUnion {
    pub id: Option<RawId>,
    #[serde(alias = "upazilaId")]
    pub upazila_id: Option<RawId>,
    pub name: Option<String>,
    #[serde(alias = "bnName")]
    pub bn_name: Option<String>,
    pub slug: Option<String>,
}

/// The four record collections of a dataset, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDataset {
    #[serde(default)]
    pub divisions: Vec<RawDivision>,
    #[serde(default)]
    pub districts: Vec<RawDistrict>,
    #[serde(default)]
    pub upazilas: Vec<RawUpazila>,
    #[serde(default)]
    pub unions: Vec<RawUnion>,
}
