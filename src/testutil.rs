//! Shared fixtures for unit tests.

use crate::db::AddressDb;
use crate::models::RawDataset;
use crate::search::SearchConfig;

pub fn sample_raw() -> RawDataset {
    RawDataset {
        divisions: parse(include_str!("../data/sample/divisions.json")),
        districts: parse(include_str!("../data/sample/districts.json")),
        upazilas: parse(include_str!("../data/sample/upazilas.json")),
        unions: parse(include_str!("../data/sample/unions.json")),
    }
}

pub fn sample_db() -> AddressDb {
    AddressDb::build(&sample_raw(), SearchConfig::default()).unwrap()
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Vec<T> {
    serde_json::from_str(json).unwrap()
}
