//! Reading the raw reference dataset from disk.
//!
//! A dataset is either a directory holding `divisions.json`, `districts.json`,
//! `upazilas.json` and `unions.json` (each a JSON array), or a single JSON file with those
//! four arrays under the keys `divisions`, `districts`, `upazilas` and `unions`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::models::RawDataset;

pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<RawDataset> {
    let path = path.as_ref();
    let dataset = if path.is_dir() {
        RawDataset {
            divisions: read_json(&path.join("divisions.json"))?,
            districts: read_json(&path.join("districts.json"))?,
            upazilas: read_json(&path.join("upazilas.json"))?,
            unions: read_json(&path.join("unions.json"))?,
        }
    } else {
        read_json(path)?
    };

    info!(
        "Read dataset from {}: {} divisions, {} districts, {} upazilas, {} unions",
        path.display(),
        dataset.divisions.len(),
        dataset.districts.len(),
        dataset.upazilas.len(),
        dataset.unions.len()
    );
    Ok(dataset)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
