//! Rendering a resolved hierarchy path as a single address line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{AdminEntity, District, Division, Lang, Union, Upazila};

/// A fully resolved path from a division down to an upazila and, optionally, a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FullAddress<'a> {
    pub division: &'a Division,
    pub district: &'a District,
    pub upazila: &'a Upazila,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union: Option<&'a Union>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub separator: String,
    pub lang: Lang,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: ", ".to_string(),
            lang: Lang::En,
        }
    }
}

impl<'a> FullAddress<'a> {
    /// Names from the most specific level up to the division.
    pub fn parts(&self, lang: Lang) -> Vec<&'a str> {
        let mut parts = Vec::with_capacity(4);
        if let Some(union) = self.union {
            parts.push(union.name_in(lang));
        }
        parts.push(self.upazila.name_in(lang));
        parts.push(self.district.name_in(lang));
        parts.push(self.division.name_in(lang));
        parts
    }

    pub fn format(&self, options: &FormatOptions) -> String {
        self.parts(options.lang).join(&options.separator)
    }

    pub fn format_english(&self) -> String {
        self.format(&FormatOptions::default())
    }

    pub fn format_bengali(&self) -> String {
        self.format(&FormatOptions {
            lang: Lang::Bn,
            ..FormatOptions::default()
        })
    }
}

impl fmt::Display for FullAddress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_english())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_db;

    #[test]
    fn test_most_specific_first() {
        let db = sample_db();
        let address = db.full_address(310).unwrap();
        assert_eq!(address.format_english(), "Gazipur Sadar, Gazipur, Dhaka");
        assert_eq!(address.format_bengali(), "গাজীপুর সদর, গাজীপুর, ঢাকা");
        assert_eq!(address.to_string(), address.format_english());
    }

    #[test]
    fn test_union_leads_when_present() {
        let db = sample_db();
        let address = db.full_address_of_union(6).unwrap();
        assert_eq!(address.format_english(), "Atlia, Dumuria, Khulna, Khulna");
    }

    #[test]
    fn test_custom_separator() {
        let db = sample_db();
        let address = db.full_address(300).unwrap();
        let options = FormatOptions {
            separator: " / ".to_string(),
            lang: Lang::Bn,
        };
        assert_eq!(address.format(&options), "সাভার / ঢাকা / ঢাকা");
    }
}
