//! Request parameters and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

use bd_address::{
    AdminKind, District, Division, DivisionStats, FormatOptions, FullAddress, Lang, PostalCode,
    PostalInfo, PostalResolution, SearchOptions, Stats, Union, Upazila,
};

#[derive(Deserialize)]
pub struct SearchQueryParams {
    /// Search text
    pub text: String,
    /// Kinds to search (comma-separated, e.g. "district,upazila")
    pub kinds: Option<String>,
    /// Restrict matching to one script: "en" or "bn"
    pub script: Option<String>,
    /// Maximum hits per kind
    pub limit: Option<usize>,
}

impl SearchQueryParams {
    pub fn options(&self) -> Result<SearchOptions, String> {
        let mut options = match &self.kinds {
            Some(kinds) => SearchOptions::kinds(&parse_kinds(kinds)?),
            None => SearchOptions::default(),
        };
        if let Some(script) = &self.script {
            options = options.script(script.parse()?);
        }
        if let Some(limit) = self.limit {
            options = options.limit(limit);
        }
        Ok(options)
    }
}

#[derive(Deserialize)]
pub struct TextQueryParams {
    pub text: String,
}

#[derive(Deserialize)]
pub struct AutocompleteQueryParams {
    pub text: String,
    /// Number of suggestions
    pub size: Option<usize>,
}

#[derive(Deserialize)]
pub struct AddressQueryParams {
    /// Separator between levels (defaults to ", ")
    pub sep: Option<String>,
    /// "en" or "bn"
    pub lang: Option<String>,
}

impl AddressQueryParams {
    pub fn options(&self) -> Result<FormatOptions, String> {
        let mut options = FormatOptions::default();
        if let Some(sep) = &self.sep {
            options.separator = sep.clone();
        }
        if let Some(lang) = &self.lang {
            options.lang = lang.parse::<Lang>()?;
        }
        Ok(options)
    }
}

#[derive(Deserialize)]
pub struct ValidateQueryParams {
    pub kind: String,
    pub id: u32,
    pub ancestor_kind: Option<String>,
    pub ancestor_id: Option<u32>,
}

impl ValidateQueryParams {
    /// The entity kind and, when both halves are present, the ancestor to test against.
    pub fn parse(&self) -> Result<(AdminKind, Option<(AdminKind, u32)>), String> {
        let kind = self.kind.parse()?;
        let ancestor = match (&self.ancestor_kind, self.ancestor_id) {
            (Some(ancestor_kind), Some(ancestor_id)) => Some((ancestor_kind.parse()?, ancestor_id)),
            (None, None) => None,
            _ => return Err("ancestor_kind and ancestor_id must be given together".to_string()),
        };
        Ok((kind, ancestor))
    }
}

/// Parse a comma-separated list of kinds, ignoring blanks.
pub fn parse_kinds(kinds: &str) -> Result<Vec<AdminKind>, String> {
    let parsed = kinds
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<AdminKind>, String>>()?;
    if parsed.is_empty() {
        return Err("kinds must name at least one kind".to_string());
    }
    Ok(parsed)
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub divisions: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub totals: Stats,
    pub divisions: Vec<DivisionStats>,
}

#[derive(Serialize)]
pub struct AddressResponse {
    pub formatted: String,
    pub division: Division,
    pub district: District,
    pub upazila: Upazila,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union: Option<Union>,
    pub postal: Option<PostalResolution>,
}

impl AddressResponse {
    pub fn new(
        address: &FullAddress<'_>,
        options: &FormatOptions,
        postal: Option<PostalResolution>,
    ) -> Self {
        Self {
            formatted: address.format(options),
            division: address.division.clone(),
            district: address.district.clone(),
            upazila: address.upazila.clone(),
            union: address.union.cloned(),
            postal,
        }
    }
}

#[derive(Serialize)]
pub struct UpazilaPostalResponse {
    pub upazila_id: u32,
    #[serde(flatten)]
    pub info: PostalInfo,
    pub resolution: PostalResolution,
}

#[derive(Serialize)]
pub struct PostalCodeResponse {
    pub code: PostalCode,
    pub upazilas: Vec<Upazila>,
    pub districts: Vec<District>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub kind: AdminKind,
    pub id: u32,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descendant: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(
            parse_kinds("district, upazilas,"),
            Ok(vec![AdminKind::District, AdminKind::Upazila])
        );
        assert!(parse_kinds("ward").is_err());
        assert!(parse_kinds(" , ").is_err());
    }

    #[test]
    fn test_search_options_from_params() {
        let params = SearchQueryParams {
            text: "dhaka".to_string(),
            kinds: Some("union".to_string()),
            script: Some("bn".to_string()),
            limit: Some(3),
        };
        let options = params.options().unwrap();
        assert_eq!(options.kinds, vec![AdminKind::Union]);
        assert_eq!(options.script, Some(Lang::Bn));
        assert_eq!(options.limit, Some(3));

        let params = SearchQueryParams {
            script: Some("fr".to_string()),
            ..params
        };
        assert!(params.options().is_err());
    }

    #[test]
    fn test_validate_params_need_both_ancestor_halves() {
        let params = ValidateQueryParams {
            kind: "union".to_string(),
            id: 1,
            ancestor_kind: Some("division".to_string()),
            ancestor_id: None,
        };
        assert!(params.parse().is_err());

        let params = ValidateQueryParams {
            ancestor_id: Some(6),
            ..params
        };
        assert_eq!(
            params.parse(),
            Ok((AdminKind::Union, Some((AdminKind::Division, 6))))
        );
    }
}
