//! Search result types.

use serde::{Deserialize, Serialize};

use crate::models::{AdminKind, Lang};

/// One matched entity, annotated with its kind and the script that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub kind: AdminKind,
    pub id: u32,
    pub slug: String,
    pub name: String,
    pub bn_name: String,
    pub matched: Lang,
}

/// A fuzzy match with its edit distance to the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuzzyHit {
    #[serde(flatten)]
    pub hit: SearchHit,
    pub distance: usize,
}

/// Substring search results grouped by kind, each group in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub divisions: Vec<SearchHit>,
    pub districts: Vec<SearchHit>,
    pub upazilas: Vec<SearchHit>,
    pub unions: Vec<SearchHit>,
}

impl SearchResults {
    pub fn of_kind(&self, kind: AdminKind) -> &[SearchHit] {
        match kind {
            AdminKind::Division => &self.divisions,
            AdminKind::District => &self.districts,
            AdminKind::Upazila => &self.upazilas,
            AdminKind::Union => &self.unions,
        }
    }

    pub(crate) fn group_mut(&mut self, kind: AdminKind) -> &mut Vec<SearchHit> {
        match kind {
            AdminKind::Division => &mut self.divisions,
            AdminKind::District => &mut self.districts,
            AdminKind::Upazila => &mut self.upazilas,
            AdminKind::Union => &mut self.unions,
        }
    }

    /// All hits, divisions first.
    pub fn iter(&self) -> impl Iterator<Item = &SearchHit> {
        self.divisions
            .iter()
            .chain(&self.districts)
            .chain(&self.upazilas)
            .chain(&self.unions)
    }

    pub fn total(&self) -> usize {
        self.divisions.len() + self.districts.len() + self.upazilas.len() + self.unions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Options for substring search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Kinds to search, in result order.
    pub kinds: Vec<AdminKind>,
    /// Restrict matching to one script.
    pub script: Option<Lang>,
    /// Maximum hits per kind.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            kinds: vec![AdminKind::Division, AdminKind::District, AdminKind::Upazila],
            script: None,
            limit: None,
        }
    }
}

impl SearchOptions {
    pub fn kinds(kinds: &[AdminKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            ..Self::default()
        }
    }

    pub fn script(mut self, script: Lang) -> Self {
        self.script = Some(script);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
