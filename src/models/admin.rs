//! Administrative level types for the Division → District → Upazila → Union hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// The four levels of the Bangladesh administrative hierarchy, root first.
///
/// The derived ordering follows the hierarchy: `Division < District < Upazila < Union`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AdminKind {
    /// Top-level region (বিভাগ)
    Division,
    /// Second level (জেলা)
    District,
    /// Sub-district (উপজেলা)
    Upazila,
    /// Smallest unit (ইউনিয়ন)
    Union,
}

impl AdminKind {
    /// Get all kinds in hierarchical order (division first)
    pub fn all() -> &'static [AdminKind] {
        &[
            AdminKind::Division,
            AdminKind::District,
            AdminKind::Upazila,
            AdminKind::Union,
        ]
    }

    /// Depth in the hierarchy, 0 for divisions.
    pub fn depth(&self) -> usize {
        match self {
            AdminKind::Division => 0,
            AdminKind::District => 1,
            AdminKind::Upazila => 2,
            AdminKind::Union => 3,
        }
    }

    /// The kind one level up, `None` for divisions.
    pub fn parent(&self) -> Option<AdminKind> {
        match self {
            AdminKind::Division => None,
            AdminKind::District => Some(AdminKind::Division),
            AdminKind::Upazila => Some(AdminKind::District),
            AdminKind::Union => Some(AdminKind::Upazila),
        }
    }

    /// The kind one level down, `None` for unions.
    pub fn child(&self) -> Option<AdminKind> {
        match self {
            AdminKind::Division => Some(AdminKind::District),
            AdminKind::District => Some(AdminKind::Upazila),
            AdminKind::Upazila => Some(AdminKind::Union),
            AdminKind::Union => None,
        }
    }

    /// True if `self` sits strictly above `other` in the hierarchy.
    pub fn is_above(&self, other: AdminKind) -> bool {
        self.depth() < other.depth()
    }

    /// Declared id range for this kind.
    ///
    /// Range membership alone does not make an id valid; it must also be present in the
    /// loaded dataset.
    pub fn id_range(&self) -> RangeInclusive<u32> {
        match self {
            AdminKind::Division => 1..=8,
            AdminKind::District => 1..=64,
            AdminKind::Upazila => 1..=495,
            AdminKind::Union => 1..=u32::MAX,
        }
    }

    /// Get the field name for this kind
    pub fn field_name(&self) -> &'static str {
        match self {
            AdminKind::Division => "division",
            AdminKind::District => "district",
            AdminKind::Upazila => "upazila",
            AdminKind::Union => "union",
        }
    }

    /// Name of the parent reference field in raw records.
    pub fn parent_field(&self) -> Option<&'static str> {
        match self {
            AdminKind::Division => None,
            AdminKind::District => Some("division_id"),
            AdminKind::Upazila => Some("district_id"),
            AdminKind::Union => Some("upazila_id"),
        }
    }
}

impl fmt::Display for AdminKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for AdminKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "division" | "divisions" => Ok(AdminKind::Division),
            "district" | "districts" => Ok(AdminKind::District),
            "upazila" | "upazilas" => Ok(AdminKind::Upazila),
            "union" | "unions" => Ok(AdminKind::Union),
            other => Err(format!("unknown admin kind '{}'", other)),
        }
    }
}

/// Script of a name: English (Latin) or Bengali.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Bn,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Bn => "bn",
        }
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Lang::En),
            "bn" | "bengali" | "bangla" => Ok(Lang::Bn),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}
