//! Postal code resolution with district-range fallback.
//!
//! Codes are only ever read from the dataset: an upazila either carries one or it does not,
//! and unions share their upazila's code. Nothing is interpolated from a district range.

use tracing::debug;

use crate::db::AddressDb;
use crate::models::{AdminKind, District, PostalCode, PostalInfo, PostalRange, PostalResolution, Upazila};

impl AddressDb {
    pub fn upazila_postal_code(&self, upazila_id: u32) -> Option<PostalCode> {
        self.upazila(upazila_id)?.postal_code
    }

    pub fn union_postal_code(&self, union_id: u32) -> Option<PostalCode> {
        self.upazila_postal_code(self.union(union_id)?.upazila_id)
    }

    /// Specific code of an upazila or union; divisions and districts never have one.
    pub fn postal_code_of(&self, kind: AdminKind, id: u32) -> Option<PostalCode> {
        match kind {
            AdminKind::Upazila => self.upazila_postal_code(id),
            AdminKind::Union => self.union_postal_code(id),
            AdminKind::Division | AdminKind::District => None,
        }
    }

    pub fn district_postal_range(&self, district_id: u32) -> Option<&PostalRange> {
        self.district(district_id)?.postal_range.as_ref()
    }

    /// The upazila's own code and its district's range. `None` only for an unknown upazila.
    pub fn postal_info(&self, upazila_id: u32) -> Option<PostalInfo> {
        let upazila = self.upazila(upazila_id)?;
        Some(PostalInfo {
            code: upazila.postal_code,
            district_range: self.district_postal_range(upazila.district_id).copied(),
        })
    }

    /// Postal data for a district, upazila or union. `None` for divisions and unknown ids.
    pub fn resolve_postal(&self, kind: AdminKind, id: u32) -> Option<PostalResolution> {
        let resolution = match kind {
            AdminKind::Division => return None,
            AdminKind::District => match self.district(id)?.postal_range {
                Some(range) => PostalResolution::RangeOnly {
                    district_range: range,
                },
                None => PostalResolution::None,
            },
            AdminKind::Upazila => self.postal_info(id)?.resolution(),
            AdminKind::Union => self.postal_info(self.union(id)?.upazila_id)?.resolution(),
        };
        debug!("Resolved postal data for {} {}: {:?}", kind, id, resolution);
        Some(resolution)
    }

    /// Upazilas whose own code is `code`, in declaration order.
    pub fn upazilas_with_postal_code(&self, code: PostalCode) -> Vec<&Upazila> {
        self.upazilas()
            .iter()
            .filter(|upazila| upazila.postal_code == Some(code))
            .collect()
    }

    /// Districts whose range contains `code`.
    pub fn districts_covering(&self, code: PostalCode) -> Vec<&District> {
        self.districts()
            .iter()
            .filter(|district| district.postal_range.is_some_and(|r| r.contains(code)))
            .collect()
    }
}
