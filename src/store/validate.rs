//! Validated construction of typed entities from raw records.

use crate::error::DatasetError;
use crate::models::raw::{RawId, RawPostalCode, RawPostalRange};
use crate::models::{
    AdminKind, District, Division, PostalCode, PostalRange, RawDistrict, RawDivision, RawUnion,
    RawUpazila, Union, Upazila,
};

/// Field accessor bound to one record, so errors carry kind and position.
struct Record {
    kind: AdminKind,
    index: usize,
}

impl Record {
    fn id(&self, field: &'static str, value: &Option<RawId>) -> Result<u32, DatasetError> {
        let raw = value.as_ref().ok_or(DatasetError::MissingField {
            kind: self.kind,
            index: self.index,
            field,
        })?;
        raw.as_u32().ok_or(DatasetError::InvalidField {
            kind: self.kind,
            index: self.index,
            field,
        })
    }

    /// The record's own id, checked against the kind's declared range.
    fn own_id(&self, value: &Option<RawId>) -> Result<u32, DatasetError> {
        let id = self.id("id", value)?;
        if !self.kind.id_range().contains(&id) {
            return Err(DatasetError::IdOutOfRange {
                kind: self.kind,
                index: self.index,
                id,
            });
        }
        Ok(id)
    }

    fn text(&self, field: &'static str, value: &Option<String>) -> Result<String, DatasetError> {
        let raw = value.as_deref().ok_or(DatasetError::MissingField {
            kind: self.kind,
            index: self.index,
            field,
        })?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DatasetError::EmptyField {
                kind: self.kind,
                index: self.index,
                field,
            });
        }
        Ok(trimmed.to_string())
    }
}

fn invalid_postal(kind: AdminKind, id: u32, reason: String) -> DatasetError {
    DatasetError::InvalidPostal { kind, id, reason }
}

/// Blank strings count as absent postal data.
fn postal_code(id: u32, raw: &Option<RawPostalCode>) -> Result<Option<PostalCode>, DatasetError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let text = raw.as_text();
    if text.trim().is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|reason| invalid_postal(AdminKind::Upazila, id, reason))
}

fn postal_range(id: u32, raw: &Option<RawPostalRange>) -> Result<Option<PostalRange>, DatasetError> {
    let invalid = |reason: String| invalid_postal(AdminKind::District, id, reason);

    match raw {
        None => Ok(None),
        Some(RawPostalRange::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawPostalRange::Text(text)) => text.parse().map(Some).map_err(invalid),
        Some(RawPostalRange::Code(code)) => code.to_string().parse().map(Some).map_err(invalid),
        Some(RawPostalRange::Bounds { from, to }) => {
            let start: PostalCode = from.as_text().parse().map_err(invalid)?;
            let end: PostalCode = to.as_text().parse().map_err(invalid)?;
            PostalRange::new(start, end)
                .map(Some)
                .ok_or_else(|| invalid(format!("range {}-{} ends before it starts", start, end)))
        }
    }
}

pub fn division(index: usize, raw: &RawDivision) -> Result<Division, DatasetError> {
    let r = Record {
        kind: AdminKind::Division,
        index,
    };
    Ok(Division {
        id: r.own_id(&raw.id)?,
        name: r.text("name", &raw.name)?,
        bn_name: r.text("bn_name", &raw.bn_name)?,
        slug: r.text("slug", &raw.slug)?,
    })
}

pub fn district(index: usize, raw: &RawDistrict) -> Result<District, DatasetError> {
    let r = Record {
        kind: AdminKind::District,
        index,
    };
    let id = r.own_id(&raw.id)?;
    Ok(District {
        id,
        division_id: r.id("division_id", &raw.division_id)?,
        name: r.text("name", &raw.name)?,
        bn_name: r.text("bn_name", &raw.bn_name)?,
        slug: r.text("slug", &raw.slug)?,
        postal_range: postal_range(id, &raw.postal_range)?,
    })
}

pub fn upazila(index: usize, raw: &RawUpazila) -> Result<Upazila, DatasetError> {
    let r = Record {
        kind: AdminKind::Upazila,
        index,
    };
    let id = r.own_id(&raw.id)?;
    Ok(Upazila {
        id,
        district_id: r.id("district_id", &raw.district_id)?,
        name: r.text("name", &raw.name)?,
        bn_name: r.text("bn_name", &raw.bn_name)?,
        slug: r.text("slug", &raw.slug)?,
        postal_code: postal_code(id, &raw.postal_code)?,
    })
}

pub fn union(index: usize, raw: &RawUnion) -> Result<Union, DatasetError> {
    let r = Record {
        kind: AdminKind::Union,
        index,
    };
    Ok(Union {
        id: r.own_id(&raw.id)?,
        upazila_id: r.id("upazila_id", &raw.upazila_id)?,
        name: r.text("name", &raw.name)?,
        bn_name: r.text("bn_name", &raw.bn_name)?,
        slug: r.text("slug", &raw.slug)?,
    })
}
