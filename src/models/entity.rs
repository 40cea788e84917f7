//! Typed, validated entities of the four administrative levels.

use serde::Serialize;

use super::{AdminKind, Lang, PostalCode, PostalRange};

/// Common view over the four entity types.
pub trait AdminEntity {
    const KIND: AdminKind;

    fn id(&self) -> u32;
    fn name(&self) -> &str;
    fn bn_name(&self) -> &str;
    fn slug(&self) -> &str;

    /// Id of the parent entity, `None` for divisions.
    fn parent_id(&self) -> Option<u32>;

    fn name_in(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => self.name(),
            Lang::Bn => self.bn_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Division {
    pub id: u32,
    pub name: String,
    pub bn_name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct District {
    pub id: u32,
    pub division_id: u32,
    pub name: String,
    pub bn_name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_range: Option<PostalRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upazila {
    pub id: u32,
    pub district_id: u32,
    pub name: String,
    pub bn_name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<PostalCode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Union {
    pub id: u32,
    pub upazila_id: u32,
    pub name: String,
    pub bn_name: String,
    pub slug: String,
}

macro_rules! impl_admin_entity {
    ($ty:ty, $kind:expr $(, $parent:ident)?) => {
        impl AdminEntity for $ty {
            const KIND: AdminKind = $kind;

            fn id(&self) -> u32 {
                self.id
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn bn_name(&self) -> &str {
                &self.bn_name
            }

            fn slug(&self) -> &str {
                &self.slug
            }

            fn parent_id(&self) -> Option<u32> {
                None $(.or(Some(self.$parent)))?
            }
        }
    };
}

impl_admin_entity!(Division, AdminKind::Division);
impl_admin_entity!(District, AdminKind::District, division_id);
impl_admin_entity!(Upazila, AdminKind::Upazila, district_id);
impl_admin_entity!(Union, AdminKind::Union, upazila_id);

macro_rules! each_ref {
    ($value:expr, $e:ident => $body:expr) => {
        match $value {
            EntityRef::Division($e) => $body,
            EntityRef::District($e) => $body,
            EntityRef::Upazila($e) => $body,
            EntityRef::Union($e) => $body,
        }
    };
}

/// A borrowed entity of any kind, as returned by the kind-generic accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRef<'a> {
    Division(&'a Division),
    District(&'a District),
    Upazila(&'a Upazila),
    Union(&'a Union),
}

impl<'a> EntityRef<'a> {
    pub fn kind(&self) -> AdminKind {
        match self {
            EntityRef::Division(_) => AdminKind::Division,
            EntityRef::District(_) => AdminKind::District,
            EntityRef::Upazila(_) => AdminKind::Upazila,
            EntityRef::Union(_) => AdminKind::Union,
        }
    }

    pub fn id(&self) -> u32 {
        each_ref!(*self, e => e.id)
    }

    pub fn name(&self) -> &'a str {
        each_ref!(*self, e => e.name.as_str())
    }

    pub fn bn_name(&self) -> &'a str {
        each_ref!(*self, e => e.bn_name.as_str())
    }

    pub fn slug(&self) -> &'a str {
        each_ref!(*self, e => e.slug.as_str())
    }

    pub fn parent_id(&self) -> Option<u32> {
        each_ref!(*self, e => e.parent_id())
    }

    pub fn name_in(&self, lang: Lang) -> &'a str {
        match lang {
            Lang::En => self.name(),
            Lang::Bn => self.bn_name(),
        }
    }
}

macro_rules! impl_from_ref {
    ($ty:ident) => {
        impl<'a> From<&'a $ty> for EntityRef<'a> {
            fn from(e: &'a $ty) -> Self {
                EntityRef::$ty(e)
            }
        }
    };
}

impl_from_ref!(Division);
impl_from_ref!(District);
impl_from_ref!(Upazila);
impl_from_ref!(Union);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_accessors() {
        let upazila = Upazila {
            id: 300,
            district_id: 47,
            name: "Savar".into(),
            bn_name: "সাভার".into(),
            slug: "savar".into(),
            postal_code: "1340".parse().ok(),
        };
        let r = EntityRef::from(&upazila);
        assert_eq!(r.kind(), AdminKind::Upazila);
        assert_eq!(r.id(), 300);
        assert_eq!(r.parent_id(), Some(47));
        assert_eq!(r.name_in(Lang::Bn), "সাভার");
        assert_eq!(r.slug(), "savar");
    }
}
