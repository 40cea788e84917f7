//! Postal codes, district postal ranges and the resolution result.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A four-digit Bangladesh postal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostalCode(u16);

impl PostalCode {
    pub fn new(code: u16) -> Option<Self> {
        (1000..=9999).contains(&code).then_some(Self(code))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl FromStr for PostalCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("'{}' is not a four-digit postal code", s));
        }
        s.parse::<u16>()
            .ok()
            .and_then(PostalCode::new)
            .ok_or_else(|| format!("'{}' is not a valid postal code", s))
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PostalCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inclusive postal range of a district, e.g. `1000-1399`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostalRange {
    pub start: PostalCode,
    pub end: PostalCode,
}

impl PostalRange {
    pub fn new(start: PostalCode, end: PostalCode) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, code: PostalCode) -> bool {
        self.start <= code && code <= self.end
    }
}

impl FromStr for PostalRange {
    type Err = String;

    /// Accepts `"1000-1999"` or a single code `"1000"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((start, end)) => {
                let start: PostalCode = start.parse()?;
                let end: PostalCode = end.parse()?;
                PostalRange::new(start, end)
                    .ok_or_else(|| format!("postal range '{}' ends before it starts", s.trim()))
            }
            None => {
                let code: PostalCode = s.parse()?;
                Ok(PostalRange {
                    start: code,
                    end: code,
                })
            }
        }
    }
}

impl fmt::Display for PostalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl Serialize for PostalRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Postal data for one upazila.
///
/// `district_range` is reported alongside the (possibly absent) specific code so callers can
/// tell "no own code, but the district range is known" from "no postal data at all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostalInfo {
    pub code: Option<PostalCode>,
    pub district_range: Option<PostalRange>,
}

impl PostalInfo {
    pub fn resolution(&self) -> PostalResolution {
        match (self.code, self.district_range) {
            (Some(code), district_range) => PostalResolution::Specific {
                code,
                district_range,
            },
            (None, Some(range)) => PostalResolution::RangeOnly {
                district_range: range,
            },
            (None, None) => PostalResolution::None,
        }
    }
}

/// Outcome of resolving postal data through the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostalResolution {
    /// The upazila (or the union's upazila) carries its own code.
    Specific {
        code: PostalCode,
        district_range: Option<PostalRange>,
    },
    /// No specific code; only the district's range is known.
    RangeOnly { district_range: PostalRange },
    /// No postal data anywhere on the path.
    None,
}

impl PostalResolution {
    pub fn code(&self) -> Option<PostalCode> {
        match self {
            PostalResolution::Specific { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PostalResolution::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code() {
        assert_eq!("1340".parse::<PostalCode>().map(|c| c.value()), Ok(1340));
        assert!("134".parse::<PostalCode>().is_err());
        assert!("13a0".parse::<PostalCode>().is_err());
        assert!("0999".parse::<PostalCode>().is_err());
    }

    #[test]
    fn test_parse_range() {
        let range: PostalRange = "1000-1399".parse().unwrap();
        assert_eq!(range.to_string(), "1000-1399");
        assert!(range.contains("1340".parse().unwrap()));
        assert!(!range.contains("1400".parse().unwrap()));

        let single: PostalRange = "3530".parse().unwrap();
        assert_eq!(single.start, single.end);
        assert_eq!(single.to_string(), "3530");

        assert!("1999-1000".parse::<PostalRange>().is_err());
    }

    #[test]
    fn test_resolution_variants() {
        let code: PostalCode = "1340".parse().unwrap();
        let range: PostalRange = "1000-1399".parse().unwrap();

        let specific = PostalInfo {
            code: Some(code),
            district_range: Some(range),
        };
        assert_eq!(specific.resolution().code(), Some(code));

        let range_only = PostalInfo {
            code: None,
            district_range: Some(range),
        };
        assert_eq!(
            range_only.resolution(),
            PostalResolution::RangeOnly {
                district_range: range
            }
        );

        let nothing = PostalInfo {
            code: None,
            district_range: None,
        };
        assert!(nothing.resolution().is_none());
    }
}
