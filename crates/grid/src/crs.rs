//! Coordinate reference system tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque coordinate reference system identifier, e.g. `"EPSG:32650"`.
///
/// The pipeline never reprojects; the tag exists so that grids from
/// different sources can refuse to be combined when their reference
/// systems disagree. Comparison is an exact, case-sensitive string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crs(String);

impl Crs {
    /// Creates a CRS tag from an identifier such as an EPSG code.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The tag assigned to rasters whose source carries no reference
    /// system of its own. Local grids only combine with other local
    /// grids.
    pub fn local() -> Self {
        Self("LOCAL".to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Crs {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_is_exact() {
        assert_eq!(Crs::new("EPSG:32650"), Crs::from("EPSG:32650"));
        assert_ne!(Crs::new("EPSG:32650"), Crs::new("epsg:32650"));
        assert_ne!(Crs::new("EPSG:32650"), Crs::local());
    }

    #[test]
    fn displays_the_identifier() {
        assert_eq!(Crs::new("EPSG:4326").to_string(), "EPSG:4326");
        assert_eq!(Crs::local().as_str(), "LOCAL");
    }
}
