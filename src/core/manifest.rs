use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Filter attributes the controller knows how to turn into controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterAttribute {
    Nationality,
    Sex,
    Semester,
}

impl FilterAttribute {
    /// Recognized attributes in control order.
    pub const ALL: [Self; 3] = [Self::Nationality, Self::Sex, Self::Semester];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nationality => "nationality",
            Self::Sex => "sex",
            Self::Semester => "semester",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attribute| attribute.name() == name)
    }
}

impl fmt::Display for FilterAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dataset metadata fetched once per session.
///
/// `attributes` keeps manifest order for both attribute names and their values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: String,
    pub file: String,
    #[serde(default)]
    pub attributes: IndexMap<String, Vec<String>>,
}

impl Manifest {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Values offered for `attribute`, or `None` when the manifest omits it.
    #[must_use]
    pub fn filter_values(&self, attribute: FilterAttribute) -> Option<&[String]> {
        self.attributes.get(attribute.name()).map(Vec::as_slice)
    }

    /// Recognized attributes present in the manifest, in control order.
    pub fn filter_attributes(&self) -> impl Iterator<Item = FilterAttribute> + '_ {
        FilterAttribute::ALL
            .into_iter()
            .filter(|attribute| self.attributes.contains_key(attribute.name()))
    }
}
