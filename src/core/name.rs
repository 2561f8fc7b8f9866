use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MatchError;

/// The kind of authority heading a [`Name`] represents.
///
/// The type selects both the scoring function and the threshold table used to
/// categorize a score. Raw type strings are parsed with [`FromStr`]; anything
/// outside the four known values is rejected with
/// [`MatchError::UnsupportedNameType`] before a `Name` can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NameType {
    Personal,
    Family,
    Corporate,
    Meeting,
}

impl NameType {
    pub const ALL: [NameType; 4] = [
        NameType::Personal,
        NameType::Family,
        NameType::Corporate,
        NameType::Meeting,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Family => "family",
            Self::Corporate => "corporate",
            Self::Meeting => "meeting",
        }
    }
}

impl std::fmt::Display for NameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NameType {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(Self::Personal),
            "family" => Ok(Self::Family),
            "corporate" => Ok(Self::Corporate),
            "meeting" => Ok(Self::Meeting),
            other => Err(MatchError::UnsupportedNameType(other.to_string())),
        }
    }
}

impl TryFrom<String> for NameType {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NameType> for String {
    fn from(value: NameType) -> Self {
        value.as_str().to_string()
    }
}

/// An authority name record as consumed by the matching engine.
///
/// Only the fields relevant to the record's [`NameType`] are read: personal
/// names use `surname`, `forename` and `supplemental`; family names use
/// `basename`; corporate and meeting names carry no fields the engine scores.
///
/// Field order defines the derived [`Ord`], which ranking uses to break ties
/// between equally scored candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Name {
    #[serde(default)]
    pub surname: String,

    #[serde(default)]
    pub forename: String,

    /// Titles, dates, numeration and other qualifiers
    #[serde(default)]
    pub supplemental: String,

    #[serde(default)]
    pub basename: String,

    #[serde(rename = "type")]
    pub name_type: NameType,

    /// Identifier of the source authority record (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Name {
    fn empty(name_type: NameType) -> Self {
        Self {
            surname: String::new(),
            forename: String::new(),
            supplemental: String::new(),
            basename: String::new(),
            name_type,
            identifier: None,
        }
    }

    pub fn personal(
        surname: impl Into<String>,
        forename: impl Into<String>,
        supplemental: impl Into<String>,
    ) -> Self {
        Self {
            surname: surname.into(),
            forename: forename.into(),
            supplemental: supplemental.into(),
            ..Self::empty(NameType::Personal)
        }
    }

    pub fn family(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            ..Self::empty(NameType::Family)
        }
    }

    pub fn corporate(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            ..Self::empty(NameType::Corporate)
        }
    }

    pub fn meeting(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            ..Self::empty(NameType::Meeting)
        }
    }

    /// Build a name from a raw type string, rejecting unknown types
    pub fn with_type_str(name_type: &str) -> Result<Self, MatchError> {
        Ok(Self::empty(name_type.parse()?))
    }

    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Human-readable heading for logs and summaries
    #[must_use]
    pub fn heading(&self) -> String {
        match self.name_type {
            NameType::Personal => {
                let mut heading = self.surname.clone();
                if !self.forename.is_empty() {
                    heading.push_str(", ");
                    heading.push_str(&self.forename);
                }
                if !self.supplemental.is_empty() {
                    heading.push_str(", ");
                    heading.push_str(&self.supplemental);
                }
                heading
            }
            NameType::Family | NameType::Corporate | NameType::Meeting => self.basename.clone(),
        }
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.heading(), self.name_type)
    }
}
