use serde::{Deserialize, Serialize};

/// Confidence category for a match.
///
/// Variants are ordered from least to most confident so categories can be
/// compared directly (`Category::Strong > Category::Weak`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bad,
    Weak,
    Moderate,
    Strong,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }

    /// Strong and moderate matches are worth presenting for review
    #[must_use]
    pub fn is_acceptable(self) -> bool {
        self >= Self::Moderate
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
