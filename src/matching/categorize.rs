use serde::{Deserialize, Serialize};

use crate::core::name::NameType;
use crate::core::types::Category;
use crate::error::MatchError;

/// Inclusive lower bounds for each category tier.
///
/// A score at or above `strong` is strong, at or above `moderate` is
/// moderate, at or above `weak` is weak, and anything else (including NaN)
/// is bad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub strong: f64,
    pub moderate: f64,
    pub weak: f64,
}

impl CategoryThresholds {
    /// Personal and family names
    pub const PERSONAL: Self = Self {
        strong: 0.9,
        moderate: 0.8,
        weak: 0.7,
    };

    /// Corporate and meeting names, scored by search relevance
    pub const CORPORATE: Self = Self {
        strong: 0.75,
        moderate: 0.60,
        weak: 0.55,
    };

    #[must_use]
    pub fn categorize(&self, score: f64) -> Category {
        if score >= self.strong {
            Category::Strong
        } else if score >= self.moderate {
            Category::Moderate
        } else if score >= self.weak {
            Category::Weak
        } else {
            Category::Bad
        }
    }
}

/// Threshold tables keyed by name type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Used for personal and family names
    pub personal: CategoryThresholds,
    /// Used for corporate and meeting names
    pub corporate: CategoryThresholds,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            personal: CategoryThresholds::PERSONAL,
            corporate: CategoryThresholds::CORPORATE,
        }
    }
}

impl Thresholds {
    #[must_use]
    pub fn for_type(&self, name_type: NameType) -> &CategoryThresholds {
        match name_type {
            NameType::Personal | NameType::Family => &self.personal,
            NameType::Corporate | NameType::Meeting => &self.corporate,
        }
    }

    /// Categorize a possibly absent score; an absent score is `Bad`
    #[must_use]
    pub fn categorize(&self, score: Option<f64>, name_type: NameType) -> Category {
        score.map_or(Category::Bad, |s| self.for_type(name_type).categorize(s))
    }
}

/// Categorize a score with the default threshold tables
#[must_use]
pub fn categorize(score: f64, name_type: NameType) -> Category {
    Thresholds::default().categorize(Some(score), name_type)
}

/// Categorize against a raw type string, rejecting unknown types
pub fn categorize_type_str(score: f64, name_type: &str) -> Result<Category, MatchError> {
    Ok(categorize(score, name_type.parse()?))
}
