use thiserror::Error;

use crate::comparator::ComparatorError;

/// Errors surfaced by scoring, categorization and ranking
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// The name type has no scorer or threshold table
    #[error("Unsupported name type: {0:?} (expected personal, family, corporate or meeting)")]
    UnsupportedNameType(String),

    #[error("String comparison failed: {0}")]
    Comparator(#[from] ComparatorError),
}
