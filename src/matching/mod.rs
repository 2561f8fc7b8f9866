//! Match scoring, categorization and ranking.
//!
//! - [`MatchingEngine`]: Entry point holding the comparator and configuration
//! - [`Match`]: A lazily scored (reference, candidate) pair
//! - [`Scorer`]: Type-specific scoring functions
//! - [`Thresholds`]: Score-to-category tables per name type
//!
//! ## Personal-name scoring
//!
//! Each factor contributes `base_score ^ severity * weight`, and the composite
//! is the sum of contributions over the sum of weights:
//!
//! | Factor               | Metric          | Severity | Weight |
//! |----------------------|-----------------|----------|--------|
//! | surname levenshtein  | levenshtein     | 1.5      | 5      |
//! | forename levenshtein | levenshtein     | 1        | 1      |
//! | forename tokens      | forename_tokens | 1        | 4      |
//! | supplemental         | trigram         | 1        | 1      |
//!
//! ## Example
//!
//! ```rust
//! use name_match::{MatchingEngine, Name, Category};
//!
//! let engine = MatchingEngine::new();
//! let reference = Name::personal("Smith", "John", "1900-1980");
//! let candidates = vec![
//!     Name::personal("Smith", "John", "1900-1980"),
//!     Name::personal("Jones", "Mary", ""),
//! ];
//!
//! let ranked = engine.rank(&reference, &candidates).unwrap();
//! assert_eq!(ranked[0].category().unwrap(), Category::Strong);
//! ```

pub mod categorize;
pub mod engine;
pub mod scoring;

pub use categorize::{categorize, categorize_type_str, CategoryThresholds, Thresholds};
pub use engine::{Match, MatchSummary, MatchingConfig, MatchingEngine};
pub use scoring::{Explanation, Factor, FactorSpec, PersonalWeights, ScoreOutcome, Scorer};
