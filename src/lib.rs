//! # name-match
//!
//! Scoring, categorization and ranking of candidate matches between authority
//! name records.
//!
//! Authority files accumulate near-duplicate headings: "Smith, John, 1900-1980"
//! and "Smyth, J., 1900-" may well be the same person. `name-match` compares a
//! reference name against candidates and assigns each pair a numeric score and
//! a confidence [`Category`] (strong, moderate, weak or bad).
//!
//! ## Features
//!
//! - **Type-specific scoring**: Personal names use a weighted multi-factor
//!   score, family names an edit-distance ratio; corporate and meeting names
//!   take their score from an external search index
//! - **Auditable scores**: Every personal score carries a per-factor
//!   [`Explanation`]
//! - **Configurable thresholds**: Category boundaries per name type
//! - **Deterministic ranking**: Descending score with a stable tie-break
//!
//! ## Example
//!
//! ```rust
//! use name_match::{MatchingEngine, Name};
//!
//! let engine = MatchingEngine::new();
//! let reference = Name::personal("Smith", "John", "1900-1980");
//! let candidate = Name::personal("Smyth", "John", "1900-1980");
//!
//! let m = engine.pair(&reference, &candidate);
//! let score = m.score().unwrap().unwrap();
//! println!("{}: {:.3} ({})", candidate, score, m.category().unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Name records, name types and categories
//! - [`comparator`]: String similarity metrics consumed by the scorers
//! - [`matching`]: Scoring, categorization and ranking

pub mod comparator;
pub mod core;
pub mod error;
pub mod matching;

// Re-export commonly used types for convenience
pub use crate::comparator::{DefaultComparator, Metric, Similarities, StringComparator};
pub use crate::core::name::{Name, NameType};
pub use crate::core::types::Category;
pub use crate::error::MatchError;
pub use crate::matching::engine::{Match, MatchSummary, MatchingConfig, MatchingEngine};
pub use crate::matching::scoring::Explanation;
