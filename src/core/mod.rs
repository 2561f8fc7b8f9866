//! Core data types for name matching.
//!
//! - [`Name`]: An authority name record (personal, family, corporate or meeting)
//! - [`NameType`]: Closed set of supported heading types
//! - [`Category`]: Discrete confidence label derived from a score
//!
//! ## Fields by type
//!
//! | Type      | Fields scored                          |
//! |-----------|----------------------------------------|
//! | personal  | surname, forename, supplemental        |
//! | family    | basename                               |
//! | corporate | none (score supplied by a search index)|
//! | meeting   | none (score supplied by a search index)|

pub mod name;
pub mod types;
