//! String similarity metrics consumed by the scorers.
//!
//! Scoring never computes similarities itself; it asks a [`StringComparator`]
//! for named [`Metric`]s and combines the numbers. Callers with their own
//! comparison service implement the trait (closures work too), everyone else
//! uses [`DefaultComparator`].
//!
//! A metric over two degenerate inputs (both empty) is NaN rather than an
//! error. Scorers decide where NaN is tolerated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod tokens;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComparatorError {
    #[error("Comparator did not return requested metric: {0}")]
    MissingMetric(Metric),

    #[error("Comparator failed: {0}")]
    Failed(String),
}

/// A named similarity metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Normalized edit-distance ratio
    Levenshtein,
    /// Overlap of forename tokens, tolerant of initials
    ForenameTokens,
    /// Character trigram similarity
    Trigram,
}

impl Metric {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Levenshtein => "levenshtein",
            Self::ForenameTokens => "forename_tokens",
            Self::Trigram => "trigram",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metric values returned by a single comparison
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Similarities {
    values: Vec<(Metric, f64)>,
}

impl Similarities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.insert(metric, value);
        self
    }

    pub fn insert(&mut self, metric: Metric, value: f64) {
        match self.values.iter_mut().find(|(m, _)| *m == metric) {
            Some(entry) => entry.1 = value,
            None => self.values.push((metric, value)),
        }
    }

    /// Value of a metric, failing if the comparator did not provide it
    pub fn get(&self, metric: Metric) -> Result<f64, ComparatorError> {
        self.values
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
            .ok_or(ComparatorError::MissingMetric(metric))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// Computes named similarity metrics between two strings
pub trait StringComparator {
    fn compare(
        &self,
        a: &str,
        b: &str,
        metrics: &[Metric],
    ) -> Result<Similarities, ComparatorError>;
}

impl<F> StringComparator for F
where
    F: Fn(&str, &str, &[Metric]) -> Result<Similarities, ComparatorError>,
{
    fn compare(
        &self,
        a: &str,
        b: &str,
        metrics: &[Metric],
    ) -> Result<Similarities, ComparatorError> {
        self(a, b, metrics)
    }
}

/// Comparator backed by `strsim` and `trigram`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparator;

impl DefaultComparator {
    fn metric(metric: Metric, a: &str, b: &str) -> f64 {
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() && b.is_empty() {
            return f64::NAN;
        }
        match metric {
            Metric::Levenshtein => strsim::normalized_levenshtein(a, b),
            Metric::ForenameTokens => tokens::token_similarity(a, b),
            Metric::Trigram => {
                if a.is_empty() || b.is_empty() {
                    0.0
                } else {
                    f64::from(trigram::similarity(a, b))
                }
            }
        }
    }
}

impl StringComparator for DefaultComparator {
    fn compare(
        &self,
        a: &str,
        b: &str,
        metrics: &[Metric],
    ) -> Result<Similarities, ComparatorError> {
        Ok(metrics.iter().fold(Similarities::new(), |acc, &metric| {
            acc.with(metric, Self::metric(metric, a, b))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        let sims = DefaultComparator
            .compare("Smith", "Smith", &[Metric::Levenshtein])
            .unwrap();
        assert!((sims.get(Metric::Levenshtein).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_levenshtein_partial() {
        let sims = DefaultComparator
            .compare("Smith", "Smyth", &[Metric::Levenshtein])
            .unwrap();
        // One substitution over five characters
        assert!((sims.get(Metric::Levenshtein).unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_trigram_identical_and_disjoint() {
        let sims = DefaultComparator
            .compare("1900-1980", "1900-1980", &[Metric::Trigram])
            .unwrap();
        assert!((sims.get(Metric::Trigram).unwrap() - 1.0).abs() < 1e-6);

        let sims = DefaultComparator
            .compare("1900-1980", "", &[Metric::Trigram])
            .unwrap();
        assert_eq!(sims.get(Metric::Trigram).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_inputs_are_nan() {
        let sims = DefaultComparator
            .compare(
                "",
                "  ",
                &[Metric::Levenshtein, Metric::ForenameTokens, Metric::Trigram],
            )
            .unwrap();
        for (_, value) in sims.iter() {
            assert!(value.is_nan());
        }
    }

    #[test]
    fn test_missing_metric() {
        let sims = DefaultComparator
            .compare("a", "b", &[Metric::Levenshtein])
            .unwrap();
        assert_eq!(
            sims.get(Metric::Trigram),
            Err(ComparatorError::MissingMetric(Metric::Trigram))
        );
    }

    #[test]
    fn test_closure_comparator() {
        let fixed = |_: &str, _: &str, metrics: &[Metric]| {
            Ok::<_, ComparatorError>(
                metrics
                    .iter()
                    .fold(Similarities::new(), |acc, &m| acc.with(m, 0.5)),
            )
        };
        let sims = fixed.compare("x", "y", &[Metric::Trigram]).unwrap();
        assert_eq!(sims.get(Metric::Trigram).unwrap(), 0.5);
    }

    #[test]
    fn test_insert_overwrites() {
        let sims = Similarities::new()
            .with(Metric::Levenshtein, 0.1)
            .with(Metric::Levenshtein, 0.9);
        assert_eq!(sims.get(Metric::Levenshtein).unwrap(), 0.9);
        assert_eq!(sims.iter().count(), 1);
    }
}
