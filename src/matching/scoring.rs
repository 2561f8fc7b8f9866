use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::comparator::{Metric, StringComparator};
use crate::core::name::{Name, NameType};
use crate::error::MatchError;

pub const SURNAME_LEVENSHTEIN: &str = "surname levenshtein";
pub const FORENAME_LEVENSHTEIN: &str = "forename levenshtein";
pub const FORENAME_TOKENS: &str = "forename tokens";
pub const SUPPLEMENTAL: &str = "supplemental";

/// Exponent and multiplier applied to one factor's base score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorSpec {
    /// Exponent; values above 1.0 punish weak similarities disproportionately
    pub severity: f64,
    /// Share of the weighted average
    pub weight: f64,
}

impl FactorSpec {
    #[must_use]
    pub const fn new(severity: f64, weight: f64) -> Self {
        Self { severity, weight }
    }
}

/// Factor configuration for personal-name scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalWeights {
    pub surname: FactorSpec,
    pub forename: FactorSpec,
    pub forename_tokens: FactorSpec,
    pub supplemental: FactorSpec,
}

impl Default for PersonalWeights {
    fn default() -> Self {
        Self {
            surname: FactorSpec::new(1.5, 5.0),
            forename: FactorSpec::new(1.0, 1.0),
            forename_tokens: FactorSpec::new(1.0, 4.0),
            supplemental: FactorSpec::new(1.0, 1.0),
        }
    }
}

/// One audited contribution to a composite score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub name: &'static str,
    pub base_score: f64,
    pub severity: f64,
    pub weight: f64,
    /// `base_score ^ severity * weight`
    pub score: f64,
}

impl Factor {
    #[must_use]
    pub fn new(name: &'static str, base_score: f64, spec: FactorSpec) -> Self {
        Self {
            name,
            base_score,
            severity: spec.severity,
            weight: spec.weight,
            score: base_score.powf(spec.severity) * spec.weight,
        }
    }
}

/// Per-factor breakdown of a composite score, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Explanation {
    factors: Vec<Factor>,
}

impl Explanation {
    #[must_use]
    pub fn new(factors: Vec<Factor>) -> Self {
        Self { factors }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Factor> {
        self.factors.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Factor> {
        self.factors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.factors.iter().map(|f| f.weight).sum()
    }

    /// Weighted average: sum of factor scores over sum of weights
    #[must_use]
    pub fn combined_score(&self) -> f64 {
        let total: f64 = self.factors.iter().map(|f| f.score).sum();
        total / self.total_weight()
    }
}

/// Result of running a type-specific scorer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreOutcome {
    /// `None` when the scorer defines no score (corporate and meeting names)
    pub score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

impl ScoreOutcome {
    /// Outcome for a score assigned outside the engine
    #[must_use]
    pub fn external(score: f64) -> Self {
        Self {
            score: Some(score),
            explanation: None,
        }
    }

    #[must_use]
    pub fn unscored() -> Self {
        Self::default()
    }
}

/// Degenerate comparisons (e.g. two empty forenames) contribute nothing
fn zero_if_nan(base_score: f64) -> f64 {
    if base_score.is_nan() {
        0.0
    } else {
        base_score
    }
}

/// Type-specific scoring functions over a comparator
pub struct Scorer<'a> {
    comparator: &'a dyn StringComparator,
    weights: &'a PersonalWeights,
}

impl<'a> Scorer<'a> {
    pub fn new(comparator: &'a dyn StringComparator, weights: &'a PersonalWeights) -> Self {
        Self {
            comparator,
            weights,
        }
    }

    /// Dispatch to the scorer for `name_type`
    pub fn score_for_type(
        &self,
        name: &Name,
        other_name: &Name,
        name_type: NameType,
    ) -> Result<ScoreOutcome, MatchError> {
        match name_type {
            NameType::Personal => self.personal_score(name, other_name),
            NameType::Family => self.family_score(name, other_name),
            NameType::Corporate => Ok(self.corporate_score(name, other_name)),
            NameType::Meeting => Ok(self.meeting_score(name, other_name)),
        }
    }

    /// Weighted combination of surname, forename and supplemental similarities
    pub fn personal_score(
        &self,
        name: &Name,
        other_name: &Name,
    ) -> Result<ScoreOutcome, MatchError> {
        let surname = self
            .comparator
            .compare(&name.surname, &other_name.surname, &[Metric::Levenshtein])?;
        let forename = self.comparator.compare(
            &name.forename,
            &other_name.forename,
            &[Metric::Levenshtein, Metric::ForenameTokens],
        )?;
        let supplemental = self.comparator.compare(
            &name.supplemental,
            &other_name.supplemental,
            &[Metric::Trigram],
        )?;

        let explanation = Explanation::new(vec![
            Factor::new(
                SURNAME_LEVENSHTEIN,
                zero_if_nan(surname.get(Metric::Levenshtein)?),
                self.weights.surname,
            ),
            Factor::new(
                FORENAME_LEVENSHTEIN,
                zero_if_nan(forename.get(Metric::Levenshtein)?),
                self.weights.forename,
            ),
            Factor::new(
                FORENAME_TOKENS,
                zero_if_nan(forename.get(Metric::ForenameTokens)?),
                self.weights.forename_tokens,
            ),
            Factor::new(
                SUPPLEMENTAL,
                zero_if_nan(supplemental.get(Metric::Trigram)?),
                self.weights.supplemental,
            ),
        ]);

        for factor in explanation.iter() {
            trace!(
                factor = factor.name,
                base_score = factor.base_score,
                severity = factor.severity,
                weight = factor.weight,
                score = factor.score,
                "personal score factor"
            );
        }

        Ok(ScoreOutcome {
            score: Some(explanation.combined_score()),
            explanation: Some(explanation),
        })
    }

    /// Edit-distance ratio between family basenames
    pub fn family_score(
        &self,
        name: &Name,
        other_name: &Name,
    ) -> Result<ScoreOutcome, MatchError> {
        let similarity = self.comparator.compare(
            &name.basename,
            &other_name.basename,
            &[Metric::Levenshtein],
        )?;
        Ok(ScoreOutcome::external(similarity.get(Metric::Levenshtein)?))
    }

    /// Corporate relevance comes from the search index, so the engine defines none
    #[must_use]
    pub fn corporate_score(&self, _name: &Name, _other_name: &Name) -> ScoreOutcome {
        ScoreOutcome::unscored()
    }

    /// Meetings follow the corporate policy
    #[must_use]
    pub fn meeting_score(&self, name: &Name, other_name: &Name) -> ScoreOutcome {
        self.corporate_score(name, other_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{ComparatorError, DefaultComparator, Similarities};

    /// Comparator answering every metric with a fixed table keyed on the first string
    fn table_comparator(
        a: &str,
        _b: &str,
        metrics: &[Metric],
    ) -> Result<Similarities, ComparatorError> {
        let value = match a {
            "surname" => 0.8,
            "forename" => 0.5,
            "supplemental" => f64::NAN,
            _ => 1.0,
        };
        Ok(metrics
            .iter()
            .fold(Similarities::new(), |acc, &m| acc.with(m, value)))
    }

    fn keyed_name() -> Name {
        Name::personal("surname", "forename", "supplemental")
    }

    #[test]
    fn test_factor_formula() {
        let factor = Factor::new(SURNAME_LEVENSHTEIN, 0.64, FactorSpec::new(1.5, 5.0));
        // 0.64^1.5 = 0.512
        assert!((factor.score - 2.56).abs() < 1e-9);
    }

    #[test]
    fn test_personal_identical_names() {
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&DefaultComparator, &weights);
        let name = Name::personal("Smith", "John Robert", "1900-1980");
        let outcome = scorer.personal_score(&name, &name.clone()).unwrap();

        let score = outcome.score.unwrap();
        assert!((score - 1.0).abs() < 1e-6, "score was {score}");

        let explanation = outcome.explanation.unwrap();
        assert_eq!(explanation.len(), 4);
        assert!((explanation.total_weight() - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_personal_weighted_average() {
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&table_comparator, &weights);
        let outcome = scorer.personal_score(&keyed_name(), &keyed_name()).unwrap();

        // surname 0.8^1.5*5, forename 0.5*1, tokens 0.5*4, supplemental NaN -> 0
        let expected = (0.8f64.powf(1.5) * 5.0 + 0.5 + 2.0 + 0.0) / 11.0;
        assert!((outcome.score.unwrap() - expected).abs() < 1e-9);

        let explanation = outcome.explanation.unwrap();
        let surname = explanation.get(SURNAME_LEVENSHTEIN).unwrap();
        assert_eq!(surname.base_score, 0.8);
        assert_eq!(surname.severity, 1.5);
        assert_eq!(surname.weight, 5.0);

        let supplemental = explanation.get(SUPPLEMENTAL).unwrap();
        assert_eq!(supplemental.base_score, 0.0);
        assert_eq!(supplemental.score, 0.0);
    }

    #[test]
    fn test_personal_empty_supplemental_is_finite() {
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&DefaultComparator, &weights);
        let name = Name::personal("Smith", "John", "");
        let outcome = scorer.personal_score(&name, &name.clone()).unwrap();

        let score = outcome.score.unwrap();
        assert!(score.is_finite());
        assert!((score - 10.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_personal_surname_only_is_finite() {
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&DefaultComparator, &weights);
        let name = Name::personal("Smith", "", "");
        let outcome = scorer.personal_score(&name, &name.clone()).unwrap();

        // Only the surname factor contributes: 1.0^1.5 * 5 over 11
        let score = outcome.score.unwrap();
        assert!(score.is_finite());
        assert!((score - 5.0 / 11.0).abs() < 1e-9);

        let explanation = outcome.explanation.unwrap();
        for factor in [FORENAME_LEVENSHTEIN, FORENAME_TOKENS, SUPPLEMENTAL] {
            let factor = explanation.get(factor).unwrap();
            assert_eq!(factor.base_score, 0.0);
            assert_eq!(factor.score, 0.0);
        }
    }

    #[test]
    fn test_every_nan_metric_contributes_zero() {
        let all_nan = |_: &str, _: &str, metrics: &[Metric]| {
            Ok::<_, ComparatorError>(
                metrics
                    .iter()
                    .fold(Similarities::new(), |acc, &m| acc.with(m, f64::NAN)),
            )
        };
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&all_nan, &weights);
        let outcome = scorer.personal_score(&keyed_name(), &keyed_name()).unwrap();

        assert_eq!(outcome.score, Some(0.0));
        assert!(outcome
            .explanation
            .unwrap()
            .iter()
            .all(|f| f.base_score == 0.0 && f.score == 0.0));
    }

    #[test]
    fn test_explanation_keeps_factor_order() {
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&table_comparator, &weights);
        let outcome = scorer.personal_score(&keyed_name(), &keyed_name()).unwrap();
        let names: Vec<&str> = outcome
            .explanation
            .unwrap()
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec![
                SURNAME_LEVENSHTEIN,
                FORENAME_LEVENSHTEIN,
                FORENAME_TOKENS,
                SUPPLEMENTAL
            ]
        );
    }

    #[test]
    fn test_family_score() {
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&DefaultComparator, &weights);
        let outcome = scorer
            .family_score(&Name::family("Smith"), &Name::family("Smyth"))
            .unwrap();
        assert!((outcome.score.unwrap() - 0.8).abs() < 1e-9);
        assert!(outcome.explanation.is_none());
    }

    #[test]
    fn test_corporate_and_meeting_unscored() {
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&DefaultComparator, &weights);
        let a = Name::corporate("Acme Corp");
        let b = Name::corporate("Acme Corporation");
        for name_type in [NameType::Corporate, NameType::Meeting] {
            let outcome = scorer.score_for_type(&a, &b, name_type).unwrap();
            assert_eq!(outcome, ScoreOutcome::unscored());
        }
    }

    #[test]
    fn test_comparator_failure_propagates() {
        let failing = |_: &str, _: &str, _: &[Metric]| -> Result<Similarities, ComparatorError> {
            Err(ComparatorError::Failed("service unavailable".to_string()))
        };
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&failing, &weights);
        let err = scorer
            .score_for_type(&keyed_name(), &keyed_name(), NameType::Personal)
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::Comparator(ComparatorError::Failed("service unavailable".to_string()))
        );
    }

    #[test]
    fn test_missing_metric_is_error() {
        let empty = |_: &str, _: &str, _: &[Metric]| -> Result<Similarities, ComparatorError> {
            Ok(Similarities::new())
        };
        let weights = PersonalWeights::default();
        let scorer = Scorer::new(&empty, &weights);
        let err = scorer
            .family_score(&Name::family("a"), &Name::family("b"))
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::Comparator(ComparatorError::MissingMetric(Metric::Levenshtein))
        );
    }
}
