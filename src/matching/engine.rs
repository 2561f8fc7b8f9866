use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

use crate::comparator::{DefaultComparator, StringComparator};
use crate::core::name::Name;
use crate::core::types::Category;
use crate::error::MatchError;
use crate::matching::categorize::Thresholds;
use crate::matching::scoring::{Explanation, PersonalWeights, ScoreOutcome, Scorer};

/// Configuration for the matching engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Severity and weight of each personal-name factor
    pub personal_weights: PersonalWeights,
    /// Category thresholds per name type
    pub thresholds: Thresholds,
}

impl MatchingConfig {
    /// Parse a configuration from JSON; omitted sections keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The main matching engine
pub struct MatchingEngine {
    comparator: Box<dyn StringComparator + Send + Sync>,
    config: MatchingConfig,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatchingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchingEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MatchingEngine {
    /// Create an engine with the default comparator and configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DefaultComparator, MatchingConfig::default())
    }

    /// Create an engine around an external comparator
    pub fn with_comparator(comparator: impl StringComparator + Send + Sync + 'static) -> Self {
        Self::with_config(comparator, MatchingConfig::default())
    }

    /// Create an engine with a custom comparator and configuration
    pub fn with_config(
        comparator: impl StringComparator + Send + Sync + 'static,
        config: MatchingConfig,
    ) -> Self {
        Self {
            comparator: Box::new(comparator),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn scorer(&self) -> Scorer<'_> {
        Scorer::new(self.comparator.as_ref(), &self.config.personal_weights)
    }

    /// Score a pair using the reference name's type
    pub fn score(&self, name: &Name, other_name: &Name) -> Result<ScoreOutcome, MatchError> {
        self.scorer()
            .score_for_type(name, other_name, name.name_type)
    }

    #[must_use]
    pub fn categorize(&self, score: Option<f64>, name: &Name) -> Category {
        self.config.thresholds.categorize(score, name.name_type)
    }

    /// Pair a reference name with a candidate; scoring happens on first read
    pub fn pair<'a>(&'a self, name: &'a Name, other_name: &'a Name) -> Match<'a> {
        Match::new(self, name, other_name)
    }

    /// Pair with a score assigned elsewhere (e.g. search relevance)
    pub fn pair_with_score<'a>(
        &'a self,
        name: &'a Name,
        other_name: &'a Name,
        score: f64,
    ) -> Match<'a> {
        Match::with_score(self, name, other_name, score)
    }

    /// Rank candidates against `name`, best first.
    ///
    /// Candidates are deduplicated by value (first occurrence wins), the
    /// reference record itself is dropped by identity, and the remainder is
    /// sorted by descending score with the candidate's own ordering as the
    /// tie-break. Unscored matches sort after every scored one. Every returned
    /// match is resolved.
    pub fn rank<'a, I>(
        &'a self,
        name: &'a Name,
        candidates: I,
    ) -> Result<Vec<Match<'a>>, MatchError>
    where
        I: IntoIterator<Item = &'a Name>,
    {
        let mut total = 0usize;
        let mut seen: HashSet<&Name> = HashSet::new();
        let unique: Vec<&'a Name> = candidates
            .into_iter()
            .inspect(|_| total += 1)
            .filter(|candidate| seen.insert(*candidate))
            .collect();
        let unique_count = unique.len();

        let mut matches: Vec<Match<'a>> = unique
            .into_iter()
            .filter(|candidate| !std::ptr::eq(*candidate, name))
            .map(|candidate| self.pair(name, candidate))
            .collect();

        for m in &matches {
            m.resolve()?;
        }

        matches.sort_by(compare_ranked);

        debug!(
            name = %name,
            candidates = total,
            unique = unique_count,
            ranked = matches.len(),
            "ranked candidate matches"
        );

        Ok(matches)
    }

    /// Rank and keep only the best `limit` matches
    pub fn rank_with_limit<'a, I>(
        &'a self,
        name: &'a Name,
        candidates: I,
        limit: usize,
    ) -> Result<Vec<Match<'a>>, MatchError>
    where
        I: IntoIterator<Item = &'a Name>,
    {
        let mut matches = self.rank(name, candidates)?;
        matches.truncate(limit);
        Ok(matches)
    }
}

/// Descending score (unscored and NaN last), then candidate name ascending
fn compare_ranked(a: &Match<'_>, b: &Match<'_>) -> Ordering {
    let by_score = match (a.ranking_score(), b.ranking_score()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_score.then_with(|| a.other_name.cmp(b.other_name))
}

/// Cached scoring state of a [`Match`]
#[derive(Debug, Clone, PartialEq)]
struct Resolution {
    outcome: ScoreOutcome,
    category: Category,
}

/// A reference name paired with a candidate, scored lazily.
///
/// The score is computed on first read and never changes afterwards. A score
/// supplied at construction is trusted as-is. Resolution is single-assignment,
/// so concurrent first reads may both compute but only one result is kept.
#[derive(Debug, Clone)]
pub struct Match<'a> {
    engine: &'a MatchingEngine,
    name: &'a Name,
    other_name: &'a Name,
    resolution: OnceLock<Resolution>,
}

impl<'a> Match<'a> {
    pub fn new(engine: &'a MatchingEngine, name: &'a Name, other_name: &'a Name) -> Self {
        Self {
            engine,
            name,
            other_name,
            resolution: OnceLock::new(),
        }
    }

    pub fn with_score(
        engine: &'a MatchingEngine,
        name: &'a Name,
        other_name: &'a Name,
        score: f64,
    ) -> Self {
        let outcome = ScoreOutcome::external(score);
        let category = engine.categorize(outcome.score, name);
        Self {
            engine,
            name,
            other_name,
            resolution: OnceLock::from(Resolution { outcome, category }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a Name {
        self.name
    }

    #[must_use]
    pub fn other_name(&self) -> &'a Name {
        self.other_name
    }

    #[must_use]
    pub fn names(&self) -> (&'a Name, &'a Name) {
        (self.name, self.other_name)
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolution.get().is_some()
    }

    fn resolution(&self) -> Result<&Resolution, MatchError> {
        if let Some(resolution) = self.resolution.get() {
            return Ok(resolution);
        }

        let outcome = self.engine.score(self.name, self.other_name)?;
        let category = self.engine.categorize(outcome.score, self.name);
        debug!(
            name = %self.name,
            other_name = %self.other_name,
            score = ?outcome.score,
            %category,
            "resolved match"
        );

        Ok(self
            .resolution
            .get_or_init(|| Resolution { outcome, category }))
    }

    /// Compute the score if needed and return the full outcome
    pub fn resolve(&self) -> Result<&ScoreOutcome, MatchError> {
        Ok(&self.resolution()?.outcome)
    }

    /// The match score; `None` for corporate and meeting pairs without an
    /// externally supplied score
    pub fn score(&self) -> Result<Option<f64>, MatchError> {
        Ok(self.resolve()?.score)
    }

    /// Confidence category; an absent score is `Bad`
    pub fn category(&self) -> Result<Category, MatchError> {
        Ok(self.resolution()?.category)
    }

    /// Per-factor breakdown, present for personal names only
    pub fn explanation(&self) -> Result<Option<&Explanation>, MatchError> {
        Ok(self.resolve()?.explanation.as_ref())
    }

    /// Auditable record of this pairing
    pub fn summary(&self) -> Result<MatchSummary, MatchError> {
        let resolution = self.resolution()?;
        Ok(MatchSummary {
            name: self.name.clone(),
            other_name: self.other_name.clone(),
            score: resolution.outcome.score,
            category: resolution.category,
            explanation: resolution.outcome.explanation.clone(),
        })
    }

    /// Score used for ordering; NaN ranks like an absent score
    fn ranking_score(&self) -> Option<f64> {
        self.resolution
            .get()
            .and_then(|r| r.outcome.score)
            .filter(|s| !s.is_nan())
    }
}

/// Serializable view of a resolved match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub name: Name,
    pub other_name: Name,
    pub score: Option<f64>,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}
