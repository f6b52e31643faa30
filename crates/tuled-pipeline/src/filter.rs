//! Two-pass coverage filter.
//!
//! Pass 1 drops languages that cover too few of the features seen in the
//! input. Pass 2, computed only on the survivors of pass 1, drops features
//! whose language coverage is too low relative to the best-covered feature.
//! Both thresholds are strict: a ratio equal to the threshold is dropped.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;
use tuled_core::Observation;

/// Degenerate filter inputs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Cannot filter: input contains no features")]
    NoFeatures,

    #[error("Cannot filter: no features survived the language ratio threshold")]
    NoSurvivingFeatures,

    #[error("Cannot filter: no feature has a known value after the language ratio threshold")]
    NoCoverage,
}

/// Row counts and dropped ids for one filter run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub input: usize,
    pub after_ratio: usize,
    pub after_coverage: usize,
    pub dropped_languages: Vec<String>,
    pub dropped_features: Vec<String>,
}

/// Filtered observations plus the statistics that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub observations: Vec<Observation>,
    pub stats: FilterStats,
}

impl FilterOutcome {
    /// Sorted ids of the languages that survived both passes.
    #[must_use]
    pub fn languages(&self) -> BTreeSet<String> {
        self.observations
            .iter()
            .map(|obs| obs.language_id.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageFilter {
    pub ratio_threshold: f64,
    pub coverage_threshold: f64,
}

impl CoverageFilter {
    #[must_use]
    pub const fn new(ratio_threshold: f64, coverage_threshold: f64) -> Self {
        Self {
            ratio_threshold,
            coverage_threshold,
        }
    }

    /// Run both passes.
    ///
    /// # Errors
    ///
    /// - [`FilterError::NoFeatures`] when the input is empty
    /// - [`FilterError::NoSurvivingFeatures`] when pass 1 keeps nothing
    /// - [`FilterError::NoCoverage`] when every surviving value is unknown
    pub fn apply(&self, observations: Vec<Observation>) -> Result<FilterOutcome, FilterError> {
        let input = observations.len();

        let (observations, dropped_languages) = self.filter_languages(observations)?;
        let after_ratio = observations.len();
        tracing::info!(
            from = input,
            to = after_ratio,
            threshold = self.ratio_threshold,
            "filtered by ratio_threshold"
        );

        let (observations, dropped_features) = self.filter_features(observations)?;
        let after_coverage = observations.len();
        tracing::info!(
            from = after_ratio,
            to = after_coverage,
            threshold = self.coverage_threshold,
            "filtered by coverage_threshold"
        );

        Ok(FilterOutcome {
            observations,
            stats: FilterStats {
                input,
                after_ratio,
                after_coverage,
                dropped_languages,
                dropped_features,
            },
        })
    }

    /// Pass 1: keep languages whose known-feature ratio exceeds the threshold.
    #[allow(clippy::cast_precision_loss)]
    fn filter_languages(
        &self,
        observations: Vec<Observation>,
    ) -> Result<(Vec<Observation>, Vec<String>), FilterError> {
        let features: HashSet<&str> = observations
            .iter()
            .map(|obs| obs.feature_id.as_str())
            .collect();
        if features.is_empty() {
            return Err(FilterError::NoFeatures);
        }

        let covered = known_sets(&observations, |obs| (&obs.language_id, &obs.feature_id));
        let total = features.len() as f64;
        let keep: HashSet<String> = covered
            .iter()
            .filter(|(_, set)| set.len() as f64 / total > self.ratio_threshold)
            .map(|(language, _)| (*language).to_string())
            .collect();

        Ok(partition(observations, &keep, |obs| &obs.language_id))
    }

    /// Pass 2: keep features whose language coverage, relative to the
    /// best-covered feature, exceeds the threshold.
    #[allow(clippy::cast_precision_loss)]
    fn filter_features(
        &self,
        observations: Vec<Observation>,
    ) -> Result<(Vec<Observation>, Vec<String>), FilterError> {
        if observations.is_empty() {
            return Err(FilterError::NoSurvivingFeatures);
        }

        let covering = known_sets(&observations, |obs| (&obs.feature_id, &obs.language_id));
        let max_cov = covering.values().map(HashSet::len).max().unwrap_or(0);
        if max_cov == 0 {
            return Err(FilterError::NoCoverage);
        }

        let max_cov = max_cov as f64;
        let keep: HashSet<String> = covering
            .iter()
            .filter(|(_, set)| set.len() as f64 / max_cov > self.coverage_threshold)
            .map(|(feature, _)| (*feature).to_string())
            .collect();

        Ok(partition(observations, &keep, |obs| &obs.feature_id))
    }
}

/// For each grouping key, the distinct members with a known value.
///
/// Keys whose observations are all unknown map to an empty set.
fn known_sets<'a, F>(observations: &'a [Observation], pair: F) -> HashMap<&'a str, HashSet<&'a str>>
where
    F: Fn(&'a Observation) -> (&'a String, &'a String),
{
    let mut sets: HashMap<&str, HashSet<&str>> = HashMap::new();
    for obs in observations {
        let (key, member) = pair(obs);
        let set = sets.entry(key.as_str()).or_default();
        if !obs.is_unknown() {
            set.insert(member.as_str());
        }
    }
    sets
}

/// Split into kept observations and the sorted, distinct dropped keys.
fn partition<F>(
    observations: Vec<Observation>,
    keep: &HashSet<String>,
    key: F,
) -> (Vec<Observation>, Vec<String>)
where
    F: Fn(&Observation) -> &String,
{
    let mut dropped = BTreeSet::new();
    let kept = observations
        .into_iter()
        .filter(|obs| {
            let id = key(obs);
            let retained = keep.contains(id);
            if !retained {
                dropped.insert(id.clone());
            }
            retained
        })
        .collect();
    (kept, dropped.into_iter().collect())
}
