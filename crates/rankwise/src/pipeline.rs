//! End-to-end factor pipeline: select, resample, melt, rank, combine.

use std::{collections::HashSet, path::Path};

use rankwise_calendar::{melt, resample_optional, select_assets};
use rankwise_combine::{
    EqualWeightRankCombiner, RankCombiner, RankOptions, WeightedRankCombiner, WeightedRankConfig,
    factor_subsets, rank_long_table,
};
use rankwise_traits::{
    CompositeTable, FactorSource, RankedTable, RankwiseError, Result, TradingCalendar,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const fn default_true() -> bool {
    true
}

const fn default_weight() -> f64 {
    1.0
}

/// One factor taking part in the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorSpec {
    /// Factor name, used to look the table up in a [`FactorSource`].
    pub name: String,
    /// Ranking direction for this factor.
    #[serde(default = "default_true")]
    pub positive_correlation: bool,
    /// Weight of this factor's rank in the composite.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl FactorSpec {
    /// A factor with weight 1.
    pub fn new(name: impl Into<String>, positive_correlation: bool) -> Self {
        Self {
            name: name.into(),
            positive_correlation,
            weight: 1.0,
        }
    }

    /// Sets the weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Pipeline configuration, loadable from JSON.
///
/// ```json
/// {
///   "factors": [
///     { "name": "roe", "positive_correlation": true, "weight": 0.5 },
///     { "name": "pb", "positive_correlation": false, "weight": 0.5 }
///   ],
///   "assets": ["2330", "2317"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Factors to rank and combine.
    pub factors: Vec<FactorSpec>,
    /// Asset universe. Empty keeps every column of each factor table.
    #[serde(default)]
    pub assets: Vec<String>,
    /// Direction used to re-rank the weighted sum.
    #[serde(default = "default_true")]
    pub composite_positive_correlation: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            factors: Vec::new(),
            assets: Vec::new(),
            composite_positive_correlation: true,
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::Configuration`] if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RankwiseError::Configuration(format!("invalid pipeline config: {e}")))
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RankwiseError::Other(format!("reading {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Checks that at least one factor is configured and names are unique.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::Configuration`] on violation.
    pub fn validate(&self) -> Result<()> {
        if self.factors.is_empty() {
            return Err(RankwiseError::Configuration(
                "pipeline needs at least one factor".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.factors.len());
        if let Some(dup) = self.factors.iter().find(|f| !seen.insert(f.name.as_str())) {
            return Err(RankwiseError::Configuration(format!(
                "factor '{}' is listed more than once",
                dup.name
            )));
        }
        Ok(())
    }

    /// Factor names in configured order.
    pub fn factor_names(&self) -> Vec<&str> {
        self.factors.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Runs the ranking stages for a configured set of factors.
///
/// Factor tables are fetched through a [`FactorSource`], so the pipeline
/// never touches files or network itself.
#[derive(Debug, Clone)]
pub struct FactorPipeline {
    config: PipelineConfig,
}

impl FactorPipeline {
    /// Creates a pipeline after validating `config`.
    ///
    /// # Errors
    ///
    /// See [`PipelineConfig::validate`].
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The pipeline configuration.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Select, resample, melt, and rank one factor.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot supply the factor.
    pub fn ranked_factor<S: FactorSource + ?Sized>(
        &self,
        source: &S,
        spec: &FactorSpec,
        calendar: Option<&TradingCalendar>,
    ) -> Result<RankedTable> {
        let mut table = source.factor_table(&spec.name)?.with_name(spec.name.as_str());
        if !self.config.assets.is_empty() {
            table = select_assets(&table, &self.config.assets)?;
        }
        let table = resample_optional(&table, calendar)?;
        let long = melt(&table)?;
        let ranked = rank_long_table(&long, &RankOptions::with_direction(spec.positive_correlation))?;

        debug!(
            factor = %spec.name,
            dates = table.height(),
            assets = table.width(),
            ranked = ranked.records().iter().filter(|r| r.is_ranked()).count(),
            "ranked factor"
        );
        Ok(ranked)
    }

    /// Ranks every configured factor, in configured order.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`ranked_factor`](Self::ranked_factor).
    pub fn ranked_factors<S: FactorSource + ?Sized>(
        &self,
        source: &S,
        calendar: Option<&TradingCalendar>,
    ) -> Result<Vec<RankedTable>> {
        self.config
            .factors
            .iter()
            .map(|spec| self.ranked_factor(source, spec, calendar))
            .collect()
    }

    /// Ranks every factor and combines them with the configured weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a factor cannot be loaded or a weight is invalid.
    pub fn run<S: FactorSource + ?Sized>(
        &self,
        source: &S,
        calendar: Option<&TradingCalendar>,
    ) -> Result<CompositeTable> {
        let ranked = self.ranked_factors(source, calendar)?;
        let combiner = WeightedRankCombiner::new(WeightedRankConfig {
            weights: self.config.factors.iter().map(|f| f.weight).collect(),
            positive_correlation: self.config.composite_positive_correlation,
        });
        let composite = combiner.combine(&ranked)?;

        info!(
            factors = ranked.len(),
            combiner = combiner.name(),
            rows = composite.len(),
            "built composite ranking"
        );
        Ok(composite)
    }

    /// Builds an equal-weight composite for every `k`-factor subset.
    ///
    /// Each factor is ranked once. Subsets are returned in lexicographic
    /// order of the configured factor list.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::Configuration`] if `k` is zero or exceeds
    /// the number of factors, or any error from ranking.
    pub fn sweep<S: FactorSource + ?Sized>(
        &self,
        source: &S,
        calendar: Option<&TradingCalendar>,
        k: usize,
    ) -> Result<Vec<(Vec<String>, CompositeTable)>> {
        let names = self.config.factor_names();
        let subsets = factor_subsets(&names, k);
        if subsets.is_empty() {
            return Err(RankwiseError::Configuration(format!(
                "cannot choose {k} of {} factors",
                names.len()
            )));
        }

        let ranked = self.ranked_factors(source, calendar)?;
        let combiner = EqualWeightRankCombiner::new(self.config.composite_positive_correlation);

        let mut results = Vec::with_capacity(subsets.len());
        for subset in subsets {
            let tables: Vec<RankedTable> = subset
                .iter()
                .filter_map(|name| names.iter().position(|n| *n == name.as_str()))
                .map(|i| ranked[i].clone())
                .collect();
            let composite = combiner.combine(&tables)?;
            debug!(factors = ?subset, rows = composite.len(), "combined subset");
            results.push((subset, composite));
        }

        info!(k, subsets = results.len(), "finished factor sweep");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json_defaults() {
        let config =
            PipelineConfig::from_json_str(r#"{"factors": [{"name": "roe"}, {"name": "pb", "positive_correlation": false, "weight": 0.3}]}"#)
                .unwrap();
        assert_eq!(config.factors.len(), 2);
        assert!(config.factors[0].positive_correlation);
        assert_eq!(config.factors[0].weight, 1.0);
        assert_eq!(config.factors[1].weight, 0.3);
        assert!(config.assets.is_empty());
        assert!(config.composite_positive_correlation);
    }

    #[test]
    fn test_config_rejects_bad_json() {
        let err = PipelineConfig::from_json_str("{").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_validate_requires_factors() {
        let err = FactorPipeline::new(PipelineConfig::default()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = PipelineConfig {
            factors: vec![FactorSpec::new("roe", true), FactorSpec::new("roe", false)],
            ..PipelineConfig::default()
        };
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_factor_spec_builder() {
        let spec = FactorSpec::new("pb", false).with_weight(0.2);
        assert_eq!(spec.weight, 0.2);
        assert!(!spec.positive_correlation);
    }
}
