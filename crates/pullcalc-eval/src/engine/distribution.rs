use pullcalc_common::{Decimal, DistributionError, Probability, ResultGrid};

use super::cache::{BinomialCache, CacheSizes, ProbabilityCache};
use super::metrics::CacheMetrics;
use super::{
    DEFAULT_GENERIC_CHANCE, DEFAULT_SPECIFIC_CHANCE, EngineConfig, MAX_CHANCE, MIN_CHANCE,
    PROBABILITY_DENOMINATOR, check_cut_off_display_precision, check_precision,
};
use crate::format::PercentageFormat;

/// Shape of the strings returned by the grid entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridOutput {
    /// Probability as a decimal string (`"0"`, `"INF"` or digits at the precision).
    Raw,
    /// Cut-off percentage such as `"0.8000%"`.
    #[default]
    Percentage,
}

/// Both formatted results for one grid cell.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellResult {
    pub exact: String,
    pub at_least: String,
}

/// Binomial probability engine.
///
/// Owns the precision configuration, the success probability, the evaluation
/// grid and three memoization caches. Every method that can populate a cache
/// takes `&mut self`; sharing one engine across threads needs external
/// synchronization (or one engine per thread).
#[derive(Debug)]
pub struct DistributionEngine {
    pub(crate) config: EngineConfig,
    success_probability: Decimal,
    desired_copies: Vec<u64>,
    pull_amounts: Vec<u64>,
    pub(crate) binomial_cache: BinomialCache,
    pub(crate) exact_cache: ProbabilityCache,
    pub(crate) at_least_cache: ProbabilityCache,
    pub(crate) metrics: CacheMetrics,
}

impl Default for DistributionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DistributionEngine {
    /// Engine with the default configuration: precision 20, cut-off display
    /// precision 4, success probability 1% × 100%, one pull, one desired copy.
    pub fn new() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, DistributionError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let success_probability = derive_success_probability(
            &Decimal::from(DEFAULT_GENERIC_CHANCE as u64),
            &Decimal::from(DEFAULT_SPECIFIC_CHANCE as u64),
            config.precision,
        );
        Self {
            config,
            success_probability,
            desired_copies: vec![1],
            pull_amounts: vec![1],
            binomial_cache: BinomialCache::new(),
            exact_cache: ProbabilityCache::new(),
            at_least_cache: ProbabilityCache::new(),
            metrics: CacheMetrics::new(),
        }
    }

    /* ───────────────────────── Configuration ───────────────────────── */

    /// Set the decimal digits carried through arithmetic (`0..=100`).
    ///
    /// Cached values computed at the previous precision stay cached unless
    /// [`EngineConfig::clear_caches_on_precision_change`] is set.
    pub fn set_precision(&mut self, precision: u32) -> Result<(), DistributionError> {
        check_precision(precision)?;
        if precision != self.config.precision && self.config.clear_caches_on_precision_change {
            self.clear_caches();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.config.precision, to = precision, "precision changed");
        self.config.precision = precision;
        Ok(())
    }

    /// Derive the success probability from two percentages, each in `0..=100`.
    ///
    /// `generic_chance` is the chance a pull lands in the relevant category and
    /// `specific_chance` the chance that result is the desired one.
    pub fn set_success_probability(
        &mut self,
        generic_chance: f64,
        specific_chance: f64,
    ) -> Result<(), DistributionError> {
        DistributionError::check_range("Generic chance", generic_chance, MIN_CHANCE, MAX_CHANCE)?;
        DistributionError::check_range(
            "Specific chance",
            specific_chance,
            MIN_CHANCE,
            MAX_CHANCE,
        )?;
        let generic = chance_to_decimal("Generic chance", generic_chance)?;
        let specific = chance_to_decimal("Specific chance", specific_chance)?;

        self.success_probability =
            derive_success_probability(&generic, &specific, self.config.precision);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            generic_chance,
            specific_chance,
            probability = %self.success_probability,
            "success probability set"
        );
        Ok(())
    }

    pub fn set_desired_copies_amounts(&mut self, amounts: &[i64]) -> Result<(), DistributionError> {
        let amounts = positive_amounts("Desired copies amounts", amounts)?;
        if let Some(value) = first_duplicate(&amounts) {
            return Err(DistributionError::DuplicateValue {
                field: "Desired copies amounts",
                value,
            });
        }
        self.desired_copies = amounts;
        Ok(())
    }

    pub fn set_pull_amounts(&mut self, amounts: &[i64]) -> Result<(), DistributionError> {
        self.pull_amounts = positive_amounts("Pull amounts", amounts)?;
        Ok(())
    }

    /// Set `d` in `0..=10`: percentages below `10^-d` display as zero and
    /// results are shown with `d` decimals.
    pub fn set_cut_off_display_precision(&mut self, digits: u32) -> Result<(), DistributionError> {
        check_cut_off_display_precision(digits)?;
        self.config.cut_off_display_precision = digits;
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn precision(&self) -> u32 {
        self.config.precision
    }

    pub fn cut_off_display_precision(&self) -> u32 {
        self.config.cut_off_display_precision
    }

    pub fn success_probability(&self) -> &Decimal {
        &self.success_probability
    }

    pub fn desired_copies(&self) -> &[u64] {
        &self.desired_copies
    }

    pub fn pull_amounts(&self) -> &[u64] {
        &self.pull_amounts
    }

    /* ───────────────────────── Caches ───────────────────────── */

    pub fn clear_caches(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(entries = self.cache_sizes().total(), "clearing caches");
        self.binomial_cache.clear();
        self.exact_cache.clear();
        self.at_least_cache.clear();
    }

    pub fn cache_sizes(&self) -> CacheSizes {
        CacheSizes {
            binomial: self.binomial_cache.len(),
            exact: self.exact_cache.len(),
            at_least: self.at_least_cache.len(),
        }
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /* ───────────────────────── Formatting ───────────────────────── */

    pub fn percentage_format(&self) -> PercentageFormat {
        PercentageFormat::new(self.config.cut_off_display_precision, self.config.precision)
    }

    /// Format a probability string as a cut-off percentage.
    pub fn format_percentage(&self, probability: &str) -> Result<String, DistributionError> {
        let value = super::binomial::parse_probability(probability)?;
        Ok(self.percentage_format().format_decimal(&value))
    }

    pub fn format_probability(&self, probability: &Probability) -> String {
        self.percentage_format().format(probability)
    }

    /* ───────────────────────── Grid evaluation ───────────────────────── */

    /// Walk pull amounts (outer) × desired copies (inner), calling
    /// `compute(engine, desired_copies, pulls, success_probability)` per cell.
    pub fn evaluate_grid<T, F>(&mut self, mut compute: F) -> ResultGrid<T>
    where
        F: FnMut(&mut Self, u64, u64, &Decimal) -> T,
    {
        let p = self.success_probability.clone();
        let pulls = self.pull_amounts.clone();
        let copies = self.desired_copies.clone();

        #[cfg(feature = "tracing")]
        let _span =
            tracing::info_span!("evaluate_grid", rows = pulls.len(), cols = copies.len()).entered();

        let mut grid = ResultGrid::with_capacity(pulls.len());
        for &n in &pulls {
            let cells: Vec<(u64, T)> = copies
                .iter()
                .map(|&k| (k, compute(self, k, n, &p)))
                .collect();
            grid.push_row(n, cells);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(metrics = %self.metrics.summary(), "grid evaluated");
        grid
    }

    pub fn exact_grid(&mut self) -> ResultGrid<Probability> {
        self.evaluate_grid(|engine, k, n, p| engine.exact(k, n, p))
    }

    pub fn at_least_grid(&mut self) -> ResultGrid<Probability> {
        self.evaluate_grid(|engine, k, n, p| engine.at_least(k, n, p))
    }

    /// Exact-k probabilities for the configured grid.
    pub fn exact_distribution(&mut self, output: GridOutput) -> ResultGrid<String> {
        let grid = self.exact_grid();
        self.render(&grid, output)
    }

    /// At-least-k probabilities for the configured grid.
    pub fn at_least_distribution(&mut self, output: GridOutput) -> ResultGrid<String> {
        let grid = self.at_least_grid();
        self.render(&grid, output)
    }

    /// Exact and at-least percentages per cell; the exact value is computed
    /// first so the at-least sum reuses it from the cache.
    pub fn evaluate_both(&mut self) -> ResultGrid<CellResult> {
        let format = self.percentage_format();
        self.evaluate_grid(|engine, k, n, p| {
            let exact = engine.exact(k, n, p);
            let at_least = engine.at_least(k, n, p);
            CellResult {
                exact: format.format(&exact),
                at_least: format.format(&at_least),
            }
        })
    }

    fn render(&self, grid: &ResultGrid<Probability>, output: GridOutput) -> ResultGrid<String> {
        match output {
            GridOutput::Raw => grid.map(Probability::to_string),
            GridOutput::Percentage => {
                let format = self.percentage_format();
                grid.map(|probability| format.format(probability))
            }
        }
    }
}

fn derive_success_probability(generic: &Decimal, specific: &Decimal, precision: u32) -> Decimal {
    generic
        .mul(specific, precision)
        .div(&Decimal::from(PROBABILITY_DENOMINATOR), precision)
        .unwrap_or_else(Decimal::zero)
}

fn chance_to_decimal(field: &'static str, chance: f64) -> Result<Decimal, DistributionError> {
    Decimal::from_f64(chance).ok_or(DistributionError::OutOfRange {
        field,
        min: MIN_CHANCE,
        max: MAX_CHANCE,
        received: chance,
    })
}

fn positive_amounts(field: &'static str, amounts: &[i64]) -> Result<Vec<u64>, DistributionError> {
    if amounts.is_empty() {
        return Err(DistributionError::EmptyInput { field });
    }
    amounts
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            u64::try_from(value)
                .ok()
                .filter(|&v| v >= 1)
                .ok_or(DistributionError::NonPositive {
                    field,
                    index,
                    received: value,
                })
        })
        .collect()
}

fn first_duplicate(values: &[u64]) -> Option<u64> {
    let mut seen = rustc_hash::FxHashSet::default();
    values.iter().copied().find(|value| !seen.insert(*value))
}
