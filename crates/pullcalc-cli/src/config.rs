//! Run configuration: a JSON file merged with command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pullcalc_eval::engine::{DEFAULT_GENERIC_CHANCE, DEFAULT_SPECIFIC_CHANCE};
use pullcalc_eval::{DistributionEngine, DistributionError, EngineConfig};
use serde::Deserialize;

use crate::cli::Cli;

/// Everything one run needs to build and drive an engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    pub(crate) engine: EngineConfig,
    pub(crate) generic_chance: f64,
    pub(crate) specific_chance: f64,
    pub(crate) desired_copies: Vec<i64>,
    pub(crate) pull_amounts: Vec<i64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            generic_chance: DEFAULT_GENERIC_CHANCE,
            specific_chance: DEFAULT_SPECIFIC_CHANCE,
            desired_copies: vec![1],
            pull_amounts: vec![1],
        }
    }
}

impl RunConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// File values (or defaults) with every flag given on the command line
    /// layered on top.
    pub(crate) fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub(crate) fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(precision) = cli.precision {
            self.engine.precision = precision;
        }
        if let Some(digits) = cli.cut_off_precision {
            self.engine.cut_off_display_precision = digits;
        }
        if let Some(chance) = cli.generic_chance {
            self.generic_chance = chance;
        }
        if let Some(chance) = cli.specific_chance {
            self.specific_chance = chance;
        }
        if !cli.copies.is_empty() {
            self.desired_copies = cli.copies.clone();
        }
        if !cli.pulls.is_empty() || cli.pull_range.is_some() {
            let mut pulls = cli.pulls.clone();
            if let Some(range) = cli.pull_range {
                pulls.extend(range.expand());
            }
            self.pull_amounts = pulls;
        }
    }

    pub(crate) fn build_engine(&self) -> Result<DistributionEngine, DistributionError> {
        let mut engine = DistributionEngine::with_config(self.engine.clone())?;
        engine.set_success_probability(self.generic_chance, self.specific_chance)?;
        engine.set_desired_copies_amounts(&self.desired_copies)?;
        engine.set_pull_amounts(&self.pull_amounts)?;
        Ok(engine)
    }
}
