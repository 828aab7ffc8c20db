//! CLI argument definitions.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

pub(crate) const CLI_LONG_ABOUT: &str =
    "Chance of pulling exactly, or at least, K copies of a desired result within N pulls.\n\n\
    The per-pull success probability is generic% x specific% / 10000: the chance a pull\n\
    lands in the relevant category, times the chance that result is the one you want.\n\n\
    Example (1% category rate, 80% rate-up, every 11th pull up to 330):\n  \
    pullcalc --generic-chance 1 --specific-chance 80 --copies 1,2,3,4,5,6 --pull-range 11:330:11";

#[derive(Parser, Debug)]
#[command(name = "pullcalc")]
#[command(about = "Binomial pull probability calculator")]
#[command(long_about = CLI_LONG_ABOUT)]
#[command(version)]
pub(crate) struct Cli {
    /// Chance (percent, 0-100) that a pull lands in the relevant category
    #[arg(long)]
    pub(crate) generic_chance: Option<f64>,

    /// Chance (percent, 0-100) that such a pull is the desired result
    #[arg(long)]
    pub(crate) specific_chance: Option<f64>,

    /// Desired copy counts to evaluate (comma separated)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub(crate) copies: Vec<i64>,

    /// Pull amounts to evaluate (comma separated)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub(crate) pulls: Vec<i64>,

    /// Stepped pull amounts START:END[:STEP], appended after --pulls
    #[arg(long)]
    pub(crate) pull_range: Option<PullRange>,

    /// Decimal digits carried through arithmetic (0-100)
    #[arg(long)]
    pub(crate) precision: Option<u32>,

    /// Displayed decimals; smaller percentages show as zero (0-10)
    #[arg(long)]
    pub(crate) cut_off_precision: Option<u32>,

    /// Which probabilities to compute
    #[arg(long, value_enum, default_value_t = Mode::Both)]
    pub(crate) mode: Mode,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,

    /// Print raw probabilities instead of percentages
    #[arg(long)]
    pub(crate) raw: bool,

    /// JSON file with engine settings and inputs; flags override it
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    Exact,
    AtLeast,
    Both,
}

impl Mode {
    pub(crate) fn includes_exact(self) -> bool {
        matches!(self, Mode::Exact | Mode::Both)
    }

    pub(crate) fn includes_at_least(self) -> bool {
        matches!(self, Mode::AtLeast | Mode::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// `START:END[:STEP]`, inclusive of `END` when the step lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PullRange {
    pub(crate) start: i64,
    pub(crate) end: i64,
    pub(crate) step: i64,
}

impl PullRange {
    pub(crate) fn expand(&self) -> Vec<i64> {
        (self.start..=self.end)
            .step_by(self.step as usize)
            .collect()
    }
}

impl FromStr for PullRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let number = |part: &str| {
            part.trim()
                .parse::<i64>()
                .map_err(|e| format!("invalid number '{part}' in pull range: {e}"))
        };
        let (start, end, step) = match parts.as_slice() {
            [start, end] => (number(start)?, number(end)?, 1),
            [start, end, step] => (number(start)?, number(end)?, number(step)?),
            _ => return Err(format!("expected START:END[:STEP], got '{s}'")),
        };
        if step < 1 {
            return Err(format!("pull range step must be positive, got {step}"));
        }
        if start > end {
            return Err(format!("pull range start {start} is after end {end}"));
        }
        Ok(Self { start, end, step })
    }
}
