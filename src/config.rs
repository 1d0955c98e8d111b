//! Benchmark configuration

use tracing::warn;

use crate::series::SeriesParams;
use crate::timing::RunPlan;

pub const ENV_ITERATIONS: &str = "PIBENCH_ITERATIONS";
pub const ENV_COEFF_A: &str = "PIBENCH_COEFF_A";
pub const ENV_COEFF_B: &str = "PIBENCH_COEFF_B";
pub const ENV_RUNS: &str = "PIBENCH_RUNS";
pub const ENV_WARMUP: &str = "PIBENCH_WARMUP";
pub const ENV_FORMAT: &str = "PIBENCH_FORMAT";

/// How the report is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Two human-readable lines
    #[default]
    Text,
    /// One pretty-printed JSON document
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Everything a benchmark run needs
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BenchConfig {
    pub params: SeriesParams,
    pub plan: RunPlan,
    pub format: OutputFormat,
}

impl BenchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from `lookup`; unparseable values are logged and skipped.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(iterations) = parse_var(&lookup, ENV_ITERATIONS) {
            self.params.iterations = iterations;
        }
        if let Some(a) = parse_var(&lookup, ENV_COEFF_A) {
            self.params.a = a;
        }
        if let Some(b) = parse_var(&lookup, ENV_COEFF_B) {
            self.params.b = b;
        }
        if let Some(runs) = parse_var(&lookup, ENV_RUNS) {
            self.plan.runs = runs;
        }
        if let Some(warmup) = parse_var(&lookup, ENV_WARMUP) {
            self.plan.warmup = warmup;
        }
        if let Some(format) = parse_var(&lookup, ENV_FORMAT) {
            self.format = format;
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
