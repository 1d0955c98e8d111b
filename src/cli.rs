use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use crate::config::{BenchConfig, OutputFormat};
use crate::report::BenchReport;
use crate::series::{self, SeriesParams};
use crate::timing::Benchmark;
use crate::version::VERSION;
use pibench_utils::logger;

#[derive(Parser, Debug)]
#[command(
    name = "pibench",
    version = VERSION,
    about = "Approximate pi with an alternating reciprocal series and time it"
)]
pub struct PibenchCli {
    #[arg(short = 'n', long, value_name = "N")]
    /// Number of term pairs to sum [default: 200000000, env: PIBENCH_ITERATIONS]
    iterations: Option<u64>,

    #[arg(short = 'a', long, value_name = "A", allow_negative_numbers = true)]
    /// Denominator slope [default: 4.0, env: PIBENCH_COEFF_A]
    coeff_a: Option<f64>,

    #[arg(short = 'b', long, value_name = "B", allow_negative_numbers = true)]
    /// Denominator offset [default: 1.0, env: PIBENCH_COEFF_B]
    coeff_b: Option<f64>,

    #[arg(long, value_name = "COUNT")]
    /// Timed runs; the time line reports the median [default: 1, env: PIBENCH_RUNS]
    runs: Option<usize>,

    #[arg(long, value_name = "COUNT")]
    /// Untimed runs before measuring [default: 0, env: PIBENCH_WARMUP]
    warmup: Option<usize>,

    #[arg(long, value_name = "text|json")]
    /// Report format [default: text, env: PIBENCH_FORMAT]
    format: Option<OutputFormat>,
}

impl PibenchCli {
    /// Layer the flags that were given over `config`.
    pub fn apply(&self, config: &mut BenchConfig) {
        if let Some(iterations) = self.iterations {
            config.params.iterations = iterations;
        }
        if let Some(a) = self.coeff_a {
            config.params.a = a;
        }
        if let Some(b) = self.coeff_b {
            config.params.b = b;
        }
        if let Some(runs) = self.runs {
            config.plan.runs = runs;
        }
        if let Some(warmup) = self.warmup {
            config.plan.warmup = warmup;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
    }
}

pub fn run() -> Result<()> {
    logger::init_logging();
    let cli = PibenchCli::parse();

    let mut config = BenchConfig::from_env();
    cli.apply(&mut config);

    let report = execute(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit(&report, config.format, &mut out).context("failed to write report to stdout")?;

    if report.stats.runs > 1 {
        report
            .write_summary(&mut io::stderr().lock())
            .context("failed to write run summary")?;
    }

    Ok(())
}

/// Validate the parameters, then run and time the accumulator.
pub fn execute(config: &BenchConfig) -> Result<BenchReport> {
    let params: SeriesParams = config.params;
    params
        .validate()
        .with_context(|| format!("invalid series parameters {params:?}"))?;

    info!(
        iterations = params.iterations,
        a = params.a,
        b = params.b,
        warmup = config.plan.warmup,
        runs = config.plan.runs,
        "starting benchmark"
    );

    let result = Benchmark::new("series")
        .with_plan(config.plan)
        .run(|| series::accumulate_validated(&params));

    let mut value = None;
    for outcome in result.values {
        value = Some(outcome.context("series accumulation failed")?);
    }
    let value = value.context("benchmark produced no runs")?;

    debug!(
        result = value,
        abs_error = series::absolute_error(value),
        median = ?result.stats.median,
        "benchmark finished"
    );

    Ok(BenchReport::new(params, value, result.stats))
}

fn emit<W: Write>(report: &BenchReport, format: OutputFormat, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Text => report.write_text(out),
        OutputFormat::Json => report.write_json(out),
    }
}
