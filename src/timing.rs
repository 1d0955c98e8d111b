//! Wall-clock timing for the accumulator

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// A value together with the time it took to produce it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Run `f` between two monotonic clock samples.
///
/// Nothing but `f` itself falls inside the measured window.
pub fn time<T, F>(f: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();
    Timed { value, elapsed }
}

/// Statistical summary of timed runs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TimingStats {
    /// Number of timed runs
    pub runs: usize,

    /// Mean execution time
    pub mean: Duration,

    /// Median execution time
    pub median: Duration,

    /// Standard deviation
    pub std_dev: Duration,

    /// Minimum execution time
    pub min: Duration,

    /// Maximum execution time
    pub max: Duration,
}

impl TimingStats {
    /// Calculate statistics from a list of durations
    pub fn from_durations(mut durations: Vec<Duration>) -> Self {
        if durations.is_empty() {
            return Self::default();
        }

        durations.sort();
        let runs = durations.len();

        let min = durations[0];
        let max = durations[runs - 1];

        let total_nanos: u128 = durations.iter().map(Duration::as_nanos).sum();
        let mean_nanos = total_nanos / runs as u128;
        let mean = nanos_to_duration(mean_nanos);

        let median = if runs % 2 == 0 {
            let mid1 = durations[runs / 2 - 1];
            let mid2 = durations[runs / 2];
            nanos_to_duration((mid1.as_nanos() + mid2.as_nanos()) / 2)
        } else {
            durations[runs / 2]
        };

        let variance: f64 = durations
            .iter()
            .map(|d| {
                let diff = d.as_nanos() as f64 - mean_nanos as f64;
                diff * diff
            })
            .sum::<f64>()
            / runs as f64;
        let std_dev = Duration::from_nanos(variance.sqrt() as u64);

        Self {
            runs,
            mean,
            median,
            std_dev,
            min,
            max,
        }
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// How many times to run, and how many of those to throw away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    /// Untimed runs before measurement starts
    pub warmup: usize,

    /// Timed runs; zero is treated as one
    pub runs: usize,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self { warmup: 0, runs: 1 }
    }
}

/// Outcome of a [`Benchmark`]
#[derive(Debug, Clone)]
pub struct BenchmarkResult<T> {
    pub name: String,

    /// Value of every timed run, in order
    pub values: Vec<T>,

    /// Duration of every timed run, in order
    pub durations: Vec<Duration>,

    pub stats: TimingStats,
}

impl<T> BenchmarkResult<T> {
    /// Value produced by the last timed run
    pub fn last_value(&self) -> Option<&T> {
        self.values.last()
    }
}

/// Benchmark runner
pub struct Benchmark {
    name: String,
    plan: RunPlan,
}

impl Benchmark {
    /// Create a new benchmark
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plan: RunPlan::default(),
        }
    }

    pub fn with_plan(mut self, plan: RunPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Set warmup runs
    pub fn warmup(mut self, runs: usize) -> Self {
        self.plan.warmup = runs;
        self
    }

    /// Set timed runs
    pub fn runs(mut self, runs: usize) -> Self {
        self.plan.runs = runs;
        self
    }

    /// Run the benchmark
    pub fn run<T, F>(self, mut f: F) -> BenchmarkResult<T>
    where
        F: FnMut() -> T,
    {
        for round in 0..self.plan.warmup {
            let warm = time(&mut f);
            debug!(benchmark = %self.name, round, elapsed = ?warm.elapsed, "warmup run");
        }

        let runs = self.plan.runs.max(1);
        let mut values = Vec::with_capacity(runs);
        let mut durations = Vec::with_capacity(runs);

        for round in 0..runs {
            let Timed { value, elapsed } = time(&mut f);
            debug!(benchmark = %self.name, round, elapsed = ?elapsed, "timed run");
            values.push(value);
            durations.push(elapsed);
        }

        let stats = TimingStats::from_durations(durations.clone());

        BenchmarkResult {
            name: self.name,
            values,
            durations,
            stats,
        }
    }
}
