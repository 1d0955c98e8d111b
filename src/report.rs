//! Report formatting.
//!
//! The text report is the benchmark's whole public surface: exactly two lines,
//! twelve decimals for the value and six for the elapsed seconds.

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use serde::Serialize;

use crate::series::SeriesParams;
use crate::timing::TimingStats;

/// `Result: <value>` with 12 digits after the decimal point
pub fn format_result_line(value: f64) -> String {
    format!("Result: {value:.12}")
}

/// `Execution Time: <seconds> seconds` with 6 digits after the decimal point
pub fn format_time_line(elapsed: Duration) -> String {
    format!("Execution Time: {:.6} seconds", elapsed.as_secs_f64())
}

/// Everything known after a benchmark finishes
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub params: SeriesParams,

    /// Scaled series total
    pub result: f64,

    /// `|result - π|`
    pub abs_error: f64,

    /// Elapsed time reported on the time line
    pub elapsed_seconds: f64,

    pub stats: TimingStats,
}

impl BenchReport {
    /// Build a report; the time line shows the median run.
    pub fn new(params: SeriesParams, result: f64, stats: TimingStats) -> Self {
        Self {
            params,
            result,
            abs_error: crate::series::absolute_error(result),
            elapsed_seconds: stats.median.as_secs_f64(),
            stats,
        }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", format_result_line(self.result))?;
        writeln!(out, "{}", format_time_line(self.stats.median))?;
        out.flush()
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        out.flush()
    }

    /// Multi-run summary, meant for stderr
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let stats = &self.stats;
        writeln!(out, "{}", "Run Summary".bold())?;
        writeln!(out, "  Runs:      {}", stats.runs)?;
        writeln!(out, "  Mean:      {}", seconds(stats.mean))?;
        writeln!(out, "  Median:    {}", seconds(stats.median))?;
        writeln!(out, "  Std Dev:   {}", seconds(stats.std_dev))?;
        writeln!(out, "  {}  {}", "Min:".green(), seconds(stats.min))?;
        writeln!(out, "  {}  {}", "Max:".yellow(), seconds(stats.max))?;
        writeln!(out, "  Error:     {:.3e}", self.abs_error)
    }
}

fn seconds(duration: Duration) -> String {
    format!("{:.6}s", duration.as_secs_f64())
}
