//! Alternating reciprocal series benchmark.
//!
//! Sums `4 * (1 + Σ -1/(a*i - b) + 1/(a*i + b))` for `i = 1..=N`, which with
//! the default coefficients converges to π, and reports how long it took.

pub mod cli;
pub mod config;
pub mod report;
pub mod series;
pub mod timing;
pub mod version;
